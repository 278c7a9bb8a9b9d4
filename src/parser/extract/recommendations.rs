use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::parser::dom;
use crate::parser::sections::{self, SectionKind, Strategy};
use crate::record::RecommendationEntry;

static LIST: LazyLock<Selector> = LazyLock::new(|| dom::selector("ul.recommendation-list"));
static ITEM: LazyLock<Selector> = LazyLock::new(|| dom::selector("li"));
static BODY: LazyLock<Selector> = LazyLock::new(|| dom::selector("div.recommendation-text"));
static LINK: LazyLock<Selector> = LazyLock::new(|| dom::selector("a"));
static NAME: LazyLock<Selector> = LazyLock::new(|| dom::selector("dt"));

pub fn extract(doc: &Html) -> Vec<RecommendationEntry> {
    sections::locate_first(
        doc,
        SectionKind::Recommendations,
        &[Strategy::Structural, Strategy::Heading],
    )
    .map(|s| from_root(s.root))
    .unwrap_or_default()
}

pub fn from_root(root: ElementRef) -> Vec<RecommendationEntry> {
    let Some(list) = root.select(&LIST).next() else {
        return Vec::new();
    };
    list.select(&ITEM).map(entry).collect()
}

fn entry(item: ElementRef) -> RecommendationEntry {
    let recommendation = dom::clean_text_of(item.select(&BODY).next());
    let (given_by, given_by_url) = match item.select(&LINK).next() {
        Some(link) => (
            dom::clean_text_of(link.select(&NAME).next()),
            dom::href_without_query(link),
        ),
        None => (String::new(), String::new()),
    };
    RecommendationEntry {
        recommendation_given_by: given_by,
        recommendation_given_by_url: given_by_url,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_each_recommendation() {
        let doc = Html::parse_document(
            r#"<section class="recommendations"><h2>Recommendations</h2>
                 <ul class="recommendation-list">
                   <li>
                     <a href="https://example.com/in/alex?trk=rec"><dl><dt>Alex Kim</dt><dd>CTO</dd></dl></a>
                     <div class="recommendation-text">Jane is   the best…more
                     See less</div>
                   </li>
                   <li><div class="recommendation-text">Anonymous praise</div></li>
                 </ul>
               </section>"#,
        );
        let recs = extract(&doc);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].recommendation_given_by, "Alex Kim");
        assert_eq!(recs[0].recommendation_given_by_url, "https://example.com/in/alex");
        assert_eq!(recs[0].recommendation, "Jane is the best");
        assert_eq!(recs[1].recommendation_given_by, "");
        assert_eq!(recs[1].recommendation_given_by_url, "");
        assert_eq!(recs[1].recommendation, "Anonymous praise");
    }

    #[test]
    fn missing_list_is_empty() {
        let doc = Html::parse_document("<section><h2>Recommendations</h2><p>none yet</p></section>");
        assert!(extract(&doc).is_empty());
    }
}
