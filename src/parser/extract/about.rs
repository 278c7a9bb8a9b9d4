use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::parser::dom;
use crate::parser::sections::{self, SectionKind, Strategy};

// The heading text leaks into the section body.
static ABOUT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^about\b\s*").unwrap());

/// `None` when no About section exists under either strategy; `Some("")`
/// when the section exists but carries no text.
pub fn extract(doc: &Html) -> Option<String> {
    let section = sections::locate_first(
        doc,
        SectionKind::About,
        &[Strategy::Structural, Strategy::Heading],
    )?;
    Some(strip_about_prefix(&dom::clean_text(section.root)))
}

pub fn strip_about_prefix(s: &str) -> String {
    ABOUT_PREFIX_RE.replace(s, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_heading_prefix() {
        assert_eq!(strip_about_prefix("About I build things"), "I build things");
        assert_eq!(strip_about_prefix("ABOUT   me"), "me");
        assert_eq!(strip_about_prefix("Aboutness matters"), "Aboutness matters");
        assert_eq!(strip_about_prefix("About"), "");
    }

    #[test]
    fn structural_then_heading() {
        let doc = Html::parse_document(
            r#"<section class="summary"><h2>About</h2>
                 <p>Heading variant text</p></section>"#,
        );
        assert_eq!(extract(&doc).as_deref(), Some("Heading variant text"));

        let doc = Html::parse_document(
            r#"<section class="x"><h2>About</h2><p>heading</p></section>
               <section class="core About-Section"><h2>About</h2>
                 <p>structural…more
                See less</p></section>"#,
        );
        assert_eq!(extract(&doc).as_deref(), Some("structural"));
    }

    #[test]
    fn absent_vs_empty() {
        let doc = Html::parse_document("<section><h2>Experience</h2></section>");
        assert_eq!(extract(&doc), None);

        let doc = Html::parse_document(r#"<section class="about-section"><h2>About</h2></section>"#);
        assert_eq!(extract(&doc).as_deref(), Some(""));
    }
}
