use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::parser::sections::{self, SectionKind, Strategy};
use crate::parser::text;
use crate::record::Contacts;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Email\s+([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})").unwrap()
});
static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"LinkedIn\s+(https?://(?:www\.)?linkedin\.com/in/[a-zA-Z0-9-]+)").unwrap()
});
static TWITTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Twitter\s+(https?://(?:www\.)?twitter\.com/[a-zA-Z0-9_]+)").unwrap()
});
static WEBSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Website\s+(https?://(?:www\.)?[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})").unwrap()
});

/// Contacts from the first contacts container in the raw markup.
pub fn structural(html: &str) -> Contacts {
    sections::raw_containers(html, SectionKind::Contacts)
        .into_iter()
        .next()
        .map(from_markup)
        .unwrap_or_default()
}

pub fn by_heading(doc: &Html) -> Contacts {
    sections::locate(doc, SectionKind::Contacts, Strategy::Heading)
        .map(|s| from_markup(&s.root.html()))
        .unwrap_or_default()
}

pub fn from_markup(markup: &str) -> Contacts {
    parse(&text::normalize(&text::markup_to_text(markup)))
}

/// Label-prefixed channels in flattened section text.
pub fn parse(text: &str) -> Contacts {
    Contacts {
        email: first_capture(&EMAIL_RE, text),
        linkedin: first_capture(&LINKEDIN_RE, text),
        twitter: first_capture(&TWITTER_RE, text),
        website: first_capture(&WEBSITE_RE, text),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labelled_channels() {
        let c = parse(
            "Contact Email jane.doe+work@example.co.uk LinkedIn https://www.linkedin.com/in/jane-doe Website https://janedoe.dev/blog",
        );
        assert_eq!(c.email.as_deref(), Some("jane.doe+work@example.co.uk"));
        assert_eq!(c.linkedin.as_deref(), Some("https://www.linkedin.com/in/jane-doe"));
        assert_eq!(c.website.as_deref(), Some("https://janedoe.dev"));
        assert_eq!(c.twitter, None);
    }

    #[test]
    fn structural_container() {
        let html = r#"<section class="pv-contact contacts-container">
            <h2>Contact</h2>
            <div><span>Email</span>
                 <a href="mailto:jane@example.com">jane@example.com</a></div>
            <div><span>Twitter</span> <a>https://twitter.com/jane_d</a></div>
          </section>"#;
        let c = structural(html);
        assert_eq!(c.email.as_deref(), Some("jane@example.com"));
        assert_eq!(c.twitter.as_deref(), Some("https://twitter.com/jane_d"));
    }

    #[test]
    fn heading_fallback_and_empty() {
        let doc = Html::parse_document(
            r#"<section><h3>Contact info</h3><p>Email <b>a@b.io</b></p></section>"#,
        );
        assert_eq!(by_heading(&doc).email.as_deref(), Some("a@b.io"));

        let doc = Html::parse_document("<section><h3>Contact</h3><p>nothing here</p></section>");
        assert!(by_heading(&doc).is_empty());
        assert!(structural("<p>no section</p>").is_empty());
    }
}
