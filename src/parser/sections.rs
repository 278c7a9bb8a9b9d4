use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::dom;

static SECTION: LazyLock<Selector> = LazyLock::new(|| dom::selector("section"));
static SECTION_HEADING: LazyLock<Selector> = LazyLock::new(|| dom::selector("h2, h3"));

static EXPERIENCE_MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| container_re("experience-container"));
static SKILLS_MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| container_re("skills-container"));
static CONTACTS_MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| container_re("contacts-container"));

static HEADING_RES: LazyLock<Vec<(SectionKind, Regex)>> = LazyLock::new(|| {
    SectionKind::ALL
        .iter()
        .map(|kind| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kind.heading()))).unwrap();
            (*kind, re)
        })
        .collect()
});

fn container_re(token: &str) -> Regex {
    Regex::new(&format!(
        r#"(?s)<section\s[^>]*?class="[^"]*{}[^"]*"[^>]*>(.*?)</section>"#,
        regex::escape(token)
    ))
    .unwrap()
}

/// Logical profile categories a page section can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    About,
    Experience,
    Education,
    Contacts,
    Skills,
    Recommendations,
    Accomplishments,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::About,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Contacts,
        SectionKind::Skills,
        SectionKind::Recommendations,
        SectionKind::Accomplishments,
    ];

    /// Visible heading text, matched as a whole word.
    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::About => "About",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Contacts => "Contact",
            SectionKind::Skills => "Skills",
            SectionKind::Recommendations => "Recommendations",
            SectionKind::Accomplishments => "Accomplishments",
        }
    }

    /// Class token identifying the section's container in the primary layout.
    pub fn container_token(self) -> Option<&'static str> {
        match self {
            SectionKind::About => Some("about-section"),
            SectionKind::Experience => Some("experience-container"),
            SectionKind::Education => Some("education-container"),
            SectionKind::Contacts => Some("contacts-container"),
            SectionKind::Skills => Some("skills-container"),
            SectionKind::Recommendations | SectionKind::Accomplishments => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::About => "about",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Contacts => "contacts",
            SectionKind::Skills => "skills",
            SectionKind::Recommendations => "recommendations",
            SectionKind::Accomplishments => "accomplishments",
        }
    }
}

/// How a section was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Container class token.
    Structural,
    /// `h2`/`h3` heading text inside a generic `section`.
    Heading,
}

#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub strategy: Strategy,
    pub root: ElementRef<'a>,
}

/// Locate the first section of `kind` using one strategy.
pub fn locate<'a>(doc: &'a Html, kind: SectionKind, strategy: Strategy) -> Option<Section<'a>> {
    let root = match strategy {
        Strategy::Structural => by_container(doc, kind)?,
        Strategy::Heading => by_heading(doc, kind)?,
    };
    Some(Section { kind, strategy, root })
}

/// Try each strategy in order; first hit wins.
pub fn locate_first<'a>(
    doc: &'a Html,
    kind: SectionKind,
    strategies: &[Strategy],
) -> Option<Section<'a>> {
    let found = strategies
        .iter()
        .find_map(|strategy| locate(doc, kind, *strategy));
    if let Some(section) = &found {
        debug!("{} section found by {:?} match", section.kind.label(), section.strategy);
    }
    found
}

fn by_container<'a>(doc: &'a Html, kind: SectionKind) -> Option<ElementRef<'a>> {
    let token = kind.container_token()?;
    doc.select(&SECTION).find(|section| match kind {
        SectionKind::About => dom::class_contains_ignore_case(*section, token),
        _ => dom::class_contains(*section, token),
    })
}

fn by_heading<'a>(doc: &'a Html, kind: SectionKind) -> Option<ElementRef<'a>> {
    let re = HEADING_RES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, re)| re)?;

    doc.select(&SECTION).find(|section| {
        section
            .select(&SECTION_HEADING)
            .next()
            .map(heading_text)
            .is_some_and(|text| re.is_match(&text))
    })
}

fn heading_text(heading: ElementRef) -> String {
    heading
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inner markup of every container section for `kind`, matched on the raw
/// document text. Case-sensitive on the class token. Kinds that are only ever
/// located on the parsed tree yield nothing here.
pub fn raw_containers(html: &str, kind: SectionKind) -> Vec<&str> {
    let re: &Regex = match kind {
        SectionKind::Experience => &*EXPERIENCE_MARKUP_RE,
        SectionKind::Skills => &*SKILLS_MARKUP_RE,
        SectionKind::Contacts => &*CONTACTS_MARKUP_RE,
        _ => return Vec::new(),
    };
    re.captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <section class="core-section about-Section"><h2>About</h2><p>Hello</p></section>
          <section class="generic"><div><h3>Work Experience</h3></div><ol><li>x</li></ol></section>
          <section class="generic"><h2>Experience</h2><p>second match ignored</p></section>
          <section class="generic"><h2>Contact info</h2></section>
          <section class="generic"><h2>Skillset</h2></section>
          <section class="pv-profile experience-container"><ol><li>a</li></ol></section>
          <section class="pv-profile experience-container"><ol><li>b</li></ol></section>
        </body></html>"#;

    #[test]
    fn structural_about_is_case_insensitive() {
        let doc = Html::parse_document(PAGE);
        let s = locate(&doc, SectionKind::About, Strategy::Structural).unwrap();
        assert_eq!(s.strategy, Strategy::Structural);
        assert!(dom::raw_text(s.root).contains("Hello"));
    }

    #[test]
    fn heading_match_first_wins() {
        let doc = Html::parse_document(PAGE);
        let s = locate(&doc, SectionKind::Experience, Strategy::Heading).unwrap();
        assert!(dom::raw_text(s.root).contains("Work Experience"));
        assert!(!dom::raw_text(s.root).contains("second match"));
    }

    #[test]
    fn heading_match_is_whole_word() {
        let doc = Html::parse_document(PAGE);
        assert!(locate(&doc, SectionKind::Contacts, Strategy::Heading).is_some());
        assert!(locate(&doc, SectionKind::Skills, Strategy::Heading).is_none());
    }

    #[test]
    fn no_container_token_means_no_structural_match() {
        let doc = Html::parse_document(PAGE);
        assert!(locate(&doc, SectionKind::Recommendations, Strategy::Structural).is_none());
        assert!(locate_first(
            &doc,
            SectionKind::Recommendations,
            &[Strategy::Structural, Strategy::Heading]
        )
        .is_none());
    }

    #[test]
    fn first_strategy_hit_is_reported() {
        let doc = Html::parse_document(PAGE);
        let s = locate_first(&doc, SectionKind::About, &[Strategy::Heading, Strategy::Structural]).unwrap();
        assert_eq!(s.kind, SectionKind::About);
        assert_eq!(s.strategy, Strategy::Heading);
        let s = locate_first(&doc, SectionKind::Experience, &[Strategy::Structural, Strategy::Heading]).unwrap();
        assert_eq!(s.kind, SectionKind::Experience);
        assert_eq!(s.strategy, Strategy::Structural);
    }

    #[test]
    fn raw_containers_collects_every_fragment() {
        let fragments = raw_containers(PAGE, SectionKind::Experience);
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].contains("<li>a</li>"));
        assert!(fragments[1].contains("<li>b</li>"));
        assert!(raw_containers(PAGE, SectionKind::Skills).is_empty());
        assert!(raw_containers(PAGE, SectionKind::Education).is_empty());
    }

    #[test]
    fn raw_containers_case_sensitive() {
        let html = r#"<section class="Experience-Container"><ol></ol></section>"#;
        assert!(raw_containers(html, SectionKind::Experience).is_empty());
    }
}
