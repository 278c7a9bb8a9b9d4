use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::parser::sections::{self, SectionKind, Strategy};
use crate::parser::{dom, parse_fragment, text};

static SKILLS_LIST: LazyLock<Selector> = LazyLock::new(|| dom::selector(r#"ol[class*="skills-list"]"#));
static SKILL_ITEM: LazyLock<Selector> = LazyLock::new(|| dom::selector(r#"li[class*="skill-item"]"#));

/// Skills from the first skills container in the raw markup.
pub fn structural(html: &str, config: &ExtractConfig) -> Result<Vec<String>> {
    let Some(markup) = sections::raw_containers(html, SectionKind::Skills).into_iter().next() else {
        return Ok(Vec::new());
    };
    let fragment = parse_fragment(markup, "skills container", config)?;
    Ok(from_root(fragment.root_element()))
}

pub fn by_heading(doc: &Html) -> Vec<String> {
    sections::locate(doc, SectionKind::Skills, Strategy::Heading)
        .map(|s| from_root(s.root))
        .unwrap_or_default()
}

pub fn from_root(root: ElementRef) -> Vec<String> {
    let Some(list) = root.select(&SKILLS_LIST).next() else {
        return Vec::new();
    };
    list.select(&SKILL_ITEM)
        .map(|item| text::normalize(&text::markup_to_text(&item.inner_html())))
        .collect()
}
