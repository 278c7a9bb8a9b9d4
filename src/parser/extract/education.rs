use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::parser::dom;
use crate::parser::sections::{self, SectionKind, Strategy};
use crate::record::EducationEntry;

static OL: LazyLock<Selector> = LazyLock::new(|| dom::selector("ol"));

pub fn structural(doc: &Html) -> Vec<EducationEntry> {
    sections::locate(doc, SectionKind::Education, Strategy::Structural)
        .map(|s| from_root(s.root))
        .unwrap_or_default()
}

pub fn by_heading(doc: &Html) -> Vec<EducationEntry> {
    sections::locate(doc, SectionKind::Education, Strategy::Heading)
        .map(|s| from_root(s.root))
        .unwrap_or_default()
}

/// One entry per top-level item of the section's first ordered list.
pub fn from_root(root: ElementRef) -> Vec<EducationEntry> {
    let Some(list) = root.select(&OL).next() else {
        return Vec::new();
    };
    dom::children_named(list, "li")
        .into_iter()
        .filter_map(entry)
        .collect()
}

/// Where an item's school link/content lives, across layout revisions.
#[derive(Debug, Clone, Copy)]
enum ContentContainer {
    EditableLink,
    EditableBlock,
    FlexGrowLink,
    FirstLink,
    FirstChildBlock,
}

impl ContentContainer {
    const ORDER: [ContentContainer; 5] = [
        ContentContainer::EditableLink,
        ContentContainer::EditableBlock,
        ContentContainer::FlexGrowLink,
        ContentContainer::FirstLink,
        ContentContainer::FirstChildBlock,
    ];

    fn find(self, item: ElementRef) -> Option<ElementRef> {
        match self {
            ContentContainer::EditableLink => dom::find_descendant(item, |e| {
                dom::is_tag(e, "a") && dom::class_contains(e, "editable")
            }),
            ContentContainer::EditableBlock => dom::find_descendant(item, |e| {
                dom::is_tag(e, "div") && dom::class_contains(e, "editable")
            }),
            ContentContainer::FlexGrowLink => dom::find_descendant(item, |e| {
                dom::is_tag(e, "a") && dom::class_contains_all(e, &["flex", "grow"])
            }),
            ContentContainer::FirstLink => dom::find_descendant(item, |e| dom::is_tag(e, "a")),
            ContentContainer::FirstChildBlock => dom::first_child_named(item, "div"),
        }
    }
}

fn entry(item: ElementRef) -> Option<EducationEntry> {
    let Some(container) = ContentContainer::ORDER.iter().find_map(|c| c.find(item)) else {
        debug!("education item without content container, skipping");
        return None;
    };

    let school_url = if dom::is_tag(container, "a") {
        dom::attr(container, "href").unwrap_or_default().to_string()
    } else {
        String::new()
    };
    let school_logo = dom::first_image_src(container).unwrap_or_default();

    let content = dom::find_descendant(container, |e| {
        dom::is_tag(e, "div") && dom::class_contains(e, "self-center")
    })
    .or_else(|| dom::first_child_named(container, "div"));
    let Some(content) = content else {
        debug!("education item without content block, skipping");
        return None;
    };

    let lines = dom::children_named(content, "div");
    let school = dom::clean_text_of(lines.first().copied());

    let (degree, field_of_study) = lines
        .get(1)
        .filter(|line| dom::has_class(**line, "body-small"))
        .map(|line| degree_and_field(*line))
        .unwrap_or_default();

    let dates = lines.get(2).map(|line| joined_spans(*line)).unwrap_or_default();

    let description = dom::clean_text_of(dom::find_descendant(content, |e| {
        dom::is_tag(e, "div") && dom::class_contains(e, "description")
    }));

    Some(EducationEntry {
        school,
        school_url,
        school_logo,
        degree,
        field_of_study,
        dates,
        description,
    })
}

/// Degree is the first span; field of study follows the separator span.
fn degree_and_field(line: ElementRef) -> (String, String) {
    let spans = dom::spans(line);
    let degree = dom::clean_text_of(spans.first().copied());
    let field = spans
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, span)| dom::has_class(**span, "dot-separator"))
        .and_then(|(j, _)| spans.get(j + 1).copied());
    (degree, dom::clean_text_of(field))
}

fn joined_spans(line: ElementRef) -> String {
    let joined = dom::spans(line)
        .into_iter()
        .map(dom::raw_text)
        .collect::<Vec<_>>()
        .join(" ");
    crate::parser::text::normalize(&joined)
}
