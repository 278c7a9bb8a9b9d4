//! Work history.
//!
//! Each top-level item of an experience list is one company grouping. A
//! grouping whose role list holds a single item is read as one entry with
//! its own company details; otherwise the company identity is read once from
//! the grouping and shared by every role beneath it.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::parser::sections::{self, SectionKind, Strategy};
use crate::parser::{dom, parse_fragment, text};
use crate::record::ExperienceEntry;

static OL: LazyLock<Selector> = LazyLock::new(|| dom::selector("ol"));
static UL: LazyLock<Selector> = LazyLock::new(|| dom::selector("ul"));
static DIV: LazyLock<Selector> = LazyLock::new(|| dom::selector("div"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| dom::selector("span"));
static DIRECTIONAL_SPAN: LazyLock<Selector> = LazyLock::new(|| dom::selector(r#"span[dir="ltr"]"#));

/// Longest fragment, in words, still read as a location.
pub const MAX_LOCATION_WORDS: usize = 6;

pub fn looks_like_location(fragment: &str) -> bool {
    text::word_count(fragment) <= MAX_LOCATION_WORDS
}

/// Entries from every experience container in the raw markup, each re-parsed
/// on its own.
pub fn structural(html: &str, config: &ExtractConfig) -> Result<Vec<ExperienceEntry>> {
    let mut entries = Vec::new();
    for markup in sections::raw_containers(html, SectionKind::Experience) {
        let fragment = parse_fragment(markup, "experience container", config)?;
        entries.extend(from_root(fragment.root_element()));
    }
    Ok(entries)
}

pub fn by_heading(doc: &Html) -> Vec<ExperienceEntry> {
    sections::locate(doc, SectionKind::Experience, Strategy::Heading)
        .map(|s| from_root(s.root))
        .unwrap_or_default()
}

pub fn from_root(root: ElementRef) -> Vec<ExperienceEntry> {
    root.select(&OL)
        .flat_map(|list| dom::children_named(list, "li"))
        .flat_map(company_entries)
        .filter(|entry| !entry.is_blank())
        .collect()
}

fn company_entries(item: ElementRef) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut identity: Option<CompanyIdentity> = None;

    for roles in item.select(&UL) {
        let role_items = dom::children_named(roles, "li");
        if role_items.len() == 1 {
            entries.extend(single_role(roles, role_items[0]));
            continue;
        }
        let identity = identity.get_or_insert_with(|| CompanyIdentity::from_item(item));
        entries.extend(role_items.into_iter().filter_map(|role| multi_role(role, identity)));
    }

    entries
}

/// Company details shared by all roles of a multi-role grouping.
#[derive(Debug, Clone, Default)]
struct CompanyIdentity {
    url: String,
    logo: String,
    name: String,
}

impl CompanyIdentity {
    fn from_item(item: ElementRef) -> Self {
        match dom::first_child_named(item, "a") {
            Some(link) => CompanyIdentity {
                url: dom::href_without_query(link),
                logo: dom::first_image_src(link).unwrap_or_default(),
                name: first_named_span(link),
            },
            None => CompanyIdentity {
                name: dom::clean_text_of(
                    dom::first_child_named(item, "div").and_then(|d| d.select(&SPAN).next()),
                ),
                ..Default::default()
            },
        }
    }
}

/// Walk down through nested spans until one has visible text.
fn first_named_span(el: ElementRef) -> String {
    let mut current = el;
    while let Some(span) = current.select(&SPAN).next() {
        let name = dom::clean_text(span);
        if !name.is_empty() {
            return name;
        }
        current = span;
    }
    String::new()
}

/// Ways a role line encodes its date range.
#[derive(Debug, Clone, Copy)]
enum DurationSource {
    /// `body-small` line of exactly four spans, the third a decorative
    /// separator; the first two spans are the range.
    DateRangeSpans,
    /// Second block of the role; every span but the trailing tenure.
    SecondBlockSpans,
}

impl DurationSource {
    const SINGLE_ROLE: [DurationSource; 1] = [DurationSource::DateRangeSpans];
    const MULTI_ROLE: [DurationSource; 2] =
        [DurationSource::DateRangeSpans, DurationSource::SecondBlockSpans];

    fn read(self, body: ElementRef, blocks: &[ElementRef]) -> Option<String> {
        let duration = match self {
            DurationSource::DateRangeSpans => body
                .select(&DIV)
                .filter(|d| dom::has_class(*d, "body-small"))
                .map(dom::spans)
                .find(|spans| spans.len() == 4 && is_decorative_separator(spans[2]))
                .map(|spans| join_spans(&spans[..2])),
            DurationSource::SecondBlockSpans => blocks.get(1).map(|block| {
                let spans = dom::spans(*block);
                let keep = spans.len().saturating_sub(1);
                join_spans(&spans[..keep])
            }),
        };
        duration.filter(|d| !d.is_empty())
    }

    fn first_match(order: &[DurationSource], body: ElementRef, blocks: &[ElementRef]) -> String {
        order
            .iter()
            .find_map(|source| source.read(body, blocks))
            .unwrap_or_default()
    }
}

fn is_decorative_separator(span: ElementRef) -> bool {
    let classes: Vec<&str> = span.value().classes().collect();
    classes == ["dot-separator"] && dom::attr(span, "aria-hidden") == Some("true")
}

fn join_spans(spans: &[ElementRef]) -> String {
    let joined = spans
        .iter()
        .map(|s| dom::raw_text(*s))
        .collect::<Vec<_>>()
        .join(" ");
    text::normalize(&joined)
}

fn title(body: ElementRef, blocks: &[ElementRef]) -> String {
    let heading = dom::find_descendant(body, |e| {
        dom::is_tag(e, "div") && dom::has_class(e, "body-medium-bold")
    })
    .or_else(|| {
        dom::find_descendant(body, |e| {
            dom::is_tag(e, "div") && dom::has_class(e, "list-item-heading")
        })
    })
    .or_else(|| blocks.first().copied());
    dom::clean_text_of(heading)
}

fn single_role(roles: ElementRef, role: ElementRef) -> Option<ExperienceEntry> {
    let link = dom::first_child_named(role, "a");
    let (company_url, body) = match link {
        Some(link) => (dom::href_without_query(link), roles.select(&DIV).next()),
        None => (String::new(), dom::first_child_named(role, "div")),
    };
    let Some(body) = body else {
        debug!("single-role item without content block, skipping");
        return None;
    };

    let blocks = dom::children_named(body, "div");
    let company_block = if blocks.len() > 1 && !company_url.is_empty() {
        blocks.get(1)
    } else {
        blocks.get(2)
    };
    let mut company_name = dom::clean_text_of(company_block.copied());
    if company_name.is_empty() {
        company_name = dom::clean_text_of(
            dom::find_descendant(body, |e| dom::is_tag(e, "div") && dom::has_class(e, "body-small"))
                .and_then(|d| d.select(&DIRECTIONAL_SPAN).next()),
        );
    }

    let leftovers = leftovers(blocks.get(3..).unwrap_or_default());
    let (location, mut description) = classify_leftovers(&leftovers);
    if description.is_empty() {
        description = dom::clean_text_of(dom::find_descendant(body, |e| {
            dom::is_tag(e, "div") && dom::has_class(e, "description")
        }));
    }

    Some(ExperienceEntry {
        company_url,
        company_logo: link.and_then(dom::first_image_src).unwrap_or_default(),
        title: title(body, &blocks),
        company_name,
        duration: DurationSource::first_match(&DurationSource::SINGLE_ROLE, body, &blocks),
        location,
        description,
    })
}

fn multi_role(role: ElementRef, company: &CompanyIdentity) -> Option<ExperienceEntry> {
    let divs = dom::children_named(role, "div");
    let body = if divs.len() > 1 {
        Some(divs[1])
    } else {
        dom::child_elements(role).last()
    };
    let Some(body) = body else {
        debug!("role item without content block, skipping");
        return None;
    };

    let blocks = dom::children_named(body, "div");
    let leftovers = leftovers(blocks.get(2..).unwrap_or_default());
    let (location, description) = classify_leftovers(&leftovers);

    Some(ExperienceEntry {
        company_url: company.url.clone(),
        company_logo: company.logo.clone(),
        title: title(body, &blocks),
        company_name: company.name.clone(),
        duration: DurationSource::first_match(&DurationSource::MULTI_ROLE, body, &blocks),
        location,
        description,
    })
}

/// A trailing block that is either a location or a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leftover {
    pub text: String,
    /// Some nested element carries a "description" class.
    pub marks_description: bool,
}

fn leftovers(blocks: &[ElementRef]) -> Vec<Leftover> {
    blocks
        .iter()
        .map(|block| Leftover {
            text: dom::clean_text(*block),
            marks_description: dom::find_descendant(*block, |e| {
                dom::class_contains_ignore_case(e, "description")
            })
            .is_some(),
        })
        .collect()
}

/// Split trailing blocks into `(location, description)`. Only the first two
/// blocks are considered.
pub fn classify_leftovers(leftovers: &[Leftover]) -> (String, String) {
    match leftovers {
        [] => (String::new(), String::new()),
        [only] if only.marks_description => (String::new(), only.text.clone()),
        [only] => (only.text.clone(), String::new()),
        [first, second, ..] if looks_like_location(&first.text) => {
            (first.text.clone(), second.text.clone())
        }
        [first, second, ..] => {
            let location = if looks_like_location(&second.text) {
                second.text.clone()
            } else {
                String::new()
            };
            (location, first.text.clone())
        }
    }
}
