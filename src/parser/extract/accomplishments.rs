use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::parser::dom;
use crate::parser::sections::{self, SectionKind, Strategy};
use crate::parser::text;
use crate::record::{
    Accomplishments, Category, Certification, Course, Honor, Organization, Project, Publication,
};

static SCOPE: LazyLock<Selector> = LazyLock::new(|| dom::selector("div#accomplishment-section"));
static TYPE_BLOCK: LazyLock<Selector> = LazyLock::new(|| dom::selector("div.accomplishment-type"));
static TYPE_HEADING: LazyLock<Selector> = LazyLock::new(|| dom::selector("h3"));
static LIST: LazyLock<Selector> = LazyLock::new(|| dom::selector("ul"));
static ITEM: LazyLock<Selector> = LazyLock::new(|| dom::selector("li.sub-list-item"));
static ITEM_HEADING: LazyLock<Selector> = LazyLock::new(|| dom::selector("div.list-item-heading"));
static DETAIL: LazyLock<Selector> = LazyLock::new(|| dom::selector("div.body-small"));
static DIRECTIONAL_SPAN: LazyLock<Selector> = LazyLock::new(|| dom::selector(r#"span[dir="ltr"]"#));
static DATE_SPAN: LazyLock<Selector> = LazyLock::new(|| dom::selector("span.date"));

/// Recognized category headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    TestScores,
    Languages,
    Courses,
    Honors,
    Projects,
    Certifications,
    Publications,
    Organizations,
    Other,
}

impl CategoryKind {
    pub fn from_heading(heading: &str) -> Self {
        match heading {
            "Test Scores" => CategoryKind::TestScores,
            "Languages" => CategoryKind::Languages,
            "Courses" => CategoryKind::Courses,
            "Honors" => CategoryKind::Honors,
            "Projects" => CategoryKind::Projects,
            "Certifications" => CategoryKind::Certifications,
            "Publications" => CategoryKind::Publications,
            "Organizations" => CategoryKind::Organizations,
            _ => CategoryKind::Other,
        }
    }
}

pub fn extract(doc: &Html) -> Accomplishments {
    sections::locate_first(
        doc,
        SectionKind::Accomplishments,
        &[Strategy::Structural, Strategy::Heading],
    )
    .map(|s| from_root(s.root))
    .unwrap_or_default()
}

pub fn from_root(root: ElementRef) -> Accomplishments {
    let scope = root.select(&SCOPE).next().unwrap_or(root);
    let mut out = Accomplishments::default();

    for block in scope.select(&TYPE_BLOCK) {
        let name = dom::clean_text_of(block.select(&TYPE_HEADING).next());
        if name.is_empty() {
            continue;
        }
        let kind = CategoryKind::from_heading(&name);
        if kind == CategoryKind::TestScores {
            debug!("skipping test scores");
            continue;
        }
        let items = block
            .select(&LIST)
            .next()
            .map(|list| list.select(&ITEM).collect::<Vec<_>>())
            .unwrap_or_default();
        out.insert(name, category(kind, &items));
    }

    out
}

fn category(kind: CategoryKind, items: &[ElementRef]) -> Category {
    match kind {
        CategoryKind::Languages => Category::Languages(
            items
                .iter()
                .map(|item| item_name(*item))
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        CategoryKind::Courses => Category::Courses(items.iter().map(|i| course(*i)).collect()),
        CategoryKind::Honors => Category::Honors(items.iter().map(|i| honor(*i)).collect()),
        CategoryKind::Projects => Category::Projects(items.iter().map(|i| project(*i)).collect()),
        CategoryKind::Certifications => {
            Category::Certifications(items.iter().map(|i| certification(*i)).collect())
        }
        CategoryKind::Publications => {
            Category::Publications(items.iter().map(|i| publication(*i)).collect())
        }
        CategoryKind::Organizations => Category::Organizations(
            items
                .iter()
                .map(|i| Organization {
                    name: item_name(*i),
                    date: generic_detail(*i),
                })
                .collect(),
        ),
        // TestScores never reaches here
        CategoryKind::Other | CategoryKind::TestScores => Category::Other(
            items
                .iter()
                .map(|i| Honor {
                    accomplishment: item_name(*i),
                    accomplishment_from: generic_detail(*i),
                    accomplishment_date: String::new(),
                })
                .collect(),
        ),
    }
}

fn item_name(item: ElementRef) -> String {
    dom::clean_text_of(item.select(&ITEM_HEADING).next())
}

fn details(item: ElementRef) -> Vec<ElementRef> {
    item.select(&DETAIL).collect()
}

fn course(item: ElementRef) -> Course {
    let details = details(item);
    Course {
        course_name: item_name(item),
        course_number: dom::clean_text_of(details.first().copied()),
        associated_with: if details.len() > 1 {
            dom::clean_text_of(details.last().copied())
        } else {
            String::new()
        },
    }
}

fn honor(item: ElementRef) -> Honor {
    let detail = item.select(&DETAIL).next();
    Honor {
        accomplishment: item_name(item),
        accomplishment_from: dom::clean_text_of(detail.and_then(|d| d.select(&DIRECTIONAL_SPAN).next())),
        accomplishment_date: dom::clean_text_of(detail.and_then(|d| d.select(&DATE_SPAN).next())),
    }
}

fn project(item: ElementRef) -> Project {
    let details = details(item);
    Project {
        project_name: item_name(item),
        date: dom::clean_text_of(details.last().copied()),
        project_description: if details.len() > 1 {
            dom::clean_text_of(details.first().copied())
        } else {
            String::new()
        },
    }
}

fn certification(item: ElementRef) -> Certification {
    let details = details(item);
    Certification {
        certificate_name: item_name(item),
        certificate_from: dom::clean_text_of(details.first().copied()),
        date: if details.len() > 1 {
            dom::clean_text_of(details.last().copied())
        } else {
            String::new()
        },
    }
}

fn publication(item: ElementRef) -> Publication {
    let spans = item
        .select(&DETAIL)
        .next()
        .map(dom::spans)
        .unwrap_or_default();
    Publication {
        topic: item_name(item),
        publication: dom::clean_text_of(spans.first().copied()),
        date: dom::clean_text_of(spans.get(2).copied()),
    }
}

/// Every span of the first detail line except separators, joined.
fn generic_detail(item: ElementRef) -> String {
    let Some(detail) = item.select(&DETAIL).next() else {
        return String::new();
    };
    let joined = dom::spans(detail)
        .into_iter()
        .filter(|span| !dom::is_separator(*span))
        .map(|span| dom::raw_text(span).trim().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    text::normalize(&joined)
}
