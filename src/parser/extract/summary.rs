use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

use crate::parser::dom;
use crate::parser::text;

static BASIC_PROFILE: LazyLock<Selector> =
    LazyLock::new(|| dom::selector("section.basic-profile-section"));
static PICTURE_CONTAINER_IMG: LazyLock<Selector> =
    LazyLock::new(|| dom::selector("figure#profile-picture-container img"));
static PROFILE_IMG: LazyLock<Selector> = LazyLock::new(|| dom::selector("img"));
static SEPARATOR: LazyLock<Selector> = LazyLock::new(|| dom::selector("span.dot-separator"));

const PHOTO_PATH_FRAGMENTS: &[&str] = &["profile-displayphoto", "profile-photo"];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

pub fn extract(doc: &Html) -> Summary {
    Summary {
        avatar_url: avatar(doc),
        bio: bio(doc),
        location: location(doc),
    }
}

/// Where the avatar image may live, tried in order.
#[derive(Debug, Clone, Copy)]
enum AvatarSource {
    PictureContainer,
    PhotoCdnPath,
}

impl AvatarSource {
    const ORDER: [AvatarSource; 2] = [AvatarSource::PictureContainer, AvatarSource::PhotoCdnPath];

    fn find(self, profile: ElementRef) -> Option<String> {
        let src = match self {
            AvatarSource::PictureContainer => profile
                .select(&PICTURE_CONTAINER_IMG)
                .filter_map(|img| dom::attr(img, "src"))
                .find(|src| !src.is_empty()),
            AvatarSource::PhotoCdnPath => profile
                .select(&PROFILE_IMG)
                .filter_map(|img| dom::attr(img, "src"))
                .find(|src| PHOTO_PATH_FRAGMENTS.iter().any(|f| src.contains(f))),
        };
        src.map(str::to_string)
    }
}

pub fn avatar(doc: &Html) -> Option<String> {
    let profile = doc.select(&BASIC_PROFILE).next()?;
    let found = AvatarSource::ORDER.iter().find_map(|source| source.find(profile));
    if found.is_none() {
        tracing::debug!("no profile image in basic profile section");
    }
    found
}

/// The identity block of the basic profile: its lines are the direct `div`
/// children of the third top-level `div`.
struct IdentityLines<'a> {
    lines: Vec<ElementRef<'a>>,
}

impl<'a> IdentityLines<'a> {
    fn locate(doc: &'a Html) -> Option<Self> {
        let profile = doc.select(&BASIC_PROFILE).next()?;
        let identity = *dom::children_named(profile, "div").get(2)?;
        Some(IdentityLines {
            lines: dom::children_named(identity, "div"),
        })
    }

    /// Second line. Needs three lines: with two, the second is already the
    /// headline read by [`Self::headline`].
    fn bio(&self) -> Option<ElementRef<'a>> {
        if self.lines.len() >= 3 {
            self.lines.get(1).copied()
        } else {
            None
        }
    }

    /// Fourth line, or the last one on shorter layouts.
    fn headline(&self) -> Option<ElementRef<'a>> {
        self.lines.get(3).or(self.lines.last()).copied()
    }
}

pub fn bio(doc: &Html) -> Option<String> {
    let lines = IdentityLines::locate(doc)?;
    Some(dom::clean_text_of(lines.bio()))
}

pub fn location(doc: &Html) -> Option<String> {
    let headline = IdentityLines::locate(doc)?.headline()?;
    let raw = text_before_separator(headline).unwrap_or_else(|| dom::raw_text(headline));
    Some(text::normalize(&raw))
}

/// Text preceding the separator marker, ignoring nested spans (follower
/// counters and the like). `None` if the line has no marker.
fn text_before_separator(line: ElementRef) -> Option<String> {
    let marker = line.select(&SEPARATOR).next()?;
    let mut out = String::new();
    for child in line.children() {
        if child.id() == marker.id() {
            break;
        }
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if e.name() != "span" => {
                if let Some(el) = ElementRef::wrap(child) {
                    out.extend(el.text());
                }
            }
            _ => {}
        }
    }
    Some(out)
}
