pub mod about;
pub mod accomplishments;
pub mod contacts;
pub mod education;
pub mod experience;
pub mod recommendations;
pub mod skills;
pub mod summary;

use scraper::Html;
use tracing::{debug, info, warn};

use super::sections::SectionKind;
use crate::config::{ExtractConfig, SectionFailure};
use crate::error::Result;
use crate::record::{Contacts, ProfileRecord};

/// Whether an extractor recovered anything.
trait Recovered {
    fn is_empty(&self) -> bool;
}

impl<T> Recovered for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl Recovered for Contacts {
    fn is_empty(&self) -> bool {
        Contacts::is_empty(self)
    }
}

/// Run every extractor against one document and keep what was found.
pub fn assemble(doc: &Html, html: &str, config: &ExtractConfig) -> Result<ProfileRecord> {
    let summary = summary::extract(doc);
    let about = about::extract(doc);

    let work_experience = section(
        SectionKind::Experience,
        config,
        experience::structural(html, config),
        || experience::by_heading(doc),
    )?;
    let education = section(
        SectionKind::Education,
        config,
        Ok(education::structural(doc)),
        || education::by_heading(doc),
    )?;
    let contacts = section(
        SectionKind::Contacts,
        config,
        Ok(contacts::structural(html)),
        || contacts::by_heading(doc),
    )?;
    let skills = section(
        SectionKind::Skills,
        config,
        skills::structural(html, config),
        || skills::by_heading(doc),
    )?;
    let recommendations = recommendations::extract(doc);
    let accomplishments = accomplishments::extract(doc);

    info!(
        "Extracted {} roles, {} schools, {} skills, {} recommendations, {} accomplishment categories",
        work_experience.len(),
        education.len(),
        skills.len(),
        recommendations.len(),
        accomplishments.len(),
    );

    Ok(ProfileRecord {
        avatar_url: non_empty(summary.avatar_url),
        bio: non_empty(summary.bio),
        about: non_empty(about),
        current_location: non_empty(summary.location),
        work_experience,
        education,
        skills,
        recommendations,
        accomplishments,
        contacts,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Structural result first; the heading match runs only when it is empty.
/// A structural error follows the configured failure policy.
fn section<T, F>(
    kind: SectionKind,
    config: &ExtractConfig,
    structural: Result<T>,
    heading: F,
) -> Result<T>
where
    T: Recovered + Default,
    F: FnOnce() -> T,
{
    let found = match structural {
        Ok(found) => found,
        Err(e) if config.section_failure == SectionFailure::Abort => return Err(e),
        Err(e) => {
            warn!("Skipping {} section: {}", kind.label(), e);
            return Ok(T::default());
        }
    };
    if !found.is_empty() {
        return Ok(found);
    }
    debug!("No {} container, trying heading match", kind.label());
    Ok(heading())
}

// ── Tests ──
