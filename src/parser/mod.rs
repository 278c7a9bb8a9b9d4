pub mod dom;
pub mod extract;
pub mod sections;
pub mod text;

use scraper::Html;
use tracing::debug;

use crate::config::ExtractConfig;
use crate::error::{ExtractError, Result};
use crate::record::ProfileRecord;

/// Profile extraction engine. Holds only its configuration; every call
/// parses its own document, so one extractor can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ProfileExtractor {
    config: ExtractConfig,
}

impl ProfileExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Pipeline: raw HTML → parsed document → located sections → record.
    ///
    /// Missing sections and fields are absorbed as absence. Errors are
    /// limited to an empty input and markup the parser rejects beyond the
    /// configured tolerance.
    pub fn extract(&self, html: &str) -> Result<ProfileRecord> {
        if html.trim().is_empty() {
            return Err(ExtractError::EmptyDocument);
        }
        let doc = parse_document(html, &self.config)?;
        extract::assemble(&doc, html, &self.config)
    }
}

/// Extract with default settings.
pub fn extract_profile(html: &str) -> Result<ProfileRecord> {
    ProfileExtractor::default().extract(html)
}

fn parse_document(html: &str, config: &ExtractConfig) -> Result<Html> {
    checked(Html::parse_document(html), "document", config)
}

/// Re-parse a section's inner markup on its own.
pub(crate) fn parse_fragment(markup: &str, context: &str, config: &ExtractConfig) -> Result<Html> {
    checked(Html::parse_fragment(markup), context, config)
}

fn checked(parsed: Html, context: &str, config: &ExtractConfig) -> Result<Html> {
    let errors = parsed.errors.len();
    if errors > 0 {
        debug!("{}: {} parse errors", context, errors);
    }
    match config.max_parse_errors {
        Some(tolerance) if errors > tolerance => Err(ExtractError::Malformed {
            context: context.to_string(),
            errors,
            tolerance,
        }),
        _ => Ok(parsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectionFailure;
    use crate::record::Category;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(extract_profile(""), Err(ExtractError::EmptyDocument)));
        assert!(matches!(extract_profile(" \n\t"), Err(ExtractError::EmptyDocument)));
    }

    #[test]
    fn minimal_document_has_only_bio_and_location() {
        let record = extract_profile(&fixture("minimal")).unwrap();
        assert_eq!(record.keys(), vec!["bio", "currentLocation"]);
        assert_eq!(record.bio.as_deref(), Some("Building reliable data systems"));
        assert_eq!(record.current_location.as_deref(), Some("Lisbon, Portugal"));
    }

    #[test]
    fn unrelated_html_yields_empty_record() {
        let record = extract_profile("<html><body><p>hello</p></body></html>").unwrap();
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }

    #[test]
    fn full_profile() {
        let record = extract_profile(&fixture("profile")).unwrap();
        assert_eq!(
            record.keys(),
            vec![
                "avatarURL",
                "bio",
                "about",
                "currentLocation",
                "workExperience",
                "education",
                "skills",
                "recommendations",
                "accomplishments",
                "contacts",
            ]
        );
        assert_eq!(
            record.avatar_url.as_deref(),
            Some("https://media.example.com/profile-displayphoto-shrink_400/jane.jpg")
        );
        assert_eq!(record.about.as_deref(), Some("I build search infrastructure and mentor engineers."));

        assert_eq!(record.work_experience.len(), 3);
        assert_eq!(record.work_experience[0].company_name, "Acme Corp");
        assert_eq!(record.work_experience[0].location, "San Francisco, CA");
        assert!(record.work_experience[1..]
            .iter()
            .all(|e| e.company_name == "Globex"));

        assert_eq!(record.education.len(), 1);
        assert_eq!(record.education[0].field_of_study, "Computer Science");

        assert_eq!(record.skills, vec!["Rust", "Distributed Systems", "R&D"]);
        assert_eq!(record.recommendations[0].recommendation_given_by, "Alex Kim");
        assert_eq!(record.contacts.email.as_deref(), Some("jane@example.com"));
        assert_eq!(record.contacts.twitter, None);

        assert!(record.accomplishments.get("Test Scores").is_none());
        assert_eq!(
            record.accomplishments.get("Languages"),
            Some(&Category::Languages("English, German".into()))
        );
    }

    #[test]
    fn heading_only_layout_matches_primary() {
        let primary = extract_profile(&fixture("profile")).unwrap();
        let variant = extract_profile(&fixture("profile_headings")).unwrap();
        assert_eq!(variant.work_experience, primary.work_experience);
        assert_eq!(variant.education, primary.education);
        assert_eq!(variant.skills, primary.skills);
        assert_eq!(variant.contacts, primary.contacts);
        assert_eq!(variant.about, primary.about);
    }

    #[test]
    fn missing_skills_section_omits_key() {
        let html = fixture("profile").replace("skills-container", "x").replace("<h2>Skills</h2>", "<h2>Interests</h2>");
        let record = extract_profile(&html).unwrap();
        assert!(record.skills.is_empty());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("skills").is_none());
        assert!(json.get("workExperience").is_some());
    }

    #[test]
    fn parse_error_tolerance() {
        let html = "<html><body><section class=\"basic-profile-section\"></div></div></section></body></html>";
        let strict = ProfileExtractor::new(ExtractConfig {
            section_failure: SectionFailure::Abort,
            max_parse_errors: Some(0),
        });
        assert!(matches!(strict.extract(html), Err(ExtractError::Malformed { .. })));
        assert!(extract_profile(html).is_ok());
    }
}
