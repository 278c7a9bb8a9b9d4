use serde::Deserialize;

/// What to do when one section fails with a structural error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SectionFailure {
    /// Log, omit the section, keep going.
    #[default]
    Skip,
    /// Fail the whole extraction.
    Abort,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub section_failure: SectionFailure,
    /// Parser errors tolerated per document or re-parsed fragment. Unlimited when unset.
    pub max_parse_errors: Option<usize>,
}

impl ExtractConfig {
    /// Load from `PROFILE_*` environment variables, e.g.
    /// `PROFILE_SECTION_FAILURE=abort`, `PROFILE_MAX_PARSE_ERRORS=500`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("PROFILE").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_skip_and_unlimited() {
        let cfg = ExtractConfig::default();
        assert_eq!(cfg.section_failure, SectionFailure::Skip);
        assert!(cfg.max_parse_errors.is_none());
    }

    #[test]
    fn deserializes_from_map() {
        let cfg: ExtractConfig = config::Config::builder()
            .set_override("section_failure", "abort")
            .unwrap()
            .set_override("max_parse_errors", 25)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.section_failure, SectionFailure::Abort);
        assert_eq!(cfg.max_parse_errors, Some(25));
    }
}
