//! Structured profile extraction from rendered profile-page HTML.
//!
//! ```no_run
//! let html = std::fs::read_to_string("profile.html").unwrap();
//! let record = profile_scraper::extract_profile(&html).unwrap();
//! println!("{}", serde_json::to_string_pretty(&record).unwrap());
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod parser;
pub mod record;

pub use config::{ExtractConfig, SectionFailure};
pub use error::ExtractError;
pub use parser::{extract_profile, ProfileExtractor};
pub use record::ProfileRecord;
