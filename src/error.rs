use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("{context}: parser reported {errors} errors (tolerance {tolerance})")]
    Malformed {
        context: String,
        errors: usize,
        tolerance: usize,
    },
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
