use thiserror::Error;

/// Errors produced by model constructors and parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid year range '{0}': expected START-END or START-")]
    InvalidYearRange(String),

    #[error("year range {start}-{end} ends before it starts")]
    InvertedYearRange { start: u16, end: u16 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
