use partfinder_model::FacetLevel;
use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by a [`FacetCatalog`](crate::catalog::FacetCatalog).
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

impl CatalogError {
    /// HTTP status of the failed response, if the catalog answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CatalogError::Status { status, .. } => Some(*status),
            CatalogError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Failures of a [`SearchSession`](crate::session::SearchSession) operation.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("No {level} option '{key}' is currently offered")]
    UnknownOption { level: FacetLevel, key: String },

    #[error("{0} cannot be chosen until its parent facet is selected")]
    LevelDisabled(FacetLevel),
}

pub type Result<T> = std::result::Result<T, SessionError>;
