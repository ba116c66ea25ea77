//! Error types shared by the grid, its configuration and the data loaders.

/// Errors raised while building or reconfiguring a grid.
///
/// Interactive operations that the user can trigger with bad input (hiding a
/// protected column, dropping a column outside the header, typing letters into
/// a numeric filter) never produce these; they are rejected and reported
/// through a `bool` return instead.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("duplicate column key: {0}")]
    DuplicateColumnKey(String),
    #[error("page size {size} is not one of {allowed:?}")]
    InvalidPageSize { size: usize, allowed: Vec<usize> },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(serde_json::Error),
}

pub type GridResult<T> = Result<T, GridError>;

/// Errors reported by a [`DataSource`](crate::fetch::DataSource) or a
/// [`RecordMutator`](crate::fetch::RecordMutator).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
