use thiserror::Error;

/// Errors raised while parsing query parameters at the caller boundary.
///
/// The engine itself never fails; these only come from turning user or
/// settings input into typed parameters.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unknown date range type: {0}")]
    UnknownGranularity(String),

    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    CoreError(#[from] hireflow_core::error::CoreError),
}

pub type FilterResult<T> = std::result::Result<T, FilterError>;
