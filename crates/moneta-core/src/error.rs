use moneta_domain::{DateWindowError, MonthKeyError};
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the reporting core.
///
/// `InvalidMonth`, `InvalidArgument`, `WorkspaceNotFound`, and `Forbidden`
/// are raised eagerly during scope resolution, before any aggregation work.
/// `Storage` aborts a report outright: there are no partial reports.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("caller identity is missing")]
    Unauthenticated,
    #[error("workspace {0} does not belong to the caller")]
    Forbidden(Uuid),
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(Uuid),
    #[error("invalid month key: {0}")]
    InvalidMonth(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("storage error: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<MonthKeyError> for CoreError {
    fn from(err: MonthKeyError) -> Self {
        CoreError::InvalidMonth(err.to_string())
    }
}

impl From<DateWindowError> for CoreError {
    fn from(err: DateWindowError) -> Self {
        CoreError::InvalidArgument(err.to_string())
    }
}
