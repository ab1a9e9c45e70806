//! Result type alias for CRM operations.

use crate::CrmError;

/// Result type alias using `CrmError` as the error type.
pub type CrmResult<T> = Result<T, CrmError>;
