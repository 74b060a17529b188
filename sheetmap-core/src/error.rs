//! Error types for cell reference and range handling

use thiserror::Error;

/// Recoverable failures raised while resolving references against a workbook.
///
/// None of these are fatal: extraction entry points turn them into empty
/// results or zero sums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A cell reference does not match `[A-Z]+[0-9]+`
    #[error("invalid cell reference: '{0}'")]
    InvalidReference(String),

    /// A range string cannot be decomposed into two valid cell references
    #[error("invalid range: '{0}'")]
    InvalidRange(String),

    /// A referenced sheet has no grid in the workbook
    #[error("sheet not found: '{0}'")]
    MissingSheet(String),
}

pub type MapResult<T> = std::result::Result<T, MapError>;
