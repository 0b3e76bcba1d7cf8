//! Result type aliases for Relief Hub.

use crate::ReliefError;

/// A specialized `Result` type for Relief operations.
pub type ReliefResult<T> = Result<T, ReliefError>;
