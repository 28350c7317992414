//! Error types for the tracker.

use crate::tracker::ObjectId;

/// Errors raised by [`CentroidTracker`](crate::CentroidTracker).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackerError {
    /// The id is not (or no longer) in the registry.
    #[error("object {0} is not tracked")]
    UnknownObject(ObjectId),

    #[error("invalid tracker config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
