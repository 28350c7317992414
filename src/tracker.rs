mod centroid_tracker;
mod matching;
mod rect;
mod tracked_object;

pub use centroid_tracker::{
    CentroidTracker, DEFAULT_MAX_DISAPPEARED, MatchStrategy, Registry, TrackerConfig,
};
pub use matching::{
    AssignmentResult, Detection, distance_matrix, greedy_assignment, linear_assignment,
};
pub use rect::{BoundingBox, Centroid, Rect};
pub use tracked_object::{ObjectId, TrackedObject};
