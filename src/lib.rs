//! Centroid-based multi-object tracking.
//!
//! [`CentroidTracker`] assigns stable integer identities to per-frame
//! detections by pairing each tracked object's last centroid with the
//! nearest new one. Objects that go unmatched for more than
//! `max_disappeared` consecutive frames are dropped.
//!
//! ```
//! use centroid_tracker::{CentroidTracker, Detection};
//!
//! let mut tracker = CentroidTracker::default();
//! tracker.update(vec![Detection::new(0.0, 0.0, 20.0, 20.0, 0.9)]);
//! let objects = tracker.update(vec![Detection::new(2.0, 2.0, 22.0, 22.0, 0.8)]);
//!
//! assert_eq!(objects.len(), 1);
//! assert_eq!(objects[&0].centroid.x, 12);
//! ```

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, TrackerPipeline};
pub use tracker::{
    BoundingBox, Centroid, CentroidTracker, Detection, MatchStrategy, ObjectId, Rect, Registry,
    TrackedObject, TrackerConfig,
};
