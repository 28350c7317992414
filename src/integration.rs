//! Integration module for connecting object detection backends with the tracker.
//!
//! Detectors are black boxes here: anything that turns a frame into a list of
//! boxes with scores and labels can drive a [`TrackerPipeline`].

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::TrackerPipeline;
