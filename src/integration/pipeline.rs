//! TrackerPipeline for combining detection with tracking.

use crate::tracker::{CentroidTracker, Detection, Registry, TrackerConfig};

use super::DetectionSource;

/// A combined tracker that bundles detection inference with a CentroidTracker.
///
/// This struct provides a convenient way to run end-to-end tracking
/// by combining any `DetectionSource` with the `CentroidTracker`.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: CentroidTracker<Detection>,
    frames_processed: u64,
    detections_processed: u64,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> crate::Result<Self> {
        Ok(Self {
            detector,
            tracker: CentroidTracker::new(config)?,
            frames_processed: 0,
            detections_processed: 0,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self {
            detector,
            tracker: CentroidTracker::default(),
            frames_processed: 0,
            detections_processed: 0,
        }
    }

    /// Process a single frame and return the tracked objects.
    ///
    /// A detector error leaves the tracker untouched; the frame is not
    /// counted as an empty update.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<&Registry<Detection>, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        self.frames_processed += 1;
        self.detections_processed += detections.len() as u64;
        Ok(self.tracker.update(detections))
    }

    /// Number of frames that reached the tracker.
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Total detections handed to the tracker across all frames.
    pub fn detections_processed(&self) -> u64 {
        self.detections_processed
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker<Detection> {
        &self.tracker
    }
}
