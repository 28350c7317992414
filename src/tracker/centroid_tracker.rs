//! Main CentroidTracker algorithm implementation.

use std::collections::BTreeMap;

use ndarray::Array2;
use tracing::{debug, trace, warn};

use crate::error::{Result, TrackerError};
use crate::tracker::matching::{self, AssignmentResult, Detection};
use crate::tracker::rect::{BoundingBox, Centroid};
use crate::tracker::tracked_object::{ObjectId, TrackedObject};

/// Frames an object may go unmatched before it is dropped, unless configured.
pub const DEFAULT_MAX_DISAPPEARED: u32 = 10;

/// Live set of tracked objects, iterated in id (and therefore registration) order.
pub type Registry<P> = BTreeMap<ObjectId, TrackedObject<P>>;

/// How tracked centroids are paired with new ones each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchStrategy {
    /// Closest-row-first greedy matching
    #[default]
    Greedy,
    /// Minimum total distance via LAPJV
    Optimal,
}

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackerConfig {
    /// An object is dropped once its disappeared count exceeds this value.
    pub max_disappeared: u32,
    /// Pairs further apart than this are never matched. `None` disables the gate.
    pub max_distance: Option<f64>,
    pub strategy: MatchStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: DEFAULT_MAX_DISAPPEARED,
            max_distance: None,
            strategy: MatchStrategy::Greedy,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(max_distance) = self.max_distance {
            if !max_distance.is_finite() || max_distance < 0.0 {
                return Err(TrackerError::InvalidConfig(format!(
                    "max_distance must be finite and non-negative, got {max_distance}"
                )));
            }
        }
        Ok(())
    }
}

/// Multi-object tracker that keeps identities stable by nearest-centroid
/// association.
///
/// Every call to [`update`](Self::update) consumes one frame's detections.
/// Tracked objects that find a match take over the detection as their new
/// payload; objects that do not are counted as disappeared and dropped once
/// the count exceeds `max_disappeared`. Detections left over become new
/// objects.
///
/// Ties are resolved by first-seen order: among tracked objects with the same
/// best distance the older one is matched first, and among equally close
/// detections the earlier one in the input wins. Given the same inputs the
/// tracker always produces the same ids.
#[derive(Debug, Clone)]
pub struct CentroidTracker<P = Detection> {
    next_id: ObjectId,
    objects: Registry<P>,
    config: TrackerConfig,
}

impl<P> Default for CentroidTracker<P> {
    fn default() -> Self {
        Self::with_max_disappeared(DEFAULT_MAX_DISAPPEARED)
    }
}

impl<P> CentroidTracker<P> {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            next_id: 0,
            objects: BTreeMap::new(),
            config,
        })
    }

    pub fn with_max_disappeared(max_disappeared: u32) -> Self {
        Self {
            next_id: 0,
            objects: BTreeMap::new(),
            config: TrackerConfig {
                max_disappeared,
                ..TrackerConfig::default()
            },
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The current registry.
    pub fn objects(&self) -> &Registry<P> {
        &self.objects
    }

    pub fn get(&self, id: ObjectId) -> Option<&TrackedObject<P>> {
        self.objects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The id the next registered object will receive.
    pub fn next_id(&self) -> ObjectId {
        self.next_id
    }

    /// Start tracking a new object and return its id.
    pub fn register(&mut self, centroid: Centroid, payload: P) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        self.objects
            .insert(id, TrackedObject::new(id, centroid, payload));
        debug!(object_id = id, x = centroid.x, y = centroid.y, "Registered object");
        id
    }

    /// Stop tracking an object, returning its final state.
    pub fn deregister(&mut self, id: ObjectId) -> Result<TrackedObject<P>> {
        self.remove(id).ok_or(TrackerError::UnknownObject(id))
    }

    fn remove(&mut self, id: ObjectId) -> Option<TrackedObject<P>> {
        let object = self.objects.remove(&id)?;
        debug!(
            object_id = id,
            disappeared = object.disappeared,
            "Deregistered object"
        );
        Some(object)
    }

    fn mark_missed(&mut self, ids: &[ObjectId]) {
        let max_disappeared = self.config.max_disappeared;
        for &id in ids {
            let expired = self
                .objects
                .get_mut(&id)
                .is_some_and(|object| object.mark_missed(max_disappeared));
            if expired {
                self.remove(id);
            }
        }
    }

    fn assign(&self, dists: &Array2<f64>) -> AssignmentResult {
        let max_distance = self.config.max_distance;
        match self.config.strategy {
            MatchStrategy::Greedy => matching::greedy_assignment(dists, max_distance),
            MatchStrategy::Optimal => matching::linear_assignment(dists, max_distance)
                .unwrap_or_else(|| {
                    warn!(
                        rows = dists.nrows(),
                        cols = dists.ncols(),
                        "LAPJV failed, falling back to greedy assignment"
                    );
                    matching::greedy_assignment(dists, max_distance)
                }),
        }
    }
}

impl<P: BoundingBox> CentroidTracker<P> {
    /// Feed one frame's detections and return the updated registry.
    pub fn update(&mut self, detections: Vec<P>) -> &Registry<P> {
        // Step 1: Nothing detected, every object misses this frame
        if detections.is_empty() {
            let ids: Vec<ObjectId> = self.objects.keys().copied().collect();
            self.mark_missed(&ids);
            trace!(missed = ids.len(), tracked = self.objects.len(), "Empty update");
            return &self.objects;
        }

        let input_centroids: Vec<Centroid> = detections
            .iter()
            .map(|det| det.bbox().centroid())
            .collect();

        // Step 2: Bootstrap from the first non-empty frame
        if self.objects.is_empty() {
            for (centroid, det) in input_centroids.into_iter().zip(detections) {
                self.register(centroid, det);
            }
            return &self.objects;
        }

        // Step 3: Associate tracked centroids with the new ones
        let (object_ids, object_centroids): (Vec<ObjectId>, Vec<Centroid>) = self
            .objects
            .values()
            .map(|object| (object.id, object.centroid))
            .unzip();

        let dists = matching::distance_matrix(&object_centroids, &input_centroids);

        let AssignmentResult {
            matches,
            unmatched_rows,
            unmatched_cols,
        } = self.assign(&dists);

        let mut payloads: Vec<Option<P>> = detections.into_iter().map(Some).collect();

        for &(row, col) in &matches {
            let Some(payload) = payloads[col].take() else {
                continue;
            };
            if let Some(object) = self.objects.get_mut(&object_ids[row]) {
                object.mark_matched(input_centroids[col], payload);
            }
        }

        // Step 4: Age objects that found no match
        let missed: Vec<ObjectId> = unmatched_rows.iter().map(|&row| object_ids[row]).collect();
        self.mark_missed(&missed);

        // Step 5: Leftover detections become new objects, in input order
        for &col in &unmatched_cols {
            if let Some(payload) = payloads[col].take() {
                self.register(input_centroids[col], payload);
            }
        }

        trace!(
            matched = matches.len(),
            missed = missed.len(),
            registered = unmatched_cols.len(),
            tracked = self.objects.len(),
            "Tracker updated"
        );

        &self.objects
    }
}
