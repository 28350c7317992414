use crate::tracker::rect::Centroid;

/// Identity assigned to a tracked object. Never reused within one tracker.
pub type ObjectId = u64;

/// Single tracked object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedObject<P> {
    /// Unique object identifier
    pub id: ObjectId,
    /// Center of the last matched bounding box
    pub centroid: Centroid,
    /// Last matched detection, replaced wholesale on every match
    pub payload: P,
    /// Consecutive updates without a match
    pub disappeared: u32,
}

impl<P> TrackedObject<P> {
    pub(crate) fn new(id: ObjectId, centroid: Centroid, payload: P) -> Self {
        Self {
            id,
            centroid,
            payload,
            disappeared: 0,
        }
    }

    pub(crate) fn mark_matched(&mut self, centroid: Centroid, payload: P) {
        self.centroid = centroid;
        self.payload = payload;
        self.disappeared = 0;
    }

    /// Bump the disappeared counter and report whether the object has now
    /// been missing for longer than `max_disappeared`.
    pub(crate) fn mark_missed(&mut self, max_disappeared: u32) -> bool {
        self.disappeared = self.disappeared.saturating_add(1);
        self.disappeared > max_disappeared
    }

    /// Whether the object was matched in the most recent update.
    pub fn is_visible(&self) -> bool {
        self.disappeared == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_missed_saturates() {
        let mut object = TrackedObject::new(0, Centroid::new(0, 0), ());
        object.disappeared = u32::MAX;

        assert!(!object.mark_missed(u32::MAX));
        assert_eq!(object.disappeared, u32::MAX);
    }

    #[test]
    fn test_mark_matched_resets() {
        let mut object = TrackedObject::new(3, Centroid::new(0, 0), "old");
        assert!(object.mark_missed(0));
        object.mark_matched(Centroid::new(4, 5), "new");

        assert!(object.is_visible());
        assert_eq!(object.centroid, Centroid::new(4, 5));
        assert_eq!(object.payload, "new");
    }
}
