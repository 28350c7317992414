#![cfg(feature = "serde")]

use centroid_tracker::{
    Centroid, CentroidTracker, Detection, MatchStrategy, Registry, TrackerConfig,
};

#[test]
fn test_config_round_trip() {
    let config = TrackerConfig {
        max_disappeared: 4,
        max_distance: Some(35.5),
        strategy: MatchStrategy::Optimal,
    };

    let json = serde_json::to_string(&config).unwrap();
    let restored: TrackerConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, config);
}

#[test]
fn test_registry_round_trip() {
    let mut tracker = CentroidTracker::default();
    tracker.update(vec![
        Detection::new(0.0, 0.0, 20.0, 20.0, 0.9).with_class(0, "person"),
        Detection::new(100.0, 40.0, 140.0, 80.0, 0.6).with_class(2, "car"),
    ]);
    tracker.update(vec![Detection::new(2.0, 2.0, 22.0, 22.0, 0.8).with_class(0, "person")]);

    let json = serde_json::to_string(tracker.objects()).unwrap();
    let restored: Registry<Detection> = serde_json::from_str(&json).unwrap();

    assert_eq!(&restored, tracker.objects());
    assert_eq!(restored[&0].centroid, Centroid::new(12, 12));
    assert_eq!(restored[&1].disappeared, 1);
    assert_eq!(restored[&1].payload.label.as_deref(), Some("car"));
}
