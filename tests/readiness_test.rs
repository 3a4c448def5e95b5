mod common;

use std::sync::Arc;
use common::{ab_catalog, approx, engine, engine_with, practice, topic};
use mathtutor_lib::catalog::{Catalog, Difficulty};

#[test]
fn test_unknown_topic_has_no_readiness() {
    let engine = engine(ab_catalog());
    assert!(engine.analyze_topic_readiness("nope").is_none());
}

#[test]
fn test_topic_without_prerequisites_is_fully_ready() {
    let engine = engine(ab_catalog());
    let readiness = engine.analyze_topic_readiness("A").unwrap();
    assert_eq!(readiness.readiness, 1.0);
    assert_eq!(readiness.total_readiness_impact, 0.0);
    assert!(readiness.missing_prerequisites.is_empty());
}

#[test]
fn test_unmet_prerequisite_reports_gap() {
    let engine = engine(ab_catalog());
    let readiness = engine.analyze_topic_readiness("B").unwrap();

    assert_eq!(readiness.missing_prerequisites.len(), 1);
    let missing = &readiness.missing_prerequisites[0];
    assert_eq!(missing.topic_id, "A");
    assert!(approx(missing.gap, 0.7));
    assert_eq!(missing.current_mastery, 0.0);
    assert_eq!(missing.weight, 0.8);

    // 0.7 * 0.8 / 0.8
    assert!(approx(readiness.total_readiness_impact, 0.7));
    assert!(approx(readiness.readiness, 0.3));
}

#[test]
fn test_readiness_rises_after_practice() {
    let mut engine = engine(ab_catalog());
    let before = engine.analyze_topic_readiness("B").unwrap().readiness;

    practice(&mut engine, "pA", true, 8);
    let after = engine.analyze_topic_readiness("B").unwrap();
    assert!(after.readiness > before);
    assert_eq!(after.readiness, 1.0);
    assert!(after.missing_prerequisites.is_empty());
}

#[test]
fn test_small_gaps_are_noise() {
    let engine = engine_with(ab_catalog(), &[("A", 0.66)]);
    let readiness = engine.analyze_topic_readiness("B").unwrap();
    assert!(readiness.missing_prerequisites.is_empty());
    assert_eq!(readiness.readiness, 1.0);
}

#[test]
fn test_impact_is_normalized_by_all_prerequisite_weight() {
    let topics = vec![
        topic("A", &[], Difficulty::Easy, 10, 0.5),
        topic("B", &[], Difficulty::Easy, 10, 0.5),
        topic("C", &[("A", 1.0, 0.5), ("B", 1.0, 0.5)], Difficulty::Medium, 10, 0.5),
    ];
    let catalog = Arc::new(Catalog::new(topics, vec![]).unwrap());
    let engine = engine_with(catalog, &[("A", 0.5)]);

    let readiness = engine.analyze_topic_readiness("C").unwrap();
    assert_eq!(readiness.missing_prerequisites.len(), 1);
    assert_eq!(readiness.missing_prerequisites[0].topic_id, "B");
    assert!(approx(readiness.total_readiness_impact, 0.25));
    assert!(approx(readiness.readiness, 0.75));
}

#[test]
fn test_readiness_is_idempotent() {
    let mut engine = engine(ab_catalog());
    practice(&mut engine, "pA", true, 3);
    let first = engine.analyze_topic_readiness("B");
    let second = engine.analyze_topic_readiness("B");
    assert_eq!(first, second);
}
