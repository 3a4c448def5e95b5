mod common;

use std::sync::Arc;
use chrono::{Duration, TimeZone, Utc};
use common::{ab_catalog, approx, engine};
use mathtutor_lib::analytics::compute_analytics;
use mathtutor_lib::catalog::builtin::algebra_catalog;
use mathtutor_lib::plan::generate_daily_plan_at;
use mathtutor_lib::preferences::UserPreferences;
use mathtutor_lib::Strategy;

#[test]
fn test_daily_plan_follows_preferences() {
    let engine = engine(Arc::new(algebra_catalog().unwrap()));
    let prefs = UserPreferences {
        preferred_path_type: Strategy::MostThorough,
        daily_goal: 3,
        available_time: 90,
        ..UserPreferences::default()
    };
    let now = Utc.with_ymd_and_hms(2026, 4, 1, 7, 0, 0).unwrap();
    let plan = generate_daily_plan_at(&engine, &prefs, Some("linear-equations"), now);

    assert_eq!(plan.target_topic.as_deref(), Some("linear-equations"));
    let path = plan.path.unwrap();
    assert_eq!(path.strategy, Strategy::MostThorough);
    assert_eq!(plan.problems.len(), 3);
    assert_eq!(plan.expires_at, now + Duration::hours(24));
}

#[test]
fn test_daily_plan_defaults_to_recommended_topic() {
    let engine = engine(ab_catalog());
    let now = Utc.with_ymd_and_hms(2026, 4, 1, 7, 0, 0).unwrap();
    let plan = generate_daily_plan_at(&engine, &UserPreferences::default(), None, now);

    assert_eq!(plan.target_topic.as_deref(), Some("A"));
    assert_eq!(plan.path.as_ref().unwrap().topics, vec!["A"]);
    assert!(!plan.is_expired_at(now + Duration::hours(23)));
    assert!(plan.is_expired_at(now + Duration::hours(25)));
}

#[test]
fn test_daily_plan_with_unknown_target_has_no_path() {
    let engine = engine(ab_catalog());
    let now = Utc.with_ymd_and_hms(2026, 4, 1, 7, 0, 0).unwrap();
    let plan = generate_daily_plan_at(&engine, &UserPreferences::default(), Some("ghost"), now);
    assert!(plan.path.is_none());
}

#[test]
fn test_analytics_per_topic() {
    let mut engine = engine(ab_catalog());
    let pa = engine.catalog().problem("pA").cloned().unwrap();
    let pb = engine.catalog().problem("pB").cloned().unwrap();
    engine.process_response(&pa, true, 30);
    engine.process_response(&pa, false, 90);
    engine.process_response(&pb, true, 60);

    let analytics = compute_analytics(&engine);
    assert_eq!(analytics.total_attempts, 3);
    assert_eq!(analytics.total_correct, 2);
    assert!(approx(analytics.overall_accuracy, 2.0 / 3.0));

    let a = &analytics.topics["A"];
    assert_eq!(a.attempts, 2);
    assert_eq!(a.correct, 1);
    assert!(approx(a.accuracy, 0.5));
    assert!(approx(a.avg_time_seconds, 60.0));

    // related topics are not counted as attempts
    let b = &analytics.topics["B"];
    assert_eq!(b.attempts, 1);
    assert!(approx(b.accuracy, 1.0));
}

#[test]
fn test_analytics_empty_log() {
    let engine = engine(ab_catalog());
    let analytics = compute_analytics(&engine);
    assert_eq!(analytics.total_attempts, 0);
    assert_eq!(analytics.overall_accuracy, 0.0);
    assert!(analytics.topics.is_empty());
}
