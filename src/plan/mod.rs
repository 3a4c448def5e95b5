use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Deserialize};
use crate::engine::LearningEngine;
use crate::paths::{build_path, LearningPath};
use crate::preferences::UserPreferences;
use crate::recommend::ProblemRecommendation;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub target_topic: Option<String>,
    pub path: Option<LearningPath>,
    pub problems: Vec<ProblemRecommendation>,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl DailyPlan {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

pub fn generate_daily_plan(
    engine: &LearningEngine,
    prefs: &UserPreferences,
    target_topic_id: Option<&str>,
) -> DailyPlan {
    generate_daily_plan_at(engine, prefs, target_topic_id, Utc::now())
}

/// Build today's plan: a path in the preferred style toward the target (or the top
/// recommended topic) plus `daily_goal` practice problems.
pub fn generate_daily_plan_at(
    engine: &LearningEngine,
    prefs: &UserPreferences,
    target_topic_id: Option<&str>,
    now: DateTime<Utc>,
) -> DailyPlan {
    let target_topic = match target_topic_id {
        Some(id) => Some(id.to_string()),
        None => engine
            .recommended_topics_at(1, None, now)
            .into_iter()
            .next()
            .map(|r| r.topic.id),
    };

    let path = target_topic
        .as_deref()
        .and_then(|id| engine.catalog().topic(id))
        .map(|target| {
            build_path(
                engine.catalog(),
                engine.mastery_store(),
                engine.config(),
                target,
                prefs.preferred_path_type,
                prefs.available_time,
            )
        });

    let problems = engine.recommended_problems_at(prefs.daily_goal as usize, now);

    tracing::info!(
        target_topic = ?target_topic,
        strategy = prefs.preferred_path_type.label(),
        problems = problems.len(),
        "Generated daily plan"
    );

    DailyPlan {
        target_topic,
        path,
        problems,
        generated_at: now,
        expires_at: now + Duration::hours(24),
    }
}
