use serde::{Serialize, Deserialize};
use chrono::{DateTime, Duration, Utc};
use crate::catalog::{Catalog, Problem, Topic};
use crate::config::engine::EngineConfig;
use crate::mastery::MasteryStore;
use crate::readiness::analyze_topic_readiness;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GapKind {
    LowMastery,
    Forgotten,
    MissingPrerequisite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeGap {
    pub topic: Topic,
    pub kind: GapKind,
    pub reason: String,
    /// Mastery of `topic` when the gap was detected.
    pub mastery: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecommendation {
    pub problem: Problem,
    pub reason: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecommendation {
    pub topic: Topic,
    pub reason: String,
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

/// Deficiencies behind a problem's required topics, most deficient first.
pub fn identify_knowledge_gaps(
    catalog: &Catalog,
    mastery: &MasteryStore,
    config: &EngineConfig,
    problem: &Problem,
    now: DateTime<Utc>,
) -> Vec<KnowledgeGap> {
    let mut gaps = Vec::new();

    for topic_id in &problem.required_topics {
        let Some(topic) = catalog.topic(topic_id) else { continue };
        let current = mastery.mastery(topic_id);

        if current < config.low_mastery_threshold {
            gaps.push(KnowledgeGap {
                topic: topic.clone(),
                kind: GapKind::LowMastery,
                reason: format!("Low mastery ({})", percent(current)),
                mastery: current,
            });
        }

        let forgotten_after = Duration::try_days(config.forgotten_after_days);
        if let (Some(last), Some(window)) = (mastery.last_practiced_at(topic_id), forgotten_after) {
            let idle = now - last;
            if idle > window {
                gaps.push(KnowledgeGap {
                    topic: topic.clone(),
                    kind: GapKind::Forgotten,
                    reason: format!("Possibly forgotten (not practiced in {} days)", idle.num_days()),
                    mastery: current,
                });
            }
        }

        let critical = analyze_topic_readiness(catalog, mastery, config, topic_id)
            .and_then(|r| {
                r.missing_prerequisites.into_iter().max_by(|a, b| {
                    a.severity()
                        .partial_cmp(&b.severity())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
            });
        if let Some(missing) = critical {
            if let Some(prereq) = catalog.topic(&missing.topic_id) {
                gaps.push(KnowledgeGap {
                    topic: prereq.clone(),
                    kind: GapKind::MissingPrerequisite,
                    reason: format!(
                        "Missing prerequisite for {}: {} of {} required",
                        topic.name,
                        percent(missing.current_mastery),
                        percent(missing.required_mastery)
                    ),
                    mastery: missing.current_mastery,
                });
            }
        }
    }

    gaps.sort_by(|a, b| a.mastery.partial_cmp(&b.mastery).unwrap_or(std::cmp::Ordering::Equal));
    gaps
}

/// Problems ranked by how many gaps they address, weighted by difficulty.
/// Problems that expose no gap are not recommended.
pub fn recommended_problems(
    catalog: &Catalog,
    mastery: &MasteryStore,
    config: &EngineConfig,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<ProblemRecommendation> {
    let mut scored: Vec<ProblemRecommendation> = catalog
        .problems()
        .iter()
        .filter_map(|problem| {
            let gaps = identify_knowledge_gaps(catalog, mastery, config, problem, now);
            if gaps.is_empty() {
                return None;
            }
            let score = gaps.len() as f64 * problem.difficulty.problem_weight();
            let reason = gaps
                .iter()
                .map(|g| format!("{}: {}", g.topic.name, g.reason))
                .collect::<Vec<_>>()
                .join("; ");
            Some(ProblemRecommendation {
                problem: problem.clone(),
                reason,
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    tracing::debug!(count = scored.len(), limit = limit, "Recommended problems");
    scored
}

/// Topics to study next. With a target that has missing prerequisites, those
/// prerequisites ranked by weighted gap; otherwise ready, unmastered topics that
/// have not been practiced recently.
pub fn recommended_topics(
    catalog: &Catalog,
    mastery: &MasteryStore,
    config: &EngineConfig,
    limit: usize,
    target_topic_id: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<TopicRecommendation> {
    if let Some(target_id) = target_topic_id {
        if let Some(readiness) = analyze_topic_readiness(catalog, mastery, config, target_id) {
            if !readiness.missing_prerequisites.is_empty() {
                let target_name = catalog
                    .topic(target_id)
                    .map(|t| t.name.as_str())
                    .unwrap_or(target_id);
                let mut missing = readiness.missing_prerequisites;
                missing.sort_by(|a, b| {
                    b.severity()
                        .partial_cmp(&a.severity())
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                return missing
                    .into_iter()
                    .filter_map(|m| {
                        let topic = catalog.topic(&m.topic_id)?;
                        Some(TopicRecommendation {
                            topic: topic.clone(),
                            reason: format!(
                                "Prerequisite for {}: {} of {} required",
                                target_name,
                                percent(m.current_mastery),
                                percent(m.required_mastery)
                            ),
                        })
                    })
                    .take(limit)
                    .collect();
            }
        }
    }

    // A window wider than chrono's range reaches back to the earliest representable instant.
    let recent_cutoff = Duration::try_hours(config.recent_practice_hours)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut candidates: Vec<(&Topic, f64, f64, i64)> = catalog
        .topics()
        .iter()
        .filter_map(|topic| {
            let current = mastery.mastery(&topic.id);
            if current >= config.mastered_threshold {
                return None;
            }
            let last = mastery.last_practiced_at(&topic.id);
            if last.map_or(false, |at| at > recent_cutoff) {
                return None;
            }
            let readiness = analyze_topic_readiness(catalog, mastery, config, &topic.id)?.readiness;
            if readiness < config.recommend_readiness_floor {
                return None;
            }
            // Never-practiced topics are the stalest.
            let staleness = last.map_or(i64::MAX, |at| (now - at).num_seconds());
            Some((topic, current, readiness, staleness))
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.0.impact_score
            .partial_cmp(&a.0.impact_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| b.3.cmp(&a.3))
    });

    candidates
        .into_iter()
        .take(limit)
        .map(|(topic, current, readiness, _)| TopicRecommendation {
            topic: topic.clone(),
            reason: format!(
                "Ready to learn ({} ready, {} mastered)",
                percent(readiness),
                percent(current)
            ),
        })
        .collect()
}
