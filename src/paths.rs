use serde::{Serialize, Deserialize};
use std::collections::HashSet;
use crate::catalog::{Catalog, Topic};
use crate::config::engine::EngineConfig;
use crate::mastery::MasteryStore;
use crate::readiness::analyze_topic_readiness;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    #[default]
    Fastest,
    MostThorough,
    ExamFocused,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Fastest, Strategy::MostThorough, Strategy::ExamFocused];

    fn base_confidence(self) -> f64 {
        match self {
            Strategy::Fastest => 0.85,
            Strategy::MostThorough => 0.95,
            Strategy::ExamFocused => 0.8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Fastest => "fastest",
            Strategy::MostThorough => "mostThorough",
            Strategy::ExamFocused => "examFocused",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: String,
    pub name: String,
    pub description: String,
    pub strategy: Strategy,
    pub topics: Vec<String>,
    pub estimated_time: u32,
    pub confidence: f64,
}

struct Candidate<'a> {
    topic: &'a Topic,
    score: f64,
}

/// One path per strategy toward `target_topic_id`. Empty when the target is unknown.
pub fn generate_learning_paths(
    catalog: &Catalog,
    mastery: &MasteryStore,
    config: &EngineConfig,
    target_topic_id: &str,
    available_time_minutes: u32,
) -> Vec<LearningPath> {
    let Some(target) = catalog.topic(target_topic_id) else {
        tracing::debug!(target_topic = %target_topic_id, "No paths for unknown target topic");
        return Vec::new();
    };

    Strategy::ALL
        .iter()
        .map(|&strategy| build_path(catalog, mastery, config, target, strategy, available_time_minutes))
        .collect()
}

/// Path for a single strategy toward a known target.
pub fn build_path(
    catalog: &Catalog,
    mastery: &MasteryStore,
    config: &EngineConfig,
    target: &Topic,
    strategy: Strategy,
    available_time_minutes: u32,
) -> LearningPath {
    let required: Vec<&Topic> = catalog
        .transitive_prerequisites(&target.id)
        .iter()
        .filter_map(|id| catalog.topic(id))
        .filter(|t| mastery.mastery(&t.id) < config.path_mastery_threshold)
        .collect();

    let mut pool: Vec<Candidate> = required
        .iter()
        .map(|&topic| Candidate {
            topic,
            score: score_candidate(catalog, mastery, config, topic, strategy),
        })
        .collect();
    pool.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.topic.id.cmp(&b.topic.id))
    });

    let mut topics: Vec<String> = Vec::new();
    let mut included: HashSet<&str> = HashSet::new();
    let mut elapsed: u32 = 0;

    // Sweep the ranked pool until nothing else fits: a topic passed over because its own
    // prerequisite was not yet placed gets another chance once that prerequisite lands.
    loop {
        let mut placed_any = false;
        for candidate in &pool {
            let topic = candidate.topic;
            if included.contains(topic.id.as_str()) {
                continue;
            }
            let fits = elapsed.saturating_add(topic.estimated_time_minutes) <= available_time_minutes;
            if fits && prerequisites_met(mastery, config, topic, &included) {
                elapsed += topic.estimated_time_minutes;
                included.insert(topic.id.as_str());
                topics.push(topic.id.clone());
                placed_any = true;
            }
        }
        if !placed_any {
            break;
        }
    }

    // The target goes in whenever its prerequisites are covered, even past the budget.
    if prerequisites_met(mastery, config, target, &included) {
        if elapsed.saturating_add(target.estimated_time_minutes) > available_time_minutes {
            tracing::debug!(
                target_topic = %target.id,
                strategy = strategy.label(),
                "Target exceeds time budget, including anyway"
            );
        }
        elapsed = elapsed.saturating_add(target.estimated_time_minutes);
        topics.push(target.id.clone());
    }

    let missed = required
        .iter()
        .filter(|t| !included.contains(t.id.as_str()))
        .count();
    let penalty = if required.is_empty() {
        0.0
    } else {
        missed as f64 / required.len() as f64 * 0.2
    };
    let confidence = (strategy.base_confidence() - penalty).clamp(0.1, 1.0);

    tracing::info!(
        target_topic = %target.id,
        strategy = strategy.label(),
        topics = topics.len(),
        estimated_time = elapsed,
        confidence = confidence,
        "Generated learning path"
    );

    let (name, description) = describe(strategy, &target.name);
    LearningPath {
        id: format!("{}-{}", strategy.label(), target.id),
        name,
        description,
        strategy,
        topics,
        estimated_time: elapsed,
        confidence,
    }
}

fn score_candidate(
    catalog: &Catalog,
    mastery: &MasteryStore,
    config: &EngineConfig,
    topic: &Topic,
    strategy: Strategy,
) -> f64 {
    let current = mastery.mastery(&topic.id);
    let mastery_gap = 1.0 - current;
    let (readiness, impact) = analyze_topic_readiness(catalog, mastery, config, &topic.id)
        .map(|r| (r.readiness, r.total_readiness_impact))
        .unwrap_or((1.0, 0.0));

    match strategy {
        Strategy::Fastest => {
            let score = mastery_gap * readiness;
            score * readiness * 2.0 * topic.impact_score
        }
        Strategy::MostThorough => {
            let score = mastery_gap * (1.0 + impact);
            score * topic.difficulty.thorough_multiplier()
        }
        Strategy::ExamFocused => {
            let score = mastery_gap * topic.impact_score * 2.0;
            if current > 0.7 {
                score * 0.5
            } else {
                score
            }
        }
    }
}

fn prerequisites_met(
    mastery: &MasteryStore,
    config: &EngineConfig,
    topic: &Topic,
    included: &HashSet<&str>,
) -> bool {
    topic.prerequisites.iter().all(|p| {
        mastery.mastery(&p.topic_id) >= config.path_mastery_threshold
            || included.contains(p.topic_id.as_str())
    })
}

fn describe(strategy: Strategy, target_name: &str) -> (String, String) {
    match strategy {
        Strategy::Fastest => (
            format!("Fastest route to {}", target_name),
            "Prioritizes high-impact topics you are already prepared for.".to_string(),
        ),
        Strategy::MostThorough => (
            format!("Thorough route to {}", target_name),
            "Builds foundations first, including harder prerequisite chains.".to_string(),
        ),
        Strategy::ExamFocused => (
            format!("Exam prep for {}", target_name),
            "Targets high-yield topics where you are still weak.".to_string(),
        ),
    }
}
