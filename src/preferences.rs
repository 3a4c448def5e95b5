use serde::{Serialize, Deserialize};
use crate::paths::Strategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LearningStyle {
    Visual,
    #[default]
    Practice,
    Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub learning_style: LearningStyle,
    pub preferred_path_type: Strategy,
    /// Problems per day.
    pub daily_goal: u32,
    /// Minutes per study session.
    pub available_time: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        UserPreferences {
            learning_style: LearningStyle::default(),
            preferred_path_type: Strategy::default(),
            daily_goal: 5,
            available_time: 60,
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub learning_style: Option<LearningStyle>,
    pub preferred_path_type: Option<Strategy>,
    pub daily_goal: Option<u32>,
    pub available_time: Option<u32>,
}

impl UserPreferences {
    pub fn apply(&mut self, update: PreferencesUpdate) {
        if let Some(style) = update.learning_style {
            self.learning_style = style;
        }
        if let Some(strategy) = update.preferred_path_type {
            self.preferred_path_type = strategy;
        }
        if let Some(goal) = update.daily_goal {
            self.daily_goal = goal;
        }
        if let Some(minutes) = update.available_time {
            self.available_time = minutes;
        }
    }
}
