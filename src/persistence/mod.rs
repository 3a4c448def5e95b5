pub mod store;

pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::error::TutorError;
use crate::mastery::MasterySnapshot;
use crate::preferences::UserPreferences;

pub const MASTERY_KEY: &str = "mastery";
pub const PREFERENCES_KEY: &str = "preferences";

fn save_json<T: Serialize>(kv: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<(), TutorError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| TutorError::new(
            format!("Failed to serialize {}: {}", key, e),
            "json_serialize"
        ))?;
    kv.set(key, &json)
}

/// A stored value that fails to parse is logged and treated as absent.
fn load_json<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> Result<Option<T>, TutorError> {
    let Some(data) = kv.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str::<T>(&data) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key = key, error = %e, "Failed to parse stored value, ignoring it");
            Ok(None)
        }
    }
}

pub fn save_mastery(kv: &mut dyn KeyValueStore, snapshot: &MasterySnapshot) -> Result<(), TutorError> {
    save_json(kv, MASTERY_KEY, snapshot)
}

pub fn load_mastery(kv: &dyn KeyValueStore) -> Result<Option<MasterySnapshot>, TutorError> {
    load_json(kv, MASTERY_KEY)
}

pub fn save_preferences(kv: &mut dyn KeyValueStore, prefs: &UserPreferences) -> Result<(), TutorError> {
    save_json(kv, PREFERENCES_KEY, prefs)
}

pub fn load_preferences(kv: &dyn KeyValueStore) -> Result<Option<UserPreferences>, TutorError> {
    load_json(kv, PREFERENCES_KEY)
}
