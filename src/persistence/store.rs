use std::collections::HashMap;
use std::path::PathBuf;
use crate::error::TutorError;

/// Minimal key-value capability the host provides for persisted state.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, TutorError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), TutorError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TutorError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TutorError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the platform application-data directory.
    pub fn in_app_data() -> Self {
        Self::new(crate::config::app_data_dir().join("state"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TutorError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TutorError::new(
                format!("Failed to read {}: {}", key, e),
                "io"
            ).with_context(format!("path: {:?}", path))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TutorError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| TutorError::new(
                format!("Failed to create directory: {}", e),
                "io"
            ).with_context(format!("path: {:?}", self.dir)))?;

        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| TutorError::new(
                format!("Failed to write {}: {}", key, e),
                "io"
            ).with_context(format!("path: {:?}", path)))?;
        Ok(())
    }
}
