use crate::infrastructure::error::EngineError;
use crate::infrastructure::snapshot::ScheduleSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Where the planner snapshot lives between sessions. The engine itself never
/// performs I/O; a repository brackets a batch of engine calls with one load
/// and one save.
pub trait StateRepository: Send + Sync {
    fn load(&self) -> Result<Option<ScheduleSnapshot>, EngineError>;
    fn save(&self, snapshot: &ScheduleSnapshot) -> Result<(), EngineError>;
    fn clear(&self) -> Result<(), EngineError>;
}

/// Pretty-printed JSON file storage.
#[derive(Debug, Clone)]
pub struct JsonFileStateRepository {
    path: PathBuf,
}

impl JsonFileStateRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateRepository for JsonFileStateRepository {
    fn load(&self) -> Result<Option<ScheduleSnapshot>, EngineError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, snapshot: &ScheduleSnapshot) -> Result<(), EngineError> {
        let formatted = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, format!("{formatted}\n"))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), EngineError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStateRepository {
    state: Mutex<Option<ScheduleSnapshot>>,
}

impl StateRepository for InMemoryStateRepository {
    fn load(&self) -> Result<Option<ScheduleSnapshot>, EngineError> {
        let state = self
            .state
            .lock()
            .map_err(|error| EngineError::Storage(format!("state lock poisoned: {error}")))?;
        Ok(state.clone())
    }

    fn save(&self, snapshot: &ScheduleSnapshot) -> Result<(), EngineError> {
        let mut state = self
            .state
            .lock()
            .map_err(|error| EngineError::Storage(format!("state lock poisoned: {error}")))?;
        *state = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), EngineError> {
        let mut state = self
            .state
            .lock()
            .map_err(|error| EngineError::Storage(format!("state lock poisoned: {error}")))?;
        *state = None;
        Ok(())
    }
}
