use crate::application::placement::PlacedBlock;
use crate::application::schedule::{BlockPatch, ScheduleModel};
use crate::application::validation::ConflictResult;
use crate::domain::clock::Minute;
use crate::domain::models::{Block, BlockId};
use crate::infrastructure::error::EngineError;
use crate::infrastructure::export::{self, ExportEnvelope};
use crate::infrastructure::snapshot::ScheduleSnapshot;
use crate::infrastructure::storage::StateRepository;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// One user session over a persisted planner: loads the snapshot on
/// construction, persists after every successful mutation, and appends a JSON
/// line per command to the operation log. Callers serialize access; the
/// session holds no lock beyond the log-file guard.
pub struct PlannerSession {
    repository: Arc<dyn StateRepository>,
    model: ScheduleModel,
    dark_mode: bool,
    log_path: Option<PathBuf>,
    log_guard: Mutex<()>,
}

impl PlannerSession {
    pub fn new(
        repository: Arc<dyn StateRepository>,
        log_path: Option<PathBuf>,
    ) -> Result<Self, EngineError> {
        let snapshot = repository
            .load()?
            .unwrap_or_else(ScheduleSnapshot::factory_defaults);
        let model = snapshot.to_model()?;
        Ok(Self {
            repository,
            model,
            dark_mode: snapshot.dark_mode,
            log_path,
            log_guard: Mutex::new(()),
        })
    }

    pub fn model(&self) -> &ScheduleModel {
        &self.model
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), EngineError> {
        self.dark_mode = enabled;
        self.persist()
    }

    pub fn set_day(&mut self, wake: &str, sleep: &str) -> Result<(), EngineError> {
        let result = self.model.set_window(wake, sleep);
        self.finish("set_day", &format!("window {wake}-{sleep}"), result)
    }

    pub fn add_block(&mut self, block: Block) -> Result<(), EngineError> {
        let detail = format!("block {} '{}'", block.id, block.purpose);
        let result = self.model.propose_add(block);
        self.finish("add_block", &detail, result)
    }

    pub fn edit_block(&mut self, id: BlockId, patch: BlockPatch) -> Result<(), EngineError> {
        let result = self.model.propose_edit(id, patch);
        self.finish("edit_block", &format!("block {id}"), result)
    }

    pub fn remove_block(&mut self, id: BlockId) -> Result<bool, EngineError> {
        let removed = self.model.remove(id);
        if removed {
            self.persist()?;
        }
        self.log_info("remove_block", &format!("block {id} removed={removed}"));
        Ok(removed)
    }

    pub fn placements(&self) -> Result<Vec<PlacedBlock>, EngineError> {
        self.model.placements()
    }

    pub fn validate_range(
        &self,
        start: Minute,
        end: Minute,
        excluding: Option<BlockId>,
    ) -> Result<ConflictResult, EngineError> {
        self.model.validate_range(start, end, excluding)
    }

    pub fn export_state(&self) -> ExportEnvelope {
        let envelope = export::export_state(&self.snapshot());
        self.log_info("export_state", "exported planner state");
        envelope
    }

    /// Replaces the whole session state from an export file. All-or-nothing:
    /// a file that fails any structure check leaves the session untouched.
    pub fn import_state(&mut self, raw: &str) -> Result<(), EngineError> {
        match export::parse_import(raw) {
            Ok(snapshot) => {
                self.model = snapshot.to_model()?;
                self.dark_mode = snapshot.dark_mode;
                self.persist()?;
                self.log_info("import_state", "imported planner state");
                Ok(())
            }
            Err(error) => {
                self.log_error("import_state", &error.to_string());
                Err(error)
            }
        }
    }

    /// Factory reset: every field back to defaults, persisted immediately.
    pub fn clear_history(&mut self) -> Result<(), EngineError> {
        let defaults = ScheduleSnapshot::factory_defaults();
        self.model = defaults.to_model()?;
        self.dark_mode = defaults.dark_mode;
        self.repository.save(&defaults)?;
        self.log_info("clear_history", "reset planner to factory defaults");
        Ok(())
    }

    fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot::from_model(&self.model, self.dark_mode)
    }

    fn persist(&self) -> Result<(), EngineError> {
        self.repository.save(&self.snapshot())
    }

    fn finish(
        &mut self,
        command: &str,
        detail: &str,
        result: Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        match result {
            Ok(()) => {
                self.persist()?;
                self.log_info(command, detail);
                Ok(())
            }
            Err(error) => {
                self.log_error(command, &format!("{detail}: {error}"));
                Err(error)
            }
        }
    }

    fn log_info(&self, command: &str, message: &str) {
        self.append_log("info", command, message);
    }

    fn log_error(&self, command: &str, message: &str) {
        self.append_log("error", command, message);
    }

    fn append_log(&self, level: &str, command: &str, message: &str) {
        let Some(path) = &self.log_path else {
            return;
        };
        let Ok(_guard) = self.log_guard.lock() else {
            return;
        };
        let payload = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "level": level,
            "command": command,
            "message": message,
        });

        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{payload}");
        }
    }
}
