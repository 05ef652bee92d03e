use crate::domain::clock::{MINUTES_PER_DAY, Minute};
use serde::{Deserialize, Serialize};

pub type BlockId = u64;
pub type TaskId = u64;

/// How a block obtains its position on the day axis: pinned to explicit
/// times, or floated sequentially after whatever precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Anchored { start: Minute, end: Minute },
    Floating,
}

impl Schedule {
    pub fn is_anchored(&self) -> bool {
        matches!(self, Self::Anchored { .. })
    }

    pub fn anchored_range(&self) -> Option<(Minute, Minute)> {
        match *self {
            Self::Anchored { start, end } => Some((start, end)),
            Self::Floating => None,
        }
    }
}

/// An activity block owning an ordered task list. `duration` drives the
/// placement of floating blocks; on anchored blocks it is informational only
/// and placement uses the stored times directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub purpose: String,
    pub duration: Minute,
    pub schedule: Schedule,
    pub tasks: Vec<Task>,
}

impl Block {
    pub fn floating(id: BlockId, purpose: impl Into<String>, duration: Minute) -> Self {
        Self {
            id,
            purpose: purpose.into(),
            duration,
            schedule: Schedule::Floating,
            tasks: Vec::new(),
        }
    }

    pub fn anchored(id: BlockId, purpose: impl Into<String>, start: Minute, end: Minute) -> Self {
        let duration = if end > start {
            end - start
        } else {
            end + MINUTES_PER_DAY - start
        };
        Self {
            id,
            purpose: purpose.into(),
            duration,
            schedule: Schedule::Anchored { start, end },
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_non_empty(&self.purpose, "block.purpose")?;
        if self.duration == 0 {
            return Err("block.duration must be > 0".to_string());
        }
        for task in &self.tasks {
            task.validate()?;
        }
        for (index, task) in self.tasks.iter().enumerate() {
            if self.tasks[..index].iter().any(|other| other.id == task.id) {
                return Err(format!("task.id {} duplicated within block", task.id));
            }
        }
        Ok(())
    }
}

/// A task inside a block. `notes` is an opaque payload (markdown-like text
/// rendered elsewhere); the engine never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            notes: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_non_empty(&self.text, "task.text")
    }
}

fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field_name} must not be empty"));
    }
    Ok(())
}
