use crate::application::schedule::ScheduleModel;
use crate::domain::clock::{self, Minute};
use crate::domain::models::{Block, BlockId, Schedule, Task};
use crate::domain::window::DayWindow;
use crate::infrastructure::error::EngineError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WAKE_TIME: &str = "07:00";
pub const DEFAULT_SLEEP_TIME: &str = "23:00";

/// The serialized shape of a planner day, identical to what the UI layer
/// persists and what export/import files carry. Times are wall-clock strings;
/// `dayIsSet` and `darkMode` are UI preferences stored opaquely so the
/// snapshot round-trips losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    pub wake_time: String,
    pub sleep_time: String,
    pub blocks: Vec<BlockSnapshot>,
    #[serde(default)]
    pub day_is_set: bool,
    #[serde(default)]
    pub dark_mode: bool,
}

/// A block as persisted: anchored blocks carry both `startTime` and
/// `endTime`, floating blocks carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSnapshot {
    pub id: BlockId,
    pub purpose: String,
    pub duration: Minute,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl ScheduleSnapshot {
    /// The state a brand-new (or fully reset) planner starts from.
    pub fn factory_defaults() -> Self {
        Self {
            wake_time: DEFAULT_WAKE_TIME.to_string(),
            sleep_time: DEFAULT_SLEEP_TIME.to_string(),
            blocks: Vec::new(),
            day_is_set: false,
            dark_mode: false,
        }
    }

    pub fn from_model(model: &ScheduleModel, dark_mode: bool) -> Self {
        let (wake_time, sleep_time) = match model.window() {
            Some(window) => (
                clock::to_clock(window.wake()),
                clock::to_clock(window.sleep()),
            ),
            None => (
                DEFAULT_WAKE_TIME.to_string(),
                DEFAULT_SLEEP_TIME.to_string(),
            ),
        };
        Self {
            wake_time,
            sleep_time,
            blocks: model.blocks().iter().map(BlockSnapshot::from_block).collect(),
            day_is_set: model.is_configured(),
            dark_mode,
        }
    }

    /// Rebuilds the in-memory model. The window is only configured when
    /// `dayIsSet` is true; the stored times otherwise remain defaults for the
    /// next setup. Blocks with one-sided anchor times are rejected.
    pub fn to_model(&self) -> Result<ScheduleModel, EngineError> {
        let window = if self.day_is_set {
            Some(DayWindow::parse(&self.wake_time, &self.sleep_time)?)
        } else {
            // Validate the stored times even when the day is not set up, so a
            // corrupted snapshot fails on load rather than on first use.
            clock::to_minutes(&self.wake_time)?;
            clock::to_minutes(&self.sleep_time)?;
            None
        };
        let blocks = self
            .blocks
            .iter()
            .map(BlockSnapshot::to_block)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScheduleModel::restore(window, blocks))
    }
}

impl BlockSnapshot {
    pub fn from_block(block: &Block) -> Self {
        let (start_time, end_time) = match block.schedule {
            Schedule::Anchored { start, end } => {
                (Some(clock::to_clock(start)), Some(clock::to_clock(end)))
            }
            Schedule::Floating => (None, None),
        };
        Self {
            id: block.id,
            purpose: block.purpose.clone(),
            duration: block.duration,
            start_time,
            end_time,
            tasks: block.tasks.clone(),
        }
    }

    pub fn to_block(&self) -> Result<Block, EngineError> {
        let schedule = match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => Schedule::Anchored {
                start: clock::to_minutes(start)?,
                end: clock::to_minutes(end)?,
            },
            (None, None) => Schedule::Floating,
            _ => {
                return Err(EngineError::InvalidImport(format!(
                    "block {} must set startTime and endTime together",
                    self.id
                )));
            }
        };
        Ok(Block {
            id: self.id,
            purpose: self.purpose.clone(),
            duration: self.duration,
            schedule,
            tasks: self.tasks.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> ScheduleSnapshot {
        ScheduleSnapshot {
            wake_time: "07:00".to_string(),
            sleep_time: "23:00".to_string(),
            blocks: vec![
                BlockSnapshot {
                    id: 1,
                    purpose: "Morning Routine".to_string(),
                    duration: 90,
                    start_time: Some("08:00".to_string()),
                    end_time: Some("09:30".to_string()),
                    tasks: vec![Task {
                        id: 1,
                        text: "Brush teeth".to_string(),
                        completed: true,
                        notes: "**Important** notes".to_string(),
                    }],
                },
                BlockSnapshot {
                    id: 2,
                    purpose: "Work Block".to_string(),
                    duration: 120,
                    start_time: None,
                    end_time: None,
                    tasks: Vec::new(),
                },
            ],
            day_is_set: true,
            dark_mode: false,
        }
    }

    #[test]
    fn snapshot_serde_round_trips() {
        let snapshot = sample_snapshot();
        let raw = serde_json::to_string(&snapshot).expect("serialize");
        let restored: ScheduleSnapshot = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn snapshot_uses_camel_case_and_omits_absent_anchors() {
        let raw = serde_json::to_string(&sample_snapshot()).expect("serialize");
        assert!(raw.contains("\"wakeTime\""));
        assert!(raw.contains("\"sleepTime\""));
        assert!(raw.contains("\"startTime\":\"08:00\""));
        // The floating block must not serialize null anchor fields
        assert_eq!(raw.matches("startTime").count(), 1);
    }

    #[test]
    fn missing_flags_default_to_false() {
        let raw = r#"{"wakeTime":"07:00","sleepTime":"23:00","blocks":[]}"#;
        let snapshot: ScheduleSnapshot = serde_json::from_str(raw).expect("deserialize");
        assert!(!snapshot.day_is_set);
        assert!(!snapshot.dark_mode);
    }

    #[test]
    fn model_round_trip_preserves_window_and_blocks() {
        let snapshot = sample_snapshot();
        let model = snapshot.to_model().expect("to model");
        assert!(model.is_configured());
        assert_eq!(model.blocks().len(), 2);
        assert_eq!(
            model.blocks()[0].schedule.anchored_range(),
            Some((480, 570))
        );
        assert!(!model.blocks()[1].schedule.is_anchored());

        let back = ScheduleSnapshot::from_model(&model, false);
        assert_eq!(back, snapshot);
    }

    #[test]
    fn unset_day_restores_an_unconfigured_model() {
        let mut snapshot = sample_snapshot();
        snapshot.day_is_set = false;
        snapshot.blocks.clear();
        let model = snapshot.to_model().expect("to model");
        assert!(!model.is_configured());
    }

    #[test]
    fn one_sided_anchor_times_are_rejected() {
        let mut snapshot = sample_snapshot();
        snapshot.blocks[0].end_time = None;
        assert!(matches!(
            snapshot.to_model(),
            Err(EngineError::InvalidImport(_))
        ));
    }

    #[test]
    fn malformed_clock_strings_fail_on_load() {
        let mut snapshot = sample_snapshot();
        snapshot.wake_time = "7 am".to_string();
        assert!(matches!(snapshot.to_model(), Err(EngineError::Format(_))));
    }

    #[test]
    fn factory_defaults_match_the_first_run_state() {
        let defaults = ScheduleSnapshot::factory_defaults();
        assert_eq!(defaults.wake_time, "07:00");
        assert_eq!(defaults.sleep_time, "23:00");
        assert!(defaults.blocks.is_empty());
        assert!(!defaults.day_is_set);
        assert!(!defaults.dark_mode);
    }
}
