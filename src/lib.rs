//! ChronoBlock: the scheduling engine behind a single-day time planner.
//!
//! A day bounded by wake and sleep times is partitioned into activity blocks,
//! either anchored to explicit times or floated sequentially after whatever
//! precedes them. The engine converts clock strings to a linear minute axis,
//! resolves effective block placements, and decides whether a candidate range
//! conflicts with existing commitments. Rendering and input capture stay with
//! the caller; persistence goes through the `StateRepository` boundary.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::placement::{PlacedBlock, next_floating_slot, place};
pub use application::schedule::{BlockPatch, ScheduleModel};
pub use application::session::PlannerSession;
pub use application::validation::{ConflictResult, check};
pub use domain::clock::{MINUTES_PER_DAY, Minute, format_duration, to_clock, to_minutes};
pub use domain::models::{Block, BlockId, Schedule, Task, TaskId};
pub use domain::window::DayWindow;
pub use infrastructure::error::EngineError;
pub use infrastructure::export::{APP_NAME, EXPORT_VERSION, ExportEnvelope, export_state, parse_import};
pub use infrastructure::snapshot::{BlockSnapshot, ScheduleSnapshot};
pub use infrastructure::storage::{
    InMemoryStateRepository, JsonFileStateRepository, StateRepository,
};
