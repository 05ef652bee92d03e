use crate::application::placement::{self, PlacedBlock};
use crate::application::validation::{self, ConflictResult};
use crate::domain::clock::Minute;
use crate::domain::models::{Block, BlockId, Schedule, Task};
use crate::domain::window::DayWindow;
use crate::infrastructure::error::EngineError;

/// The single-day schedule aggregate: an optional day window plus the ordered
/// block list. Insertion order is the "precedes" ordering used when floating
/// blocks are resolved.
///
/// The model starts unset; `set_window` moves it to its configured working
/// state. Mutations go through the `propose_*` methods, which only commit a
/// validator-clean change. The model never repairs blocks that a later
/// `set_window` or edit made invalid; callers re-run validation instead.
#[derive(Debug, Clone, Default)]
pub struct ScheduleModel {
    window: Option<DayWindow>,
    blocks: Vec<Block>,
}

/// Partial update for `propose_edit`; absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct BlockPatch {
    pub purpose: Option<String>,
    pub duration: Option<Minute>,
    pub schedule: Option<Schedule>,
    pub tasks: Option<Vec<Task>>,
}

impl ScheduleModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a model from trusted, previously persisted data.
    pub fn restore(window: Option<DayWindow>, blocks: Vec<Block>) -> Self {
        Self { window, blocks }
    }

    pub fn is_configured(&self) -> bool {
        self.window.is_some()
    }

    pub fn window(&self) -> Option<&DayWindow> {
        self.window.as_ref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// Configures or re-configures the day window. Existing blocks are kept
    /// as-is; a tighter window can leave previously valid blocks in conflict,
    /// which surfaces on the next validation rather than being auto-repaired.
    pub fn set_window(&mut self, wake: &str, sleep: &str) -> Result<(), EngineError> {
        self.window = Some(DayWindow::parse(wake, sleep)?);
        Ok(())
    }

    fn require_window(&self) -> Result<&DayWindow, EngineError> {
        self.window.as_ref().ok_or(EngineError::WindowNotSet)
    }

    pub fn placements(&self) -> Result<Vec<PlacedBlock>, EngineError> {
        Ok(placement::place(self.require_window()?, &self.blocks))
    }

    /// Validates an arbitrary candidate range against the current placements,
    /// optionally ignoring one block (the one being edited).
    pub fn validate_range(
        &self,
        start: Minute,
        end: Minute,
        excluding: Option<BlockId>,
    ) -> Result<ConflictResult, EngineError> {
        let window = self.require_window()?;
        let placed = placement::place(window, &self.blocks);
        Ok(validation::check(window, (start, end), &placed, excluding))
    }

    /// Adds a block if its intended range is conflict-free. Anchored blocks
    /// are checked at their stored times; floating blocks at the slot they
    /// would float into when appended.
    pub fn propose_add(&mut self, block: Block) -> Result<(), EngineError> {
        let window = self.require_window()?;
        block.validate().map_err(EngineError::InvalidBlock)?;
        if self.blocks.iter().any(|existing| existing.id == block.id) {
            return Err(EngineError::InvalidBlock(format!(
                "block.id {} already exists",
                block.id
            )));
        }

        let candidate = match block.schedule {
            Schedule::Anchored { start, end } => (start, end),
            Schedule::Floating => {
                placement::next_floating_slot(window, &self.blocks, block.duration)
            }
        };
        let placed = placement::place(window, &self.blocks);
        match validation::check(window, candidate, &placed, None) {
            ConflictResult::NoConflict => {
                self.blocks.push(block);
                Ok(())
            }
            ConflictResult::OutOfSchedule => Err(EngineError::OutOfSchedule),
            ConflictResult::Overlaps(id) => Err(EngineError::Overlaps(id)),
        }
    }

    /// Applies a patch to a block if the patched schedule stays conflict-free.
    /// The target is excluded from the conflict scan but participates, with
    /// its patched fields, in the placement of everything after it.
    pub fn propose_edit(&mut self, id: BlockId, patch: BlockPatch) -> Result<(), EngineError> {
        let window = *self.require_window()?;
        let index = self
            .blocks
            .iter()
            .position(|block| block.id == id)
            .ok_or(EngineError::UnknownBlock(id))?;

        let mut patched = self.blocks.clone();
        let target = &mut patched[index];
        if let Some(purpose) = patch.purpose {
            target.purpose = purpose;
        }
        if let Some(duration) = patch.duration {
            target.duration = duration;
        }
        if let Some(schedule) = patch.schedule {
            target.schedule = schedule;
        }
        if let Some(tasks) = patch.tasks {
            target.tasks = tasks;
        }
        target.validate().map_err(EngineError::InvalidBlock)?;

        let placed = placement::place(&window, &patched);
        let candidate = placed
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| (slot.start, slot.end))
            .ok_or(EngineError::UnknownBlock(id))?;
        match validation::check(&window, candidate, &placed, Some(id)) {
            ConflictResult::NoConflict => {
                self.blocks = patched;
                Ok(())
            }
            ConflictResult::OutOfSchedule => Err(EngineError::OutOfSchedule),
            ConflictResult::Overlaps(other) => Err(EngineError::Overlaps(other)),
        }
    }

    /// Removes a block unconditionally. Floating blocks after it re-flow on
    /// the next placement query. Returns whether anything was removed.
    pub fn remove(&mut self, id: BlockId) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|block| block.id != id);
        self.blocks.len() != before
    }

    pub fn allocated_minutes(&self) -> Minute {
        self.blocks.iter().map(|block| block.duration).sum()
    }

    pub fn remaining_minutes(&self) -> Result<Minute, EngineError> {
        let total = self.require_window()?.total_minutes();
        Ok(total.saturating_sub(self.allocated_minutes()))
    }
}
