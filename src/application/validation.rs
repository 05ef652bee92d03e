use crate::application::placement::PlacedBlock;
use crate::domain::clock::Minute;
use crate::domain::models::BlockId;
use crate::domain::window::DayWindow;

/// Outcome of validating a candidate range against the placed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResult {
    NoConflict,
    OutOfSchedule,
    Overlaps(BlockId),
}

impl ConflictResult {
    pub fn is_clean(self) -> bool {
        matches!(self, Self::NoConflict)
    }
}

/// Checks a candidate range for schedule membership and overlap.
///
/// Ranges are half-open for the overlap test: a candidate that starts exactly
/// where a block ends (or ends exactly where one starts) does not conflict.
/// When several blocks conflict, the first one in placement order is reported.
pub fn check(
    window: &DayWindow,
    candidate: (Minute, Minute),
    placed: &[PlacedBlock],
    excluding: Option<BlockId>,
) -> ConflictResult {
    let (start, end) = candidate;
    if !window.contains(start, end) {
        return ConflictResult::OutOfSchedule;
    }
    for block in placed {
        if Some(block.id) == excluding {
            continue;
        }
        if start < block.end && end > block.start {
            return ConflictResult::Overlaps(block.id);
        }
    }
    ConflictResult::NoConflict
}
