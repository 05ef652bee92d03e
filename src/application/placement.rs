use crate::domain::clock::Minute;
use crate::domain::models::{Block, BlockId, Schedule};
use crate::domain::window::DayWindow;
use std::cmp::Ordering;

/// The derived position of a block for one window/block-list combination.
/// Recomputed on every query; any block edit can shift every floating block
/// after it, so placements are never cached across mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBlock {
    pub id: BlockId,
    pub purpose: String,
    pub start: Minute,
    pub end: Minute,
}

/// Computes the effective start and end of every block.
///
/// Anchored blocks are walked in ascending start order and keep their stored
/// times. Floating blocks follow all anchored ones, keep their source order
/// relative to each other, and each consumes `duration` minutes starting at
/// the running cursor. An anchored block that ends before the cursor does not
/// retract it.
pub fn place(window: &DayWindow, blocks: &[Block]) -> Vec<PlacedBlock> {
    let mut ordered: Vec<&Block> = blocks.iter().collect();
    ordered.sort_by(|a, b| match (a.schedule, b.schedule) {
        (Schedule::Anchored { start: left, .. }, Schedule::Anchored { start: right, .. }) => {
            left.cmp(&right)
        }
        (Schedule::Anchored { .. }, Schedule::Floating) => Ordering::Less,
        (Schedule::Floating, Schedule::Anchored { .. }) => Ordering::Greater,
        (Schedule::Floating, Schedule::Floating) => Ordering::Equal,
    });

    let mut placed = Vec::with_capacity(ordered.len());
    let mut cursor = window.wake();
    for block in ordered {
        let (start, end) = match block.schedule {
            Schedule::Anchored { start, end } => {
                if end > cursor {
                    cursor = end;
                }
                (start, end)
            }
            Schedule::Floating => {
                let start = cursor;
                cursor += block.duration;
                (start, cursor)
            }
        };
        placed.push(PlacedBlock {
            id: block.id,
            purpose: block.purpose.clone(),
            start,
            end,
        });
    }
    placed
}

/// The range a new floating block appended to `blocks` would occupy: the
/// cursor left after placing everything, plus the requested duration.
pub fn next_floating_slot(
    window: &DayWindow,
    blocks: &[Block],
    duration: Minute,
) -> (Minute, Minute) {
    let cursor = place(window, blocks)
        .iter()
        .map(|placed| placed.end)
        .max()
        .map_or(window.wake(), |end| end.max(window.wake()));
    (cursor, cursor + duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn window() -> DayWindow {
        DayWindow::parse("07:00", "23:00").expect("valid window")
    }

    #[test]
    fn anchored_blocks_keep_their_stored_times() {
        let blocks = vec![
            Block::anchored(1, "Morning", 480, 600),
            Block::anchored(2, "Lunch", 720, 780),
        ];
        let placed = place(&window(), &blocks);
        assert_eq!(placed[0].start, 480);
        assert_eq!(placed[0].end, 600);
        assert_eq!(placed[1].start, 720);
        assert_eq!(placed[1].end, 780);
    }

    #[test]
    fn floating_block_follows_latest_anchored_end() {
        // Morning 08:00-09:30, Work floats for two hours afterwards
        let blocks = vec![
            Block::anchored(1, "Morning", 480, 570),
            Block::floating(2, "Work", 120),
        ];
        let placed = place(&window(), &blocks);
        assert_eq!(placed[1].start, 570);
        assert_eq!(placed[1].end, 690);
    }

    #[test]
    fn anchored_sorts_before_floating_regardless_of_list_order() {
        let blocks = vec![
            Block::floating(1, "Work", 120),
            Block::anchored(2, "Morning", 480, 570),
        ];
        let placed = place(&window(), &blocks);
        assert_eq!(placed[0].id, 2);
        assert_eq!(placed[1].id, 1);
        assert_eq!(placed[1].start, 570);
    }

    #[test]
    fn floating_blocks_keep_source_order() {
        let blocks = vec![
            Block::floating(1, "First", 30),
            Block::floating(2, "Second", 45),
            Block::floating(3, "Third", 60),
        ];
        let placed = place(&window(), &blocks);
        assert_eq!(
            placed.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(placed[0].start, 420);
        assert_eq!(placed[1].start, 450);
        assert_eq!(placed[2].start, 495);
    }

    #[test]
    fn early_anchored_block_does_not_retract_cursor() {
        // Lunch ends at 13:00; the 08:00-09:00 block sorts first but the
        // floating block must still start at 13:00.
        let blocks = vec![
            Block::anchored(1, "Lunch", 720, 780),
            Block::anchored(2, "Early", 480, 540),
            Block::floating(3, "Afternoon", 90),
        ];
        let placed = place(&window(), &blocks);
        assert_eq!(placed[2].start, 780);
        assert_eq!(placed[2].end, 870);
    }

    #[test]
    fn gap_between_anchored_blocks_is_preserved() {
        let blocks = vec![
            Block::anchored(1, "Morning", 480, 600),
            Block::anchored(2, "Lunch", 720, 780),
            Block::floating(3, "Sequential", 90),
        ];
        let placed = place(&window(), &blocks);
        // The floating block lands after lunch, not in the 10:00-12:00 gap.
        assert_eq!(placed[2].start, 780);
    }

    #[test]
    fn next_floating_slot_starts_at_wake_for_empty_schedule() {
        assert_eq!(next_floating_slot(&window(), &[], 60), (420, 480));
    }

    #[test]
    fn next_floating_slot_follows_existing_blocks() {
        let blocks = vec![
            Block::anchored(1, "Morning", 480, 570),
            Block::floating(2, "Work", 120),
        ];
        assert_eq!(next_floating_slot(&window(), &blocks, 60), (690, 750));
    }

    proptest! {
        #[test]
        fn floating_chain_places_at_duration_prefix_sums(
            durations in proptest::collection::vec(1u32..240, 1..8)
        ) {
            let day = window();
            let blocks: Vec<Block> = durations
                .iter()
                .enumerate()
                .map(|(index, duration)| Block::floating(index as u64 + 1, "Chain", *duration))
                .collect();

            let placed = place(&day, &blocks);
            let mut expected_start = day.wake();
            for (slot, duration) in placed.iter().zip(&durations) {
                prop_assert_eq!(slot.start, expected_start);
                prop_assert_eq!(slot.end, expected_start + duration);
                expected_start += duration;
            }
            prop_assert_eq!(
                placed.last().expect("non-empty").end,
                day.wake() + durations.iter().sum::<u32>()
            );
        }
    }
}
