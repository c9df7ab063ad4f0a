//! In-memory lane model for the reorderable card strips.
//!
//! The two lanes (source pool and sorting target) own the card order; the DOM
//! is a projection of this model, never the other way round. The drag adapter
//! in `ui` funnels every reorder through a single `move_to` operation, which
//! keeps the algorithm testable without a browser.

/// The two drop zones of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneId {
    /// Shuffled pool the round starts with.
    Source,
    /// The strip whose order gets judged.
    Target,
}

/// Ordered card ranks per lane.
///
/// Invariant: a rank dealt into the model lives in exactly one lane at any
/// time. `move_to` upholds this by always detaching before inserting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lanes {
    source: Vec<u32>,
    target: Vec<u32>,
}

impl Lanes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a round: the freshly shuffled deck fills the source lane and the
    /// target lane is emptied.
    pub fn deal(&mut self, deck: &[u32]) {
        self.source.clear();
        self.source.extend_from_slice(deck);
        self.target.clear();
    }

    pub fn order(&self, lane: LaneId) -> &[u32] {
        match lane {
            LaneId::Source => &self.source,
            LaneId::Target => &self.target,
        }
    }

    /// Which lane currently holds `rank`, if any.
    pub fn lane_of(&self, rank: u32) -> Option<LaneId> {
        if self.source.contains(&rank) {
            Some(LaneId::Source)
        } else if self.target.contains(&rank) {
            Some(LaneId::Target)
        } else {
            None
        }
    }

    /// Move `rank` to position `index` of `lane`, detaching it from wherever
    /// it currently sits. `index` is clamped to the lane length, so an empty
    /// lane accepts the card unconditionally at the end. Unknown ranks are
    /// ignored.
    pub fn move_to(&mut self, rank: u32, lane: LaneId, index: usize) -> bool {
        let detached = {
            let mut found = false;
            for v in [&mut self.source, &mut self.target] {
                if let Some(pos) = v.iter().position(|&r| r == rank) {
                    v.remove(pos);
                    found = true;
                    break;
                }
            }
            found
        };
        if !detached {
            return false;
        }
        let dest = match lane {
            LaneId::Source => &mut self.source,
            LaneId::Target => &mut self.target,
        };
        let at = index.min(dest.len());
        dest.insert(at, rank);
        true
    }

    /// Drain the target lane (after a correct check the placed cards leave
    /// play rather than returning to the source pool).
    pub fn take_target(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.target)
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty() && self.target.is_empty()
    }
}

/// Insertion point for a dragged tile hovering at `pointer_x`.
///
/// `midpoints` are the horizontal centers of the non-lifted tiles in lane
/// order. The dragged tile lands immediately before the first tile whose
/// midpoint lies ahead of the pointer; if none does (including the empty
/// lane), it lands at the end.
pub fn insertion_index(pointer_x: f64, midpoints: &[f64]) -> usize {
    midpoints
        .iter()
        .position(|&mid| pointer_x < mid)
        .unwrap_or(midpoints.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_fills_source_and_clears_target() {
        let mut lanes = Lanes::new();
        lanes.move_to(9, LaneId::Target, 0); // unknown rank, ignored
        lanes.deal(&[3, 1, 2]);
        assert_eq!(lanes.order(LaneId::Source), &[3, 1, 2]);
        assert!(lanes.order(LaneId::Target).is_empty());
    }

    #[test]
    fn move_within_lane_reorders() {
        let mut lanes = Lanes::new();
        lanes.deal(&[1, 2, 3, 4]);
        assert!(lanes.move_to(4, LaneId::Source, 0));
        assert_eq!(lanes.order(LaneId::Source), &[4, 1, 2, 3]);
        assert!(lanes.move_to(4, LaneId::Source, 2));
        assert_eq!(lanes.order(LaneId::Source), &[1, 2, 4, 3]);
    }

    #[test]
    fn move_across_lanes_detaches_first() {
        let mut lanes = Lanes::new();
        lanes.deal(&[1, 2, 3]);
        assert!(lanes.move_to(2, LaneId::Target, 0));
        assert!(lanes.move_to(1, LaneId::Target, 1));
        assert_eq!(lanes.order(LaneId::Source), &[3]);
        assert_eq!(lanes.order(LaneId::Target), &[2, 1]);
        assert_eq!(lanes.lane_of(2), Some(LaneId::Target));
        assert_eq!(lanes.lane_of(3), Some(LaneId::Source));
        // Every dealt rank is still in exactly one lane.
        let total = lanes.order(LaneId::Source).len() + lanes.order(LaneId::Target).len();
        assert_eq!(total, 3);
    }

    #[test]
    fn move_index_clamps_to_lane_end() {
        let mut lanes = Lanes::new();
        lanes.deal(&[1, 2]);
        assert!(lanes.move_to(1, LaneId::Target, 99));
        assert_eq!(lanes.order(LaneId::Target), &[1]);
    }

    #[test]
    fn unknown_rank_is_rejected() {
        let mut lanes = Lanes::new();
        lanes.deal(&[1]);
        assert!(!lanes.move_to(42, LaneId::Target, 0));
        assert!(lanes.order(LaneId::Target).is_empty());
    }

    #[test]
    fn take_target_drains() {
        let mut lanes = Lanes::new();
        lanes.deal(&[1, 2]);
        lanes.move_to(1, LaneId::Target, 0);
        lanes.move_to(2, LaneId::Target, 1);
        assert_eq!(lanes.take_target(), vec![1, 2]);
        assert!(lanes.order(LaneId::Target).is_empty());
        assert!(lanes.order(LaneId::Source).is_empty());
    }

    #[test]
    fn insertion_index_empty_lane_is_end() {
        assert_eq!(insertion_index(150.0, &[]), 0);
    }

    #[test]
    fn insertion_index_before_first_midpoint() {
        assert_eq!(insertion_index(10.0, &[50.0, 150.0, 250.0]), 0);
    }

    #[test]
    fn insertion_index_between_midpoints() {
        assert_eq!(insertion_index(120.0, &[50.0, 150.0, 250.0]), 1);
        assert_eq!(insertion_index(200.0, &[50.0, 150.0, 250.0]), 2);
    }

    #[test]
    fn insertion_index_past_all_midpoints() {
        assert_eq!(insertion_index(400.0, &[50.0, 150.0, 250.0]), 3);
    }

    #[test]
    fn insertion_index_on_exact_midpoint_goes_after() {
        // A pointer sitting exactly on a midpoint is not "before" that tile.
        assert_eq!(insertion_index(150.0, &[50.0, 150.0]), 2);
    }
}
