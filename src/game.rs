//! Round state machine: start / tick / check / end.
//!
//! `GameSession` is deliberately DOM-free so the whole flow runs under native
//! `cargo test`. The `ui` module owns the countdown `Interval` and feeds
//! `tick()` once per second; it also reads the target lane out of the lane
//! model and passes it to `check()`.

use crate::catalog::CATALOG;

/// Seconds on the clock at the start of every round.
pub const ROUND_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeExpired,
    WrongOrder,
}

impl EndReason {
    /// Player-facing game-over line.
    pub fn message(self) -> &'static str {
        match self {
            EndReason::TimeExpired => "Time's up!",
            EndReason::WrongOrder => "Incorrect order.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick arrived outside a running round (stray timer callback); ignored.
    Ignored,
    Running,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Check requested outside a running round; ignored.
    Ignored,
    /// Target lane was empty; instructional nudge, state unchanged.
    NothingPlaced,
    /// Sequence was ascending; `gained` points awarded, round continues.
    Correct { gained: u32 },
    /// Sequence was out of order; round over. Carries the literal sequence
    /// for the failure message.
    Wrong { placed: Vec<u32> },
}

/// Mutable state of one play-through.
#[derive(Debug, Clone)]
pub struct GameSession {
    phase: Phase,
    score: u32,
    remaining_secs: u32,
    deck: Vec<u32>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
            remaining_secs: ROUND_SECS,
            deck: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// The shuffled deck of the current round, as ranks.
    pub fn deck(&self) -> &[u32] {
        &self.deck
    }

    /// Start (or restart) a round: zero score, full clock, fresh uniformly
    /// shuffled deck drawn from the catalog.
    pub fn start(&mut self) {
        self.score = 0;
        self.remaining_secs = ROUND_SECS;
        self.deck = shuffled_deck();
        self.phase = Phase::Running;
    }

    /// One-second countdown step. Suppressed outside `Running` so a stale
    /// timer callback cannot fire into a new round.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = Phase::Ended;
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    /// Judge the target-lane sequence. Success iff the placed ranks already
    /// equal their own ascending sort — partial correct prefixes count, the
    /// full catalog is never required.
    pub fn check(&mut self, placed: &[u32]) -> CheckOutcome {
        if self.phase != Phase::Running {
            return CheckOutcome::Ignored;
        }
        if placed.is_empty() {
            return CheckOutcome::NothingPlaced;
        }
        let mut sorted = placed.to_vec();
        sorted.sort_unstable();
        if placed == sorted.as_slice() {
            let gained = placed.len() as u32;
            self.score += gained;
            CheckOutcome::Correct { gained }
        } else {
            self.phase = Phase::Ended;
            CheckOutcome::Wrong {
                placed: placed.to_vec(),
            }
        }
    }

    /// Force the round over (used by the time-expiry path in the UI when it
    /// needs to end eagerly, and by tests).
    pub fn end(&mut self) {
        self.phase = Phase::Ended;
    }
}

/// Fresh uniform permutation of the catalog ranks (Fisher–Yates).
pub fn shuffled_deck() -> Vec<u32> {
    let mut deck: Vec<u32> = CATALOG.iter().map(|c| c.rank).collect();
    // Classic backwards Fisher–Yates; j uniform in 0..=i.
    for i in (1..deck.len()).rev() {
        let j = rand_below(i + 1);
        deck.swap(i, j);
    }
    deck
}

/// Uniform index in `0..bound` from OS / browser entropy. Modulo bias is
/// negligible for bounds this far below 2^64.
fn rand_below(bound: usize) -> usize {
    debug_assert!(bound > 0);
    let mut buf = [0u8; 8];
    if getrandom::getrandom(&mut buf).is_err() {
        return 0;
    }
    (u64::from_le_bytes(buf) % bound as u64) as usize
}

/// Format a placed sequence the way the failure message quotes it: `[3, 1, 2]`.
pub fn placed_literal(placed: &[u32]) -> String {
    let inner = placed
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_resets_everything() {
        let mut s = GameSession::new();
        s.start();
        s.check(&[1, 2]);
        s.tick();
        s.start();
        assert_eq!(s.score(), 0);
        assert_eq!(s.remaining_secs(), ROUND_SECS);
        assert!(s.is_running());
        assert_eq!(s.deck().len(), CATALOG.len());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let deck = shuffled_deck();
        let mut sorted = deck.clone();
        sorted.sort_unstable();
        let expected: Vec<u32> = (1..=CATALOG.len() as u32).collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn shuffle_differs_from_identity() {
        // 66! permutations; ten identity deals in a row would mean the RNG is
        // not wired up at all.
        let identity: Vec<u32> = (1..=CATALOG.len() as u32).collect();
        let some_shuffled = (0..10).any(|_| shuffled_deck() != identity);
        assert!(some_shuffled);
    }

    #[test]
    fn check_outside_running_is_ignored() {
        let mut s = GameSession::new();
        assert_eq!(s.check(&[1, 2]), CheckOutcome::Ignored);
        s.start();
        s.end();
        assert_eq!(s.check(&[1, 2]), CheckOutcome::Ignored);
    }

    #[test]
    fn check_empty_lane_nudges_without_state_change() {
        let mut s = GameSession::new();
        s.start();
        assert_eq!(s.check(&[]), CheckOutcome::NothingPlaced);
        assert!(s.is_running());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn check_correct_prefix_scores_and_continues() {
        let mut s = GameSession::new();
        s.start();
        assert_eq!(s.check(&[1, 2]), CheckOutcome::Correct { gained: 2 });
        assert_eq!(s.score(), 2);
        assert!(s.is_running());
        // Non-contiguous but ascending still counts.
        assert_eq!(s.check(&[5, 9, 40]), CheckOutcome::Correct { gained: 3 });
        assert_eq!(s.score(), 5);
    }

    #[test]
    fn check_wrong_order_ends_round() {
        let mut s = GameSession::new();
        s.start();
        let outcome = s.check(&[3, 1, 2]);
        assert_eq!(
            outcome,
            CheckOutcome::Wrong {
                placed: vec![3, 1, 2]
            }
        );
        assert_eq!(s.phase(), Phase::Ended);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn tick_counts_down_and_expires() {
        let mut s = GameSession::new();
        s.start();
        for _ in 0..ROUND_SECS - 1 {
            assert_eq!(s.tick(), TickOutcome::Running);
        }
        assert_eq!(s.tick(), TickOutcome::Expired);
        assert_eq!(s.phase(), Phase::Ended);
        // A stray callback after expiry is suppressed.
        assert_eq!(s.tick(), TickOutcome::Ignored);
    }

    #[test]
    fn tick_before_start_is_ignored() {
        let mut s = GameSession::new();
        assert_eq!(s.tick(), TickOutcome::Ignored);
        assert_eq!(s.remaining_secs(), ROUND_SECS);
    }

    #[test]
    fn placed_literal_formats_like_the_message() {
        assert_eq!(placed_literal(&[3, 1, 2]), "[3, 1, 2]");
        assert_eq!(placed_literal(&[7]), "[7]");
        assert_eq!(placed_literal(&[]), "[]");
    }

    #[test]
    fn end_reason_messages() {
        assert_eq!(EndReason::TimeExpired.message(), "Time's up!");
        assert_eq!(EndReason::WrongOrder.message(), "Incorrect order.");
    }
}
