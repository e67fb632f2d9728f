//! Running score state.
//!
//! The score is a single integer. Every time a shape's overlap with a score
//! band begins the band's value is added; when the overlap ends the same
//! value is subtracted. Restarting the game zeroes it.

use serde::{Deserialize, Serialize};

/// The running score and its overlap bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    score: i64,
    /// Number of band overlaps currently active.
    active_overlaps: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Number of shape/band overlaps in progress.
    pub fn active_overlaps(&self) -> u32 {
        self.active_overlaps
    }

    /// Records the start of an overlap with a band worth `points`.
    /// Returns the new score.
    pub fn overlap_started(&mut self, points: i64) -> i64 {
        self.score += points;
        self.active_overlaps += 1;
        self.score
    }

    /// Records the end of an overlap with a band worth `points`.
    /// Returns the new score.
    pub fn overlap_ended(&mut self, points: i64) -> i64 {
        self.score -= points;
        self.active_overlaps = self.active_overlaps.saturating_sub(1);
        self.score
    }

    /// Zeroes the score for a restart.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let board = ScoreBoard::new();
        assert_eq!(board.score(), 0);
        assert_eq!(board.active_overlaps(), 0);
    }

    #[test]
    fn test_overlap_start_and_end_cancel_out() {
        let mut board = ScoreBoard::new();

        board.overlap_started(1000);
        assert_eq!(board.score(), 1000);
        assert_eq!(board.active_overlaps(), 1);

        board.overlap_ended(1000);
        assert_eq!(board.score(), 0);
        assert_eq!(board.active_overlaps(), 0);
    }

    #[test]
    fn test_simultaneous_overlaps_accumulate() {
        let mut board = ScoreBoard::new();

        // A tall shape crossing two bands at once contributes both values.
        board.overlap_started(10);
        board.overlap_started(1000);
        assert_eq!(board.score(), 1010);
        assert_eq!(board.active_overlaps(), 2);

        board.overlap_ended(10);
        assert_eq!(board.score(), 1000);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut board = ScoreBoard::new();
        board.overlap_started(5000);
        board.overlap_started(2000);

        board.reset();
        assert_eq!(board.score(), 0);
        assert_eq!(board.active_overlaps(), 0);
    }
}
