//! Best runs of the current process
//!
//! Kept in memory only; a new process starts with an empty board.

/// Runs kept on the board
pub const BOARD_SIZE: usize = 10;

/// A finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Gap pairs passed
    pub score: u32,
    /// Run length in ticks
    pub ticks: u64,
}

/// Finished runs, highest score first
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    runs: Vec<Run>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run and return its 1-based place on the board
    ///
    /// Scoreless runs and runs below a full board are dropped. A run tying an
    /// existing score is placed after it.
    pub fn record(&mut self, run: Run) -> Option<usize> {
        if run.score == 0 {
            return None;
        }
        let place = self.runs.partition_point(|r| r.score >= run.score);
        if place >= BOARD_SIZE {
            return None;
        }
        self.runs.insert(place, run);
        self.runs.truncate(BOARD_SIZE);
        Some(place + 1)
    }

    pub fn best(&self) -> Option<u32> {
        self.runs.first().map(|r| r.score)
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u32) -> Run {
        Run {
            score,
            ticks: u64::from(score) * 30,
        }
    }

    #[test]
    fn test_scoreless_run_is_dropped() {
        let mut board = HighScores::new();
        assert_eq!(board.record(run(0)), None);
        assert!(board.is_empty());
        assert_eq!(board.best(), None);
    }

    #[test]
    fn test_places_and_ties() {
        let mut board = HighScores::new();
        assert_eq!(board.record(run(3)), Some(1));
        assert_eq!(board.record(run(7)), Some(1));
        assert_eq!(board.record(run(5)), Some(2));
        let tie = Run { score: 5, ticks: 1 };
        assert_eq!(board.record(tie), Some(3));

        let scores: Vec<u32> = board.runs().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![7, 5, 5, 3]);
        assert_eq!(board.runs()[2], tie);
        assert_eq!(board.best(), Some(7));
    }

    #[test]
    fn test_full_board_drops_the_lowest() {
        let mut board = HighScores::new();
        for score in (1..=BOARD_SIZE as u32).map(|s| s * 10) {
            board.record(run(score));
        }
        assert_eq!(board.record(run(10)), None);
        assert_eq!(board.record(run(15)), Some(BOARD_SIZE));

        assert_eq!(board.runs().len(), BOARD_SIZE);
        assert_eq!(board.runs().last().map(|r| r.score), Some(15));
        assert_eq!(board.best(), Some(100));
    }
}
