use std::time::{Duration, Instant};

/// Finished episodes in a multi-episode session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpisodeTally {
    pub finished: u32,
    pub best_score: u32,
}

/// Figures shown in the terminal header next to the score
///
/// The clock covers the game in progress. A keyboard session is a single game,
/// so only multi-episode sessions carry an [`EpisodeTally`].
#[derive(Debug, Clone)]
pub struct GameMetrics {
    clock_start: Instant,
    elapsed: Duration,
    tally: Option<EpisodeTally>,
}

impl GameMetrics {
    /// Clock only
    pub fn single_game() -> Self {
        Self {
            clock_start: Instant::now(),
            elapsed: Duration::ZERO,
            tally: None,
        }
    }

    /// Clock plus a tally of finished episodes
    pub fn episodes() -> Self {
        Self {
            tally: Some(EpisodeTally::default()),
            ..Self::single_game()
        }
    }

    pub fn tick(&mut self) {
        self.elapsed = self.clock_start.elapsed();
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn tally(&self) -> Option<EpisodeTally> {
        self.tally
    }

    /// Count a finished episode and restart the clock for the next one
    pub fn finish_episode(&mut self, score: u32) {
        if let Some(tally) = self.tally.as_mut() {
            tally.finished += 1;
            tally.best_score = tally.best_score.max(score);
        }
        self.clock_start = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    /// Elapsed time as `mm:ss`
    pub fn clock_label(&self) -> String {
        let secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
