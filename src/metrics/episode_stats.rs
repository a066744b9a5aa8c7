//! Rolling statistics over finished agent episodes

use std::collections::VecDeque;

/// Summary of one finished episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeRecord {
    /// Sum of step rewards
    pub reward: i64,
    /// Steps taken, the fatal one included
    pub frames: u32,
    pub score: u32,
}

/// Episode tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use grid_snake::metrics::{EpisodeRecord, EpisodeStats};
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record(EpisodeRecord { reward: 20, frames: 150, score: 3 });
///
/// assert_eq!(stats.total_episodes(), 1);
/// assert_eq!(stats.best_score(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    window: VecDeque<EpisodeRecord>,
    window_size: usize,
    total_episodes: usize,
    total_frames: u64,
    best_score: u32,
}

impl EpisodeStats {
    /// Create a tracker that averages over the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            window: VecDeque::with_capacity(window_size),
            window_size,
            total_episodes: 0,
            total_frames: 0,
            best_score: 0,
        }
    }

    pub fn record(&mut self, record: EpisodeRecord) {
        if self.window.len() >= self.window_size {
            self.window.pop_front();
        }
        self.window.push_back(record);

        self.total_episodes += 1;
        self.total_frames += record.frames as u64;
        self.best_score = self.best_score.max(record.score);
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Best score over every episode, not just the window
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn mean_reward(&self) -> f32 {
        self.mean(|r| r.reward as f32)
    }

    pub fn mean_score(&self) -> f32 {
        self.mean(|r| r.score as f32)
    }

    pub fn mean_frames(&self) -> f32 {
        self.mean(|r| r.frames as f32)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Frames: {} | Best: {} | Score: {:.2} | Reward: {:.2} | Len: {:.1}",
            self.total_episodes,
            self.total_frames,
            self.best_score,
            self.mean_score(),
            self.mean_reward(),
            self.mean_frames(),
        )
    }

    fn mean(&self, value: impl Fn(&EpisodeRecord) -> f32) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.window.iter().map(value).sum::<f32>() / self.window.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(reward: i64, frames: u32, score: u32) -> EpisodeRecord {
        EpisodeRecord {
            reward,
            frames,
            score,
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = EpisodeStats::new(10);
        assert_eq!(stats.total_episodes(), 0);
        assert_eq!(stats.mean_reward(), 0.0);
        assert_eq!(stats.mean_score(), 0.0);
        assert_eq!(stats.mean_frames(), 0.0);
    }

    #[test]
    fn test_rolling_window_evicts_oldest() {
        let mut stats = EpisodeStats::new(2);
        stats.record(episode(-10, 10, 0));
        stats.record(episode(10, 20, 2));
        stats.record(episode(30, 30, 4));

        assert_eq!(stats.total_episodes(), 3);
        assert_eq!(stats.total_frames(), 60);
        // Only the last two episodes are averaged
        assert!((stats.mean_score() - 3.0).abs() < 1e-5);
        assert!((stats.mean_reward() - 20.0).abs() < 1e-5);
        assert!((stats.mean_frames() - 25.0).abs() < 1e-5);
    }

    #[test]
    fn test_best_score_outlives_window() {
        let mut stats = EpisodeStats::new(1);
        stats.record(episode(70, 300, 8));
        stats.record(episode(-10, 5, 0));
        assert_eq!(stats.best_score(), 8);
        assert_eq!(stats.mean_score(), 0.0);
    }

    #[test]
    fn test_format_summary() {
        let mut stats = EpisodeStats::new(100);
        stats.record(episode(20, 150, 3));

        let summary = stats.format_summary();
        assert!(summary.contains("Episodes: 1"));
        assert!(summary.contains("Frames: 150"));
        assert!(summary.contains("Best: 3"));
        assert!(summary.contains("Score: 3.00"));
        assert!(summary.contains("Reward: 20.00"));
        assert!(summary.contains("Len: 150.0"));
    }
}
