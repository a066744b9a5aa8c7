pub mod episode_stats;
pub mod game_metrics;

pub use episode_stats::{EpisodeRecord, EpisodeStats};
pub use game_metrics::{EpisodeTally, GameMetrics};
