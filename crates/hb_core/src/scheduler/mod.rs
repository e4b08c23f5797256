//! Season schedule generation.
//!
//! A balanced double round-robin inside each league (circle method, mirrored
//! second cycle) plus a configured quota of inter-league rounds, interleaved
//! so no team plays twice in the same round. Generation is reproducible:
//! pairing structure and game counts never depend on randomness, and the
//! optional home/away seed only swaps both legs of a pair together, which
//! leaves every balance property intact.

mod round_robin;

use serde::{Deserialize, Serialize};

pub use round_robin::build_schedule;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Number of inter-league rounds. Every team plays one inter-league game
    /// per such round, so this is also the per-team inter-league game count
    /// (and the worst-case home/away imbalance).
    pub interleague_rounds: u32,
    /// When set, home/away sides of each intra-league pairing are flipped by
    /// a seeded coin toss. Pairing structure and counts are unaffected.
    pub home_away_seed: Option<u64>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { interleague_rounds: 4, home_away_seed: None }
    }
}
