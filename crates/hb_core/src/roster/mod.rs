//! Roster construction and role assignment.
//!
//! Three stages, each deterministic for identical inputs:
//! - `generation`: seed + team name -> populated player pool
//! - `levels`: partition the pool into roster tiers by overall rating
//! - `roles`: fill rotation/closer/setup slots from one tier's pitchers
//!
//! `lineup` derives a batting order and defensive assignment from the
//! finished roster at game time.

pub mod generation;
pub mod levels;
pub mod lineup;
pub mod roles;

use serde::{Deserialize, Serialize};

/// Level-assignment configuration. The defaults promote the top 15 pitchers
/// and top 16 batters to the majors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RosterConfig {
    pub majors_pitchers: usize,
    pub majors_batters: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self { majors_pitchers: 15, majors_batters: 16 }
    }
}

pub use generation::{generate_league, generate_team};
pub use levels::assign_levels;
pub use lineup::{build_lineup, Lineup, LineupSlot};
pub use roles::{assign_pitching_roles, bullpen_score, rotation_score};
