//! # hb_core - Deterministic Baseball Season Simulation Engine
//!
//! This library provides a season-long baseball simulation core: roster
//! construction and role assignment, balanced season scheduling, and a
//! pitch-by-pitch game state machine, with a JSON API for easy integration
//! with host applications.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same result)
//! - Pitch-level at-bat resolution driven by player ratings
//! - Single-step surface for live game display, or run-to-completion
//! - Round-parallel season simulation with bit-identical aggregates

// Game engine APIs juggle many ratings and indices per call.
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod roster;
pub mod scheduler;
pub mod season;

// Re-export main API functions
pub use api::{generate_league_json, simulate_game_json};
pub use error::{Result, SimError};

// Re-export the model surface
pub use models::{
    BattingRatings, FieldingRatings, GameResult, HomeRunEvent, League, PitchingRatings, Player,
    PlayerId, Position, RosterLevel, RosterStatus, Schedule, Team, TeamSide,
};

// Re-export the game engine surface
pub use engine::{GameEngine, GamePhase, GamePlan, GameState, HalfInning, PitchEvent, PlayOutcome};

// Re-export roster and season orchestration
pub use roster::{assign_levels, assign_pitching_roles, build_lineup, RosterConfig};
pub use scheduler::{build_schedule, ScheduleConfig};
pub use season::{Season, SeasonConfig, SeasonStats, Standings, TeamRepository};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
