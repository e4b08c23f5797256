//! Game simulation engine.
//!
//! Layered the same way top to bottom:
//! - `tuning` / `probability`: stateless constants and math
//! - `deterministic`: hash-based selection that costs no RNG draws
//! - `at_bat`: one-pitch resolution against the current matchup
//! - `game`: the stateful game state machine and step surface
//! - `substitutions`: reliever changes at half-inning boundaries
//! - `stats`: box score accumulation

pub mod at_bat;
pub mod deterministic;
pub mod game;
pub mod probability;
pub mod stats;
pub mod substitutions;
pub mod tuning;

pub use at_bat::{PitchEvent, PlayOutcome};
pub use deterministic::{deterministic_choice, subcase};
pub use game::{GameEngine, GamePhase, GamePlan, GameState, HalfInning};
pub use probability::BattedBallType;
pub use stats::BoxAccumulator;
