//! Numeric constants for the outcome model.
//!
//! Everything the at-bat and game engines tune lives here, grouped by
//! concern. The probability layer consumes these; nothing else should.

/// Rating scale helpers.
pub mod ratings {
    pub const SCALE_MAX: f32 = 99.0;

    /// Normalize a 1-99 rating to 0.0-1.0.
    #[inline]
    pub fn normalize(value: u8) -> f32 {
        value as f32 / SCALE_MAX
    }

    /// Normalize and center on zero: -0.5..=0.5 around a league-average 50.
    #[inline]
    pub fn centered(value: u8) -> f32 {
        normalize(value) - 0.5
    }
}

/// Pitch-event distribution over {ball, strike, foul, in-play}.
pub mod pitch {
    pub const BASE_BALL: f32 = 0.34;
    pub const BASE_STRIKE: f32 = 0.26;
    pub const BASE_FOUL: f32 = 0.16;
    pub const BASE_IN_PLAY: f32 = 0.24;

    /// Per-weight floor/ceiling before renormalization.
    pub const WEIGHT_MIN: f32 = 0.04;
    pub const WEIGHT_MAX: f32 = 0.75;

    /// Count leverage: a three-ball count pulls the pitcher into the zone, a
    /// two-strike count has the batter spoiling pitches.
    pub const THREE_BALL_STRIKE_SHIFT: f32 = 0.06;
    pub const TWO_STRIKE_FOUL_SHIFT: f32 = 0.05;
}

/// Batted-ball type distribution over {ground, fly, line, home run}.
pub mod batted_ball {
    pub const BASE_GROUND: f32 = 0.42;
    pub const BASE_FLY: f32 = 0.30;
    pub const BASE_LINE: f32 = 0.20;
    pub const BASE_HOME_RUN: f32 = 0.045;

    pub const HOME_RUN_MIN: f32 = 0.005;
    pub const HOME_RUN_MAX: f32 = 0.12;
}

/// Fielding conversion and error rates.
pub mod fielding {
    pub const GROUND_OUT_BASE: f32 = 0.70;
    pub const FLY_OUT_BASE: f32 = 0.80;
    pub const LINE_OUT_BASE: f32 = 0.62;

    pub const OUT_PROB_MIN: f32 = 0.35;
    pub const OUT_PROB_MAX: f32 = 0.93;

    pub const ERROR_BASE: f32 = 0.012;
    pub const ERROR_MAX: f32 = 0.06;
}

/// Baserunning checks.
pub mod baserunning {
    pub const DOUBLE_PLAY_BASE: f32 = 0.42;
    pub const SAC_FLY_BASE: f32 = 0.55;
    pub const GROUND_SCORE_BASE: f32 = 0.38;
    pub const SCORE_FROM_SECOND_BASE: f32 = 0.52;
    pub const FIRST_TO_HOME_ON_DOUBLE_BASE: f32 = 0.42;

    /// Steal attempts stay rare; only plus runners go at all.
    pub const STEAL_ATTEMPT_THRESHOLD: f32 = 0.60;
    pub const STEAL_ATTEMPT_SCALE: f32 = 0.10;
    pub const STEAL_SUCCESS_BASE: f32 = 0.62;
}

/// Pitcher workload.
pub mod stamina {
    /// In-game pitch budget per stamina rating point.
    pub const PITCHES_PER_STAMINA_POINT: f32 = 1.1;
    /// Floor so even a zero-stamina arm records a few outs.
    pub const MIN_POOL: f32 = 18.0;
    pub const PITCH_COST: f32 = 1.0;
    /// Batters-faced ceiling; reaching it flags a substitution even with
    /// stamina left.
    pub const MAX_BATTERS_FACED: u8 = 32;
}

/// Game-level rules and guards.
pub mod game {
    pub const REGULATION_INNINGS: u8 = 9;
    /// Save credit requires a final margin at most this large.
    pub const SAVE_MARGIN_MAX: u8 = 3;
    /// Runaway guard for the step loop.
    pub const MAX_PITCHES_PER_GAME: u64 = 50_000;
}
