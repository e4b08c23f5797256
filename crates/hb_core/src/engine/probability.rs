//! Probability calculation utilities for at-bat resolution.
//!
//! All functions are pure - they take ratings as input and return
//! probabilities or weight vectors. This allows unit testing without a full
//! GameEngine.

use super::tuning::{baserunning, batted_ball, fielding, pitch, ratings};
use crate::models::{BattingRatings, PitchingRatings};

// ============================================================================
// Pitch Events
// ============================================================================

/// Batted-ball categories. `HomeRun` is resolved directly; the rest go
/// through fielding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattedBallType {
    Ground,
    Fly,
    Line,
    HomeRun,
}

/// Outcome weights for one pitch, ordered [ball, strike, foul, in-play].
/// Pitcher control pounds the zone, stuff and movement miss bats; batter eye
/// works counts, contact puts the ball in play. Count leverage shifts the
/// blend at three balls and at two strikes. Weights are clamped and then
/// renormalized to sum to one.
pub fn pitch_event_weights(
    pitcher: &PitchingRatings,
    batter: &BattingRatings,
    balls: u8,
    strikes: u8,
) -> [f32; 4] {
    let control = ratings::centered(pitcher.control);
    let stuff = ratings::centered(pitcher.stuff);
    let movement = ratings::centered(pitcher.movement);
    let eye = ratings::centered(batter.eye);
    let contact = ratings::centered(batter.contact);
    let avoid_k = ratings::centered(batter.avoid_strikeouts);

    let mut ball = pitch::BASE_BALL - 0.20 * control + 0.12 * eye;
    let mut strike =
        pitch::BASE_STRIKE + 0.20 * control + 0.16 * stuff + 0.08 * movement
            - 0.12 * contact
            - 0.10 * avoid_k;
    let mut foul = pitch::BASE_FOUL + 0.08 * contact - 0.04 * stuff;
    let mut in_play = pitch::BASE_IN_PLAY + 0.14 * contact - 0.08 * movement - 0.06 * stuff;

    if balls == 3 {
        strike += pitch::THREE_BALL_STRIKE_SHIFT;
        ball -= pitch::THREE_BALL_STRIKE_SHIFT;
    }
    if strikes == 2 {
        foul += pitch::TWO_STRIKE_FOUL_SHIFT;
        strike -= pitch::TWO_STRIKE_FOUL_SHIFT * 0.8;
    }

    let mut weights = [ball, strike, foul, in_play];
    for w in &mut weights {
        *w = w.clamp(pitch::WEIGHT_MIN, pitch::WEIGHT_MAX);
    }
    let total: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// Batted-ball type weights, ordered [ground, fly, line, home run].
pub fn batted_ball_weights(pitcher: &PitchingRatings, batter: &BattingRatings) -> [f32; 4] {
    let power = ratings::centered(batter.power);
    let contact = ratings::centered(batter.contact);
    let stuff = ratings::centered(pitcher.stuff);
    let movement = ratings::centered(pitcher.movement);

    let ground = (batted_ball::BASE_GROUND + 0.10 * movement - 0.08 * power).clamp(0.05, 0.70);
    let fly = (batted_ball::BASE_FLY + 0.06 * power - 0.04 * movement).clamp(0.05, 0.70);
    let line = (batted_ball::BASE_LINE + 0.08 * contact - 0.06 * stuff).clamp(0.05, 0.70);
    let home_run = (batted_ball::BASE_HOME_RUN + 0.12 * power - 0.04 * stuff)
        .clamp(batted_ball::HOME_RUN_MIN, batted_ball::HOME_RUN_MAX);

    let mut weights = [ground, fly, line, home_run];
    let total: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

// ============================================================================
// Fielding
// ============================================================================

/// Probability the defense converts a ball in play into at least one out.
/// Fielder range carries the play; batter speed beats out ground balls.
#[inline]
pub fn out_probability(batted: BattedBallType, fielder_range: u8, batter_speed: u8) -> f32 {
    let range = ratings::centered(fielder_range);
    let speed = ratings::centered(batter_speed);

    let base = match batted {
        BattedBallType::Ground => fielding::GROUND_OUT_BASE + 0.30 * range - 0.16 * speed,
        BattedBallType::Fly => fielding::FLY_OUT_BASE + 0.24 * range,
        BattedBallType::Line => fielding::LINE_OUT_BASE + 0.28 * range,
        BattedBallType::HomeRun => return 0.0,
    };
    base.clamp(fielding::OUT_PROB_MIN, fielding::OUT_PROB_MAX)
}

/// Probability of a misplay, charged as an error.
#[inline]
pub fn error_probability(fielder_reliability: u8) -> f32 {
    let reliability = ratings::normalize(fielder_reliability);
    (fielding::ERROR_BASE + 0.05 * (1.0 - reliability)).clamp(0.0, fielding::ERROR_MAX)
}

/// Share of non-homer hits that go for extra bases, ordered
/// [single, double, triple].
pub fn hit_type_weights(batter: &BattingRatings) -> [f32; 3] {
    let gap = ratings::centered(batter.gap_power);
    let speed = ratings::centered(batter.speed);

    let double = (0.19 + 0.14 * gap).clamp(0.06, 0.34);
    let triple = (0.018 + 0.035 * speed).clamp(0.002, 0.05);
    let single = (1.0 - double - triple).max(0.3);

    let mut weights = [single, double, triple];
    let total: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

// ============================================================================
// Baserunning
// ============================================================================

/// Ground ball, runner on first, fewer than two outs: chance the defense
/// turns two.
#[inline]
pub fn double_play_probability(pivot_turn: u8, runner_speed: u8) -> f32 {
    let turn = ratings::centered(pivot_turn);
    let speed = ratings::centered(runner_speed);
    (baserunning::DOUBLE_PLAY_BASE + 0.28 * turn - 0.22 * speed).clamp(0.10, 0.70)
}

/// Tag-up from third on a fly out.
#[inline]
pub fn sac_fly_probability(runner_speed: u8, fielder_arm: u8) -> f32 {
    let speed = ratings::centered(runner_speed);
    let arm = ratings::centered(fielder_arm);
    (baserunning::SAC_FLY_BASE + 0.30 * speed - 0.26 * arm).clamp(0.20, 0.90)
}

/// Runner on third scoring on a ground out (contact play).
#[inline]
pub fn ground_score_probability(runner_baserunning: u8) -> f32 {
    let br = ratings::centered(runner_baserunning);
    (baserunning::GROUND_SCORE_BASE + 0.24 * br).clamp(0.15, 0.70)
}

/// Runner on second scoring on a single.
#[inline]
pub fn score_from_second_probability(runner_baserunning: u8, runner_speed: u8) -> f32 {
    let br = ratings::centered(runner_baserunning);
    let speed = ratings::centered(runner_speed);
    (baserunning::SCORE_FROM_SECOND_BASE + 0.26 * br + 0.18 * speed).clamp(0.20, 0.92)
}

/// Runner on first coming all the way home on a double.
#[inline]
pub fn first_to_home_probability(runner_baserunning: u8, runner_speed: u8) -> f32 {
    let br = ratings::centered(runner_baserunning);
    let speed = ratings::centered(runner_speed);
    (baserunning::FIRST_TO_HOME_ON_DOUBLE_BASE + 0.24 * br + 0.22 * speed).clamp(0.12, 0.85)
}

/// Per-pitch chance the runner on first takes off. Zero below the threshold
/// so ordinary runners never go.
#[inline]
pub fn steal_attempt_probability(runner_stealing: u8) -> f32 {
    let stealing = ratings::normalize(runner_stealing);
    ((stealing - baserunning::STEAL_ATTEMPT_THRESHOLD) * baserunning::STEAL_ATTEMPT_SCALE).max(0.0)
}

/// Steal of second against the catcher's arm.
#[inline]
pub fn steal_success_probability(runner_stealing: u8, catcher_arm: u8) -> f32 {
    let stealing = ratings::centered(runner_stealing);
    let arm = ratings::centered(catcher_arm);
    (baserunning::STEAL_SUCCESS_BASE + 0.30 * stealing - 0.26 * arm).clamp(0.25, 0.95)
}

/// Sample an index from cumulative weights with a uniform draw in [0, 1).
#[inline]
pub fn sample_index(weights: &[f32], roll: f32) -> usize {
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if roll < cumulative {
            return i;
        }
    }
    weights.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn average_pitcher() -> PitchingRatings {
        PitchingRatings { velocity: 50, stuff: 50, movement: 50, control: 50, stamina: 50 }
    }

    fn average_batter() -> BattingRatings {
        BattingRatings {
            contact: 50,
            gap_power: 50,
            power: 50,
            eye: 50,
            avoid_strikeouts: 50,
            speed: 50,
            stealing: 50,
            baserunning: 50,
        }
    }

    #[test]
    fn test_pitch_weights_sum_to_one() {
        for balls in 0..4 {
            for strikes in 0..3 {
                let w = pitch_event_weights(&average_pitcher(), &average_batter(), balls, strikes);
                let total: f32 = w.iter().sum();
                assert!((total - 1.0).abs() < 1e-5, "{:?}", w);
                assert!(w.iter().all(|&x| x > 0.0));
            }
        }
    }

    #[test]
    fn test_control_trades_balls_for_strikes() {
        let wild = PitchingRatings { control: 20, ..average_pitcher() };
        let painter = PitchingRatings { control: 90, ..average_pitcher() };
        let w_wild = pitch_event_weights(&wild, &average_batter(), 0, 0);
        let w_painter = pitch_event_weights(&painter, &average_batter(), 0, 0);
        assert!(w_wild[0] > w_painter[0], "wild pitcher throws more balls");
        assert!(w_wild[1] < w_painter[1], "painter gets more strikes");
    }

    #[test]
    fn test_three_ball_count_finds_the_zone() {
        let even = pitch_event_weights(&average_pitcher(), &average_batter(), 0, 0);
        let full = pitch_event_weights(&average_pitcher(), &average_batter(), 3, 0);
        assert!(full[1] > even[1]);
        assert!(full[0] < even[0]);
    }

    #[test]
    fn test_power_lifts_home_run_share() {
        let slugger = BattingRatings { power: 95, ..average_batter() };
        let slap = BattingRatings { power: 20, ..average_batter() };
        let w_slug = batted_ball_weights(&average_pitcher(), &slugger);
        let w_slap = batted_ball_weights(&average_pitcher(), &slap);
        assert!(w_slug[3] > w_slap[3]);
    }

    #[test]
    fn test_out_probability_bounds_and_monotonicity() {
        for batted in [BattedBallType::Ground, BattedBallType::Fly, BattedBallType::Line] {
            let low = out_probability(batted, 15, 50);
            let high = out_probability(batted, 95, 50);
            assert!(low >= fielding::OUT_PROB_MIN && high <= fielding::OUT_PROB_MAX);
            assert!(high > low, "range must help: {:?}", batted);
        }
        assert_eq!(out_probability(BattedBallType::HomeRun, 99, 1), 0.0);
    }

    #[test]
    fn test_speed_beats_out_ground_balls_only() {
        let slow = out_probability(BattedBallType::Ground, 50, 20);
        let fast = out_probability(BattedBallType::Ground, 50, 95);
        assert!(fast < slow);
        assert_eq!(
            out_probability(BattedBallType::Fly, 50, 20),
            out_probability(BattedBallType::Fly, 50, 95)
        );
    }

    #[test]
    fn test_error_probability_shrinks_with_reliability() {
        assert!(error_probability(20) > error_probability(90));
        assert!(error_probability(1) <= fielding::ERROR_MAX);
    }

    #[test]
    fn test_hit_type_weights_sum_to_one() {
        let w = hit_type_weights(&average_batter());
        assert!((w.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!(w[0] > w[1] && w[1] > w[2], "singles > doubles > triples: {:?}", w);
    }

    #[test]
    fn test_steal_attempt_gated_on_rating() {
        assert_eq!(steal_attempt_probability(40), 0.0);
        assert!(steal_attempt_probability(95) > 0.0);
    }

    #[test]
    fn test_sample_index_covers_range() {
        let weights = [0.25, 0.25, 0.5];
        assert_eq!(sample_index(&weights, 0.0), 0);
        assert_eq!(sample_index(&weights, 0.3), 1);
        assert_eq!(sample_index(&weights, 0.9), 2);
        // Degenerate roll lands in the last bucket rather than out of range.
        assert_eq!(sample_index(&weights, 1.5), 2);
    }
}
