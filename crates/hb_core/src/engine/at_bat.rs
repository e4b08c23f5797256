//! At-Bat Resolution Engine.
//!
//! One call resolves one pitch against the current pitcher/batter pair:
//! count bookkeeping, strikeouts and walks, batted-ball and fielding
//! outcomes, runner advancement and stamina depletion. Outcomes are sampled
//! from the game's seeded RNG stream, so identical (ratings, seed) pairs
//! replay identically; spray direction comes from the hash-based helpers so
//! it costs no stream draws.
//!
//! Substitutions are signalled here (`sub_due`) but performed by the game
//! state machine at half-inning boundaries.

use rand::Rng;

use super::deterministic::{deterministic_choice, subcase};
use super::game::GameEngine;
use super::probability::{self, BattedBallType};
use super::tuning::stamina;
use crate::models::{
    BattingRatings, HomeRunEvent, PitchingRatings, PlayerId, Position, TeamSide,
};

/// What one step produced. `Ball`/`Strike`/`Foul` leave the plate appearance
/// open; the rest close it or move a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchEvent {
    Ball,
    Strike,
    Foul,
    Walk,
    Strikeout,
    StolenBase,
    CaughtStealing,
    InPlay(PlayOutcome),
    /// Returned when stepping a finished game; nothing changed.
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Single,
    Double,
    Triple,
    HomeRun { runs: u8 },
    Groundout,
    Flyout,
    Lineout,
    DoublePlay,
    SacrificeFly,
    ReachedOnError,
}

fn league_average_batting() -> BattingRatings {
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

fn league_average_pitching() -> PitchingRatings {
    PitchingRatings { velocity: 50, stuff: 50, movement: 50, control: 50, stamina: 40 }
}

impl GameEngine {
    fn batting_snapshot(&self, side: TeamSide, id: PlayerId) -> BattingRatings {
        self.team(side)
            .player(id)
            .map(|p| p.batting.clone())
            .unwrap_or_else(league_average_batting)
    }

    fn pitching_snapshot(&self, side: TeamSide, id: PlayerId) -> PitchingRatings {
        self.team(side)
            .player(id)
            .and_then(|p| p.pitching.clone())
            .unwrap_or_else(league_average_pitching)
    }

    fn fielder(&self, side: TeamSide, position: Position) -> Option<PlayerId> {
        self.lineup(side).fielder_at(position)
    }

    fn fielder_range(&self, side: TeamSide, position: Position) -> u8 {
        self.fielder(side, position)
            .and_then(|id| self.team(side).player(id))
            .map(|p| p.fielding.range_at(position))
            .unwrap_or(40)
    }

    fn fielder_reliability(&self, side: TeamSide, position: Position) -> u8 {
        self.fielder(side, position)
            .and_then(|id| self.team(side).player(id))
            .map(|p| p.fielding.reliability)
            .unwrap_or(50)
    }

    fn fielder_arm(&self, side: TeamSide, position: Position) -> u8 {
        self.fielder(side, position)
            .and_then(|id| self.team(side).player(id))
            .map(|p| p.fielding.arm)
            .unwrap_or(50)
    }

    /// Double-play pivot quality: the better turn rating up the middle.
    fn pivot_turn(&self, side: TeamSide) -> u8 {
        [Position::SecondBase, Position::Shortstop]
            .into_iter()
            .filter_map(|pos| self.fielder(side, pos))
            .filter_map(|id| self.team(side).player(id))
            .map(|p| p.fielding.turn_dp)
            .max()
            .unwrap_or(50)
    }

    /// Resolve the next pitch. The caller (`GameEngine::step`) has already
    /// handled game start, completion and pending substitutions.
    pub(crate) fn resolve_pitch(&mut self) -> PitchEvent {
        let batting = self.state.batting_side();
        let fielding = batting.flip();
        self.pitch_count += 1;

        let pitcher_id = match self.current_pitcher_id(fielding) {
            Some(id) => id,
            None => return PitchEvent::GameOver,
        };
        let order_pos = self.state.batting_order_pos[batting.idx()];
        let batter_id = match self.lineup(batting).batter(order_pos) {
            Some(id) => id,
            None => return PitchEvent::GameOver,
        };

        // A plus runner on first may break for second instead of the pitch
        // being delivered.
        if let Some(runner) = self.state.bases[0] {
            if self.state.bases[1].is_none() {
                let stealing = self.batting_snapshot(batting, runner).stealing;
                let attempt = probability::steal_attempt_probability(stealing);
                if attempt > 0.0 && self.rng.gen::<f32>() < attempt {
                    return self.resolve_steal(batting, fielding, runner, stealing);
                }
            }
        }

        let pitcher = self.pitching_snapshot(fielding, pitcher_id);
        let batter = self.batting_snapshot(batting, batter_id);

        self.stamina_pool[fielding.idx()] -= stamina::PITCH_COST;
        if self.stamina_pool[fielding.idx()] <= 0.0 {
            self.sub_due[fielding.idx()] = true;
        }
        self.box_score.pitching_mut(fielding, pitcher_id).pitches += 1;

        let weights = probability::pitch_event_weights(
            &pitcher,
            &batter,
            self.state.balls,
            self.state.strikes,
        );
        let roll = self.rng.gen::<f32>();
        match probability::sample_index(&weights, roll) {
            0 => {
                self.state.balls += 1;
                if self.state.balls >= 4 {
                    self.resolve_walk(batting, fielding, batter_id, pitcher_id);
                    PitchEvent::Walk
                } else {
                    PitchEvent::Ball
                }
            }
            1 => {
                self.state.strikes += 1;
                if self.state.strikes >= 3 {
                    self.resolve_strikeout(batting, fielding, batter_id, pitcher_id);
                    PitchEvent::Strikeout
                } else {
                    PitchEvent::Strike
                }
            }
            2 => {
                if self.state.strikes < 2 {
                    self.state.strikes += 1;
                }
                PitchEvent::Foul
            }
            _ => PitchEvent::InPlay(self.resolve_ball_in_play(
                batting, fielding, batter_id, pitcher_id, &pitcher, &batter,
            )),
        }
    }

    fn resolve_steal(
        &mut self,
        batting: TeamSide,
        fielding: TeamSide,
        runner: PlayerId,
        stealing: u8,
    ) -> PitchEvent {
        let catcher_arm = self.fielder_arm(fielding, Position::Catcher);
        if self.rng.gen::<f32>() < probability::steal_success_probability(stealing, catcher_arm) {
            self.state.bases[1] = self.state.bases[0].take();
            self.box_score.batting_mut(batting, runner).stolen_bases += 1;
            PitchEvent::StolenBase
        } else {
            self.state.bases[0] = None;
            self.record_outs(1);
            PitchEvent::CaughtStealing
        }
    }

    /// Count reset, lineup advance and batters-faced bookkeeping shared by
    /// every plate-appearance-ending outcome.
    fn end_plate_appearance(&mut self, batting: TeamSide, fielding: TeamSide) {
        self.state.balls = 0;
        self.state.strikes = 0;
        let len = self.lineup(batting).len().max(1);
        let pos = &mut self.state.batting_order_pos[batting.idx()];
        *pos = (*pos + 1) % len;

        self.batters_faced[fielding.idx()] = self.batters_faced[fielding.idx()].saturating_add(1);
        if self.batters_faced[fielding.idx()] >= stamina::MAX_BATTERS_FACED {
            self.sub_due[fielding.idx()] = true;
        }
    }

    pub(crate) fn resolve_walk(
        &mut self,
        batting: TeamSide,
        fielding: TeamSide,
        batter_id: PlayerId,
        pitcher_id: PlayerId,
    ) {
        self.box_score.batting_mut(batting, batter_id).walks += 1;
        self.box_score.pitching_mut(fielding, pitcher_id).walks += 1;

        let bases = self.state.bases;
        let mut new_bases = bases;
        let forced_home = bases.iter().all(|b| b.is_some());
        if bases[0].is_some() {
            if bases[1].is_some() {
                new_bases[2] = bases[1];
            }
            new_bases[1] = bases[0];
        }
        new_bases[0] = Some(batter_id);
        self.state.bases = new_bases;

        if forced_home {
            if let Some(runner) = bases[2] {
                self.score_runner(runner, Some(batter_id));
            }
        }
        self.end_plate_appearance(batting, fielding);
    }

    fn resolve_strikeout(
        &mut self,
        batting: TeamSide,
        fielding: TeamSide,
        batter_id: PlayerId,
        pitcher_id: PlayerId,
    ) {
        let line = self.box_score.batting_mut(batting, batter_id);
        line.at_bats += 1;
        line.strikeouts += 1;
        self.box_score.pitching_mut(fielding, pitcher_id).strikeouts += 1;
        self.end_plate_appearance(batting, fielding);
        self.record_outs(1);
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_ball_in_play(
        &mut self,
        batting: TeamSide,
        fielding: TeamSide,
        batter_id: PlayerId,
        pitcher_id: PlayerId,
        pitcher: &PitchingRatings,
        batter: &BattingRatings,
    ) -> PlayOutcome {
        self.end_plate_appearance(batting, fielding);

        let weights = probability::batted_ball_weights(pitcher, batter);
        let roll = self.rng.gen::<f32>();
        let batted = match probability::sample_index(&weights, roll) {
            0 => BattedBallType::Ground,
            1 => BattedBallType::Fly,
            2 => BattedBallType::Line,
            _ => BattedBallType::HomeRun,
        };

        if batted == BattedBallType::HomeRun {
            return self.resolve_home_run(batting, fielding, batter_id, pitcher_id);
        }

        let position = self.spray_target(batted, batter_id);
        let range = self.fielder_range(fielding, position);
        let reliability = self.fielder_reliability(fielding, position);

        if self.rng.gen::<f32>() < probability::error_probability(reliability) {
            return self.resolve_error(batting, fielding, batter_id);
        }

        let out_roll = self.rng.gen::<f32>();
        if out_roll < probability::out_probability(batted, range, batter.speed) {
            match batted {
                BattedBallType::Ground => {
                    self.resolve_ground_out(batting, fielding, batter_id)
                }
                BattedBallType::Fly => {
                    self.resolve_fly_out(batting, fielding, batter_id, position)
                }
                _ => {
                    self.box_score.batting_mut(batting, batter_id).at_bats += 1;
                    self.record_outs(1);
                    PlayOutcome::Lineout
                }
            }
        } else {
            self.resolve_hit(batting, fielding, batter_id, pitcher_id, batter)
        }
    }

    fn spray_target(&self, batted: BattedBallType, batter_id: PlayerId) -> Position {
        match batted {
            BattedBallType::Ground => {
                const TARGETS: [Position; 4] = [
                    Position::FirstBase,
                    Position::SecondBase,
                    Position::ThirdBase,
                    Position::Shortstop,
                ];
                TARGETS[deterministic_choice(
                    self.seed(),
                    self.pitch_count,
                    batter_id,
                    subcase::SPRAY_GROUND,
                    TARGETS.len(),
                )]
            }
            BattedBallType::Fly => {
                const TARGETS: [Position; 3] =
                    [Position::LeftField, Position::CenterField, Position::RightField];
                TARGETS[deterministic_choice(
                    self.seed(),
                    self.pitch_count,
                    batter_id,
                    subcase::SPRAY_FLY,
                    TARGETS.len(),
                )]
            }
            _ => {
                const TARGETS: [Position; 5] = [
                    Position::SecondBase,
                    Position::Shortstop,
                    Position::LeftField,
                    Position::CenterField,
                    Position::RightField,
                ];
                TARGETS[deterministic_choice(
                    self.seed(),
                    self.pitch_count,
                    batter_id,
                    subcase::SPRAY_LINE,
                    TARGETS.len(),
                )]
            }
        }
    }

    fn resolve_home_run(
        &mut self,
        batting: TeamSide,
        fielding: TeamSide,
        batter_id: PlayerId,
        pitcher_id: PlayerId,
    ) -> PlayOutcome {
        self.state.hits[batting.idx()] = self.state.hits[batting.idx()].saturating_add(1);
        {
            let line = self.box_score.batting_mut(batting, batter_id);
            line.at_bats += 1;
            line.hits += 1;
            line.home_runs += 1;
        }
        {
            let line = self.box_score.pitching_mut(fielding, pitcher_id);
            line.hits_allowed += 1;
            line.home_runs_allowed += 1;
        }

        let event = HomeRunEvent {
            player: self
                .team(batting)
                .player(batter_id)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            season_total: self.season_home_run_total(batting, batter_id),
            team: self.team(batting).name.clone(),
        };
        self.home_run_events.push(event);

        let mut runs = 0u8;
        let bases = self.state.bases;
        self.state.bases = [None; 3];
        for base in [2usize, 1, 0] {
            if let Some(runner) = bases[base] {
                if self.is_over() {
                    return PlayOutcome::HomeRun { runs };
                }
                self.score_runner(runner, Some(batter_id));
                runs += 1;
            }
        }
        if !self.is_over() {
            self.score_runner(batter_id, Some(batter_id));
            runs += 1;
        }
        PlayOutcome::HomeRun { runs }
    }

    fn resolve_error(
        &mut self,
        batting: TeamSide,
        fielding: TeamSide,
        batter_id: PlayerId,
    ) -> PlayOutcome {
        self.state.errors[fielding.idx()] =
            self.state.errors[fielding.idx()].saturating_add(1);
        self.box_score.batting_mut(batting, batter_id).at_bats += 1;

        // Everybody moves up one; no RBI is credited on the miscue.
        let bases = self.state.bases;
        self.state.bases = [Some(batter_id), bases[0], bases[1]];
        if let Some(runner) = bases[2] {
            self.score_runner(runner, None);
        }
        PlayOutcome::ReachedOnError
    }

    fn resolve_ground_out(
        &mut self,
        batting: TeamSide,
        fielding: TeamSide,
        batter_id: PlayerId,
    ) -> PlayOutcome {
        self.box_score.batting_mut(batting, batter_id).at_bats += 1;
        let pre_outs = self.state.outs;

        if let Some(lead_runner) = self.state.bases[0] {
            if pre_outs < 2 {
                let runner_speed = self.batting_snapshot(batting, lead_runner).speed;
                let turn = self.pivot_turn(fielding);
                if self.rng.gen::<f32>() < probability::double_play_probability(turn, runner_speed)
                {
                    self.state.bases[0] = None;
                    // Trail runners move up only when the twin killing does
                    // not end the inning.
                    if pre_outs == 0 {
                        if let Some(runner) = self.state.bases[2].take() {
                            self.score_runner(runner, None);
                        }
                        if !self.is_over() {
                            self.state.bases[2] = self.state.bases[1].take();
                        }
                    }
                    self.record_outs(2);
                    return PlayOutcome::DoublePlay;
                }
            }
        }

        if pre_outs < 2 {
            if let Some(runner) = self.state.bases[2] {
                let baserunning = self.batting_snapshot(batting, runner).baserunning;
                if self.rng.gen::<f32>() < probability::ground_score_probability(baserunning) {
                    self.state.bases[2] = None;
                    self.score_runner(runner, Some(batter_id));
                }
            }
        }
        self.record_outs(1);
        PlayOutcome::Groundout
    }

    fn resolve_fly_out(
        &mut self,
        batting: TeamSide,
        fielding: TeamSide,
        batter_id: PlayerId,
        position: Position,
    ) -> PlayOutcome {
        let pre_outs = self.state.outs;
        let mut sacrifice = false;

        if pre_outs < 2 {
            if let Some(runner) = self.state.bases[2] {
                let snapshot = self.batting_snapshot(batting, runner);
                let arm = self.fielder_arm(fielding, position);
                if self.rng.gen::<f32>() < probability::sac_fly_probability(snapshot.speed, arm) {
                    self.state.bases[2] = None;
                    self.score_runner(runner, Some(batter_id));
                    sacrifice = true;
                }
            }
        }

        // A sacrifice fly is not charged as an at-bat.
        if !sacrifice {
            self.box_score.batting_mut(batting, batter_id).at_bats += 1;
        }
        self.record_outs(1);
        if sacrifice {
            PlayOutcome::SacrificeFly
        } else {
            PlayOutcome::Flyout
        }
    }

    fn resolve_hit(
        &mut self,
        batting: TeamSide,
        fielding: TeamSide,
        batter_id: PlayerId,
        pitcher_id: PlayerId,
        batter: &BattingRatings,
    ) -> PlayOutcome {
        self.state.hits[batting.idx()] = self.state.hits[batting.idx()].saturating_add(1);
        {
            let line = self.box_score.batting_mut(batting, batter_id);
            line.at_bats += 1;
            line.hits += 1;
        }
        self.box_score.pitching_mut(fielding, pitcher_id).hits_allowed += 1;

        let weights = probability::hit_type_weights(batter);
        let roll = self.rng.gen::<f32>();
        match probability::sample_index(&weights, roll) {
            0 => self.apply_single(batting, batter_id),
            1 => {
                self.box_score.batting_mut(batting, batter_id).doubles += 1;
                self.apply_double(batting, batter_id)
            }
            _ => {
                self.box_score.batting_mut(batting, batter_id).triples += 1;
                self.apply_triple(batting, batter_id)
            }
        }
    }

    fn apply_single(&mut self, batting: TeamSide, batter_id: PlayerId) -> PlayOutcome {
        let bases = self.state.bases;

        let second_scores = match bases[1] {
            Some(runner) => {
                let snapshot = self.batting_snapshot(batting, runner);
                self.rng.gen::<f32>()
                    < probability::score_from_second_probability(
                        snapshot.baserunning,
                        snapshot.speed,
                    )
            }
            None => false,
        };

        self.state.bases = [
            Some(batter_id),
            bases[0],
            if second_scores { None } else { bases[1] },
        ];

        if let Some(runner) = bases[2] {
            self.score_runner(runner, Some(batter_id));
        }
        if second_scores {
            if let Some(runner) = bases[1] {
                if !self.is_over() {
                    self.score_runner(runner, Some(batter_id));
                }
            }
        }
        PlayOutcome::Single
    }

    fn apply_double(&mut self, batting: TeamSide, batter_id: PlayerId) -> PlayOutcome {
        let bases = self.state.bases;

        let first_scores = match bases[0] {
            Some(runner) => {
                let snapshot = self.batting_snapshot(batting, runner);
                self.rng.gen::<f32>()
                    < probability::first_to_home_probability(snapshot.baserunning, snapshot.speed)
            }
            None => false,
        };

        self.state.bases =
            [None, Some(batter_id), if first_scores { None } else { bases[0] }];

        for runner in [bases[2], bases[1]].into_iter().flatten() {
            if !self.is_over() {
                self.score_runner(runner, Some(batter_id));
            }
        }
        if first_scores {
            if let Some(runner) = bases[0] {
                if !self.is_over() {
                    self.score_runner(runner, Some(batter_id));
                }
            }
        }
        PlayOutcome::Double
    }

    fn apply_triple(&mut self, batting: TeamSide, batter_id: PlayerId) -> PlayOutcome {
        let bases = self.state.bases;
        self.state.bases = [None, None, Some(batter_id)];
        for runner in [bases[2], bases[1], bases[0]].into_iter().flatten() {
            if !self.is_over() {
                self.score_runner(runner, Some(batter_id));
            }
        }
        PlayOutcome::Triple
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game::{GameEngine, GamePlan};
    use crate::models::{League, RosterLevel, Team};
    use crate::roster::generation::generate_team;
    use crate::roster::{assign_levels, assign_pitching_roles, RosterConfig};

    fn ready_team(name: &str, seed: u64) -> Team {
        let mut team = generate_team(name, League::North, seed);
        assign_levels(&mut team, &RosterConfig::default());
        assign_pitching_roles(&mut team, RosterLevel::Majors);
        team
    }

    fn started_engine(seed: u64) -> GameEngine {
        let mut engine = GameEngine::new(GamePlan::new(
            ready_team("Harbor Gulls", 10),
            ready_team("Iron Bears", 11),
            seed,
        ))
        .expect("engine builds");
        engine.step();
        engine
    }

    #[test]
    fn test_walk_with_bases_loaded_forces_in_a_run() {
        let mut engine = started_engine(42);
        let batting = engine.state.batting_side();
        let fielding = batting.flip();
        let lineup: Vec<PlayerId> =
            engine.lineup(batting).slots.iter().map(|s| s.player).collect();
        engine.state.bases = [Some(lineup[5]), Some(lineup[6]), Some(lineup[7])];
        let batter = lineup[0];
        let pitcher = engine.current_pitcher_id(fielding).unwrap();

        let score_before = engine.state.score[batting.idx()];
        engine.resolve_walk(batting, fielding, batter, pitcher);

        assert_eq!(engine.state.score[batting.idx()], score_before + 1);
        assert_eq!(engine.state.bases, [Some(batter), Some(lineup[5]), Some(lineup[6])]);
    }

    #[test]
    fn test_walk_without_force_leaves_lead_runners() {
        let mut engine = started_engine(42);
        let batting = engine.state.batting_side();
        let fielding = batting.flip();
        let lineup: Vec<PlayerId> =
            engine.lineup(batting).slots.iter().map(|s| s.player).collect();
        // Runner on third only: a walk must not push him home.
        engine.state.bases = [None, None, Some(lineup[7])];
        let batter = lineup[0];
        let pitcher = engine.current_pitcher_id(fielding).unwrap();

        let score_before = engine.state.score[batting.idx()];
        engine.resolve_walk(batting, fielding, batter, pitcher);

        assert_eq!(engine.state.score[batting.idx()], score_before);
        assert_eq!(engine.state.bases, [Some(batter), None, Some(lineup[7])]);
    }

    #[test]
    fn test_pitch_events_cover_the_taxonomy_over_a_game() {
        let mut engine = started_engine(7);
        let mut strikeouts = 0;
        let mut walks = 0;
        let mut in_play = 0;
        while !engine.is_over() {
            match engine.step() {
                PitchEvent::Strikeout => strikeouts += 1,
                PitchEvent::Walk => walks += 1,
                PitchEvent::InPlay(_) => in_play += 1,
                _ => {}
            }
        }
        assert!(strikeouts > 0, "no strikeouts in a full game");
        assert!(walks > 0, "no walks in a full game");
        assert!(in_play > 20, "too few balls in play: {}", in_play);
    }

    #[test]
    fn test_plate_appearance_advances_batting_order() {
        let mut engine = started_engine(99);
        loop {
            let batting = engine.state.batting_side();
            let before = engine.state.batting_order_pos[batting.idx()];
            match engine.step() {
                PitchEvent::Walk | PitchEvent::Strikeout | PitchEvent::InPlay(_) => {
                    // The order survives half flips, so the slot advanced by
                    // exactly one regardless of what the out did.
                    let after = engine.state.batting_order_pos[batting.idx()];
                    assert_eq!(after, (before + 1) % 9);
                    break;
                }
                PitchEvent::GameOver => panic!("game ended before a PA resolved"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_home_run_event_carries_season_total() {
        let home = ready_team("Harbor Gulls", 10);
        let away = ready_team("Iron Bears", 11);
        let baseline = [vec![9; home.players.len()], vec![9; away.players.len()]];
        let mut plan = GamePlan::new(home, away, 2024);
        plan.season_home_runs = Some(baseline);
        let mut engine = GameEngine::new(plan).expect("engine builds");
        let result = engine.simulate();
        for event in &result.home_runs {
            assert!(event.season_total >= 10, "baseline ignored: {:?}", event);
        }
    }

    #[test]
    fn test_hits_and_errors_counted_per_side() {
        let mut engine = started_engine(31);
        let result = engine.simulate();
        let box_hits_home: u32 =
            result.box_score.home_batting.iter().map(|e| e.line.hits as u32).sum();
        let box_hits_away: u32 =
            result.box_score.away_batting.iter().map(|e| e.line.hits as u32).sum();
        assert_eq!(box_hits_home, result.hits_home as u32);
        assert_eq!(box_hits_away, result.hits_away as u32);
    }

    #[test]
    fn test_stamina_depletion_raises_substitution_signal() {
        let mut engine = started_engine(8);
        let fielding = engine.state.batting_side().flip();
        engine.stamina_pool[fielding.idx()] = 1.0;
        // Step until a real pitch is thrown for the fielding side.
        for _ in 0..20 {
            engine.step();
            if engine.sub_due[fielding.idx()] {
                break;
            }
        }
        assert!(engine.sub_due[fielding.idx()]);
    }
}
