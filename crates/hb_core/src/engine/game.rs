//! Game State Machine.
//!
//! Drives a single game to completion: innings, outs, baserunners,
//! substitutions, scoring and termination. The engine exposes a single step
//! operation ("resolve one pitch") plus a completion predicate; there is no
//! internal loop, timer or blocking anywhere. The caller decides the
//! suspension granularity - one pitch, one half-inning, or run to
//! completion via `simulate()`.
//!
//! ## State transitions
//!
//! ```text
//! NOT_STARTED -> IN_PROGRESS(1, TOP)     on the first step
//! third out   -> half flip               TOP(n) -> BOTTOM(n) -> TOP(n+1)
//! IN_PROGRESS -> GAME_OVER               after the top of an inning >= 9
//!                                        with the home team ahead, after
//!                                        any completed inning >= 9 with the
//!                                        score unequal, or the instant the
//!                                        home team takes the lead in its
//!                                        own half of an inning >= 9
//! ```
//!
//! GameState is read-only once GAME_OVER is reached; further steps are
//! no-ops.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::stats::BoxAccumulator;
use super::tuning::{game as game_tuning, stamina};
use crate::error::{Result, SimError};
use crate::models::{
    GameResult, HomeRunEvent, PlayerId, RosterLevel, Team, TeamSide, ROTATION_SLOTS,
};
use crate::roster::{assign_pitching_roles, build_lineup, Lineup};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HalfInning {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum GamePhase {
    NotStarted,
    InProgress { inning: u8, half: HalfInning },
    GameOver,
}

/// Mutable per-game record. Mutated exclusively by `GameEngine`; exposed
/// read-only through `GameEngine::state()` for in-progress display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// 0-2 during play; reset on each half-inning change.
    pub outs: u8,
    pub balls: u8,
    pub strikes: u8,
    /// First, second, third. `None` = empty.
    pub bases: [Option<PlayerId>; 3],
    /// Indexed `[home, away]` via `TeamSide::idx()`.
    pub score: [u8; 2],
    /// Per-inning runs, growing as halves are played.
    pub line_score: [Vec<u8>; 2],
    pub hits: [u8; 2],
    pub errors: [u8; 2],
    /// Ordered appearance lists; an id repeats only via the exhausted-
    /// bullpen re-entry fallback.
    pub pitchers_used: [Vec<PlayerId>; 2],
    /// Next lineup slot to bat, per side.
    pub batting_order_pos: [usize; 2],
    pub current_pitcher: [Option<PlayerId>; 2],
}

impl GameState {
    fn new() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            outs: 0,
            balls: 0,
            strikes: 0,
            bases: [None; 3],
            score: [0, 0],
            line_score: [Vec::new(), Vec::new()],
            hits: [0, 0],
            errors: [0, 0],
            pitchers_used: [Vec::new(), Vec::new()],
            batting_order_pos: [0, 0],
            current_pitcher: [None, None],
        }
    }

    /// Side at bat for the current half (away bats the top).
    pub fn batting_side(&self) -> TeamSide {
        match self.phase {
            GamePhase::InProgress { half: HalfInning::Bottom, .. } => TeamSide::Home,
            _ => TeamSide::Away,
        }
    }

    pub fn inning(&self) -> u8 {
        match self.phase {
            GamePhase::InProgress { inning, .. } => inning,
            _ => 0,
        }
    }
}

/// Everything a game needs up front. Teams are owned copies: a concurrently
/// simulated fixture must never share mutable team state with another game.
#[derive(Debug, Clone)]
pub struct GamePlan {
    pub home_team: Team,
    pub away_team: Team,
    pub seed: u64,
    /// Rotation slot where the starter search begins; the season orchestrator
    /// cycles this by games played.
    pub rotation_index: usize,
    /// Season home-run totals per arena id at first pitch, `[home, away]`.
    /// Used to stamp season counts onto home-run events.
    pub season_home_runs: Option<[Vec<u32>; 2]>,
}

impl GamePlan {
    pub fn new(home_team: Team, away_team: Team, seed: u64) -> Self {
        Self { home_team, away_team, seed, rotation_index: 0, season_home_runs: None }
    }
}

/// Pitcher-of-record bookkeeping for win/loss designation, updated whenever
/// the lead changes hands.
#[derive(Debug, Clone, Copy)]
struct GoAheadRecord {
    side: TeamSide,
    /// Current pitcher of the side that took the lead.
    credited: PlayerId,
    /// Current pitcher of the side that surrendered it.
    charged: PlayerId,
}

#[derive(Debug)]
pub struct GameEngine {
    pub(crate) rng: ChaCha8Rng,
    original_seed: u64,
    pub(crate) home: Team,
    pub(crate) away: Team,
    pub(crate) state: GameState,
    pub(crate) lineups: [Lineup; 2],
    /// Remaining in-game stamina of the current pitcher, per side.
    pub(crate) stamina_pool: [f32; 2],
    pub(crate) batters_faced: [u8; 2],
    /// Substitution-due signal raised by the at-bat engine, consumed at the
    /// next half-inning boundary.
    pub(crate) sub_due: [bool; 2],
    /// Global pitch counter; also feeds the hash-based spray selection.
    pub(crate) pitch_count: u64,
    pub(crate) box_score: BoxAccumulator,
    pub(crate) home_run_events: Vec<HomeRunEvent>,
    season_home_runs: [Vec<u32>; 2],
    go_ahead: Option<GoAheadRecord>,
    half_start_pending: bool,
    final_inning: u8,
}

impl GameEngine {
    pub fn new(mut plan: GamePlan) -> Result<Self> {
        plan.home_team.validate().map_err(SimError::InvalidTeam)?;
        plan.away_team.validate().map_err(SimError::InvalidTeam)?;

        let lineups =
            [build_lineup(&plan.home_team)?, build_lineup(&plan.away_team)?];

        let home_starter = starter_with_recovery(&mut plan.home_team, plan.rotation_index)?;
        let away_starter = starter_with_recovery(&mut plan.away_team, plan.rotation_index)?;

        let season_home_runs = plan.season_home_runs.unwrap_or_else(|| {
            [vec![0; plan.home_team.players.len()], vec![0; plan.away_team.players.len()]]
        });

        let box_score =
            BoxAccumulator::new(plan.home_team.players.len(), plan.away_team.players.len());

        let mut state = GameState::new();
        state.current_pitcher = [Some(home_starter), Some(away_starter)];

        let mut engine = Self {
            rng: ChaCha8Rng::seed_from_u64(plan.seed),
            original_seed: plan.seed,
            home: plan.home_team,
            away: plan.away_team,
            state,
            lineups,
            stamina_pool: [0.0, 0.0],
            batters_faced: [0, 0],
            sub_due: [false, false],
            pitch_count: 0,
            box_score,
            home_run_events: Vec::new(),
            season_home_runs,
            go_ahead: None,
            half_start_pending: false,
            final_inning: 0,
        };
        engine.stamina_pool =
            [engine.full_pool(TeamSide::Home), engine.full_pool(TeamSide::Away)];
        Ok(engine)
    }

    pub fn seed(&self) -> u64 {
        self.original_seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    pub(crate) fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub(crate) fn lineup(&self, side: TeamSide) -> &Lineup {
        &self.lineups[side.idx()]
    }

    pub(crate) fn current_pitcher_id(&self, side: TeamSide) -> Option<PlayerId> {
        self.state.current_pitcher[side.idx()]
    }

    /// In-game pitch budget for the side's current pitcher.
    pub(crate) fn full_pool(&self, side: TeamSide) -> f32 {
        let stamina_rating = self
            .current_pitcher_id(side)
            .and_then(|id| self.team(side).player(id))
            .and_then(|p| p.pitching.as_ref())
            .map(|p| p.stamina)
            .unwrap_or(40);
        (stamina_rating as f32 * stamina::PITCHES_PER_STAMINA_POINT).max(stamina::MIN_POOL)
    }

    /// `NOT_STARTED -> IN_PROGRESS(1, TOP)`: empty bases, zero score, zero
    /// outs, pitchers-used sets seeded with the starters.
    fn start(&mut self) {
        self.state.phase = GamePhase::InProgress { inning: 1, half: HalfInning::Top };
        self.state.line_score[TeamSide::Away.idx()].push(0);
        for side in [TeamSide::Home, TeamSide::Away] {
            if let Some(id) = self.current_pitcher_id(side) {
                self.state.pitchers_used[side.idx()].push(id);
                // Touch the pitching line so the starter shows in the box
                // even through a perfect outing.
                let _ = self.box_score.pitching_mut(side, id);
            }
        }
    }

    /// Advance one pitch. No-op once the game is over.
    pub fn step(&mut self) -> super::at_bat::PitchEvent {
        if self.is_over() {
            return super::at_bat::PitchEvent::GameOver;
        }
        if self.state.phase == GamePhase::NotStarted {
            self.start();
        }
        if self.half_start_pending {
            self.half_start_pending = false;
            let fielding = self.state.batting_side().flip();
            if self.sub_due[fielding.idx()] || self.stamina_pool[fielding.idx()] <= 0.0 {
                self.perform_substitution(fielding);
            }
        }
        if self.pitch_count >= game_tuning::MAX_PITCHES_PER_GAME {
            // Runaway guard; a real game ends orders of magnitude earlier.
            log::error!(
                "{} vs {}: pitch cap reached, forcing game end",
                self.home.name,
                self.away.name
            );
            self.finish_game();
            return super::at_bat::PitchEvent::GameOver;
        }
        self.resolve_pitch()
    }

    /// Run to completion and produce the result snapshot.
    pub fn simulate(&mut self) -> GameResult {
        while !self.is_over() {
            self.step();
        }
        self.finalize()
    }

    /// Score one runner. Returns immediately when the run ends the game
    /// (walk-off): callers must re-check `is_over()` before scoring further
    /// runners on the same play.
    pub(crate) fn score_runner(&mut self, runner: PlayerId, rbi_to: Option<PlayerId>) {
        if self.is_over() {
            return;
        }
        let batting = self.state.batting_side();
        let fielding = batting.flip();

        self.state.score[batting.idx()] = self.state.score[batting.idx()].saturating_add(1);
        if let Some(entry) = self.state.line_score[batting.idx()].last_mut() {
            *entry = entry.saturating_add(1);
        }
        self.box_score.batting_mut(batting, runner).runs += 1;
        if let Some(batter) = rbi_to {
            self.box_score.batting_mut(batting, batter).rbi += 1;
        }
        if let Some(pitcher) = self.current_pitcher_id(fielding) {
            self.box_score.pitching_mut(fielding, pitcher).runs_allowed += 1;
        }

        self.update_go_ahead();

        // Walk-off: the home team takes the lead in its own half of an
        // inning >= 9 and the game ends at that instant.
        if let GamePhase::InProgress { inning, half: HalfInning::Bottom } = self.state.phase {
            if inning >= game_tuning::REGULATION_INNINGS
                && batting == TeamSide::Home
                && self.state.score[TeamSide::Home.idx()] > self.state.score[TeamSide::Away.idx()]
            {
                self.finish_game();
            }
        }
    }

    fn update_go_ahead(&mut self) {
        let home = self.state.score[TeamSide::Home.idx()];
        let away = self.state.score[TeamSide::Away.idx()];
        if home == away {
            self.go_ahead = None;
            return;
        }
        let leader = if home > away { TeamSide::Home } else { TeamSide::Away };
        if self.go_ahead.map(|g| g.side) != Some(leader) {
            let credited = self.current_pitcher_id(leader);
            let charged = self.current_pitcher_id(leader.flip());
            if let (Some(credited), Some(charged)) = (credited, charged) {
                self.go_ahead = Some(GoAheadRecord { side: leader, credited, charged });
            }
        }
    }

    /// Record `count` outs, crediting the current pitcher, and flip the half
    /// when the third out lands.
    pub(crate) fn record_outs(&mut self, count: u8) {
        if self.is_over() {
            return;
        }
        let fielding = self.state.batting_side().flip();
        let before = self.state.outs;
        let recorded = count.min(3u8.saturating_sub(before));
        self.state.outs += recorded;
        if let Some(pitcher) = self.current_pitcher_id(fielding) {
            self.box_score.pitching_mut(fielding, pitcher).outs_recorded += recorded;
        }
        if self.state.outs >= 3 {
            self.end_half_inning();
        }
    }

    /// Half-inning flip with the end-of-game checks evaluated from the 9th
    /// inning onward.
    fn end_half_inning(&mut self) {
        let (inning, half) = match self.state.phase {
            GamePhase::InProgress { inning, half } => (inning, half),
            _ => return,
        };

        self.state.outs = 0;
        self.state.balls = 0;
        self.state.strikes = 0;
        self.state.bases = [None; 3];

        let home = self.state.score[TeamSide::Home.idx()];
        let away = self.state.score[TeamSide::Away.idx()];

        match half {
            HalfInning::Top => {
                // No bottom half needed when the away side already trails.
                if inning >= game_tuning::REGULATION_INNINGS && home > away {
                    self.finish_game();
                    return;
                }
                self.state.phase = GamePhase::InProgress { inning, half: HalfInning::Bottom };
                self.state.line_score[TeamSide::Home.idx()].push(0);
            }
            HalfInning::Bottom => {
                if inning >= game_tuning::REGULATION_INNINGS && home != away {
                    self.finish_game();
                    return;
                }
                // Tied after a complete inning >= 9: extra innings, no upper
                // bound other than eventual run-scoring.
                self.state.phase = GamePhase::InProgress {
                    inning: inning.saturating_add(1),
                    half: HalfInning::Top,
                };
                self.state.line_score[TeamSide::Away.idx()].push(0);
            }
        }
        self.half_start_pending = true;
    }

    fn finish_game(&mut self) {
        if let GamePhase::InProgress { inning, .. } = self.state.phase {
            self.final_inning = inning;
        }
        self.state.phase = GamePhase::GameOver;
    }

    /// Build the result snapshot. Valid once the game is over (or abandoned).
    pub fn finalize(&self) -> GameResult {
        let home_score = self.state.score[TeamSide::Home.idx()];
        let away_score = self.state.score[TeamSide::Away.idx()];

        let player_name = |side: TeamSide, id: PlayerId| -> Option<String> {
            self.team(side).player(id).map(|p| p.name.clone())
        };

        let (winning_pitcher, losing_pitcher) = match (home_score != away_score, self.go_ahead) {
            (true, Some(record)) => (
                player_name(record.side, record.credited),
                player_name(record.side.flip(), record.charged),
            ),
            _ => (None, None),
        };

        // Save: the last arm on the winning side, if he neither won the game
        // nor let the margin stretch past three.
        let save_pitcher = if home_score != away_score {
            let winner =
                if home_score > away_score { TeamSide::Home } else { TeamSide::Away };
            let margin = home_score.abs_diff(away_score);
            self.state.pitchers_used[winner.idx()]
                .last()
                .filter(|&&last| {
                    margin <= game_tuning::SAVE_MARGIN_MAX
                        && self.go_ahead.map(|g| g.credited) != Some(last)
                        && self.state.pitchers_used[winner.idx()].len() > 1
                })
                .and_then(|&last| player_name(winner, last))
        } else {
            None
        };

        let used_names = |side: TeamSide| -> Vec<String> {
            self.state.pitchers_used[side.idx()]
                .iter()
                .filter_map(|&id| player_name(side, id))
                .collect()
        };

        GameResult {
            home_team: self.home.name.clone(),
            away_team: self.away.name.clone(),
            home_score,
            away_score,
            innings: self.final_inning,
            line_home: self.state.line_score[TeamSide::Home.idx()].clone(),
            line_away: self.state.line_score[TeamSide::Away.idx()].clone(),
            hits_home: self.state.hits[TeamSide::Home.idx()],
            hits_away: self.state.hits[TeamSide::Away.idx()],
            errors_home: self.state.errors[TeamSide::Home.idx()],
            errors_away: self.state.errors[TeamSide::Away.idx()],
            winning_pitcher,
            losing_pitcher,
            save_pitcher,
            home_runs: self.home_run_events.clone(),
            pitchers_used_home: used_names(TeamSide::Home),
            pitchers_used_away: used_names(TeamSide::Away),
            box_score: self.box_score.to_box_score(&self.home, &self.away),
        }
    }

    /// Season total for a home-run event, baseline plus what the hitter has
    /// already done in this game (the box line is incremented first).
    pub(crate) fn season_home_run_total(&self, side: TeamSide, id: PlayerId) -> u32 {
        let baseline =
            self.season_home_runs[side.idx()].get(id).copied().unwrap_or(0);
        baseline + self.box_score.batting_line(side, id).home_runs as u32
    }
}

/// Pick the starter from the rotation, scanning forward from `start_index`
/// and wrapping. Empty rotations get one role-assignment retry before the
/// search falls back to the best arm anywhere on the roster.
fn starter_with_recovery(team: &mut Team, start_index: usize) -> Result<PlayerId> {
    if let Some(id) = find_starter(team, start_index) {
        return Ok(id);
    }
    log::warn!("{}: rotation empty, re-running pitching-role assignment", team.name);
    assign_pitching_roles(team, RosterLevel::Majors);
    if let Some(id) = find_starter(team, start_index) {
        return Ok(id);
    }
    log::warn!("{}: rotation still empty after role-assignment retry", team.name);
    team.players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_pitcher())
        .max_by(|(_, a), (_, b)| {
            a.overall_pitching()
                .partial_cmp(&b.overall_pitching())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(id, _)| id)
        .ok_or(SimError::EmptyRotation { team: team.name.clone() })
}

fn find_starter(team: &Team, start_index: usize) -> Option<PlayerId> {
    (0..ROTATION_SLOTS).find_map(|offset| team.rotation[(start_index + offset) % ROTATION_SLOTS])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::League;
    use crate::roster::generation::generate_team;
    use crate::roster::{assign_levels, RosterConfig};

    fn ready_team(name: &str, league: League, seed: u64) -> Team {
        let mut team = generate_team(name, league, seed);
        assign_levels(&mut team, &RosterConfig::default());
        assign_pitching_roles(&mut team, RosterLevel::Majors);
        team
    }

    fn engine(seed: u64) -> GameEngine {
        let home = ready_team("Harbor Gulls", League::North, 10);
        let away = ready_team("Iron Bears", League::North, 11);
        GameEngine::new(GamePlan::new(home, away, seed)).expect("engine builds")
    }

    /// Put the engine into a hand-built late-game situation. Line scores are
    /// seeded consistently with the requested score.
    fn force_situation(
        engine: &mut GameEngine,
        inning: u8,
        half: HalfInning,
        home: u8,
        away: u8,
        outs: u8,
    ) {
        engine.step(); // leave NOT_STARTED
        engine.state.phase = GamePhase::InProgress { inning, half };
        engine.state.score = [home, away];
        engine.state.outs = outs;
        engine.state.bases = [None; 3];
        let home_halves = match half {
            HalfInning::Top => inning as usize - 1,
            HalfInning::Bottom => inning as usize,
        };
        engine.state.line_score[TeamSide::Away.idx()] = vec![0; inning as usize];
        engine.state.line_score[TeamSide::Away.idx()][0] = away;
        engine.state.line_score[TeamSide::Home.idx()] = vec![0; home_halves];
        if home_halves > 0 {
            engine.state.line_score[TeamSide::Home.idx()][0] = home;
        }
    }

    #[test]
    fn test_first_step_starts_the_game() {
        let mut game = engine(42);
        assert_eq!(game.state().phase, GamePhase::NotStarted);
        game.step();
        assert_eq!(game.state().inning(), 1);
        assert_eq!(game.state().pitchers_used[0].len(), 1);
        assert_eq!(game.state().pitchers_used[1].len(), 1);
    }

    #[test]
    fn test_home_lead_after_top_ninth_skips_bottom() {
        let mut game = engine(42);
        // Away already down 3-5 with two out in the top of the 9th.
        force_situation(&mut game, 9, HalfInning::Top, 5, 3, 2);
        game.record_outs(1);
        assert!(game.is_over());
        let result = game.finalize();
        assert_eq!((result.home_score, result.away_score), (5, 3));
        assert_eq!(result.innings, 9);
        // The home team never batted in the ninth.
        assert_eq!(result.line_home.len(), 8);
        assert_eq!(result.line_away.len(), 9);
    }

    #[test]
    fn test_tie_after_nine_goes_to_extras() {
        let mut game = engine(42);
        force_situation(&mut game, 9, HalfInning::Bottom, 2, 2, 2);
        game.record_outs(1);
        assert!(!game.is_over());
        assert_eq!(
            game.state().phase,
            GamePhase::InProgress { inning: 10, half: HalfInning::Top }
        );
        assert_eq!(game.state().outs, 0);
        assert_eq!(game.state().line_score[TeamSide::Away.idx()].len(), 10);
    }

    #[test]
    fn test_walk_off_ends_game_immediately() {
        let mut game = engine(42);
        force_situation(&mut game, 9, HalfInning::Bottom, 2, 2, 1);
        let runner = game.lineups[TeamSide::Home.idx()].slots[0].player;
        game.score_runner(runner, None);
        assert!(game.is_over());
        let result = game.finalize();
        assert_eq!((result.home_score, result.away_score), (3, 2));
        assert_eq!(result.innings, 9);
    }

    #[test]
    fn test_away_lead_after_bottom_ninth_ends_game() {
        let mut game = engine(42);
        force_situation(&mut game, 9, HalfInning::Bottom, 1, 4, 2);
        game.record_outs(1);
        assert!(game.is_over());
        assert_eq!(game.finalize().winner().map(String::from), Some("Iron Bears".to_string()));
    }

    #[test]
    fn test_line_scores_sum_to_final_score() {
        let mut game = engine(1234);
        let result = game.simulate();
        assert_eq!(
            result.line_home.iter().map(|&r| r as u16).sum::<u16>(),
            result.home_score as u16
        );
        assert_eq!(
            result.line_away.iter().map(|&r| r as u16).sum::<u16>(),
            result.away_score as u16
        );
    }

    #[test]
    fn test_completed_game_reaches_regulation() {
        let mut game = engine(77);
        let result = game.simulate();
        assert!(result.innings >= 9, "ended in inning {}", result.innings);
        assert_ne!(result.home_score, result.away_score, "no ties allowed");
    }

    #[test]
    fn test_same_seed_reproduces_the_game() {
        let a = engine(987).simulate();
        let b = engine(987).simulate();
        assert_eq!(a.home_score, b.home_score);
        assert_eq!(a.away_score, b.away_score);
        assert_eq!(a.pitchers_used_home, b.pitchers_used_home);
        assert_eq!(a.pitchers_used_away, b.pitchers_used_away);
        assert_eq!(a.line_home, b.line_home);
        assert_eq!(a.home_runs, b.home_runs);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let outcomes: Vec<(u8, u8)> = (0..8)
            .map(|seed| {
                let r = engine(seed * 1000 + 1).simulate();
                (r.home_score, r.away_score)
            })
            .collect();
        assert!(outcomes.windows(2).any(|w| w[0] != w[1]), "all seeds identical: {:?}", outcomes);
    }

    #[test]
    fn test_pitchers_used_has_no_duplicates_normally() {
        let mut game = engine(55);
        let result = game.simulate();
        for used in [&result.pitchers_used_home, &result.pitchers_used_away] {
            let mut sorted = used.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), used.len(), "duplicate arm without re-entry: {:?}", used);
        }
    }

    #[test]
    fn test_state_read_only_after_game_over() {
        let mut game = engine(314);
        game.simulate();
        let snapshot = game.state().clone();
        let event = game.step();
        assert_eq!(event, crate::engine::at_bat::PitchEvent::GameOver);
        assert_eq!(game.state().score, snapshot.score);
        assert_eq!(game.state().pitchers_used, snapshot.pitchers_used);
    }

    #[test]
    fn test_winner_gets_winning_pitcher_and_loser_gets_losing() {
        let mut game = engine(4242);
        let result = game.simulate();
        let winner_used = if result.home_score > result.away_score {
            &result.pitchers_used_home
        } else {
            &result.pitchers_used_away
        };
        let loser_used = if result.home_score > result.away_score {
            &result.pitchers_used_away
        } else {
            &result.pitchers_used_home
        };
        let winning = result.winning_pitcher.clone().expect("decided game has a winner");
        let losing = result.losing_pitcher.clone().expect("decided game has a loser");
        assert!(winner_used.contains(&winning));
        assert!(loser_used.contains(&losing));
        if let Some(save) = &result.save_pitcher {
            assert_ne!(save, &winning);
            assert!(winner_used.contains(save));
        }
    }

    #[test]
    fn test_empty_rotation_recovers_before_game_start() {
        let mut home = ready_team("Harbor Gulls", League::North, 10);
        home.clear_pitching_roles();
        let away = ready_team("Iron Bears", League::North, 11);
        let game = GameEngine::new(GamePlan::new(home, away, 5)).expect("recovery succeeds");
        assert!(game.current_pitcher_id(TeamSide::Home).is_some());
    }

    #[test]
    fn test_team_without_pitchers_cannot_start() {
        let mut home = ready_team("Harbor Gulls", League::North, 10);
        home.players.retain(|p| !p.is_pitcher());
        home.clear_pitching_roles();
        let away = ready_team("Iron Bears", League::North, 11);
        let err = GameEngine::new(GamePlan::new(home, away, 5)).expect_err("must fail");
        assert!(matches!(err, SimError::EmptyRotation { .. }));
    }
}
