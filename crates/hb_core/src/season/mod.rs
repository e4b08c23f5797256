//! Season Orchestrator.
//!
//! Owns both leagues' teams, the generated schedule, standings and
//! season-cumulative statistics, and drives game simulation across the
//! schedule round by round. Fixtures inside a round are independent (teams
//! are handed to each game as owned copies), so they may run in parallel;
//! every season-aggregate mutation happens in a single sequential fold in
//! fixture order, which also makes parallel and serial runs bit-identical.
//!
//! A season run is never aborted by a single game's fault: a fixture that
//! cannot start is recorded as an unplayed 0-0 default and the run moves on.

pub mod repository;
pub mod standings;
pub mod stats;

pub use repository::{InMemoryTeamRepository, TeamRepository};
pub use standings::{Standings, StandingsRow};
pub use stats::{SeasonBattingTotals, SeasonPitchingTotals, SeasonStats, TeamSeasonStats};

use fxhash::FxHasher;
use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::engine::{GameEngine, GamePlan};
use crate::error::{Result, SimError};
use crate::models::{GameResult, League, Schedule, Team, ROTATION_SLOTS};
use crate::roster::{generate_league, generate_team, RosterConfig};
use crate::scheduler::{build_schedule, ScheduleConfig};

#[derive(Debug, Clone, Copy)]
pub struct SeasonConfig {
    pub seed: u64,
    pub roster: RosterConfig,
    pub schedule: ScheduleConfig,
    /// Simulate fixtures of a round in parallel. Results are identical
    /// either way; this only trades wall clock for cores.
    pub parallel: bool,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            roster: RosterConfig::default(),
            schedule: ScheduleConfig::default(),
            parallel: true,
        }
    }
}

pub struct Season {
    config: SeasonConfig,
    /// Aligned with `schedule.teams`.
    teams: Vec<Team>,
    schedule: Schedule,
    standings: Standings,
    season_stats: SeasonStats,
    /// Season home-run totals per team arena id, fed to games so home-run
    /// events carry the hitter's running season count.
    home_run_totals: Vec<Vec<u32>>,
    /// Player-name lookup per team for folding box scores back onto arenas.
    name_index: Vec<HashMap<String, usize>>,
    results: Vec<Option<GameResult>>,
    games_played: Vec<u32>,
    next_round: u32,
}

impl Season {
    /// Build a season from scratch: generated rosters, assigned levels and
    /// roles, validated schedule.
    pub fn new(north: &[String], south: &[String], config: SeasonConfig) -> Result<Self> {
        let teams = generate_league(north, south, config.seed, &config.roster);
        Self::with_teams(teams, north, south, config)
    }

    /// Build a season over repository-loaded rosters, generating any team
    /// the repository does not know. Loaded teams must satisfy the model
    /// invariants.
    pub fn from_repository(
        repo: &dyn TeamRepository,
        north: &[String],
        south: &[String],
        config: SeasonConfig,
    ) -> Result<Self> {
        let mut teams = Vec::with_capacity(north.len() + south.len());
        for (league, names) in [(League::North, north), (League::South, south)] {
            for name in names {
                let team = match repo.load(name) {
                    Some(team) => {
                        team.validate().map_err(SimError::InvalidTeam)?;
                        team
                    }
                    None => {
                        log::info!("{}: not in repository, generating", name);
                        generate_team(name, league, config.seed)
                    }
                };
                teams.push(team);
            }
        }
        Self::with_teams(teams, north, south, config)
    }

    fn with_teams(
        teams: Vec<Team>,
        north: &[String],
        south: &[String],
        config: SeasonConfig,
    ) -> Result<Self> {
        if teams.is_empty() {
            return Err(SimError::InvalidTeam("season requires at least one team".to_string()));
        }
        let schedule = build_schedule(north, south, &config.schedule)?;
        let standings = Standings::new(&teams);
        let season_stats = SeasonStats::new(teams.len());
        let home_run_totals = teams.iter().map(|t| vec![0; t.players.len()]).collect();
        let name_index = teams
            .iter()
            .map(|t| {
                t.players
                    .iter()
                    .enumerate()
                    .map(|(id, p)| (p.name.clone(), id))
                    .collect()
            })
            .collect();
        let results = vec![None; schedule.game_count()];
        let games_played = vec![0; teams.len()];
        Ok(Self {
            config,
            teams,
            schedule,
            standings,
            season_stats,
            home_run_totals,
            name_index,
            results,
            games_played,
            next_round: 0,
        })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn season_stats(&self) -> &SeasonStats {
        &self.season_stats
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn results(&self) -> &[Option<GameResult>] {
        &self.results
    }

    pub fn is_complete(&self) -> bool {
        self.next_round >= self.schedule.rounds()
    }

    /// Strict lookup; the caller decides how to recover.
    pub fn team_by_name(&self, name: &str) -> Result<&Team> {
        self.teams
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SimError::InvalidTeamSelection { name: name.to_string() })
    }

    /// Lookup with the documented fallback: an unknown selection degrades to
    /// the first team of the primary (north) league rather than failing.
    pub fn team_or_default(&self, name: &str) -> &Team {
        match self.team_by_name(name) {
            Ok(team) => team,
            Err(err) => {
                log::warn!("{}; falling back to the first north-league team", err);
                self.teams
                    .iter()
                    .find(|t| t.league == League::North)
                    .unwrap_or(&self.teams[0])
            }
        }
    }

    /// Per-fixture seed: season seed folded with the fixture index, so a
    /// fixture replays identically regardless of execution order.
    fn fixture_seed(&self, fixture_index: usize) -> u64 {
        let mut hasher = FxHasher::default();
        self.config.seed.hash(&mut hasher);
        fixture_index.hash(&mut hasher);
        hasher.finish()
    }

    fn plan_for_fixture(&self, fixture_index: usize) -> Option<GamePlan> {
        let fixture = self.schedule.fixtures.get(fixture_index)?;
        let home = self.teams.get(fixture.home)?.clone();
        let away = self.teams.get(fixture.away)?.clone();
        let mut plan = GamePlan::new(home, away, self.fixture_seed(fixture_index));
        plan.rotation_index = self.games_played[fixture.home] as usize % ROTATION_SLOTS;
        plan.season_home_runs = Some([
            self.home_run_totals[fixture.home].clone(),
            self.home_run_totals[fixture.away].clone(),
        ]);
        Some(plan)
    }

    fn simulate_fixture(plan: GamePlan) -> GameResult {
        let (home_name, away_name) = (plan.home_team.name.clone(), plan.away_team.name.clone());
        match GameEngine::new(plan) {
            Ok(mut engine) => engine.simulate(),
            Err(err) => {
                log::warn!("{} vs {}: could not start ({})", home_name, away_name, err);
                GameResult::unplayed(home_name, away_name)
            }
        }
    }

    /// Simulate the next round. Plans are fixed before the first pitch, the
    /// games run (in parallel when configured), and the aggregates fold
    /// sequentially in fixture order. Returns the fixture indices played;
    /// empty when the season is complete.
    pub fn play_next_round(&mut self) -> Vec<usize> {
        if self.is_complete() {
            return Vec::new();
        }
        let round = self.next_round;
        self.next_round += 1;

        let indices = self.schedule.round_fixtures(round);
        let plans: Vec<(usize, GamePlan)> = indices
            .iter()
            .filter_map(|&i| self.plan_for_fixture(i).map(|p| (i, p)))
            .collect();

        let outcomes: Vec<(usize, GameResult)> = if self.config.parallel {
            plans
                .into_par_iter()
                .map(|(i, plan)| (i, Self::simulate_fixture(plan)))
                .collect()
        } else {
            plans
                .into_iter()
                .map(|(i, plan)| (i, Self::simulate_fixture(plan)))
                .collect()
        };

        // Single-writer fold, in fixture order.
        for (fixture_index, result) in outcomes {
            self.apply_result(fixture_index, result);
        }
        indices
    }

    /// Cancellation between fixtures only: each call finishes whole rounds,
    /// and state is consistent after every return.
    pub fn simulate_all(&mut self) {
        while !self.is_complete() {
            self.play_next_round();
        }
        log::info!("season complete: {} games", self.results.iter().flatten().count());
    }

    fn apply_result(&mut self, fixture_index: usize, result: GameResult) {
        let Some(fixture) = self.schedule.fixtures.get(fixture_index).copied() else {
            return;
        };
        self.standings.record_result(fixture.home, fixture.away, &result);
        self.season_stats.record_result(fixture.home, fixture.away, &result);

        for (team_index, entries) in [
            (fixture.home, &result.box_score.home_batting),
            (fixture.away, &result.box_score.away_batting),
        ] {
            for entry in entries {
                if entry.line.home_runs == 0 {
                    continue;
                }
                if let Some(&arena_id) = self.name_index[team_index].get(&entry.player) {
                    self.home_run_totals[team_index][arena_id] += entry.line.home_runs as u32;
                }
            }
        }

        self.games_played[fixture.home] += 1;
        self.games_played[fixture.away] += 1;
        self.results[fixture_index] = Some(result);
    }
}
