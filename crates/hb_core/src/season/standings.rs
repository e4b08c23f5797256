use crate::models::{GameResult, League, Team};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: String,
    pub league: League,
    pub wins: u32,
    pub losses: u32,
    pub runs_for: u32,
    pub runs_against: u32,
}

impl StandingsRow {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn winning_percentage(&self) -> f32 {
        if self.games() == 0 {
            0.0
        } else {
            self.wins as f32 / self.games() as f32
        }
    }

    pub fn run_differential(&self) -> i64 {
        self.runs_for as i64 - self.runs_against as i64
    }
}

/// Season standings, row-aligned with the season's team indices. Mutated by
/// a single writer (the orchestrator's fold) only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standings {
    rows: Vec<StandingsRow>,
}

impl Standings {
    pub fn new(teams: &[Team]) -> Self {
        Self {
            rows: teams
                .iter()
                .map(|t| StandingsRow {
                    team: t.name.clone(),
                    league: t.league,
                    wins: 0,
                    losses: 0,
                    runs_for: 0,
                    runs_against: 0,
                })
                .collect(),
        }
    }

    pub fn row(&self, team: usize) -> Option<&StandingsRow> {
        self.rows.get(team)
    }

    pub fn rows(&self) -> &[StandingsRow] {
        &self.rows
    }

    /// Tied games never reach here; an unplayed 0-0 default counts for
    /// neither column.
    pub fn record_result(&mut self, home: usize, away: usize, result: &GameResult) {
        if home >= self.rows.len() || away >= self.rows.len() {
            return;
        }
        self.rows[home].runs_for += result.home_score as u32;
        self.rows[home].runs_against += result.away_score as u32;
        self.rows[away].runs_for += result.away_score as u32;
        self.rows[away].runs_against += result.home_score as u32;

        if result.home_score > result.away_score {
            self.rows[home].wins += 1;
            self.rows[away].losses += 1;
        } else if result.away_score > result.home_score {
            self.rows[away].wins += 1;
            self.rows[home].losses += 1;
        }
    }

    /// League table sorted by winning percentage, run differential breaking
    /// ties.
    pub fn table(&self, league: League) -> Vec<&StandingsRow> {
        let mut rows: Vec<&StandingsRow> =
            self.rows.iter().filter(|r| r.league == league).collect();
        rows.sort_by(|a, b| {
            b.winning_percentage()
                .partial_cmp(&a.winning_percentage())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.run_differential().cmp(&a.run_differential()))
        });
        rows
    }
}
