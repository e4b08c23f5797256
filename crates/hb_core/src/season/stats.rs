//! Season-cumulative player statistics.
//!
//! Accumulated from game result box scores by the orchestrator's
//! single-writer fold, keyed by player name within each team.

use crate::models::{GameResult, TeamSide};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeasonBattingTotals {
    pub games: u32,
    pub at_bats: u32,
    pub runs: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub stolen_bases: u32,
}

impl SeasonBattingTotals {
    pub fn batting_average(&self) -> f32 {
        if self.at_bats == 0 {
            0.0
        } else {
            self.hits as f32 / self.at_bats as f32
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeasonPitchingTotals {
    pub games: u32,
    pub outs_recorded: u32,
    pub hits_allowed: u32,
    pub runs_allowed: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub pitches: u32,
    pub wins: u32,
    pub losses: u32,
    pub saves: u32,
}

impl SeasonPitchingTotals {
    /// Runs allowed per nine innings (the engine does not split earned runs).
    pub fn run_average(&self) -> f32 {
        if self.outs_recorded == 0 {
            0.0
        } else {
            self.runs_allowed as f32 * 27.0 / self.outs_recorded as f32
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSeasonStats {
    pub batting: HashMap<String, SeasonBattingTotals>,
    pub pitching: HashMap<String, SeasonPitchingTotals>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonStats {
    per_team: Vec<TeamSeasonStats>,
}

impl SeasonStats {
    pub fn new(team_count: usize) -> Self {
        Self { per_team: vec![TeamSeasonStats::default(); team_count] }
    }

    pub fn team(&self, index: usize) -> Option<&TeamSeasonStats> {
        self.per_team.get(index)
    }

    /// Fold one game result in. `home`/`away` are season team indices.
    pub fn record_result(&mut self, home: usize, away: usize, result: &GameResult) {
        for (side, team_index) in [(TeamSide::Home, home), (TeamSide::Away, away)] {
            let Some(team_stats) = self.per_team.get_mut(team_index) else {
                continue;
            };
            let (batting, pitching) = match side {
                TeamSide::Home => (&result.box_score.home_batting, &result.box_score.home_pitching),
                TeamSide::Away => (&result.box_score.away_batting, &result.box_score.away_pitching),
            };
            for entry in batting {
                let totals = team_stats.batting.entry(entry.player.clone()).or_default();
                totals.games += 1;
                totals.at_bats += entry.line.at_bats as u32;
                totals.runs += entry.line.runs as u32;
                totals.hits += entry.line.hits as u32;
                totals.doubles += entry.line.doubles as u32;
                totals.triples += entry.line.triples as u32;
                totals.home_runs += entry.line.home_runs as u32;
                totals.rbi += entry.line.rbi as u32;
                totals.walks += entry.line.walks as u32;
                totals.strikeouts += entry.line.strikeouts as u32;
                totals.stolen_bases += entry.line.stolen_bases as u32;
            }
            for entry in pitching {
                let totals = team_stats.pitching.entry(entry.player.clone()).or_default();
                totals.games += 1;
                totals.outs_recorded += entry.line.outs_recorded as u32;
                totals.hits_allowed += entry.line.hits_allowed as u32;
                totals.runs_allowed += entry.line.runs_allowed as u32;
                totals.walks += entry.line.walks as u32;
                totals.strikeouts += entry.line.strikeouts as u32;
                totals.pitches += entry.line.pitches as u32;
            }

            let side_won = match side {
                TeamSide::Home => result.home_score > result.away_score,
                TeamSide::Away => result.away_score > result.home_score,
            };
            if side_won {
                if let Some(name) = &result.winning_pitcher {
                    if let Some(totals) = team_stats.pitching.get_mut(name) {
                        totals.wins += 1;
                    }
                }
                if let Some(name) = &result.save_pitcher {
                    if let Some(totals) = team_stats.pitching.get_mut(name) {
                        totals.saves += 1;
                    }
                }
            } else if let Some(name) = &result.losing_pitcher {
                if let Some(totals) = team_stats.pitching.get_mut(name) {
                    totals.losses += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BattingBoxEntry, BattingLine, GameResult, PitchingBoxEntry, PitchingLine};

    fn sample_result() -> GameResult {
        let mut result = GameResult::unplayed("Gulls", "Bears");
        result.home_score = 3;
        result.away_score = 1;
        result.winning_pitcher = Some("Arlo Finch".to_string());
        result.losing_pitcher = Some("Ben Okafor".to_string());
        result.box_score.home_batting.push(BattingBoxEntry {
            player: "Sam Decker".to_string(),
            line: BattingLine { at_bats: 4, hits: 2, home_runs: 1, rbi: 2, ..Default::default() },
        });
        result.box_score.home_pitching.push(PitchingBoxEntry {
            player: "Arlo Finch".to_string(),
            line: PitchingLine { outs_recorded: 27, strikeouts: 8, ..Default::default() },
        });
        result.box_score.away_pitching.push(PitchingBoxEntry {
            player: "Ben Okafor".to_string(),
            line: PitchingLine { outs_recorded: 24, runs_allowed: 3, ..Default::default() },
        });
        result
    }

    #[test]
    fn test_totals_accumulate_across_games() {
        let mut stats = SeasonStats::new(2);
        stats.record_result(0, 1, &sample_result());
        stats.record_result(0, 1, &sample_result());

        let decker = stats.team(0).unwrap().batting.get("Sam Decker").unwrap();
        assert_eq!(decker.games, 2);
        assert_eq!(decker.at_bats, 8);
        assert_eq!(decker.home_runs, 2);
        assert!((decker.batting_average() - 0.5).abs() < 1e-6);

        let finch = stats.team(0).unwrap().pitching.get("Arlo Finch").unwrap();
        assert_eq!(finch.wins, 2);
        assert_eq!(finch.outs_recorded, 54);

        let okafor = stats.team(1).unwrap().pitching.get("Ben Okafor").unwrap();
        assert_eq!(okafor.losses, 2);
        assert!((okafor.run_average() - 3.375).abs() < 1e-3);
    }
}
