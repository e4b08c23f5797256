//! Season schedule data structures.
//!
//! A schedule is an ordered list of fixtures over an indexed team list. The
//! generator in `crate::scheduler` builds and validates these; a reloaded
//! schedule must pass the same `validate()` before use.

use super::team::League;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A team as the scheduler sees it: identity only, no roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledTeam {
    pub name: String,
    pub league: League,
}

/// One scheduled game. `home`/`away` index into `Schedule::teams`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fixture {
    pub home: usize,
    pub away: usize,
    pub round: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub teams: Vec<ScheduledTeam>,
    pub fixtures: Vec<Fixture>,
}

impl Schedule {
    /// Total generated game count (season-progress display surface).
    pub fn game_count(&self) -> usize {
        self.fixtures.len()
    }

    pub fn rounds(&self) -> u32 {
        self.fixtures.iter().map(|f| f.round + 1).max().unwrap_or(0)
    }

    /// Participating team names for a fixture, home first.
    pub fn fixture_teams(&self, index: usize) -> Option<(&str, &str)> {
        let fixture = self.fixtures.get(index)?;
        let home = self.teams.get(fixture.home)?;
        let away = self.teams.get(fixture.away)?;
        Some((home.name.as_str(), away.name.as_str()))
    }

    /// Fixture indices for one round, in generation order.
    pub fn round_fixtures(&self, round: u32) -> Vec<usize> {
        self.fixtures
            .iter()
            .enumerate()
            .filter(|(_, f)| f.round == round)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn home_game_count(&self, team: usize) -> usize {
        self.fixtures.iter().filter(|f| f.home == team).count()
    }

    pub fn away_game_count(&self, team: usize) -> usize {
        self.fixtures.iter().filter(|f| f.away == team).count()
    }

    /// Structural invariants: indices in range, no self-play, no team twice
    /// in the same round. Violations are fatal at generation time.
    pub fn validate(&self) -> Result<(), String> {
        let mut per_round: HashMap<(u32, usize), u32> = HashMap::new();
        for (i, fixture) in self.fixtures.iter().enumerate() {
            if fixture.home >= self.teams.len() || fixture.away >= self.teams.len() {
                return Err(format!("fixture {} references unknown team", i));
            }
            if fixture.home == fixture.away {
                return Err(format!(
                    "fixture {}: {} plays itself in round {}",
                    i, self.teams[fixture.home].name, fixture.round
                ));
            }
            for team in [fixture.home, fixture.away] {
                let entry = per_round.entry((fixture.round, team)).or_insert(0);
                *entry += 1;
                if *entry > 1 {
                    return Err(format!(
                        "{} has two fixtures in round {}",
                        self.teams[team].name, fixture.round
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_team_schedule() -> Schedule {
        Schedule {
            teams: vec![
                ScheduledTeam { name: "Gulls".into(), league: League::North },
                ScheduledTeam { name: "Bears".into(), league: League::North },
            ],
            fixtures: vec![
                Fixture { home: 0, away: 1, round: 0 },
                Fixture { home: 1, away: 0, round: 1 },
            ],
        }
    }

    #[test]
    fn test_validate_accepts_round_trip_pair() {
        assert!(two_team_schedule().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_self_play() {
        let mut schedule = two_team_schedule();
        schedule.fixtures[0].away = 0;
        let err = schedule.validate().expect_err("self-play must fail");
        assert!(err.contains("plays itself"));
    }

    #[test]
    fn test_validate_rejects_double_booking_in_round() {
        let mut schedule = two_team_schedule();
        schedule.fixtures[1].round = 0;
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_fixture_teams_lookup() {
        let schedule = two_team_schedule();
        assert_eq!(schedule.fixture_teams(0), Some(("Gulls", "Bears")));
        assert_eq!(schedule.fixture_teams(7), None);
    }

    #[test]
    fn test_home_away_counts() {
        let schedule = two_team_schedule();
        assert_eq!(schedule.home_game_count(0), 1);
        assert_eq!(schedule.away_game_count(0), 1);
    }
}
