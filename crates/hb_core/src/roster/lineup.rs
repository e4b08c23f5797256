//! Batting order and defensive assignment.
//!
//! Nine lineup slots: the eight fielding positions plus a designated hitter
//! (pitchers do not bat). Positions are filled greedily, best available
//! rating-weighted eligibility first, and the order is sorted by overall
//! batting so the lineup is deterministic for an unchanged roster.

use crate::error::{Result, SimError};
use crate::models::{PlayerId, Position, RosterLevel, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineupSlot {
    pub player: PlayerId,
    /// `None` marks the designated hitter.
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineup {
    /// Batting order, first entry leads off.
    pub slots: Vec<LineupSlot>,
}

impl Lineup {
    pub fn fielder_at(&self, position: Position) -> Option<PlayerId> {
        self.slots
            .iter()
            .find(|slot| slot.position == Some(position))
            .map(|slot| slot.player)
    }

    pub fn batter(&self, order_index: usize) -> Option<PlayerId> {
        self.slots.get(order_index % self.slots.len().max(1)).map(|slot| slot.player)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Fill order: premium defensive spots first so the scarce gloves land where
/// they matter.
const FILL_ORDER: [Position; 8] = [
    Position::Catcher,
    Position::Shortstop,
    Position::CenterField,
    Position::SecondBase,
    Position::ThirdBase,
    Position::RightField,
    Position::LeftField,
    Position::FirstBase,
];

/// Rating-weighted eligibility. Ineligible players still score (discounted
/// heavily) so an understaffed roster fields nine rather than crashing.
fn fit_score(team: &Team, id: PlayerId, position: Position) -> f32 {
    const INELIGIBLE_DISCOUNT: f32 = 0.25;
    let player = &team.players[id];
    let proficiency = player.proficiency_at(position).unwrap_or(INELIGIBLE_DISCOUNT);
    player.overall_batting() * (0.5 + 0.5 * proficiency)
}

/// Build the nine-slot lineup from the majors-level position players,
/// falling back to the whole arena when the majors cannot field nine.
pub fn build_lineup(team: &Team) -> Result<Lineup> {
    let mut candidates: Vec<PlayerId> = team
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.level == RosterLevel::Majors && !p.is_pitcher())
        .map(|(id, _)| id)
        .collect();
    if candidates.len() < 9 {
        candidates = (0..team.players.len()).filter(|&id| !team.players[id].is_pitcher()).collect();
    }
    if candidates.len() < 9 {
        // Last resort: pitchers in the field beats forfeiting.
        candidates = (0..team.players.len()).collect();
    }
    if candidates.len() < 9 {
        return Err(SimError::InvalidLineup(format!(
            "{} cannot field nine players ({} available)",
            team.name,
            candidates.len()
        )));
    }

    let mut slots: Vec<LineupSlot> = Vec::with_capacity(9);
    let mut used: Vec<PlayerId> = Vec::new();

    for position in FILL_ORDER {
        let pick = candidates
            .iter()
            .copied()
            .filter(|id| !used.contains(id))
            .max_by(|&a, &b| {
                fit_score(team, a, position)
                    .partial_cmp(&fit_score(team, b, position))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        if let Some(id) = pick {
            used.push(id);
            slots.push(LineupSlot { player: id, position: Some(position) });
        }
    }

    // Designated hitter: best remaining bat.
    let dh = candidates
        .iter()
        .copied()
        .filter(|id| !used.contains(id))
        .max_by(|&a, &b| {
            team.players[a]
                .overall_batting()
                .partial_cmp(&team.players[b].overall_batting())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(id) = dh {
        slots.push(LineupSlot { player: id, position: None });
    }

    if slots.len() < 9 {
        return Err(SimError::InvalidLineup(format!(
            "{} filled only {} lineup slots",
            team.name,
            slots.len()
        )));
    }

    // Batting order: best overall bats hit first.
    slots.sort_by(|a, b| {
        team.players[b.player]
            .overall_batting()
            .partial_cmp(&team.players[a.player].overall_batting())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(Lineup { slots })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::League;
    use crate::roster::generation::generate_team;
    use crate::roster::{assign_levels, RosterConfig};

    fn ready_team() -> Team {
        let mut team = generate_team("Harbor Gulls", League::North, 42);
        assign_levels(&mut team, &RosterConfig::default());
        team
    }

    #[test]
    fn test_lineup_has_nine_unique_players() {
        let team = ready_team();
        let lineup = build_lineup(&team).expect("lineup builds");
        assert_eq!(lineup.len(), 9);
        let mut ids: Vec<PlayerId> = lineup.slots.iter().map(|s| s.player).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn test_every_fielding_position_is_covered_once() {
        let team = ready_team();
        let lineup = build_lineup(&team).expect("lineup builds");
        for position in Position::fielding_positions() {
            assert!(lineup.fielder_at(position).is_some(), "{:?} uncovered", position);
        }
        let dh_count = lineup.slots.iter().filter(|s| s.position.is_none()).count();
        assert_eq!(dh_count, 1);
    }

    #[test]
    fn test_batting_order_descends_by_overall() {
        let team = ready_team();
        let lineup = build_lineup(&team).expect("lineup builds");
        let ratings: Vec<f32> =
            lineup.slots.iter().map(|s| team.players[s.player].overall_batting()).collect();
        for pair in ratings.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_lineup_is_deterministic() {
        let team = ready_team();
        assert_eq!(build_lineup(&team).unwrap(), build_lineup(&team).unwrap());
    }

    #[test]
    fn test_tiny_roster_fails_cleanly() {
        let mut team = ready_team();
        team.players.truncate(5);
        assert!(matches!(build_lineup(&team), Err(SimError::InvalidLineup(_))));
    }

    #[test]
    fn test_batter_wraps_around_the_order() {
        let team = ready_team();
        let lineup = build_lineup(&team).expect("lineup builds");
        assert_eq!(lineup.batter(0), lineup.batter(9));
    }
}
