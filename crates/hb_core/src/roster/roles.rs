//! Pitching-role assignment.
//!
//! Fills a team's rotation, closer and setup slots from one tier's pitcher
//! pool. The assignment is recomputed from scratch on every call, so it is
//! idempotent for an unchanged pool and safe to re-run after level churn
//! (the recovery path for an emptied rotation).

use crate::models::{PitchingRatings, PlayerId, RosterLevel, Team};

/// Rotation composite: starters live on stamina, with control and stuff
/// close behind.
pub fn rotation_score(ratings: &PitchingRatings) -> f32 {
    ratings.stamina as f32 * 0.40 + ratings.control as f32 * 0.30 + ratings.stuff as f32 * 0.30
}

/// Bullpen composite: closers and setup arms are control/stuff first, with
/// stamina barely weighted.
pub fn bullpen_score(ratings: &PitchingRatings) -> f32 {
    ratings.control as f32 * 0.40 + ratings.stuff as f32 * 0.40 + ratings.stamina as f32 * 0.20
}

fn ranked_pool(team: &Team, level: RosterLevel, score: fn(&PitchingRatings) -> f32) -> Vec<PlayerId> {
    let mut pool: Vec<PlayerId> = team
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.level == level && p.is_pitcher())
        .map(|(id, _)| id)
        .collect();
    pool.sort_by(|&a, &b| {
        let sa = team.players[a].pitching.as_ref().map(score).unwrap_or(0.0);
        let sb = team.players[b].pitching.as_ref().map(score).unwrap_or(0.0);
        sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
    });
    pool
}

/// Assign rotation (8), closer (4) and setup (8) slots from `level`'s
/// pitcher pool. Each pitcher lands in at most one slot category; an
/// understaffed pool leaves trailing slots unset, which is a valid state,
/// not an error.
pub fn assign_pitching_roles(team: &mut Team, level: RosterLevel) {
    team.clear_pitching_roles();

    let rotation_ranked = ranked_pool(team, level, rotation_score);
    let mut taken: Vec<PlayerId> = Vec::new();

    for (slot, &id) in rotation_ranked.iter().take(team.rotation.len()).enumerate() {
        team.rotation[slot] = Some(id);
        taken.push(id);
    }

    let bullpen_ranked: Vec<PlayerId> = ranked_pool(team, level, bullpen_score)
        .into_iter()
        .filter(|id| !taken.contains(id))
        .collect();

    let mut remaining = bullpen_ranked.into_iter();
    for slot in 0..team.closers.len() {
        team.closers[slot] = remaining.next();
    }
    for slot in 0..team.setup.len() {
        team.setup[slot] = remaining.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::League;
    use crate::roster::generation::generate_team;
    use crate::roster::{assign_levels, RosterConfig};

    fn assigned_team(seed: u64) -> Team {
        let mut team = generate_team("Harbor Gulls", League::North, seed);
        assign_levels(&mut team, &RosterConfig::default());
        assign_pitching_roles(&mut team, RosterLevel::Majors);
        team
    }

    #[test]
    fn test_assignment_is_idempotent() {
        let mut team = assigned_team(42);
        let rotation = team.rotation;
        let closers = team.closers;
        let setup = team.setup;
        assign_pitching_roles(&mut team, RosterLevel::Majors);
        assert_eq!(team.rotation, rotation);
        assert_eq!(team.closers, closers);
        assert_eq!(team.setup, setup);
    }

    #[test]
    fn test_each_pitcher_holds_at_most_one_slot() {
        let team = assigned_team(7);
        assert!(team.validate().is_ok(), "{:?}", team.validate());
    }

    #[test]
    fn test_rotation_ordered_by_rotation_score() {
        let team = assigned_team(11);
        let scores: Vec<f32> = team
            .rotation
            .iter()
            .flatten()
            .filter_map(|&id| team.players[id].pitching.as_ref().map(rotation_score))
            .collect();
        for pair in scores.windows(2) {
            assert!(pair[0] >= pair[1], "rotation order broken: {:?}", scores);
        }
    }

    #[test]
    fn test_understaffed_pool_leaves_unset_slots() {
        let mut team = generate_team("Harbor Gulls", League::North, 13);
        // Push all but three pitchers off the majors.
        let mut kept = 0;
        for player in &mut team.players {
            if player.is_pitcher() {
                kept += 1;
                player.level =
                    if kept <= 3 { RosterLevel::Majors } else { RosterLevel::DoubleA };
            }
        }
        assign_pitching_roles(&mut team, RosterLevel::Majors);

        let filled = team.rotation.iter().flatten().count();
        assert_eq!(filled, 3);
        assert!(team.closers.iter().all(|slot| slot.is_none()));
        assert!(team.setup.iter().all(|slot| slot.is_none()));
        assert!(team.validate().is_ok());
    }

    #[test]
    fn test_rerun_after_level_churn_recovers() {
        let mut team = assigned_team(17);
        // Levels change under the assignment; a re-run must not panic or
        // leave stale ids behind.
        for player in &mut team.players {
            if player.is_pitcher() {
                player.level = RosterLevel::TripleA;
            }
        }
        assign_pitching_roles(&mut team, RosterLevel::Majors);
        assert!(team.rotation.iter().all(|slot| slot.is_none()));

        assign_pitching_roles(&mut team, RosterLevel::TripleA);
        assert!(team.rotation.iter().any(|slot| slot.is_some()));
        assert!(team.validate().is_ok());
    }
}
