//! Roster level assignment.
//!
//! Partitions a team's pool into tiers by role-appropriate overall rating:
//! pitchers ranked by `overall_pitching()`, everyone else by
//! `overall_batting()`. Stable sorts preserve generation order on rating
//! ties, so the partition is deterministic for identical ratings.

use crate::models::{PlayerId, RosterLevel, RosterStatus, Team};
use crate::roster::RosterConfig;

/// Rank `ids` by `score` descending; arena order breaks ties (stable sort).
fn rank_desc(team: &Team, ids: &mut [PlayerId], score: fn(&crate::models::Player) -> f32) {
    ids.sort_by(|&a, &b| {
        score(&team.players[b])
            .partial_cmp(&score(&team.players[a]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Assign roster levels. Top-N pitchers and top-M batters go to the majors
/// (active roster); the next N/M to the second tier; the remainder to the
/// third. Developmental players are never promoted to the top tier
/// regardless of rating.
pub fn assign_levels(team: &mut Team, config: &RosterConfig) {
    let mut pitchers: Vec<PlayerId> = Vec::new();
    let mut batters: Vec<PlayerId> = Vec::new();
    for (id, player) in team.players.iter().enumerate() {
        if player.is_pitcher() {
            pitchers.push(id);
        } else {
            batters.push(id);
        }
    }

    rank_desc(team, &mut pitchers, |p| p.overall_pitching());
    rank_desc(team, &mut batters, |p| p.overall_batting());

    assign_group(team, &pitchers, config.majors_pitchers);
    assign_group(team, &batters, config.majors_batters);
}

fn assign_group(team: &mut Team, ranked: &[PlayerId], top_count: usize) {
    let mut promoted = 0usize;
    let mut passed_over: Vec<PlayerId> = Vec::new();

    for &id in ranked {
        if promoted < top_count && !team.players[id].developmental {
            team.players[id].level = RosterLevel::Majors;
            team.players[id].status = RosterStatus::Active;
            promoted += 1;
        } else {
            passed_over.push(id);
        }
    }

    // The remainder splits into the lower tiers, best first.
    for (rank, &id) in passed_over.iter().enumerate() {
        let player = &mut team.players[id];
        player.status = RosterStatus::Farm;
        player.level = if rank < top_count { RosterLevel::TripleA } else { RosterLevel::DoubleA };
    }
}
