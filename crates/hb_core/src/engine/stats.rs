//! Box score accumulation.
//!
//! Counters are recorded during simulation by the at-bat engine; nothing
//! here re-derives them at the end beyond assembling the entries for players
//! who actually appeared.

use crate::models::{
    BattingBoxEntry, BattingLine, BoxScore, PitchingBoxEntry, PitchingLine, PlayerId, Team,
    TeamSide,
};

#[derive(Debug, Clone)]
pub struct BoxAccumulator {
    batting: [Vec<BattingLine>; 2],
    pitching: [Vec<PitchingLine>; 2],
    batted: [Vec<bool>; 2],
    pitched: [Vec<bool>; 2],
}

impl BoxAccumulator {
    pub fn new(home_arena: usize, away_arena: usize) -> Self {
        Self {
            batting: [
                vec![BattingLine::default(); home_arena],
                vec![BattingLine::default(); away_arena],
            ],
            pitching: [
                vec![PitchingLine::default(); home_arena],
                vec![PitchingLine::default(); away_arena],
            ],
            batted: [vec![false; home_arena], vec![false; away_arena]],
            pitched: [vec![false; home_arena], vec![false; away_arena]],
        }
    }

    pub fn batting_mut(&mut self, side: TeamSide, id: PlayerId) -> &mut BattingLine {
        self.batted[side.idx()][id] = true;
        &mut self.batting[side.idx()][id]
    }

    pub fn pitching_mut(&mut self, side: TeamSide, id: PlayerId) -> &mut PitchingLine {
        self.pitched[side.idx()][id] = true;
        &mut self.pitching[side.idx()][id]
    }

    pub fn batting_line(&self, side: TeamSide, id: PlayerId) -> &BattingLine {
        &self.batting[side.idx()][id]
    }

    /// Assemble the box score for everyone who appeared, in arena order.
    pub fn to_box_score(&self, home: &Team, away: &Team) -> BoxScore {
        let collect_batting = |side: TeamSide, team: &Team| -> Vec<BattingBoxEntry> {
            self.batted[side.idx()]
                .iter()
                .enumerate()
                .filter(|&(_, &appeared)| appeared)
                .filter_map(|(id, _)| {
                    team.player(id).map(|p| BattingBoxEntry {
                        player: p.name.clone(),
                        line: self.batting[side.idx()][id],
                    })
                })
                .collect()
        };
        let collect_pitching = |side: TeamSide, team: &Team| -> Vec<PitchingBoxEntry> {
            self.pitched[side.idx()]
                .iter()
                .enumerate()
                .filter(|&(_, &appeared)| appeared)
                .filter_map(|(id, _)| {
                    team.player(id).map(|p| PitchingBoxEntry {
                        player: p.name.clone(),
                        line: self.pitching[side.idx()][id],
                    })
                })
                .collect()
        };

        BoxScore {
            home_batting: collect_batting(TeamSide::Home, home),
            away_batting: collect_batting(TeamSide::Away, away),
            home_pitching: collect_pitching(TeamSide::Home, home),
            away_pitching: collect_pitching(TeamSide::Away, away),
        }
    }
}
