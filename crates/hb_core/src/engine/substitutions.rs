//! Pitcher substitution logic.
//!
//! Consumes the substitution-due signal raised by the at-bat engine. Relief
//! arms are pulled from rotation -> setup -> closer pools in that priority
//! order for the remainder of the game; every incoming pitcher is recorded
//! in the side's pitchers-used set.
//!
//! An exhausted bullpen is a recoverable fault, never a crash: the
//! least-recently-used previously-pulled arm re-enters, and the game always
//! produces a final score.

use super::game::GameEngine;
use crate::models::{PlayerId, TeamSide};

impl GameEngine {
    /// Next fresh arm by pool priority, skipping anyone already used.
    fn next_available_arm(&self, side: TeamSide) -> Option<PlayerId> {
        let team = self.team(side);
        let used = &self.state.pitchers_used[side.idx()];
        team.rotation
            .iter()
            .chain(team.setup.iter())
            .chain(team.closers.iter())
            .filter_map(|slot| *slot)
            .find(|id| !used.contains(id))
    }

    /// Exhausted-bullpen fallback: re-enter the least recently used arm.
    /// The pitchers-used set keeps the duplicate entry so the re-entry is
    /// visible in the result.
    fn reentry_arm(&self, side: TeamSide) -> Option<PlayerId> {
        let current = self.current_pitcher_id(side);
        self.state.pitchers_used[side.idx()]
            .iter()
            .copied()
            .find(|&id| Some(id) != current)
    }

    /// Swap in the next pitcher for `side`. Called by the state machine at
    /// half-inning boundaries when the substitution signal is up.
    pub(crate) fn perform_substitution(&mut self, side: TeamSide) {
        let incoming = match self.next_available_arm(side) {
            Some(id) => Some(id),
            None => {
                log::warn!(
                    "{}: bullpen exhausted, re-entering least recently used arm",
                    self.team(side).name
                );
                self.reentry_arm(side)
            }
        };

        let incoming = match incoming {
            Some(id) => id,
            None => {
                // A one-pitcher staff rides out the rest of the game.
                self.sub_due[side.idx()] = false;
                self.batters_faced[side.idx()] = 0;
                return;
            }
        };

        log::debug!(
            "{}: pitching change, {} in",
            self.team(side).name,
            self.team(side).player(incoming).map(|p| p.name.as_str()).unwrap_or("?")
        );

        self.state.current_pitcher[side.idx()] = Some(incoming);
        self.state.pitchers_used[side.idx()].push(incoming);
        self.sub_due[side.idx()] = false;
        self.batters_faced[side.idx()] = 0;
        self.stamina_pool[side.idx()] = self.full_pool(side);
    }
}
