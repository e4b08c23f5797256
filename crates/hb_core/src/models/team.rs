use super::player::{Player, PlayerId, RosterLevel, RosterStatus};
use serde::{Deserialize, Serialize};

/// League grouping. Purely an identity concern; the scheduler weights
/// intra-league against inter-league play with it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum League {
    North,
    South,
}

impl League {
    pub fn other(&self) -> League {
        match self {
            League::North => League::South,
            League::South => League::North,
        }
    }
}

/// Home/away orientation inside a single game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn flip(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Index into `[home, away]` pairs.
    pub fn idx(&self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }
}

pub const ROTATION_SLOTS: usize = 8;
pub const CLOSER_SLOTS: usize = 4;
pub const SETUP_SLOTS: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub league: League,
    pub budget: u32,
    /// Player arena. Role slots and lineups index into this, so the arena
    /// order must stay stable once slots are assigned.
    pub players: Vec<Player>,
    /// Starting rotation in priority order. `None` marks an unfilled slot;
    /// slot position is meaningful (rotation order), so empty slots are
    /// explicit rather than omitted.
    #[serde(default = "empty_rotation")]
    pub rotation: [Option<PlayerId>; ROTATION_SLOTS],
    #[serde(default = "empty_closers")]
    pub closers: [Option<PlayerId>; CLOSER_SLOTS],
    #[serde(default = "empty_setup")]
    pub setup: [Option<PlayerId>; SETUP_SLOTS],
}

fn empty_rotation() -> [Option<PlayerId>; ROTATION_SLOTS] {
    [None; ROTATION_SLOTS]
}

fn empty_closers() -> [Option<PlayerId>; CLOSER_SLOTS] {
    [None; CLOSER_SLOTS]
}

fn empty_setup() -> [Option<PlayerId>; SETUP_SLOTS] {
    [None; SETUP_SLOTS]
}

impl Team {
    pub fn new(name: impl Into<String>, league: League, budget: u32) -> Self {
        Self {
            name: name.into(),
            league,
            budget,
            players: Vec::new(),
            rotation: empty_rotation(),
            closers: empty_closers(),
            setup: empty_setup(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Sum of active-roster salaries.
    pub fn payroll(&self) -> u32 {
        self.players
            .iter()
            .filter(|p| p.status == RosterStatus::Active)
            .map(|p| p.salary)
            .sum()
    }

    /// Player ids at a roster level, in arena order.
    pub fn ids_at_level(&self, level: RosterLevel) -> Vec<PlayerId> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.level == level)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn clear_pitching_roles(&mut self) {
        self.rotation = empty_rotation();
        self.closers = empty_closers();
        self.setup = empty_setup();
    }

    fn slot_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.rotation
            .iter()
            .chain(self.closers.iter())
            .chain(self.setup.iter())
            .filter_map(|slot| *slot)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("team name must not be empty".to_string());
        }
        if self.players.is_empty() {
            return Err("team must have at least one player".to_string());
        }

        // Slot lists must never reference a player outside the arena.
        for id in self.slot_ids() {
            if id >= self.players.len() {
                return Err(format!(
                    "role slot references player {} outside arena of {}",
                    id,
                    self.players.len()
                ));
            }
            if !self.players[id].is_pitcher() {
                return Err(format!(
                    "role slot references non-pitcher {}",
                    self.players[id].name
                ));
            }
        }

        // A player is assigned to at most one slot category.
        let mut seen = Vec::new();
        for id in self.slot_ids() {
            if seen.contains(&id) {
                return Err(format!(
                    "player {} assigned to more than one pitching slot",
                    self.players[id].name
                ));
            }
            seen.push(id);
        }

        Ok(())
    }
}
