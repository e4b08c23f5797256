//! Injected persistence seam.
//!
//! The simulation core never touches storage. Hosts that persist rosters
//! implement `TeamRepository` and hand it to the orchestrator; a reloaded
//! team only has to satisfy the model invariants (`Team::validate`).

use crate::error::Result;
use crate::models::Team;
use std::collections::HashMap;

pub trait TeamRepository {
    fn load(&self, name: &str) -> Option<Team>;
    fn save(&mut self, team: &Team) -> Result<()>;
}

/// Map-backed repository for hosts and tests that keep everything resident.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    teams: HashMap<String, Team>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TeamRepository for InMemoryTeamRepository {
    fn load(&self, name: &str) -> Option<Team> {
        self.teams.get(name).cloned()
    }

    fn save(&mut self, team: &Team) -> Result<()> {
        self.teams.insert(team.name.clone(), team.clone());
        Ok(())
    }
}
