use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("bullpen exhausted for {team}: no eligible pitcher for substitution")]
    ExhaustedBullpen { team: String },

    #[error("empty rotation for {team}: role assignment produced no starters")]
    EmptyRotation { team: String },

    #[error("malformed schedule: {reason}")]
    MalformedSchedule { reason: String },

    #[error("unknown team: {name}")]
    InvalidTeamSelection { name: String },

    #[error("invalid team: {0}")]
    InvalidTeam(String),

    #[error("invalid lineup: {0}")]
    InvalidLineup(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },
}

impl SimError {
    /// Recoverable faults degrade in place (forced substitutions, fallback
    /// team selection); the rest abort the operation that raised them.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimError::ExhaustedBullpen { .. } => true,
            SimError::EmptyRotation { .. } => true,
            SimError::InvalidTeamSelection { .. } => true,
            SimError::MalformedSchedule { .. } => false,
            SimError::InvalidTeam(_) => false,
            SimError::InvalidLineup(_) => false,
            SimError::Serialization(_) => false,
            SimError::Deserialization(_) => false,
            SimError::SchemaVersion { .. } => false,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            SimError::Deserialization(err.to_string())
        } else {
            SimError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
