//! JSON API for host integration.
//!
//! String-in/string-out entry points so embedding hosts never link against
//! the model types directly. Envelopes carry a `schema_version`; requests
//! with a version this build does not understand are rejected rather than
//! half-parsed.

use crate::engine::{GameEngine, GamePlan};
use crate::error::{Result, SimError};
use crate::models::{GameResult, Team};
use crate::roster::{generate_league, RosterConfig};
use crate::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: Team,
    pub away_team: Team,
    #[serde(default)]
    pub rotation_index: usize,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub result: GameResult,
}

#[derive(Debug, Deserialize)]
pub struct LeagueRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub north: Vec<String>,
    pub south: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LeagueResponse {
    pub schema_version: u8,
    pub teams: Vec<Team>,
}

fn check_schema_version(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(SimError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

/// Simulate one game to completion from a JSON request.
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    check_schema_version(request.schema_version)?;

    let mut plan = GamePlan::new(request.home_team, request.away_team, request.seed);
    plan.rotation_index = request.rotation_index;
    let mut engine = GameEngine::new(plan)?;
    let result = engine.simulate();

    let response = GameResponse { schema_version: SCHEMA_VERSION, result };
    Ok(serde_json::to_string(&response)?)
}

/// Generate both leagues' rosters (pools populated, levels and pitching
/// roles assigned) from a JSON request.
pub fn generate_league_json(request_json: &str) -> Result<String> {
    let request: LeagueRequest = serde_json::from_str(request_json)?;
    check_schema_version(request.schema_version)?;

    let teams =
        generate_league(&request.north, &request.south, request.seed, &RosterConfig::default());
    let response = LeagueResponse { schema_version: SCHEMA_VERSION, teams };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn league_request() -> String {
        json!({
            "schema_version": 1,
            "seed": 42,
            "north": ["Harbor Gulls", "Iron Bears"],
            "south": ["Dust Devils", "River Kings"],
        })
        .to_string()
    }

    fn game_request() -> String {
        let league = generate_league_json(&league_request()).expect("league generates");
        let parsed: serde_json::Value = serde_json::from_str(&league).unwrap();
        json!({
            "schema_version": 1,
            "seed": 7,
            "home_team": parsed["teams"][0],
            "away_team": parsed["teams"][2],
        })
        .to_string()
    }

    #[test]
    fn test_generate_league_round_trips() {
        let response = generate_league_json(&league_request()).expect("generates");
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["teams"].as_array().unwrap().len(), 4);
        assert_eq!(parsed["teams"][0]["name"], "Harbor Gulls");
    }

    #[test]
    fn test_simulate_game_produces_result() {
        let response = simulate_game_json(&game_request()).expect("simulates");
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        let result = &parsed["result"];
        assert!(result["home_score"].is_number());
        assert!(result["innings"].as_u64().unwrap() >= 9);
        assert!(!result["pitchers_used_home"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_schema_version_is_rejected() {
        let request = json!({
            "schema_version": 9,
            "seed": 1,
            "north": ["A"],
            "south": ["B"],
        })
        .to_string();
        assert!(matches!(
            generate_league_json(&request),
            Err(SimError::SchemaVersion { found: 9, expected: 1 })
        ));
    }

    #[test]
    fn test_malformed_request_is_a_deserialization_error() {
        assert!(matches!(
            simulate_game_json("{not json"),
            Err(SimError::Serialization(_)) | Err(SimError::Deserialization(_))
        ));
    }
}
