pub mod json_api;

pub use json_api::{
    generate_league_json, simulate_game_json, GameRequest, GameResponse, LeagueRequest,
    LeagueResponse,
};
