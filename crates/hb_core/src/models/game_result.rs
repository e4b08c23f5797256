//! Game result snapshot.
//!
//! The output side of the simulation pipeline: everything a result-display
//! collaborator needs about a finished game, with no live engine state
//! attached. Serializable as-is across the JSON boundary.

use serde::{Deserialize, Serialize};

/// A home run as it happened, with the hitter's season total at that moment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HomeRunEvent {
    pub player: String,
    pub season_total: u32,
    pub team: String,
}

/// Per-batter box score line.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BattingLine {
    pub at_bats: u8,
    pub runs: u8,
    pub hits: u8,
    pub doubles: u8,
    pub triples: u8,
    pub home_runs: u8,
    pub rbi: u8,
    pub walks: u8,
    pub strikeouts: u8,
    pub stolen_bases: u8,
}

/// Per-pitcher box score line. Innings are tracked as outs recorded so
/// partial innings stay exact.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PitchingLine {
    pub outs_recorded: u8,
    pub hits_allowed: u8,
    pub runs_allowed: u8,
    pub walks: u8,
    pub strikeouts: u8,
    pub home_runs_allowed: u8,
    pub pitches: u16,
}

impl PitchingLine {
    /// Innings pitched in the conventional thirds notation (e.g. 6.2).
    pub fn innings_pitched(&self) -> f32 {
        (self.outs_recorded / 3) as f32 + (self.outs_recorded % 3) as f32 / 10.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BattingBoxEntry {
    pub player: String,
    pub line: BattingLine,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitchingBoxEntry {
    pub player: String,
    pub line: PitchingLine,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoxScore {
    #[serde(default)]
    pub home_batting: Vec<BattingBoxEntry>,
    #[serde(default)]
    pub away_batting: Vec<BattingBoxEntry>,
    #[serde(default)]
    pub home_pitching: Vec<PitchingBoxEntry>,
    #[serde(default)]
    pub away_pitching: Vec<PitchingBoxEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameResult {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u8,
    pub away_score: u8,
    /// Final inning number (>= 9 for any completed game).
    pub innings: u8,
    /// Per-inning runs for the line score. The home line may be one entry
    /// short when the bottom of the last inning was not needed.
    pub line_home: Vec<u8>,
    pub line_away: Vec<u8>,
    pub hits_home: u8,
    pub hits_away: u8,
    pub errors_home: u8,
    pub errors_away: u8,
    pub winning_pitcher: Option<String>,
    pub losing_pitcher: Option<String>,
    pub save_pitcher: Option<String>,
    pub home_runs: Vec<HomeRunEvent>,
    /// Ordered appearance lists; a name repeats only under the exhausted-
    /// bullpen re-entry fallback.
    pub pitchers_used_home: Vec<String>,
    pub pitchers_used_away: Vec<String>,
    #[serde(default)]
    pub box_score: BoxScore,
}

impl GameResult {
    /// A game that could not start at all is recorded as a 0-0 default so a
    /// season run never aborts on a single fixture.
    pub fn unplayed(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score: 0,
            away_score: 0,
            innings: 0,
            line_home: Vec::new(),
            line_away: Vec::new(),
            hits_home: 0,
            hits_away: 0,
            errors_home: 0,
            errors_away: 0,
            winning_pitcher: None,
            losing_pitcher: None,
            save_pitcher: None,
            home_runs: Vec::new(),
            pitchers_used_home: Vec::new(),
            pitchers_used_away: Vec::new(),
            box_score: BoxScore::default(),
        }
    }

    pub fn winner(&self) -> Option<&str> {
        if self.home_score > self.away_score {
            Some(self.home_team.as_str())
        } else if self.away_score > self.home_score {
            Some(self.away_team.as_str())
        } else {
            None
        }
    }
}
