//! Player data for the season simulation engine.
//!
//! A player is identity + a ratings bundle. All ratings are on a 1-99 scale;
//! derived overall values are fixed-weight linear combinations used for
//! ranking during level and role assignment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Index into a team's player arena. Role slots and lineup entries hold
/// `PlayerId`s, never player references, so teams stay free of ownership
/// cycles.
pub type PlayerId = usize;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Position {
    #[serde(rename = "SP")]
    StartingPitcher,
    #[serde(rename = "RP")]
    Reliever,
    #[serde(rename = "CL")]
    Closer,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
}

impl Position {
    /// Decode from the compact numeric codes used in binary roster payloads
    /// (0=SP ... 10=RF).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Position::StartingPitcher),
            1 => Some(Position::Reliever),
            2 => Some(Position::Closer),
            3 => Some(Position::Catcher),
            4 => Some(Position::FirstBase),
            5 => Some(Position::SecondBase),
            6 => Some(Position::ThirdBase),
            7 => Some(Position::Shortstop),
            8 => Some(Position::LeftField),
            9 => Some(Position::CenterField),
            10 => Some(Position::RightField),
            _ => None,
        }
    }

    pub fn is_pitcher(&self) -> bool {
        matches!(self, Position::StartingPitcher | Position::Reliever | Position::Closer)
    }

    pub fn is_catcher(&self) -> bool {
        matches!(self, Position::Catcher)
    }

    /// Battery = pitcher or catcher.
    pub fn is_battery(&self) -> bool {
        self.is_pitcher() || self.is_catcher()
    }

    pub fn is_infield(&self) -> bool {
        matches!(
            self,
            Position::FirstBase | Position::SecondBase | Position::ThirdBase | Position::Shortstop
        )
    }

    /// Middle infield (the double-play pivot positions).
    pub fn is_middle_infield(&self) -> bool {
        matches!(self, Position::SecondBase | Position::Shortstop)
    }

    pub fn is_outfield(&self) -> bool {
        matches!(self, Position::LeftField | Position::CenterField | Position::RightField)
    }

    /// Corner outfield spots, which commonly cross-qualify.
    pub fn is_corner_outfield(&self) -> bool {
        matches!(self, Position::LeftField | Position::RightField)
    }

    /// The eight defensive positions a lineup must cover (pitcher excluded,
    /// the lineup carries a designated hitter instead).
    pub fn fielding_positions() -> [Position; 8] {
        [
            Position::Catcher,
            Position::FirstBase,
            Position::SecondBase,
            Position::ThirdBase,
            Position::Shortstop,
            Position::LeftField,
            Position::CenterField,
            Position::RightField,
        ]
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::StartingPitcher => "SP",
            Position::Reliever => "RP",
            Position::Closer => "CL",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Position::StartingPitcher => "Starting Pitcher",
            Position::Reliever => "Relief Pitcher",
            Position::Closer => "Closer",
            Position::Catcher => "Catcher",
            Position::FirstBase => "First Base",
            Position::SecondBase => "Second Base",
            Position::ThirdBase => "Third Base",
            Position::Shortstop => "Shortstop",
            Position::LeftField => "Left Field",
            Position::CenterField => "Center Field",
            Position::RightField => "Right Field",
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SP" => Ok(Position::StartingPitcher),
            "RP" => Ok(Position::Reliever),
            "CL" => Ok(Position::Closer),
            "C" => Ok(Position::Catcher),
            "1B" => Ok(Position::FirstBase),
            "2B" => Ok(Position::SecondBase),
            "3B" => Ok(Position::ThirdBase),
            "SS" => Ok(Position::Shortstop),
            "LF" => Ok(Position::LeftField),
            "CF" => Ok(Position::CenterField),
            "RF" => Ok(Position::RightField),
            _ => Err(format!("Invalid position: {}", s)),
        }
    }
}

/// Roster membership status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RosterStatus {
    /// On the active roster.
    Active,
    /// Farm system (reserve).
    Farm,
}

/// Roster tier. Level assignment promotes the best-rated players to the top
/// tier and pushes the remainder down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RosterLevel {
    Majors,
    TripleA,
    DoubleA,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BattingRatings {
    pub contact: u8,
    pub gap_power: u8,
    pub power: u8,
    pub eye: u8,
    pub avoid_strikeouts: u8,
    pub speed: u8,
    pub stealing: u8,
    pub baserunning: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldingRatings {
    pub arm: u8,
    /// Sure-handedness; the error model inverts this.
    pub reliability: u8,
    /// Double-play pivot quality.
    pub turn_dp: u8,
    /// Range per fieldable position. Positions absent from the map fall back
    /// to a below-average default.
    #[serde(default)]
    pub range: HashMap<Position, u8>,
}

impl FieldingRatings {
    /// Range rating at `position`, defaulting low for unfamiliar spots.
    pub fn range_at(&self, position: Position) -> u8 {
        const UNFAMILIAR_RANGE: u8 = 30;
        self.range.get(&position).copied().unwrap_or(UNFAMILIAR_RANGE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitchingRatings {
    pub velocity: u8,
    pub stuff: u8,
    pub movement: u8,
    pub control: u8,
    pub stamina: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub uniform_number: u8,
    pub position: Position,
    /// Secondary positional eligibilities with a proficiency scalar in [0, 1].
    #[serde(default)]
    pub secondary_positions: Vec<(Position, f32)>,
    pub status: RosterStatus,
    pub level: RosterLevel,
    /// Developmental players are never promoted to the top tier regardless of
    /// rating.
    #[serde(default)]
    pub developmental: bool,
    pub age: u8,
    pub experience_years: u8,
    pub salary: u32,
    pub batting: BattingRatings,
    pub fielding: FieldingRatings,
    /// Present only for pitchers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitching: Option<PitchingRatings>,
}

impl Player {
    /// Fixed-weight aggregate batting quality, used for ranking.
    pub fn overall_batting(&self) -> f32 {
        let b = &self.batting;
        b.contact as f32 * 0.25
            + b.power as f32 * 0.20
            + b.gap_power as f32 * 0.15
            + b.eye as f32 * 0.15
            + b.avoid_strikeouts as f32 * 0.10
            + b.speed as f32 * 0.10
            + b.baserunning as f32 * 0.05
    }

    /// Fixed-weight aggregate pitching quality, used for ranking. Zero for
    /// non-pitchers.
    pub fn overall_pitching(&self) -> f32 {
        match &self.pitching {
            Some(p) => {
                p.stuff as f32 * 0.30
                    + p.movement as f32 * 0.25
                    + p.control as f32 * 0.25
                    + p.velocity as f32 * 0.10
                    + p.stamina as f32 * 0.10
            }
            None => 0.0,
        }
    }

    /// Eligibility query: proficiency at `position`, 1.0 for the listed
    /// position, the recorded scalar for secondaries, `None` otherwise.
    pub fn proficiency_at(&self, position: Position) -> Option<f32> {
        if self.position == position {
            return Some(1.0);
        }
        self.secondary_positions
            .iter()
            .find(|(pos, _)| *pos == position)
            .map(|(_, prof)| *prof)
    }

    pub fn is_pitcher(&self) -> bool {
        self.position.is_pitcher()
    }

    /// Confirm the canonical listed position against the accumulated
    /// eligibility set and normalize it. The listed position carries an
    /// implicit proficiency of 1.0 and wins ties (original assignment), so a
    /// secondary would need to strictly out-rank it to take over the listing,
    /// which the [0, 1] proficiency clamp rules out for well-formed data.
    /// Duplicate, out-of-range and empty entries from reloaded rosters are
    /// cleaned up here; the set keeps its accumulation order otherwise.
    pub fn fix_main_position(&mut self) {
        for entry in &mut self.secondary_positions {
            entry.1 = entry.1.clamp(0.0, 1.0);
        }
        let listed = self.position;
        self.secondary_positions.retain(|(pos, prof)| *pos != listed && *prof > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn sample_batter() -> Player {
        Player {
            name: "Sam Decker".to_string(),
            uniform_number: 24,
            position: Position::CenterField,
            secondary_positions: vec![(Position::LeftField, 0.9)],
            status: RosterStatus::Active,
            level: RosterLevel::Majors,
            developmental: false,
            age: 27,
            experience_years: 5,
            salary: 2_400_000,
            batting: BattingRatings {
                contact: 70,
                gap_power: 60,
                power: 55,
                eye: 65,
                avoid_strikeouts: 62,
                speed: 80,
                stealing: 74,
                baserunning: 71,
            },
            fielding: FieldingRatings {
                arm: 60,
                reliability: 72,
                turn_dp: 40,
                range: HashMap::from([(Position::CenterField, 78), (Position::LeftField, 70)]),
            },
            pitching: None,
        }
    }

    #[test]
    fn test_position_codes_round_trip() {
        for pos in Position::iter() {
            let code = (0..=10).find(|&c| Position::from_code(c) == Some(pos));
            assert!(code.is_some(), "{:?} missing from from_code", pos);
        }
        assert_eq!(Position::from_code(11), None);
    }

    #[test]
    fn test_position_capability_queries_are_exhaustive() {
        for pos in Position::iter() {
            let classes = [pos.is_pitcher(), pos.is_catcher(), pos.is_infield(), pos.is_outfield()];
            assert_eq!(
                classes.iter().filter(|&&c| c).count(),
                1,
                "{:?} must belong to exactly one class",
                pos
            );
        }
    }

    #[test]
    fn test_position_from_str_matches_abbreviation() {
        for pos in Position::iter() {
            assert_eq!(pos.abbreviation().parse::<Position>(), Ok(pos));
        }
        assert!("DH".parse::<Position>().is_err());
    }

    #[test]
    fn test_overall_batting_weights_sum_to_one() {
        let mut player = sample_batter();
        player.batting = BattingRatings {
            contact: 99,
            gap_power: 99,
            power: 99,
            eye: 99,
            avoid_strikeouts: 99,
            speed: 99,
            stealing: 99,
            baserunning: 99,
        };
        assert!((player.overall_batting() - 99.0).abs() < 1e-3);
    }

    #[test]
    fn test_overall_pitching_zero_for_batters() {
        assert_eq!(sample_batter().overall_pitching(), 0.0);
    }

    #[test]
    fn test_proficiency_query() {
        let player = sample_batter();
        assert_eq!(player.proficiency_at(Position::CenterField), Some(1.0));
        assert_eq!(player.proficiency_at(Position::LeftField), Some(0.9));
        assert_eq!(player.proficiency_at(Position::Catcher), None);
    }

    #[test]
    fn test_fix_main_position_keeps_original_on_proficiency_tie() {
        // A fully-proficient secondary ties the listed position; the original
        // assignment wins the tie.
        let mut player = sample_batter();
        player.secondary_positions = vec![(Position::LeftField, 1.0)];
        player.fix_main_position();
        assert_eq!(player.position, Position::CenterField);
        assert_eq!(player.proficiency_at(Position::LeftField), Some(1.0));
    }

    #[test]
    fn test_fix_main_position_normalizes_reloaded_eligibilities() {
        let mut player = sample_batter();
        player.secondary_positions = vec![
            (Position::CenterField, 0.8), // duplicates the listing
            (Position::LeftField, 1.7),   // out of range
            (Position::RightField, 0.0),  // empty
        ];
        player.fix_main_position();
        assert_eq!(player.secondary_positions, vec![(Position::LeftField, 1.0)]);
    }

    #[test]
    fn test_fix_main_position_is_idempotent() {
        let mut player = sample_batter();
        player.fix_main_position();
        let once = player.clone();
        player.fix_main_position();
        assert_eq!(player, once);
    }

    #[test]
    fn test_range_defaults_low_for_unfamiliar_position() {
        let player = sample_batter();
        assert_eq!(player.fielding.range_at(Position::CenterField), 78);
        assert_eq!(player.fielding.range_at(Position::Shortstop), 30);
    }
}
