pub mod game_result;
pub mod player;
pub mod schedule;
pub mod team;

pub use game_result::{
    BattingBoxEntry, BattingLine, BoxScore, GameResult, HomeRunEvent, PitchingBoxEntry,
    PitchingLine,
};
pub use player::{
    BattingRatings, FieldingRatings, PitchingRatings, Player, PlayerId, Position, RosterLevel,
    RosterStatus,
};
pub use schedule::{Fixture, Schedule, ScheduledTeam};
pub use team::{League, Team, TeamSide, CLOSER_SLOTS, ROTATION_SLOTS, SETUP_SLOTS};
