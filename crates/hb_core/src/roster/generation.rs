//! Deterministic roster generation.
//!
//! Each team's pool is generated from a ChaCha8 stream seeded by the season
//! seed folded with the team name, so the same (seed, name) pair always
//! produces the same roster regardless of generation order.

use crate::models::{
    BattingRatings, FieldingRatings, League, PitchingRatings, Player, Position, RosterLevel,
    RosterStatus, Team,
};
use crate::roster::{assign_levels, assign_pitching_roles, RosterConfig};
use fxhash::FxHasher;
use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

const FIRST_NAMES: &[&str] = &[
    "Arlo", "Ben", "Cal", "Dante", "Eli", "Felix", "Gus", "Hank", "Ivan", "Jonas", "Kiyoshi",
    "Luis", "Marco", "Nate", "Omar", "Pedro", "Quinn", "Rafael", "Sam", "Theo", "Ulises",
    "Victor", "Wade", "Xavier", "Yusuke", "Zane", "Andre", "Bo", "Curtis", "Dmitri", "Emmett",
    "Flynn", "Grady", "Hiro", "Ignacio", "Jasper", "Kendall", "Lonnie", "Mateo", "Nico",
];
const LAST_NAMES: &[&str] = &[
    "Abrams", "Bell", "Castillo", "Decker", "Esposito", "Finch", "Guerrero", "Hale", "Ibarra",
    "Jensen", "Kowalski", "Lund", "Mercado", "Nakamura", "Okafor", "Price", "Quintana", "Reyes",
    "Sato", "Torres", "Ueda", "Vance", "Whitaker", "Xiong", "Yates", "Zamora", "Ashford",
    "Brennan", "Calloway", "Dorsey", "Eastman", "Fontaine", "Graves", "Holloway", "Irwin",
    "Jacobs", "Kerrigan", "Lovett", "Moreau", "Novak",
];

/// How many players of each position archetype a generated pool carries.
const POOL_PLAN: &[(Position, usize)] = &[
    (Position::StartingPitcher, 10),
    (Position::Reliever, 6),
    (Position::Closer, 2),
    (Position::Catcher, 3),
    (Position::FirstBase, 3),
    (Position::SecondBase, 3),
    (Position::ThirdBase, 2),
    (Position::Shortstop, 3),
    (Position::LeftField, 3),
    (Position::CenterField, 3),
    (Position::RightField, 2),
];

/// Generation-time rating biases per archetype.
struct Archetype {
    contact: f32,
    power: f32,
    speed: f32,
    range: f32,
    arm: f32,
}

static ARCHETYPES: Lazy<HashMap<Position, Archetype>> = Lazy::new(|| {
    let mut map = HashMap::new();
    let mut put = |pos, contact, power, speed, range, arm| {
        map.insert(pos, Archetype { contact, power, speed, range, arm });
    };
    // Pitchers bat poorly; their bundle exists mostly for completeness.
    put(Position::StartingPitcher, 22.0, 18.0, 32.0, 40.0, 68.0);
    put(Position::Reliever, 20.0, 16.0, 32.0, 38.0, 66.0);
    put(Position::Closer, 20.0, 16.0, 32.0, 38.0, 68.0);
    put(Position::Catcher, 52.0, 52.0, 38.0, 48.0, 66.0);
    put(Position::FirstBase, 56.0, 64.0, 42.0, 46.0, 50.0);
    put(Position::SecondBase, 58.0, 44.0, 58.0, 58.0, 52.0);
    put(Position::ThirdBase, 54.0, 58.0, 48.0, 54.0, 62.0);
    put(Position::Shortstop, 54.0, 44.0, 60.0, 62.0, 58.0);
    put(Position::LeftField, 56.0, 56.0, 54.0, 50.0, 52.0);
    put(Position::CenterField, 56.0, 48.0, 64.0, 60.0, 54.0);
    put(Position::RightField, 54.0, 58.0, 52.0, 50.0, 62.0);
    map
});

const RATING_SD: f32 = 11.0;
const RATING_MIN: u8 = 15;
const RATING_MAX: u8 = 95;
const DEFAULT_BUDGET: u32 = 90_000_000;

fn team_stream(seed: u64, name: &str) -> ChaCha8Rng {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    ChaCha8Rng::seed_from_u64(seed ^ hasher.finish())
}

/// Draw a rating around `mean`, clamped to the working scale. Falls back to
/// the mean if the distribution is degenerate.
fn sample_rating(rng: &mut ChaCha8Rng, mean: f32) -> u8 {
    let value = Normal::new(mean, RATING_SD)
        .map(|dist| dist.sample(rng))
        .unwrap_or(mean);
    (value.round() as i32).clamp(RATING_MIN as i32, RATING_MAX as i32) as u8
}

fn sample_proficiency(rng: &mut ChaCha8Rng, mean: f32) -> f32 {
    let value = Normal::new(mean, 0.08).map(|dist| dist.sample(rng)).unwrap_or(mean);
    value.clamp(0.3, 0.95)
}

fn pick_name(rng: &mut ChaCha8Rng) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{} {}", first, last)
}

/// Physically-plausible secondary eligibilities for an archetype. These are
/// generation-time biases, not runtime invariants: corner-outfield and
/// middle-infield cross-eligibility is common, battery crossover is not.
fn secondary_candidates(position: Position) -> &'static [(Position, f32, f32)] {
    // (candidate, probability, mean proficiency)
    match position {
        Position::StartingPitcher | Position::Reliever | Position::Closer => &[],
        Position::Catcher => &[(Position::FirstBase, 0.35, 0.6)],
        Position::FirstBase => &[
            (Position::ThirdBase, 0.4, 0.65),
            (Position::LeftField, 0.25, 0.55),
        ],
        Position::SecondBase => &[
            (Position::Shortstop, 0.6, 0.75),
            (Position::ThirdBase, 0.35, 0.65),
        ],
        Position::ThirdBase => &[
            (Position::FirstBase, 0.45, 0.7),
            (Position::SecondBase, 0.3, 0.6),
        ],
        Position::Shortstop => &[
            (Position::SecondBase, 0.65, 0.8),
            (Position::ThirdBase, 0.4, 0.65),
        ],
        Position::LeftField => &[
            (Position::RightField, 0.6, 0.8),
            (Position::CenterField, 0.3, 0.6),
        ],
        Position::CenterField => &[
            (Position::LeftField, 0.7, 0.8),
            (Position::RightField, 0.7, 0.8),
        ],
        Position::RightField => &[
            (Position::LeftField, 0.6, 0.8),
            (Position::CenterField, 0.3, 0.6),
        ],
    }
}

static FALLBACK_ARCHETYPE: Archetype =
    Archetype { contact: 50.0, power: 50.0, speed: 50.0, range: 50.0, arm: 50.0 };

fn generate_player(rng: &mut ChaCha8Rng, position: Position, uniform_number: u8) -> Player {
    let archetype = ARCHETYPES.get(&position).unwrap_or(&FALLBACK_ARCHETYPE);

    let age: u8 = rng.gen_range(19..=36);
    let experience_years = age.saturating_sub(rng.gen_range(19..=23));
    let developmental = age <= 22 && experience_years <= 1 && rng.gen_bool(0.6);

    let speed = sample_rating(rng, archetype.speed);
    let batting = BattingRatings {
        contact: sample_rating(rng, archetype.contact),
        gap_power: sample_rating(rng, (archetype.contact + archetype.power) / 2.0),
        power: sample_rating(rng, archetype.power),
        eye: sample_rating(rng, archetype.contact - 4.0),
        avoid_strikeouts: sample_rating(rng, archetype.contact - 2.0),
        speed,
        stealing: sample_rating(rng, speed as f32 - 6.0),
        baserunning: sample_rating(rng, speed as f32 - 2.0),
    };

    let mut secondary_positions = Vec::new();
    for &(candidate, probability, mean) in secondary_candidates(position) {
        if rng.gen_bool(probability as f64) {
            secondary_positions.push((candidate, sample_proficiency(rng, mean)));
        }
    }

    let mut range = HashMap::new();
    range.insert(position, sample_rating(rng, archetype.range + 6.0));
    for (pos, prof) in &secondary_positions {
        range.insert(*pos, sample_rating(rng, archetype.range * prof));
    }

    let fielding = FieldingRatings {
        arm: sample_rating(rng, archetype.arm),
        reliability: sample_rating(rng, 58.0),
        turn_dp: if position.is_middle_infield() {
            sample_rating(rng, 62.0)
        } else {
            sample_rating(rng, 40.0)
        },
        range,
    };

    let pitching = if position.is_pitcher() {
        let stamina_mean = match position {
            Position::StartingPitcher => 70.0,
            Position::Reliever => 42.0,
            _ => 36.0,
        };
        Some(PitchingRatings {
            velocity: sample_rating(rng, 64.0),
            stuff: sample_rating(rng, 58.0),
            movement: sample_rating(rng, 56.0),
            control: sample_rating(rng, 56.0),
            stamina: sample_rating(rng, stamina_mean),
        })
    } else {
        None
    };

    let mut player = Player {
        name: pick_name(rng),
        uniform_number,
        position,
        secondary_positions,
        status: RosterStatus::Farm,
        level: RosterLevel::DoubleA,
        developmental,
        age,
        experience_years,
        salary: 0,
        batting,
        fielding,
        pitching,
    };
    player.fix_main_position();

    let overall = if player.is_pitcher() { player.overall_pitching() } else { player.overall_batting() };
    let base = (overall - 35.0).max(4.0) as u32 * 90_000;
    player.salary = base + player.experience_years as u32 * 120_000 + rng.gen_range(0..150_000);

    player
}

/// Generate one team's populated player pool. Levels and pitching roles are
/// left unassigned; callers run `assign_levels`/`assign_pitching_roles` (or
/// use `generate_league`, which does).
pub fn generate_team(name: &str, league: League, seed: u64) -> Team {
    let mut rng = team_stream(seed, name);
    let mut team = Team::new(name, league, DEFAULT_BUDGET);

    let mut uniform = 1u8;
    for &(position, count) in POOL_PLAN {
        for _ in 0..count {
            let mut player = generate_player(&mut rng, position, uniform);
            // Names key season statistics, so they must be unique per team.
            while team.players.iter().any(|p| p.name == player.name) {
                player.name = pick_name(&mut rng);
            }
            team.players.push(player);
            uniform = uniform.saturating_add(1);
        }
    }
    team
}

/// Roster construction boundary: one team per name, pools populated, levels
/// and pitching roles assigned.
pub fn generate_league(
    north: &[String],
    south: &[String],
    seed: u64,
    config: &RosterConfig,
) -> Vec<Team> {
    let mut teams = Vec::with_capacity(north.len() + south.len());
    for name in north {
        teams.push(generate_team(name, League::North, seed));
    }
    for name in south {
        teams.push(generate_team(name, League::South, seed));
    }
    for team in &mut teams {
        assign_levels(team, config);
        assign_pitching_roles(team, RosterLevel::Majors);
    }
    teams
}
