use super::ScheduleConfig;
use crate::error::{Result, SimError};
use crate::models::{Fixture, League, Schedule, ScheduledTeam};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// A pairing before round indices are assigned: (home, away) as global team
/// indices.
type Pairing = (usize, usize);

/// Single round robin over `n` local indices via the circle method. Odd
/// counts get a phantom opponent whose pairings are dropped (a bye round);
/// even counts produce exactly one pairing per team per round.
fn single_round_robin(n: usize) -> Vec<Vec<Pairing>> {
    if n < 2 {
        return Vec::new();
    }
    let count = if n % 2 == 0 { n } else { n + 1 };
    let phantom = count - 1;
    let mut rounds = Vec::with_capacity(count - 1);

    for r in 0..count - 1 {
        let mut pairs = Vec::with_capacity(count / 2);
        for k in 0..count / 2 {
            let a = if k == 0 { phantom } else { (r + k) % (count - 1) };
            let b = (r + count - 1 - k) % (count - 1);
            if phantom >= n && (a == phantom || b == phantom) {
                continue; // bye for odd team counts
            }
            // Alternate the fixed team's side so home games spread across
            // the cycle; the mirrored second cycle makes the balance exact.
            if k == 0 && r % 2 == 1 {
                pairs.push((b, a));
            } else {
                pairs.push((a, b));
            }
        }
        rounds.push(pairs);
    }
    rounds
}

/// Double round robin: the second cycle mirrors the first with sides
/// swapped, so every pair meets exactly twice, once at each venue.
fn double_round_robin(n: usize) -> Vec<Vec<Pairing>> {
    let first = single_round_robin(n);
    let mut rounds = first.clone();
    rounds.extend(
        first
            .iter()
            .map(|pairs| pairs.iter().map(|&(h, a)| (a, h)).collect::<Vec<_>>()),
    );
    rounds
}

fn offset(pairs: &[Pairing], by: usize) -> Vec<Pairing> {
    pairs.iter().map(|&(h, a)| (h + by, a + by)).collect()
}

/// Inter-league rounds: round `q` pairs `north[i]` against
/// `south[(i + q) % m]`, with the home league alternating by round parity.
/// Unequal league sizes leave the surplus teams idle for the round.
fn interleague_rounds(north: usize, south: usize, quota: u32) -> Vec<Vec<Pairing>> {
    let pairs_per_round = north.min(south);
    let mut rounds = Vec::with_capacity(quota as usize);
    for q in 0..quota as usize {
        let mut pairs = Vec::with_capacity(pairs_per_round);
        for i in 0..pairs_per_round {
            let n_idx = i;
            let s_idx = north + (i + q) % south;
            if q % 2 == 0 {
                pairs.push((n_idx, s_idx));
            } else {
                pairs.push((s_idx, n_idx));
            }
        }
        rounds.push(pairs);
    }
    rounds
}

/// Splice inter-league rounds at even intervals between the intra-league
/// rounds.
fn interleave(intra: Vec<Vec<Pairing>>, inter: Vec<Vec<Pairing>>) -> Vec<Vec<Pairing>> {
    if inter.is_empty() {
        return intra;
    }
    let step = intra.len() / (inter.len() + 1);
    let mut rounds = Vec::with_capacity(intra.len() + inter.len());
    let mut inter_iter = inter.into_iter();
    for (i, round) in intra.into_iter().enumerate() {
        rounds.push(round);
        if step > 0 && (i + 1) % step == 0 {
            if let Some(next) = inter_iter.next() {
                rounds.push(next);
            }
        }
    }
    rounds.extend(inter_iter);
    rounds
}

/// Generate the full season schedule from two league rosters (team identity
/// only). Fatal on any invariant violation; a partial schedule is never
/// returned.
pub fn build_schedule(
    north: &[String],
    south: &[String],
    config: &ScheduleConfig,
) -> Result<Schedule> {
    let mut teams: Vec<ScheduledTeam> = Vec::with_capacity(north.len() + south.len());
    teams.extend(
        north
            .iter()
            .map(|name| ScheduledTeam { name: name.clone(), league: League::North }),
    );
    teams.extend(
        south
            .iter()
            .map(|name| ScheduledTeam { name: name.clone(), league: League::South }),
    );

    {
        let mut names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        if names.windows(2).any(|w| w[0] == w[1]) {
            return Err(SimError::MalformedSchedule {
                reason: "duplicate team name across leagues".to_string(),
            });
        }
    }

    let north_rounds = double_round_robin(north.len());
    let south_rounds = double_round_robin(south.len());

    let intra_len = north_rounds.len().max(south_rounds.len());
    let mut intra: Vec<Vec<Pairing>> = Vec::with_capacity(intra_len);
    for r in 0..intra_len {
        let mut pairs = Vec::new();
        if let Some(p) = north_rounds.get(r) {
            pairs.extend_from_slice(p);
        }
        if let Some(p) = south_rounds.get(r) {
            pairs.extend(offset(p, north.len()));
        }
        intra.push(pairs);
    }

    let inter = interleague_rounds(north.len(), south.len(), config.interleague_rounds);
    let mut rounds = interleave(intra, inter);

    if let Some(seed) = config.home_away_seed {
        // Inter-league pairs meet once, so flipping them would skew home
        // counts; restrict the toss to same-league pairings.
        let league_of = |idx: usize| teams[idx].league;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut flips: HashMap<(usize, usize), bool> = HashMap::new();
        for round in rounds.iter_mut() {
            for pair in round.iter_mut() {
                let (h, a) = *pair;
                if league_of(h) != league_of(a) {
                    continue;
                }
                let key = (h.min(a), h.max(a));
                let flip = *flips.entry(key).or_insert_with(|| rng.gen_bool(0.5));
                if flip {
                    *pair = (a, h);
                }
            }
        }
    }

    let mut fixtures = Vec::new();
    for (round_idx, pairs) in rounds.iter().enumerate() {
        for &(home, away) in pairs {
            fixtures.push(Fixture { home, away, round: round_idx as u32 });
        }
    }

    let schedule = Schedule { teams, fixtures };
    schedule
        .validate()
        .map_err(|reason| SimError::MalformedSchedule { reason })?;
    verify_balance(&schedule, north.len(), south.len(), config)?;
    Ok(schedule)
}

/// Count checks beyond the structural invariants: double round-robin game
/// totals and per-team home/away balance within the inter-league allowance.
fn verify_balance(
    schedule: &Schedule,
    north: usize,
    south: usize,
    config: &ScheduleConfig,
) -> Result<()> {
    let intra = |league_size: usize, base: usize| -> usize {
        schedule
            .fixtures
            .iter()
            .filter(|f| {
                (base..base + league_size).contains(&f.home)
                    && (base..base + league_size).contains(&f.away)
            })
            .count()
    };
    if north >= 2 && intra(north, 0) != north * (north - 1) {
        return Err(SimError::MalformedSchedule {
            reason: format!(
                "north intra-league count {} != {}",
                intra(north, 0),
                north * (north - 1)
            ),
        });
    }
    if south >= 2 && intra(south, north) != south * (south - 1) {
        return Err(SimError::MalformedSchedule {
            reason: format!(
                "south intra-league count {} != {}",
                intra(south, north),
                south * (south - 1)
            ),
        });
    }

    let allowance = config.interleague_rounds as i64;
    for team in 0..schedule.teams.len() {
        let home = schedule.home_game_count(team) as i64;
        let away = schedule.away_game_count(team) as i64;
        if (home - away).abs() > allowance {
            return Err(SimError::MalformedSchedule {
                reason: format!(
                    "{} home/away imbalance {} exceeds allowance {}",
                    schedule.teams[team].name,
                    home - away,
                    allowance
                ),
            });
        }
    }
    Ok(())
}
