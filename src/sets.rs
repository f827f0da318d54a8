//! The canonical set enumerator: runs, groups, joker substitutions, and the
//! set-value table used by the initial-meld objective.

use itertools::Itertools;
use std::collections::HashSet;

use crate::config::RuleSetConfig;
use crate::tile::{tile_id, value_of, Tile};

/// Everything the enumerator produces for a given rule set: the tile
/// universe, the deduplicated, lexicographically sorted list of valid sets,
/// the parallel set-value table, and the joker tile id (if any).
#[derive(Debug, Clone)]
pub struct SetTables {
    pub tiles: Vec<Tile>,
    pub sets: Vec<Vec<Tile>>,
    pub set_values: Vec<u16>,
    pub joker_id: Option<Tile>,
}

/// Builds the tile universe and full set enumeration for `config`.
///
/// `config` is assumed already validated (see [`RuleSetConfig::validate`]).
pub fn build(config: &RuleSetConfig) -> SetTables {
    let (tiles, joker_id) = tile_universe(config);
    let mut sets: HashSet<Vec<Tile>> = HashSet::new();

    enumerate_runs(config, joker_id, &mut sets);
    enumerate_groups(config, joker_id, &mut sets);

    let mut sets: Vec<Vec<Tile>> = sets.into_iter().collect();
    sets.sort_unstable();

    let max_len = (2 * config.min_len as usize).saturating_sub(1).max(config.colours as usize);
    let rlmax = build_rlmax(config.numbers, max_len);
    let set_values = sets
        .iter()
        .map(|s| set_value(s, config.numbers, joker_id, &rlmax))
        .collect();

    tracing::debug!(
        numbers = config.numbers,
        colours = config.colours,
        jokers = config.jokers,
        min_len = config.min_len,
        set_count = sets.len(),
        "enumerated rummikub sets"
    );

    SetTables {
        tiles,
        sets,
        set_values,
        joker_id,
    }
}

/// `tiles = [1..N*C]`, plus `N*C+1` iff `J > 0`.
fn tile_universe(config: &RuleSetConfig) -> (Vec<Tile>, Option<Tile>) {
    let t = config.numbers * config.colours;
    let mut tiles: Vec<Tile> = (1..=t).collect();
    let joker_id = if config.jokers > 0 {
        let j = t + 1;
        tiles.push(j);
        Some(j)
    } else {
        None
    };
    (tiles, joker_id)
}

fn enumerate_runs(config: &RuleSetConfig, joker_id: Option<Tile>, out: &mut HashSet<Vec<Tile>>) {
    let numbers = config.numbers;
    for len in config.min_len..(2 * config.min_len) {
        if len > numbers {
            continue;
        }
        let max_start = numbers - len + 1;
        for colour in 0..config.colours {
            for start in 1..=max_start {
                let base: Vec<Tile> = (0..len)
                    .map(|i| tile_id(colour, start + i, numbers))
                    .collect();

                match joker_id {
                    None => {
                        out.insert(base);
                    }
                    Some(joker) if len == config.min_len => {
                        // Exact minimum length: any subset of positions may be jokers.
                        let positions: Vec<usize> = (0..base.len()).collect();
                        substitute_positions(&base, &positions, config.jokers, joker, out);
                    }
                    Some(joker) => {
                        // Longer than minimum: only interior positions may be jokers;
                        // a joker on either end is equivalent to a shorter run.
                        let interior: Vec<usize> = (1..base.len() - 1).collect();
                        substitute_positions(&base, &interior, config.jokers, joker, out);
                    }
                }
            }
        }
    }
}

fn enumerate_groups(config: &RuleSetConfig, joker_id: Option<Tile>, out: &mut HashSet<Vec<Tile>>) {
    let numbers = config.numbers;
    for value in 1..=numbers {
        let full_group: Vec<Tile> = (0..config.colours)
            .map(|colour| tile_id(colour, value, numbers))
            .collect();

        for len in config.min_len..=config.colours {
            for base in full_group.iter().copied().combinations(len as usize) {
                match joker_id {
                    None => {
                        out.insert(base);
                    }
                    Some(joker) if len == config.min_len => {
                        // Exact minimum length: any subset of positions may be jokers.
                        let positions: Vec<usize> = (0..base.len()).collect();
                        substitute_positions(&base, &positions, config.jokers, joker, out);
                    }
                    Some(_) => {
                        // Longer than minimum: a joker here is always surplus and is
                        // suppressed to keep the ILP search space manageable.
                        out.insert(base);
                    }
                }
            }
        }
    }
}

/// Emits every way to replace a subset of `replaceable` positions in `base`
/// with the joker, from zero up to `min(jokers, replaceable.len())` of them.
fn substitute_positions(
    base: &[Tile],
    replaceable: &[usize],
    jokers: u16,
    joker_id: Tile,
    out: &mut HashSet<Vec<Tile>>,
) {
    let max_j = (jokers as usize).min(replaceable.len());
    for j in 0..=max_j {
        for combo in replaceable.iter().copied().combinations(j) {
            let mut s = base.to_vec();
            for &pos in &combo {
                s[pos] = joker_id;
            }
            s.sort_unstable();
            out.insert(s);
        }
    }
}

/// `rlmax[len][m]`: the maximum tile-value sum of a length-`len` run
/// anchored so its smallest base number is `m`. `rlmax[1][m] = m`;
/// `rlmax[len+1][m] = rlmax[len][m] + term(len, m)`, where `term` is
/// `m+len` when the run still fits under `numbers`, and otherwise the
/// *lowest* number the run could still be occupying at that position
/// (`numbers - len`) rather than `numbers` itself — once the top of the
/// run has been pinned at `numbers`, each earlier joker-filled position
/// is worth one less, not `numbers` again. E.g. for `numbers=13` a
/// length-3 run anchored at `m=12` (`{joker, 12, 13}`) is worth
/// `12 + 13 + 11 = 36`, not `12 + 13 + 13`.
fn build_rlmax(numbers: u16, max_len: usize) -> Vec<Vec<u16>> {
    let width = numbers as usize + 1;
    let mut table = vec![vec![0u16; width]; max_len + 1];
    for m in 0..width {
        table[1][m] = m as u16;
    }
    for len in 1..max_len {
        for m in 0..width {
            let m = m as u16;
            let len = len as u16;
            let term = if m + len <= numbers {
                m + len
            } else {
                numbers.saturating_sub(len)
            };
            table[len as usize + 1][m as usize] = table[len as usize][m as usize] + term;
        }
    }
    table
}

/// Score attributed to `set` for the initial-meld threshold.
fn set_value(set: &[Tile], numbers: u16, joker_id: Option<Tile>, rlmax: &[Vec<u16>]) -> u16 {
    let k = set.len();
    let mut nonjokers: Vec<u16> = set
        .iter()
        .filter(|&&t| Some(t) != joker_id)
        .map(|&t| value_of(t, numbers))
        .collect();
    nonjokers.sort_unstable();

    let Some(&v0) = nonjokers.first() else {
        // A set entirely of jokers cannot occur (k >= min_len >= 2 > jokers <= 4
        // would require jokers >= min_len, and even then this is out of scope).
        return 0;
    };

    if nonjokers.len() == 1 {
        let group_value = k as u16 * v0;
        let run_value = rlmax[k][v0 as usize];
        return group_value.max(run_value);
    }

    if nonjokers.iter().all(|&v| v == v0) {
        return k as u16 * v0;
    }

    let lowest = *nonjokers.iter().min().unwrap();
    rlmax[k][lowest as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_tables() -> SetTables {
        build(&RuleSetConfig::standard())
    }

    #[test]
    fn test_tile_universe_includes_joker() {
        let tables = standard_tables();
        assert_eq!(tables.tiles.len(), 13 * 4 + 1);
        assert_eq!(tables.joker_id, Some(53));
    }

    #[test]
    fn test_no_joker_tile_universe() {
        let config = RuleSetConfig {
            jokers: 0,
            ..RuleSetConfig::standard()
        };
        let (tiles, joker_id) = tile_universe(&config);
        assert_eq!(tiles.len(), 13 * 4);
        assert_eq!(joker_id, None);
    }

    #[test]
    fn test_every_set_length_in_bounds() {
        let tables = standard_tables();
        let config = RuleSetConfig::standard();
        for set in &tables.sets {
            let len = set.len() as u16;
            let is_group = set
                .iter()
                .filter(|&&t| Some(t) != tables.joker_id)
                .map(|&t| value_of(t, config.numbers))
                .all_equal();
            if is_group {
                assert!(len >= config.min_len && len <= config.colours);
            } else {
                assert!(len >= config.min_len && len < 2 * config.min_len);
            }
        }
    }

    #[test]
    fn test_every_set_has_at_most_jokers_jokers() {
        let tables = standard_tables();
        let config = RuleSetConfig::standard();
        for set in &tables.sets {
            let joker_count = set.iter().filter(|&&t| Some(t) == tables.joker_id).count();
            assert!(joker_count as u16 <= config.jokers);
        }
    }

    #[test]
    fn test_sets_are_deduplicated() {
        let tables = standard_tables();
        let unique: HashSet<&Vec<Tile>> = tables.sets.iter().collect();
        assert_eq!(unique.len(), tables.sets.len());
    }

    #[test]
    fn test_opening_run_value() {
        // Run 9,10,11 of colour 0 (N=13): value should be 9+10+11=30.
        let tables = standard_tables();
        let idx = tables.sets.iter().position(|s| s == &vec![9, 10, 11]).unwrap();
        assert_eq!(tables.set_values[idx], 30);
    }

    #[test]
    fn test_group_of_thirteens_value() {
        // 13, 26, 39 are all face value 13 in three different colours.
        let tables = standard_tables();
        let idx = tables.sets.iter().position(|s| s == &vec![13, 26, 39]).unwrap();
        assert_eq!(tables.set_values[idx], 39);
    }

    #[test]
    fn test_joker_run_pinned_against_top_of_range_values_one_less_per_step() {
        // {12, 13, joker}: the joker stands in for 11, so the run is worth
        // 11 + 12 + 13 = 36, not 12 + 13 + 13 (the run can't be "extended"
        // past N=13 by reusing the top value for the joker's slot).
        let tables = standard_tables();
        let joker = tables.joker_id.unwrap();
        let mut set = vec![12, 13, joker];
        set.sort_unstable();
        let idx = tables.sets.iter().position(|s| s == &set).unwrap();
        assert_eq!(tables.set_values[idx], 36);
    }

    #[test]
    fn test_longer_group_has_no_joker_substitution() {
        let tables = standard_tables();
        let joker = tables.joker_id.unwrap();
        // Groups of length 4 (> min_len 3) must never contain a joker.
        let has_joker_4group = tables.sets.iter().any(|s| {
            s.len() == 4
                && s.contains(&joker)
                && s.iter()
                    .filter(|&&t| t != joker)
                    .map(|&t| value_of(t, 13))
                    .all_equal()
        });
        assert!(!has_joker_4group);
    }

    #[test]
    fn test_longer_run_only_substitutes_interior() {
        let tables = standard_tables();
        let joker = tables.joker_id.unwrap();
        // Length-4 runs (> min_len 3): a joker can never occupy an end position,
        // i.e. a joker-containing length-4 run's non-joker min/max endpoints are
        // always the nominal run bounds (no "virtual extension" beyond them).
        for set in tables.sets.iter().filter(|s| s.len() == 4 && s.contains(&joker)) {
            let values: Vec<u16> = set
                .iter()
                .filter(|&&t| t != joker)
                .map(|&t| value_of(t, 13))
                .collect();
            let is_group = values.iter().all_equal();
            if !is_group {
                // interior substitution never drops both ends simultaneously
                assert!(values.len() >= 2);
            }
        }
    }

    #[test]
    fn test_minimum_set_value_at_least_min_len() {
        let tables = standard_tables();
        let config = RuleSetConfig::standard();
        for &v in &tables.set_values {
            assert!(v >= config.min_len);
        }
    }
}
