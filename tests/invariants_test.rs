//! Invariants that must hold for every legal rule-set configuration's
//! enumerated sets, independent of any particular game state.

use std::collections::HashSet;

use rummikub_solver::{sets, RuleSetConfig};

fn configs() -> Vec<RuleSetConfig> {
    vec![
        RuleSetConfig::standard(),
        RuleSetConfig {
            numbers: 8,
            colours: 3,
            jokers: 1,
            min_len: 2,
            repeats: 1,
            min_initial_value: 10,
        },
        RuleSetConfig {
            numbers: 10,
            colours: 5,
            jokers: 0,
            min_len: 4,
            repeats: 3,
            min_initial_value: 20,
        },
    ]
}

fn is_group(set: &[u16], joker_id: Option<u16>, numbers: u16) -> bool {
    use itertools::Itertools;
    set.iter()
        .filter(|&&t| Some(t) != joker_id)
        .map(|&t| ((t - 1) % numbers) + 1)
        .all_equal()
}

#[test]
fn test_invariant_1_set_lengths_in_bounds() {
    for config in configs() {
        let tables = sets::build(&config);
        for set in &tables.sets {
            let len = set.len() as u16;
            if is_group(set, tables.joker_id, config.numbers) {
                assert!(len >= config.min_len && len <= config.colours);
            } else {
                assert!(len >= config.min_len && len < 2 * config.min_len);
            }
        }
    }
}

#[test]
fn test_invariant_2_joker_count_bounded() {
    for config in configs() {
        let tables = sets::build(&config);
        for set in &tables.sets {
            let joker_count = set.iter().filter(|&&t| Some(t) == tables.joker_id).count();
            assert!(joker_count as u16 <= config.jokers);
        }
    }
}

#[test]
fn test_invariant_3_incidence_column_sums_equal_set_length() {
    for config in configs() {
        let tables = sets::build(&config);
        let num_tiles = tables.tiles.len();
        for set in &tables.sets {
            let mut column = vec![0u32; num_tiles];
            for &t in set {
                column[t as usize - 1] += 1;
            }
            assert_eq!(column.iter().sum::<u32>(), set.len() as u32);
        }
    }
}

#[test]
fn test_invariant_4_set_value_at_least_min_len() {
    for config in configs() {
        let tables = sets::build(&config);
        for &value in &tables.set_values {
            assert!(value >= config.min_len);
        }
    }
}

#[test]
fn test_invariant_5_sets_are_deduplicated() {
    for config in configs() {
        let tables = sets::build(&config);
        let unique: HashSet<&Vec<u16>> = tables.sets.iter().collect();
        assert_eq!(unique.len(), tables.sets.len());
    }
}
