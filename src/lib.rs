//! Rule-parameterized Rummikub set enumerator and ILP-based move solver.
//!
//! [`RuleSet`] is the entry point: construct one from a [`RuleSetConfig`],
//! track each player's tiles in a [`GameState`], and call [`RuleSet::solve`]
//! or [`RuleSet::arrange_table`] to get a move proposal back.

pub mod config;
pub mod error;
pub mod gamestate;
pub mod good_lp_backend;
pub mod milp;
pub mod ruleset;
pub mod sets;
pub mod solver;
pub mod tile;

pub use config::RuleSetConfig;
pub use error::{RuleSetError, SolveError};
pub use gamestate::GameState;
pub use good_lp_backend::GoodLpBackend;
pub use milp::{LinearRow, MilpBackend, MilpOutcome, MilpProblem};
pub use ruleset::{ProposedSolution, RuleSet, TableArrangement};
pub use sets::SetTables;
pub use solver::{SolveMode, SolverCore, SolverSolution};
pub use tile::Tile;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_opening_move_and_table_arrangement() {
        let rule_set = RuleSet::new(RuleSetConfig::standard()).expect("valid config");
        let mut state = rule_set.new_game();
        state.add_rack(&[9, 10, 11]);

        let solution = rule_set
            .solve(&state, None)
            .expect("solve should not error")
            .expect("an opening run should be found");
        state = state.with_move(&solution.tiles);
        state.initial = false;

        let arrangement = rule_set
            .arrange_table(&state)
            .expect("arrange_table should not error")
            .expect("the placed run should be decomposable");
        assert_eq!(arrangement.free_jokers, 0);
    }
}
