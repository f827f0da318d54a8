//! Top-level rule-set orchestration: construction/validation, the
//! `solve`/`arrange_table` flows, and the public types they return.

use crate::config::RuleSetConfig;
use crate::error::{RuleSetError, SolveError};
use crate::gamestate::GameState;
use crate::good_lp_backend::GoodLpBackend;
use crate::milp::MilpBackend;
use crate::sets;
use crate::solver::{SolveMode, SolverCore};
use crate::tile::Tile;

/// The outcome of [`RuleSet::solve`]: tiles to move from rack to table and
/// the concrete sets they form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedSolution {
    pub tiles: Vec<Tile>,
    pub sets: Vec<Vec<Tile>>,
}

/// The outcome of [`RuleSet::arrange_table`]: how the table decomposes and
/// how many jokers are free (removable without breaking the arrangement).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableArrangement {
    pub sets: Vec<Vec<Tile>>,
    pub free_jokers: u32,
}

/// A fully materialized, immutable rule set: the tile universe, the
/// enumerated sets and their values, and the Solver Core built over them.
pub struct RuleSet {
    config: RuleSetConfig,
    tiles: Vec<Tile>,
    sets: Vec<Vec<Tile>>,
    joker_id: Option<Tile>,
    core: SolverCore,
}

impl RuleSet {
    /// Builds a rule set with the default ([`GoodLpBackend`]) MILP backend.
    pub fn new(config: RuleSetConfig) -> Result<Self, RuleSetError> {
        Self::with_backend(config, Box::new(GoodLpBackend))
    }

    /// Builds a rule set with an explicit MILP backend, e.g. for tests or
    /// to swap in a different solver implementation.
    pub fn with_backend(
        config: RuleSetConfig,
        backend: Box<dyn MilpBackend>,
    ) -> Result<Self, RuleSetError> {
        config.validate()?;

        let tables = sets::build(&config);
        let core = SolverCore::new(
            config.numbers,
            config.repeats,
            config.jokers,
            config.min_initial_value as u32,
            tables.joker_id,
            tables.tiles.len(),
            &tables.sets,
            tables.set_values,
            backend,
        );

        Ok(Self {
            config,
            tiles: tables.tiles,
            sets: tables.sets,
            joker_id: tables.joker_id,
            core,
        })
    }

    /// An empty [`GameState`] sized for this rule set's tile universe.
    pub fn new_game(&self) -> GameState {
        GameState::new(self.tiles.len())
    }

    /// Proposes a move for `state`. `mode` defaults to `Initial` while
    /// `state.initial` is true, otherwise `TileCount`.
    ///
    /// Returns `None` when no move exists (pick up a tile). When the
    /// default (or explicit) `Initial` mode succeeds and the table already
    /// holds tiles from prior players, a second `TileCount` solve attempts
    /// to extend onto the enlarged table and its placement (tiles and set
    /// decomposition) is adopted if it improves on the opening meld alone.
    pub fn solve(
        &self,
        state: &GameState,
        mode: Option<SolveMode>,
    ) -> Result<Option<ProposedSolution>, SolveError> {
        let mode = mode.unwrap_or(if state.initial {
            SolveMode::Initial
        } else {
            SolveMode::TileCount
        });

        let empty_table = vec![0u32; self.tiles.len()];
        let table_param: &[u32] = if mode == SolveMode::Initial {
            &empty_table
        } else {
            state.table_array()
        };

        let opening = self.core.solve(mode, state.rack_array(), table_param)?;
        if opening.is_empty() {
            return Ok(None);
        }

        if mode == SolveMode::Initial && state.table_array().iter().any(|&c| c > 0) {
            let extended = state.with_move(&opening.tiles);
            let extension =
                self.core
                    .solve(SolveMode::TileCount, extended.rack_array(), extended.table_array())?;
            if !extension.is_empty() {
                tracing::debug!("initial meld extended onto the existing table");
                let mut tiles = opening.tiles.clone();
                tiles.extend_from_slice(&extension.tiles);
                tiles.sort_unstable();
                let sets = extension
                    .set_indices
                    .iter()
                    .map(|&i| self.sets[i].clone())
                    .collect();
                return Ok(Some(ProposedSolution { tiles, sets }));
            }
        }

        let sets = opening
            .set_indices
            .iter()
            .map(|&i| self.sets[i].clone())
            .collect();
        Ok(Some(ProposedSolution {
            tiles: opening.tiles,
            sets,
        }))
    }

    /// Checks whether the table alone (ignoring the rack) can be decomposed
    /// into valid sets, reporting the largest number of jokers that can be
    /// left out of the decomposition ("free" jokers).
    pub fn arrange_table(&self, state: &GameState) -> Result<Option<TableArrangement>, SolveError> {
        let joker_count = self
            .joker_id
            .map(|j| state.table_count(j))
            .unwrap_or(0);

        let mut base_table = state.table_array().to_vec();
        if let Some(joker) = self.joker_id {
            base_table[joker as usize - 1] = 0;
        }
        let empty_rack = vec![0u32; self.tiles.len()];

        for k in 0..=joker_count {
            let mut trial_table = base_table.clone();
            if let Some(joker) = self.joker_id {
                trial_table[joker as usize - 1] = k;
            }

            if let Some(solution) = self
                .core
                .solve_raw(SolveMode::TileCount, &empty_rack, &trial_table)?
            {
                // A feasible solve with zero sets chosen (e.g. an empty or
                // all-joker table) is not a decomposition: the table isn't
                // actually arranged into any sets, so keep probing higher k.
                if solution.set_indices.is_empty() {
                    continue;
                }
                let sets = solution
                    .set_indices
                    .iter()
                    .map(|&i| self.sets[i].clone())
                    .collect();
                let free_jokers = joker_count - k;
                tracing::debug!(free_jokers, "table arranges into valid sets");
                return Ok(Some(TableArrangement { sets, free_jokers }));
            }
        }

        tracing::debug!("table does not arrange into valid sets at any joker count");
        Ok(None)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn sets(&self) -> &[Vec<Tile>] {
        &self.sets
    }

    pub fn game_state_key(&self) -> String {
        self.config.game_state_key()
    }

    pub fn colours(&self) -> u16 {
        self.config.colours
    }

    pub fn numbers(&self) -> u16 {
        self.config.numbers
    }

    pub fn repeats(&self) -> u16 {
        self.config.repeats
    }

    pub fn jokers(&self) -> u16 {
        self.config.jokers
    }

    pub fn joker_id(&self) -> Option<Tile> {
        self.joker_id
    }
}
