//! The ILP-backed Solver Core: builds the tile×set incidence matrix once,
//! reuses it to assemble one of three objective templates per call, and
//! decodes a MILP solution back into concrete tiles and set choices.

use crate::error::SolveError;
use crate::milp::{LinearRow, MilpBackend, MilpOutcome, MilpProblem};
use crate::tile::{value_of, Tile};

/// Which objective template to solve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    /// Maximize the number of tiles placed from the rack.
    TileCount,
    /// Maximize the total face value of tiles placed from the rack.
    TotalValue,
    /// Maximize placed non-joker tile count subject to a minimum meld value.
    Initial,
}

/// Raw output of a single Solver Core invocation: tile identifiers placed
/// (with repeats) and the enumerated-set indices used to arrange the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverSolution {
    pub tiles: Vec<Tile>,
    pub set_indices: Vec<usize>,
}

impl SolverSolution {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Owns the static incidence matrix (as sparse per-tile rows) and the
/// pluggable backend; binds rack/table and objective fresh on every call.
pub struct SolverCore {
    numbers: u16,
    repeats: u32,
    jokers: u32,
    min_initial_value: u32,
    joker_row: Option<usize>,
    /// `tile_rows[i]`: sparse `(set_index, multiplicity)` pairs for tile `i+1`.
    tile_rows: Vec<Vec<(usize, f64)>>,
    set_values: Vec<u16>,
    num_tiles: usize,
    num_sets: usize,
    backend: Box<dyn MilpBackend>,
}

impl SolverCore {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        numbers: u16,
        repeats: u16,
        jokers: u16,
        min_initial_value: u32,
        joker_id: Option<Tile>,
        num_tiles: usize,
        sets: &[Vec<Tile>],
        set_values: Vec<u16>,
        backend: Box<dyn MilpBackend>,
    ) -> Self {
        let mut tile_rows = vec![Vec::new(); num_tiles];
        for (s, set) in sets.iter().enumerate() {
            for &tile in set {
                let row = &mut tile_rows[tile as usize - 1];
                match row.last_mut() {
                    Some((last_s, count)) if *last_s == s => *count += 1.0,
                    _ => row.push((s, 1.0)),
                }
            }
        }

        Self {
            numbers,
            repeats: repeats as u32,
            jokers: jokers as u32,
            min_initial_value,
            joker_row: joker_id.map(|t| t as usize - 1),
            tile_rows,
            set_values,
            num_tiles,
            num_sets: sets.len(),
            backend,
        }
    }

    /// Solves one objective template with `rack`/`table` bound as parameters.
    ///
    /// Returns the empty solution (not an error) when the backend reports
    /// infeasibility or an unbounded objective. Use [`SolverCore::solve_raw`]
    /// when feasibility itself (as opposed to a nonempty tile list) is the
    /// signal a caller needs, e.g. a zero-rack feasibility probe.
    pub fn solve(
        &self,
        mode: SolveMode,
        rack: &[u32],
        table: &[u32],
    ) -> Result<SolverSolution, SolveError> {
        Ok(self.solve_raw(mode, rack, table)?.unwrap_or_default())
    }

    /// Like [`SolverCore::solve`], but distinguishes "infeasible" (`None`)
    /// from "feasible, possibly with nothing placed" (`Some`).
    pub fn solve_raw(
        &self,
        mode: SolveMode,
        rack: &[u32],
        table: &[u32],
    ) -> Result<Option<SolverSolution>, SolveError> {
        let problem = self.build_problem(mode, rack, table);

        tracing::trace!(?mode, num_vars = problem.num_vars, "invoking milp backend");
        let outcome = self.backend.solve(&problem)?;

        match outcome {
            MilpOutcome::Optimal(values) => {
                let solution = self.decode(&values);
                tracing::debug!(
                    ?mode,
                    placed_tiles = solution.tiles.len(),
                    sets_used = solution.set_indices.len(),
                    "milp solve found an optimal assignment"
                );
                Ok(Some(solution))
            }
            MilpOutcome::Infeasible | MilpOutcome::Unbounded => {
                tracing::debug!(?mode, ?outcome, "milp solve returned no usable assignment");
                Ok(None)
            }
        }
    }

    fn build_problem(&self, mode: SolveMode, rack: &[u32], table: &[u32]) -> MilpProblem {
        let num_vars = self.num_tiles + self.num_sets;
        let mut problem = MilpProblem::new(num_vars);

        // tiles_y[i] <= rack[i] (constraint 2), further capped at R (or J
        // for the joker row, constraints 4-5) regardless of what the
        // caller's rack counts actually say: GameState doesn't itself
        // enforce those bounds, so the solver must.
        for i in 0..self.num_tiles {
            let cap = if Some(i) == self.joker_row {
                self.jokers
            } else {
                self.repeats
            };
            problem.var_upper[i] = (rack[i].min(cap)) as i64;
        }
        // 0 <= sets_x[s] <= R (constraint 3).
        for s in 0..self.num_sets {
            problem.var_upper[self.num_tiles + s] = self.repeats as i64;
        }

        // M . sets_x - tiles_y = table (constraint 1), one row per tile.
        for i in 0..self.num_tiles {
            let mut coeffs: Vec<(usize, f64)> = self.tile_rows[i]
                .iter()
                .map(|&(s, c)| (self.num_tiles + s, c))
                .collect();
            coeffs.push((i, -1.0));
            problem
                .equalities
                .push(LinearRow::new(coeffs, table[i] as f64));
        }

        match mode {
            SolveMode::TileCount => {
                for i in 0..self.num_tiles {
                    problem.objective[i] = 1.0;
                }
            }
            SolveMode::TotalValue => {
                for i in 0..self.num_tiles {
                    if Some(i) == self.joker_row {
                        continue;
                    }
                    problem.objective[i] = value_of((i + 1) as Tile, self.numbers) as f64;
                }
            }
            SolveMode::Initial => {
                for i in 0..self.num_tiles {
                    if Some(i) == self.joker_row {
                        continue;
                    }
                    problem.objective[i] = 1.0;
                }
                let coeffs: Vec<(usize, f64)> = (0..self.num_sets)
                    .filter(|&s| self.set_values[s] != 0)
                    .map(|s| (self.num_tiles + s, self.set_values[s] as f64))
                    .collect();
                problem
                    .inequalities_ge
                    .push(LinearRow::new(coeffs, self.min_initial_value as f64));
            }
        }

        problem
    }

    fn decode(&self, values: &[i64]) -> SolverSolution {
        let mut tiles = Vec::new();
        for i in 0..self.num_tiles {
            for _ in 0..values[i] {
                tiles.push((i + 1) as Tile);
            }
        }
        let mut set_indices = Vec::new();
        for s in 0..self.num_sets {
            for _ in 0..values[self.num_tiles + s] {
                set_indices.push(s);
            }
        }
        SolverSolution { tiles, set_indices }
    }
}
