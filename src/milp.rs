//! Pluggable MILP backend abstraction.
//!
//! The Solver Core builds one [`MilpProblem`] per call and hands it to a
//! [`MilpBackend`]; this is the only seam between the engine and whatever
//! integer programming library actually runs the optimization, mirroring how
//! the teacher crate puts its effect implementations behind `Box<dyn Joker>`
//! rather than matching on a concrete type.

use crate::error::SolveError;

/// One row of a linear constraint: a sparse set of `(variable_index, coefficient)`
/// pairs compared against `rhs`.
#[derive(Debug, Clone)]
pub struct LinearRow {
    pub coeffs: Vec<(usize, f64)>,
    pub rhs: f64,
}

impl LinearRow {
    pub fn new(coeffs: Vec<(usize, f64)>, rhs: f64) -> Self {
        Self { coeffs, rhs }
    }
}

/// A single bounded integer program: maximize `objective . x` subject to
/// `0 <= x[i] <= var_upper[i]`, a set of equalities and a set of `>=`
/// inequalities.
#[derive(Debug, Clone)]
pub struct MilpProblem {
    pub num_vars: usize,
    pub var_upper: Vec<i64>,
    pub objective: Vec<f64>,
    pub equalities: Vec<LinearRow>,
    pub inequalities_ge: Vec<LinearRow>,
}

impl MilpProblem {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            var_upper: vec![0; num_vars],
            objective: vec![0.0; num_vars],
            equalities: Vec::new(),
            inequalities_ge: Vec::new(),
        }
    }
}

/// Outcome of a single MILP solve.
#[derive(Debug, Clone)]
pub enum MilpOutcome {
    /// An optimal integer assignment for every variable.
    Optimal(Vec<i64>),
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective is unbounded over the feasible region (should not
    /// happen for this engine's bounded variables, but backends must be
    /// able to report it distinctly from infeasibility).
    Unbounded,
}

/// A mixed-integer program solver. Implementations are expected to be
/// stateless with respect to individual `solve` calls: the Solver Core may
/// invoke `solve` repeatedly with different problems built from the same
/// rule set.
pub trait MilpBackend {
    fn solve(&self, problem: &MilpProblem) -> Result<MilpOutcome, SolveError>;
}
