//! Default [`MilpBackend`] implementation, built on `good_lp`'s pure-Rust
//! `microlp` solver so the engine needs no native toolchain to solve.

use good_lp::{variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel};

use crate::error::SolveError;
use crate::milp::{MilpBackend, MilpOutcome, MilpProblem};

/// The engine's default MILP backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoodLpBackend;

impl MilpBackend for GoodLpBackend {
    fn solve(&self, problem: &MilpProblem) -> Result<MilpOutcome, SolveError> {
        let mut vars = ProblemVariables::new();
        let handles: Vec<_> = problem
            .var_upper
            .iter()
            .map(|&ub| vars.add(variable().integer().min(0).max(ub as f64)))
            .collect();

        let objective: Expression = problem
            .objective
            .iter()
            .zip(&handles)
            .filter(|(coeff, _)| **coeff != 0.0)
            .map(|(&coeff, &var)| coeff * var)
            .sum();

        let mut model = vars.maximise(objective).using(good_lp::microlp);

        for row in &problem.equalities {
            let expr: Expression = row.coeffs.iter().map(|&(i, c)| c * handles[i]).sum();
            model = model.with(expr.eq(row.rhs));
        }
        for row in &problem.inequalities_ge {
            let expr: Expression = row.coeffs.iter().map(|&(i, c)| c * handles[i]).sum();
            model = model.with(expr.geq(row.rhs));
        }

        match model.solve() {
            Ok(solution) => {
                let values = handles
                    .iter()
                    .map(|&v| solution.value(v).round() as i64)
                    .collect();
                Ok(MilpOutcome::Optimal(values))
            }
            Err(ResolutionError::Infeasible) => Ok(MilpOutcome::Infeasible),
            Err(ResolutionError::Unbounded) => Ok(MilpOutcome::Unbounded),
            Err(other) => Err(SolveError::Numerical(other.to_string())),
        }
    }
}
