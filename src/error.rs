use thiserror::Error;

/// Construction-time failures: a parameter out of range, or parameters that
/// are mutually inconsistent (e.g. a minimum set length longer than the
/// number of colours, making groups impossible).
#[derive(Error, Debug, Clone)]
pub enum RuleSetError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("milp backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Failures from a `solve`/`arrange_table` call that are not ordinary
/// "no arrangement exists" outcomes. Infeasibility is never an error; it is
/// represented by `None` at the orchestration layer.
#[derive(Error, Debug, Clone)]
pub enum SolveError {
    #[error("milp backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("milp backend reported a numerical failure: {0}")]
    Numerical(String),
}

impl From<RuleSetError> for SolveError {
    fn from(err: RuleSetError) -> Self {
        match err {
            RuleSetError::BackendUnavailable(msg) => SolveError::BackendUnavailable(msg),
            RuleSetError::InvalidConfig(msg) => SolveError::Numerical(msg),
        }
    }
}
