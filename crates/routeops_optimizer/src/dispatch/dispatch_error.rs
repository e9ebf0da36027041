use thiserror::Error;

use crate::{
    json::validation::RequestValidationError,
    problem::vehicle_routing_problem::BuildProblemError,
    solver::solver_error::SolverError,
};

/// Failures a caller can act on. Provider outages and infeasible requests are
/// absorbed by the pipeline and never show up here.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    InvalidRequest(#[from] RequestValidationError),

    #[error(transparent)]
    Problem(#[from] BuildProblemError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Solver task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl DispatchError {
    /// Whether the request itself was at fault.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, DispatchError::InvalidRequest(_))
    }
}
