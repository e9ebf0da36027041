use jiff::SignedDuration;

use crate::solver::solver_params::SolverParams;

/// Per-call settings of the dispatch pipeline.
#[derive(Clone, Debug, Default)]
pub struct DispatchParams {
    pub solver: SolverParams,
}

impl DispatchParams {
    pub fn with_time_limit(mut self, time_limit: SignedDuration) -> Self {
        self.solver = self.solver.with_time_limit(time_limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.solver.seed = Some(seed);
        self
    }
}
