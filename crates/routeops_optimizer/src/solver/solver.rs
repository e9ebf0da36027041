use std::sync::Arc;

use tracing::{Level, instrument};

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        search::{
            construction_only::ConstructionOnly, guided_local_search::GuidedLocalSearch,
            route_search::RouteSearch,
        },
        solution::search_solution::SearchSolution,
        solver_error::SolverError,
        solver_params::{SearchStrategy, SolverParams},
    },
};

pub struct Solver {
    problem: Arc<VehicleRoutingProblem>,
    params: SolverParams,
}

impl Solver {
    pub fn new(problem: impl Into<Arc<VehicleRoutingProblem>>, params: SolverParams) -> Self {
        Solver {
            problem: problem.into(),
            params,
        }
    }

    /// Runs the configured strategy. Blocking and CPU bound, async callers
    /// should run it on a blocking thread.
    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn solve(&self) -> Result<SearchSolution, SolverError> {
        let problem = Arc::clone(&self.problem);

        match self.params.search_strategy {
            SearchStrategy::GuidedLocalSearch => GuidedLocalSearch.solve(problem, &self.params),
            SearchStrategy::ConstructionOnly => ConstructionOnly.solve(problem, &self.params),
        }
    }
}
