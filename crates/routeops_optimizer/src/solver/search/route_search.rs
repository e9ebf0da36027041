use std::sync::Arc;

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        solution::{search_solution::SearchSolution, working_solution::WorkingSolution},
        solver_error::SolverError,
        solver_params::SolverParams,
    },
};

/// A strategy that turns a problem into routes.
pub trait RouteSearch {
    fn solve(
        &self,
        problem: Arc<VehicleRoutingProblem>,
        params: &SolverParams,
    ) -> Result<SearchSolution, SolverError>;
}

/// `NoSolution` when there is something to serve and nothing could be served.
pub(crate) fn ensure_served(solution: &WorkingSolution) -> Result<(), SolverError> {
    let problem = solution.problem();
    if problem.num_customers() > 0 && solution.unassigned_count() == problem.num_customers() {
        return Err(SolverError::NoSolution);
    }

    Ok(())
}
