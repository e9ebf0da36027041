use std::{sync::Arc, time::Instant};

use tracing::info;

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        construction::construct_solution::construct_solution,
        search::route_search::{RouteSearch, ensure_served},
        solution::search_solution::SearchSolution,
        solver_error::SolverError,
        solver_params::SolverParams,
    },
};

/// Path cheapest arc plus cheapest insertion, without any improvement phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstructionOnly;

impl RouteSearch for ConstructionOnly {
    fn solve(
        &self,
        problem: Arc<VehicleRoutingProblem>,
        _params: &SolverParams,
    ) -> Result<SearchSolution, SolverError> {
        let started_at = Instant::now();
        let solution = construct_solution(problem);
        ensure_served(&solution)?;

        info!(
            "Construction only: {} routes, {} unassigned, cost {}",
            solution.non_empty_routes_count(),
            solution.unassigned_count(),
            solution.total_cost()
        );

        Ok(SearchSolution::from_working_solution(
            &solution,
            0,
            started_at.elapsed(),
        ))
    }
}
