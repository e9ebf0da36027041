use std::time::Duration;

use crate::{
    problem::{stop::StopIdx, travel_cost_matrix::Cost},
    solver::{score::Score, solution::working_solution::WorkingSolution},
};

#[derive(Debug, Clone)]
pub struct SolutionRoute {
    pub vehicle_id: usize,

    /// Visited stops, depot excluded.
    pub stops: Vec<StopIdx>,
    pub load: u64,
    pub cost: Cost,
}

/// Final output of a search: only non-empty routes, ordered by vehicle.
#[derive(Debug, Clone)]
pub struct SearchSolution {
    pub routes: Vec<SolutionRoute>,
    pub unassigned_stops: Vec<StopIdx>,
    pub score: Score,
    pub iterations: usize,
    pub elapsed: Duration,
}

impl SearchSolution {
    pub fn from_working_solution(
        solution: &WorkingSolution,
        iterations: usize,
        elapsed: Duration,
    ) -> Self {
        let routes = solution
            .routes()
            .iter()
            .filter(|route| !route.is_empty())
            .map(|route| SolutionRoute {
                vehicle_id: route.vehicle_id(),
                stops: route.stops().to_vec(),
                load: route.load(),
                cost: route.cost(),
            })
            .collect();

        SearchSolution {
            routes,
            unassigned_stops: solution.unassigned_stops(),
            score: solution.score(),
            iterations,
            elapsed,
        }
    }
}
