use std::sync::Arc;

use fixedbitset::FixedBitSet;
use tracing::{Level, debug, instrument};

use crate::{
    problem::{
        stop::StopIdx,
        vehicle_routing_problem::{DEPOT, VehicleRoutingProblem},
    },
    solver::{
        insertion::best_insertion,
        solution::working_solution::WorkingSolution,
    },
};

/// Initial solution: path cheapest arc, then cheapest insertion of whatever is left.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn construct_solution(problem: Arc<VehicleRoutingProblem>) -> WorkingSolution {
    let num_vehicles = problem.num_vehicles();
    let mut solution = WorkingSolution::new(problem);

    path_cheapest_arc(&mut solution);
    insert_remaining(&mut solution);

    debug!(
        "Construction: {} routes out of {} vehicles, {} unassigned, cost {}",
        solution.non_empty_routes_count(),
        num_vehicles,
        solution.unassigned_count(),
        solution.total_cost()
    );

    solution
}

/// Each vehicle in turn extends its path from the last visited stop to the
/// cheapest unvisited stop that still fits, until nothing fits anymore.
fn path_cheapest_arc(solution: &mut WorkingSolution) {
    let problem = Arc::clone(solution.problem_arc());
    let mut visited = FixedBitSet::with_capacity(problem.num_stops());
    visited.insert(DEPOT.get());

    for route_id in solution.route_ids() {
        let mut current = DEPOT;
        let mut load = 0;

        loop {
            let mut next: Option<(StopIdx, f64)> = None;
            for candidate in problem.customers() {
                if visited.contains(candidate.get())
                    || !problem.fits_load(load, problem.demand(candidate))
                {
                    continue;
                }

                let cost = problem.travel_cost(current, candidate);
                if next.is_none_or(|(_, best_cost)| cost < best_cost) {
                    next = Some((candidate, cost));
                }
            }

            let Some((stop, _)) = next else {
                break;
            };

            visited.insert(stop.get());
            load += problem.demand(stop);
            solution.push_stop(route_id, stop);
            current = stop;
        }

        if visited.count_ones(..) == problem.num_stops() {
            break;
        }
    }
}

fn insert_remaining(solution: &mut WorkingSolution) {
    let problem = Arc::clone(solution.problem_arc());

    for stop in solution.unassigned_stops() {
        if !problem.fits_capacity(stop) {
            continue;
        }

        if let Some((insertion, _)) = best_insertion(solution, stop, problem.as_ref()) {
            solution.insert(&insertion);
        }
    }
}
