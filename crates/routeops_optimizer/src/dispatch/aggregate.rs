use std::iter;

use fxhash::FxHashSet;
use routeops_providers::{lat_lng::LatLng, matrix_source::MatrixSource};

use crate::{
    json::types::{JsonRoute, JsonSolveResponse, JsonSolveStatus, JsonSummary},
    problem::{
        stop::StopIdx,
        vehicle_routing_problem::{DEPOT, VehicleRoutingProblem},
    },
    solver::solution::search_solution::{SearchSolution, SolutionRoute},
};

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Kilometers with 2 decimals.
pub fn meters_to_km(meters: f64) -> f64 {
    round_to(meters / 1000.0, 2)
}

/// Minutes with 1 decimal.
pub fn seconds_to_min(seconds: f64) -> f64 {
    round_to(seconds / 60.0, 1)
}

/// The depot followed by the route's stops. The return leg is not part of it.
pub fn visited_stops(route: &SolutionRoute) -> impl Iterator<Item = StopIdx> + '_ {
    iter::once(DEPOT).chain(route.stops.iter().copied())
}

pub fn route_waypoints(problem: &VehicleRoutingProblem, route: &SolutionRoute) -> Vec<LatLng> {
    visited_stops(route)
        .map(|stop| problem.stop(stop).location())
        .collect()
}

/// Unrounded travel accumulated along a visited sequence.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TravelTotals {
    pub distance_meters: f64,
    pub time_seconds: f64,
}

impl TravelTotals {
    pub fn along(problem: &VehicleRoutingProblem, visited: &[StopIdx]) -> Self {
        visited
            .windows(2)
            .fold(TravelTotals::default(), |totals, arc| TravelTotals {
                distance_meters: totals.distance_meters
                    + problem.travel_distance(arc[0], arc[1]) as f64,
                time_seconds: totals.time_seconds + problem.travel_time(arc[0], arc[1]) as f64,
            })
    }
}

/// Builds the response from a search result. `geometries[i]` belongs to
/// `solution.routes[i]`, missing entries fall back to the waypoints.
pub fn aggregate(
    problem: &VehicleRoutingProblem,
    solution: &SearchSolution,
    matrix_source: MatrixSource,
    mut geometries: Vec<Vec<LatLng>>,
) -> JsonSolveResponse {
    geometries.resize(solution.routes.len(), Vec::new());

    let mut fleet = TravelTotals::default();
    let mut served = FxHashSet::default();
    let mut routes = Vec::with_capacity(solution.routes.len());

    for (route, geometry) in solution.routes.iter().zip(geometries) {
        let visited = visited_stops(route).collect::<Vec<_>>();
        let totals = TravelTotals::along(problem, &visited);

        fleet.distance_meters += totals.distance_meters;
        fleet.time_seconds += totals.time_seconds;

        let stop_ids = visited
            .iter()
            .map(|&stop| problem.stop(stop).external_id().to_owned())
            .collect::<Vec<_>>();
        served.extend(visited.iter().copied());

        let geometry = if geometry.is_empty() {
            route_waypoints(problem, route)
        } else {
            geometry
        };

        routes.push(JsonRoute {
            route_id: route.vehicle_id,
            vehicle_id: route.vehicle_id,
            stop_ids,
            load: route.load,
            distance_km: meters_to_km(totals.distance_meters),
            time_min: seconds_to_min(totals.time_seconds),
            geometry,
            matrix_used: matrix_source,
        });
    }

    let unserved_stop_ids = (0..problem.num_stops())
        .map(StopIdx::new)
        .filter(|stop| !served.contains(stop))
        .map(|stop| problem.stop(stop).external_id().to_owned())
        .collect();

    JsonSolveResponse {
        status: JsonSolveStatus::Ok,
        summary: JsonSummary {
            total_distance_km: meters_to_km(fleet.distance_meters),
            total_time_min: seconds_to_min(fleet.time_seconds),
            routes: routes.len(),
            stops_served: served.len(),
        },
        routes,
        unserved_stop_ids,
    }
}
