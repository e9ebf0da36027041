use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use routeops_providers::{
    haversine::{DEFAULT_FALLBACK_SPEED_KMH, as_the_crow_flies_matrices},
    lat_lng::LatLng,
    travel_matrices::TravelMatrices,
};

use crate::{
    problem::{
        objective::Objective,
        stop::{Stop, StopIdx},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

pub fn stops(indices: &[usize]) -> Vec<StopIdx> {
    indices.iter().copied().map(StopIdx::new).collect()
}

fn build_problem(
    stops: Vec<Stop>,
    matrices: TravelMatrices,
    num_vehicles: usize,
    capacity: u64,
) -> VehicleRoutingProblem {
    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .set_stops(stops)
        .set_travel_matrices(matrices)
        .set_objective(Objective::Distance)
        .set_vehicles(num_vehicles)
        .set_capacity(capacity);

    builder.build().unwrap()
}

/// Stops on a straight line, stop `i` is `i * 1000` meters away from the depot.
fn line_matrices(num_stops: usize) -> TravelMatrices {
    let distances = (0..num_stops)
        .map(|i| (0..num_stops).map(|j| (i.abs_diff(j) * 1000) as i64).collect())
        .collect();
    let times = (0..num_stops)
        .map(|i| (0..num_stops).map(|j| (i.abs_diff(j) * 90) as i64).collect())
        .collect();

    TravelMatrices::from_rows(distances, times).unwrap()
}

fn line_stops(demands: &[u64]) -> Vec<Stop> {
    demands
        .iter()
        .enumerate()
        .map(|(i, &demand)| {
            Stop::new(
                format!("stop-{i}"),
                LatLng::new(50.85, 4.35 + i as f64 * 0.0142),
                demand,
            )
        })
        .collect()
}

/// `num_stops` stops (depot included) on a line, demand 1 each.
pub fn create_line_problem(num_stops: usize, num_vehicles: usize, capacity: u64) -> VehicleRoutingProblem {
    let mut demands = vec![1; num_stops];
    demands[0] = 0;

    build_problem(line_stops(&demands), line_matrices(num_stops), num_vehicles, capacity)
}

pub fn create_problem_with_demands(
    demands: &[u64],
    num_vehicles: usize,
    capacity: u64,
) -> VehicleRoutingProblem {
    build_problem(
        line_stops(demands),
        line_matrices(demands.len()),
        num_vehicles,
        capacity,
    )
}

/// Two vehicles, going back towards the depot costs more than going away from it.
pub fn create_asymmetric_problem(num_stops: usize) -> VehicleRoutingProblem {
    let distances = (0..num_stops)
        .map(|i| {
            (0..num_stops)
                .map(|j| {
                    let base = (i.abs_diff(j) * 1000) as i64;
                    if i > j { base + (137 * i + 11 * j) as i64 } else { base }
                })
                .collect()
        })
        .collect();
    let times = (0..num_stops)
        .map(|i| (0..num_stops).map(|j| (i.abs_diff(j) * 90) as i64).collect())
        .collect();

    let mut demands = vec![1; num_stops];
    demands[0] = 0;

    build_problem(
        line_stops(&demands),
        TravelMatrices::from_rows(distances, times).unwrap(),
        2,
        100,
    )
}

/// Demand 1 everywhere, explicit distances, times at 10 m/s.
pub fn create_problem_with_distances(
    distances: Vec<Vec<i64>>,
    num_vehicles: usize,
    capacity: u64,
) -> VehicleRoutingProblem {
    let times = distances
        .iter()
        .map(|row| row.iter().map(|meters| meters / 10).collect())
        .collect();

    let mut demands = vec![1; distances.len()];
    demands[0] = 0;

    build_problem(
        line_stops(&demands),
        TravelMatrices::from_rows(distances, times).unwrap(),
        num_vehicles,
        capacity,
    )
}

/// Random stops around Brussels with demands in `1..=6`, haversine matrices.
pub fn create_random_problem(
    num_stops: usize,
    num_vehicles: usize,
    capacity: u64,
    seed: u64,
) -> VehicleRoutingProblem {
    let mut rng = SmallRng::seed_from_u64(seed);

    let stops = (0..num_stops)
        .map(|i| {
            let location = LatLng::new(
                50.85 + rng.random_range(-0.1..0.1),
                4.35 + rng.random_range(-0.15..0.15),
            );
            let demand = if i == 0 { 0 } else { rng.random_range(1..=6) };
            Stop::new(format!("stop-{i}"), location, demand)
        })
        .collect::<Vec<_>>();

    let locations = stops.iter().map(Stop::location).collect::<Vec<_>>();
    let matrices = as_the_crow_flies_matrices(&locations, DEFAULT_FALLBACK_SPEED_KMH);

    build_problem(stops, matrices, num_vehicles, capacity)
}

/// A solution with `routes[i]` assigned to vehicle `i`, the rest unassigned.
pub fn solution_with_routes(problem: VehicleRoutingProblem, routes: &[&[usize]]) -> WorkingSolution {
    let mut solution = WorkingSolution::new(Arc::new(problem));

    for (route_id, route) in routes.iter().enumerate() {
        for &stop in route.iter() {
            solution.push_stop(RouteIdx::new(route_id), StopIdx::new(stop));
        }
    }

    solution
}
