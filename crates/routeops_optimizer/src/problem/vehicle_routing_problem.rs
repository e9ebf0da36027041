use routeops_providers::travel_matrices::{Meters, Seconds, TravelMatrices};
use thiserror::Error;

use super::{
    objective::Objective,
    stop::{Stop, StopIdx},
    travel_cost_matrix::{Cost, TravelCostMatrix},
};

pub const DEPOT: StopIdx = StopIdx::new(0);

#[derive(Debug, Error, PartialEq)]
pub enum BuildProblemError {
    #[error("A problem needs at least one stop, the depot")]
    NoStops,

    #[error("A problem needs at least one vehicle")]
    NoVehicles,

    #[error("Travel matrices cover {actual} locations but the problem has {expected} stops")]
    MatrixDimensions { expected: usize, actual: usize },

    #[error("Missing {0}")]
    Missing(&'static str),
}

/// A single-depot CVRP. Every vehicle starts and ends at [`DEPOT`] and shares one capacity.
pub struct VehicleRoutingProblem {
    stops: Vec<Stop>,
    travel_costs: TravelCostMatrix,
    num_vehicles: usize,
    capacity: u64,
}

impl VehicleRoutingProblem {
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop(&self, index: StopIdx) -> &Stop {
        &self.stops[index]
    }

    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    /// Every stop except the depot.
    pub fn customers(&self) -> impl Iterator<Item = StopIdx> + use<> {
        (1..self.stops.len()).map(StopIdx::new)
    }

    pub fn num_customers(&self) -> usize {
        self.stops.len() - 1
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Routes worth searching: a vehicle beyond the customer count can never
    /// get a stop, so the fleet is capped at one vehicle per customer.
    pub fn num_routes(&self) -> usize {
        self.num_vehicles.min(self.num_customers())
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// The depot never adds load, whatever the input said.
    #[inline(always)]
    pub fn demand(&self, stop: StopIdx) -> u64 {
        if stop == DEPOT {
            0
        } else {
            self.stops[stop].demand()
        }
    }

    pub fn fits_capacity(&self, stop: StopIdx) -> bool {
        self.demand(stop) <= self.capacity
    }

    /// Whether `load + extra` stays within capacity. A sum that overflows `u64` never fits.
    #[inline(always)]
    pub fn fits_load(&self, load: u64, extra: u64) -> bool {
        load.checked_add(extra).is_some_and(|total| total <= self.capacity)
    }

    #[inline(always)]
    pub fn travel_cost(&self, from: StopIdx, to: StopIdx) -> Cost {
        self.travel_costs.travel_cost(from, to)
    }

    pub fn travel_distance(&self, from: StopIdx, to: StopIdx) -> Meters {
        self.travel_costs.travel_distance(from, to)
    }

    pub fn travel_time(&self, from: StopIdx, to: StopIdx) -> Seconds {
        self.travel_costs.travel_time(from, to)
    }
}

#[derive(Default)]
pub struct VehicleRoutingProblemBuilder {
    stops: Option<Vec<Stop>>,
    travel_matrices: Option<TravelMatrices>,
    objective: Objective,
    num_vehicles: Option<usize>,
    capacity: u64,
}

impl VehicleRoutingProblemBuilder {
    /// The first stop is the depot.
    pub fn set_stops(&mut self, stops: Vec<Stop>) -> &mut VehicleRoutingProblemBuilder {
        self.stops = Some(stops);
        self
    }

    pub fn set_travel_matrices(
        &mut self,
        travel_matrices: TravelMatrices,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.travel_matrices = Some(travel_matrices);
        self
    }

    pub fn set_objective(&mut self, objective: Objective) -> &mut VehicleRoutingProblemBuilder {
        self.objective = objective;
        self
    }

    pub fn set_vehicles(&mut self, num_vehicles: usize) -> &mut VehicleRoutingProblemBuilder {
        self.num_vehicles = Some(num_vehicles);
        self
    }

    pub fn set_capacity(&mut self, capacity: u64) -> &mut VehicleRoutingProblemBuilder {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> Result<VehicleRoutingProblem, BuildProblemError> {
        let stops = self.stops.ok_or(BuildProblemError::Missing("stops"))?;
        if stops.is_empty() {
            return Err(BuildProblemError::NoStops);
        }

        let num_vehicles = self.num_vehicles.ok_or(BuildProblemError::Missing("vehicles"))?;
        if num_vehicles == 0 {
            return Err(BuildProblemError::NoVehicles);
        }

        let travel_matrices = self
            .travel_matrices
            .ok_or(BuildProblemError::Missing("travel matrices"))?;
        if travel_matrices.num_locations() != stops.len() {
            return Err(BuildProblemError::MatrixDimensions {
                expected: stops.len(),
                actual: travel_matrices.num_locations(),
            });
        }

        Ok(VehicleRoutingProblem {
            stops,
            travel_costs: TravelCostMatrix::new(travel_matrices, self.objective),
            num_vehicles,
            capacity: self.capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use routeops_providers::lat_lng::LatLng;

    use super::*;

    fn stops(count: usize) -> Vec<Stop> {
        (0..count)
            .map(|i| Stop::new(format!("s{i}"), LatLng::new(50.0, 4.0 + i as f64 * 0.01), 5))
            .collect()
    }

    fn zero_matrices(count: usize) -> TravelMatrices {
        TravelMatrices::new(vec![0; count * count], vec![0; count * count], count).unwrap()
    }

    #[test]
    fn test_depot_demand_is_ignored() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_stops(stops(3))
            .set_travel_matrices(zero_matrices(3))
            .set_vehicles(1)
            .set_capacity(10);
        let problem = builder.build().unwrap();

        assert_eq!(problem.demand(DEPOT), 0);
        assert_eq!(problem.demand(StopIdx::new(1)), 5);
        assert_eq!(problem.customers().collect::<Vec<_>>(), vec![StopIdx::new(1), StopIdx::new(2)]);
    }

    #[test]
    fn test_fits_load_treats_overflow_as_infeasible() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_stops(stops(2))
            .set_travel_matrices(zero_matrices(2))
            .set_vehicles(1)
            .set_capacity(u64::MAX);
        let problem = builder.build().unwrap();

        assert!(problem.fits_load(u64::MAX - 1, 1));
        assert!(!problem.fits_load(u64::MAX, 1));
        assert!(!problem.fits_load(1, u64::MAX));
    }

    #[test]
    fn test_num_routes_is_capped_by_customers() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_stops(stops(4))
            .set_travel_matrices(zero_matrices(4))
            .set_vehicles(60_000)
            .set_capacity(10);
        let problem = builder.build().unwrap();

        assert_eq!(problem.num_vehicles(), 60_000);
        assert_eq!(problem.num_routes(), 3);
    }

    #[test]
    fn test_rejects_mismatched_matrices() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_stops(stops(3))
            .set_travel_matrices(zero_matrices(2))
            .set_vehicles(1);

        assert_eq!(
            builder.build().err(),
            Some(BuildProblemError::MatrixDimensions {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_rejects_zero_vehicles() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_stops(stops(2))
            .set_travel_matrices(zero_matrices(2))
            .set_vehicles(0);

        assert_eq!(builder.build().err(), Some(BuildProblemError::NoVehicles));
    }
}
