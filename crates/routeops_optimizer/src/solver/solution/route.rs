use crate::{
    problem::{
        stop::StopIdx,
        travel_cost_matrix::Cost,
        vehicle_routing_problem::{DEPOT, VehicleRoutingProblem},
    },
    solver::arc_cost::ArcCost,
};

/// Stops visited by one vehicle, depot excluded. The tour is closed: it leaves
/// the depot, visits `stops` in order and goes back to the depot.
#[derive(Clone, Debug)]
pub struct WorkingSolutionRoute {
    vehicle_id: usize,
    stops: Vec<StopIdx>,

    /// `prefix_loads[i]` is the load of `stops[..i]`, so it has `len() + 1` entries.
    prefix_loads: Vec<u64>,
    cost: Cost,
}

impl WorkingSolutionRoute {
    pub fn empty(vehicle_id: usize) -> Self {
        WorkingSolutionRoute {
            vehicle_id,
            stops: Vec::new(),
            prefix_loads: vec![0],
            cost: 0.0,
        }
    }

    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    pub fn stops(&self) -> &[StopIdx] {
        &self.stops
    }

    #[inline]
    pub fn stop(&self, position: usize) -> StopIdx {
        self.stops[position]
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn contains(&self, stop: StopIdx) -> bool {
        self.stops.contains(&stop)
    }

    pub fn load(&self) -> u64 {
        self.prefix_loads[self.stops.len()]
    }

    /// Load of the stops in `start..end`.
    #[inline]
    pub fn segment_load(&self, start: usize, end: usize) -> u64 {
        self.prefix_loads[end] - self.prefix_loads[start]
    }

    /// True travel cost of the closed tour.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Stop before `position`, or the depot when `position` is the first one.
    #[inline]
    pub fn previous_stop(&self, position: usize) -> StopIdx {
        if position == 0 {
            DEPOT
        } else {
            self.stops[position - 1]
        }
    }

    /// Stop after `position`, or the depot when `position` is the last one.
    #[inline]
    pub fn next_stop(&self, position: usize) -> StopIdx {
        self.stops.get(position + 1).copied().unwrap_or(DEPOT)
    }

    /// Stop at `position`, or the depot when `position == len()`.
    #[inline]
    pub fn stop_or_depot(&self, position: usize) -> StopIdx {
        self.stops.get(position).copied().unwrap_or(DEPOT)
    }

    /// Directed arcs of the closed tour. An empty route has none.
    pub fn arcs(&self) -> impl Iterator<Item = (StopIdx, StopIdx)> + '_ {
        let count = if self.stops.is_empty() {
            0
        } else {
            self.stops.len() + 1
        };

        (0..count).map(|i| (self.previous_stop(i), self.stop_or_depot(i)))
    }

    pub fn cost_with<A>(&self, arc_cost: &A) -> Cost
    where
        A: ArcCost + ?Sized,
    {
        self.arcs().map(|(from, to)| arc_cost.arc_cost(from, to)).sum()
    }

    pub(crate) fn insert(&mut self, problem: &VehicleRoutingProblem, position: usize, stop: StopIdx) {
        self.stops.insert(position, stop);
        self.resync(problem);
    }

    pub(crate) fn remove(&mut self, problem: &VehicleRoutingProblem, position: usize) -> StopIdx {
        let stop = self.stops.remove(position);
        self.resync(problem);
        stop
    }

    pub(crate) fn push(&mut self, problem: &VehicleRoutingProblem, stop: StopIdx) {
        self.stops.push(stop);
        self.resync(problem);
    }

    /// Replaces `stops[start..end]` with `replacement`.
    pub(crate) fn replace_stops(
        &mut self,
        problem: &VehicleRoutingProblem,
        start: usize,
        end: usize,
        replacement: &[StopIdx],
    ) {
        self.stops.splice(start..end, replacement.iter().copied());
        self.resync(problem);
    }

    pub(crate) fn swap(&mut self, problem: &VehicleRoutingProblem, first: usize, second: usize) {
        self.stops.swap(first, second);
        self.resync(problem);
    }

    pub(crate) fn reverse(&mut self, problem: &VehicleRoutingProblem, start: usize, end: usize) {
        self.stops[start..=end].reverse();
        self.resync(problem);
    }

    fn resync(&mut self, problem: &VehicleRoutingProblem) {
        self.prefix_loads.clear();
        self.prefix_loads.push(0);

        // Saturates so an overfull route reads as over capacity instead of wrapping.
        let mut load: u64 = 0;
        for &stop in &self.stops {
            load = load.saturating_add(problem.demand(stop));
            self.prefix_loads.push(load);
        }

        self.cost = self.cost_with(problem);
    }
}
