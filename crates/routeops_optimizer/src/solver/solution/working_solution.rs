use std::sync::Arc;

use fxhash::FxHashSet;

use crate::{
    problem::{
        stop::StopIdx, travel_cost_matrix::Cost, vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        arc_cost::ArcCost,
        insertion::Insertion,
        score::Score,
        solution::{route::WorkingSolutionRoute, route_id::RouteIdx},
    },
};

#[derive(Clone)]
pub struct WorkingSolution {
    problem: Arc<VehicleRoutingProblem>,
    routes: Vec<WorkingSolutionRoute>,
    unassigned_stops: FxHashSet<StopIdx>,
}

impl WorkingSolution {
    /// One empty route per usable vehicle, every customer unassigned.
    pub fn new(problem: Arc<VehicleRoutingProblem>) -> Self {
        let routes = (0..problem.num_routes())
            .map(WorkingSolutionRoute::empty)
            .collect();
        let unassigned_stops = problem.customers().collect();

        WorkingSolution {
            problem,
            routes,
            unassigned_stops,
        }
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        &self.problem
    }

    pub fn problem_arc(&self) -> &Arc<VehicleRoutingProblem> {
        &self.problem
    }

    pub fn routes(&self) -> &[WorkingSolutionRoute] {
        &self.routes
    }

    pub fn route(&self, route_id: RouteIdx) -> &WorkingSolutionRoute {
        &self.routes[route_id]
    }

    pub fn route_ids(&self) -> impl Iterator<Item = RouteIdx> + use<> {
        (0..self.routes.len()).map(RouteIdx::new)
    }

    pub fn non_empty_routes_count(&self) -> usize {
        self.routes.iter().filter(|route| !route.is_empty()).count()
    }

    pub fn is_unassigned(&self, stop: StopIdx) -> bool {
        self.unassigned_stops.contains(&stop)
    }

    pub fn unassigned_count(&self) -> usize {
        self.unassigned_stops.len()
    }

    /// Unassigned stops in index order.
    pub fn unassigned_stops(&self) -> Vec<StopIdx> {
        let mut stops = self.unassigned_stops.iter().copied().collect::<Vec<_>>();
        stops.sort_unstable();
        stops
    }

    pub fn total_cost(&self) -> Cost {
        self.routes.iter().map(WorkingSolutionRoute::cost).sum()
    }

    pub fn score(&self) -> Score {
        Score::new(self.unassigned_stops.len() as f64, self.total_cost())
    }

    /// Objective under an arbitrary arc pricing, unassigned stops still count as hard score.
    pub fn score_with<A>(&self, arc_cost: &A) -> Score
    where
        A: ArcCost + ?Sized,
    {
        Score::new(
            self.unassigned_stops.len() as f64,
            self.routes.iter().map(|route| route.cost_with(arc_cost)).sum(),
        )
    }

    /// Number of arcs travelled by the non-empty routes, depot legs included.
    pub fn arcs_count(&self) -> usize {
        self.routes
            .iter()
            .filter(|route| !route.is_empty())
            .map(|route| route.len() + 1)
            .sum()
    }

    pub fn has_capacity_for(&self, route_id: RouteIdx, stop: StopIdx) -> bool {
        self.problem
            .fits_load(self.routes[route_id].load(), self.problem.demand(stop))
    }

    pub fn insert(&mut self, insertion: &Insertion) {
        let route = &mut self.routes[insertion.route_id];
        route.insert(&self.problem, insertion.position, insertion.stop);
        self.unassigned_stops.remove(&insertion.stop);
    }

    pub(crate) fn push_stop(&mut self, route_id: RouteIdx, stop: StopIdx) {
        self.routes[route_id].push(&self.problem, stop);
        self.unassigned_stops.remove(&stop);
    }

    pub(crate) fn remove_stop(&mut self, route_id: RouteIdx, position: usize) -> StopIdx {
        let stop = self.routes[route_id].remove(&self.problem, position);
        self.unassigned_stops.insert(stop);
        stop
    }

    /// Mutates a route in place. Callers keep the stop set of the route unchanged
    /// or keep `unassigned_stops` in sync themselves.
    pub(crate) fn with_route_mut<R>(
        &mut self,
        route_id: RouteIdx,
        f: impl FnOnce(&VehicleRoutingProblem, &mut WorkingSolutionRoute) -> R,
    ) -> R {
        f(&self.problem, &mut self.routes[route_id])
    }

    /// Same as [`Self::with_route_mut`] for two distinct routes.
    pub(crate) fn with_routes_mut<R>(
        &mut self,
        first: RouteIdx,
        second: RouteIdx,
        f: impl FnOnce(&VehicleRoutingProblem, &mut WorkingSolutionRoute, &mut WorkingSolutionRoute) -> R,
    ) -> R {
        debug_assert_ne!(first, second);

        let (low, high, swapped) = if first.get() < second.get() {
            (first.get(), second.get(), false)
        } else {
            (second.get(), first.get(), true)
        };

        let (head, tail) = self.routes.split_at_mut(high);
        let (low_route, high_route) = (&mut head[low], &mut tail[0]);

        if swapped {
            f(&self.problem, high_route, low_route)
        } else {
            f(&self.problem, low_route, high_route)
        }
    }

    /// Every customer is either routed exactly once or unassigned, and no route is overloaded.
    pub fn is_consistent(&self) -> bool {
        let mut seen = FxHashSet::default();
        for route in &self.routes {
            if route.load() > self.problem.capacity() {
                return false;
            }

            for &stop in route.stops() {
                if !seen.insert(stop) || self.unassigned_stops.contains(&stop) {
                    return false;
                }
            }
        }

        seen.len() + self.unassigned_stops.len() == self.problem.num_customers()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::test_utils::{create_line_problem, stops};

    use super::*;

    #[test]
    fn test_new_solution_has_everything_unassigned() {
        let solution = WorkingSolution::new(Arc::new(create_line_problem(4, 2, 10)));

        assert_eq!(solution.routes().len(), 2);
        assert_eq!(solution.unassigned_stops(), stops(&[1, 2, 3]));
        assert_eq!(solution.score(), Score::new(3.0, 0.0));
        assert!(solution.is_consistent());
    }

    #[test]
    fn test_insert_and_remove_keep_unassigned_in_sync() {
        let mut solution = WorkingSolution::new(Arc::new(create_line_problem(4, 2, 10)));

        solution.insert(&Insertion {
            route_id: RouteIdx::new(1),
            position: 0,
            stop: StopIdx::new(2),
        });
        solution.push_stop(RouteIdx::new(1), StopIdx::new(3));

        assert_eq!(solution.unassigned_stops(), stops(&[1]));
        assert_eq!(solution.non_empty_routes_count(), 1);
        assert_eq!(solution.arcs_count(), 3);
        assert_eq!(solution.score(), Score::new(1.0, 6000.0));

        let removed = solution.remove_stop(RouteIdx::new(1), 0);
        assert_eq!(removed, StopIdx::new(2));
        assert_eq!(solution.unassigned_stops(), stops(&[1, 2]));
        assert!(solution.is_consistent());
    }

    #[test]
    fn test_with_routes_mut_keeps_argument_order() {
        let mut solution = WorkingSolution::new(Arc::new(create_line_problem(4, 3, 10)));
        solution.push_stop(RouteIdx::new(0), StopIdx::new(1));
        solution.push_stop(RouteIdx::new(2), StopIdx::new(3));

        let (first, second) = solution.with_routes_mut(RouteIdx::new(2), RouteIdx::new(0), |_, a, b| {
            (a.stop(0), b.stop(0))
        });

        assert_eq!(first, StopIdx::new(3));
        assert_eq!(second, StopIdx::new(1));
    }
}
