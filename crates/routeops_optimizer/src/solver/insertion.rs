use crate::{
    problem::{stop::StopIdx, travel_cost_matrix::Cost},
    solver::{
        arc_cost::ArcCost,
        solution::{route::WorkingSolutionRoute, route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// Puts `stop` at `position` in `route_id`, shifting the stop there (if any) one step right.
#[derive(Clone, Debug, PartialEq)]
pub struct Insertion {
    pub route_id: RouteIdx,
    pub position: usize,
    pub stop: StopIdx,
}

/// Detour of visiting `stop` between `position - 1` and `position`.
#[inline]
pub fn insertion_cost<A>(route: &WorkingSolutionRoute, position: usize, stop: StopIdx, arc_cost: &A) -> Cost
where
    A: ArcCost + ?Sized,
{
    let previous = route.previous_stop(position);
    let next = route.stop_or_depot(position);

    arc_cost.arc_cost(previous, stop) + arc_cost.arc_cost(stop, next)
        - arc_cost.arc_cost(previous, next)
}

pub fn for_each_insertion(
    solution: &WorkingSolution,
    route_id: RouteIdx,
    stop: StopIdx,
    mut f: impl FnMut(Insertion),
) {
    if !solution.has_capacity_for(route_id, stop) {
        return;
    }

    for position in 0..=solution.route(route_id).len() {
        f(Insertion {
            route_id,
            position,
            stop,
        });
    }
}

/// Cheapest capacity-feasible position for `stop` over all routes.
/// Ties keep the first route and position found.
pub fn best_insertion<A>(
    solution: &WorkingSolution,
    stop: StopIdx,
    arc_cost: &A,
) -> Option<(Insertion, Cost)>
where
    A: ArcCost + ?Sized,
{
    let mut best: Option<(Insertion, Cost)> = None;

    for route_id in solution.route_ids() {
        let route = solution.route(route_id);
        for_each_insertion(solution, route_id, stop, |insertion| {
            let cost = insertion_cost(route, insertion.position, stop, arc_cost);
            if best.as_ref().is_none_or(|(_, best_cost)| cost < *best_cost) {
                best = Some((insertion, cost));
            }
        });
    }

    best
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::test_utils::{create_line_problem, create_problem_with_demands};

    use super::*;

    #[test]
    fn test_insertion_cost_in_empty_route_is_round_trip() {
        let problem = create_line_problem(3, 1, 10);
        let route = WorkingSolutionRoute::empty(0);

        assert_eq!(insertion_cost(&route, 0, StopIdx::new(2), &problem), 4000.0);
    }

    #[test]
    fn test_best_insertion_picks_cheapest_position() {
        let problem = Arc::new(create_line_problem(4, 1, 10));
        let mut solution = WorkingSolution::new(Arc::clone(&problem));
        solution.push_stop(RouteIdx::new(0), StopIdx::new(1));
        solution.push_stop(RouteIdx::new(0), StopIdx::new(3));

        let (insertion, cost) = best_insertion(&solution, StopIdx::new(2), problem.as_ref()).unwrap();

        assert_eq!(insertion.position, 1);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_best_insertion_respects_capacity() {
        // Demands: depot, 4, 4, 5 with capacity 8
        let problem = Arc::new(create_problem_with_demands(&[0, 4, 4, 5], 1, 8));
        let mut solution = WorkingSolution::new(Arc::clone(&problem));
        solution.push_stop(RouteIdx::new(0), StopIdx::new(1));
        solution.push_stop(RouteIdx::new(0), StopIdx::new(2));

        assert!(best_insertion(&solution, StopIdx::new(3), problem.as_ref()).is_none());
    }
}
