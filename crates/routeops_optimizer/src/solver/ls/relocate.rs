use crate::{
    problem::travel_cost_matrix::Cost,
    solver::{
        arc_cost::ArcCost,
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route Relocate**
///
/// Moves a single stop at `from` to a new position at `to`.
/// The stop is inserted *at* index `to` of the current route (after the stop at `to-1`).
///
/// ```text
/// BEFORE:
///    Route: ... (A) -> [from] -> (C) ... (X) -> (Y) ...
///
/// AFTER:
///    Route: ... (A) -> (C) ... (X) -> [from] -> (Y) ...
///
/// Edges Removed: (A->from), (from->C), (X->Y)
/// Edges Created: (A->C),    (X->from), (from->Y)
/// ```
#[derive(Debug)]
pub struct RelocateOperator {
    params: RelocateOperatorParams,
}

#[derive(Debug)]
pub struct RelocateOperatorParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl RelocateOperator {
    pub fn new(params: RelocateOperatorParams) -> Self {
        debug_assert!(
            params.from != params.to && params.from + 1 != params.to,
            "Relocate 'from' and 'to' must describe a change"
        );

        Self { params }
    }
}

impl LocalSearchOperator for RelocateOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let route = solution.route(r1);
        if route.len() < 2 {
            return;
        }

        for from in 0..route.len() {
            for to in 0..=route.len() {
                // Same position, or right after itself: no change
                if from == to || from + 1 == to {
                    continue;
                }

                consumer(RelocateOperator::new(RelocateOperatorParams {
                    route_id: r1,
                    from,
                    to,
                }));
            }
        }
    }

    fn cost_delta<A>(&self, solution: &WorkingSolution, arc_cost: &A) -> Cost
    where
        A: ArcCost + ?Sized,
    {
        let route = solution.route(self.params.route_id);

        let a = route.previous_stop(self.params.from);
        let from = route.stop(self.params.from);
        let c = route.next_stop(self.params.from);

        let x = route.previous_stop(self.params.to);
        let y = route.stop_or_depot(self.params.to);

        let current_cost =
            arc_cost.arc_cost(a, from) + arc_cost.arc_cost(from, c) + arc_cost.arc_cost(x, y);
        let new_cost =
            arc_cost.arc_cost(a, c) + arc_cost.arc_cost(x, from) + arc_cost.arc_cost(from, y);

        new_cost - current_cost
    }

    fn is_valid(&self, _solution: &WorkingSolution) -> bool {
        // The load of the route does not change
        true
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let RelocateOperatorParams { route_id, from, to } = self.params;

        solution.with_route_mut(route_id, |problem, route| {
            let stop = route.remove(problem, from);
            let position = if from < to { to - 1 } else { to };
            route.insert(problem, position, stop);
        });
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.route_id]
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        solver::{ls::r#move::LocalSearchOperator, solution::route_id::RouteIdx},
        test_utils::{create_line_problem, solution_with_routes, stops},
    };

    use super::*;

    #[test]
    fn test_relocate_forward() {
        let problem = create_line_problem(6, 1, 100);
        let mut solution = solution_with_routes(problem, &[&[1, 3, 4, 2, 5]]);
        let before = solution.total_cost();

        // Move stop 2 (position 3) before stop 3 (position 1)
        let op = RelocateOperator::new(RelocateOperatorParams {
            route_id: RouteIdx::new(0),
            from: 3,
            to: 1,
        });

        let delta = op.cost_delta(&solution, solution.problem());
        op.apply(&mut solution);

        assert_eq!(solution.route(RouteIdx::new(0)).stops(), &stops(&[1, 2, 3, 4, 5])[..]);
        assert_eq!(solution.total_cost(), before + delta);
        assert!(delta < 0.0);
    }

    #[test]
    fn test_relocate_backward_to_end() {
        let problem = create_line_problem(5, 1, 100);
        let mut solution = solution_with_routes(problem, &[&[4, 1, 2, 3]]);
        let before = solution.total_cost();

        let op = RelocateOperator::new(RelocateOperatorParams {
            route_id: RouteIdx::new(0),
            from: 0,
            to: 4,
        });

        let delta = op.cost_delta(&solution, solution.problem());
        op.apply(&mut solution);

        assert_eq!(solution.route(RouteIdx::new(0)).stops(), &stops(&[1, 2, 3, 4])[..]);
        assert_eq!(solution.total_cost(), before + delta);
    }

    #[test]
    fn test_generated_deltas_match_applied_cost() {
        let problem = create_line_problem(6, 1, 100);
        let solution = solution_with_routes(problem, &[&[3, 1, 5, 2, 4]]);

        let mut count = 0;
        RelocateOperator::generate_moves(&solution, (RouteIdx::new(0), RouteIdx::new(0)), |op| {
            let mut copy = solution.clone();
            let delta = op.cost_delta(&solution, solution.problem());
            op.apply(&mut copy);
            assert!((copy.total_cost() - (solution.total_cost() + delta)).abs() < 1e-9);
            count += 1;
        });

        // 5 stops, 6 positions, minus the 10 no-op moves
        assert_eq!(count, 20);
    }
}
