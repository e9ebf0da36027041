use crate::{
    problem::travel_cost_matrix::Cost,
    solver::{
        arc_cost::ArcCost,
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route 2-Opt**
///
/// Reverses the segment `[from, to]` of a route.
///
/// ```text
/// BEFORE:
///    ... (A) -> [from] -> ... -> [to] -> (D) ...
///
/// AFTER:
///    ... (A) -> [to] -> ... -> [from] -> (D) ...
///
/// Edges Removed: (A->from), (to->D)
/// Edges Created: (A->to),   (from->D)
/// ```
///
/// Arcs inside the segment are travelled backwards, which matters when costs
/// are not symmetric.
#[derive(Debug)]
pub struct TwoOptOperator {
    params: TwoOptParams,
}

#[derive(Debug)]
pub struct TwoOptParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl TwoOptOperator {
    pub fn new(params: TwoOptParams) -> Self {
        debug_assert!(params.from < params.to, "2-opt needs from < to");

        TwoOptOperator { params }
    }
}

impl LocalSearchOperator for TwoOptOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let route = solution.route(r1);
        for from in 0..route.len() {
            for to in from + 1..route.len() {
                consumer(TwoOptOperator::new(TwoOptParams {
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
        let TwoOptParams { from, to, .. } = self.params;

        let a = route.previous_stop(from);
        let b = route.stop(from);
        let c = route.stop(to);
        let d = route.next_stop(to);

        let mut delta = arc_cost.arc_cost(a, c) + arc_cost.arc_cost(b, d)
            - arc_cost.arc_cost(a, b)
            - arc_cost.arc_cost(c, d);

        for position in from..to {
            let current = route.stop(position);
            let next = route.stop(position + 1);
            delta += arc_cost.arc_cost(next, current) - arc_cost.arc_cost(current, next);
        }

        delta
    }

    fn is_valid(&self, _solution: &WorkingSolution) -> bool {
        true
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let TwoOptParams { route_id, from, to } = self.params;

        solution.with_route_mut(route_id, |problem, route| {
            route.reverse(problem, from, to);
        });
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.route_id]
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{
        create_asymmetric_problem, create_line_problem, solution_with_routes, stops,
    };

    use super::*;

    #[test]
    fn test_two_opt_uncrosses_route() {
        let problem = create_line_problem(5, 1, 100);
        let mut solution = solution_with_routes(problem, &[&[1, 3, 2, 4]]);
        let before = solution.total_cost();

        let op = TwoOptOperator::new(TwoOptParams {
            route_id: RouteIdx::new(0),
            from: 1,
            to: 2,
        });

        let delta = op.cost_delta(&solution, solution.problem());
        op.apply(&mut solution);

        assert_eq!(solution.route(RouteIdx::new(0)).stops(), &stops(&[1, 2, 3, 4])[..]);
        assert_eq!(delta, -2000.0);
        assert_eq!(solution.total_cost(), before + delta);
    }

    #[test]
    fn test_two_opt_delta_on_asymmetric_costs() {
        let solution = solution_with_routes(create_asymmetric_problem(6), &[&[1, 2, 3, 4, 5]]);

        TwoOptOperator::generate_moves(&solution, (RouteIdx::new(0), RouteIdx::new(0)), |op| {
            let mut copy = solution.clone();
            let delta = op.cost_delta(&solution, solution.problem());
            op.apply(&mut copy);
            assert!((copy.total_cost() - (solution.total_cost() + delta)).abs() < 1e-9);
        });
    }
}
