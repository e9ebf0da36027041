use crate::{
    problem::travel_cost_matrix::Cost,
    solver::{
        arc_cost::ArcCost,
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route Swap**
///
/// Exchanges the stops at `first` and `second` (`first < second`).
///
/// ```text
/// BEFORE:
///    ... (A) -> [first] -> (B) ... (X) -> [second] -> (Y) ...
///
/// AFTER:
///    ... (A) -> [second] -> (B) ... (X) -> [first] -> (Y) ...
/// ```
#[derive(Debug)]
pub struct SwapOperator {
    params: SwapOperatorParams,
}

#[derive(Debug)]
pub struct SwapOperatorParams {
    pub route_id: RouteIdx,
    pub first: usize,
    pub second: usize,
}

impl SwapOperator {
    pub fn new(params: SwapOperatorParams) -> Self {
        debug_assert!(params.first < params.second, "Swap needs first < second");

        SwapOperator { params }
    }
}

impl LocalSearchOperator for SwapOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let route = solution.route(r1);
        for first in 0..route.len() {
            // Adjacent swaps are already covered by 2-opt
            for second in first + 2..route.len() {
                consumer(SwapOperator::new(SwapOperatorParams {
                    route_id: r1,
                    first,
                    second,
                }));
            }
        }
    }

    fn cost_delta<A>(&self, solution: &WorkingSolution, arc_cost: &A) -> Cost
    where
        A: ArcCost + ?Sized,
    {
        let route = solution.route(self.params.route_id);
        let SwapOperatorParams { first, second, .. } = self.params;

        let a = route.previous_stop(first);
        let s1 = route.stop(first);
        let b = route.next_stop(first);

        let x = route.previous_stop(second);
        let s2 = route.stop(second);
        let y = route.next_stop(second);

        if first + 1 == second {
            // A -> s1 -> s2 -> Y becomes A -> s2 -> s1 -> Y
            return arc_cost.arc_cost(a, s2) + arc_cost.arc_cost(s2, s1) + arc_cost.arc_cost(s1, y)
                - arc_cost.arc_cost(a, s1)
                - arc_cost.arc_cost(s1, s2)
                - arc_cost.arc_cost(s2, y);
        }

        let current_cost = arc_cost.arc_cost(a, s1)
            + arc_cost.arc_cost(s1, b)
            + arc_cost.arc_cost(x, s2)
            + arc_cost.arc_cost(s2, y);
        let new_cost = arc_cost.arc_cost(a, s2)
            + arc_cost.arc_cost(s2, b)
            + arc_cost.arc_cost(x, s1)
            + arc_cost.arc_cost(s1, y);

        new_cost - current_cost
    }

    fn is_valid(&self, _solution: &WorkingSolution) -> bool {
        true
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let SwapOperatorParams {
            route_id,
            first,
            second,
        } = self.params;

        solution.with_route_mut(route_id, |problem, route| {
            route.swap(problem, first, second);
        });
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.route_id]
    }
}
