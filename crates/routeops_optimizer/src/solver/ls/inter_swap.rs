use crate::{
    problem::travel_cost_matrix::Cost,
    solver::{
        arc_cost::ArcCost,
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route Swap**
///
/// Exchanges the stop at `first` in `first_route_id` with the stop at `second` in `second_route_id`.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [first] -> (B) ...
///    R2: ... (X) -> [second] -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> [second] -> (B) ...
///    R2: ... (X) -> [first] -> (Y) ...
/// ```
#[derive(Debug)]
pub struct InterSwapOperator {
    params: InterSwapOperatorParams,
}

#[derive(Debug)]
pub struct InterSwapOperatorParams {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    pub first: usize,
    pub second: usize,
}

impl InterSwapOperator {
    pub fn new(params: InterSwapOperatorParams) -> Self {
        debug_assert_ne!(params.first_route_id, params.second_route_id);

        InterSwapOperator { params }
    }
}

impl LocalSearchOperator for InterSwapOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        // Symmetric move, one direction is enough
        if r1 >= r2 {
            return;
        }

        let first_route = solution.route(r1);
        let second_route = solution.route(r2);

        for first in 0..first_route.len() {
            for second in 0..second_route.len() {
                consumer(InterSwapOperator::new(InterSwapOperatorParams {
                    first_route_id: r1,
                    second_route_id: r2,
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
        let first_route = solution.route(self.params.first_route_id);
        let second_route = solution.route(self.params.second_route_id);

        let a = first_route.previous_stop(self.params.first);
        let s1 = first_route.stop(self.params.first);
        let b = first_route.next_stop(self.params.first);

        let x = second_route.previous_stop(self.params.second);
        let s2 = second_route.stop(self.params.second);
        let y = second_route.next_stop(self.params.second);

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

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let problem = solution.problem();
        let first_route = solution.route(self.params.first_route_id);
        let second_route = solution.route(self.params.second_route_id);

        let first_demand = problem.demand(first_route.stop(self.params.first));
        let second_demand = problem.demand(second_route.stop(self.params.second));

        problem.fits_load(first_route.load() - first_demand, second_demand)
            && problem.fits_load(second_route.load() - second_demand, first_demand)
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let InterSwapOperatorParams {
            first_route_id,
            second_route_id,
            first,
            second,
        } = self.params;

        solution.with_routes_mut(first_route_id, second_route_id, |problem, r1, r2| {
            let s1 = r1.stop(first);
            let s2 = r2.stop(second);
            r1.replace_stops(problem, first, first + 1, &[s2]);
            r2.replace_stops(problem, second, second + 1, &[s1]);
        });
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.first_route_id, self.params.second_route_id]
    }
}
