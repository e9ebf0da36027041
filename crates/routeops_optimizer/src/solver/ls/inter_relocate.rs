use crate::{
    problem::travel_cost_matrix::Cost,
    solver::{
        arc_cost::ArcCost,
        insertion::insertion_cost,
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route Relocate**
///
/// Moves the stop at `from` in `from_route_id` to position `to` in `to_route_id`.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [from] -> (C) ...
///    R2: ... (X) -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> (C) ...
///    R2: ... (X) -> [from] -> (Y) ...
/// ```
#[derive(Debug)]
pub struct InterRelocateOperator {
    params: InterRelocateParams,
}

#[derive(Debug)]
pub struct InterRelocateParams {
    pub from_route_id: RouteIdx,
    pub to_route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl InterRelocateOperator {
    pub fn new(params: InterRelocateParams) -> Self {
        debug_assert_ne!(params.from_route_id, params.to_route_id);

        InterRelocateOperator { params }
    }
}

impl LocalSearchOperator for InterRelocateOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 == r2 {
            return;
        }

        let from_route = solution.route(r1);
        let to_route = solution.route(r2);

        for from in 0..from_route.len() {
            if !solution.has_capacity_for(r2, from_route.stop(from)) {
                continue;
            }

            for to in 0..=to_route.len() {
                consumer(InterRelocateOperator::new(InterRelocateParams {
                    from_route_id: r1,
                    to_route_id: r2,
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
        let from_route = solution.route(self.params.from_route_id);
        let to_route = solution.route(self.params.to_route_id);

        let a = from_route.previous_stop(self.params.from);
        let stop = from_route.stop(self.params.from);
        let c = from_route.next_stop(self.params.from);

        let removal_delta =
            arc_cost.arc_cost(a, c) - arc_cost.arc_cost(a, stop) - arc_cost.arc_cost(stop, c);

        removal_delta + insertion_cost(to_route, self.params.to, stop, arc_cost)
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let stop = solution.route(self.params.from_route_id).stop(self.params.from);
        solution.has_capacity_for(self.params.to_route_id, stop)
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let InterRelocateParams {
            from_route_id,
            to_route_id,
            from,
            to,
        } = self.params;

        solution.with_routes_mut(from_route_id, to_route_id, |problem, from_route, to_route| {
            let stop = from_route.remove(problem, from);
            to_route.insert(problem, to, stop);
        });
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.from_route_id, self.params.to_route_id]
    }
}
