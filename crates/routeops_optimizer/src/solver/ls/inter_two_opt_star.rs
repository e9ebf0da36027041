use crate::{
    problem::travel_cost_matrix::Cost,
    solver::{
        arc_cost::ArcCost,
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route 2-Opt\***
///
/// Cuts both routes and exchanges their tails. `first` and `second` are the
/// first positions of the tails; a tail may be empty.
///
/// ```text
/// BEFORE:
///    R1: (depot) -> A1 ... (A) -> [first] ... -> (depot)
///    R2: (depot) -> B1 ... (B) -> [second] ... -> (depot)
///
/// AFTER:
///    R1: (depot) -> A1 ... (A) -> [second] ... -> (depot)
///    R2: (depot) -> B1 ... (B) -> [first] ... -> (depot)
///
/// Edges Removed: (A->first),  (B->second)
/// Edges Created: (A->second), (B->first)
/// ```
#[derive(Debug)]
pub struct InterTwoOptStarOperator {
    params: InterTwoOptStarParams,
}

#[derive(Debug)]
pub struct InterTwoOptStarParams {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    pub first: usize,
    pub second: usize,
}

impl InterTwoOptStarOperator {
    pub fn new(params: InterTwoOptStarParams) -> Self {
        debug_assert_ne!(params.first_route_id, params.second_route_id);

        InterTwoOptStarOperator { params }
    }
}

impl LocalSearchOperator for InterTwoOptStarOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 >= r2 {
            return;
        }

        let first_route = solution.route(r1);
        let second_route = solution.route(r2);

        if first_route.is_empty() && second_route.is_empty() {
            return;
        }

        for first in 0..=first_route.len() {
            for second in 0..=second_route.len() {
                // Exchanging whole routes or two empty tails changes nothing
                if (first == 0 && second == 0)
                    || (first == first_route.len() && second == second_route.len())
                {
                    continue;
                }

                consumer(InterTwoOptStarOperator::new(InterTwoOptStarParams {
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
        let first = first_route.stop_or_depot(self.params.first);
        let b = second_route.previous_stop(self.params.second);
        let second = second_route.stop_or_depot(self.params.second);

        arc_cost.arc_cost(a, second) + arc_cost.arc_cost(b, first)
            - arc_cost.arc_cost(a, first)
            - arc_cost.arc_cost(b, second)
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let problem = solution.problem();
        let first_route = solution.route(self.params.first_route_id);
        let second_route = solution.route(self.params.second_route_id);

        let first_head = first_route.segment_load(0, self.params.first);
        let first_tail = first_route.segment_load(self.params.first, first_route.len());
        let second_head = second_route.segment_load(0, self.params.second);
        let second_tail = second_route.segment_load(self.params.second, second_route.len());

        problem.fits_load(first_head, second_tail) && problem.fits_load(second_head, first_tail)
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let InterTwoOptStarParams {
            first_route_id,
            second_route_id,
            first,
            second,
        } = self.params;

        solution.with_routes_mut(first_route_id, second_route_id, |problem, r1, r2| {
            let first_tail = r1.stops()[first..].to_vec();
            let second_tail = r2.stops()[second..].to_vec();

            let first_len = r1.len();
            let second_len = r2.len();
            r1.replace_stops(problem, first, first_len, &second_tail);
            r2.replace_stops(problem, second, second_len, &first_tail);
        });
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.first_route_id, self.params.second_route_id]
    }
}
