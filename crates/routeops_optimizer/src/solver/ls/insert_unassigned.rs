use crate::{
    problem::{stop::StopIdx, travel_cost_matrix::Cost},
    solver::{
        arc_cost::ArcCost,
        insertion::{Insertion, for_each_insertion, insertion_cost},
        ls::r#move::LocalSearchOperator,
        score::Score,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// Routes a stop that is currently unassigned. Serving one more stop always
/// beats any travel cost, so the delta carries a hard improvement.
#[derive(Debug)]
pub struct InsertUnassignedOperator {
    insertion: Insertion,
}

impl InsertUnassignedOperator {
    pub fn new(insertion: Insertion) -> Self {
        InsertUnassignedOperator { insertion }
    }

    pub fn stop(&self) -> StopIdx {
        self.insertion.stop
    }
}

impl LocalSearchOperator for InsertUnassignedOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 != r2 || solution.unassigned_count() == 0 {
            return;
        }

        for stop in solution.unassigned_stops() {
            for_each_insertion(solution, r1, stop, |insertion| {
                consumer(InsertUnassignedOperator::new(insertion));
            });
        }
    }

    fn cost_delta<A>(&self, solution: &WorkingSolution, arc_cost: &A) -> Cost
    where
        A: ArcCost + ?Sized,
    {
        insertion_cost(
            solution.route(self.insertion.route_id),
            self.insertion.position,
            self.insertion.stop,
            arc_cost,
        )
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        solution.is_unassigned(self.insertion.stop)
            && solution.has_capacity_for(self.insertion.route_id, self.insertion.stop)
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        solution.insert(&self.insertion);
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.insertion.route_id]
    }

    fn delta<A>(&self, solution: &WorkingSolution, arc_cost: &A) -> Score
    where
        A: ArcCost + ?Sized,
    {
        Score::new(-1.0, self.cost_delta(solution, arc_cost))
    }
}
