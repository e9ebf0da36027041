use crate::{
    problem::travel_cost_matrix::Cost,
    solver::{
        arc_cost::ArcCost,
        ls::{
            insert_unassigned::InsertUnassignedOperator, inter_relocate::InterRelocateOperator,
            inter_swap::InterSwapOperator, inter_two_opt_star::InterTwoOptStarOperator,
            relocate::RelocateOperator, swap::SwapOperator, two_opt::TwoOptOperator,
        },
        score::Score,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

pub trait LocalSearchOperator: Sized {
    /// Calls `consumer` with every move of this kind between routes `r1` and `r2`.
    /// Intra-route operators only answer when `r1 == r2`, inter-route ones when they differ.
    fn generate_moves<C>(solution: &WorkingSolution, pair: (RouteIdx, RouteIdx), consumer: C)
    where
        C: FnMut(Self);

    fn cost_delta<A>(&self, solution: &WorkingSolution, arc_cost: &A) -> Cost
    where
        A: ArcCost + ?Sized;

    fn is_valid(&self, solution: &WorkingSolution) -> bool;
    fn apply(&self, solution: &mut WorkingSolution);
    fn updated_routes(&self) -> Vec<RouteIdx>;

    fn delta<A>(&self, solution: &WorkingSolution, arc_cost: &A) -> Score
    where
        A: ArcCost + ?Sized,
    {
        Score::soft(self.cost_delta(solution, arc_cost))
    }
}

#[derive(Debug)]
pub enum LocalSearchMove {
    /// Moves one stop to another position of the same route.
    Relocate(RelocateOperator),
    /// Reverses a segment of one route.
    TwoOpt(TwoOptOperator),
    /// Exchanges two stops of the same route.
    Swap(SwapOperator),
    /// Moves one stop to another route.
    InterRelocate(InterRelocateOperator),
    /// Exchanges one stop of a route with one stop of another route.
    InterSwap(InterSwapOperator),
    /// Exchanges the tails of two routes.
    InterTwoOptStar(InterTwoOptStarOperator),
    /// Routes a stop that was unassigned.
    InsertUnassigned(InsertUnassignedOperator),
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::Relocate(_) => "Relocate",
            LocalSearchMove::TwoOpt(_) => "Two-Opt",
            LocalSearchMove::Swap(_) => "Swap",
            LocalSearchMove::InterRelocate(_) => "Inter-Relocate",
            LocalSearchMove::InterSwap(_) => "Inter-Swap",
            LocalSearchMove::InterTwoOptStar(_) => "Inter-2-Opt*",
            LocalSearchMove::InsertUnassigned(_) => "Insert-Unassigned",
        }
    }

    pub fn delta<A>(&self, solution: &WorkingSolution, arc_cost: &A) -> Score
    where
        A: ArcCost + ?Sized,
    {
        match self {
            LocalSearchMove::Relocate(op) => op.delta(solution, arc_cost),
            LocalSearchMove::TwoOpt(op) => op.delta(solution, arc_cost),
            LocalSearchMove::Swap(op) => op.delta(solution, arc_cost),
            LocalSearchMove::InterRelocate(op) => op.delta(solution, arc_cost),
            LocalSearchMove::InterSwap(op) => op.delta(solution, arc_cost),
            LocalSearchMove::InterTwoOptStar(op) => op.delta(solution, arc_cost),
            LocalSearchMove::InsertUnassigned(op) => op.delta(solution, arc_cost),
        }
    }

    pub fn is_valid(&self, solution: &WorkingSolution) -> bool {
        match self {
            LocalSearchMove::Relocate(op) => op.is_valid(solution),
            LocalSearchMove::TwoOpt(op) => op.is_valid(solution),
            LocalSearchMove::Swap(op) => op.is_valid(solution),
            LocalSearchMove::InterRelocate(op) => op.is_valid(solution),
            LocalSearchMove::InterSwap(op) => op.is_valid(solution),
            LocalSearchMove::InterTwoOptStar(op) => op.is_valid(solution),
            LocalSearchMove::InsertUnassigned(op) => op.is_valid(solution),
        }
    }

    pub fn apply(&self, solution: &mut WorkingSolution) {
        match self {
            LocalSearchMove::Relocate(op) => op.apply(solution),
            LocalSearchMove::TwoOpt(op) => op.apply(solution),
            LocalSearchMove::Swap(op) => op.apply(solution),
            LocalSearchMove::InterRelocate(op) => op.apply(solution),
            LocalSearchMove::InterSwap(op) => op.apply(solution),
            LocalSearchMove::InterTwoOptStar(op) => op.apply(solution),
            LocalSearchMove::InsertUnassigned(op) => op.apply(solution),
        }
    }

    pub fn updated_routes(&self) -> Vec<RouteIdx> {
        match self {
            LocalSearchMove::Relocate(op) => op.updated_routes(),
            LocalSearchMove::TwoOpt(op) => op.updated_routes(),
            LocalSearchMove::Swap(op) => op.updated_routes(),
            LocalSearchMove::InterRelocate(op) => op.updated_routes(),
            LocalSearchMove::InterSwap(op) => op.updated_routes(),
            LocalSearchMove::InterTwoOptStar(op) => op.updated_routes(),
            LocalSearchMove::InsertUnassigned(op) => op.updated_routes(),
        }
    }
}
