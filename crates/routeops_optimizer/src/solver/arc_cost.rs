use crate::problem::{
    stop::StopIdx, travel_cost_matrix::Cost, vehicle_routing_problem::VehicleRoutingProblem,
};

/// Prices a directed arc. Operators evaluate their deltas through this so the
/// same neighbourhood can run on true or penalized costs.
pub trait ArcCost: Sync {
    fn arc_cost(&self, from: StopIdx, to: StopIdx) -> Cost;
}

impl ArcCost for VehicleRoutingProblem {
    #[inline(always)]
    fn arc_cost(&self, from: StopIdx, to: StopIdx) -> Cost {
        self.travel_cost(from, to)
    }
}
