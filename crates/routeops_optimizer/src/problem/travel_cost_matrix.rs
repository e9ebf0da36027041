use routeops_providers::travel_matrices::{Meters, Seconds, TravelMatrices};

use super::{objective::Objective, stop::StopIdx};

pub type Cost = f64;

/// Distance and time matrices plus the objective that turns them into arc costs.
pub struct TravelCostMatrix {
    matrices: TravelMatrices,
    objective: Objective,
}

impl TravelCostMatrix {
    pub fn new(matrices: TravelMatrices, objective: Objective) -> Self {
        TravelCostMatrix {
            matrices,
            objective,
        }
    }

    #[inline(always)]
    pub fn travel_cost(&self, from: StopIdx, to: StopIdx) -> Cost {
        match self.objective {
            Objective::Distance => self.matrices.distance(from.get(), to.get()) as Cost,
            Objective::Time => self.matrices.time(from.get(), to.get()) as Cost,
        }
    }

    #[inline(always)]
    pub fn travel_distance(&self, from: StopIdx, to: StopIdx) -> Meters {
        self.matrices.distance(from.get(), to.get())
    }

    #[inline(always)]
    pub fn travel_time(&self, from: StopIdx, to: StopIdx) -> Seconds {
        self.matrices.time(from.get(), to.get())
    }

    pub fn num_locations(&self) -> usize {
        self.matrices.num_locations()
    }
}
