use crate::{
    problem::{stop::StopIdx, travel_cost_matrix::Cost, vehicle_routing_problem::VehicleRoutingProblem},
    solver::{arc_cost::ArcCost, score::IMPROVEMENT_EPSILON, solution::working_solution::WorkingSolution},
};

/// Penalty counters of the guided local search, one per directed arc.
#[derive(Debug, Clone)]
pub struct ArcPenalties {
    penalties: Vec<u32>,
    num_stops: usize,
}

impl ArcPenalties {
    pub fn new(num_stops: usize) -> Self {
        ArcPenalties {
            penalties: vec![0; num_stops * num_stops],
            num_stops,
        }
    }

    #[inline(always)]
    pub fn penalty(&self, from: StopIdx, to: StopIdx) -> u32 {
        self.penalties[from.get() * self.num_stops + to.get()]
    }

    /// Adds one penalty to every arc of `solution` with maximum utility
    /// `cost / (1 + penalty)`. Returns how many arcs were penalized.
    pub fn penalize_max_utility_arcs(
        &mut self,
        problem: &VehicleRoutingProblem,
        solution: &WorkingSolution,
    ) -> usize {
        let utility = |from: StopIdx, to: StopIdx| {
            problem.travel_cost(from, to) / (1.0 + self.penalty(from, to) as f64)
        };

        let max_utility = solution
            .routes()
            .iter()
            .flat_map(|route| route.arcs())
            .map(|(from, to)| utility(from, to))
            .fold(f64::NEG_INFINITY, f64::max);

        if !max_utility.is_finite() {
            return 0;
        }

        let selected = solution
            .routes()
            .iter()
            .flat_map(|route| route.arcs())
            .filter(|&(from, to)| utility(from, to) >= max_utility - IMPROVEMENT_EPSILON)
            .collect::<Vec<_>>();

        for &(from, to) in &selected {
            self.penalties[from.get() * self.num_stops + to.get()] += 1;
        }

        selected.len()
    }
}

/// `cost + λ · penalty`, the objective the guided local search descends on.
pub struct AugmentedCost<'a> {
    problem: &'a VehicleRoutingProblem,
    penalties: &'a ArcPenalties,
    lambda: f64,
}

impl<'a> AugmentedCost<'a> {
    pub fn new(problem: &'a VehicleRoutingProblem, penalties: &'a ArcPenalties, lambda: f64) -> Self {
        AugmentedCost {
            problem,
            penalties,
            lambda,
        }
    }
}

impl ArcCost for AugmentedCost<'_> {
    #[inline(always)]
    fn arc_cost(&self, from: StopIdx, to: StopIdx) -> Cost {
        self.problem.travel_cost(from, to) + self.lambda * self.penalties.penalty(from, to) as f64
    }
}

/// `λ = coefficient × cost / arcs` of a local optimum, zero when it has no arcs.
pub fn compute_lambda(coefficient: f64, solution: &WorkingSolution) -> f64 {
    let arcs = solution.arcs_count();
    if arcs == 0 {
        return 0.0;
    }

    coefficient * solution.total_cost() / arcs as f64
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        solver::solution::route_id::RouteIdx,
        test_utils::{create_line_problem, solution_with_routes},
    };

    use super::*;

    #[test]
    fn test_penalizes_the_longest_arc() {
        let solution = solution_with_routes(create_line_problem(4, 1, 100), &[&[1, 2, 3]]);
        let problem = Arc::clone(solution.problem_arc());
        let mut penalties = ArcPenalties::new(problem.num_stops());

        let count = penalties.penalize_max_utility_arcs(&problem, &solution);

        // 3 -> depot is 3000 m, every other arc is 1000 m
        assert_eq!(count, 1);
        assert_eq!(penalties.penalty(StopIdx::new(3), StopIdx::new(0)), 1);
        assert_eq!(penalties.penalty(StopIdx::new(0), StopIdx::new(3)), 0);

        // Utility of the penalized arc drops to 1500, still the highest
        let count = penalties.penalize_max_utility_arcs(&problem, &solution);
        assert_eq!(count, 1);
        assert_eq!(penalties.penalty(StopIdx::new(3), StopIdx::new(0)), 2);

        // Now 1000 everywhere: every arc gets penalized
        let count = penalties.penalize_max_utility_arcs(&problem, &solution);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_augmented_cost() {
        let solution = solution_with_routes(create_line_problem(3, 1, 100), &[&[1, 2]]);
        let problem = Arc::clone(solution.problem_arc());
        let mut penalties = ArcPenalties::new(problem.num_stops());
        penalties.penalize_max_utility_arcs(&problem, &solution);

        let augmented = AugmentedCost::new(&problem, &penalties, 50.0);

        assert_eq!(augmented.arc_cost(StopIdx::new(2), StopIdx::new(0)), 2050.0);
        assert_eq!(augmented.arc_cost(StopIdx::new(0), StopIdx::new(1)), 1000.0);
        assert_eq!(
            solution.route(RouteIdx::new(0)).cost_with(&augmented),
            solution.total_cost() + 50.0
        );
    }

    #[test]
    fn test_lambda() {
        let solution = solution_with_routes(create_line_problem(4, 1, 100), &[&[1, 2, 3]]);

        // 6000 over 4 arcs
        assert_eq!(compute_lambda(0.1, &solution), 150.0);

        let empty = solution_with_routes(create_line_problem(4, 1, 100), &[&[]]);
        assert_eq!(compute_lambda(0.1, &empty), 0.0);
    }
}
