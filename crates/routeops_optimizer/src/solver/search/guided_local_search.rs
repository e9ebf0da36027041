use std::sync::Arc;

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{Level, debug, info, instrument};

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        construction::construct_solution::construct_solution,
        gls::arc_penalties::{ArcPenalties, AugmentedCost, compute_lambda},
        ls::local_search::LocalSearch,
        search::route_search::{RouteSearch, ensure_served},
        solution::{search_solution::SearchSolution, working_solution::WorkingSolution},
        solver_error::SolverError,
        solver_params::{SolverParams, Threads},
    },
    utils::deadline::Deadline,
};

/// Guided local search on top of the construction.
///
/// Each iteration descends to a local optimum of the augmented cost
/// `cost + λ·Σ penalty(arc)`, keeps the solution if it beats the best one on
/// true cost, then penalizes the arcs of maximum utility `cost / (1 + penalty)`.
/// The first descent runs on true cost and fixes `λ`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuidedLocalSearch;

impl RouteSearch for GuidedLocalSearch {
    #[instrument(skip_all, level = Level::DEBUG)]
    fn solve(
        &self,
        problem: Arc<VehicleRoutingProblem>,
        params: &SolverParams,
    ) -> Result<SearchSolution, SolverError> {
        let deadline = params
            .time_limit()
            .map_or_else(Deadline::unlimited, Deadline::new);

        let current = construct_solution(Arc::clone(&problem));
        ensure_served(&current)?;

        let construction_score = current.score();

        let run = || search(&problem, params, &deadline, current);
        let (best, iterations) = match params.search_threads {
            Threads::Auto => run(),
            ref threads => rayon::ThreadPoolBuilder::new()
                .num_threads(threads.number_of_threads())
                .build()?
                .install(run),
        };

        debug_assert!(best.score() <= construction_score);
        info!(
            "Guided local search: {} iterations in {:?}, score {:?} (construction {:?})",
            iterations,
            deadline.elapsed(),
            best.score(),
            construction_score
        );

        Ok(SearchSolution::from_working_solution(
            &best,
            iterations,
            deadline.elapsed(),
        ))
    }
}

fn search(
    problem: &VehicleRoutingProblem,
    params: &SolverParams,
    deadline: &Deadline,
    mut current: WorkingSolution,
) -> (WorkingSolution, usize) {
    let mut rng = match params.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let mut local_search = LocalSearch::new(problem.num_routes());
    let mut penalties = ArcPenalties::new(problem.num_stops());

    let mut best = current.clone();
    let mut best_score = best.score();

    let mut iterations = 0;
    let mut iterations_without_improvement = 0;

    // First descent on true cost, it defines the penalty weight
    let outcome = local_search.run(&mut current, problem, deadline, &mut rng);
    if current.score() < best_score {
        best = current.clone();
        best_score = best.score();
    }

    let lambda = compute_lambda(params.gls_lambda_coefficient, &current);
    debug!("GLS: first local optimum {:?}, lambda {}", best_score, lambda);

    if outcome.interrupted || lambda <= 0.0 {
        return (best, iterations);
    }

    while !deadline.is_reached()
        && !params.is_terminated(iterations, iterations_without_improvement)
    {
        iterations += 1;

        let penalized = penalties.penalize_max_utility_arcs(problem, &current);
        if penalized == 0 {
            break;
        }

        let augmented = AugmentedCost::new(problem, &penalties, lambda);
        let outcome = local_search.run(&mut current, &augmented, deadline, &mut rng);

        let score = current.score();
        if score < best_score {
            debug!("GLS: iteration {} improved {:?} -> {:?}", iterations, best_score, score);
            best = current.clone();
            best_score = score;
            iterations_without_improvement = 0;
        } else {
            iterations_without_improvement += 1;
        }

        if outcome.interrupted {
            break;
        }
    }

    (best, iterations)
}
