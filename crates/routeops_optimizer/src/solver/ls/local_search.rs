use std::sync::atomic::{AtomicBool, Ordering};

use rand::{Rng, seq::IndexedRandom};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{Level, debug, instrument};

use crate::{
    solver::{
        arc_cost::ArcCost,
        ls::{
            insert_unassigned::InsertUnassignedOperator,
            inter_relocate::InterRelocateOperator,
            inter_swap::InterSwapOperator,
            inter_two_opt_star::InterTwoOptStarOperator,
            r#move::{LocalSearchMove, LocalSearchOperator},
            relocate::RelocateOperator,
            swap::SwapOperator,
            two_opt::TwoOptOperator,
        },
        score::{IMPROVEMENT_EPSILON, Score},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
    utils::deadline::Deadline,
};

type RoutePair = (RouteIdx, RouteIdx);
type BestMove = Option<(Score, LocalSearchMove)>;

/// How many moves are evaluated between two deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 256;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearchOutcome {
    pub moves_applied: usize,

    /// The deadline was hit before a local optimum was reached.
    pub interrupted: bool,
}

/// Best-improvement descent over every route pair.
///
/// The best move of each pair is cached; after a move only the pairs that
/// involve a modified route are evaluated again. Pairs are evaluated in parallel.
pub struct LocalSearch {
    num_routes: usize,
    best_moves: Vec<BestMove>,
    stale_pairs: Vec<RoutePair>,
}

impl LocalSearch {
    pub fn new(num_routes: usize) -> Self {
        LocalSearch {
            num_routes,
            best_moves: (0..num_routes * num_routes).map(|_| None).collect(),
            stale_pairs: Vec::with_capacity(num_routes * num_routes),
        }
    }

    #[inline]
    fn pair_index(&self, (r1, r2): RoutePair) -> usize {
        r1.get() * self.num_routes + r2.get()
    }

    fn mark_all_stale(&mut self) {
        self.stale_pairs.clear();
        for r1 in 0..self.num_routes {
            for r2 in 0..self.num_routes {
                self.stale_pairs.push((RouteIdx::new(r1), RouteIdx::new(r2)));
            }
        }
    }

    fn mark_routes_stale(&mut self, updated_routes: &[RouteIdx], unassigned_changed: bool) {
        self.stale_pairs.clear();
        for r in 0..self.num_routes {
            let other = RouteIdx::new(r);
            for &updated in updated_routes {
                self.stale_pairs.push((updated, other));
                if other != updated {
                    self.stale_pairs.push((other, updated));
                }
            }

            // Insertion moves of every route depend on the unassigned stops
            if unassigned_changed {
                self.stale_pairs.push((other, other));
            }
        }

        self.stale_pairs.sort_unstable();
        self.stale_pairs.dedup();
    }

    /// Applies improving moves, priced with `arc_cost`, until none is left or
    /// the deadline is reached. Ties between equally good moves are broken with `rng`.
    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn run<A, R>(
        &mut self,
        solution: &mut WorkingSolution,
        arc_cost: &A,
        deadline: &Deadline,
        rng: &mut R,
    ) -> LocalSearchOutcome
    where
        A: ArcCost + ?Sized,
        R: Rng,
    {
        debug_assert_eq!(solution.routes().len(), self.num_routes);

        let mut outcome = LocalSearchOutcome::default();
        self.mark_all_stale();

        loop {
            let interrupted = AtomicBool::new(false);
            let evaluated = {
                let solution = &*solution;
                let interrupted = &interrupted;
                self.stale_pairs
                    .par_iter()
                    .map(|&pair| {
                        if deadline.is_reached() {
                            interrupted.store(true, Ordering::Relaxed);
                            return (pair, None);
                        }

                        let best = find_best_move(solution, pair, arc_cost, deadline);
                        if best.is_none() && deadline.is_reached() {
                            interrupted.store(true, Ordering::Relaxed);
                        }

                        (pair, best)
                    })
                    .collect::<Vec<_>>()
            };

            if interrupted.load(Ordering::Relaxed) {
                outcome.interrupted = true;
                break;
            }

            for (pair, best) in evaluated {
                let index = self.pair_index(pair);
                self.best_moves[index] = best;
            }

            let Some(index) = self.select_best(rng) else {
                break;
            };

            let Some((delta, op)) = self.best_moves[index].take() else {
                break;
            };

            debug!(
                "Apply {} (d={:?}) {:?}",
                op.operator_name(),
                delta,
                op
            );

            let unassigned_before = solution.unassigned_count();
            op.apply(solution);
            debug_assert!(solution.is_consistent());
            outcome.moves_applied += 1;

            self.mark_routes_stale(
                &op.updated_routes(),
                unassigned_before != solution.unassigned_count(),
            );
        }

        outcome
    }

    /// Index of a best cached move, picked at random among equally good ones.
    fn select_best<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let best = self
            .best_moves
            .iter()
            .filter_map(|best| best.as_ref().map(|(delta, _)| *delta))
            .min()?;

        let candidates = self
            .best_moves
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                Some((delta, _))
                    if (delta.hard_score - best.hard_score).abs() <= IMPROVEMENT_EPSILON
                        && delta.soft_score - best.soft_score <= IMPROVEMENT_EPSILON =>
                {
                    Some(index)
                }
                _ => None,
            })
            .collect::<Vec<_>>();

        candidates.choose(rng).copied()
    }
}

fn find_best_move<A>(
    solution: &WorkingSolution,
    pair: RoutePair,
    arc_cost: &A,
    deadline: &Deadline,
) -> BestMove
where
    A: ArcCost + ?Sized,
{
    let mut search = PairSearch {
        solution,
        arc_cost,
        deadline,
        evaluated: 0,
        interrupted: false,
        best: None,
    };

    search.scan::<InsertUnassignedOperator>(pair, LocalSearchMove::InsertUnassigned);
    search.scan::<RelocateOperator>(pair, LocalSearchMove::Relocate);
    search.scan::<TwoOptOperator>(pair, LocalSearchMove::TwoOpt);
    search.scan::<SwapOperator>(pair, LocalSearchMove::Swap);
    search.scan::<InterRelocateOperator>(pair, LocalSearchMove::InterRelocate);
    search.scan::<InterSwapOperator>(pair, LocalSearchMove::InterSwap);
    search.scan::<InterTwoOptStarOperator>(pair, LocalSearchMove::InterTwoOptStar);

    if search.interrupted {
        None
    } else {
        search.best
    }
}

struct PairSearch<'a, A: ?Sized> {
    solution: &'a WorkingSolution,
    arc_cost: &'a A,
    deadline: &'a Deadline,
    evaluated: usize,
    interrupted: bool,
    best: BestMove,
}

impl<A> PairSearch<'_, A>
where
    A: ArcCost + ?Sized,
{
    fn scan<O>(&mut self, pair: RoutePair, wrap: fn(O) -> LocalSearchMove)
    where
        O: LocalSearchOperator,
    {
        if self.interrupted {
            return;
        }

        let solution = self.solution;
        O::generate_moves(solution, pair, |op| {
            if self.interrupted {
                return;
            }

            self.evaluated += 1;
            if self.evaluated % DEADLINE_CHECK_INTERVAL == 0 && self.deadline.is_reached() {
                self.interrupted = true;
                return;
            }

            let delta = op.delta(solution, self.arc_cost);
            if !delta.is_improvement() {
                return;
            }

            if self
                .best
                .as_ref()
                .is_none_or(|(best_delta, _)| delta < *best_delta)
                && op.is_valid(solution)
            {
                self.best = Some((delta, wrap(op)));
            }
        });
    }
}
