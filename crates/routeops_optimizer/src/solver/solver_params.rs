use jiff::SignedDuration;

pub const DEFAULT_TIME_LIMIT: SignedDuration = SignedDuration::from_secs(5);

#[derive(Clone, Debug)]
pub struct SolverParams {
    /// The search stops as soon as any termination is met.
    pub terminations: Vec<Termination>,
    pub search_strategy: SearchStrategy,

    /// Scales the guided local search penalty weight `λ`.
    pub gls_lambda_coefficient: f64,

    pub search_threads: Threads,

    /// Seeds the tie breaking between equally good moves. Random when unset.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug)]
pub enum Termination {
    Duration(SignedDuration),
    Iterations(usize),
    IterationsWithoutImprovement(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    #[default]
    GuidedLocalSearch,
    ConstructionOnly,
}

#[derive(Clone, Debug)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl SolverParams {
    /// Tightest wall-clock budget among the terminations.
    pub fn time_limit(&self) -> Option<SignedDuration> {
        self.terminations
            .iter()
            .filter_map(|termination| match termination {
                Termination::Duration(duration) => Some(*duration),
                _ => None,
            })
            .min()
    }

    pub fn with_time_limit(mut self, time_limit: SignedDuration) -> Self {
        self.terminations
            .retain(|termination| !matches!(termination, Termination::Duration(_)));
        self.terminations.push(Termination::Duration(time_limit));
        self
    }

    pub fn is_terminated(&self, iterations: usize, iterations_without_improvement: usize) -> bool {
        self.terminations.iter().any(|termination| match termination {
            Termination::Duration(_) => false,
            Termination::Iterations(max) => iterations >= *max,
            Termination::IterationsWithoutImprovement(max) => {
                iterations_without_improvement >= *max
            }
        })
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            terminations: vec![
                Termination::Duration(DEFAULT_TIME_LIMIT),
                Termination::IterationsWithoutImprovement(10000),
            ],
            search_strategy: SearchStrategy::default(),
            gls_lambda_coefficient: 0.1,
            search_threads: Threads::Auto,
            seed: None,
        }
    }
}
