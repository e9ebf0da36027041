use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("No stop can be served with the given fleet")]
    NoSolution,

    #[error("Failed to build the search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
