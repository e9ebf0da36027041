use routeops_osrm::OsrmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Osrm(#[from] OsrmError),

    #[error("Service returned {actual} values, expected {expected}")]
    Dimensions { expected: usize, actual: usize },

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}
