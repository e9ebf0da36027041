use thiserror::Error;

#[derive(Debug, Error)]
pub enum OsrmError {
    #[error("HTTP client could not be built: {0}")]
    Client(reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("OSRM responded with code {code}: {message}")]
    Code { code: String, message: String },

    #[error("Incomplete response")]
    IncompleteResponse,

    #[error("Expected a {expected}x{expected} matrix")]
    Dimensions { expected: usize },

    #[error("No route from {from} to {to}")]
    Unreachable { from: usize, to: usize },

    #[error("Invalid matrix value {value} from {from} to {to}")]
    InvalidValue { from: usize, to: usize, value: f64 },
}
