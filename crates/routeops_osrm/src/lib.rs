pub mod client;
pub mod error;
pub mod response;

pub use client::{OsrmClient, OsrmClientParams, OsrmMatrices};
pub use error::OsrmError;
