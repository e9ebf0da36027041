pub mod aggregate;
pub mod dispatch_error;
pub mod dispatch_params;
pub mod pipeline;
