pub mod arc_cost;
pub mod construction;
pub mod gls;
pub mod insertion;
pub mod ls;
pub mod score;
pub mod search;
pub mod solution;
#[allow(clippy::module_inception)]
pub mod solver;
pub mod solver_error;
pub mod solver_params;
