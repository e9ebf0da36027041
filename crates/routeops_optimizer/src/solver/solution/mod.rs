pub mod route;
pub mod route_id;
pub mod search_solution;
pub mod working_solution;
