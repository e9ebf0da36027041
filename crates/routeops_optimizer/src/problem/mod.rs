pub mod objective;
pub mod stop;
pub mod travel_cost_matrix;
pub mod vehicle_routing_problem;
