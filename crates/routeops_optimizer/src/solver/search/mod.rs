pub mod construction_only;
pub mod guided_local_search;
pub mod route_search;
