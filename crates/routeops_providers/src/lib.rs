pub mod geometry_service;
pub mod haversine;
pub mod lat_lng;
pub mod matrix_service;
pub mod matrix_source;
pub mod provider_error;
pub mod route_geometry_client;
pub mod travel_matrices;
pub mod travel_matrix_client;

#[cfg(test)]
pub(crate) mod test_utils;
