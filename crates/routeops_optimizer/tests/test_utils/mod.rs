use jiff::SignedDuration;
use routeops_optimizer::{
    dispatch::dispatch_params::DispatchParams,
    json::types::{JsonSolveRequest, JsonStop},
    problem::objective::Objective,
};
use routeops_providers::{
    geometry_service::GeometryService, lat_lng::LatLng, matrix_service::MatrixService,
    provider_error::ProviderError, route_geometry_client::RouteGeometryClient,
    travel_matrices::TravelMatrices, travel_matrix_client::TravelMatrixClient,
};

/// Stands in for an unreachable OSRM instance.
pub struct OfflineService;

impl MatrixService for OfflineService {
    async fn fetch_matrix(&self, _points: &[LatLng]) -> Result<TravelMatrices, ProviderError> {
        Err(ProviderError::Unavailable(String::from("offline")))
    }
}

impl GeometryService for OfflineService {
    async fn fetch_route_geometry(&self, _points: &[LatLng]) -> Result<Vec<LatLng>, ProviderError> {
        Err(ProviderError::Unavailable(String::from("offline")))
    }
}

pub struct FixedMatrixService(pub TravelMatrices);

impl MatrixService for FixedMatrixService {
    async fn fetch_matrix(&self, _points: &[LatLng]) -> Result<TravelMatrices, ProviderError> {
        Ok(self.0.clone())
    }
}

pub struct FixedGeometryService(pub Vec<LatLng>);

impl GeometryService for FixedGeometryService {
    async fn fetch_route_geometry(&self, _points: &[LatLng]) -> Result<Vec<LatLng>, ProviderError> {
        Ok(self.0.clone())
    }
}

pub fn offline_matrix_client() -> TravelMatrixClient<OfflineService> {
    TravelMatrixClient::new(Some(OfflineService))
}

pub fn offline_geometry_client() -> RouteGeometryClient<OfflineService> {
    RouteGeometryClient::new(Some(OfflineService))
}

pub fn fast_params() -> DispatchParams {
    DispatchParams::default()
        .with_time_limit(SignedDuration::from_millis(300))
        .with_seed(42)
}

pub fn stop(id: &str, lat: f64, lng: f64, demand: u64) -> JsonStop {
    JsonStop {
        id: id.to_owned(),
        lat,
        lng,
        demand,
    }
}

/// A depot in central Brussels and one stop per demand around it.
pub fn request(demands: &[u64], vehicles: usize, capacity: u64) -> JsonSolveRequest {
    let mut stops = vec![stop("depot", 50.8503, 4.3517, 0)];
    stops.extend(demands.iter().enumerate().map(|(i, &demand)| {
        let angle = i as f64 * 2.4;
        let radius = 0.01 + 0.004 * i as f64;
        stop(
            &format!("s{}", i + 1),
            50.8503 + radius * angle.sin(),
            4.3517 + radius * angle.cos(),
            demand,
        )
    }));

    JsonSolveRequest {
        stops,
        depot_id: String::from("depot"),
        vehicles,
        capacity,
        objective: Objective::Distance,
    }
}
