use crate::{
    geometry_service::GeometryService, lat_lng::LatLng, matrix_service::MatrixService,
    provider_error::ProviderError, travel_matrices::TravelMatrices,
};

pub struct FailingService;

impl MatrixService for FailingService {
    async fn fetch_matrix(&self, _points: &[LatLng]) -> Result<TravelMatrices, ProviderError> {
        Err(ProviderError::Unavailable(String::from("connection refused")))
    }
}

impl GeometryService for FailingService {
    async fn fetch_route_geometry(&self, _points: &[LatLng]) -> Result<Vec<LatLng>, ProviderError> {
        Err(ProviderError::Unavailable(String::from("connection refused")))
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
