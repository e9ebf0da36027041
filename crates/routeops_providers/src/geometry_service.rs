use std::future::Future;

use routeops_osrm::OsrmClient;

use crate::{lat_lng::LatLng, provider_error::ProviderError};

/// A live source of road-following polylines.
pub trait GeometryService {
    fn fetch_route_geometry(
        &self,
        points: &[LatLng],
    ) -> impl Future<Output = Result<Vec<LatLng>, ProviderError>> + Send;
}

impl GeometryService for OsrmClient {
    async fn fetch_route_geometry(&self, points: &[LatLng]) -> Result<Vec<LatLng>, ProviderError> {
        let geometry = OsrmClient::fetch_route_geometry(self, points).await?;

        Ok(geometry.into_iter().map(LatLng::from).collect())
    }
}
