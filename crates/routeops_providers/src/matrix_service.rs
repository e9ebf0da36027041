use std::future::Future;

use routeops_osrm::OsrmClient;

use crate::{
    lat_lng::LatLng, provider_error::ProviderError, travel_matrices::TravelMatrices,
};

/// A live source of road-network travel matrices.
pub trait MatrixService {
    fn fetch_matrix(
        &self,
        points: &[LatLng],
    ) -> impl Future<Output = Result<TravelMatrices, ProviderError>> + Send;
}

impl MatrixService for OsrmClient {
    async fn fetch_matrix(&self, points: &[LatLng]) -> Result<TravelMatrices, ProviderError> {
        let matrices = OsrmClient::fetch_matrix(self, points).await?;

        TravelMatrices::from_real(
            &matrices.distances,
            &matrices.times,
            matrices.num_locations,
        )
    }
}
