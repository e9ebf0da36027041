use tracing::{debug, instrument, warn};

use crate::{
    haversine::{DEFAULT_FALLBACK_SPEED_KMH, as_the_crow_flies_matrices},
    lat_lng::LatLng,
    matrix_service::MatrixService,
    matrix_source::MatrixSource,
    travel_matrices::TravelMatrices,
};

/// Prefers the live matrix service and falls back to great-circle matrices
/// whenever the service is missing or fails.
pub struct TravelMatrixClient<S> {
    service: Option<S>,
    fallback_speed_kmh: f64,
}

impl<S> TravelMatrixClient<S>
where
    S: MatrixService + Sync,
{
    pub fn new(service: Option<S>) -> Self {
        Self {
            service,
            fallback_speed_kmh: DEFAULT_FALLBACK_SPEED_KMH,
        }
    }

    pub fn with_fallback_speed(mut self, speed_kmh: f64) -> Self {
        self.fallback_speed_kmh = speed_kmh;
        self
    }

    pub fn service(&self) -> Option<&S> {
        self.service.as_ref()
    }

    /// Never fails, the returned source tells which method built the matrices.
    #[instrument(skip_all, fields(points = points.len()))]
    pub async fn fetch_matrix(&self, points: &[LatLng]) -> (TravelMatrices, MatrixSource) {
        if let Some(service) = &self.service
            && points.len() >= 2
        {
            match service.fetch_matrix(points).await {
                Ok(matrices) if matrices.num_locations() == points.len() => {
                    debug!("Using live travel matrices");
                    return (matrices, MatrixSource::Osrm);
                }
                Ok(matrices) => warn!(
                    "Matrix service returned {} locations instead of {}, falling back to haversine",
                    matrices.num_locations(),
                    points.len()
                ),
                Err(error) => warn!("Matrix service unavailable, falling back to haversine: {error}"),
            }
        }

        (
            as_the_crow_flies_matrices(points, self.fallback_speed_kmh),
            MatrixSource::Haversine,
        )
    }
}
