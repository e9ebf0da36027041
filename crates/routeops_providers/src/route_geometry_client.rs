use tracing::{debug, instrument, warn};

use crate::{geometry_service::GeometryService, lat_lng::LatLng};

/// Public routing services get slow with many via points.
pub const DEFAULT_MAX_TRACED_POINTS: usize = 20;

/// Traces road-following display geometry for a route. Geometry is cosmetic,
/// every failure degrades to the straight-line waypoints.
pub struct RouteGeometryClient<S> {
    service: Option<S>,
    max_points: usize,
}

impl<S> RouteGeometryClient<S>
where
    S: GeometryService + Sync,
{
    pub fn new(service: Option<S>) -> Self {
        Self {
            service,
            max_points: DEFAULT_MAX_TRACED_POINTS,
        }
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    #[instrument(skip_all, fields(points = waypoints.len()))]
    pub async fn trace(&self, waypoints: &[LatLng]) -> Vec<LatLng> {
        if waypoints.len() < 2 {
            return waypoints.to_vec();
        }

        if waypoints.len() > self.max_points {
            debug!(
                "Skipping geometry for {} points, more than {}",
                waypoints.len(),
                self.max_points
            );
            return waypoints.to_vec();
        }

        let Some(service) = &self.service else {
            return waypoints.to_vec();
        };

        match service.fetch_route_geometry(waypoints).await {
            Ok(geometry) if !geometry.is_empty() => geometry,
            Ok(_) => {
                debug!("Geometry service returned an empty route");
                waypoints.to_vec()
            }
            Err(error) => {
                warn!("Geometry service unavailable, using straight lines: {error}");
                waypoints.to_vec()
            }
        }
    }
}
