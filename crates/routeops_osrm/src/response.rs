//! Deserialization types for the OSRM `table` and `route` services.
//!
//! See <http://project-osrm.org/docs/v5.24.0/api/#table-service> and
//! <http://project-osrm.org/docs/v5.24.0/api/#route-service>.

use serde::Deserialize;

pub const OSRM_CODE_OK: &str = "Ok";

/// `table` response. Entries are `null` when OSRM found no route for a pair.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    pub code: String,
    pub message: Option<String>,

    /// Distances in meters
    pub distances: Option<Vec<Vec<Option<f64>>>>,

    /// Travel times in seconds
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    pub fn is_ok(&self) -> bool {
        self.code == OSRM_CODE_OK
    }
}

#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteResponse {
    pub fn is_ok(&self) -> bool {
        self.code == OSRM_CODE_OK
    }
}

#[derive(Debug, Deserialize)]
pub struct RouteEntry {
    pub geometry: Option<GeoJsonLineString>,
}

/// Returned when the request asks for `geometries=geojson`.
/// Coordinates are `[lon, lat]` pairs.
#[derive(Debug, Deserialize)]
pub struct GeoJsonLineString {
    pub coordinates: Vec<[f64; 2]>,
}
