use routeops_providers::{lat_lng::LatLng, matrix_source::MatrixSource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::objective::Objective;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename = "SolveRequest", rename_all = "camelCase")]
pub struct JsonSolveRequest {
    /// Every stop, the depot included.
    pub stops: Vec<JsonStop>,

    /// Identifier of the stop every route starts and ends at.
    pub depot_id: String,

    /// Number of vehicles, all with the same capacity.
    pub vehicles: usize,
    pub capacity: u64,

    #[serde(default)]
    pub objective: Objective,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "Stop")]
pub struct JsonStop {
    pub id: String,
    pub lat: f64,
    pub lng: f64,

    #[serde(default)]
    pub demand: u64,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JsonSolveStatus {
    Ok,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "SolveResponse", rename_all = "camelCase")]
pub struct JsonSolveResponse {
    pub status: JsonSolveStatus,
    pub summary: JsonSummary,
    pub routes: Vec<JsonRoute>,
    pub unserved_stop_ids: Vec<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "Summary", rename_all = "camelCase")]
pub struct JsonSummary {
    pub total_distance_km: f64,
    pub total_time_min: f64,

    /// Number of emitted routes
    pub routes: usize,

    /// Distinct stop ids across all routes, depot included
    pub stops_served: usize,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename = "Route", rename_all = "camelCase")]
pub struct JsonRoute {
    pub route_id: usize,
    pub vehicle_id: usize,

    /// Starts with the depot, then the visited stops in order.
    pub stop_ids: Vec<String>,
    pub load: u64,
    pub distance_km: f64,
    pub time_min: f64,
    pub geometry: Vec<LatLng>,
    pub matrix_used: MatrixSource,
}

impl JsonSolveResponse {
    /// No routes, zero totals.
    pub fn empty(unserved_stop_ids: Vec<String>) -> Self {
        JsonSolveResponse {
            status: JsonSolveStatus::Ok,
            summary: JsonSummary {
                total_distance_km: 0.0,
                total_time_min: 0.0,
                routes: 0,
                stops_served: 0,
            },
            routes: Vec::new(),
            unserved_stop_ids,
        }
    }
}
