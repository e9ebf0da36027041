use fxhash::FxHashSet;
use routeops_providers::lat_lng::LatLng;
use thiserror::Error;

use crate::{json::types::JsonSolveRequest, problem::stop::Stop};

#[derive(Debug, Error, PartialEq)]
pub enum RequestValidationError {
    #[error("At least one stop is required")]
    NoStops,

    #[error("At least one vehicle is required")]
    NoVehicles,

    #[error("Duplicate stop id '{0}'")]
    DuplicateStopId(String),

    #[error("Stop '{id}' has invalid coordinates (lat {lat}, lng {lng})")]
    InvalidCoordinates { id: String, lat: f64, lng: f64 },

    #[error("Depot '{0}' is not one of the stops")]
    UnknownDepot(String),
}

fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}

impl JsonSolveRequest {
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        if self.stops.is_empty() {
            return Err(RequestValidationError::NoStops);
        }

        if self.vehicles == 0 {
            return Err(RequestValidationError::NoVehicles);
        }

        let mut ids = FxHashSet::default();
        for stop in &self.stops {
            if !ids.insert(stop.id.as_str()) {
                return Err(RequestValidationError::DuplicateStopId(stop.id.clone()));
            }

            if !is_valid_coordinate(stop.lat, stop.lng) {
                return Err(RequestValidationError::InvalidCoordinates {
                    id: stop.id.clone(),
                    lat: stop.lat,
                    lng: stop.lng,
                });
            }
        }

        if !ids.contains(self.depot_id.as_str()) {
            return Err(RequestValidationError::UnknownDepot(self.depot_id.clone()));
        }

        Ok(())
    }

    /// Validated stops with the depot moved to index 0, the others keeping
    /// their relative order. The depot carries no demand.
    pub fn ordered_stops(&self) -> Result<Vec<Stop>, RequestValidationError> {
        self.validate()?;

        let depot_index = self
            .stops
            .iter()
            .position(|stop| stop.id == self.depot_id)
            .ok_or_else(|| RequestValidationError::UnknownDepot(self.depot_id.clone()))?;

        let depot = &self.stops[depot_index];
        let mut stops = Vec::with_capacity(self.stops.len());
        stops.push(Stop::new(
            depot.id.clone(),
            LatLng::new(depot.lat, depot.lng),
            0,
        ));

        stops.extend(
            self.stops
                .iter()
                .enumerate()
                .filter(|&(index, _)| index != depot_index)
                .map(|(_, stop)| {
                    Stop::new(stop.id.clone(), LatLng::new(stop.lat, stop.lng), stop.demand)
                }),
        );

        Ok(stops)
    }
}
