use routeops_providers::lat_lng::LatLng;

use crate::define_index_newtype;

define_index_newtype!(StopIdx, Stop);

/// A location to visit. Index 0 of a problem is always the depot.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    external_id: String,
    location: LatLng,
    demand: u64,
}

impl Stop {
    pub fn new(external_id: impl Into<String>, location: LatLng, demand: u64) -> Self {
        Stop {
            external_id: external_id.into(),
            location,
            demand,
        }
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn location(&self) -> LatLng {
        self.location
    }

    pub fn demand(&self) -> u64 {
        self.demand
    }
}
