use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A WGS84 coordinate, always latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

impl From<&LatLng> for geo_types::Point {
    fn from(value: &LatLng) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

impl From<geo_types::Point> for LatLng {
    fn from(point: geo_types::Point) -> Self {
        LatLng {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_conversion_swaps_axes() {
        let lat_lng = LatLng::new(50.85, 4.35);
        let point: geo_types::Point = (&lat_lng).into();

        assert_eq!(point.x(), 4.35);
        assert_eq!(point.y(), 50.85);
        assert_eq!(LatLng::from(point), lat_lng);
    }
}
