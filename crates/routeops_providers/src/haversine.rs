use geo::{Distance, HaversineMeasure};

use crate::travel_matrices::{Meters, Seconds, TravelMatrices};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub const DEFAULT_FALLBACK_SPEED_KMH: f64 = 40.0;

/// Great-circle distance in kilometers.
pub fn haversine_km<P>(from: P, to: P) -> f64
where
    P: Into<geo_types::Point>,
{
    let from: geo_types::Point = from.into();
    let to: geo_types::Point = to.into();
    let haversine = HaversineMeasure::new(EARTH_RADIUS_METERS);

    haversine.distance(from, to) / 1000.0
}

/// Travel time in whole seconds for `meters` at a constant `speed_kmh`.
pub fn duration_at_speed(meters: Meters, speed_kmh: f64) -> Seconds {
    ((meters as f64 / 1000.0) / speed_kmh * 3600.0) as Seconds
}

/// Symmetric matrices from great-circle distances, truncated to whole meters.
pub fn as_the_crow_flies_matrices<P>(points: &[P], speed_kmh: f64) -> TravelMatrices
where
    for<'a> &'a P: Into<geo_types::Point>,
{
    let num_points = points.len();
    let mut distances: Vec<Meters> = vec![0; num_points * num_points];
    let mut times: Vec<Seconds> = vec![0; num_points * num_points];

    for (i, from) in points.iter().enumerate() {
        // Computed once per pair and mirrored so the result is exactly symmetric
        for (j, to) in points.iter().enumerate().skip(i + 1) {
            let meters = (haversine_km(from, to) * 1000.0) as Meters;
            let seconds = duration_at_speed(meters, speed_kmh);

            distances[i * num_points + j] = meters;
            distances[j * num_points + i] = meters;
            times[i * num_points + j] = seconds;
            times[j * num_points + i] = seconds;
        }
    }

    TravelMatrices::square(distances, times, num_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lat_lng::LatLng;

    #[test]
    fn test_haversine_same_point_is_zero() {
        let point = LatLng::new(50.8503, 4.3517);

        assert_eq!(haversine_km(&point, &point), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        let brussels = LatLng::new(50.8503, 4.3517);
        let paris = LatLng::new(48.8566, 2.3522);

        let distance = haversine_km(&brussels, &paris);

        assert!((distance - 263.975).abs() < 0.01, "got {distance}");
        assert_eq!(distance, haversine_km(&paris, &brussels));
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(1.0, 0.0);

        let expected = EARTH_RADIUS_METERS / 1000.0 * std::f64::consts::PI / 180.0;

        assert!((haversine_km(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_duration_at_speed() {
        // 40 km at 40 km/h is one hour
        assert_eq!(duration_at_speed(40_000, 40.0), 3600);
        // 1 m at 40 km/h is 0.09 s, truncated
        assert_eq!(duration_at_speed(1, 40.0), 0);
        assert_eq!(duration_at_speed(1001, 40.0), 90);
    }

    #[test]
    fn test_matrices_are_symmetric_with_zero_diagonal() {
        let points = vec![
            LatLng::new(50.8503, 4.3517),
            LatLng::new(50.8798, 4.7005),
            LatLng::new(51.2194, 4.4025),
            LatLng::new(51.0543, 3.7174),
        ];

        let matrices = as_the_crow_flies_matrices(&points, DEFAULT_FALLBACK_SPEED_KMH);

        for i in 0..points.len() {
            assert_eq!(matrices.distance(i, i), 0);
            assert_eq!(matrices.time(i, i), 0);
            for j in 0..points.len() {
                assert_eq!(matrices.distance(i, j), matrices.distance(j, i));
                assert_eq!(
                    matrices.time(i, j),
                    duration_at_speed(matrices.distance(i, j), DEFAULT_FALLBACK_SPEED_KMH)
                );
            }
        }
    }

    #[test]
    fn test_matrices_truncate_meters() {
        let points = vec![LatLng::new(50.8503, 4.3517), LatLng::new(51.2194, 4.4025)];

        let matrices = as_the_crow_flies_matrices(&points, DEFAULT_FALLBACK_SPEED_KMH);

        let exact = haversine_km(&points[0], &points[1]) * 1000.0;
        assert_eq!(matrices.distance(0, 1), exact.floor() as i64);
    }
}
