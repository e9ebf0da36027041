use std::time::Duration;

use tracing::debug;

use crate::{
    error::OsrmError,
    response::{RouteResponse, TableResponse},
};

pub const OSRM_TABLE_API_PATH: &str = "/table/v1/";
pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/";

pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";
pub const DEFAULT_OSRM_PROFILE: &str = "driving";

/// Flat `n * n` matrices, indexed with `from * n + to`.
#[derive(Debug, Clone, PartialEq)]
pub struct OsrmMatrices {
    /// Distances in meters
    pub distances: Vec<f64>,

    /// Travel times in seconds
    pub times: Vec<f64>,

    pub num_locations: usize,
}

#[derive(Debug, Clone)]
pub struct OsrmClientParams {
    pub osrm_url: String,
    pub profile: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for OsrmClientParams {
    fn default() -> Self {
        Self {
            osrm_url: String::from(DEFAULT_OSRM_URL),
            profile: String::from(DEFAULT_OSRM_PROFILE),
            connect_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(7),
        }
    }
}

pub struct OsrmClient {
    params: OsrmClientParams,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(params: OsrmClientParams) -> Result<Self, OsrmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(params.connect_timeout)
            .read_timeout(params.read_timeout)
            .timeout(params.connect_timeout + params.read_timeout)
            .build()
            .map_err(OsrmError::Client)?;

        Ok(Self { params, client })
    }

    pub fn params(&self) -> &OsrmClientParams {
        &self.params
    }

    fn service_url<P>(&self, path: &str, points: &[P]) -> String
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let mut url = self.params.osrm_url.trim_end_matches('/').to_owned();
        url.push_str(path);
        url.push_str(&self.params.profile);
        url.push('/');

        for (i, point) in points.iter().enumerate() {
            let point: geo_types::Point = point.into();
            url.push_str(&format!("{},{}", point.x(), point.y()));

            if i < points.len() - 1 {
                url.push(';');
            }
        }

        url
    }

    async fn get_json<T>(&self, url: String, query: &[(&str, &str)]) -> Result<T, OsrmError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OsrmError::Api { status, message });
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetches the distance and duration matrices between all `points`.
    /// Every pair must be routable, a `null` entry is reported as an error.
    pub async fn fetch_matrix<P>(&self, points: &[P]) -> Result<OsrmMatrices, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let url = self.service_url(OSRM_TABLE_API_PATH, points);
        debug!("OSRM: requesting table for {} points", points.len());

        let table: TableResponse = self
            .get_json(url, &[("annotations", "distance,duration")])
            .await?;

        if !table.is_ok() {
            return Err(OsrmError::Code {
                code: table.code,
                message: table.message.unwrap_or_default(),
            });
        }

        let distances = table.distances.ok_or(OsrmError::IncompleteResponse)?;
        let durations = table.durations.ok_or(OsrmError::IncompleteResponse)?;

        let num_locations = points.len();
        Ok(OsrmMatrices {
            distances: flatten_matrix(distances, num_locations)?,
            times: flatten_matrix(durations, num_locations)?,
            num_locations,
        })
    }

    /// Fetches a road-following polyline through `points`, in order.
    /// An empty vector means OSRM answered without a route.
    pub async fn fetch_route_geometry<P>(
        &self,
        points: &[P],
    ) -> Result<Vec<geo_types::Point>, OsrmError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let url = self.service_url(OSRM_ROUTE_API_PATH, points);
        debug!("OSRM: requesting route through {} points", points.len());

        let route: RouteResponse = self
            .get_json(url, &[("overview", "full"), ("geometries", "geojson")])
            .await?;

        if !route.is_ok() {
            return Err(OsrmError::Code {
                code: route.code,
                message: route.message.unwrap_or_default(),
            });
        }

        let points = route
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.geometry)
            .map(|line| {
                line.coordinates
                    .into_iter()
                    .map(|[lon, lat]| geo_types::Point::new(lon, lat))
                    .collect()
            })
            .unwrap_or_default();

        Ok(points)
    }
}

fn flatten_matrix(
    rows: Vec<Vec<Option<f64>>>,
    num_locations: usize,
) -> Result<Vec<f64>, OsrmError> {
    if rows.len() != num_locations || rows.iter().any(|row| row.len() != num_locations) {
        return Err(OsrmError::Dimensions {
            expected: num_locations,
        });
    }

    let mut flat = Vec::with_capacity(num_locations * num_locations);
    for (from, row) in rows.into_iter().enumerate() {
        for (to, value) in row.into_iter().enumerate() {
            let value = value.ok_or(OsrmError::Unreachable { from, to })?;
            if !value.is_finite() || value < 0.0 {
                return Err(OsrmError::InvalidValue { from, to, value });
            }
            flat.push(value);
        }
    }

    Ok(flat)
}
