use routeops_optimizer::dispatch::dispatch_params::DispatchParams;
use routeops_osrm::{OsrmClient, OsrmClientParams, OsrmError};
use routeops_providers::{
    route_geometry_client::RouteGeometryClient, travel_matrix_client::TravelMatrixClient,
};

use crate::config::Config;

pub struct AppState {
    pub matrix_client: TravelMatrixClient<OsrmClient>,
    pub geometry_client: RouteGeometryClient<OsrmClient>,
    pub dispatch_params: DispatchParams,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, OsrmError> {
        let osrm_client = || -> Result<Option<OsrmClient>, OsrmError> {
            config
                .osrm_url
                .as_ref()
                .map(|osrm_url| {
                    OsrmClient::new(OsrmClientParams {
                        osrm_url: osrm_url.clone(),
                        profile: config.osrm_profile.clone(),
                        connect_timeout: config.connect_timeout,
                        read_timeout: config.read_timeout,
                    })
                })
                .transpose()
        };

        Ok(AppState {
            matrix_client: TravelMatrixClient::new(osrm_client()?),
            geometry_client: RouteGeometryClient::new(osrm_client()?)
                .with_max_points(config.geometry_max_points),
            dispatch_params: DispatchParams::default().with_time_limit(config.solver_time_limit),
        })
    }
}
