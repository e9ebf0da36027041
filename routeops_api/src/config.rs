use std::{net::SocketAddr, time::Duration};

use axum::http::HeaderValue;
use jiff::SignedDuration;
use routeops_optimizer::{
    parsers::duration::parse_duration, solver::solver_params::DEFAULT_TIME_LIMIT,
};
use routeops_osrm::client::{DEFAULT_OSRM_PROFILE, DEFAULT_OSRM_URL};
use routeops_providers::route_geometry_client::DEFAULT_MAX_TRACED_POINTS;
use thiserror::Error;

pub const BIND_ADDRESS: &str = "ROUTEOPS_BIND_ADDRESS";
pub const OSRM_URL: &str = "ROUTEOPS_OSRM_URL";
pub const OSRM_PROFILE: &str = "ROUTEOPS_OSRM_PROFILE";
pub const CONNECT_TIMEOUT: &str = "ROUTEOPS_CONNECT_TIMEOUT";
pub const READ_TIMEOUT: &str = "ROUTEOPS_READ_TIMEOUT";
pub const SOLVER_TIME_LIMIT: &str = "ROUTEOPS_SOLVER_TIME_LIMIT";
pub const GEOMETRY_MAX_POINTS: &str = "ROUTEOPS_GEOMETRY_MAX_POINTS";
pub const CORS_ORIGINS: &str = "ROUTEOPS_CORS_ORIGINS";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {name}: {message}")]
    Invalid {
        name: &'static str,
        value: String,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,

    /// `None` disables live OSRM calls, every request uses the fallbacks.
    pub osrm_url: Option<String>,
    pub osrm_profile: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub solver_time_limit: SignedDuration,
    pub geometry_max_points: usize,
    pub cors_origins: Vec<HeaderValue>,
}

fn invalid(name: &'static str, value: &str, message: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_owned(),
        message: message.to_string(),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads every setting through `lookup`, unset variables take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_owned());

        let bind_address = read(BIND_ADDRESS, DEFAULT_BIND_ADDRESS);
        let bind_address = bind_address
            .parse::<SocketAddr>()
            .map_err(|error| invalid(BIND_ADDRESS, &bind_address, error))?;

        let osrm_url = read(OSRM_URL, DEFAULT_OSRM_URL);
        let osrm_url = Some(osrm_url.trim().to_owned()).filter(|url| !url.is_empty());

        let duration = |name: &'static str, default: SignedDuration| {
            match lookup(name) {
                None => Ok(default),
                Some(value) => parse_duration(&value).map_err(|error| invalid(name, &value, error)),
            }
        };

        let geometry_max_points = match lookup(GEOMETRY_MAX_POINTS) {
            None => DEFAULT_MAX_TRACED_POINTS,
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|error| invalid(GEOMETRY_MAX_POINTS, &value, error))?,
        };

        let cors_origins = read(CORS_ORIGINS, DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|error| invalid(CORS_ORIGINS, origin, error))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Config {
            bind_address,
            osrm_url,
            osrm_profile: read(OSRM_PROFILE, DEFAULT_OSRM_PROFILE),
            connect_timeout: duration(CONNECT_TIMEOUT, SignedDuration::from_secs(3))?
                .unsigned_abs(),
            read_timeout: duration(READ_TIMEOUT, SignedDuration::from_secs(7))?.unsigned_abs(),
            solver_time_limit: duration(SOLVER_TIME_LIMIT, DEFAULT_TIME_LIMIT)?,
            geometry_max_points,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = vars
            .iter()
            .map(|&(name, value)| (name.to_owned(), value.to_owned()))
            .collect::<HashMap<_, _>>();

        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.osrm_url.as_deref(), Some(DEFAULT_OSRM_URL));
        assert_eq!(config.osrm_profile, "driving");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.read_timeout, Duration::from_secs(7));
        assert_eq!(config.solver_time_limit, SignedDuration::from_secs(5));
        assert_eq!(config.geometry_max_points, 20);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            (BIND_ADDRESS, "0.0.0.0:9000"),
            (OSRM_URL, "http://localhost:5000"),
            (CONNECT_TIMEOUT, "500ms"),
            (SOLVER_TIME_LIMIT, "2"),
            (GEOMETRY_MAX_POINTS, "50"),
            (CORS_ORIGINS, "https://ops.example.com"),
        ])
        .unwrap();

        assert_eq!(config.bind_address.port(), 9000);
        assert_eq!(config.osrm_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.connect_timeout, Duration::from_millis(500));
        assert_eq!(config.solver_time_limit, SignedDuration::from_secs(2));
        assert_eq!(config.geometry_max_points, 50);
        assert_eq!(
            config.cors_origins,
            vec![HeaderValue::from_static("https://ops.example.com")]
        );
    }

    #[test]
    fn test_empty_osrm_url_disables_live_calls() {
        assert_eq!(config(&[(OSRM_URL, "  ")]).unwrap().osrm_url, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[(SOLVER_TIME_LIMIT, "whenever")]),
            Err(ConfigError::Invalid {
                name: SOLVER_TIME_LIMIT,
                ..
            })
        ));
        assert!(matches!(
            config(&[(BIND_ADDRESS, "localhost")]),
            Err(ConfigError::Invalid {
                name: BIND_ADDRESS,
                ..
            })
        ));
        assert!(config(&[(GEOMETRY_MAX_POINTS, "-1")]).is_err());
    }
}
