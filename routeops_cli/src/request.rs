use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use clap::Args;
use jiff::SignedDuration;
use routeops_optimizer::{json::types::JsonSolveRequest, parsers::duration::parse_duration};
use routeops_osrm::{
    OsrmClient, OsrmClientParams, OsrmError,
    client::{DEFAULT_OSRM_PROFILE, DEFAULT_OSRM_URL},
};

#[derive(Args, Debug)]
pub struct OsrmArgs {
    /// Base URL of an OSRM compatible service
    #[arg(long, env = "ROUTEOPS_OSRM_URL", default_value = DEFAULT_OSRM_URL)]
    osrm_url: String,

    #[arg(long, env = "ROUTEOPS_OSRM_PROFILE", default_value = DEFAULT_OSRM_PROFILE)]
    profile: String,

    #[arg(long, env = "ROUTEOPS_CONNECT_TIMEOUT", value_parser = parse_duration, default_value = "3s")]
    connect_timeout: SignedDuration,

    #[arg(long, env = "ROUTEOPS_READ_TIMEOUT", value_parser = parse_duration, default_value = "7s")]
    read_timeout: SignedDuration,

    /// Never call OSRM, use haversine matrices and straight-line geometry
    #[arg(long)]
    offline: bool,
}

impl OsrmArgs {
    pub fn client(&self) -> Result<Option<OsrmClient>, OsrmError> {
        if self.offline || self.osrm_url.trim().is_empty() {
            return Ok(None);
        }

        OsrmClient::new(OsrmClientParams {
            osrm_url: self.osrm_url.trim().to_owned(),
            profile: self.profile.clone(),
            connect_timeout: self.connect_timeout.unsigned_abs(),
            read_timeout: self.read_timeout.unsigned_abs(),
        })
        .map(Some)
    }
}

pub fn read_request(path: &Path) -> anyhow::Result<JsonSolveRequest> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a valid solve request", path.display()))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_read_request_fixture() {
        let path = env::current_dir()
            .unwrap()
            .join("tests/fixtures/brussels.json");

        let request = read_request(&path).unwrap();

        assert_eq!(request.depot_id, "depot");
        assert_eq!(request.stops.len(), 6);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_read_request_missing_file() {
        let error = read_request(Path::new("tests/fixtures/missing.json")).unwrap_err();

        assert!(error.to_string().contains("missing.json"));
    }
}
