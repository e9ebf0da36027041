use std::path::PathBuf;

use clap::Args;
use comfy_table::Table;
use jiff::SignedDuration;
use routeops_optimizer::{
    dispatch::{dispatch_params::DispatchParams, pipeline::dispatch},
    json::types::JsonSolveResponse,
    parsers::duration::parse_duration,
    solver::solver_params::Threads,
};
use routeops_providers::{
    route_geometry_client::{DEFAULT_MAX_TRACED_POINTS, RouteGeometryClient},
    travel_matrix_client::TravelMatrixClient,
};
use tracing::info;

use crate::request::{OsrmArgs, read_request};

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// The solve request, JSON
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Search budget (e.g., "5s", "500ms", "PT1M")
    #[arg(short, long, env = "ROUTEOPS_SOLVER_TIME_LIMIT", value_parser = parse_duration, default_value = "5s")]
    timeout: SignedDuration,

    /// Search threads, all cores when unset
    #[arg(long)]
    threads: Option<usize>,

    /// Makes the search reproducible
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, env = "ROUTEOPS_GEOMETRY_MAX_POINTS", default_value_t = DEFAULT_MAX_TRACED_POINTS)]
    geometry_max_points: usize,

    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    osrm: OsrmArgs,
}

impl SolveArgs {
    fn dispatch_params(&self) -> DispatchParams {
        let mut params = DispatchParams::default().with_time_limit(self.timeout);
        params.solver.seed = self.seed;
        params.solver.search_threads = match self.threads {
            Some(threads) => Threads::Multi(threads),
            None => Threads::Auto,
        };

        params
    }
}

pub async fn run(args: SolveArgs) -> anyhow::Result<()> {
    let request = read_request(&args.input)?;
    info!(
        "Solving {} stops with {} vehicles of capacity {}",
        request.stops.len(),
        request.vehicles,
        request.capacity
    );

    let matrix_client = TravelMatrixClient::new(args.osrm.client()?);
    let geometry_client =
        RouteGeometryClient::new(args.osrm.client()?).with_max_points(args.geometry_max_points);

    let response = dispatch(
        &request,
        &matrix_client,
        &geometry_client,
        &args.dispatch_params(),
    )
    .await?;

    eprintln!("{}", summary_table(&response));

    let json = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    Ok(())
}

pub fn summary_table(response: &JsonSolveResponse) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Route",
        "Vehicle",
        "Stops",
        "Load",
        "Distance (km)",
        "Time (min)",
        "Matrix",
    ]);

    for route in &response.routes {
        table.add_row(vec![
            route.route_id.to_string(),
            route.vehicle_id.to_string(),
            route.stop_ids.len().saturating_sub(1).to_string(),
            route.load.to_string(),
            route.distance_km.to_string(),
            route.time_min.to_string(),
            route.matrix_used.to_string(),
        ]);
    }

    table.add_row(vec![
        String::from("Total"),
        response.summary.routes.to_string(),
        response.summary.stops_served.to_string(),
        String::new(),
        response.summary.total_distance_km.to_string(),
        response.summary.total_time_min.to_string(),
        format!("{} unserved", response.unserved_stop_ids.len()),
    ]);

    table
}
