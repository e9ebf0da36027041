use std::path::PathBuf;

use clap::Args;
use routeops_optimizer::dispatch::pipeline::fetch_request_matrix;
use routeops_providers::{
    matrix_source::MatrixSource,
    travel_matrices::{Meters, Seconds},
    travel_matrix_client::TravelMatrixClient,
};
use serde::Serialize;

use crate::request::{OsrmArgs, read_request};

#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// The solve request, JSON
    #[arg(short = 'i', long)]
    input: PathBuf,

    #[command(flatten)]
    osrm: OsrmArgs,
}

/// Rows and columns follow `stop_ids`, depot first.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatrixOutput {
    matrix_used: MatrixSource,
    stop_ids: Vec<String>,
    distances: Vec<Vec<Meters>>,
    times: Vec<Vec<Seconds>>,
}

pub async fn run(args: MatrixArgs) -> anyhow::Result<()> {
    let request = read_request(&args.input)?;
    let client = TravelMatrixClient::new(args.osrm.client()?);

    let matrix = fetch_request_matrix(&request, &client).await?;

    let output = MatrixOutput {
        matrix_used: matrix.source,
        stop_ids: matrix
            .stops
            .iter()
            .map(|stop| stop.external_id().to_owned())
            .collect(),
        distances: matrix.matrices.distance_rows(),
        times: matrix.matrices.time_rows(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
