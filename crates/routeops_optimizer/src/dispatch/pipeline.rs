use std::sync::Arc;

use futures::future::join_all;
use routeops_providers::{
    geometry_service::GeometryService, matrix_service::MatrixService,
    matrix_source::MatrixSource, route_geometry_client::RouteGeometryClient,
    travel_matrices::TravelMatrices, travel_matrix_client::TravelMatrixClient,
};
use tracing::{info, instrument, warn};

use crate::{
    dispatch::{
        aggregate::{aggregate, route_waypoints},
        dispatch_error::DispatchError,
        dispatch_params::DispatchParams,
    },
    json::{
        types::{JsonSolveRequest, JsonSolveResponse},
        validation::RequestValidationError,
    },
    problem::{
        stop::Stop,
        vehicle_routing_problem::{
            BuildProblemError, VehicleRoutingProblem, VehicleRoutingProblemBuilder,
        },
    },
    solver::{solver::Solver, solver_error::SolverError},
};

/// Ordered stops of a request with the travel matrices between them.
pub struct RequestMatrix {
    pub stops: Vec<Stop>,
    pub matrices: TravelMatrices,
    pub source: MatrixSource,
}

/// Validates the request and fetches its travel matrices, depot first.
pub async fn fetch_request_matrix<M>(
    request: &JsonSolveRequest,
    matrix_client: &TravelMatrixClient<M>,
) -> Result<RequestMatrix, RequestValidationError>
where
    M: MatrixService + Sync,
{
    let stops = request.ordered_stops()?;
    let points = stops.iter().map(Stop::location).collect::<Vec<_>>();
    let (matrices, source) = matrix_client.fetch_matrix(&points).await;

    Ok(RequestMatrix {
        stops,
        matrices,
        source,
    })
}

fn build_problem(
    request: &JsonSolveRequest,
    stops: Vec<Stop>,
    matrices: TravelMatrices,
) -> Result<VehicleRoutingProblem, BuildProblemError> {
    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .set_stops(stops)
        .set_travel_matrices(matrices)
        .set_objective(request.objective)
        .set_vehicles(request.vehicles)
        .set_capacity(request.capacity);

    builder.build()
}

/// Runs a solve request end to end: matrices, search, geometry and KPIs.
///
/// Provider outages fall back to haversine matrices and straight-line
/// geometry. A request nothing can be served for yields an empty `ok`
/// response rather than an error.
#[instrument(skip_all, fields(stops = request.stops.len(), vehicles = request.vehicles))]
pub async fn dispatch<M, G>(
    request: &JsonSolveRequest,
    matrix_client: &TravelMatrixClient<M>,
    geometry_client: &RouteGeometryClient<G>,
    params: &DispatchParams,
) -> Result<JsonSolveResponse, DispatchError>
where
    M: MatrixService + Sync,
    G: GeometryService + Sync,
{
    let stops = request.ordered_stops()?;

    if stops.len() <= 1 {
        info!("Only the depot was given, nothing to route");
        return Ok(JsonSolveResponse::empty(
            stops
                .iter()
                .map(|stop| stop.external_id().to_owned())
                .collect(),
        ));
    }

    let points = stops.iter().map(Stop::location).collect::<Vec<_>>();
    let (matrices, matrix_source) = matrix_client.fetch_matrix(&points).await;

    let problem = Arc::new(build_problem(request, stops, matrices)?);
    let solver = Solver::new(Arc::clone(&problem), params.solver.clone());

    let solution = match tokio::task::spawn_blocking(move || solver.solve()).await? {
        Ok(solution) => solution,
        Err(SolverError::NoSolution) => {
            warn!("No stop fits a vehicle, returning an empty plan");
            return Ok(JsonSolveResponse::empty(Vec::new()));
        }
        Err(error) => return Err(error.into()),
    };

    let geometries = join_all(solution.routes.iter().map(|route| {
        let waypoints = route_waypoints(&problem, route);
        async move { geometry_client.trace(&waypoints).await }
    }))
    .await;

    let response = aggregate(&problem, &solution, matrix_source, geometries);

    info!(
        routes = response.summary.routes,
        unserved = response.unserved_stop_ids.len(),
        distance_km = response.summary.total_distance_km,
        time_min = response.summary.total_time_min,
        iterations = solution.iterations,
        matrix = %matrix_source,
        "Dispatch done in {:?}",
        solution.elapsed
    );

    Ok(response)
}
