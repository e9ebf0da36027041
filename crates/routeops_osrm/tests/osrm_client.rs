use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::get};
use routeops_osrm::{OsrmClient, OsrmClientParams, OsrmError};
use serde_json::{Value, json};

struct LonLat(f64, f64);

impl From<&LonLat> for geo_types::Point {
    fn from(value: &LonLat) -> Self {
        geo_types::Point::new(value.0, value.1)
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{address}")
}

fn client(osrm_url: String) -> OsrmClient {
    OsrmClient::new(OsrmClientParams {
        osrm_url,
        connect_timeout: Duration::from_millis(500),
        read_timeout: Duration::from_secs(1),
        ..OsrmClientParams::default()
    })
    .unwrap()
}

fn points() -> Vec<LonLat> {
    vec![LonLat(4.35, 50.85), LonLat(4.40, 50.90)]
}

#[tokio::test]
async fn fetches_table() {
    let router = Router::new().route(
        "/table/v1/driving/{coordinates}",
        get(|| async {
            Json(json!({
                "code": "Ok",
                "distances": [[0.0, 7012.9], [6999.1, 0.0]],
                "durations": [[0.0, 601.4], [598.7, 0.0]]
            }))
        }),
    );
    let url = serve(router).await;

    let matrices = client(url).fetch_matrix(&points()).await.unwrap();

    assert_eq!(matrices.num_locations, 2);
    assert_eq!(matrices.distances, vec![0.0, 7012.9, 6999.1, 0.0]);
    assert_eq!(matrices.times, vec![0.0, 601.4, 598.7, 0.0]);
}

#[tokio::test]
async fn table_with_error_code_fails() {
    let router = Router::new().route(
        "/table/v1/driving/{coordinates}",
        get(|| async { Json(json!({ "code": "NoTable", "message": "no table" })) }),
    );
    let url = serve(router).await;

    let result = client(url).fetch_matrix(&points()).await;

    assert!(matches!(result, Err(OsrmError::Code { .. })));
}

#[tokio::test]
async fn table_with_server_error_fails() {
    let router = Router::new().route(
        "/table/v1/driving/{coordinates}",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let url = serve(router).await;

    let result = client(url).fetch_matrix(&points()).await;

    assert!(matches!(result, Err(OsrmError::Api { status: 503, .. })));
}

#[tokio::test]
async fn table_with_malformed_body_fails() {
    let router = Router::new().route(
        "/table/v1/driving/{coordinates}",
        get(|| async { "not json" }),
    );
    let url = serve(router).await;

    let result = client(url).fetch_matrix(&points()).await;

    assert!(matches!(result, Err(OsrmError::Request(_))));
}

#[tokio::test]
async fn unreachable_server_fails() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let result = client(format!("http://{address}"))
        .fetch_matrix(&points())
        .await;

    assert!(matches!(result, Err(OsrmError::Request(_))));
}

#[tokio::test]
async fn fetches_route_geometry() {
    let router = Router::new().route(
        "/route/v1/driving/{coordinates}",
        get(|| async {
            let body: Value = json!({
                "code": "Ok",
                "routes": [{
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[4.35, 50.85], [4.37, 50.87], [4.40, 50.90]]
                    },
                    "distance": 7012.9,
                    "duration": 601.4
                }]
            });
            Json(body)
        }),
    );
    let url = serve(router).await;

    let geometry = client(url).fetch_route_geometry(&points()).await.unwrap();

    assert_eq!(geometry.len(), 3);
    assert_eq!(geometry[1].x(), 4.37);
    assert_eq!(geometry[1].y(), 50.87);
}

#[tokio::test]
async fn route_without_routes_is_empty() {
    let router = Router::new().route(
        "/route/v1/driving/{coordinates}",
        get(|| async { Json(json!({ "code": "Ok", "routes": [] })) }),
    );
    let url = serve(router).await;

    let geometry = client(url).fetch_route_geometry(&points()).await.unwrap();

    assert!(geometry.is_empty());
}
