/// HTTP endpoint for the presentation layer
///
/// Serves the pipeline's output as JSON. Requests are handled one at a time
/// on the calling thread; each one reads through the ingestion cache, so the
/// feeds are queried at most once per cache TTL no matter the request rate.
///
/// Endpoints:
/// - GET /health          - Service health check
/// - GET /snapshot        - Full cycle output
/// - GET /earthquakes     - Filtered record list
/// - GET /statistics      - Record table and chart aggregates
/// - GET /arrival/{index} - P/S arrival for one record of the full sequence

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::pipeline::Pipeline;

const AVAILABLE_ENDPOINTS: [&str; 5] = [
    "/health",
    "/snapshot",
    "/earthquakes",
    "/statistics",
    "/arrival/{index}",
];

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Health,
    Snapshot,
    Earthquakes,
    Statistics,
    Arrival(usize),
    NotFound,
}

/// Maps a request URL (path plus optional query string) to a route.
pub fn route(url: &str) -> Route {
    let path = url.split('?').next().unwrap_or(url).trim_end_matches('/');
    match path {
        "/health" => Route::Health,
        "/snapshot" => Route::Snapshot,
        "/earthquakes" => Route::Earthquakes,
        "/statistics" => Route::Statistics,
        _ => match path.strip_prefix("/arrival/").map(str::parse) {
            Some(Ok(index)) => Route::Arrival(index),
            _ => Route::NotFound,
        },
    }
}

/// Status code and JSON body for a route.
pub fn handle(pipeline: &mut Pipeline, route: Route, now: DateTime<Utc>) -> (u16, serde_json::Value) {
    match route {
        Route::Health => (
            200,
            serde_json::json!({
                "status": "ok",
                "service": "seismon_service",
                "version": env!("CARGO_PKG_VERSION")
            }),
        ),
        Route::Snapshot => to_json(&pipeline.run_cycle_at(now)),
        Route::Earthquakes => {
            let snapshot = pipeline.run_cycle_at(now);
            to_json(&serde_json::json!({
                "generated_at": snapshot.generated_at,
                "data_status": snapshot.data_status,
                "criteria": snapshot.criteria,
                "count": snapshot.filtered.len(),
                "earthquakes": snapshot.filtered,
            }))
        }
        Route::Statistics => to_json(&pipeline.run_cycle_at(now).statistics),
        Route::Arrival(index) => match pipeline.arrival_at(index, now) {
            Some(report) => to_json(&report),
            None => (
                404,
                serde_json::json!({
                    "error": "No earthquake at that index",
                    "index": index
                }),
            ),
        },
        Route::NotFound => (
            404,
            serde_json::json!({
                "error": "Not found",
                "available_endpoints": AVAILABLE_ENDPOINTS
            }),
        ),
    }
}

fn to_json<T: Serialize>(value: &T) -> (u16, serde_json::Value) {
    match serde_json::to_value(value) {
        Ok(json) => (200, json),
        Err(e) => (500, serde_json::json!({ "error": e.to_string() })),
    }
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port
pub fn start_endpoint_server(port: u16, pipeline: &mut Pipeline) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    for endpoint in AVAILABLE_ENDPOINTS {
        println!("   GET {}", endpoint);
    }
    println!();

    for request in server.incoming_requests() {
        let route = if *request.method() == tiny_http::Method::Get {
            route(request.url())
        } else {
            Route::NotFound
        };
        info!(url = request.url(), ?route, "request");

        let (status, json) = handle(pipeline, route, Utc::now());
        let response = create_response(status, &json);

        if let Err(e) = request.respond(response) {
            warn!(error = %e, "failed to send response");
        }
    }

    Ok(())
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: &serde_json::Value) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string());
    let response = tiny_http::Response::from_data(body.into_bytes())
        .with_status_code(tiny_http::StatusCode::from(status_code));

    match tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
