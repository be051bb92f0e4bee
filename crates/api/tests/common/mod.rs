#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use rockfall_api::config::ServerConfig;
use rockfall_api::loader::build_state;
use rockfall_api::router::build_app_router;

/// Build a test `ServerConfig` with safe defaults pointing at `data_dir`.
///
/// Uses `http://localhost:8080` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.to_path_buf(),
        site_catalog_path: None,
        prediction_jitter: false,
    }
}

/// Build the full application router over the given data directory.
///
/// Goes through the same loader and middleware stack as `main.rs`.
pub fn build_test_app(data_dir: &Path) -> Router {
    let config = test_config(data_dir);
    let state = build_state(config.clone()).expect("state should build");
    build_app_router(state, &config)
}

/// One source line with every field present.
pub fn reading_line(
    timestamp: &str,
    ppv: f64,
    pwp: f64,
    rain: f64,
    thermal: f64,
    risk: &str,
) -> String {
    format!(
        "{{\"Timestamp\":\"{timestamp}\",\"Unit_Weight_kN_m3\":21.0,\"Cohesion_kPa\":26.0,\
         \"Friction_deg\":31.0,\"Slope_Angle_deg\":38.0,\"Slope_Height_m\":27.0,\
         \"Rain_3d_mm\":{rain},\"ThermalStressIndex\":{thermal},\"PPV_mm_s\":{ppv},\
         \"PWP_Total\":{pwp},\"risk_category\":\"{risk}\"}}"
    )
}

/// Write `part_<ordinal>.json` with the given lines.
pub fn write_source(dir: &Path, ordinal: u32, lines: &[String]) {
    fs::write(dir.join(format!("part_{ordinal}.json")), lines.join("\n")).unwrap();
}

/// A data directory with three sites:
///
/// - `mine-001`: 30 readings, 18 Low + 12 High, latest reading scores Critical.
/// - `mine-002`: 5 readings, all Critical, latest reading scores Moderate.
/// - `mine-003`: empty source.
pub fn seeded_data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();

    let mut site1: Vec<String> = (0..30)
        .map(|i| {
            let risk = if i < 18 { "Low" } else { "High" };
            reading_line(&format!("2024-01-01T{:02}:00:00", i % 24), 2.0, 0.1, 2.0, 0.1, risk)
        })
        .collect();
    site1.push(reading_line("2024-01-02T06:00:00", 20.0, 0.8, 35.0, 0.9, "High"));
    site1.insert(3, "{broken".to_string());
    write_source(dir.path(), 1, &site1);

    let site2: Vec<String> = (0..5)
        .map(|i| reading_line(&format!("2024-02-01T0{i}:00:00"), 6.0, 0.4, 12.0, 0.4, "Critical"))
        .collect();
    write_source(dir.path(), 2, &site2);

    write_source(dir.path(), 3, &[]);

    dir
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
