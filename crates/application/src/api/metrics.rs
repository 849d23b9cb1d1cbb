//! `/api/metrics` endpoints.

use medportal_domain::ApiRequest;
use serde_json::Value;

/// Health dashboard data.
pub fn get_dashboard() -> ApiRequest {
    ApiRequest::get("/api/metrics/dashboard")
}

/// Monitoring records with statistics.
pub fn get_list(params: &Value) -> ApiRequest {
    ApiRequest::get("/api/metrics/metrics/list").query_object(params)
}

/// Submits new measurements.
pub fn submit(payload: Value) -> ApiRequest {
    ApiRequest::post("/api/metrics/submit").json(payload)
}
