//! `/api/workout` endpoints.

use medportal_domain::ApiRequest;
use serde_json::Value;

/// Current training plan.
pub fn get_plan() -> ApiRequest {
    ApiRequest::get("/api/workout/plan")
}

/// Lists sessions; `params` is an object of query filters.
pub fn get_sessions(params: &Value) -> ApiRequest {
    ApiRequest::get("/api/workout/sessions").query_object(params)
}

/// Marks a session as done.
pub fn complete_session(payload: Value) -> ApiRequest {
    ApiRequest::post("/api/workout/complete").json(payload)
}

/// Marks a session as skipped.
pub fn skip_session(payload: Value) -> ApiRequest {
    ApiRequest::post("/api/workout/skip").json(payload)
}
