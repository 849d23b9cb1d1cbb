//! `/api/chronobiology` endpoints.

use medportal_domain::ApiRequest;
use serde_json::Value;

/// Daily rhythm plan.
pub fn get_plan() -> ApiRequest {
    ApiRequest::get("/api/chronobiology/plan")
}

/// Updates a planned action.
pub fn update_action(payload: Value) -> ApiRequest {
    ApiRequest::post("/api/chronobiology/update").json(payload)
}

/// Records a sleep entry.
pub fn record_sleep(payload: Value) -> ApiRequest {
    ApiRequest::post("/api/chronobiology/record_sleep").json(payload)
}
