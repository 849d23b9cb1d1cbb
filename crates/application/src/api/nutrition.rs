//! `/api/nutrition` endpoints.

use medportal_domain::ApiRequest;
use serde_json::Value;

/// Current nutrition plan.
pub fn get_plan() -> ApiRequest {
    ApiRequest::get("/api/nutrition/plan")
}

/// Records a meal.
pub fn record_meal(payload: Value) -> ApiRequest {
    ApiRequest::post("/api/nutrition/record_meal").json(payload)
}

/// Replaces plan settings.
pub fn update_plan(payload: Value) -> ApiRequest {
    ApiRequest::post("/api/nutrition/update_plan").json(payload)
}

/// Food recommendations.
pub fn get_recommendations() -> ApiRequest {
    ApiRequest::get("/api/nutrition/recommendations")
}
