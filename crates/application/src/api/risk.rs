//! `/api/risk` endpoints.

use medportal_domain::ApiRequest;
use serde_json::Value;

/// Disease risk assessment; `params` become query filters.
pub fn get_assessment(params: &Value) -> ApiRequest {
    ApiRequest::get("/api/risk/assessment").query_object(params)
}
