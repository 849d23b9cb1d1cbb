//! Request builders for the portal backend.
//!
//! Each function returns an `ApiRequest`; send it through `Portal::send` or
//! `ApiClient::send`. Feature payloads are free-form JSON.

pub mod articles;
pub mod auth;
pub mod chronobiology;
pub mod metrics;
pub mod nutrition;
pub mod risk;
pub mod workout;

pub use auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
};

/// Percent-encodes `raw` for use as one path segment.
fn path_segment(raw: &str) -> String {
    // form_urlencoded writes spaces as `+` and escapes a literal `+` as `%2B`.
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
