//! `/api/article` endpoints.

use medportal_domain::ApiRequest;
use serde_json::Value;

/// Recommended articles.
pub fn recommended() -> ApiRequest {
    ApiRequest::get("/api/article/recommended")
}

/// One article by id. The id is percent-encoded as a single path segment.
pub fn detail(article_id: impl std::fmt::Display) -> ApiRequest {
    ApiRequest::get(format!(
        "/api/article/detail/{}",
        super::path_segment(&article_id.to_string())
    ))
}

/// Records that an article was read.
pub fn record_view(payload: Value) -> ApiRequest {
    ApiRequest::post("/api/article/view").json(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detail_embeds_id_in_path() {
        assert_eq!(detail(42).path, "/api/article/detail/42");
    }

    #[test]
    fn detail_keeps_id_in_one_segment() {
        assert_eq!(
            detail("a/../b?x=1").path,
            "/api/article/detail/a%2F..%2Fb%3Fx%3D1"
        );
        assert_eq!(detail("a b+c").path, "/api/article/detail/a%20b%2Bc");
    }

    #[test]
    fn dot_ids_do_not_validate() {
        assert!(detail("..").validate().is_err());
        assert!(detail(".").validate().is_err());
    }
}
