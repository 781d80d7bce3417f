#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn health_check_is_public() {
        let (app, _) = make_test_app().await;

        let (status, json) = send(&app, "GET", "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], "OK");
        assert_eq!(json["msg"], "Health check passed");
    }
}
