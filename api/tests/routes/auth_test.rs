#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn edu_routes_require_a_token() {
        let (app, _) = make_test_app().await;

        let (status, json) = send(&app, "GET", "/api/space/1/edu/classes/my", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], 401);
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let (app, _) = make_test_app().await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/space/1/edu/projects")
            .header("Authorization", "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler() {
        let (app, _) = make_test_app().await;

        let (status, json) = send(&app, "GET", "/api/space/1/edu/projects/my", Some(5), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["total"], 0);
        assert_eq!(json["data"]["page"], 1);
        assert_eq!(json["data"]["page_size"], 20);
    }
}
