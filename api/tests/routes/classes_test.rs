#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send};
    use axum::{Router, http::StatusCode};
    use serde_json::{Value, json};

    const TEACHER: i64 = 1;
    const STUDENT: i64 = 2;
    const LATECOMER: i64 = 3;

    async fn create_class(app: &Router, code: &str) -> Value {
        let (status, json) = send(
            app,
            "POST",
            "/api/space/1/edu/classes",
            Some(TEACHER),
            Some(json!({
                "name": "Intro to Bots",
                "code": code,
                "semester": "2025 spring",
                "start_date": "2025-02-17",
                "end_date": "2025-06-30"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        json["data"].clone()
    }

    #[tokio::test]
    async fn invite_code_with_one_use_admits_exactly_one_student() {
        let (app, _) = make_test_app().await;
        let class = create_class(&app, "BOT101").await;
        let class_id = class["id"].as_i64().unwrap();
        assert_eq!(class["start_date"], "2025-02-17");
        assert_eq!(class["status"], "active");

        let (status, json) = send(
            &app,
            "POST",
            &format!("/api/space/1/edu/classes/{class_id}/invite-codes"),
            Some(TEACHER),
            Some(json!({ "max_uses": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["role"], "student");
        let code = json["data"]["code"].as_str().unwrap().to_string();
        assert_eq!(code.len(), 32);

        let (status, json) = send(
            &app,
            "POST",
            "/api/space/1/edu/classes/join",
            Some(STUDENT),
            Some(json!({ "code": code, "student_no": "2025001" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], class_id);

        let (status, json) = send(
            &app,
            "POST",
            "/api/space/1/edu/classes/join",
            Some(LATECOMER),
            Some(json!({ "code": code })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], 400);
        assert!(json["msg"].as_str().unwrap().contains("usage limit"));

        let (_, json) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/classes/{class_id}/invite-codes"),
            Some(TEACHER),
            None,
        )
        .await;
        assert_eq!(json["data"]["list"][0]["used_count"], 1);

        let (_, json) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/classes/{class_id}"),
            Some(TEACHER),
            None,
        )
        .await;
        assert_eq!(json["data"]["member_count"], 2);
        assert_eq!(json["data"]["student_count"], 1);
    }

    #[tokio::test]
    async fn class_codes_are_validated_and_unique() {
        let (app, _) = make_test_app().await;
        create_class(&app, "BOT101").await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/space/1/edu/classes",
            Some(TEACHER),
            Some(json!({ "name": "Again", "code": "BOT101" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["msg"], "Class code already exists");

        let (status, _) = send(
            &app,
            "POST",
            "/api/space/1/edu/classes",
            Some(TEACHER),
            Some(json!({ "name": "Bad", "code": "has space" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(
            &app,
            "POST",
            "/api/space/1/edu/classes",
            Some(TEACHER),
            Some(json!({ "name": "Dates", "code": "DATE1", "start_date": "17/02/2025" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["msg"], "start_date must be YYYY-MM-DD");
    }

    #[tokio::test]
    async fn bulk_add_reports_existing_members() {
        let (app, _) = make_test_app().await;
        let class_id = create_class(&app, "BOT102").await["id"].as_i64().unwrap();
        let members_uri = format!("/api/space/1/edu/classes/{class_id}/members");

        let (status, json) = send(
            &app,
            "POST",
            &members_uri,
            Some(TEACHER),
            Some(json!({ "members": [ { "user_id": STUDENT } ] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["success"], 1);

        let (_, json) = send(
            &app,
            "POST",
            &members_uri,
            Some(TEACHER),
            Some(json!({ "members": [
                { "user_id": STUDENT },
                { "user_id": 4, "student_no": "2025004" },
                { "user_id": 5, "role": "assistant" }
            ] })),
        )
        .await;
        assert_eq!(json["data"]["success"], 2);
        assert_eq!(json["data"]["failed"], 1);
        assert_eq!(json["data"]["failed_users"], json!([STUDENT]));

        let (status, _) = send(
            &app,
            "POST",
            &members_uri,
            Some(TEACHER),
            Some(json!({ "members": [ { "user_id": 9, "role": "teacher" } ] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, json) = send(
            &app,
            "GET",
            &format!("{members_uri}?role=student"),
            Some(TEACHER),
            None,
        )
        .await;
        assert_eq!(json["data"]["total"], 2);

        // Assistants are staff and may manage the roster.
        let (status, _) = send(&app, "GET", &members_uri, Some(5), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(&app, "GET", &members_uri, Some(STUDENT), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["code"], 403);
    }

    #[tokio::test]
    async fn removing_members_spares_the_teacher() {
        let (app, _) = make_test_app().await;
        let class_id = create_class(&app, "BOT103").await["id"].as_i64().unwrap();
        send(
            &app,
            "POST",
            &format!("/api/space/1/edu/classes/{class_id}/members"),
            Some(TEACHER),
            Some(json!({ "members": [ { "user_id": STUDENT } ] })),
        )
        .await;

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/space/1/edu/classes/{class_id}/members/{TEACHER}"),
            Some(TEACHER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let uri = format!("/api/space/1/edu/classes/{class_id}/members/{STUDENT}");
        let (status, _) = send(&app, "DELETE", &uri, Some(TEACHER), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, json) = send(&app, "DELETE", &uri, Some(TEACHER), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["msg"], "Member not found");
    }

    #[tokio::test]
    async fn only_the_teacher_edits_and_deleted_is_not_a_status() {
        let (app, _) = make_test_app().await;
        let class_id = create_class(&app, "BOT104").await["id"].as_i64().unwrap();
        let uri = format!("/api/space/1/edu/classes/{class_id}");

        let (status, json) = send(
            &app,
            "PUT",
            &uri,
            Some(TEACHER),
            Some(json!({ "name": "Advanced Bots", "status": "archived" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Advanced Bots");
        assert_eq!(json["data"]["status"], "archived");
        assert_eq!(json["data"]["semester"], "2025 spring");

        let (status, _) = send(&app, "PUT", &uri, Some(TEACHER), Some(json!({ "status": "deleted" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "PUT", &uri, Some(STUDENT), Some(json!({ "name": "Mine" }))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn student_views_only_their_own_classes() {
        let (app, _) = make_test_app().await;
        let class_id = create_class(&app, "BOT105").await["id"].as_i64().unwrap();
        send(
            &app,
            "POST",
            &format!("/api/space/1/edu/classes/{class_id}/members"),
            Some(TEACHER),
            Some(json!({ "members": [ { "user_id": STUDENT, "student_no": "S1" } ] })),
        )
        .await;

        let (_, json) = send(&app, "GET", "/api/space/1/edu/student/classes", Some(STUDENT), None).await;
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["list"][0]["code"], "BOT105");

        let detail_uri = format!("/api/space/1/edu/student/classes/{class_id}");
        let (status, json) = send(&app, "GET", &detail_uri, Some(STUDENT), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["my_role"], "student");
        assert_eq!(json["data"]["members"].as_array().unwrap().len(), 2);

        let (status, _) = send(&app, "GET", &detail_uri, Some(LATECOMER), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/space/2/edu/student/classes/{class_id}"),
            Some(STUDENT),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/api/space/1/edu/student/classes/999", Some(STUDENT), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn class_routes_stay_inside_their_space() {
        let (app, _) = make_test_app().await;
        let class_id = create_class(&app, "SPACE1").await["id"].as_i64().unwrap();
        let foreign = format!("/api/space/2/edu/classes/{class_id}");

        let (status, json) = send(&app, "GET", &foreign, Some(TEACHER), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["msg"], "Class not found");

        let (status, _) = send(&app, "PUT", &foreign, Some(TEACHER), Some(json!({ "name": "Hijacked" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            &format!("{foreign}/members"),
            Some(TEACHER),
            Some(json!({ "members": [ { "user_id": STUDENT } ] })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", &format!("{foreign}/invite-codes"), Some(TEACHER), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = send(
            &app,
            "POST",
            &format!("{foreign}/assignments"),
            Some(TEACHER),
            Some(json!({ "assignment_type": "bot", "source_id": 1, "title": "Elsewhere" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{json}");

        // The class is untouched and still reachable from its own space.
        let (status, json) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/classes/{class_id}"),
            Some(TEACHER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Intro to Bots");
        assert_eq!(json["data"]["member_count"], 1);
    }
}
