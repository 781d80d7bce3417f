#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send};
    use axum::{Router, http::StatusCode};
    use serde_json::{Value, json};

    const TEACHER: i64 = 1;
    const STUDENT: i64 = 2;
    const OUTSIDER: i64 = 3;

    /// A class with one student and one assignment. Returns (class_id, assignment_id).
    async fn class_with_assignment(app: &Router) -> (i64, i64) {
        let (_, json) = send(
            app,
            "POST",
            "/api/space/1/edu/classes",
            Some(TEACHER),
            Some(json!({ "name": "Bots", "code": "BOTS1" })),
        )
        .await;
        let class_id = json["data"]["id"].as_i64().unwrap();

        send(
            app,
            "POST",
            &format!("/api/space/1/edu/classes/{class_id}/members"),
            Some(TEACHER),
            Some(json!({ "members": [ { "user_id": STUDENT } ] })),
        )
        .await;

        let (status, json) = send(
            app,
            "POST",
            &format!("/api/space/1/edu/classes/{class_id}/assignments"),
            Some(TEACHER),
            Some(json!({
                "assignment_type": "bot",
                "source_id": 1,
                "title": "First bot",
                "due_date": "2099-01-01T00:00:00Z"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        (class_id, json["data"]["id"].as_i64().unwrap())
    }

    fn rubric() -> Value {
        json!({
            "design": { "name": "Design", "score": 8, "max_score": 10, "weight": 0.6 },
            "code": { "name": "Code", "score": 9, "max_score": 10, "weight": 0.4 }
        })
    }

    #[tokio::test]
    async fn assignment_project_is_submitted_and_teacher_scored() {
        let (app, _) = make_test_app().await;
        let (class_id, assignment_id) = class_with_assignment(&app).await;
        let status_uri = format!("/api/space/1/edu/assignments/{assignment_id}/status");

        let (_, json) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/classes/{class_id}/assignments"),
            Some(STUDENT),
            None,
        )
        .await;
        assert_eq!(json["data"]["total"], 1);

        let (status, json) = send(&app, "GET", &status_uri, Some(STUDENT), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["project"].is_null());
        assert_eq!(json["data"]["is_submitted"], false);
        assert_eq!(json["data"]["is_overdue"], false);

        let (status, json) = send(
            &app,
            "POST",
            "/api/space/1/edu/projects",
            Some(STUDENT),
            Some(json!({ "project_type": "bot", "source_id": 1, "title": "Homework", "assignment_id": assignment_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["class_id"], class_id);
        let project_id = json["data"]["id"].as_i64().unwrap();

        let (status, json) = send(
            &app,
            "POST",
            &format!("/api/space/1/edu/projects/{project_id}/submit"),
            Some(STUDENT),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["submitted_at"].is_string());

        let (_, json) = send(&app, "GET", &status_uri, Some(STUDENT), None).await;
        assert_eq!(json["data"]["is_submitted"], true);
        assert_eq!(json["data"]["project"]["id"], project_id);

        let (status, json) = send(
            &app,
            "POST",
            "/api/space/1/edu/evaluations",
            Some(TEACHER),
            Some(json!({
                "project_id": project_id,
                "dimension_scores": rubric(),
                "feedback": "Well structured",
                "strengths": ["clear intents"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["data"]["evaluation_type"], "teacher");
        assert_eq!(json["data"]["user_id"], STUDENT);
        assert_eq!(json["data"]["evaluator_id"], TEACHER);
        assert_eq!(json["data"]["max_score"], 100.0);
        assert!((json["data"]["total_score"].as_f64().unwrap() - 84.0).abs() < 1e-9);

        // Staff can read the project; its teacher score reflects the evaluation.
        let (status, json) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/projects/{project_id}"),
            Some(TEACHER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!((json["data"]["teacher_score"].as_f64().unwrap() - 84.0).abs() < 1e-9);
        assert_eq!(json["data"]["teacher_comment"], "Well structured");
        assert_eq!(json["data"]["evaluations"].as_array().unwrap().len(), 1);

        // Neither the assignment nor the project is reachable through another space.
        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/space/2/edu/assignments/{assignment_id}/status"),
            Some(STUDENT),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, json) = send(
            &app,
            "GET",
            &format!("/api/space/2/edu/projects/{project_id}/evaluations"),
            Some(TEACHER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["msg"], "Project not found");
    }

    #[tokio::test]
    async fn evaluations_need_staff_and_a_usable_rubric() {
        let (app, _) = make_test_app().await;
        let (_, assignment_id) = class_with_assignment(&app).await;
        let (_, json) = send(
            &app,
            "POST",
            "/api/space/1/edu/projects",
            Some(STUDENT),
            Some(json!({ "project_type": "bot", "source_id": 1, "title": "Homework", "assignment_id": assignment_id })),
        )
        .await;
        let project_id = json["data"]["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "POST",
            "/api/space/1/edu/evaluations",
            Some(STUDENT),
            Some(json!({ "project_id": project_id, "dimension_scores": rubric() })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            "POST",
            "/api/space/1/edu/evaluations",
            Some(TEACHER),
            Some(json!({ "project_id": project_id, "dimension_scores": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(
            &app,
            "POST",
            "/api/space/1/edu/evaluations",
            Some(TEACHER),
            Some(json!({
                "project_id": project_id,
                "dimension_scores": { "x": { "name": "X", "score": 1, "max_score": 0, "weight": 1 } }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["msg"].as_str().unwrap().contains("max_score"));

        let (status, _) = send(
            &app,
            "POST",
            "/api/space/1/edu/evaluations",
            Some(TEACHER),
            Some(json!({ "project_id": 999, "dimension_scores": rubric() })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/assignments/{assignment_id}/status"),
            Some(OUTSIDER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
