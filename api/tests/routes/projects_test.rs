#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, send};
    use api::state::AppState;
    use axum::{Router, http::StatusCode};
    use db::models::script::{Model as Script, NewScript, ScriptStage, Visibility};
    use serde_json::{Value, json};

    const STUDENT: i64 = 2;
    const STRANGER: i64 = 3;

    async fn seed_script(state: &AppState) -> Script {
        let stages = ["concept understanding", "feature design", "bot development"]
            .iter()
            .enumerate()
            .map(|(i, name)| ScriptStage {
                order: i as i32 + 1,
                name: name.to_string(),
                description: format!("goal of {name}"),
                duration: 20,
                weight: 1.0 / 3.0,
                ..Default::default()
            })
            .collect();

        Script::create(
            state.db(),
            NewScript {
                space_id: 1,
                owner_id: 1,
                name: "Weather bot".into(),
                description: "Build a bot that reports the weather".into(),
                difficulty: 1,
                visibility: Some(Visibility::Team),
                objectives: vec!["understand intents".into()],
                stages,
            },
        )
        .await
        .unwrap()
    }

    async fn start_project(app: &Router, script_id: i64) -> Value {
        let (status, json) = send(
            app,
            "POST",
            "/api/space/1/edu/projects",
            Some(STUDENT),
            Some(json!({ "project_type": "script", "source_id": script_id, "title": "My weather bot" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        json["data"].clone()
    }

    async fn complete(app: &Router, project_id: i64, stage_order: i32) -> (StatusCode, Value) {
        send(
            app,
            "POST",
            "/api/space/1/edu/stages/complete",
            Some(STUDENT),
            Some(json!({
                "project_id": project_id,
                "stage_order": stage_order,
                "output_content": "A chatbot answers questions by matching intents. ".repeat(stage_order as usize * 4)
            })),
        )
        .await
    }

    #[tokio::test]
    async fn script_catalog_is_listed_and_fetched() {
        let (app, state) = make_test_app().await;
        let script = seed_script(&state).await;

        let (status, json) = send(&app, "GET", "/api/space/1/edu/scripts?keyword=weather", Some(STUDENT), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 1);

        let (_, json) = send(&app, "GET", "/api/space/2/edu/scripts", Some(STUDENT), None).await;
        assert_eq!(json["data"]["total"], 0);

        let (status, json) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/scripts/{}", script.id),
            Some(STUDENT),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["stages"].as_array().unwrap().len(), 3);

        let (status, _) = send(&app, "GET", "/api/space/1/edu/scripts/999", Some(STUDENT), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn script_project_runs_through_all_three_stages() {
        let (app, state) = make_test_app().await;
        let script = seed_script(&state).await;
        let project = start_project(&app, script.id).await;
        let project_id = project["id"].as_i64().unwrap();
        assert_eq!(project["current_stage"], 1);
        assert_eq!(project["status"], "in_progress");

        let detail_uri = format!("/api/space/1/edu/projects/{project_id}");
        let (_, json) = send(&app, "GET", &detail_uri, Some(STUDENT), None).await;
        let stages = json["data"]["stages"].as_array().unwrap();
        assert_eq!(stages.len(), 3);
        assert_eq!(stages[0]["status"], "in_progress");
        assert_eq!(stages[1]["status"], "not_started");
        assert_eq!(stages[2]["stage_name"], "bot development");

        let (status, json) = send(
            &app,
            "PUT",
            "/api/space/1/edu/stages/output",
            Some(STUDENT),
            Some(json!({ "stage_id": stages[0]["id"], "content": "draft" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["output_content"], "draft");
        assert_eq!(json["data"]["status"], "in_progress");

        let (status, json) = complete(&app, project_id, 1).await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["data"]["next_stage"], 2);
        assert_eq!(json["data"]["project_status"], "in_progress");
        assert_eq!(json["data"]["evaluation"]["evaluation_type"], "ai");
        let score = json["data"]["score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert!(json["data"]["feedback"].as_str().unwrap().contains("concept understanding"));

        let (_, json) = send(&app, "GET", &detail_uri, Some(STUDENT), None).await;
        assert_eq!(json["data"]["current_stage"], 2);
        assert_eq!(json["data"]["stages"][0]["status"], "completed");
        assert_eq!(json["data"]["stages"][1]["status"], "in_progress");
        assert!(json["data"]["stages"][1]["started_at"].is_string());

        let (_, json) = complete(&app, project_id, 2).await;
        assert_eq!(json["data"]["next_stage"], 3);

        let (status, json) = complete(&app, project_id, 3).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"].get("next_stage").is_none());
        assert_eq!(json["data"]["project_status"], "completed");

        let (_, json) = send(&app, "GET", &detail_uri, Some(STUDENT), None).await;
        assert_eq!(json["data"]["status"], "completed");
        assert_eq!(json["data"]["current_stage"], 3);
        assert!(json["data"]["completed_at"].is_string());
        assert_eq!(json["data"]["stages"].as_array().unwrap().len(), 3);
        assert_eq!(json["data"]["evaluations"].as_array().unwrap().len(), 3);

        let (status, json) = complete(&app, project_id, 3).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], 400);

        let (_, json) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/projects/{project_id}/evaluations"),
            Some(STUDENT),
            None,
        )
        .await;
        assert_eq!(json["data"]["total"], 3);
    }

    #[tokio::test]
    async fn stages_must_be_completed_in_order() {
        let (app, state) = make_test_app().await;
        let script = seed_script(&state).await;
        let project_id = start_project(&app, script.id).await["id"].as_i64().unwrap();
        let latest_uri = format!("/api/space/1/edu/projects/{project_id}/evaluations/latest");

        let (status, json) = send(&app, "GET", &latest_uri, Some(STUDENT), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"].is_null());

        for order in [2, 3] {
            let (status, json) = complete(&app, project_id, order).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{json}");
        }

        let (_, json) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/projects/{project_id}"),
            Some(STUDENT),
            None,
        )
        .await;
        assert_eq!(json["data"]["current_stage"], 1);
        assert_eq!(json["data"]["status"], "in_progress");
        let statuses: Vec<&str> = json["data"]["stages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["status"].as_str().unwrap())
            .collect();
        assert_eq!(statuses, vec!["in_progress", "not_started", "not_started"]);
        assert!(json["data"]["evaluations"].as_array().unwrap().is_empty());

        let (status, json) = complete(&app, project_id, 1).await;
        assert_eq!(status, StatusCode::OK);
        let evaluation_id = json["data"]["evaluation"]["id"].clone();

        let (status, json) = send(&app, "GET", &latest_uri, Some(STUDENT), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], evaluation_id);

        let (status, _) = send(&app, "GET", &latest_uri, Some(STRANGER), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn projects_are_private_to_their_owner() {
        let (app, state) = make_test_app().await;
        let script = seed_script(&state).await;
        let project_id = start_project(&app, script.id).await["id"].as_i64().unwrap();

        let detail_uri = format!("/api/space/1/edu/projects/{project_id}");
        let (status, _) = send(&app, "GET", &detail_uri, Some(STRANGER), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/space/9/edu/projects/{project_id}"),
            Some(STUDENT),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            "/api/space/1/edu/stages/complete",
            Some(STRANGER),
            Some(json!({ "project_id": project_id, "stage_order": 1, "output_content": "mine now" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send(
            &app,
            "POST",
            &format!("/api/space/1/edu/projects/{project_id}/submit"),
            Some(STUDENT),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["msg"], "project is not an assignment");

        let (_, json) = send(&app, "GET", "/api/space/1/edu/projects?status=in_progress", Some(STUDENT), None).await;
        assert_eq!(json["data"]["total"], 1);
        let (_, json) = send(&app, "GET", "/api/space/1/edu/projects?status=completed", Some(STUDENT), None).await;
        assert_eq!(json["data"]["total"], 0);
        let (_, json) = send(&app, "GET", "/api/space/1/edu/projects", Some(STRANGER), None).await;
        assert_eq!(json["data"]["total"], 0);
    }

    #[tokio::test]
    async fn chat_messages_are_stored_and_replayed_in_order() {
        let (app, state) = make_test_app().await;
        let script = seed_script(&state).await;
        let project_id = start_project(&app, script.id).await["id"].as_i64().unwrap();

        for content in ["hello", "what is an intent?"] {
            let (status, json) = send(
                &app,
                "POST",
                "/api/space/1/edu/chat/send",
                Some(STUDENT),
                Some(json!({ "project_id": project_id, "content": content })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["data"]["role"], "user");
        }

        let (status, _) = send(
            &app,
            "POST",
            "/api/space/1/edu/chat/send",
            Some(STUDENT),
            Some(json!({ "project_id": project_id, "content": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/space/1/edu/chat/send",
            Some(STRANGER),
            Some(json!({ "project_id": project_id, "content": "hi" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, json) = send(
            &app,
            "GET",
            &format!("/api/space/1/edu/projects/{project_id}/chat?limit=10"),
            Some(STUDENT),
            None,
        )
        .await;
        let contents: Vec<&str> = json["data"]["list"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["hello", "what is an intent?"]);
    }
}
