//! Router tests driven through `tower::ServiceExt::oneshot`

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{TimeZone, Utc};
use complaint_server::auth::account::hash_password;
use complaint_server::{
    AdminAccount, ComplaintRepository, Config, MemoryComplaintStore, ServerState, build_app,
};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::models::{Complaint, ComplaintStatus, ComplaintType, Urgency};
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "correct horse battery";

struct TestApp {
    app: Router,
    state: ServerState,
}

impl TestApp {
    fn new() -> Self {
        let admin = AdminAccount::new("admin", Some(hash_password(ADMIN_PASSWORD).unwrap()));
        let config = Config::for_tests("./unused", admin);
        let repo: Arc<dyn ComplaintRepository> = Arc::new(MemoryComplaintStore::new());
        let state = ServerState::with_repository(config, repo);
        Self {
            app: build_app(state.clone()),
            state,
        }
    }

    fn token(&self) -> String {
        self.state.jwt_service.generate_token("admin", "admin").unwrap()
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn json(&self, method: &str, uri: &str, body: Value, auth: bool) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if auth {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", self.token()));
        }
        self.send(req.body(Body::from(body.to_string())).unwrap()).await
    }

    async fn get(&self, uri: &str, auth: bool) -> (StatusCode, Value) {
        let mut req = Request::builder().uri(uri);
        if auth {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", self.token()));
        }
        self.send(req.body(Body::empty()).unwrap()).await
    }
}

fn draft() -> Value {
    json!({
        "name": "A",
        "email": "a@x.com",
        "type": "Road Damage",
        "location": "5th Ave",
        "description": "pothole",
        "urgency": "high"
    })
}

fn seeded(id: i64, location: &str, urgency: Urgency) -> Complaint {
    Complaint {
        id,
        name: format!("citizen {id}"),
        email: None,
        complaint_type: ComplaintType::TrafficCongestion,
        location: location.to_string(),
        description: None,
        urgency,
        status: ComplaintStatus::Pending,
        date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        attachments: vec![],
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.get("/health", false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["complaints"], 0);
}

#[tokio::test]
async fn test_public_submit_and_admin_list() {
    let app = TestApp::new();

    let (status, created) = app.json("POST", "/api/complaints", draft(), false).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["type"], "Road Damage");

    let (status, body) = app.get("/api/complaints", false).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, list) = app.get("/api/complaints", true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_submit_rejects_too_many_attachments() {
    let app = TestApp::new();
    let mut body = draft();
    body["attachments"] = json!([
        {"filename": "1.jpg", "media_type": "image/jpeg", "size": 10},
        {"filename": "2.jpg", "media_type": "image/jpeg", "size": 10},
        {"filename": "3.jpg", "media_type": "image/jpeg", "size": 10},
        {"filename": "4.jpg", "media_type": "image/jpeg", "size": 10}
    ]);

    let (status, err) = app.json("POST", "/api/complaints", body, false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 4002);
    assert!(app.state.repo.load().is_empty());
}

#[tokio::test]
async fn test_submit_rejects_blank_description() {
    let app = TestApp::new();
    let mut body = draft();
    body["description"] = json!("   ");

    let (status, err) = app.json("POST", "/api/complaints", body, false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["details"]["field"], "description");
}

#[tokio::test]
async fn test_multipart_form_records_metadata_only() {
    let app = TestApp::new();
    let boundary = "complaint-boundary";
    let mut body = Vec::new();
    for (name, value) in [
        ("name", "A"),
        ("email", "a@x.com"),
        ("type", "Illegal Parking"),
        ("location", "Sector 5"),
        ("description", "car on footpath"),
    ] {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"car.png\"\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&[7u8; 2048]);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let req = Request::builder()
        .method("POST")
        .uri("/api/complaints/form")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, created) = app.send(req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["urgency"], "medium");
    assert_eq!(
        created["attachments"],
        json!([{"filename": "car.png", "media_type": "image/png", "size": 2048}])
    );
}

#[tokio::test]
async fn test_admin_page_search_and_pagination() {
    let app = TestApp::new();
    let mut items: Vec<Complaint> = (1..=22).map(|i| seeded(i, "Ring Road", Urgency::Low)).collect();
    items.push(seeded(23, "MG Road", Urgency::High));
    app.state.repo.save(&items).unwrap();

    let (status, page) = app.get("/api/admin/complaints?page=3", true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["data"].as_array().unwrap().len(), 3);

    let (_, page) = app.get("/api/admin/complaints?search=mg%20road", true).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["data"][0]["id"], 23);

    let (_, page) = app
        .get("/api/admin/complaints?sort=urgency&direction=desc", true)
        .await;
    assert_eq!(page["data"][0]["id"], 23);

    let (status, _) = app.get("/api/admin/complaints", false).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_field_edit_resolve_delete() {
    let app = TestApp::new();
    app.state
        .repo
        .save(&[seeded(1, "MG Road", Urgency::Low)])
        .unwrap();

    let (status, updated) = app
        .json(
            "PATCH",
            "/api/admin/complaints/1",
            json!({"field": "urgency", "value": "critical"}),
            true,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["urgency"], "critical");

    let (status, _) = app
        .json(
            "PATCH",
            "/api/admin/complaints/1",
            json!({"field": "urgency", "value": "whenever"}),
            true,
        )
        .await;
    assert!(status.is_client_error());
    assert_eq!(app.state.repo.load()[0].urgency, Urgency::Critical);

    let (status, err) = app
        .json(
            "PATCH",
            "/api/admin/complaints/99",
            json!({"field": "location", "value": "x"}),
            true,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], 4001);

    for _ in 0..2 {
        let (status, resolved) = app
            .json("POST", "/api/admin/complaints/1/resolve", Value::Null, true)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resolved["status"], "resolved");
    }

    let (_, stats) = app.get("/api/admin/complaints/stats", true).await;
    assert_eq!(stats, json!({"total": 1, "pending": 0, "in_progress": 0, "resolved": 1}));

    let (status, deleted) = app
        .json("DELETE", "/api/admin/complaints/1", Value::Null, true)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!(true));

    let (status, _) = app
        .json("DELETE", "/api/admin/complaints/1", Value::Null, true)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_create() {
    let app = TestApp::new();
    let (status, created) = app
        .json(
            "POST",
            "/api/admin/complaints",
            json!({"name": "Ravi", "type": "Accident Report", "location": "NH 48", "date": "2025-03-04"}),
            true,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["urgency"], "medium");
    assert_eq!(created["status"], "pending");
    assert_eq!(created["date"], "2025-03-04T00:00:00.000Z");
}

#[tokio::test]
async fn test_replace_missing_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app.json("PUT", "/api/complaints/5", draft(), true).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.state.repo.load().is_empty());
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new();

    let (status, body) = app
        .json(
            "POST",
            "/api/auth/login",
            json!({"username": "admin", "password": "nope"}),
            false,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, body) = app
        .json(
            "POST",
            "/api/auth/login",
            json!({"username": "admin", "password": ADMIN_PASSWORD}),
            false,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");

    let token = body["token"].as_str().unwrap();
    let req = Request::builder()
        .uri("/api/complaints")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(req).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_admin_token_is_forbidden() {
    let app = TestApp::new();
    let token = app
        .state
        .jwt_service
        .generate_token("viewer", "viewer")
        .unwrap();
    let req = Request::builder()
        .uri("/api/admin/complaints")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new();
    let req = Request::builder()
        .uri("/api/complaints")
        .header(header::AUTHORIZATION, "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
}
