// complaint-client/tests/remote_complaints.rs
// 集成测试: 在随机端口启动真实路由, 通过客户端调用

use std::sync::Arc;

use axum::extract::Multipart;
use axum::routing::{get, post};
use axum::{Json, Router};
use complaint_client::{
    ClientConfig, ClientError, FeatureClient, FeatureEndpoints, RemoteComplaints, UploadFile,
};
use complaint_server::auth::account::hash_password;
use complaint_server::{
    AdminAccount, ComplaintRepository, Config, RedbComplaintStore, ServerState, build_app,
};
use serde_json::{Value, json};
use shared::models::{ComplaintDraft, ComplaintStatus, ComplaintType, FieldUpdate, Urgency};
use shared::query::{ListQuery, SortDirection, SortKey};
use tokio::net::TcpListener;

const ADMIN_PASSWORD: &str = "correct horse battery";

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_server() -> String {
    let admin = AdminAccount::new("admin", Some(hash_password(ADMIN_PASSWORD).unwrap()));
    let config = Config::for_tests("./unused", admin);
    let repo: Arc<dyn ComplaintRepository> = Arc::new(RedbComplaintStore::open_in_memory().unwrap());
    serve(build_app(ServerState::with_repository(config, repo))).await
}

async fn logged_in(base_url: &str) -> RemoteComplaints {
    let mut remote = RemoteComplaints::from_config(&ClientConfig::new(base_url)).unwrap();
    remote.login("admin", ADMIN_PASSWORD).await.unwrap();
    remote
}

fn draft(name: &str, location: &str, urgency: Urgency) -> ComplaintDraft {
    ComplaintDraft {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        complaint_type: ComplaintType::RoadDamage,
        location: location.to_string(),
        description: "Deep pothole in the right lane".to_string(),
        urgency,
        attachments: Vec::new(),
    }
}

#[tokio::test]
async fn test_health() {
    let base_url = spawn_server().await;
    let remote = RemoteComplaints::from_config(&ClientConfig::new(&base_url)).unwrap();

    let health = remote.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.complaints, 0);
}

#[tokio::test]
async fn test_public_create_returns_record_without_token() {
    let base_url = spawn_server().await;
    let mut remote = RemoteComplaints::from_config(&ClientConfig::new(&base_url)).unwrap();

    // Submission is public; the admin-only refetch is skipped
    let created = remote
        .create(&draft("Asha", "5th Ave", Urgency::High))
        .await
        .unwrap();
    assert_eq!(created.name, "Asha");
    assert_eq!(created.status, ComplaintStatus::Pending);
    assert!(remote.complaints().is_empty());

    remote.login("admin", ADMIN_PASSWORD).await.unwrap();
    let list = remote.list().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, created.id);
}

#[tokio::test]
async fn test_create_succeeds_when_refetch_is_rejected() {
    let base_url = spawn_server().await;
    let mut admin = logged_in(&base_url).await;
    admin
        .create(&draft("Ravi", "Ring Road", Urgency::Low))
        .await
        .unwrap();

    // A stale token still submits, but cannot list
    let mut citizen =
        RemoteComplaints::from_config(&ClientConfig::new(&base_url).with_token("stale-token"))
            .unwrap();
    let created = citizen
        .create(&draft("Asha", "5th Ave", Urgency::High))
        .await
        .unwrap();
    assert_eq!(created.location, "5th Ave");
    assert!(citizen.complaints().is_empty());

    let list = admin.list().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(
        list.iter().filter(|c| c.id == created.id).count(),
        1,
        "one submission stores exactly one record"
    );
}

#[tokio::test]
async fn test_create_and_update_refetch() {
    let base_url = spawn_server().await;
    let mut remote = logged_in(&base_url).await;

    let created = remote
        .create(&draft("Asha", "5th Ave", Urgency::High))
        .await
        .unwrap();
    assert_eq!(remote.complaints().len(), 1);
    assert_eq!(remote.complaints()[0].id, created.id);

    let mut changed = draft("Asha", "Main St", Urgency::Low);
    changed.description = "Pothole was partly filled".to_string();
    let updated = remote.update(created.id, &changed).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.location, "Main St");
    assert_eq!(remote.complaints()[0].location, "Main St");
    assert_eq!(remote.complaints()[0].urgency, Urgency::Low);
}

#[tokio::test]
async fn test_failed_update_leaves_cache_untouched() {
    let base_url = spawn_server().await;
    let mut remote = logged_in(&base_url).await;
    remote
        .create(&draft("Asha", "5th Ave", Urgency::High))
        .await
        .unwrap();
    let before = remote.complaints().to_vec();

    let err = remote
        .update(424242, &draft("Nobody", "Nowhere", Urgency::Low))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(err.code(), Some(4001));
    assert_eq!(remote.complaints(), before.as_slice());

    let mut blank = draft("Asha", "5th Ave", Urgency::High);
    blank.name = "   ".to_string();
    let err = remote.create(&blank).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(remote.complaints(), before.as_slice());
}

#[tokio::test]
async fn test_create_with_files() {
    let base_url = spawn_server().await;
    let mut remote = logged_in(&base_url).await;

    let created = remote
        .create_with_files(
            &draft("Ravi", "Ring Road", Urgency::Critical),
            vec![
                UploadFile::new("crash.png", vec![0u8; 2048]),
                UploadFile::new("report.pdf", vec![1u8; 100]),
            ],
        )
        .await
        .unwrap();

    assert_eq!(created.attachments.len(), 2);
    assert_eq!(created.attachments[0].filename, "crash.png");
    assert_eq!(created.attachments[0].media_type, "image/png");
    assert_eq!(created.attachments[0].size, 2048);
    assert_eq!(created.attachments[1].media_type, "application/pdf");
    assert_eq!(remote.complaints().len(), 1);

    let four = (0..4)
        .map(|i| UploadFile::new(format!("{i}.jpg"), vec![0u8; 10]))
        .collect();
    let err = remote
        .create_with_files(&draft("Ravi", "Ring Road", Urgency::Low), four)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(4002));
    assert_eq!(remote.complaints().len(), 1);
}

#[tokio::test]
async fn test_admin_operations() {
    let base_url = spawn_server().await;
    let mut remote = logged_in(&base_url).await;

    let low = remote
        .create(&draft("Asha", "5th Ave", Urgency::Low))
        .await
        .unwrap();
    let critical = remote
        .create(&draft("Ravi", "Ring Road", Urgency::Critical))
        .await
        .unwrap();

    let page = remote
        .page(&ListQuery {
            sort: Some(SortKey::Urgency),
            direction: Some(SortDirection::Desc),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.data[0].id, critical.id);

    let page = remote
        .page(&ListQuery {
            search: Some("5TH".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].id, low.id);

    let edited = remote
        .update_field(low.id, &FieldUpdate::Urgency(Urgency::High))
        .await
        .unwrap();
    assert_eq!(edited.urgency, Urgency::High);

    let resolved = remote.resolve(critical.id).await.unwrap();
    assert_eq!(resolved.status, ComplaintStatus::Resolved);
    let stats = remote.stats().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.pending, 1);

    remote.delete(low.id).await.unwrap();
    assert_eq!(remote.complaints().len(), 1);
    assert_eq!(remote.complaints()[0].id, critical.id);

    let err = remote.delete(low.id).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(remote.complaints().len(), 1);
}

#[tokio::test]
async fn test_login_failure() {
    let base_url = spawn_server().await;
    let mut remote = RemoteComplaints::from_config(&ClientConfig::new(&base_url)).unwrap();

    let err = remote.login("admin", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert_eq!(err.code(), Some(1002));
    assert!(remote.http().token().is_none());

    let login = remote.login("admin", ADMIN_PASSWORD).await.unwrap();
    assert_eq!(login.user.role, "admin");
    assert_eq!(remote.http().token(), Some(login.token.as_str()));

    remote.logout();
    assert!(remote.http().token().is_none());
}

#[tokio::test]
async fn test_network_error_propagates() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut remote =
        RemoteComplaints::from_config(&ClientConfig::new(format!("http://{addr}")).with_timeout(2))
            .unwrap();
    let err = remote.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(remote.complaints().is_empty());
}

async fn fake_detect(mut multipart: Multipart) -> Json<Value> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        files.push(json!({ "field": name, "filename": filename, "size": bytes.len() }));
    }
    Json(json!({ "files": files, "plates": ["KA01AB1234"] }))
}

#[tokio::test]
async fn test_feature_client() {
    let app = Router::new()
        .route("/detect-helmet-plate", post(fake_detect))
        .route(
            "/run-simulation",
            get(|| async { Json(json!({ "message": "Simulation started" })) }),
        );
    let base_url = serve(app).await;

    let features =
        FeatureClient::new(&ClientConfig::default(), FeatureEndpoints::on_host(&base_url))
            .unwrap();

    let result = features
        .detect("street.jpg", vec![7u8; 512])
        .await
        .unwrap();
    assert_eq!(result["files"][0]["field"], "file");
    assert_eq!(result["files"][0]["filename"], "street.jpg");
    assert_eq!(result["files"][0]["size"], 512);
    assert_eq!(result["plates"][0], "KA01AB1234");

    let simulation = features.run_simulation().await.unwrap();
    assert_eq!(simulation.message, "Simulation started");
}
