//! Wire-level client tests against a mock backend
//!
//! Every mutating route has a fixed body shape; these tests pin the exact
//! JSON each call puts on the wire.

use chrono::{DateTime, Duration};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use queuedeck_client::{ClientError, QueueClient};
use queuedeck_core::application::listing::{AdminListPayload, WorkerListPayload};
use queuedeck_core::application::shaper::{ClaimForm, CreateForm, RequeuePayload};
use queuedeck_core::domain::{Queue, QueueStatus, Role};
use queuedeck_core::port::TimeProvider;

struct FixedClock(DateTime<chrono::Utc>);

impl TimeProvider for FixedClock {
    fn now(&self) -> DateTime<chrono::Utc> {
        self.0
    }
}

fn record_json(id: &str, queue_id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "queue_id": queue_id,
        "task_name": "ingest",
        "details": "nightly",
        "status": status,
        "created_at": "2026-08-01T08:00:00Z",
        "updated_at": "2026-08-01T08:00:00Z"
    })
}

#[tokio::test]
async fn login_returns_a_parsed_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "ops", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-123",
            "user": { "role": "Admin" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap();
    let session = client.login("ops", "secret").await.unwrap();

    assert_eq!(session.token, "tok-123");
    assert_eq!(session.username, "ops");
    assert_eq!(session.role, Role::Admin);
}

#[tokio::test]
async fn bearer_token_rides_every_authenticated_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queues"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap().with_token("tok-123");
    let queues = client.list_queues(&AdminListPayload::default()).await.unwrap();
    assert!(queues.is_empty());
}

#[tokio::test]
async fn admin_listing_sends_nulls_for_unset_filters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queues"))
        .and(body_json(json!({ "task_name": null, "status": "failed" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([record_json("r1", "Q-1", "failed")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap();
    let filter = AdminListPayload {
        task_name: None,
        status: Some(QueueStatus::Failed),
    };

    let queues = client.list_queues(&filter).await.unwrap();
    assert_eq!(queues.len(), 1);
    assert_eq!(queues[0].status, QueueStatus::Failed);
}

#[tokio::test]
async fn worker_listing_sends_the_raw_search_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/getqueuesworker"))
        .and(body_json(json!({ "task_name": "", "status": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap();
    client
        .list_worker_queues(&WorkerListPayload::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn create_posts_the_pending_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queues"))
        .and(body_json(json!({
            "task_name": "ingest",
            "details": "nightly",
            "status": "pending"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap();
    let payload = CreateForm::new(None, "ingest", "nightly").into_payload().unwrap();
    client.create_queue(&payload).await.unwrap();
}

#[tokio::test]
async fn claim_posts_id_and_window_only() {
    let server = MockServer::start().await;

    let mut queue = Queue::new_test("Q-5", "ingest", QueueStatus::Pending);
    queue.id = "rec-5".to_string();

    let clock = FixedClock(DateTime::from_timestamp(1_750_000_000, 0).unwrap());
    let payload = ClaimForm::open(&queue, &clock)
        .with_window(None, Some(clock.0 + Duration::hours(2)))
        .into_payload();

    Mock::given(method("POST"))
        .and(path("/api/queues/claim"))
        .and(body_json(serde_json::to_value(&payload).unwrap()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap();
    client.claim_queue(&payload).await.unwrap();
}

#[tokio::test]
async fn requeue_puts_capitalized_notes_to_the_record_route() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/queues/requeue/rec-9"))
        .and(body_json(json!({ "Notes": "transient error" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap();
    let payload = RequeuePayload {
        notes: "transient error".to_string(),
    };
    client.requeue_queue("rec-9", &payload).await.unwrap();
}

#[tokio::test]
async fn delete_targets_the_record_route() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/queues/rec-3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap();
    client.delete_queue("rec-3").await.unwrap();
}

#[tokio::test]
async fn server_error_bodies_surface_their_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queues"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap();
    let err = client.list_queues(&AdminListPayload::default()).await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn expired_token_maps_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queues"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = QueueClient::new(server.uri()).unwrap().with_token("stale");
    let err = client.list_queues(&AdminListPayload::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn unreachable_server_maps_to_transport() {
    // Nothing listens on the reserved port.
    let client = QueueClient::new("http://127.0.0.1:9").unwrap();
    let err = client.list_queues(&AdminListPayload::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
