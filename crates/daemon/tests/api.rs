//! End-to-end tests against a full node served over real HTTP

use std::time::Duration;

use base64::Engine;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use url::Url;

use common::prelude::{verify_peer, SecretKey};
use common::protocol::WireSignature;
use common::testkit::StubPeer;
use common::types::Post;

use nestnet_daemon::http_server;
use nestnet_daemon::{ServiceConfig, ServiceState};

struct TestNode {
    address: Url,
    state: ServiceState,
    _images: TempDir,
    handle: JoinHandle<()>,
}

impl Drop for TestNode {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestNode {
    fn url(&self, path: &str) -> Url {
        self.address.join(path).unwrap()
    }
}

async fn start_node() -> TestNode {
    let images = TempDir::new().unwrap();
    let config = ServiceConfig {
        node_secret: SecretKey::generate(),
        api_port: 0,
        sqlite_path: None,
        images_dir: images.path().join("images"),
        peer_timeout: Duration::from_secs(2),
        log_level: tracing::Level::DEBUG,
        log_dir: None,
    };
    let state = ServiceState::from_config(&config).await.unwrap();

    let router = http_server::router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let local_addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    TestNode {
        address: Url::parse(&format!("http://{}", local_addr)).unwrap(),
        state,
        _images: images,
        handle,
    }
}

#[tokio::test]
async fn test_challenge_endpoint_signs_with_node_key() {
    let node = start_node().await;
    let client = reqwest::Client::new();

    let response = client
        .post(node.url("/api/v0/challenge"))
        .body("HELLO")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let wire: WireSignature = response.json().await.unwrap();
    let signature = wire.to_signature().unwrap();
    assert!(node
        .state
        .public_key()
        .verify(b"HELLO", &signature)
        .is_ok());

    // the node also passes a full handshake against its own address
    assert!(verify_peer(&client, &node.address, &node.state.public_key()).await);
}

#[tokio::test]
async fn test_hello_drives_handshake() {
    let responder = start_node().await;
    let node = start_node().await;
    let client = reqwest::Client::new();

    let (x, y) = responder.state.public_key().coordinates();
    let body = serde_json::json!({ "addr": responder.address, "x": x, "y": y });
    let response = client
        .post(node.url("/api/v0/hello"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let verified = response.json::<serde_json::Value>().await.unwrap()["verified"]
        .as_bool()
        .unwrap();
    assert!(verified);

    // a key the responder does not control fails verification
    let (wx, wy) = SecretKey::generate().public().coordinates();
    let body = serde_json::json!({ "addr": responder.address, "x": wx, "y": wy });
    let response = client
        .post(node.url("/api/v0/hello"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let verified = response.json::<serde_json::Value>().await.unwrap()["verified"]
        .as_bool()
        .unwrap();
    assert!(!verified);

    // coordinates that are not a curve point are the caller's mistake
    let body = serde_json::json!({ "addr": responder.address, "x": "01", "y": "01" });
    let response = client
        .post(node.url("/api/v0/hello"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_posts_add_and_list() {
    let node = start_node().await;
    let client = reqwest::Client::new();

    let response = client
        .post(node.url("/api/v0/posts"))
        .json(&serde_json::json!({ "title": "first", "body": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let posts: Vec<Post> = client
        .get(node.url("/api/v0/posts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "first");

    // empty titles are rejected
    let response = client
        .post(node.url("/api/v0/posts"))
        .json(&serde_json::json!({ "title": "", "body": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_feed_aggregates_registered_peers() {
    let node = start_node().await;
    let client = reqwest::Client::new();

    let shared = Post::new("shared", "appears once");
    let alice = StubPeer::new()
        .with_posts(vec![shared.clone(), Post::new("from alice", "a")])
        .start()
        .await
        .unwrap();
    let bob = StubPeer::new()
        .with_posts(vec![shared.clone(), Post::new("from bob", "b")])
        .start()
        .await
        .unwrap();

    for peer in [&alice, &bob] {
        let (x, y) = peer.public_key().coordinates();
        let body = serde_json::json!({
            "name": "stub",
            "x": x,
            "y": y,
            "address": peer.address(),
        });
        let response = client
            .post(node.url("/api/v0/peers"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    let feed: Vec<Post> = client
        .get(node.url("/api/v0/posts/feed"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // the duplicate id survives once, first-seen wins
    assert_eq!(feed.len(), 3);
    assert_eq!(feed[0], shared);
    assert_eq!(feed.iter().filter(|p| p.id == shared.id).count(), 1);
}

#[tokio::test]
async fn test_peers_add_rejects_off_curve_key() {
    let node = start_node().await;
    let client = reqwest::Client::new();

    let body = serde_json::json!({
        "name": "mallory",
        "x": "01",
        "y": "01",
        "address": "http://localhost:9999",
    });
    let response = client
        .post(node.url("/api/v0/peers"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let peers: Vec<serde_json::Value> = client
        .get(node.url("/api/v0/peers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(peers.is_empty());
}

#[tokio::test]
async fn test_name_round_trip() {
    let node = start_node().await;
    let client = reqwest::Client::new();

    let name = client
        .get(node.url("/api/v0/name"))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(name["name"], "");

    client
        .post(node.url("/api/v0/name"))
        .json(&serde_json::json!({ "name": "nest-zero" }))
        .send()
        .await
        .unwrap();

    let name = client
        .get(node.url("/api/v0/name"))
        .send()
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(name["name"], "nest-zero");
}

#[tokio::test]
async fn test_image_upload_and_fetch() {
    let node = start_node().await;
    let client = reqwest::Client::new();

    let data = b"not really a png".to_vec();
    let encoded = base64::engine::general_purpose::STANDARD.encode(&data);

    let response = client
        .post(node.url("/api/v0/image"))
        .body(encoded)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let uploaded = response.json::<serde_json::Value>().await.unwrap();
    let url = uploaded["url"].as_str().unwrap().to_string();

    let fetched = client
        .get(node.url(&url))
        .send()
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(fetched.to_vec(), data);

    // unknown hash is a 404, junk is a 400
    let response = client
        .get(node.url(&format!("/api/v0/image?hash={}", "0".repeat(64))))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let response = client
        .get(node.url("/api/v0/image?hash=junk"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // not-base64 uploads are rejected
    let response = client
        .post(node.url("/api/v0/image"))
        .body("!!! not base64 !!!")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_api_client_typed_calls() {
    use nestnet_daemon::http_server::api::client::{ApiClient, ApiError};
    use nestnet_daemon::http_server::api::v0::challenge::ChallengeRequest;
    use nestnet_daemon::http_server::api::v0::image::UploadRequest;
    use nestnet_daemon::http_server::api::v0::posts::AddRequest;

    let node = start_node().await;
    let mut client = ApiClient::new(&node.address).unwrap();

    let wire = client
        .call(ChallengeRequest {
            challenge: "HELLO".to_string(),
        })
        .await
        .unwrap();
    assert!(node
        .state
        .public_key()
        .verify(b"HELLO", &wire.to_signature().unwrap())
        .is_ok());

    let uploaded = client
        .call(UploadRequest {
            data: b"png bytes".to_vec(),
        })
        .await
        .unwrap();
    assert_eq!(uploaded.hash.len(), 64);
    assert!(uploaded.url.contains(&uploaded.hash));

    // a 4xx from the node comes back as a rejection, not a transport error
    let err = client
        .call(AddRequest {
            title: String::new(),
            body: "no title".to_string(),
            img_hash: None,
            img_name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Rejected { status, .. } if status == reqwest::StatusCode::BAD_REQUEST
    ));
}

#[tokio::test]
async fn test_status_and_fallback() {
    let node = start_node().await;
    let client = reqwest::Client::new();

    let response = client
        .get(node.url("/_status/healthz"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client.get(node.url("/")).send().await.unwrap();
    assert!(response.status().is_success());

    // JSON-aware 404 fallback
    let response = client
        .get(node.url("/no/such/route"))
        .header("Accept", "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["msg"], "not found");
    assert_eq!(body["path"], "/no/such/route");

    // non-JSON consumers get plain text naming the path
    let response = client
        .get(node.url("/no/such/route"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("/no/such/route"));
}
