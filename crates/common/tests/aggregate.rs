//! Integration tests for multi-peer post aggregation

use std::time::{Duration, Instant};

use uuid::Uuid;

use common::protocol::retrieve;
use common::store::{MemoryPeerRegistry, PeerRegistry};
use common::testkit::StubPeer;
use common::types::{PeerRecord, Post};

const PEER_TIMEOUT: Duration = Duration::from_millis(500);

fn post(id: Uuid, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        body: format!("body of {}", title),
        img_hash: String::new(),
        img_name: String::new(),
    }
}

#[tokio::test]
async fn test_zero_peers_returns_empty() {
    let registry = MemoryPeerRegistry::new();
    let client = reqwest::Client::new();

    let posts = retrieve(&client, &registry, PEER_TIMEOUT).await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_union_of_disjoint_peers() {
    let a = post(Uuid::new_v4(), "from-alice");
    let b = post(Uuid::new_v4(), "from-bob");

    let alice = StubPeer::new()
        .with_posts(vec![a.clone()])
        .start()
        .await
        .unwrap();
    let bob = StubPeer::new()
        .with_posts(vec![b.clone()])
        .start()
        .await
        .unwrap();

    let registry = MemoryPeerRegistry::new();
    registry.add_peer(alice.record("alice")).await.unwrap();
    registry.add_peer(bob.record("bob")).await.unwrap();

    let client = reqwest::Client::new();
    let posts = retrieve(&client, &registry, PEER_TIMEOUT).await.unwrap();
    assert_eq!(posts, vec![a, b]);
}

#[tokio::test]
async fn test_timed_out_peer_contributes_nothing() {
    let a = post(Uuid::new_v4(), "fast-a");
    let b = post(Uuid::new_v4(), "fast-b");

    let fast_a = StubPeer::new()
        .with_posts(vec![a.clone()])
        .start()
        .await
        .unwrap();
    let slow = StubPeer::new()
        .with_posts(vec![post(Uuid::new_v4(), "too-late")])
        .with_posts_delay(Duration::from_secs(10))
        .start()
        .await
        .unwrap();
    let fast_b = StubPeer::new()
        .with_posts(vec![b.clone()])
        .start()
        .await
        .unwrap();

    let registry = MemoryPeerRegistry::new();
    registry.add_peer(fast_a.record("fast-a")).await.unwrap();
    registry.add_peer(slow.record("slow")).await.unwrap();
    registry.add_peer(fast_b.record("fast-b")).await.unwrap();

    let client = reqwest::Client::new();
    let started = Instant::now();
    let posts = retrieve(&client, &registry, PEER_TIMEOUT).await.unwrap();
    let elapsed = started.elapsed();

    // exactly the union of the responsive peers, in registry order
    assert_eq!(posts, vec![a, b]);

    // bounded by the per-peer timeout, not by the slow peer's delay
    assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_latency_bounded_by_slowest_peer_not_sum() {
    let delay = Duration::from_secs(1);
    let mut registry_posts = Vec::new();
    let registry = MemoryPeerRegistry::new();

    // three peers, each taking ~1s; sequential contact would need >= 3s
    let mut running = Vec::new();
    for i in 0..3 {
        let p = post(Uuid::new_v4(), &format!("peer-{}", i));
        registry_posts.push(p.clone());
        let peer = StubPeer::new()
            .with_posts(vec![p])
            .with_posts_delay(delay)
            .start()
            .await
            .unwrap();
        registry
            .add_peer(peer.record(format!("peer-{}", i)))
            .await
            .unwrap();
        running.push(peer);
    }

    let client = reqwest::Client::new();
    let started = Instant::now();
    let posts = retrieve(&client, &registry, Duration::from_secs(5))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(posts, registry_posts);
    assert!(elapsed < Duration::from_millis(2500), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_duplicate_id_first_seen_wins() {
    // spec scenario: A has [{1, "x"}], B has [{1, "y"}, {2, "z"}]
    let shared_id = Uuid::new_v4();
    let other_id = Uuid::new_v4();

    let x = post(shared_id, "x");
    let y = post(shared_id, "y");
    let z = post(other_id, "z");

    let peer_a = StubPeer::new()
        .with_posts(vec![x.clone()])
        .start()
        .await
        .unwrap();
    let peer_b = StubPeer::new()
        .with_posts(vec![y, z.clone()])
        .start()
        .await
        .unwrap();

    let registry = MemoryPeerRegistry::new();
    registry.add_peer(peer_a.record("a")).await.unwrap();
    registry.add_peer(peer_b.record("b")).await.unwrap();

    let client = reqwest::Client::new();
    let posts = retrieve(&client, &registry, PEER_TIMEOUT).await.unwrap();

    // exactly one post with the shared id -- the first encountered
    assert_eq!(posts, vec![x, z]);
}

#[tokio::test]
async fn test_malformed_and_unreachable_peers_are_empty() {
    let good = post(Uuid::new_v4(), "good");

    let malformed = StubPeer::new()
        .with_malformed_posts()
        .start()
        .await
        .unwrap();
    let honest = StubPeer::new()
        .with_posts(vec![good.clone()])
        .start()
        .await
        .unwrap();

    // a dead address for the unreachable peer
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);
    let dead = PeerRecord {
        id: Uuid::new_v4(),
        name: "dead".to_string(),
        public_key_x: "00".to_string(),
        public_key_y: "00".to_string(),
        address: url::Url::parse(&format!("http://{}", dead_addr)).unwrap(),
    };

    let registry = MemoryPeerRegistry::new();
    registry.add_peer(malformed.record("malformed")).await.unwrap();
    registry.add_peer(dead).await.unwrap();
    registry.add_peer(honest.record("honest")).await.unwrap();

    let client = reqwest::Client::new();
    let posts = retrieve(&client, &registry, PEER_TIMEOUT).await.unwrap();
    assert_eq!(posts, vec![good]);
}
