use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::task::JoinHandle;
use url::Url;
use uuid::Uuid;

use crate::crypto::{PublicKey, SecretKey};
use crate::protocol::{WireSignature, CHALLENGE_PATH, POSTS_PATH};
use crate::types::{PeerRecord, Post};

/// A scripted peer for protocol tests
///
/// By default it behaves honestly: signs challenges with its own key and
/// serves its configured posts. The builder methods script misbehavior --
/// garbage bodies, a signer that does not match the published key, or a slow
/// posts endpoint -- so tests can exercise every failure path over a real
/// HTTP exchange.
#[derive(Debug, Clone, Default)]
pub struct StubPeer {
    posts: Vec<Post>,
    posts_delay: Option<Duration>,
    malformed_challenge: bool,
    malformed_posts: bool,
    foreign_signer: bool,
}

impl StubPeer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts this peer serves from its posts endpoint
    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = posts;
        self
    }

    /// Delay every posts response by `delay`
    pub fn with_posts_delay(mut self, delay: Duration) -> Self {
        self.posts_delay = Some(delay);
        self
    }

    /// Respond to challenges with a body that is not a signature
    pub fn with_malformed_challenge(mut self) -> Self {
        self.malformed_challenge = true;
        self
    }

    /// Respond to posts requests with a body that is not a post array
    pub fn with_malformed_posts(mut self) -> Self {
        self.malformed_posts = true;
        self
    }

    /// Sign challenges with a key other than the published one
    pub fn with_foreign_signer(mut self) -> Self {
        self.foreign_signer = true;
        self
    }

    /// Bind an ephemeral port and start serving the protocol endpoints
    pub async fn start(self) -> anyhow::Result<RunningPeer> {
        let secret = SecretKey::generate();
        let public = secret.public();

        let shared = Arc::new(Shared {
            secret,
            config: self,
        });

        let router = Router::new()
            .route(CHALLENGE_PATH, post(challenge_handler))
            .route(POSTS_PATH, get(posts_handler))
            .with_state(shared);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let local_addr = listener.local_addr()?;
        let address = Url::parse(&format!("http://{}", local_addr))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("stub peer server error: {}", e);
            }
        });

        tracing::debug!(%address, "stub peer listening");
        Ok(RunningPeer {
            public,
            address,
            handle,
        })
    }
}

/// Handle to a started stub peer
pub struct RunningPeer {
    public: PublicKey,
    address: Url,
    handle: JoinHandle<()>,
}

impl RunningPeer {
    /// Base address the peer serves its endpoints under
    pub fn address(&self) -> Url {
        self.address.clone()
    }

    /// The public key the peer signs challenges with (unless scripted
    /// otherwise)
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// A registry record pointing at this peer
    pub fn record(&self, name: impl Into<String>) -> PeerRecord {
        let (x, y) = self.public.coordinates();
        PeerRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            public_key_x: x,
            public_key_y: y,
            address: self.address(),
        }
    }
}

impl Drop for RunningPeer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct Shared {
    secret: SecretKey,
    config: StubPeer,
}

async fn challenge_handler(State(shared): State<Arc<Shared>>, body: String) -> Response {
    if shared.config.malformed_challenge {
        return "this is not a signature".into_response();
    }

    let signature = if shared.config.foreign_signer {
        SecretKey::generate().sign(body.as_bytes())
    } else {
        shared.secret.sign(body.as_bytes())
    };

    Json(WireSignature::from(&signature)).into_response()
}

async fn posts_handler(State(shared): State<Arc<Shared>>) -> Response {
    if let Some(delay) = shared.config.posts_delay {
        tokio::time::sleep(delay).await;
    }

    if shared.config.malformed_posts {
        return Json(serde_json::json!({ "oops": "not a post array" })).into_response();
    }

    Json(shared.config.posts.clone()).into_response()
}
