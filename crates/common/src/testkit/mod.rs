/// Lightweight test harness for multi-peer protocol tests
///
/// This module provides a simple way to stand up scripted peers in-process,
/// each serving the real protocol endpoints on an ephemeral port, without
/// requiring external infrastructure.
///
/// # Example
///
/// ```rust,ignore
/// use common::testkit::StubPeer;
///
/// #[tokio::test]
/// async fn test_handshake() -> anyhow::Result<()> {
///     let peer = StubPeer::new().start().await?;
///
///     let client = reqwest::Client::new();
///     let verified =
///         common::protocol::verify_peer(&client, &peer.address(), &peer.public_key()).await;
///     assert!(verified);
///     Ok(())
/// }
/// ```
mod peer;

pub use peer::{RunningPeer, StubPeer};
