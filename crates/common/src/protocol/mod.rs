//! The NestNet peer protocol
//!
//! Two operations, both a single HTTP request/response against a peer's
//! base address:
//!
//! - **Handshake** ([`verify_peer`]): POST the fixed challenge text to the
//!   peer's challenge endpoint and verify the returned `(r, s)` signature
//!   against the public key the peer claims. The result is a plain boolean;
//!   transport failures and cryptographic failures alike report `false`.
//! - **Retrieve** ([`retrieve`]): concurrently GET every registered peer's
//!   posts endpoint, treat unreachable or malformed peers as empty, and merge
//!   the rest, deduplicating by post id (first seen wins).

mod aggregate;
mod handshake;
mod messages;

pub use aggregate::{retrieve, DEFAULT_PEER_TIMEOUT};
pub use handshake::{challenge_peer, verify_peer, HandshakeError, HANDSHAKE_TIMEOUT};
pub use messages::WireSignature;

/// The fixed challenge plaintext for this protocol version
pub const CHALLENGE: &str = "HELLO";

/// Path of the challenge (handshake responder) endpoint under a peer address
pub const CHALLENGE_PATH: &str = "/api/v0/challenge";

/// Path of the posts listing endpoint under a peer address
pub const POSTS_PATH: &str = "/api/v0/posts";
