/**
 * Cryptographic types and operations.
 *  - Public and Private key implementations
 *    over the protocol's fixed curve (NIST P-256)
 *  - Challenge signing and verification
 */
pub mod crypto;
/**
 * Core record types shared between peers:
 *  posts and peer registry entries.
 */
pub mod types;
/**
 * Storage provider interfaces consumed by the
 *  protocol, plus in-memory implementations for
 *  tests and database-less operation.
 */
pub mod store;
/**
 * The peer protocol itself:
 *  - wire messages
 *  - the challenge/response identity handshake
 *  - multi-peer post aggregation
 */
pub mod protocol;
/**
 * Lightweight in-process peer harness used by
 *  integration tests.
 */
pub mod testkit;

pub mod prelude {
    pub use crate::crypto::{PublicKey, SecretKey, Signature};
    pub use crate::protocol::{retrieve, verify_peer, CHALLENGE};
    pub use crate::store::{PeerRegistry, PostStore, ProviderError};
    pub use crate::types::{PeerRecord, Post};
}
