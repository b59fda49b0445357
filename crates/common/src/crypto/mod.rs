//! Cryptographic primitives for NestNet
//!
//! This module provides the identity layer of the peer protocol:
//!
//! - **Identity**: every node holds exactly one ECDSA keypair on the
//!   protocol's fixed curve (NIST P-256)
//! - **Challenge signing**: a challenged node signs the SHA-256 digest of the
//!   challenge text with its secret key
//! - **Verification**: a challenger verifies the returned `(r, s)` signature
//!   against the public key the peer claims to control
//!
//! # Identity Model
//!
//! A peer is known to the network by the affine coordinates `(X, Y)` of its
//! public curve point. Proving control of the matching secret scalar is the
//! entire trust bootstrap: there are no certificates and no chain of
//! authority, only "can you sign the challenge or not".
//!
//! Coordinate and scalar encodings on the wire are big-endian hex. Parsing a
//! claimed `(X, Y)` pair that does not lie on the curve fails closed with a
//! [`KeyError`]; it never panics.

mod keys;

pub use keys::{PublicKey, SecretKey, KeyError, COORDINATE_SIZE, PRIVATE_KEY_SIZE};

/// ECDSA signature over the P-256 curve, as produced by [`SecretKey::sign`].
pub use p256::ecdsa::Signature;
