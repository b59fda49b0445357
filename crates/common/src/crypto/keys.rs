use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::{EncodedPoint, FieldBytes};

/// Size of a P-256 secret scalar in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;
/// Size of a single affine coordinate (X or Y) in bytes
pub const COORDINATE_SIZE: usize = 32;

/// Errors that can occur during key operations
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key error: {0}")]
    Default(#[from] anyhow::Error),
}

/// Public key identifying a peer
///
/// A thin wrapper around a P-256 ECDSA verifying key. Peers publish the
/// affine coordinates `(X, Y)` of this point; the handshake protocol verifies
/// challenge signatures against it.
///
/// # Examples
///
/// ```ignore
/// let secret_key = SecretKey::generate();
/// let public_key = secret_key.public();
///
/// // Publish as hex coordinates
/// let (x, y) = public_key.coordinates();
/// let recovered = PublicKey::from_coordinates(&x, &y)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct PublicKey(VerifyingKey);

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        PublicKey(key)
    }
}

impl From<PublicKey> for VerifyingKey {
    fn from(key: PublicKey) -> Self {
        key.0
    }
}

impl PublicKey {
    /// Reconstruct a public key from big-endian hex affine coordinates
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings; values shorter
    /// than a full coordinate are left-padded (the wire format strips leading
    /// zeroes from big integers).
    ///
    /// # Errors
    ///
    /// Fails closed if either coordinate is not valid hex, is too large, or
    /// if the resulting `(X, Y)` pair is not a point on the curve.
    pub fn from_coordinates(x_hex: &str, y_hex: &str) -> Result<Self, KeyError> {
        let x = coordinate_from_hex(x_hex)?;
        let y = coordinate_from_hex(y_hex)?;
        let point = EncodedPoint::from_affine_coordinates(&x, &y, false);
        let key = VerifyingKey::from_encoded_point(&point)
            .map_err(|_| anyhow::anyhow!("claimed (x, y) is not a point on the curve"))?;
        Ok(PublicKey(key))
    }

    /// Parse a public key from an uncompressed SEC1 hex string
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes =
            hex::decode(hex_str).map_err(|_| anyhow::anyhow!("public key hex decode error"))?;
        let point = EncodedPoint::from_bytes(&bytes)
            .map_err(|_| anyhow::anyhow!("public key is not a valid SEC1 point encoding"))?;
        let key = VerifyingKey::from_encoded_point(&point)
            .map_err(|_| anyhow::anyhow!("public key is not a point on the curve"))?;
        Ok(PublicKey(key))
    }

    /// Big-endian hex affine coordinates `(X, Y)` of the curve point
    pub fn coordinates(&self) -> (String, String) {
        let point = self.0.to_encoded_point(false);
        let x = point.x().expect("uncompressed point has an x coordinate");
        let y = point.y().expect("uncompressed point has a y coordinate");
        (hex::encode(x), hex::encode(y))
    }

    /// Uncompressed SEC1 hex encoding of the curve point
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_encoded_point(false).as_bytes())
    }

    /// Verify an ECDSA signature over the SHA-256 digest of `msg`.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature does not verify against this key.
    pub fn verify(
        &self,
        msg: &[u8],
        signature: &Signature,
    ) -> Result<(), p256::ecdsa::signature::Error> {
        self.0.verify(msg, signature)
    }
}

/// Secret key for the local node identity
///
/// A thin wrapper around a P-256 ECDSA signing key. There is exactly one per
/// node process, created at provisioning and immutable thereafter. The scalar
/// never leaves this type except through [`SecretKey::to_pem`] for storage in
/// the node's key file.
///
/// # Security Considerations
///
/// - Never share this key over the network
/// - Store in a secure location (e.g. `~/.nestnet/key.pem`)
/// - Generate a new key for each node instance
#[derive(Clone)]
pub struct SecretKey(SigningKey);

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretKey").field(&"<redacted>").finish()
    }
}

impl From<SigningKey> for SecretKey {
    fn from(key: SigningKey) -> Self {
        Self(key)
    }
}

impl SecretKey {
    /// Generate a new random secret key using a cryptographically secure RNG
    ///
    /// Entropy-source failure is fatal and unrecoverable.
    pub fn generate() -> Self {
        let mut bytes = [0u8; PRIVATE_KEY_SIZE];
        loop {
            getrandom::getrandom(&mut bytes).expect("failed to generate random bytes");
            // a uniformly random 32-byte value can fall outside the scalar
            // field; redraw in that (astronomically unlikely) case
            if let Ok(key) = SigningKey::from_slice(&bytes) {
                return Self(key);
            }
        }
    }

    /// Parse a secret key from a hexadecimal string
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let mut buff = [0; PRIVATE_KEY_SIZE];
        hex::decode_to_slice(hex_str, &mut buff)
            .map_err(|_| anyhow::anyhow!("private key hex decode error"))?;
        let key = SigningKey::from_slice(&buff)
            .map_err(|_| anyhow::anyhow!("private key is not a valid curve scalar"))?;
        Ok(Self(key))
    }

    /// Derive the public key from this secret key
    pub fn public(&self) -> PublicKey {
        PublicKey(*self.0.verifying_key())
    }

    /// Convert secret key to raw scalar bytes
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.0.to_bytes().into()
    }

    /// Convert secret key to hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Encode secret key in PEM format for storage in the node key file
    ///
    /// Returns a PEM-encoded string with tag "PRIVATE KEY".
    pub fn to_pem(&self) -> String {
        let pem = pem::Pem::new("PRIVATE KEY", self.to_bytes().to_vec());
        pem::encode(&pem)
    }

    /// Parse a secret key from PEM format
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The PEM string is malformed
    /// - The PEM tag is not "PRIVATE KEY"
    /// - The contents are not a valid curve scalar
    pub fn from_pem(pem_str: &str) -> Result<Self, KeyError> {
        let pem = pem::parse(pem_str).map_err(|e| anyhow::anyhow!("failed to parse PEM: {}", e))?;

        if pem.tag() != "PRIVATE KEY" {
            return Err(anyhow::anyhow!("invalid PEM tag, expected PRIVATE KEY").into());
        }

        let contents = pem.contents();
        if contents.len() != PRIVATE_KEY_SIZE {
            return Err(anyhow::anyhow!(
                "invalid private key size in PEM, expected {}, got {}",
                PRIVATE_KEY_SIZE,
                contents.len()
            )
            .into());
        }

        let key = SigningKey::from_slice(contents)
            .map_err(|_| anyhow::anyhow!("PEM contents are not a valid curve scalar"))?;
        Ok(Self(key))
    }

    /// Sign a message with this secret key.
    ///
    /// Produces an ECDSA signature over the SHA-256 digest of `msg`,
    /// verifiable with the corresponding public key.
    pub fn sign(&self, msg: &[u8]) -> Signature {
        self.0.sign(msg)
    }
}

/// Decode a big-endian hex big integer into a fixed-size field element,
/// left-padding values shorter than a full coordinate.
fn coordinate_from_hex(hex_str: &str) -> Result<FieldBytes, KeyError> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    // tolerate odd-length hex from big-integer encoders that drop the
    // leading zero nibble
    let padded;
    let hex_str = if hex_str.len() % 2 == 1 {
        padded = format!("0{}", hex_str);
        &padded
    } else {
        hex_str
    };
    let bytes =
        hex::decode(hex_str).map_err(|_| anyhow::anyhow!("coordinate hex decode error"))?;
    if bytes.len() > COORDINATE_SIZE {
        return Err(anyhow::anyhow!(
            "coordinate too large, expected at most {} bytes, got {}",
            COORDINATE_SIZE,
            bytes.len()
        )
        .into());
    }
    let mut buff = [0u8; COORDINATE_SIZE];
    buff[COORDINATE_SIZE - bytes.len()..].copy_from_slice(&bytes);
    Ok(buff.into())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let private_key = SecretKey::generate();
        let public_key = private_key.public();

        // Test round-trip conversion
        let private_hex = private_key.to_hex();
        let recovered_private = SecretKey::from_hex(&private_hex).unwrap();
        assert_eq!(private_key.to_bytes(), recovered_private.to_bytes());

        let public_hex = public_key.to_hex();
        let recovered_public = PublicKey::from_hex(&public_hex).unwrap();
        assert_eq!(public_key, recovered_public);
    }

    #[test]
    fn test_pem_serialization() {
        let private_key = SecretKey::generate();

        // Test round-trip PEM conversion
        let pem = private_key.to_pem();
        let recovered_private = SecretKey::from_pem(&pem).unwrap();
        assert_eq!(private_key.to_bytes(), recovered_private.to_bytes());

        // Verify the recovered key can produce the same public key
        assert_eq!(private_key.public(), recovered_private.public());
    }

    #[test]
    fn test_coordinate_round_trip() {
        let public_key = SecretKey::generate().public();

        let (x, y) = public_key.coordinates();
        let recovered = PublicKey::from_coordinates(&x, &y).unwrap();
        assert_eq!(public_key, recovered);

        // "0x"-prefixed and left-trimmed encodings parse the same
        let trimmed_x = format!("0x{}", x.trim_start_matches('0'));
        let recovered = PublicKey::from_coordinates(&trimmed_x, &y).unwrap();
        assert_eq!(public_key, recovered);
    }

    #[test]
    fn test_off_curve_point_fails_closed() {
        // (1, 1) is not on P-256
        let result = PublicKey::from_coordinates("01", "01");
        assert!(result.is_err());

        // garbage hex
        assert!(PublicKey::from_coordinates("zz", "01").is_err());

        // oversized coordinate
        let too_big = "ff".repeat(COORDINATE_SIZE + 1);
        assert!(PublicKey::from_coordinates(&too_big, "01").is_err());
    }

    #[test]
    fn test_sign_and_verify() {
        let secret_key = SecretKey::generate();
        let public_key = secret_key.public();
        let message = b"HELLO";

        // Sign the message
        let signature = secret_key.sign(message);

        // Verify the signature
        assert!(public_key.verify(message, &signature).is_ok());

        // Verify fails with wrong message
        let wrong_message = b"GOODBYE";
        assert!(public_key.verify(wrong_message, &signature).is_err());

        // Verify fails with wrong key
        let other_key = SecretKey::generate().public();
        assert!(other_key.verify(message, &signature).is_err());
    }

    #[test]
    fn test_tampered_signature_fails() {
        let secret_key = SecretKey::generate();
        let public_key = secret_key.public();
        let message = b"HELLO";
        let signature = secret_key.sign(message);

        let (r, s) = signature.split_bytes();

        // flip one bit in r
        let mut tampered_r: [u8; 32] = r.into();
        tampered_r[31] ^= 0x01;
        if let Ok(tampered) = Signature::from_scalars(tampered_r, s) {
            assert!(public_key.verify(message, &tampered).is_err());
        }

        // flip one bit in s
        let mut tampered_s: [u8; 32] = s.into();
        tampered_s[0] ^= 0x80;
        if let Ok(tampered) = Signature::from_scalars(r, tampered_s) {
            assert!(public_key.verify(message, &tampered).is_err());
        }
    }
}
