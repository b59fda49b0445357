use serde::{Deserialize, Serialize};

use crate::crypto::{KeyError, Signature};

/// Wire form of an ECDSA signature
///
/// The `(r, s)` scalars travel as big-endian hex big integers, matching the
/// coordinate encoding used for public keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSignature {
    pub r: String,
    pub s: String,
}

impl From<&Signature> for WireSignature {
    fn from(signature: &Signature) -> Self {
        let (r, s) = signature.split_bytes();
        Self {
            r: hex::encode(r),
            s: hex::encode(s),
        }
    }
}

impl WireSignature {
    /// Reconstruct the signature, failing closed on malformed or
    /// out-of-range scalars.
    pub fn to_signature(&self) -> Result<Signature, KeyError> {
        let r = scalar_from_hex(&self.r)?;
        let s = scalar_from_hex(&self.s)?;
        Signature::from_scalars(r, s)
            .map_err(|_| anyhow::anyhow!("signature scalars out of range").into())
    }
}

fn scalar_from_hex(hex_str: &str) -> Result<p256::FieldBytes, KeyError> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let padded;
    let hex_str = if hex_str.len() % 2 == 1 {
        padded = format!("0{}", hex_str);
        &padded
    } else {
        hex_str
    };
    let bytes = hex::decode(hex_str).map_err(|_| anyhow::anyhow!("scalar hex decode error"))?;
    if bytes.len() > 32 {
        return Err(anyhow::anyhow!("scalar too large, got {} bytes", bytes.len()).into());
    }
    let mut buff = [0u8; 32];
    buff[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(buff.into())
}
