//! Ed25519 verification of social proofs.
//!
//! A sender address is the hex-encoded 32-byte verifying key, optionally
//! `0x`-prefixed. Signatures are 64 bytes, hex-encoded the same way.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use heroquest_domain::WalletAddress;

use crate::infrastructure::ports::{SignatureError, SignatureVerifierPort};

#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519SignatureVerifier;

impl Ed25519SignatureVerifier {
    pub fn new() -> Self {
        Self
    }
}

fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

fn decode_key(signer: &WalletAddress) -> Result<VerifyingKey, SignatureError> {
    let bytes = hex::decode(signer.without_prefix())
        .map_err(|e| SignatureError::MalformedKey(e.to_string()))?;
    let bytes: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
        SignatureError::MalformedKey(format!("expected 32 bytes, got {}", bytes.len()))
    })?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| SignatureError::MalformedKey(e.to_string()))
}

fn decode_signature(signature: &str) -> Result<Signature, SignatureError> {
    let bytes = hex::decode(strip_hex_prefix(signature))
        .map_err(|e| SignatureError::MalformedSignature(e.to_string()))?;
    Signature::from_slice(&bytes).map_err(|e| SignatureError::MalformedSignature(e.to_string()))
}

impl SignatureVerifierPort for Ed25519SignatureVerifier {
    fn verify(
        &self,
        message: &str,
        signature: &str,
        signer: &WalletAddress,
    ) -> Result<bool, SignatureError> {
        let key = decode_key(signer)?;
        let signature = decode_signature(signature)?;
        Ok(key.verify(message.as_bytes(), &signature).is_ok())
    }
}

/// Test helpers for producing signed proofs.
#[cfg(test)]
pub(crate) mod test_keys {
    use ed25519_dalek::{Signer, SigningKey};

    use heroquest_domain::WalletAddress;

    pub fn signing_key(seed: u8) -> SigningKey {
        SigningKey::from_bytes(&[seed; 32])
    }

    pub fn address_of(key: &SigningKey) -> WalletAddress {
        WalletAddress::new(format!("0x{}", hex::encode(key.verifying_key().to_bytes())))
            .expect("hex key is never blank")
    }

    pub fn sign_hex(key: &SigningKey, message: &str) -> String {
        hex::encode(key.sign(message.as_bytes()).to_bytes())
    }
}
