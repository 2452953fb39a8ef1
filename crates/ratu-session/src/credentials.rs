//! Credential collaborator: API key plus Ed25519 logon signing.
//!
//! The signing capability is deliberately narrow: it signs exactly the
//! logon payload (MsgType, comp IDs, sequence number, sending time
//! joined by SOH) and nothing else. The private key never leaves this
//! module.

use crate::error::{SessionError, SessionResult};
use base64::Engine;
use ed25519_dalek::pkcs8::DecodePrivateKey;
use ed25519_dalek::{Signer, SigningKey};
use std::path::Path;
use zeroize::Zeroizing;

/// Fields covered by the logon signature, in signing order.
#[derive(Debug)]
pub struct LogonPayload<'a> {
    pub msg_type: &'a str,
    pub sender_comp_id: &'a str,
    pub target_comp_id: &'a str,
    pub msg_seq_num: u64,
    pub sending_time: &'a str,
}

impl LogonPayload<'_> {
    /// Byte layout the venue verifies: the five fields joined by SOH.
    fn to_bytes(&self) -> Vec<u8> {
        let parts = [
            self.msg_type.to_string(),
            self.sender_comp_id.to_string(),
            self.target_comp_id.to_string(),
            self.msg_seq_num.to_string(),
            self.sending_time.to_string(),
        ];
        parts.join("\x01").into_bytes()
    }
}

/// API key identifier plus the Ed25519 key that authenticates logons.
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    signing_key: SigningKey,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl ApiCredentials {
    pub fn new(api_key: String, signing_key: SigningKey) -> Self {
        Self {
            api_key,
            signing_key,
        }
    }

    /// Load the Ed25519 private key from a PKCS#8 PEM file.
    pub fn from_pem_file(api_key: String, path: impl AsRef<Path>) -> SessionResult<Self> {
        let pem = Zeroizing::new(std::fs::read_to_string(path.as_ref())?);
        let signing_key = SigningKey::from_pkcs8_pem(&pem)
            .map_err(|e| SessionError::InvalidKey(e.to_string()))?;
        Ok(Self::new(api_key, signing_key))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a logon payload; returns the base64 signature carried in
    /// RawData (96).
    pub fn sign_logon(&self, payload: &LogonPayload<'_>) -> String {
        let signature = self.signing_key.sign(&payload.to_bytes());
        base64::engine::general_purpose::STANDARD.encode(signature.to_bytes())
    }
}
