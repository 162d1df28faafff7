//! Push registration tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A push token delivered by the system, from either PushKit (VoIP) or APNS.
///
/// Immutable once created; one is built per registration callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    token: Vec<u8>,
    origin: Origin,
}

/// Service that issued a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Delivered by PushKit
    #[serde(rename = "PushKit")]
    PushKit,
    /// Delivered by APNS
    #[serde(rename = "APNS")]
    Apns,
}

impl Origin {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PushKit => "PushKit",
            Self::Apns => "APNS",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Token {
    /// Create a token from its raw bytes.
    pub fn new(token: impl Into<Vec<u8>>, origin: Origin) -> Self {
        Self {
            token: token.into(),
            origin,
        }
    }

    /// Raw token bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.token
    }

    /// Issuing service.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Lowercase hex encoding, the form push providers expect.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{token={}, origin={}}}", self.to_hex(), self.origin)
    }
}
