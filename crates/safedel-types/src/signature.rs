//! 65-byte ECDSA signatures (r, s, v) and recovery-byte normalization.
//!
//! Wallet backends disagree on the recovery byte convention: some return
//! v in {0, 1}, others in {27, 28}. The transaction service's recovery
//! verifier expects the latter, so every signature is normalized before it
//! goes on the wire.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{bytes_to_hex, hex_to_bytes, Hex, Result, SafedelError};

/// Lowest v value the service-side verifier accepts.
pub const MIN_VALID_V: u8 = 27;

/// A 65-byte ECDSA signature: r (32) || s (32) || v (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 65]);

impl Signature {
    pub fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// Parse a hex signature (with or without 0x prefix).
    pub fn parse(s: &str) -> Result<Self> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        if hex_str.len() != 130 {
            return Err(SafedelError::InvalidHex(format!(
                "expected 130 hex chars for signature, got {}",
                hex_str.len()
            )));
        }
        let bytes = hex_to_bytes(hex_str)?;
        let mut out = [0u8; 65];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// The recovery byte.
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// Upgrade a low-range recovery byte (< 27) by 27; leave anything
    /// already at or above 27 untouched. Blind additive correction, not a
    /// validation: a v outside both conventions still reaches the server
    /// and fails verification there.
    pub fn normalize_v(mut self) -> Self {
        if self.0[64] < MIN_VALID_V {
            self.0[64] += MIN_VALID_V;
        }
        self
    }

    /// 0x-prefixed hex encoding (130 hex chars).
    pub fn to_hex(&self) -> Hex {
        bytes_to_hex(&self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
