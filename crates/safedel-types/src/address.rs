//! EIP-55 checksummed account addresses.
//!
//! An address is exactly 20 bytes. Inputs are accepted in any hex casing;
//! output is always the mixed-case checksum form, so the string embedded in
//! a signed authorization message and the string sent on the wire cannot
//! diverge. Two addresses are equal iff their bytes match.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::{Result, SafedelError};

/// A 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a hex address (with or without 0x prefix) in any casing.
    pub fn parse(s: &str) -> Result<Self> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        if hex_str.len() != 40 {
            return Err(SafedelError::InvalidAddress(format!(
                "expected 40 hex chars, got {}",
                hex_str.len()
            )));
        }
        let bytes =
            hex::decode(hex_str).map_err(|e| SafedelError::InvalidAddress(e.to_string()))?;
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// EIP-55 mixed-case checksum string, 0x-prefixed.
    ///
    /// A hex letter is uppercased when the corresponding nibble of
    /// keccak256(lowercase_hex_without_prefix) is >= 8.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = SafedelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_vectors_from_json() {
        let data = include_str!("../../../tests/vectors/checksum_addresses.json");
        let vectors: Vec<serde_json::Value> = serde_json::from_str(data).unwrap();

        for v in &vectors {
            let input = v["input"].as_str().unwrap();
            let expected = v["checksum"].as_str().unwrap();

            let addr = Address::parse(input).unwrap();
            assert_eq!(
                addr.to_checksum(),
                expected,
                "checksum mismatch for '{}'",
                v["name"].as_str().unwrap()
            );
        }
    }

    #[test]
    fn test_checksum_is_idempotent() {
        let addr = Address::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let once = addr.to_checksum();
        let again = Address::parse(&once).unwrap().to_checksum();
        assert_eq!(once, again);
    }

    #[test]
    fn test_case_insensitive_equality() {
        let lower = Address::parse("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359").unwrap();
        let upper = Address::parse("0xFB6916095CA1DF60BB79CE92CE3EA74C37C5D359").unwrap();
        let mixed = Address::parse("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
        assert_eq!(lower.to_checksum(), mixed.to_checksum());
    }

    #[test]
    fn test_rejects_bad_length_and_non_hex() {
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("0xzz6916095ca1df60bb79ce92ce3ea74c37c5d359").is_err());
        assert!(Address::parse("").is_err());
    }

    #[test]
    fn test_serde_round_trip_uses_checksum_form() {
        let addr = Address::parse("0xde709f2102306220921060314715629080e2fb77").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0xde709f2102306220921060314715629080e2fb77\"");

        let back: Address = serde_json::from_str("\"0xDE709F2102306220921060314715629080E2FB77\"").unwrap();
        assert_eq!(back, addr);
    }
}
