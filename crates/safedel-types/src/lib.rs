//! Shared types for the Safe Delegate SDK.

use thiserror::Error;

pub mod address;
pub mod signature;

pub use address::Address;
pub use signature::Signature;

/// 0x-prefixed hex string (e.g. "0x1234...").
pub type Hex = String;

/// Safe Delegate SDK error types.
#[derive(Debug, Error)]
pub enum SafedelError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unsupported chain id: {0}")]
    UnsupportedChain(u64),

    #[error("no wallet signer connected")]
    SignerUnavailable,

    #[error("signing rejected: {0}")]
    SigningRejected(String),

    #[error("delegate service rejected signature (status {status}): {message}")]
    SignatureVerification { status: u16, message: String },

    #[error("delegate service returned status {status}: {message}")]
    Service { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}

pub type Result<T> = std::result::Result<T, SafedelError>;

/// Parse a hex string (with or without 0x prefix) to bytes.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(hex_str).map_err(|e| SafedelError::InvalidHex(e.to_string()))
}

/// Convert bytes to a 0x-prefixed hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> Hex {
    format!("0x{}", hex::encode(bytes))
}
