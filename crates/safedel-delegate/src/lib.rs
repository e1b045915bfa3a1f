//! Delegate authorization protocol for the Safe transaction service.
//!
//! - Compute the hour-granular authorization window
//! - Assemble the exact message bytes the wallet signs
//! - Build request descriptors for the delegate endpoints
//! - Execute them against a resolved service instance
//!
//! The authorization message is `checksum(delegate) + decimal(window)`,
//! signed by a Safe owner. The window changes once per hour and is known to
//! both sides without a handshake, which bounds replay of a captured
//! signature to roughly the current hour.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use safedel_types::{Address, Signature};

pub mod service_client;

pub use service_client::DelegateServiceClient;

/// Width of the authorization window in seconds.
pub const AUTH_WINDOW_SECS: u64 = 3600;

/// Authorization window for a wall-clock instant: `unix_seconds / 3600`.
///
/// Non-decreasing step function of time, step exactly one hour.
pub fn auth_window(unix_seconds: u64) -> u64 {
    unix_seconds / AUTH_WINDOW_SECS
}

/// Authorization window for the current system clock.
pub fn current_auth_window() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    auth_window(now)
}

/// The exact message a Safe owner signs to authorize a delegate mutation.
///
/// Checksum form of the delegate address concatenated with the decimal
/// window, no separator. The service recomputes both halves, so any casing
/// or whitespace deviation fails verification. The message is keyed to the
/// delegate being mutated, not the Safe, so one owner can authorize many
/// delegates without cross-authorization ambiguity.
pub fn delegate_auth_message(delegate: &Address, window: u64) -> String {
    format!("{}{}", delegate.to_checksum(), window)
}

/// One delegate entry as reported by the service. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateRecord {
    pub delegate: Address,
    pub delegator: Address,
    pub label: String,
}

/// Response of GET /api/v1/safes/{safe}/delegates/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegateListResponse {
    pub results: Vec<DelegateRecord>,
}

/// Response of GET /api/v1/owners/{owner}/safes/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSafesResponse {
    pub safes: Vec<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// A fully assembled service request: method, URL, JSON body.
///
/// Constructed fresh per operation and consumed by the single outgoing
/// HTTP call; never persisted.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

/// GET /api/v1/safes/{safe}/delegates/
pub fn list_delegates_request(base_url: &str, safe: &Address) -> RequestDescriptor {
    RequestDescriptor {
        method: HttpMethod::Get,
        url: format!(
            "{}/api/v1/safes/{}/delegates/",
            base_url.trim_end_matches('/'),
            safe.to_checksum()
        ),
        body: None,
    }
}

/// POST /api/v1/safes/{safe}/delegates/
///
/// The server upserts: a new delegate is created, an existing one gets its
/// label overwritten. `delegate` must render to the same checksum string
/// that went into the signed message.
pub fn add_delegate_request(
    base_url: &str,
    safe: &Address,
    delegate: &Address,
    label: &str,
    signature: &Signature,
) -> RequestDescriptor {
    RequestDescriptor {
        method: HttpMethod::Post,
        url: format!(
            "{}/api/v1/safes/{}/delegates/",
            base_url.trim_end_matches('/'),
            safe.to_checksum()
        ),
        body: Some(serde_json::json!({
            "safe": safe.to_checksum(),
            "delegate": delegate.to_checksum(),
            "signature": signature.to_hex(),
            "label": label,
        })),
    }
}

/// DELETE /api/v1/safes/{safe}/delegates/{delegate}/
pub fn remove_delegate_request(
    base_url: &str,
    safe: &Address,
    delegate: &Address,
    signature: &Signature,
) -> RequestDescriptor {
    RequestDescriptor {
        method: HttpMethod::Delete,
        url: format!(
            "{}/api/v1/safes/{}/delegates/{}/",
            base_url.trim_end_matches('/'),
            safe.to_checksum(),
            delegate.to_checksum()
        ),
        body: Some(serde_json::json!({
            "signature": signature.to_hex(),
        })),
    }
}

/// GET /api/v1/owners/{owner}/safes/
pub fn owner_safes_request(base_url: &str, owner: &Address) -> RequestDescriptor {
    RequestDescriptor {
        method: HttpMethod::Get,
        url: format!(
            "{}/api/v1/owners/{}/safes/",
            base_url.trim_end_matches('/'),
            owner.to_checksum()
        ),
        body: None,
    }
}
