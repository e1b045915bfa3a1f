//! Static chain registry: network name, chain id, transaction-service URL.
//!
//! The table is the total supported-chain universe. Resolution is a pure
//! lookup; an unknown chain id means the caller must prompt the user to
//! switch networks, not retry.

use serde::Serialize;

use safedel_types::{Result, SafedelError};

/// One supported network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkEntry {
    pub name: &'static str,
    pub chain_id: u64,
    pub service_base_url: &'static str,
}

/// Supported networks, in declaration order. Chain ids are unique.
pub const NETWORKS: &[NetworkEntry] = &[
    NetworkEntry {
        name: "mainnet",
        chain_id: 1,
        service_base_url: "https://safe-transaction-mainnet.safe.global",
    },
    NetworkEntry {
        name: "rinkeby",
        chain_id: 4,
        service_base_url: "https://safe-transaction.rinkeby.gnosis.io",
    },
    NetworkEntry {
        name: "goerli",
        chain_id: 5,
        service_base_url: "https://safe-transaction-goerli.safe.global",
    },
    NetworkEntry {
        name: "optimism",
        chain_id: 10,
        service_base_url: "https://safe-transaction-optimism.safe.global",
    },
    NetworkEntry {
        name: "binance",
        chain_id: 56,
        service_base_url: "https://safe-transaction-bsc.safe.global",
    },
    NetworkEntry {
        name: "xdai",
        chain_id: 100,
        service_base_url: "https://safe-transaction-gnosis-chain.safe.global",
    },
    NetworkEntry {
        name: "matic",
        chain_id: 137,
        service_base_url: "https://safe-transaction-polygon.safe.global",
    },
    NetworkEntry {
        name: "fantom",
        chain_id: 250,
        service_base_url: "https://safe.fantom.network",
    },
    NetworkEntry {
        name: "evmos",
        chain_id: 9001,
        service_base_url: "https://transaction.safe.evmos.org",
    },
    NetworkEntry {
        name: "arbitrum",
        chain_id: 42161,
        service_base_url: "https://safe-transaction-arbitrum.safe.global",
    },
    NetworkEntry {
        name: "avalanche",
        chain_id: 43114,
        service_base_url: "https://safe-transaction-avalanche.safe.global",
    },
    NetworkEntry {
        name: "sepolia",
        chain_id: 11155111,
        service_base_url: "https://safe-transaction-sepolia.safe.global",
    },
    NetworkEntry {
        name: "aurora",
        chain_id: 1313161554,
        service_base_url: "https://safe-transaction-aurora.safe.global",
    },
];

/// All supported networks, in deterministic declaration order.
pub fn supported_chains() -> &'static [NetworkEntry] {
    NETWORKS
}

/// Look up the full entry for a chain id.
pub fn entry_for_chain(chain_id: u64) -> Option<&'static NetworkEntry> {
    NETWORKS.iter().find(|n| n.chain_id == chain_id)
}

/// Resolve the transaction-service base URL for a chain id.
pub fn resolve_endpoint(chain_id: u64) -> Result<&'static str> {
    entry_for_chain(chain_id)
        .map(|n| n.service_base_url)
        .ok_or(SafedelError::UnsupportedChain(chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_chain_ids_are_unique() {
        let mut seen = HashSet::new();
        for entry in supported_chains() {
            assert!(
                seen.insert(entry.chain_id),
                "duplicate chain id {}",
                entry.chain_id
            );
        }
    }

    #[test]
    fn test_every_supported_chain_resolves() {
        for entry in supported_chains() {
            let url = resolve_endpoint(entry.chain_id).unwrap();
            assert_eq!(url, entry.service_base_url);
            assert!(url.starts_with("https://"));
            assert!(!url.ends_with('/'));
        }
    }

    #[test]
    fn test_unknown_chain_is_unsupported() {
        let err = resolve_endpoint(31337).unwrap_err();
        assert!(matches!(err, SafedelError::UnsupportedChain(31337)));
    }

    #[test]
    fn test_order_is_deterministic() {
        let first: Vec<u64> = supported_chains().iter().map(|n| n.chain_id).collect();
        let second: Vec<u64> = supported_chains().iter().map(|n| n.chain_id).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], 1);
    }

    #[test]
    fn test_entry_for_chain_maps_to_name() {
        assert_eq!(entry_for_chain(137).unwrap().name, "matic");
        assert_eq!(entry_for_chain(11155111).unwrap().name, "sepolia");
        assert!(entry_for_chain(0).is_none());
    }

    #[test]
    fn test_entry_serializes_for_display() {
        let entry = entry_for_chain(1).unwrap();
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["name"], "mainnet");
        assert_eq!(json["chain_id"], 1);
        assert_eq!(
            json["service_base_url"],
            "https://safe-transaction-mainnet.safe.global"
        );
    }
}
