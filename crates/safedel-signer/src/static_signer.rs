//! Fixed-response signer for testing and ephemeral use.

use async_trait::async_trait;

use safedel_types::{Address, Result, SafedelError, Signature};

use crate::WalletSigner;

/// Signer that returns canned values instead of driving a wallet UI.
pub struct StaticSigner {
    address: Address,
    chain_id: u64,
    signature: Signature,
    reject_with: Option<String>,
}

impl StaticSigner {
    pub fn new(address: Address, chain_id: u64, signature: Signature) -> Self {
        Self {
            address,
            chain_id,
            signature,
            reject_with: None,
        }
    }

    /// Make every `sign_message` call fail as a user rejection.
    pub fn rejecting(mut self, reason: impl Into<String>) -> Self {
        self.reject_with = Some(reason.into());
        self
    }
}

#[async_trait]
impl WalletSigner for StaticSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.chain_id)
    }

    async fn sign_message(&self, _message: &[u8]) -> Result<Signature> {
        match &self.reject_with {
            Some(reason) => Err(SafedelError::SigningRejected(reason.clone())),
            None => Ok(self.signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> StaticSigner {
        let address = Address::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let signature = Signature::from_bytes([0x11; 65]);
        StaticSigner::new(address, 1, signature)
    }

    #[tokio::test]
    async fn test_returns_canned_signature() {
        let s = signer();
        assert_eq!(s.chain_id().await.unwrap(), 1);
        let sig = s.sign_message(b"anything").await.unwrap();
        assert_eq!(sig, Signature::from_bytes([0x11; 65]));
    }

    #[tokio::test]
    async fn test_rejection_surfaces_verbatim() {
        let s = signer().rejecting("user denied message signature");
        let err = s.sign_message(b"anything").await.unwrap_err();
        match err {
            SafedelError::SigningRejected(reason) => {
                assert_eq!(reason, "user denied message signature")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
