//! End-to-end delegate operations: list, add/update, remove, discover.
//!
//! Coordinates the chain registry, the wallet signer capability, and the
//! delegate service client. Each operation is independent: at most one
//! suspend on user approval followed by one suspend on the network call,
//! no internal retry, no shared mutable state. Callers that need ordering
//! across rapid mutations of the same delegate serialize those calls
//! themselves.

use std::sync::Arc;

use tracing::debug;

use safedel_chains::resolve_endpoint;
use safedel_delegate::{
    current_auth_window, delegate_auth_message, DelegateRecord, DelegateServiceClient,
};
use safedel_signer::WalletSigner;
use safedel_types::{Address, Result, SafedelError, Signature};

/// Explicit session context for one target Safe on one chain.
///
/// Replaces ambient connection state: callers build it once per Safe/chain
/// pair and pass it into every operation. Rebuild it after the wallet
/// switches networks.
#[derive(Debug, Clone, Copy)]
pub struct DelegateSession {
    pub safe: Address,
    pub chain_id: u64,
    pub service_base_url: &'static str,
}

/// Delegate operations engine bound to a connected wallet signer.
pub struct DelegateOps {
    signer: Arc<dyn WalletSigner>,
    request_timeout_ms: Option<u64>,
}

impl std::fmt::Debug for DelegateOps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateOps")
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl DelegateOps {
    /// Bind to a connected wallet. `None` means no signer capability is
    /// available and fails up front rather than at first use.
    pub fn connect(signer: Option<Arc<dyn WalletSigner>>) -> Result<Self> {
        let signer = signer.ok_or(SafedelError::SignerUnavailable)?;
        Ok(Self {
            signer,
            request_timeout_ms: None,
        })
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }

    /// Build the session context for a target Safe.
    ///
    /// Resolves the wallet's current chain against the registry; an
    /// unsupported chain fails here, before any network access, so the
    /// caller can prompt for a network switch.
    pub async fn session(&self, safe: Address) -> Result<DelegateSession> {
        let chain_id = self.signer.chain_id().await?;
        let service_base_url = resolve_endpoint(chain_id)?;
        Ok(DelegateSession {
            safe,
            chain_id,
            service_base_url,
        })
    }

    /// Fetch the delegates registered for the session's Safe.
    pub async fn list_delegates(&self, session: &DelegateSession) -> Result<Vec<DelegateRecord>> {
        self.client_for(session).list_delegates(&session.safe).await
    }

    /// Authorize a new delegate, or relabel an existing one (the server
    /// upserts). Signs a fresh credential for the current window.
    pub async fn add_delegate(
        &self,
        session: &DelegateSession,
        delegate: &Address,
        label: &str,
    ) -> Result<()> {
        let signature = self.sign_authorization(delegate).await?;
        self.client_for(session)
            .add_delegate(&session.safe, delegate, label, &signature)
            .await
    }

    /// Revoke a delegate. Also produces a well-formed signed request for a
    /// delegate the service has never seen; the outcome of that is the
    /// server's contract.
    pub async fn remove_delegate(
        &self,
        session: &DelegateSession,
        delegate: &Address,
    ) -> Result<()> {
        let signature = self.sign_authorization(delegate).await?;
        self.client_for(session)
            .remove_delegate(&session.safe, delegate, &signature)
            .await
    }

    /// Discover the Safes owned by the connected wallet account, so the
    /// caller can pick a target before building a session.
    pub async fn owned_safes(&self) -> Result<Vec<Address>> {
        let chain_id = self.signer.chain_id().await?;
        let service_base_url = resolve_endpoint(chain_id)?;
        DelegateServiceClient::new(service_base_url, self.request_timeout_ms)
            .safes_by_owner(&self.signer.address())
            .await
    }

    /// Obtain the wallet's signature over the authorization message for
    /// the current window, with the recovery byte normalized for the
    /// service-side verifier. The message is keyed to the delegate being
    /// mutated, not the Safe.
    pub async fn sign_authorization(&self, delegate: &Address) -> Result<Signature> {
        let window = current_auth_window();
        let message = delegate_auth_message(delegate, window);
        debug!(delegate = %delegate, window, "requesting delegate authorization signature");

        let signature = self.signer.sign_message(message.as_bytes()).await?;
        Ok(signature.normalize_v())
    }

    fn client_for(&self, session: &DelegateSession) -> DelegateServiceClient {
        DelegateServiceClient::new(session.service_base_url, self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safedel_signer::StaticSigner;

    fn owner() -> Address {
        Address::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap()
    }

    fn delegate() -> Address {
        Address::parse("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359").unwrap()
    }

    fn sig_with_v(v: u8) -> Signature {
        let mut bytes = [0x22; 65];
        bytes[64] = v;
        Signature::from_bytes(bytes)
    }

    fn ops_on_chain(chain_id: u64) -> DelegateOps {
        let signer = StaticSigner::new(owner(), chain_id, sig_with_v(0));
        DelegateOps::connect(Some(Arc::new(signer))).unwrap()
    }

    #[test]
    fn test_connect_without_signer_fails() {
        let err = DelegateOps::connect(None).unwrap_err();
        assert!(matches!(err, SafedelError::SignerUnavailable));
    }

    #[tokio::test]
    async fn test_session_resolves_supported_chain() {
        let session = ops_on_chain(1).session(owner()).await.unwrap();
        assert_eq!(session.chain_id, 1);
        assert_eq!(
            session.service_base_url,
            "https://safe-transaction-mainnet.safe.global"
        );
        assert_eq!(session.safe, owner());
    }

    #[tokio::test]
    async fn test_session_rejects_unsupported_chain() {
        let err = ops_on_chain(31337).session(owner()).await.unwrap_err();
        assert!(matches!(err, SafedelError::UnsupportedChain(31337)));
    }

    #[tokio::test]
    async fn test_authorization_normalizes_recovery_byte() {
        let signature = ops_on_chain(1)
            .sign_authorization(&delegate())
            .await
            .unwrap();
        assert_eq!(signature.v(), 27);
    }

    #[tokio::test]
    async fn test_signing_rejection_aborts_before_network() {
        let signer =
            StaticSigner::new(owner(), 1, sig_with_v(0)).rejecting("user denied signature");
        let ops = DelegateOps::connect(Some(Arc::new(signer))).unwrap();
        let session = ops.session(owner()).await.unwrap();

        // The signer rejects before any request is dispatched, so this
        // fails offline with the signer's own reason.
        let err = ops
            .add_delegate(&session, &delegate(), "ops bot")
            .await
            .unwrap_err();
        match err {
            SafedelError::SigningRejected(reason) => {
                assert_eq!(reason, "user denied signature")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
