//! Wallet signer capability trait.
//!
//! The SDK never touches key material. Everything it needs from the host
//! wallet is behind `WalletSigner`: sign arbitrary bytes with the active
//! account's key, and report which account/chain is active. Concrete
//! backends (browser extension, hardware wallet, remote relay) implement
//! the trait outside this workspace; `StaticSigner` is provided for tests
//! and ephemeral use.

use async_trait::async_trait;

use safedel_types::{Address, Result, Signature};

pub mod static_signer;

pub use static_signer::StaticSigner;

/// Capability contract for the connected wallet.
///
/// `sign_message` blocks on user approval and is unbounded from the SDK's
/// perspective; a decline surfaces as `SigningRejected`.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Address of the active account.
    fn address(&self) -> Address;

    /// Chain id the wallet is currently connected to.
    async fn chain_id(&self) -> Result<u64>;

    /// Sign arbitrary bytes with the active account's key.
    async fn sign_message(&self, message: &[u8]) -> Result<Signature>;
}
