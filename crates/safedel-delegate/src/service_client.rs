//! HTTP client for the Safe transaction service delegate endpoints.
//!
//! Endpoints:
//! - GET /api/v1/safes/{safe}/delegates/
//! - POST /api/v1/safes/{safe}/delegates/
//! - DELETE /api/v1/safes/{safe}/delegates/{delegate}/
//! - GET /api/v1/owners/{owner}/safes/
//!
//! A failed signature check is only observable here as a non-2xx status on
//! a mutating endpoint; the client cannot detect it locally. No retries:
//! re-submitting a signed request within the same hour window is a policy
//! decision that belongs to the caller.

use std::time::Duration;

use tracing::debug;

use safedel_types::{Address, Result, SafedelError, Signature};

use crate::{
    add_delegate_request, list_delegates_request, owner_safes_request, remove_delegate_request,
    DelegateListResponse, DelegateRecord, HttpMethod, OwnerSafesResponse, RequestDescriptor,
};

/// Client for one resolved transaction-service instance.
pub struct DelegateServiceClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl DelegateServiceClient {
    pub fn new(base_url: &str, timeout_ms: Option<u64>) -> Self {
        let timeout_ms = timeout_ms.unwrap_or(30_000);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Fetch the delegates currently registered for a Safe.
    ///
    /// GET /api/v1/safes/{safe}/delegates/
    pub async fn list_delegates(&self, safe: &Address) -> Result<Vec<DelegateRecord>> {
        let request = list_delegates_request(&self.base_url, safe);
        let resp = self.execute(&request).await?;

        if !resp.status().is_success() {
            return Err(read_failure(resp).await);
        }

        let body: DelegateListResponse = resp
            .json()
            .await
            .map_err(|e| SafedelError::Network(format!("failed to parse delegate list: {}", e)))?;

        Ok(body.results)
    }

    /// Register or relabel a delegate. The server upserts.
    ///
    /// POST /api/v1/safes/{safe}/delegates/
    pub async fn add_delegate(
        &self,
        safe: &Address,
        delegate: &Address,
        label: &str,
        signature: &Signature,
    ) -> Result<()> {
        let request = add_delegate_request(&self.base_url, safe, delegate, label, signature);
        let resp = self.execute(&request).await?;

        if !resp.status().is_success() {
            return Err(verification_failure(resp).await);
        }
        Ok(())
    }

    /// Remove a delegate. The signature must verify against the current
    /// window; removal of an absent delegate is defined by the server.
    ///
    /// DELETE /api/v1/safes/{safe}/delegates/{delegate}/
    pub async fn remove_delegate(
        &self,
        safe: &Address,
        delegate: &Address,
        signature: &Signature,
    ) -> Result<()> {
        let request = remove_delegate_request(&self.base_url, safe, delegate, signature);
        let resp = self.execute(&request).await?;

        if !resp.status().is_success() {
            return Err(verification_failure(resp).await);
        }
        Ok(())
    }

    /// Fetch the Safes owned by a wallet address.
    ///
    /// GET /api/v1/owners/{owner}/safes/
    pub async fn safes_by_owner(&self, owner: &Address) -> Result<Vec<Address>> {
        let request = owner_safes_request(&self.base_url, owner);
        let resp = self.execute(&request).await?;

        if !resp.status().is_success() {
            return Err(read_failure(resp).await);
        }

        let body: OwnerSafesResponse = resp
            .json()
            .await
            .map_err(|e| SafedelError::Network(format!("failed to parse owner safes: {}", e)))?;

        Ok(body.safes)
    }

    async fn execute(&self, request: &RequestDescriptor) -> Result<reqwest::Response> {
        debug!(method = ?request.method, url = %request.url, "dispatching delegate service request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        builder
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SafedelError::Network(format!("delegate service request failed: {}", e)))
    }
}

/// Non-2xx on a mutating endpoint: the signature did not verify (or the
/// window expired); indistinguishable from here.
async fn verification_failure(resp: reqwest::Response) -> SafedelError {
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    SafedelError::SignatureVerification { status, message }
}

/// Non-2xx on a read endpoint.
async fn read_failure(resp: reqwest::Response) -> SafedelError {
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    SafedelError::Service { status, message }
}
