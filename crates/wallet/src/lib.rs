//! Wallet bridge seam: account enumeration, signer resolution, and the
//! active-account session shared by page controllers.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::domain::{Account, ActorId, WalletSource};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("wallet extension '{0}' is not installed")]
    ExtensionMissing(WalletSource),
    #[error("wallet extension '{0}' denied the signing request")]
    Unauthorized(WalletSource),
    #[error("no key for address {address} in extension '{wallet}'")]
    UnknownAddress {
        wallet: WalletSource,
        address: ActorId,
    },
    #[error("signing failed: {0}")]
    Other(String),
}

/// Capability object able to authorize a transaction on behalf of an
/// account held by one signing extension.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    fn source(&self) -> WalletSource;
    async fn sign(&self, address: &ActorId, payload: &[u8]) -> Result<Vec<u8>, SignerError>;
}

#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<Account>>;
    async fn resolve_signer(
        &self,
        source: WalletSource,
    ) -> Result<Arc<dyn TransactionSigner>, SignerError>;
}

pub struct MissingWalletProvider;

#[async_trait]
impl WalletProvider for MissingWalletProvider {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Err(anyhow!("wallet bridge is unavailable"))
    }

    async fn resolve_signer(
        &self,
        source: WalletSource,
    ) -> Result<Arc<dyn TransactionSigner>, SignerError> {
        Err(SignerError::ExtensionMissing(source))
    }
}

/// In-memory wallet with deterministic non-cryptographic signatures. Stands
/// in for the browser extension bridge in the console demo and in tests.
pub struct DevWalletProvider {
    accounts: Vec<Account>,
}

impl DevWalletProvider {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Two-account wallet exposed through the `polkadot-js` source.
    pub fn with_dev_accounts() -> Self {
        Self::new(vec![
            Account {
                address: ActorId::from(
                    "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d",
                ),
                source: WalletSource::PolkadotJs,
                name: Some("alice".to_string()),
            },
            Account {
                address: ActorId::from(
                    "0x8eaf04151687736326c9fea17e25fc5287613693c912909cb226aa4794f26a48",
                ),
                source: WalletSource::PolkadotJs,
                name: Some("bob".to_string()),
            },
        ])
    }
}

#[async_trait]
impl WalletProvider for DevWalletProvider {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    async fn resolve_signer(
        &self,
        source: WalletSource,
    ) -> Result<Arc<dyn TransactionSigner>, SignerError> {
        let addresses: Vec<ActorId> = self
            .accounts
            .iter()
            .filter(|account| account.source == source)
            .map(|account| account.address.clone())
            .collect();

        if addresses.is_empty() {
            return Err(SignerError::ExtensionMissing(source));
        }

        Ok(Arc::new(DevSigner { source, addresses }))
    }
}

struct DevSigner {
    source: WalletSource,
    addresses: Vec<ActorId>,
}

#[async_trait]
impl TransactionSigner for DevSigner {
    fn source(&self) -> WalletSource {
        self.source
    }

    async fn sign(&self, address: &ActorId, payload: &[u8]) -> Result<Vec<u8>, SignerError> {
        if !self.addresses.contains(address) {
            return Err(SignerError::UnknownAddress {
                wallet: self.source,
                address: address.clone(),
            });
        }

        // Tagged payload echo; enough for loopback round-trips.
        let mut signature = Vec::with_capacity(payload.len() + 4);
        signature.extend_from_slice(b"dev:");
        signature.extend_from_slice(payload);
        Ok(signature)
    }
}

/// Active-account selection shared by every page of the app. The page
/// controller only ever reads the selection; switching accounts is the
/// presentation layer's concern.
pub struct AccountSession {
    provider: Arc<dyn WalletProvider>,
    active: RwLock<Option<Account>>,
}

impl AccountSession {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            provider,
            active: RwLock::new(None),
        }
    }

    pub async fn accounts(&self) -> Result<Vec<Account>> {
        self.provider.list_accounts().await
    }

    pub async fn active(&self) -> Option<Account> {
        self.active.read().await.clone()
    }

    pub async fn select(&self, address: &str) -> Result<Account> {
        let accounts = self.provider.list_accounts().await?;
        let account = accounts
            .into_iter()
            .find(|account| account.address.as_str() == address)
            .ok_or_else(|| anyhow!("no wallet account with address {address}"))?;

        info!(address = %account.address, source = %account.source, "selected wallet account");
        *self.active.write().await = Some(account.clone());
        Ok(account)
    }

    /// Restore the selection remembered from a previous run, falling back
    /// to the first listed account.
    pub async fn restore(&self, remembered: Option<&str>) -> Result<Option<Account>> {
        if let Some(address) = remembered {
            match self.select(address).await {
                Ok(account) => return Ok(Some(account)),
                Err(err) => {
                    tracing::warn!(%address, %err, "remembered account unavailable");
                }
            }
        }

        let accounts = self.provider.list_accounts().await?;
        let Some(first) = accounts.into_iter().next() else {
            return Ok(None);
        };

        *self.active.write().await = Some(first.clone());
        Ok(Some(first))
    }

    pub async fn clear(&self) {
        *self.active.write().await = None;
    }

    pub async fn signer_for(
        &self,
        account: &Account,
    ) -> Result<Arc<dyn TransactionSigner>, SignerError> {
        self.provider.resolve_signer(account.source).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
