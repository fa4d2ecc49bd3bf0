use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::credential::{Credential, LoginError};

// Source of credential material for a named login context.
// Background refresh, if any, is the provider's business.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn login(&self, context: &str) -> Result<Credential, LoginError>;
}

/// In-memory provider keyed by login context name.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialProvider {
    contexts: HashMap<String, Credential>,
}

impl StaticCredentialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, name: impl Into<String>, credential: Credential) -> Self {
        self.contexts.insert(name.into(), credential);
        self
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn login(&self, context: &str) -> Result<Credential, LoginError> {
        self.contexts
            .get(context)
            .cloned()
            .ok_or_else(|| LoginError::UnknownContext(context.to_owned()))
    }
}

/// Logged-in credentials for both sides, created at most once each.
///
/// Concurrent first callers wait on a single login; a failed login leaves the
/// slot empty so the next caller tries again.
pub struct LoginCache {
    provider: Arc<dyn CredentialProvider>,
    client_context: String,
    server_context: String,
    client: OnceCell<Arc<Credential>>,
    server: OnceCell<Arc<Credential>>,
}

impl LoginCache {
    pub fn new(
        provider: Arc<dyn CredentialProvider>,
        client_context: impl Into<String>,
        server_context: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            client_context: client_context.into(),
            server_context: server_context.into(),
            client: OnceCell::new(),
            server: OnceCell::new(),
        }
    }

    pub async fn client_credential(&self) -> Result<Arc<Credential>, LoginError> {
        Self::get_or_login(&self.client, self.provider.as_ref(), &self.client_context).await
    }

    pub async fn server_credential(&self) -> Result<Arc<Credential>, LoginError> {
        Self::get_or_login(&self.server, self.provider.as_ref(), &self.server_context).await
    }

    async fn get_or_login(
        cell: &OnceCell<Arc<Credential>>,
        provider: &dyn CredentialProvider,
        context: &str,
    ) -> Result<Arc<Credential>, LoginError> {
        if let Some(credential) = cell.get() {
            return Ok(credential.clone());
        }

        let credential = cell
            .get_or_try_init(|| async {
                debug!(context, "logging in");
                let credential = provider.login(context).await?;
                info!(context, principals = credential.principals().len(), "login succeeded");
                Ok::<_, LoginError>(Arc::new(credential))
            })
            .await?;

        Ok(credential.clone())
    }
}

impl std::fmt::Debug for LoginCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCache")
            .field("client_context", &self.client_context)
            .field("server_context", &self.server_context)
            .field("client_ready", &self.client.initialized())
            .field("server_ready", &self.server.initialized())
            .finish()
    }
}
