//! Binding issued tokens to the form render that received them.
//!
//! At render time the server binds the token and hands the client a *handle*
//! (sent back in a cookie). At submission time the handle is redeemed for the
//! token the submission must echo.

use crate::error::{CsrfError, Result};
use crate::token::CsrfToken;
use async_trait::async_trait;
use formguard_log::debug;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage for issued tokens.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Remember `token` and return the handle the client carries back.
    async fn bind(&self, token: &CsrfToken) -> Result<String>;

    /// Resolve a handle to the token issued with it.
    ///
    /// Returns `Ok(None)` for a handle the store does not know.
    async fn redeem(&self, handle: &str) -> Result<Option<CsrfToken>>;
}

#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    async fn bind(&self, token: &CsrfToken) -> Result<String> {
        (**self).bind(token).await
    }

    async fn redeem(&self, handle: &str) -> Result<Option<CsrfToken>> {
        (**self).redeem(handle).await
    }
}

/// Default number of outstanding form renders a [`MemoryTokenStore`] keeps.
pub const DEFAULT_MEMORY_CAPACITY: usize = 10_000;

#[derive(Debug, Default)]
struct Bindings {
    tokens: HashMap<String, CsrfToken>,
    // insertion order, oldest first
    order: VecDeque<String>,
}

/// Server-side map of form id to token.
///
/// Handles are random form ids. Redeeming removes the entry, so each handle
/// resolves at most once. At most `capacity` renders are outstanding; binding
/// past that evicts the oldest one.
#[derive(Debug, Clone)]
pub struct MemoryTokenStore {
    bindings: Arc<RwLock<Bindings>>,
    capacity: usize,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }

    /// A store holding at most `capacity` unredeemed tokens (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bindings: Arc::new(RwLock::new(Bindings::default())),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bound, not yet redeemed tokens.
    pub async fn len(&self) -> usize {
        self.bindings.read().await.tokens.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bindings.read().await.tokens.is_empty()
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn bind(&self, token: &CsrfToken) -> Result<String> {
        let form_id = uuid::Uuid::new_v4().to_string();
        let mut bindings = self.bindings.write().await;

        while bindings.tokens.len() >= self.capacity {
            let Some(oldest) = bindings.order.pop_front() else {
                break;
            };
            bindings.tokens.remove(&oldest);
            debug!(target: "formguard::csrf", "Evicted form {}", oldest);
        }

        bindings.tokens.insert(form_id.clone(), token.clone());
        bindings.order.push_back(form_id.clone());

        debug!(target: "formguard::csrf", "Bound token to form {}", form_id);
        Ok(form_id)
    }

    async fn redeem(&self, handle: &str) -> Result<Option<CsrfToken>> {
        let mut bindings = self.bindings.write().await;
        let token = bindings.tokens.remove(handle);
        match token {
            Some(_) => bindings.order.retain(|id| id != handle),
            None => debug!(target: "formguard::csrf", "Unknown form handle {}", handle),
        }
        Ok(token)
    }
}

/// Stateless binding: the handle is the token itself, signed with HMAC-SHA256.
///
/// Works across server instances sharing the secret. Handles are not
/// single-use.
#[derive(Clone)]
pub struct SignedTokenStore {
    secret: Arc<Vec<u8>>,
}

impl SignedTokenStore {
    /// The secret must be at least 32 bytes.
    pub fn new(secret: Vec<u8>) -> Result<Self> {
        if secret.len() < 32 {
            return Err(CsrfError::Internal(
                "Secret key must be at least 32 bytes".to_string(),
            ));
        }
        Ok(Self {
            secret: Arc::new(secret),
        })
    }
}

impl std::fmt::Debug for SignedTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedTokenStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenStore for SignedTokenStore {
    async fn bind(&self, token: &CsrfToken) -> Result<String> {
        token.encode(&self.secret)
    }

    async fn redeem(&self, handle: &str) -> Result<Option<CsrfToken>> {
        CsrfToken::decode(handle, &self.secret).map(Some)
    }
}
