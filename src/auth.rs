use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use tracing::warn;

use crate::AppState;
use crate::errors::ApiError;

/// Resolves a bearer token to a user identifier.
///
/// This is the seam for the external authentication collaborator; the
/// bookmark handlers trust whatever identity comes out of it.
#[async_trait]
pub trait IdentityProvider: Clone + Send + Sync + 'static {
    async fn resolve(&self, token: &str) -> Option<String>;
}

/// Token table provisioned at startup, e.g. from the AUTH_TOKENS
/// environment variable ("token:user,token:user").
#[derive(Clone)]
pub struct StaticTokenAuth {
    tokens: Arc<HashMap<String, String>>,
}

impl StaticTokenAuth {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self {
            tokens: Arc::new(tokens),
        }
    }

    pub fn from_env(raw: &str) -> Self {
        let mut tokens = HashMap::new();
        for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
            match entry.trim().split_once(':') {
                Some((token, user)) if !token.is_empty() && !user.is_empty() => {
                    tokens.insert(token.to_string(), user.to_string());
                }
                _ => warn!(entry, "Skipping malformed AUTH_TOKENS entry"),
            }
        }

        if tokens.is_empty() {
            warn!("No auth tokens configured, every request will be rejected");
        }

        Self::new(tokens)
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenAuth {
    async fn resolve(&self, token: &str) -> Option<String> {
        self.tokens.get(token).cloned()
    }
}

/// The acting-user identity, extracted from the Authorization header
/// before any bookmark operation runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

impl<S: AppState> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let user = state
            .identity_provider()
            .resolve(token)
            .await
            .ok_or(ApiError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_known_token() {
        let auth = StaticTokenAuth::from_env("secret:alice,other:bob");

        assert_eq!(auth.resolve("secret").await.as_deref(), Some("alice"));
        assert_eq!(auth.resolve("other").await.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn rejects_unknown_token() {
        let auth = StaticTokenAuth::from_env("secret:alice");

        assert_eq!(auth.resolve("wrong").await, None);
    }

    #[tokio::test]
    async fn skips_malformed_entries() {
        let auth = StaticTokenAuth::from_env("secret:alice,garbage, :nouser");

        assert_eq!(auth.resolve("secret").await.as_deref(), Some("alice"));
        assert_eq!(auth.resolve("garbage").await, None);
    }
}
