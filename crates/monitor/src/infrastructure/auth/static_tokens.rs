use async_trait::async_trait;
use std::collections::HashMap;

use crate::application::ports::{AuthError, Identity, TokenVerifier};
use crate::infrastructure::config::TokenConfig;

/// Token verifier backed by a fixed table of tokens
pub struct StaticTokenVerifier {
    identities: HashMap<String, Identity>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self {
            identities: HashMap::new(),
        }
    }

    pub fn from_config(tokens: &[TokenConfig]) -> Self {
        let mut verifier = Self::new();
        for entry in tokens {
            verifier.register(
                entry.token.clone(),
                Identity::new(entry.email.clone(), entry.permissions.iter().copied()),
            );
        }
        verifier
    }

    /// Accept `token` as `identity`, replacing any previous registration
    pub fn register(&mut self, token: impl Into<String>, identity: Identity) {
        self.identities.insert(token.into(), identity);
    }

    pub fn with_token(mut self, token: impl Into<String>, identity: Identity) -> Self {
        self.register(token, identity);
        self
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl Default for StaticTokenVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        self.identities
            .get(token)
            .cloned()
            .ok_or(AuthError::UnknownToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Permission;

    #[tokio::test]
    async fn test_verify_known_token() {
        let verifier = StaticTokenVerifier::from_config(&[TokenConfig {
            token: "secret".to_string(),
            email: "john.doe@example.com".to_string(),
            permissions: vec![Permission::GetTrades],
        }]);

        let identity = verifier.verify("secret").await.unwrap();
        assert_eq!(identity.email, "john.doe@example.com");
        assert!(identity.has(Permission::GetTrades));
        assert!(!identity.has(Permission::PostTrades));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let verifier = StaticTokenVerifier::new().with_token(
            "secret",
            Identity::new("john.doe@example.com", Permission::reporter()),
        );

        assert_eq!(verifier.len(), 1);
        assert_eq!(
            verifier.verify("guess").await,
            Err(AuthError::UnknownToken)
        );
    }
}
