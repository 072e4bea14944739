use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Scope an access token must carry for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "get:trades")]
    GetTrades,
    #[serde(rename = "post:trades")]
    PostTrades,
    #[serde(rename = "patch:trades")]
    PatchTrades,
    #[serde(rename = "delete:trades")]
    DeleteTrades,
    #[serde(rename = "get:violations")]
    GetViolations,
    #[serde(rename = "get:all-trades")]
    GetAllTrades,
    #[serde(rename = "get:all-violations")]
    GetAllViolations,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::GetTrades => "get:trades",
            Permission::PostTrades => "post:trades",
            Permission::PatchTrades => "patch:trades",
            Permission::DeleteTrades => "delete:trades",
            Permission::GetViolations => "get:violations",
            Permission::GetAllTrades => "get:all-trades",
            Permission::GetAllViolations => "get:all-violations",
        }
    }

    /// Scopes of a reporting employee
    pub fn reporter() -> Vec<Permission> {
        vec![
            Permission::GetTrades,
            Permission::PostTrades,
            Permission::PatchTrades,
            Permission::DeleteTrades,
            Permission::GetViolations,
        ]
    }

    /// Scopes of a compliance officer: everything
    pub fn compliance_officer() -> Vec<Permission> {
        let mut all = Self::reporter();
        all.extend([Permission::GetAllTrades, Permission::GetAllViolations]);
        all
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller resolved from an access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// E-mail address; trades are reported under it
    pub email: String,
    pub permissions: HashSet<Permission>,
}

impl Identity {
    pub fn new(
        email: impl Into<String>,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        Self {
            email: email.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    pub fn require(&self, permission: Permission) -> Result<(), AuthError> {
        if self.has(permission) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is missing.")]
    MissingHeader,

    #[error("The Authorization headers' value is missing 'Bearer', must be 'Bearer <token>'.")]
    MissingBearer,

    #[error("The Authorization headers' value is missing a token, must be 'Bearer <token>'.")]
    MissingToken,

    #[error("The Authorization headers' value contains too much, must be 'Bearer <token>'.")]
    TooManyParts,

    #[error("Provided token is not recognised.")]
    UnknownToken,

    #[error("You are not permitted to access the requested resource.")]
    Forbidden,
}

impl AuthError {
    /// Whether the caller failed to authenticate (as opposed to lacking a scope)
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, AuthError::Forbidden)
    }
}

/// Port resolving bearer tokens to identities
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.map(str::trim).filter(|h| !h.is_empty());
    let parts: Vec<&str> = header.ok_or(AuthError::MissingHeader)?.split_whitespace().collect();

    if !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingBearer);
    }
    match parts.len() {
        1 => Err(AuthError::MissingToken),
        2 => Ok(parts[1]),
        _ => Err(AuthError::TooManyParts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(Some("Bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(Some("bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(None), Err(AuthError::MissingHeader));
        assert_eq!(bearer_token(Some("  ")), Err(AuthError::MissingHeader));
        assert_eq!(bearer_token(Some("Basic abc")), Err(AuthError::MissingBearer));
        assert_eq!(bearer_token(Some("Bearer")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Bearer a b")), Err(AuthError::TooManyParts));
    }

    #[test]
    fn test_permission_names_round_trip() {
        for p in Permission::compliance_officer() {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
            assert_eq!(serde_json::from_str::<Permission>(&json).unwrap(), p);
        }
    }

    #[test]
    fn test_identity_require() {
        let identity = Identity::new("john.doe@example.com", Permission::reporter());
        assert!(identity.require(Permission::GetViolations).is_ok());
        assert_eq!(
            identity.require(Permission::GetAllViolations),
            Err(AuthError::Forbidden)
        );
    }
}
