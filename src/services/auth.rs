//! Current-identity lookup.

use crate::model::Identity;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

/// The hosted auth provider, reduced to the one call the screens need.
///
/// `current_identity` has no side effects and may be called any number of times.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn current_identity(&self) -> Result<Option<Identity>, AuthError>;
}

/// An in-process session: whoever signed in last is the current identity.
#[derive(Clone, Default)]
pub struct SessionAuth {
    current: Arc<RwLock<Option<Identity>>>,
}

impl SessionAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sign_in(&self, identity: Identity) {
        info!(user_id = %identity.id, "Signed in");
        *self.current.write().await = Some(identity);
    }

    pub async fn sign_out(&self) {
        if let Some(identity) = self.current.write().await.take() {
            info!(user_id = %identity.id, "Signed out");
        }
    }
}

#[async_trait]
impl AuthService for SessionAuth {
    async fn current_identity(&self) -> Result<Option<Identity>, AuthError> {
        Ok(self.current.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    #[tokio::test]
    async fn test_session_tracks_sign_in_and_out() {
        let auth = SessionAuth::new();
        assert_eq!(auth.current_identity().await.unwrap(), None);

        let identity = Identity {
            id: UserId::from("u1"),
            email: Some("tutor@example.com".into()),
        };
        auth.sign_in(identity.clone()).await;
        assert_eq!(auth.current_identity().await.unwrap(), Some(identity));

        auth.sign_out().await;
        assert!(auth.current_identity().await.unwrap().is_none());
    }
}
