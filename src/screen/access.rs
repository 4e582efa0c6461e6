//! Admin capability check, run once per screen activation.

use crate::framework::TableClient;
use crate::model::UserProfile;
use crate::services::AuthService;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Outcome of the admin check.
///
/// `Unresolved` is the state before the check finishes and is treated exactly like
/// `Denied`: no mutating control is usable until the check says `Allowed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Access {
    #[default]
    Unresolved,
    Allowed,
    Denied,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        self == Access::Allowed
    }
}

/// Resolves the current identity, then its admin flag. Every failure resolves to `Denied`.
#[derive(Clone)]
pub struct AccessGate {
    auth: Arc<dyn AuthService>,
    users: TableClient<UserProfile>,
}

impl AccessGate {
    pub fn new(auth: Arc<dyn AuthService>, users: TableClient<UserProfile>) -> Self {
        Self { auth, users }
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self) -> Access {
        let identity = match self.auth.current_identity().await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                debug!("No identity");
                return Access::Denied;
            }
            Err(e) => {
                warn!(error = %e, "Identity lookup failed");
                return Access::Denied;
            }
        };

        match self.users.get(identity.id.clone()).await {
            Ok(Some(profile)) if profile.is_admin => Access::Allowed,
            Ok(Some(_)) => {
                debug!(user_id = %identity.id, "Not an admin");
                Access::Denied
            }
            Ok(None) => {
                warn!(user_id = %identity.id, "No profile for identity");
                Access::Denied
            }
            Err(e) => {
                warn!(user_id = %identity.id, error = %e, "Admin flag lookup failed");
                Access::Denied
            }
        }
    }
}
