//! First-visit name form.

use crate::framework::{RemoteError, TableClient};
use crate::model::{Onboarding, UserId, UserProfile};
use crate::navigation::{Navigation, ACCOUNT_PATH, SIGN_IN_PATH};
use crate::pages::PageError;
use crate::services::AuthService;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The name form for a signed-in user who has not finished onboarding.
#[derive(Debug, Clone, PartialEq)]
pub struct NameForm {
    pub user_id: UserId,
    pub name: String,
    existing: Option<Onboarding>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingState {
    Redirect(Navigation),
    Form(NameForm),
}

pub struct OnboardingPage {
    auth: Arc<dyn AuthService>,
    users: TableClient<UserProfile>,
    onboarding: TableClient<Onboarding>,
}

impl OnboardingPage {
    pub fn new(
        auth: Arc<dyn AuthService>,
        users: TableClient<UserProfile>,
        onboarding: TableClient<Onboarding>,
    ) -> Self {
        Self {
            auth,
            users,
            onboarding,
        }
    }

    /// Sends anonymous visitors to sign in and finished users to their account.
    /// A failed onboarding lookup shows the form.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<OnboardingState, PageError> {
        let Some(identity) = self.auth.current_identity().await? else {
            return Ok(OnboardingState::Redirect(Navigation::Redirect(
                SIGN_IN_PATH.to_string(),
            )));
        };

        let existing = match self.onboarding.get(identity.id.clone()).await {
            Ok(row) => row,
            Err(e) => {
                warn!(user_id = %identity.id, error = %e, "Onboarding lookup failed");
                None
            }
        };
        if existing.as_ref().is_some_and(|row| row.completed) {
            return Ok(OnboardingState::Redirect(Navigation::Redirect(
                ACCOUNT_PATH.to_string(),
            )));
        }

        Ok(OnboardingState::Form(NameForm {
            user_id: identity.id,
            name: String::new(),
            existing,
        }))
    }

    /// Saves the name, marks onboarding complete and moves on to the account page.
    ///
    /// Only the name update can fail the submission. A failed onboarding write is logged and
    /// the user still moves on.
    #[instrument(skip(self, form), fields(user_id = %form.user_id))]
    pub async fn submit(&self, form: &NameForm) -> Result<Navigation, PageError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(PageError::EmptyName);
        }

        let mut profile = self
            .users
            .get(form.user_id.clone())
            .await?
            .ok_or_else(|| RemoteError::NotFound(form.user_id.to_string()))?;
        profile.full_name = Some(name.to_string());
        self.users.update(profile).await?;

        let mut record = Onboarding::completed_student(form.user_id.clone());
        if let Some(existing) = &form.existing {
            record.student_name = existing.student_name.clone();
        }
        if let Err(e) = self.onboarding.upsert(record).await {
            warn!(error = %e, "Onboarding record not saved");
        } else {
            info!("Onboarding completed");
        }

        Ok(Navigation::Redirect(ACCOUNT_PATH.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTable;
    use crate::model::Identity;
    use crate::services::SessionAuth;

    async fn signed_in() -> Arc<SessionAuth> {
        let auth = Arc::new(SessionAuth::new());
        auth.sign_in(Identity {
            id: UserId::from("u1"),
            email: Some("ada@example.com".into()),
        })
        .await;
        auth
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::from("u1"),
            full_name: None,
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_anonymous_visitor_goes_to_sign_in() {
        let users = MockTable::<UserProfile>::new();
        let onboarding = MockTable::<Onboarding>::new();
        let page = OnboardingPage::new(
            Arc::new(SessionAuth::new()),
            users.client(),
            onboarding.client(),
        );

        let state = page.load().await.unwrap();
        assert_eq!(state, OnboardingState::Redirect(Navigation::Redirect("/signin".into())));
        assert_eq!(onboarding.request_count(), 0);
    }

    #[tokio::test]
    async fn test_completed_user_goes_to_account() {
        let users = MockTable::<UserProfile>::new();
        let mut onboarding = MockTable::<Onboarding>::new();
        onboarding
            .expect_get()
            .return_ok(Some(Onboarding::completed_student(UserId::from("u1"))));
        let page = OnboardingPage::new(signed_in().await, users.client(), onboarding.client());

        let state = page.load().await.unwrap();
        assert_eq!(state, OnboardingState::Redirect(Navigation::Redirect("/account".into())));
        onboarding.verify();
    }

    #[tokio::test]
    async fn test_failed_onboarding_write_still_moves_on() {
        let mut users = MockTable::<UserProfile>::new();
        let mut onboarding = MockTable::<Onboarding>::new();
        onboarding.expect_get().return_ok(None);
        users.expect_get().return_ok(Some(profile()));
        users.expect_update().return_ok(UserProfile {
            full_name: Some("Ada".into()),
            ..profile()
        });
        onboarding
            .expect_upsert()
            .return_err(RemoteError::Unavailable("down".into()));
        let page = OnboardingPage::new(signed_in().await, users.client(), onboarding.client());

        let OnboardingState::Form(mut form) = page.load().await.unwrap() else {
            panic!("expected the name form");
        };
        form.name = " Ada ".into();
        assert_eq!(
            page.submit(&form).await.unwrap(),
            Navigation::Redirect("/account".into())
        );
        users.verify();
        onboarding.verify();
    }

    #[tokio::test]
    async fn test_failed_name_update_aborts() {
        let mut users = MockTable::<UserProfile>::new();
        let onboarding = MockTable::<Onboarding>::new();
        users.expect_get().return_ok(Some(profile()));
        users
            .expect_update()
            .return_err(RemoteError::Unavailable("down".into()));
        let page = OnboardingPage::new(signed_in().await, users.client(), onboarding.client());
        let form = NameForm {
            user_id: UserId::from("u1"),
            name: "Ada".into(),
            existing: None,
        };

        assert!(matches!(page.submit(&form).await, Err(PageError::Remote(_))));
        assert_eq!(onboarding.request_count(), 0);

        let blank = NameForm {
            name: "   ".into(),
            ..form
        };
        assert!(matches!(page.submit(&blank).await, Err(PageError::EmptyName)));
        assert_eq!(users.request_count(), 2);
    }
}
