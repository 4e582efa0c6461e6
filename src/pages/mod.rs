//! The signed-in pages around the admin screens: onboarding, account and pricing.

pub mod account;
pub mod onboarding;
pub mod pricing;

pub use account::{AccountPage, AccountState, AccountView, CurrentSubscription, ProductWithPrices};
pub use onboarding::{NameForm, OnboardingPage, OnboardingState};
pub use pricing::{checkout, format_price, PlanAction, PlanCard, PricingView};

use crate::framework::RemoteError;
use crate::services::AuthError;

pub const PORTAL_ERROR: &str =
    "Could not create billing portal. Please try again later or contact support.";

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Please enter your name")]
    EmptyName,
    #[error("Could not create billing portal. Please try again later or contact support.")]
    Portal,
}
