//! Hosted checkout and billing-portal sessions.
//!
//! Subscription state lives with the processor. This crate only asks it for sessions and
//! sends the browser where it is told.

use crate::model::Price;
use crate::navigation::error_redirect;
use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentsError {
    /// The processor refused the checkout and named a page to continue on.
    #[error("Checkout refused, continue at {0}")]
    CheckoutRedirect(String),
    #[error("Could not create billing portal: {0}")]
    Portal(String),
    #[error("Payments unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Returns the checkout session id. `Ok(None)` means the processor answered without one.
    async fn create_checkout_session(
        &self,
        price: &Price,
        return_path: &str,
    ) -> Result<Option<String>, PaymentsError>;

    /// Returns the URL of a customer billing portal that comes back to `return_path`.
    async fn create_portal_session(&self, return_path: &str) -> Result<String, PaymentsError>;
}

/// A processor stand-in that issues random session ids and refuses inactive prices.
pub struct SandboxPayments {
    portal_base_url: String,
    site_url: String,
}

impl SandboxPayments {
    pub fn new(portal_base_url: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            portal_base_url: portal_base_url.into().trim_end_matches('/').to_string(),
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaymentsService for SandboxPayments {
    async fn create_checkout_session(
        &self,
        price: &Price,
        return_path: &str,
    ) -> Result<Option<String>, PaymentsError> {
        if !price.active {
            warn!(price_id = %price.id, "Checkout for inactive price");
            return Err(PaymentsError::CheckoutRedirect(error_redirect(
                return_path,
                "Price unavailable",
                "This plan can no longer be purchased.",
            )));
        }
        let session_id = format!("cs_{}", Uuid::new_v4().simple());
        info!(price_id = %price.id, %session_id, "Checkout session created");
        Ok(Some(session_id))
    }

    async fn create_portal_session(&self, return_path: &str) -> Result<String, PaymentsError> {
        let url = format!(
            "{}/p/session/{}?return_url={}{}",
            self.portal_base_url,
            Uuid::new_v4().simple(),
            self.site_url,
            return_path
        );
        info!(%url, "Portal session created");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BillingInterval, PriceId, ProductId};

    fn price(active: bool) -> Price {
        Price {
            id: PriceId::from("price_1"),
            product_id: ProductId::from("prod_1"),
            unit_amount: Some(1500),
            currency: "usd".into(),
            interval: Some(BillingInterval::Month),
            active,
        }
    }

    #[tokio::test]
    async fn test_sandbox_checkout() {
        let payments = SandboxPayments::new("https://billing.example.com", "http://localhost:3000");
        let session = payments
            .create_checkout_session(&price(true), "/account")
            .await
            .unwrap();
        assert!(session.unwrap().starts_with("cs_"));

        let refused = payments
            .create_checkout_session(&price(false), "/account")
            .await;
        assert!(matches!(
            refused,
            Err(PaymentsError::CheckoutRedirect(path)) if path.starts_with("/account?error=")
        ));
    }

    #[tokio::test]
    async fn test_sandbox_portal_returns_to_site() {
        let payments =
            SandboxPayments::new("https://billing.example.com/", "http://localhost:3000");
        let url = payments.create_portal_session("/account").await.unwrap();
        assert!(url.starts_with("https://billing.example.com/p/session/"));
        assert!(url.ends_with("return_url=http://localhost:3000/account"));
    }
}
