//! Account page: profile, current plan, catalogue and the billing portal.

use crate::account_tables::AccountClients;
use crate::framework::{Query, RemoteError};
use crate::model::{Identity, Price, Product, Subscription, UserProfile};
use crate::navigation::{Navigation, ACCOUNT_PATH, SIGN_IN_PATH};
use crate::pages::PageError;
use crate::services::{AuthService, PaymentsService};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// The user's trialing or active subscription with the plan it is on.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSubscription {
    pub subscription: Subscription,
    pub price: Option<Price>,
    pub product: Option<Product>,
}

/// An active product with its active prices, cheapest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithPrices {
    pub product: Product,
    pub prices: Vec<Price>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountView {
    pub identity: Identity,
    pub profile: Option<UserProfile>,
    pub subscription: Option<CurrentSubscription>,
    pub catalogue: Vec<ProductWithPrices>,
    pub student_name: Option<String>,
}

impl AccountView {
    /// Headline of the "Your Plan" card.
    pub fn plan_summary(&self) -> String {
        match self
            .subscription
            .as_ref()
            .and_then(|current| current.product.as_ref())
        {
            Some(product) => format!("You are currently on the {} plan.", product.name),
            None => "You are not currently subscribed to any plan.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccountState {
    Redirect(Navigation),
    Loaded(Box<AccountView>),
}

pub struct AccountPage {
    auth: Arc<dyn AuthService>,
    tables: AccountClients,
    payments: Arc<dyn PaymentsService>,
}

impl AccountPage {
    pub fn new(
        auth: Arc<dyn AuthService>,
        tables: AccountClients,
        payments: Arc<dyn PaymentsService>,
    ) -> Self {
        Self {
            auth,
            tables,
            payments,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<AccountState, PageError> {
        let Some(identity) = self.auth.current_identity().await? else {
            return Ok(AccountState::Redirect(Navigation::Redirect(
                SIGN_IN_PATH.to_string(),
            )));
        };

        let (profile, subscription, catalogue, onboarding) = tokio::try_join!(
            self.tables.users.get(identity.id.clone()),
            self.current_subscription(&identity),
            self.catalogue(),
            self.tables.onboarding.get(identity.id.clone()),
        )?;
        debug!(
            subscribed = subscription.is_some(),
            products = catalogue.len(),
            "Account loaded"
        );

        Ok(AccountState::Loaded(Box::new(AccountView {
            identity,
            profile,
            subscription,
            catalogue,
            student_name: onboarding.and_then(|row| row.student_name),
        })))
    }

    async fn current_subscription(
        &self,
        identity: &Identity,
    ) -> Result<Option<CurrentSubscription>, RemoteError> {
        let subscriptions = self
            .tables
            .subscriptions
            .select(Query::filtered(identity.id.clone()))
            .await?;
        let Some(subscription) = subscriptions
            .into_iter()
            .find(|s| s.status.is_current())
        else {
            return Ok(None);
        };

        let price = self.tables.prices.get(subscription.price_id.clone()).await?;
        let product = match &price {
            Some(price) => self.tables.products.get(price.product_id.clone()).await?,
            None => None,
        };
        Ok(Some(CurrentSubscription {
            subscription,
            price,
            product,
        }))
    }

    /// Active products with their active prices. Products keep store order.
    pub async fn catalogue(&self) -> Result<Vec<ProductWithPrices>, RemoteError> {
        let products = self.tables.products.select(Query::filtered(true)).await?;
        let mut catalogue = Vec::with_capacity(products.len());
        for product in products {
            let mut prices: Vec<Price> = self
                .tables
                .prices
                .select(Query::filtered(product.id.clone()))
                .await?
                .into_iter()
                .filter(|p| p.active)
                .collect();
            prices.sort_by_key(|p| p.unit_amount.unwrap_or(0));
            catalogue.push(ProductWithPrices { product, prices });
        }
        Ok(catalogue)
    }

    /// Asks for a billing portal session that returns to the account page.
    #[instrument(skip(self))]
    pub async fn open_portal(&self) -> Result<Navigation, PageError> {
        match self.payments.create_portal_session(ACCOUNT_PATH).await {
            Ok(url) => Ok(Navigation::External(url)),
            Err(e) => {
                warn!(error = %e, "Billing portal unavailable");
                Err(PageError::Portal)
            }
        }
    }
}
