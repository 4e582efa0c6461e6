//! [`TableRow`] implementations for the account tables.

use super::error::AccountError;
use crate::framework::TableRow;
use crate::model::{
    NewPrice, NewProduct, NewSubscription, NewUser, Onboarding, Price, PriceId, Product,
    ProductId, Subscription, SubscriptionId, UserId, UserProfile,
};
use async_trait::async_trait;

#[async_trait]
impl TableRow for UserProfile {
    const TABLE: &'static str = "users";
    const ID_PREFIX: &'static str = "u";
    type Id = UserId;
    type Insert = NewUser;
    type Filter = ();
    type Context = ();
    type Error = AccountError;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn from_insert(id: UserId, params: NewUser) -> Result<Self, AccountError> {
        Ok(Self {
            id,
            full_name: params.full_name,
            is_admin: params.is_admin,
        })
    }
}

#[async_trait]
impl TableRow for Onboarding {
    const TABLE: &'static str = "onboarding";
    const ID_PREFIX: &'static str = "";
    type Id = UserId;
    type Insert = ();
    type Filter = ();
    type Context = ();
    type Error = AccountError;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn from_insert(_id: UserId, _params: ()) -> Result<Self, AccountError> {
        Err(AccountError::KeyedByUser(Self::TABLE))
    }
}

#[async_trait]
impl TableRow for Product {
    const TABLE: &'static str = "products";
    const ID_PREFIX: &'static str = "prod_";
    type Id = ProductId;
    type Insert = NewProduct;
    /// `active` flag.
    type Filter = bool;
    type Context = ();
    type Error = AccountError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn matches(&self, active: &bool) -> bool {
        self.active == *active
    }

    fn from_insert(id: ProductId, params: NewProduct) -> Result<Self, AccountError> {
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            active: params.active,
        })
    }
}

#[async_trait]
impl TableRow for Price {
    const TABLE: &'static str = "prices";
    const ID_PREFIX: &'static str = "price_";
    type Id = PriceId;
    type Insert = NewPrice;
    type Filter = ProductId;
    type Context = ();
    type Error = AccountError;

    fn id(&self) -> &PriceId {
        &self.id
    }

    fn matches(&self, product_id: &ProductId) -> bool {
        &self.product_id == product_id
    }

    fn from_insert(id: PriceId, params: NewPrice) -> Result<Self, AccountError> {
        if params.unit_amount.is_some_and(|amount| amount < 0) {
            return Err(AccountError::InvalidPrice(format!(
                "negative amount for {}",
                params.product_id
            )));
        }
        Ok(Self {
            id,
            product_id: params.product_id,
            unit_amount: params.unit_amount,
            currency: params.currency.to_lowercase(),
            interval: params.interval,
            active: params.active,
        })
    }
}

#[async_trait]
impl TableRow for Subscription {
    const TABLE: &'static str = "subscriptions";
    const ID_PREFIX: &'static str = "sub_";
    type Id = SubscriptionId;
    type Insert = NewSubscription;
    type Filter = UserId;
    type Context = ();
    type Error = AccountError;

    fn id(&self) -> &SubscriptionId {
        &self.id
    }

    fn matches(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    fn from_insert(id: SubscriptionId, params: NewSubscription) -> Result<Self, AccountError> {
        Ok(Self {
            id,
            user_id: params.user_id,
            price_id: params.price_id,
            status: params.status,
        })
    }
}
