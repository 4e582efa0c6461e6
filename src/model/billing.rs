//! Catalogue and subscription rows mirrored from the payments processor.

use crate::model::{PriceId, ProductId, SubscriptionId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Day,
    Week,
    Month,
    Year,
    Lifetime,
}

impl BillingInterval {
    /// Short form used after a price, as in `$10/month`.
    pub fn as_str(self) -> &'static str {
        match self {
            BillingInterval::Day => "day",
            BillingInterval::Week => "week",
            BillingInterval::Month => "month",
            BillingInterval::Year => "year",
            BillingInterval::Lifetime => "lifetime",
        }
    }

    /// Label of the billing toggle.
    pub fn label(self) -> &'static str {
        match self {
            BillingInterval::Day => "Daily",
            BillingInterval::Week => "Weekly",
            BillingInterval::Month => "Monthly",
            BillingInterval::Year => "Yearly",
            BillingInterval::Lifetime => "Lifetime",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: PriceId,
    pub product_id: ProductId,
    /// Amount in minor currency units (cents).
    pub unit_amount: Option<i64>,
    pub currency: String,
    /// `None` for one-time prices.
    pub interval: Option<BillingInterval>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPrice {
    pub product_id: ProductId,
    pub unit_amount: Option<i64>,
    pub currency: String,
    pub interval: Option<BillingInterval>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    Canceled,
    Incomplete,
    IncompleteExpired,
    PastDue,
    Unpaid,
    Paused,
}

impl SubscriptionStatus {
    /// Whether the subscription currently grants access.
    pub fn is_current(self) -> bool {
        matches!(self, SubscriptionStatus::Trialing | SubscriptionStatus::Active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub price_id: PriceId,
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubscription {
    pub user_id: UserId,
    pub price_id: PriceId,
    pub status: SubscriptionStatus,
}
