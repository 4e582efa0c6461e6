//! Plan cards and checkout.

use crate::model::{BillingInterval, Identity, Price, ProductId};
use crate::navigation::{error_redirect, Navigation, SIGN_UP_PATH};
use crate::pages::account::{CurrentSubscription, ProductWithPrices};
use crate::services::{PaymentsError, PaymentsService};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Subscribe,
    Manage,
}

impl PlanAction {
    pub fn label(self) -> &'static str {
        match self {
            PlanAction::Subscribe => "Subscribe",
            PlanAction::Manage => "Manage",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanCard {
    pub product_id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    /// Formatted amount, as in `$10` or `$12.5`.
    pub amount: String,
    /// Billing period shown after the amount.
    pub interval: BillingInterval,
    /// Set only on the subscribed product. Without a subscription no card is highlighted,
    /// rather than falling back to a named default plan.
    pub highlighted: bool,
    pub action: PlanAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PricingView {
    NoPlans,
    Plans {
        intervals: Vec<BillingInterval>,
        selected: BillingInterval,
        cards: Vec<PlanCard>,
    },
}

/// One-time prices bill once, so they are shown as `lifetime`.
fn interval_of(price: &Price) -> BillingInterval {
    price.interval.unwrap_or(BillingInterval::Lifetime)
}

/// Intervals offered by any price, in first-seen order.
pub fn offered_intervals(catalogue: &[ProductWithPrices]) -> Vec<BillingInterval> {
    let mut intervals = Vec::new();
    for interval in catalogue
        .iter()
        .flat_map(|entry| entry.prices.iter().map(interval_of))
    {
        if !intervals.contains(&interval) {
            intervals.push(interval);
        }
    }
    intervals
}

pub fn default_interval(offered: &[BillingInterval]) -> BillingInterval {
    [BillingInterval::Month, BillingInterval::Year]
        .into_iter()
        .find(|preferred| offered.contains(preferred))
        .or_else(|| offered.first().copied())
        .unwrap_or(BillingInterval::Month)
}

/// Builds the plan cards for `selected`, or the default interval when `None`.
pub fn pricing_view(
    catalogue: &[ProductWithPrices],
    subscription: Option<&CurrentSubscription>,
    selected: Option<BillingInterval>,
) -> PricingView {
    if catalogue.is_empty() {
        return PricingView::NoPlans;
    }
    let intervals = offered_intervals(catalogue);
    let selected = selected.unwrap_or_else(|| default_interval(&intervals));
    let subscribed_product = subscription.and_then(|current| current.product.as_ref());
    let action = if subscription.is_some() {
        PlanAction::Manage
    } else {
        PlanAction::Subscribe
    };

    let cards = catalogue
        .iter()
        .filter_map(|entry| {
            let price = entry
                .prices
                .iter()
                .find(|p| interval_of(p) == selected)
                .or_else(|| entry.prices.first())?;
            Some(PlanCard {
                product_id: entry.product.id.clone(),
                name: entry.product.name.clone(),
                description: entry.product.description.clone(),
                amount: format_price(price.unit_amount, &price.currency),
                interval: interval_of(price),
                highlighted: subscribed_product.is_some_and(|p| p.id == entry.product.id),
                action,
                price: price.clone(),
            })
        })
        .collect();

    PricingView::Plans {
        intervals,
        selected,
        cards,
    }
}

/// Formats minor units as an en-US currency amount with no forced decimals. Trailing zeros
/// of the cents are dropped, so 1250 renders as `$12.5`.
pub fn format_price(unit_amount: Option<i64>, currency: &str) -> String {
    let cents = unit_amount.unwrap_or(0);
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = group_thousands(cents / 100);
    let fraction = match cents % 100 {
        0 => String::new(),
        rest if rest % 10 == 0 => format!(".{}", rest / 10),
        rest => format!(".{rest:02}"),
    };
    let code = currency.to_uppercase();
    match code.as_str() {
        "USD" => format!("{sign}${whole}{fraction}"),
        "EUR" => format!("{sign}€{whole}{fraction}"),
        "GBP" => format!("{sign}£{whole}{fraction}"),
        _ => format!("{sign}{code} {whole}{fraction}"),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Starts checkout for `price` from the page at `current_path`.
#[instrument(skip(identity, payments, price), fields(price_id = %price.id))]
pub async fn checkout(
    identity: Option<&Identity>,
    payments: &dyn PaymentsService,
    price: &Price,
    current_path: &str,
) -> Navigation {
    if identity.is_none() {
        return Navigation::Redirect(SIGN_UP_PATH.to_string());
    }
    match payments.create_checkout_session(price, current_path).await {
        Ok(Some(session_id)) => {
            info!(%session_id, "Redirecting to checkout");
            Navigation::Checkout { session_id }
        }
        Ok(None) => {
            warn!("Checkout answered without a session");
            Navigation::Redirect(error_redirect(
                current_path,
                "An unknown error occurred.",
                "Please try again later or contact a system administrator.",
            ))
        }
        Err(PaymentsError::CheckoutRedirect(path)) => Navigation::Redirect(path),
        Err(e) => {
            warn!(error = %e, "Checkout failed");
            Navigation::Redirect(error_redirect(
                current_path,
                "An unknown error occurred.",
                &e.to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        PriceId, Product, Subscription, SubscriptionId, SubscriptionStatus, UserId,
    };
    use crate::services::SandboxPayments;
    use async_trait::async_trait;

    fn price(id: &str, product: &str, cents: i64, interval: Option<BillingInterval>) -> Price {
        Price {
            id: PriceId::from(id),
            product_id: ProductId::from(product),
            unit_amount: Some(cents),
            currency: "usd".into(),
            interval,
            active: true,
        }
    }

    fn entry(id: &str, prices: Vec<Price>) -> ProductWithPrices {
        ProductWithPrices {
            product: Product {
                id: ProductId::from(id),
                name: format!("Plan {id}"),
                description: None,
                active: true,
            },
            prices,
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(1000), "usd"), "$10");
        assert_eq!(format_price(Some(1250), "USD"), "$12.5");
        assert_eq!(format_price(Some(1010), "usd"), "$10.1");
        assert_eq!(format_price(Some(123_456), "usd"), "$1,234.56");
        assert_eq!(format_price(Some(5), "usd"), "$0.05");
        assert_eq!(format_price(Some(123_456_705), "usd"), "$1,234,567.05");
        assert_eq!(format_price(None, "eur"), "€0");
        assert_eq!(format_price(Some(999), "cad"), "CAD 9.99");
    }

    #[test]
    fn test_default_interval_prefers_month_then_year() {
        use BillingInterval::*;
        assert_eq!(default_interval(&[Year, Month]), Month);
        assert_eq!(default_interval(&[Week, Year]), Year);
        assert_eq!(default_interval(&[Week, Day]), Week);
        assert_eq!(default_interval(&[]), Month);
        assert_eq!(Week.label(), "Weekly");
    }

    #[test]
    fn test_cards_pick_interval_price_and_skip_empty_products() {
        let catalogue = vec![
            entry(
                "prod_1",
                vec![
                    price("price_1", "prod_1", 10000, Some(BillingInterval::Year)),
                    price("price_2", "prod_1", 1000, Some(BillingInterval::Month)),
                ],
            ),
            entry("prod_2", vec![price("price_3", "prod_2", 5000, None)]),
            entry("prod_3", vec![]),
        ];
        let PricingView::Plans {
            intervals,
            selected,
            cards,
        } = pricing_view(&catalogue, None, None)
        else {
            panic!("expected plans");
        };
        assert_eq!(
            intervals,
            vec![BillingInterval::Year, BillingInterval::Month, BillingInterval::Lifetime]
        );
        assert_eq!(selected, BillingInterval::Month);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].amount, "$10");
        assert_eq!(cards[1].price.id, PriceId::from("price_3"));
        assert_eq!(cards[1].interval, BillingInterval::Lifetime);
        assert!(cards.iter().all(|c| c.action == PlanAction::Subscribe && !c.highlighted));
    }

    #[test]
    fn test_subscribed_product_is_highlighted() {
        let catalogue = vec![
            entry("prod_1", vec![price("price_1", "prod_1", 1000, Some(BillingInterval::Month))]),
            entry("prod_2", vec![price("price_2", "prod_2", 2000, Some(BillingInterval::Month))]),
        ];
        let current = CurrentSubscription {
            subscription: Subscription {
                id: SubscriptionId::from("sub_1"),
                user_id: UserId::from("u1"),
                price_id: PriceId::from("price_2"),
                status: SubscriptionStatus::Active,
            },
            price: Some(catalogue[1].prices[0].clone()),
            product: Some(catalogue[1].product.clone()),
        };
        let PricingView::Plans { cards, .. } = pricing_view(&catalogue, Some(&current), None) else {
            panic!("expected plans");
        };
        let highlighted: Vec<bool> = cards.iter().map(|c| c.highlighted).collect();
        assert_eq!(highlighted, vec![false, true]);
        assert_eq!(cards[0].action.label(), "Manage");
        assert_eq!(pricing_view(&[], None, None), PricingView::NoPlans);
    }

    struct Silent;

    #[async_trait]
    impl PaymentsService for Silent {
        async fn create_checkout_session(
            &self,
            _price: &Price,
            _return_path: &str,
        ) -> Result<Option<String>, PaymentsError> {
            Ok(None)
        }

        async fn create_portal_session(&self, _return_path: &str) -> Result<String, PaymentsError> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_checkout_outcomes() {
        let identity = Identity {
            id: UserId::from("u1"),
            email: None,
        };
        let monthly = price("price_1", "prod_1", 1000, Some(BillingInterval::Month));
        let sandbox = SandboxPayments::new("https://billing.example.com", "http://localhost:3000");

        assert_eq!(
            checkout(None, &sandbox, &monthly, "/pricing").await,
            Navigation::Redirect("/signin/signup".into())
        );
        assert!(matches!(
            checkout(Some(&identity), &sandbox, &monthly, "/pricing").await,
            Navigation::Checkout { session_id } if session_id.starts_with("cs_")
        ));

        let inactive = Price {
            active: false,
            ..monthly.clone()
        };
        assert!(matches!(
            checkout(Some(&identity), &sandbox, &inactive, "/pricing").await,
            Navigation::Redirect(path) if path.starts_with("/pricing?error=Price%20unavailable")
        ));

        let unknown = concat!(
            "/pricing?error=An%20unknown%20error%20occurred.",
            "&error_description=Please%20try%20again%20later%20or%20",
            "contact%20a%20system%20administrator."
        );
        assert_eq!(
            checkout(Some(&identity), &Silent, &monthly, "/pricing").await,
            Navigation::Redirect(unknown.into())
        );
    }
}
