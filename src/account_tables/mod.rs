//! Tables behind sign-in, onboarding and billing: `users`, `onboarding`, `products`,
//! `prices` and `subscriptions`.
//!
//! None of them has an admin screen. They are read by the access check and the account
//! pages and written by onboarding.

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{TableActor, TableClient};
use crate::model::{Onboarding, Price, Product, Subscription, UserProfile};

/// Clients of every account table.
#[derive(Clone)]
pub struct AccountClients {
    pub users: TableClient<UserProfile>,
    pub onboarding: TableClient<Onboarding>,
    pub products: TableClient<Product>,
    pub prices: TableClient<Price>,
    pub subscriptions: TableClient<Subscription>,
}

/// Unstarted actors of every account table.
pub struct AccountActors {
    pub users: TableActor<UserProfile>,
    pub onboarding: TableActor<Onboarding>,
    pub products: TableActor<Product>,
    pub prices: TableActor<Price>,
    pub subscriptions: TableActor<Subscription>,
}

/// Creates the account table actors and their clients.
pub fn new(buffer_size: usize) -> (AccountActors, AccountClients) {
    let (users, users_client) = TableActor::new(buffer_size);
    let (onboarding, onboarding_client) = TableActor::new(buffer_size);
    let (products, products_client) = TableActor::new(buffer_size);
    let (prices, prices_client) = TableActor::new(buffer_size);
    let (subscriptions, subscriptions_client) = TableActor::new(buffer_size);

    (
        AccountActors {
            users,
            onboarding,
            products,
            prices,
            subscriptions,
        },
        AccountClients {
            users: users_client,
            onboarding: onboarding_client,
            products: products_client,
            prices: prices_client,
            subscriptions: subscriptions_client,
        },
    )
}
