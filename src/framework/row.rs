//! # TableRow Trait
//!
//! The `TableRow` trait is the contract every table (sections, lessons, users, …) implements
//! to be served by the generic [`TableActor`](crate::framework::TableActor). It fixes the id
//! type, the insert payload, the equality filter and the row-level hooks the store runs before
//! it accepts a write.
//!
//! # Provided Methods (Hooks)
//! - [`TableRow::order_index`] defaults to `0`, so unordered tables fall back to insertion order.
//! - [`TableRow::matches`] defaults to `true`.
//! - [`TableRow::on_insert`], [`TableRow::on_update`] and [`TableRow::on_delete`] default to
//!   `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any row type must implement to be stored by a `TableActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so a table can consult another table before accepting a
/// write (a lesson checks that its section exists). The `Context` carries those
/// dependencies and is injected when the actor starts, not when it is built.
#[async_trait]
pub trait TableRow: Clone + Debug + Send + Sync + 'static {
    /// Name of the table as the data service knows it.
    const TABLE: &'static str;

    /// Prefix of generated identifiers (`s` gives `s1`, `s2`, …).
    const ID_PREFIX: &'static str;

    /// The opaque identifier of a row.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<String>;

    /// The payload accepted by `insert`; the store assigns the id.
    type Insert: Clone + Send + Sync + Debug;

    /// Equality filter accepted by `select`. Use `()` when the table is never filtered.
    type Filter: Clone + Send + Sync + Debug;

    /// Dependencies injected into the hooks. Use `()` if none.
    type Context: Send + Sync;

    /// Row-level refusal type.
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Display ordering hint. Advisory only: neither unique nor contiguous.
    fn order_index(&self) -> i32 {
        0
    }

    /// Whether the row satisfies an equality filter.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    /// Build the canonical row from the store-assigned id and the payload.
    fn from_insert(id: Self::Id, params: Self::Insert) -> Result<Self, Self::Error>;

    /// Runs before a new row (insert or upsert) is stored.
    async fn on_insert(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Runs before `next` replaces the stored row.
    async fn on_update(&self, _next: &Self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Runs before the row is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
