//! # Tutor Admin
//!
//! Admin back office of a tutoring service: the screens that let an administrator keep the
//! course catalogue (sections and their lessons) in order, plus the signed-in pages around
//! them (onboarding, account, pricing).
//!
//! ## Design
//!
//! ### Tables as actors
//! Each table of the data service is a [`TableActor<T>`](framework::TableActor) running in
//! its own Tokio task and reached through a cloneable [`TableClient<T>`](framework::TableClient).
//! Requests to one table are processed one at a time, so rows need no locks, while separate
//! tables run in parallel. Row types plug in through the [`TableRow`](framework::TableRow)
//! trait, whose async hooks may consult other tables (a lesson checks that its section
//! exists). Those dependencies are injected when the actor starts.
//!
//! ### Screens
//! [`AdminScreen<T>`](screen::AdminScreen) is written once and serves any
//! [`AdminResource`](screen::AdminResource). Every action first checks the admin flag
//! resolved on activation; a screen that is not `Allowed` never issues a remote call.
//! Actions are split into a request step returning a future and an apply step, so several
//! may be in flight at once without clobbering each other.
//!
//! ### Errors
//! One `thiserror` enum per concern: [`RemoteError`](framework::RemoteError) for the data
//! service, a row error per table, [`ScreenError`](screen::ScreenError) for screen actions
//! and [`PageError`](pages::PageError) for the pages. Screen errors are shown inline on the
//! control that caused them and never tear the screen down.
//!
//! ### Observability
//! `tracing` everywhere; see [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic table actor, client, messages and the
//!   [`MockTable`](framework::mock::MockTable) test double.
//! - [`model`]: plain rows, insert payloads and form drafts.
//! - [`section_table`], [`lesson_table`], [`account_tables`]: `TableRow` implementations.
//! - [`screen`]: access gate and the admin screens.
//! - [`pages`]: onboarding, account and pricing.
//! - [`services`]: auth, blob storage and payments.
//! - [`lifecycle`]: [`AdminSystem`](lifecycle::AdminSystem) and tracing setup.
//! - [`config`]: settings read from the environment.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod account_tables;
pub mod config;
pub mod framework;
pub mod lesson_table;
pub mod lifecycle;
pub mod model;
pub mod navigation;
pub mod pages;
pub mod screen;
pub mod section_table;
pub mod services;
