//! Generic table plumbing for the data service.
//!
//! # Main Components
//!
//! - [`TableRow`] - Trait that row types implement to be stored and queried
//! - [`TableActor`] - In-process data service for one table
//! - [`TableClient`] - Typed handle used by screens and pages
//! - [`RemoteError`] - Failures of a single round trip
//!
//! # Testing
//!
//! See [`mock`] for scripted tables that count the requests they receive.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod row;

pub use actor::TableActor;
pub use client::TableClient;
pub use error::RemoteError;
pub use message::{Query, Response, TableRequest};
pub use row::TableRow;
