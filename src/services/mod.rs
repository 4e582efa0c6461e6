//! The hosted collaborators other than the data service: auth, blob storage and payments.
//! Each is a trait with one in-process implementation.

pub mod auth;
pub mod payments;
pub mod storage;

pub use auth::*;
pub use payments::*;
pub use storage::*;
