//! Starting, wiring and stopping the tables and services.

pub mod system;
pub mod tracing;

pub use system::{AdminSystem, SystemError};
