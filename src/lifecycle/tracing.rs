//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden; table actors tag their lines with a `table` field
//! and screen actions run inside `#[instrument]` spans instead.
//!
//! ```bash
//! # Lifecycle, writes and failures
//! RUST_LOG=info cargo run
//!
//! # Every request with its payload, plus validation refusals
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a section create reads:
//!
//! ```text
//! INFO activate{table="sections"}: Screen activated access=Allowed
//! INFO table="sections" id=s1 size=1 Inserted
//! INFO apply{table="sections"}: Created id=s1
//! ```
//!
//! Remote failures are logged at `warn` by whichever side observed them.

/// Initialises the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
