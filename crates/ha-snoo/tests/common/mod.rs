//! Shared helpers for the Snoo integration tests

#![allow(dead_code)]

mod fixtures;
mod mock_snoo;
mod test_hass;

pub use fixtures::*;
pub use mock_snoo::*;
pub use test_hass::*;

/// Install a log subscriber honoring `RUST_LOG`; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
