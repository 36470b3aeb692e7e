//! pixedit CLI - interactive photo editor and image tools
//!
//! - `controller` - the menu-driven editing loop
//! - `input` - parsing of menu selections and numeric answers

pub mod controller;
pub mod input;

pub use controller::{Controller, State};

/// Initialize tracing for CLI binaries.
///
/// Logs go to stderr so prompts on stdout stay readable. `RUST_LOG` overrides
/// `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
