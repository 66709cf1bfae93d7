//! # Observability & Tracing
//!
//! The framework logs through `tracing` with structured fields. The
//! [`setup_tracing`] function installs a compact subscriber for binaries.
//!
//! ## What Gets Traced
//!
//! - **Registration**: every handler registered, with its derived `pattern`
//! - **Bus Lifecycle**: startup, shutdown and the number of requests served
//! - **Dispatch**: each outbound send (`Sending pattern=... payload=...`) and
//!   each inbound dispatch at `debug`
//! - **Errors**: unbound clients (`property`), unknown patterns and handler
//!   failures at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=debug cargo run
//!
//! # Filter to the framework only
//! RUST_LOG=pattern_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a single request shows up as:
//!
//! ```text
//! DEBUG send{service_name=None method="find_one"}: Sending pattern=users.find_one payload=Object {"id": Number(1)}
//! DEBUG Dispatch pattern=users.find_one payload=Object {"id": Number(1)}
//! ```

/// Initializes the tracing subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Patterns already say where a line comes from
        .compact()
        .init();
}
