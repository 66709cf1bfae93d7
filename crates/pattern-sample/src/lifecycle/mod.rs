//! # System Lifecycle & Orchestration
//!
//! Wires controllers, services and the bus into one running system.
//!
//! ## Startup order
//!
//! 1. **Metadata**: explicit controller paths go into the
//!    [`MetadataRegistry`](pattern_framework::MetadataRegistry) before any
//!    pattern is derived.
//! 2. **Bus**: the bus is created first so its client can be handed to
//!    every service, including the ones `OrdersController` calls.
//! 3. **Routes**: controllers are registered with
//!    [`message_patterns!`](pattern_framework::message_patterns).
//! 4. **Run**: the router is handed to the bus loop (late binding).
//!
//! ## Shutdown
//!
//! `OrdersController` holds services, and services hold bus clients, so the
//! bus channel never closes by itself. [`PatternSystem::shutdown`] therefore
//! sends an explicit signal to
//! [`MessageBus::run_until`](pattern_framework::MessageBus::run_until) and
//! waits for the loop to finish.

pub mod pattern_system;

pub use pattern_system::*;
