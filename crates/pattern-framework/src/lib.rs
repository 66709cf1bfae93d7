//! # Pattern Framework
//!
//! This crate removes the naming boilerplate from a message-pattern
//! request/response layer. Every message travels under a routing key of the
//! form `"<resource>.<method>"`, and both ends of a call can derive that key
//! from the code they already have instead of spelling it out.
//!
//! ## The Two Conveniences
//!
//! ### Inbound: [`PatternRouter::auto_message_pattern`]
//!
//! Registers a controller method under a pattern derived from the
//! controller's explicit path (looked up in a [`MetadataRegistry`]) or, when
//! none is registered, from its type name:
//!
//! | Controller                       | Method     | Pattern              |
//! |----------------------------------|------------|----------------------|
//! | `UsersController`                | `find_all` | `users.find_all`     |
//! | `OrdersController` at `"billing"`| `create`   | `billing.create`     |
//!
//! ### Outbound: [`AutoSend::auto_send`]
//!
//! Turns a service method into a single dispatch through a [`ClientProxy`]:
//! the pattern comes from the service's explicit
//! [`service_name`](AutoSend::service_name) or its type name, and the first
//! argument becomes the payload. Primitives are wrapped as `{"id": value}`:
//!
//! | Service         | Call                       | Pattern          | Payload               |
//! |-----------------|----------------------------|------------------|-----------------------|
//! | `OrdersService` | `create(42)`               | `orders.create`  | `{"id": 42}`          |
//! | `OrdersService` | `update({"id":7,"n":"a"})` | `orders.update`  | `{"id":7,"n":"a"}`    |
//!
//! The dispatcher returns the client's reply handle as-is; it never awaits,
//! retries or caches.
//!
//! ## Architecture Overview
//!
//! 1. **Naming** ([`pattern`], [`metadata`]) - pure derivation of patterns
//! 2. **Inbound** ([`router`], [`handler`]) - the pattern → handler table
//! 3. **Outbound** ([`dispatch`], [`client`]) - the auto-dispatcher and its client seam
//! 4. **Plumbing** ([`bus`], [`message`]) - an in-process bus so both ends can meet
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that records what services
//! send, so outbound code can be tested without a bus.

pub mod bus;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod logging;
pub mod macros;
pub mod message;
pub mod metadata;
pub mod mock;
pub mod pattern;
pub mod payload;
pub mod router;

// Re-export core types for convenience
pub use bus::{BusClient, MessageBus};
pub use client::{ClientProxy, PendingReply};
pub use config::BusConfig;
pub use dispatch::{AutoSend, AutoSendOptions, AutoSender, ReplyOf};
pub use error::{DispatchError, RouterError, TransportError};
pub use handler::{HandlerError, MessageHandler};
pub use message::{BusRequest, Response};
pub use metadata::{MetadataRegistry, PATH_METADATA};
pub use pattern::MessagePattern;
pub use logging::setup_tracing;
pub use payload::{normalize_payload, to_payload};
pub use router::{controller_resource_name, derive_inbound_pattern, PatternRouter};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}
