//! # Auto-Dispatcher
//!
//! The outbound half of the system. A service owns an [`AutoSender`] and
//! implements [`AutoSend`]; each outbound method then becomes a one-liner
//! that derives its pattern and forwards its argument to the client:
//!
//! ```rust
//! use pattern_framework::{AutoSend, AutoSendOptions, AutoSender, DispatchError, ReplyOf};
//! use pattern_framework::mock::MockClient;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct OrdersService {
//!     sender: AutoSender<MockClient>,
//! }
//!
//! impl AutoSend for OrdersService {
//!     type Client = MockClient;
//!     fn sender(&self) -> &AutoSender<MockClient> {
//!         &self.sender
//!     }
//! }
//!
//! impl OrdersService {
//!     fn create(&self, id: u32) -> Result<ReplyOf<Self>, DispatchError> {
//!         self.auto_send("create", id)
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = Arc::new(MockClient::new());
//! client.expect_send("orders.create").return_ok(json!({ "ok": true }));
//!
//! let options = AutoSendOptions::new("orderClient");
//! let service = OrdersService {
//!     sender: AutoSender::new::<OrdersService>(options).with_client(client.clone()),
//! };
//! let reply = service.create(42).unwrap().await.unwrap();
//! assert_eq!(reply, json!({ "ok": true }));
//! assert_eq!(client.sent()[0].payload, json!({ "id": 42 }));
//! # }
//! ```
//!
//! ## Replace vs wrap
//!
//! [`AutoSend::auto_send`] *replaces* the method: dispatch is all it does.
//! [`AutoSend::auto_send_with`] *wraps* it: the method's own body runs
//! first and whatever it returns is what gets sent. A body error stops the
//! call before anything reaches the client.

use crate::client::ClientProxy;
use crate::error::DispatchError;
use crate::pattern::{conventional_name_of, MessagePattern, SERVICE_SUFFIX};
use crate::payload::to_payload;
use serde::Serialize;
use std::fmt::{self, Display};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Configuration of an [`AutoSender`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSendOptions {
    /// Name of the slot holding the client, reported when it is unbound.
    pub client_property: &'static str,
}

impl AutoSendOptions {
    pub const fn new(client_property: &'static str) -> Self {
        Self { client_property }
    }
}

/// Completion handle produced by the client of service `S`.
pub type ReplyOf<S> = <<S as AutoSend>::Client as ClientProxy>::Reply;

/// Derives outbound patterns and forwards payloads to a bound client.
///
/// The conventional resource name (type name minus `Service`, lowercased)
/// is computed once, in [`new`](Self::new). The client may be supplied up
/// front with [`with_client`](Self::with_client) or bound later with
/// [`bind`](Self::bind); sending through an unbound sender fails with
/// [`DispatchError::MissingClient`].
pub struct AutoSender<C: ClientProxy> {
    options: AutoSendOptions,
    client: Option<Arc<C>>,
    conventional_name: String,
}

impl<C: ClientProxy> AutoSender<C> {
    /// Creates an unbound sender for the service type `S`.
    pub fn new<S: ?Sized + 'static>(options: AutoSendOptions) -> Self {
        Self {
            options,
            client: None,
            conventional_name: conventional_name_of::<S>(SERVICE_SUFFIX),
        }
    }

    pub fn with_client(mut self, client: Arc<C>) -> Self {
        self.bind(client);
        self
    }

    /// Binds (or rebinds) the client slot.
    pub fn bind(&mut self, client: Arc<C>) {
        debug!(property = self.options.client_property, "Client bound");
        self.client = Some(client);
    }

    pub fn is_bound(&self) -> bool {
        self.client.is_some()
    }

    pub fn options(&self) -> AutoSendOptions {
        self.options
    }

    pub fn client(&self) -> Option<&Arc<C>> {
        self.client.as_ref()
    }

    /// The explicit `service_name` if set and non-empty, else the
    /// conventional name.
    pub fn resource_name<'a>(&'a self, service_name: Option<&'a str>) -> &'a str {
        match service_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.conventional_name,
        }
    }

    pub fn pattern(&self, service_name: Option<&str>, method: &str) -> MessagePattern {
        MessagePattern::new(self.resource_name(service_name), method)
    }

    /// Sends `arg` under the derived pattern and returns the client's reply
    /// handle without awaiting it.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::MissingClient`] if no client is bound.
    /// - [`DispatchError::InvalidPayload`] if `arg` does not serialize.
    ///
    /// In both cases nothing is sent.
    #[instrument(level = "debug", skip(self, arg))]
    pub fn send<P: Serialize>(
        &self,
        service_name: Option<&str>,
        method: &str,
        arg: P,
    ) -> Result<C::Reply, DispatchError> {
        let client = self.bound_client()?;
        let pattern = self.pattern(service_name, method);
        let payload = to_payload(arg)?;
        debug!(%pattern, ?payload, "Sending");
        Ok(client.send(&pattern, payload))
    }

    /// Runs `body` on `arg` and sends what it returns.
    ///
    /// The client slot is checked before `body` runs, so a missing client
    /// never triggers the body's side effects.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send), plus [`DispatchError::Rejected`] when `body`
    /// fails.
    #[instrument(level = "debug", skip(self, arg, body))]
    pub fn send_with<P, Q, E, F>(
        &self,
        service_name: Option<&str>,
        method: &str,
        arg: P,
        body: F,
    ) -> Result<C::Reply, DispatchError>
    where
        F: FnOnce(P) -> Result<Q, E>,
        Q: Serialize,
        E: Display,
    {
        let client = self.bound_client()?;
        let pattern = self.pattern(service_name, method);
        let outgoing = body(arg).map_err(|e| {
            warn!(%pattern, error = %e, "Call rejected");
            DispatchError::Rejected(e.to_string())
        })?;
        let payload = to_payload(outgoing)?;
        debug!(%pattern, ?payload, "Sending");
        Ok(client.send(&pattern, payload))
    }

    fn bound_client(&self) -> Result<&Arc<C>, DispatchError> {
        self.client.as_ref().ok_or_else(|| {
            warn!(property = self.options.client_property, "Client not bound");
            DispatchError::MissingClient {
                property: self.options.client_property,
            }
        })
    }
}

impl<C: ClientProxy> fmt::Debug for AutoSender<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoSender")
            .field("options", &self.options)
            .field("bound", &self.is_bound())
            .field("conventional_name", &self.conventional_name)
            .finish()
    }
}

/// Implemented by services whose outbound methods dispatch through an
/// [`AutoSender`].
pub trait AutoSend {
    type Client: ClientProxy;

    fn sender(&self) -> &AutoSender<Self::Client>;

    /// Explicit resource name overriding the naming convention.
    fn service_name(&self) -> Option<&str> {
        None
    }

    /// Replace mode: sends `arg` as the payload of `method`.
    fn auto_send<P: Serialize>(&self, method: &str, arg: P) -> Result<ReplyOf<Self>, DispatchError> {
        self.sender().send(self.service_name(), method, arg)
    }

    /// Wrap mode: runs `body` on `arg`, then sends its output.
    fn auto_send_with<P, Q, E, F>(
        &self,
        method: &str,
        arg: P,
        body: F,
    ) -> Result<ReplyOf<Self>, DispatchError>
    where
        F: FnOnce(P) -> Result<Q, E>,
        Q: Serialize,
        E: Display,
    {
        self.sender()
            .send_with(self.service_name(), method, arg, body)
    }
}
