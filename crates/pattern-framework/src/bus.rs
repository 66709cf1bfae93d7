//! # In-Process Message Bus
//!
//! This module connects outbound calls to inbound handlers without any
//! network in between. It follows the actor shape: a [`MessageBus`] owns
//! the receiving end of a channel, and any number of cloned [`BusClient`]s
//! hold the sending end.
//!
//! ```rust
//! use pattern_framework::{BusConfig, HandlerError, MessageBus, MessagePattern, PatternRouter};
//! use serde_json::{json, Value};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut router = PatternRouter::new();
//! router
//!     .register("math.double", |payload: Value| async move {
//!         let n = payload["id"].as_i64().unwrap_or_default();
//!         Ok::<_, HandlerError>(json!(n * 2))
//!     })
//!     .unwrap();
//!
//! let (bus, client) = MessageBus::new(BusConfig::default());
//! tokio::spawn(bus.run(router));
//!
//! let reply = client
//!     .request(MessagePattern::from("math.double"), json!({ "id": 21 }))
//!     .await
//!     .unwrap();
//! assert_eq!(reply, json!(42));
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! The bus loop only receives. Each request is dispatched on its own task
//! against a shared, read-only router, so a handler may itself call other
//! patterns through a `BusClient` without deadlocking the loop.
//!
//! ## Shutdown
//!
//! When every `BusClient` is dropped the channel closes, [`MessageBus::run`]
//! logs the number of requests served and returns. If handlers keep clients
//! of their own, the channel never closes; use [`MessageBus::run_until`]
//! with an explicit shutdown signal instead.

use crate::client::{ClientProxy, PendingReply};
use crate::config::BusConfig;
use crate::error::TransportError;
use crate::message::BusRequest;
use crate::pattern::MessagePattern;
use crate::router::PatternRouter;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

/// The receiving half of the bus.
pub struct MessageBus {
    receiver: mpsc::Receiver<BusRequest>,
}

impl MessageBus {
    /// Creates a new `MessageBus` and its associated `BusClient`.
    ///
    /// # Returns
    ///
    /// A tuple containing:
    /// 1. The `MessageBus` instance, which must be run via `.run()`.
    /// 2. The `BusClient` instance, which can be cloned and shared to send requests.
    pub fn new(config: BusConfig) -> (Self, BusClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size.max(1));
        (Self { receiver }, BusClient::new(sender))
    }

    /// Runs the bus loop until every client has been dropped.
    ///
    /// The router is injected here rather than in [`new`](Self::new) so that
    /// handlers can hold clones of the bus client (late binding).
    pub async fn run(self, router: PatternRouter) {
        self.run_until(router, std::future::pending()).await
    }

    /// Like [`run`](Self::run), but also stops when `shutdown` completes.
    ///
    /// Needed when handlers hold bus clients themselves: the channel then
    /// never closes on its own.
    pub async fn run_until(mut self, router: PatternRouter, shutdown: impl Future<Output = ()>) {
        let router = Arc::new(router);
        let mut served: u64 = 0;
        info!(patterns = router.len(), "Bus started");

        tokio::pin!(shutdown);
        loop {
            let request = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                request = self.receiver.recv() => match request {
                    Some(request) => request,
                    None => break,
                },
            };
            served += 1;
            let router = Arc::clone(&router);
            tokio::spawn(async move {
                let BusRequest {
                    pattern,
                    payload,
                    respond_to,
                } = request;
                let result = router.dispatch(&pattern, payload).await;
                if respond_to.send(result).is_err() {
                    debug!(%pattern, "Caller went away before the reply");
                }
            });
        }

        info!(served, "Shutdown");
    }
}

/// A cheap-to-clone handle for sending requests to a [`MessageBus`].
#[derive(Clone, Debug)]
pub struct BusClient {
    sender: mpsc::Sender<BusRequest>,
}

impl BusClient {
    pub fn new(sender: mpsc::Sender<BusRequest>) -> Self {
        Self { sender }
    }

    /// Sends `payload` under `pattern` and waits for the handler's reply.
    #[instrument(level = "debug", skip_all, fields(pattern = %pattern))]
    pub async fn request(
        &self,
        pattern: MessagePattern,
        payload: Value,
    ) -> Result<Value, TransportError> {
        send_request(self.sender.clone(), pattern, payload).await
    }

    /// `true` once the bus loop has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

async fn send_request(
    sender: mpsc::Sender<BusRequest>,
    pattern: MessagePattern,
    payload: Value,
) -> Result<Value, TransportError> {
    let (respond_to, response) = oneshot::channel();
    sender
        .send(BusRequest {
            pattern,
            payload,
            respond_to,
        })
        .await
        .map_err(|_| TransportError::BusClosed)?;
    let reply = response.await.map_err(|_| TransportError::ReplyDropped)?;
    Ok(reply?)
}

impl ClientProxy for BusClient {
    type Reply = PendingReply;

    /// Returns a lazy reply: the request is only queued once the future is
    /// polled.
    fn send(&self, pattern: &MessagePattern, payload: Value) -> PendingReply {
        Box::pin(send_request(self.sender.clone(), pattern.clone(), payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;
    use crate::handler::HandlerError;
    use serde_json::json;

    fn router_with_echo() -> PatternRouter {
        let mut router = PatternRouter::new();
        router
            .register("test.echo", |payload: Value| async move {
                Ok::<_, HandlerError>(payload)
            })
            .unwrap();
        router
    }

    #[tokio::test]
    async fn request_round_trips_through_handler() {
        let (bus, client) = MessageBus::new(BusConfig::default());
        tokio::spawn(bus.run(router_with_echo()));

        let reply = client
            .request("test.echo".into(), json!({ "id": 3 }))
            .await
            .unwrap();
        assert_eq!(reply, json!({ "id": 3 }));
    }

    #[tokio::test]
    async fn unknown_pattern_is_a_remote_error() {
        let (bus, client) = MessageBus::new(BusConfig::default());
        tokio::spawn(bus.run(PatternRouter::new()));

        let err = client
            .request("test.nothing".into(), Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Remote(RouterError::NoHandler(_))));
    }

    #[tokio::test]
    async fn send_is_lazy_until_polled() {
        let (bus, client) = MessageBus::new(BusConfig::with_buffer_size(1));
        let pending = client.send(&"test.echo".into(), json!([1]));

        // Nothing has been queued yet, so the bus can start afterwards.
        tokio::spawn(bus.run(router_with_echo()));
        assert_eq!(pending.await.unwrap(), json!([1]));
    }

    #[tokio::test]
    async fn closed_bus_is_reported() {
        let (bus, client) = MessageBus::new(BusConfig::default());
        drop(bus);

        let err = client
            .request("test.echo".into(), Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::BusClosed));
        assert!(client.is_closed());
    }

    #[tokio::test]
    async fn run_returns_when_clients_drop() {
        let (bus, client) = MessageBus::new(BusConfig::default());
        let handle = tokio::spawn(bus.run(router_with_echo()));
        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn run_until_stops_on_signal_even_with_live_clients() {
        let (bus, client) = MessageBus::new(BusConfig::default());
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(bus.run_until(router_with_echo(), async move {
            let _ = stopped.await;
        }));

        assert_eq!(
            client.request("test.echo".into(), json!(1)).await.unwrap(),
            json!(1)
        );
        stop.send(()).unwrap();
        handle.await.unwrap();

        let err = client.request("test.echo".into(), json!(2)).await.unwrap_err();
        assert!(matches!(err, TransportError::BusClosed));
    }
}
