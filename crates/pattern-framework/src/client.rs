//! # Client Proxy
//!
//! [`ClientProxy`] is the outbound seam: anything that can send a payload
//! under a pattern and hand back a completion handle. The auto-dispatcher
//! only ever calls [`send`](ClientProxy::send) and returns whatever it
//! produced, so the client alone decides what a reply is, when the message
//! actually leaves and how failures surface.

use crate::error::TransportError;
use crate::pattern::MessagePattern;
use futures::future::BoxFuture;
use serde_json::Value;

/// Completion handle returned by the bundled clients.
///
/// It is lazy: nothing is sent until the future is first polled.
pub type PendingReply = BoxFuture<'static, Result<Value, TransportError>>;

/// A messaging client.
pub trait ClientProxy: Send + Sync + 'static {
    /// The completion handle returned by [`send`](Self::send).
    type Reply;

    /// Sends `payload` under `pattern`.
    fn send(&self, pattern: &MessagePattern, payload: Value) -> Self::Reply;
}
