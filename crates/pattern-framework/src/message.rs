//! # Bus Messages
//!
//! This module defines the message carried from a [`BusClient`](crate::BusClient)
//! to the [`MessageBus`](crate::MessageBus).

use crate::error::RouterError;
use crate::pattern::MessagePattern;
use serde_json::Value;
use tokio::sync::oneshot;

/// Type alias for the one-shot reply channel used by the bus.
pub type Response<T> = oneshot::Sender<Result<T, RouterError>>;

/// A request travelling over the bus: the routing key, the normalized
/// payload, and where to deliver the handler's reply.
#[derive(Debug)]
pub struct BusRequest {
    pub pattern: MessagePattern,
    pub payload: Value,
    pub respond_to: Response<Value>,
}
