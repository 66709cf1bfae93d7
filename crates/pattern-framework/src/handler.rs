//! # Inbound Handlers
//!
//! A [`MessageHandler`] receives the JSON payload sent under a pattern and
//! produces a JSON reply. Any `async` closure of the right shape is a
//! handler, so controllers are usually registered through a small closure
//! that forwards to a method:
//!
//! ```rust,ignore
//! let users = Arc::new(UsersController::default());
//! router.auto_message_pattern::<UsersController, _>(&metadata, "find_all", {
//!     let users = Arc::clone(&users);
//!     move |payload| {
//!         let users = Arc::clone(&users);
//!         async move { users.find_all(payload).await }
//!     }
//! })?;
//! ```
//!
//! The [`message_patterns!`](crate::message_patterns) macro writes those
//! closures for you, using [`decode`] and [`encode`] at the boundary.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Errors a handler reports back to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HandlerError {
    /// The payload did not match the handler's argument type.
    #[error("Bad payload: {0}")]
    BadPayload(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The payload was well-formed but semantically invalid.
    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for HandlerError {
    fn from(e: serde_json::Error) -> Self {
        HandlerError::BadPayload(e.to_string())
    }
}

/// Something that can answer a message.
#[async_trait]
pub trait MessageHandler: Send + Sync + 'static {
    async fn handle(&self, payload: Value) -> Result<Value, HandlerError>;
}

#[async_trait]
impl<F, Fut> MessageHandler for F
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
{
    async fn handle(&self, payload: Value) -> Result<Value, HandlerError> {
        (self)(payload).await
    }
}

/// Type-erased handler as stored by the router.
pub type BoxedHandler = Arc<dyn MessageHandler>;

/// Deserializes a payload into a handler's argument type.
pub fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, HandlerError> {
    Ok(serde_json::from_value(payload)?)
}

/// Serializes a handler's output into a reply.
pub fn encode<T: Serialize>(reply: T) -> Result<Value, HandlerError> {
    serde_json::to_value(reply).map_err(|e| HandlerError::Internal(e.to_string()))
}
