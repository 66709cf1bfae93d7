//! # Framework Errors
//!
//! This module defines the error types shared by the router, the bus and the
//! auto-dispatcher. Pattern derivation itself never fails, so every variant
//! here belongs to registration, dispatch or transport.

use crate::handler::HandlerError;

/// Errors raised by an [`AutoSender`](crate::AutoSender) before anything is
/// handed to the client.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The client slot named by [`AutoSendOptions::client_property`](crate::AutoSendOptions)
    /// was never bound.
    #[error("ClientProxy not found on property \"{property}\"")]
    MissingClient { property: &'static str },

    /// The outbound argument could not be converted into a JSON payload.
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// The wrapped method body refused the call (wrap mode only).
    #[error("Call rejected: {0}")]
    Rejected(String),
}

/// Errors raised by the [`PatternRouter`](crate::PatternRouter).
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("Pattern already registered: {0}")]
    DuplicatePattern(String),
    #[error("No handler for pattern: {0}")]
    NoHandler(String),
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Errors surfaced by a [`BusClient`](crate::BusClient) reply.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Bus closed")]
    BusClosed,
    #[error("Bus dropped reply channel")]
    ReplyDropped,
    #[error("Remote error: {0}")]
    Remote(#[from] RouterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_client_names_the_property() {
        let err = DispatchError::MissingClient {
            property: "userClient",
        };
        assert_eq!(
            err.to_string(),
            "ClientProxy not found on property \"userClient\""
        );
    }

    #[test]
    fn handler_errors_pass_through_router_display() {
        let err = RouterError::from(HandlerError::NotFound("user 9".into()));
        assert_eq!(err.to_string(), "Not found: user 9");
    }
}
