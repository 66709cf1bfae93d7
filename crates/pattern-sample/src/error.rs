//! Error types for the sample services and controllers.

use pattern_framework::{DispatchError, HandlerError, RouterError, TransportError};
use thiserror::Error;

/// Errors from calling another pattern through a service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The call never left: no client bound, or the argument did not
    /// serialize.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The bus or the remote handler failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The reply did not have the expected shape.
    #[error("Unexpected reply: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ServiceError {
    /// The remote handler answered `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::Transport(TransportError::Remote(RouterError::Handler(
                HandlerError::NotFound(_)
            )))
        )
    }

    /// The remote handler rejected the request as invalid.
    pub fn is_invalid(&self) -> bool {
        matches!(
            self,
            ServiceError::Transport(TransportError::Remote(RouterError::Handler(
                HandlerError::Invalid(_)
            )))
        )
    }
}

/// Errors that can occur while placing an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The user specified in the order does not exist.
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    /// The product specified in the order does not exist.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// There is insufficient stock to fulfill the order.
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// A downstream call failed for reasons unrelated to the order itself.
    #[error("Communication error: {0}")]
    CommunicationError(String),
}

impl From<OrderError> for HandlerError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::InvalidUser(_) | OrderError::InvalidProduct(_) => {
                HandlerError::NotFound(e.to_string())
            }
            OrderError::InsufficientStock(_) | OrderError::ValidationError(_) => {
                HandlerError::Invalid(e.to_string())
            }
            OrderError::CommunicationError(_) => HandlerError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_errors_map_to_handler_errors() {
        assert!(matches!(
            HandlerError::from(OrderError::InvalidUser("user 9".into())),
            HandlerError::NotFound(msg) if msg == "Invalid user: user 9"
        ));
        assert!(matches!(
            HandlerError::from(OrderError::InsufficientStock("product 1".into())),
            HandlerError::Invalid(_)
        ));
        assert!(matches!(
            HandlerError::from(OrderError::CommunicationError("bus closed".into())),
            HandlerError::Internal(_)
        ));
    }

    #[test]
    fn remote_not_found_is_recognized() {
        let err = ServiceError::from(TransportError::Remote(RouterError::Handler(
            HandlerError::NotFound("user 9".into()),
        )));
        assert!(err.is_not_found());
        assert!(!err.is_invalid());

        let err = ServiceError::from(TransportError::BusClosed);
        assert!(!err.is_not_found());
    }
}
