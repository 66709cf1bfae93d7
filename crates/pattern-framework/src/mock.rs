//! # Mock Client & Testing Guide
//!
//! [`MockClient`] implements [`ClientProxy`] entirely in memory. It records
//! every `(pattern, payload)` it is asked to send and answers from a queue
//! of expectations, so service code can be tested without a bus or any
//! controllers.
//!
//! ## When to use the mock vs the real bus
//!
//! | Feature | MockClient | MessageBus |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **Handlers** | None (expectations) | Real router and handlers |
//! | **Use Case** | Pattern and payload derivation | End-to-end request flow |
//! | **Error Injection** | Easy (`return_err`) | Requires a failing handler |
//!
//! ## Example
//!
//! ```rust
//! use pattern_framework::mock::MockClient;
//! use pattern_framework::{ClientProxy, MessagePattern};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockClient::new();
//! mock.expect_send("users.find_one").return_ok(json!({ "id": 1, "name": "Alice" }));
//!
//! let reply = mock
//!     .send(&MessagePattern::from("users.find_one"), json!({ "id": 1 }))
//!     .await
//!     .unwrap();
//! assert_eq!(reply["name"], "Alice");
//!
//! mock.verify(); // Ensures all expectations were met
//! # }
//! ```

use crate::client::{ClientProxy, PendingReply};
use crate::error::TransportError;
use crate::pattern::MessagePattern;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// A message handed to the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub pattern: MessagePattern,
    pub payload: Value,
}

/// Represents an expected send and the reply to hand back.
struct Expectation {
    pattern: MessagePattern,
    response: Result<Value, TransportError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    sent: Vec<SentMessage>,
}

/// A client proxy with expectation tracking for fluent testing.
///
/// Sends are matched against expectations in the order they were queued.
/// A send with no queued expectation, or with a different pattern, panics.
#[derive(Clone, Default)]
pub struct MockClient {
    state: Arc<Mutex<MockState>>,
}

impl MockClient {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a send under `pattern`.
    pub fn expect_send(&self, pattern: impl Into<MessagePattern>) -> SendExpectationBuilder {
        SendExpectationBuilder {
            pattern: pattern.into(),
            state: Arc::clone(&self.state),
        }
    }

    /// Everything sent so far, oldest first.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.lock().sent.clone()
    }

    pub fn send_count(&self) -> usize {
        self.lock().sent.len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }
}

impl ClientProxy for MockClient {
    type Reply = PendingReply;

    fn send(&self, pattern: &MessagePattern, payload: Value) -> PendingReply {
        let mut state = self.lock();
        state.sent.push(SentMessage {
            pattern: pattern.clone(),
            payload,
        });

        let next = state.expectations.pop_front();
        let response = match next {
            Some(expectation) if expectation.pattern == *pattern => expectation.response,
            Some(expectation) => {
                drop(state);
                panic!(
                    "Unexpected send: expected pattern {}, got {}",
                    expectation.pattern, pattern
                );
            }
            None => {
                drop(state);
                panic!("Unexpected send: no expectation queued for {pattern}");
            }
        };
        Box::pin(async move { response })
    }
}

/// Builder for send expectations.
pub struct SendExpectationBuilder {
    pattern: MessagePattern,
    state: Arc<Mutex<MockState>>,
}

impl SendExpectationBuilder {
    /// Sets the expectation to return a successful reply.
    pub fn return_ok(self, reply: Value) {
        self.push(Ok(reply));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, TransportError>) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.expectations.push_back(Expectation {
            pattern: self.pattern,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replies_in_queue_order() {
        let mock = MockClient::new();
        mock.expect_send("users.create").return_ok(json!({ "id": 1 }));
        mock.expect_send("users.find_one").return_err(TransportError::BusClosed);

        let created = mock
            .send(&"users.create".into(), json!({ "name": "A" }))
            .await
            .unwrap();
        assert_eq!(created, json!({ "id": 1 }));

        let err = mock
            .send(&"users.find_one".into(), json!({ "id": 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::BusClosed));

        mock.verify();
        assert_eq!(mock.send_count(), 2);
    }

    #[test]
    #[should_panic(expected = "Unexpected send")]
    fn pattern_mismatch_panics() {
        let mock = MockClient::new();
        mock.expect_send("users.create").return_ok(Value::Null);
        let _ = mock.send(&"users.delete".into(), Value::Null);
    }

    #[test]
    #[should_panic(expected = "1 remaining")]
    fn verify_reports_unmet_expectations() {
        let mock = MockClient::new();
        mock.expect_send("users.create").return_ok(Value::Null);
        mock.verify();
    }
}
