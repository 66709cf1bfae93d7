//! # Pattern Router
//!
//! The [`PatternRouter`] is the inbound half of the system: an exact-match
//! table from [`MessagePattern`] to [`MessageHandler`].
//!
//! Handlers are usually registered through
//! [`auto_message_pattern`](PatternRouter::auto_message_pattern), which
//! derives the pattern from the controller type instead of spelling it out:
//!
//! 1. Look up the controller's explicit path in the [`MetadataRegistry`].
//! 2. If it is present and non-empty, use it verbatim as the resource name.
//! 3. Otherwise strip `Controller` from the type name and lowercase it.
//! 4. Register the handler, unchanged, under `"<resource>.<method>"`.
//!
//! ```rust
//! use pattern_framework::{HandlerError, MetadataRegistry, PatternRouter};
//! use serde_json::Value;
//!
//! struct UsersController;
//!
//! let metadata = MetadataRegistry::new();
//! let mut router = PatternRouter::new();
//! let pattern = router
//!     .auto_message_pattern::<UsersController, _>(&metadata, "findAll", |_: Value| async {
//!         Ok::<_, HandlerError>(Value::Array(vec![]))
//!     })
//!     .unwrap();
//! assert_eq!(pattern.as_str(), "users.findAll");
//! ```

use crate::error::RouterError;
use crate::handler::{BoxedHandler, MessageHandler};
use crate::metadata::MetadataRegistry;
use crate::pattern::{conventional_name_of, MessagePattern, CONTROLLER_SUFFIX};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resource name of the controller `C`: its registered path, or the naming
/// convention when no non-empty path is registered.
pub fn controller_resource_name<C: ?Sized + 'static>(metadata: &MetadataRegistry) -> String {
    match metadata.path_of::<C>() {
        Some(path) if !path.is_empty() => path.to_owned(),
        _ => conventional_name_of::<C>(CONTROLLER_SUFFIX),
    }
}

/// Derives the inbound pattern for `method` on controller `C`.
pub fn derive_inbound_pattern<C: ?Sized + 'static>(
    metadata: &MetadataRegistry,
    method: &str,
) -> MessagePattern {
    MessagePattern::new(controller_resource_name::<C>(metadata), method)
}

/// Exact-match table of inbound handlers.
#[derive(Default, Clone)]
pub struct PatternRouter {
    handlers: HashMap<MessagePattern, BoxedHandler>,
}

impl PatternRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under an explicit pattern.
    ///
    /// # Errors
    ///
    /// [`RouterError::DuplicatePattern`] if the pattern already has a handler.
    pub fn register<H: MessageHandler>(
        &mut self,
        pattern: impl Into<MessagePattern>,
        handler: H,
    ) -> Result<(), RouterError> {
        let pattern = pattern.into();
        if self.handlers.contains_key(&pattern) {
            warn!(%pattern, "Duplicate pattern");
            return Err(RouterError::DuplicatePattern(pattern.into_string()));
        }
        info!(%pattern, "Handler registered");
        self.handlers.insert(pattern, Arc::new(handler));
        Ok(())
    }

    /// Registers `handler` under the pattern derived from controller `C` and
    /// `method`, returning that pattern.
    pub fn auto_message_pattern<C: ?Sized + 'static, H: MessageHandler>(
        &mut self,
        metadata: &MetadataRegistry,
        method: &str,
        handler: H,
    ) -> Result<MessagePattern, RouterError> {
        let pattern = derive_inbound_pattern::<C>(metadata, method);
        self.register(pattern.clone(), handler)?;
        Ok(pattern)
    }

    /// Routes `payload` to the handler registered under `pattern`.
    pub async fn dispatch(
        &self,
        pattern: &MessagePattern,
        payload: Value,
    ) -> Result<Value, RouterError> {
        let Some(handler) = self.handlers.get(pattern) else {
            warn!(%pattern, "No handler");
            return Err(RouterError::NoHandler(pattern.to_string()));
        };
        debug!(%pattern, ?payload, "Dispatch");
        let result = handler.handle(payload).await;
        if let Err(e) = &result {
            warn!(%pattern, error = %e, "Handler failed");
        }
        result.map_err(RouterError::from)
    }

    pub fn contains(&self, pattern: &MessagePattern) -> bool {
        self.handlers.contains_key(pattern)
    }

    /// Registered patterns in lexical order.
    pub fn patterns(&self) -> Vec<&MessagePattern> {
        let mut patterns: Vec<_> = self.handlers.keys().collect();
        patterns.sort();
        patterns
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for PatternRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRouter")
            .field("patterns", &self.patterns())
            .finish()
    }
}
