//! # Registration Metadata
//!
//! Controllers may carry an explicit path (`"users"`, `"billing-orders"`, ...)
//! that overrides the naming convention. Rust has no runtime annotations, so
//! those paths live in a [`MetadataRegistry`]: a side-table keyed by the
//! controller's [`TypeId`] and a metadata key, filled in at startup before
//! any handler is registered.
//!
//! ```rust
//! use pattern_framework::MetadataRegistry;
//!
//! struct UsersController;
//!
//! let mut metadata = MetadataRegistry::new();
//! metadata.set_path::<UsersController>("members");
//! assert_eq!(metadata.path_of::<UsersController>(), Some("members"));
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

/// Metadata key holding a controller's explicit path.
pub const PATH_METADATA: &str = "path";

/// Side-table associating types with string metadata.
#[derive(Debug, Default, Clone)]
pub struct MetadataRegistry {
    entries: HashMap<(TypeId, &'static str), String>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `value` to `T` under `key`, replacing any previous value.
    pub fn define<T: ?Sized + 'static>(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        debug!(
            type_name = crate::pattern::short_type_name::<T>(),
            key,
            %value,
            "Metadata defined"
        );
        self.entries.insert((TypeId::of::<T>(), key), value);
    }

    /// Reads the metadata attached to `T` under `key`.
    pub fn get<T: ?Sized + 'static>(&self, key: &'static str) -> Option<&str> {
        self.entries
            .get(&(TypeId::of::<T>(), key))
            .map(String::as_str)
    }

    /// Builder form of [`set_path`](Self::set_path).
    pub fn with_path<T: ?Sized + 'static>(mut self, path: impl Into<String>) -> Self {
        self.set_path::<T>(path);
        self
    }

    pub fn set_path<T: ?Sized + 'static>(&mut self, path: impl Into<String>) {
        self.define::<T>(PATH_METADATA, path);
    }

    /// The explicit path registered for `T`, if any.
    pub fn path_of<T: ?Sized + 'static>(&self) -> Option<&str> {
        self.get::<T>(PATH_METADATA)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
