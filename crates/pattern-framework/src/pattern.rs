//! # Message Patterns & Naming Convention
//!
//! A [`MessagePattern`] is the routing key shared by inbound handlers and
//! outbound calls: `"<resource>.<method>"`. Nothing is escaped or validated;
//! whatever characters the resource and method carry pass through as-is.
//!
//! When no explicit resource name is configured, one is derived from the
//! Rust type name of the controller or service:
//!
//! | Type              | Suffix       | Resource  |
//! |-------------------|--------------|-----------|
//! | `UsersController` | `Controller` | `users`   |
//! | `OrdersService`   | `Service`    | `orders`  |
//! | `Billing`         | `Service`    | `billing` |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix stripped from controller type names.
pub const CONTROLLER_SUFFIX: &str = "Controller";

/// Suffix stripped from service type names.
pub const SERVICE_SUFFIX: &str = "Service";

/// A dot-separated routing key, `"<resource>.<method>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessagePattern(String);

impl MessagePattern {
    /// Joins a resource name and a method name.
    pub fn new(resource: impl AsRef<str>, method: impl AsRef<str>) -> Self {
        Self(format!("{}.{}", resource.as_ref(), method.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the first `.`.
    pub fn resource(&self) -> &str {
        self.0.split_once('.').map_or(self.0.as_str(), |(r, _)| r)
    }

    /// The part after the first `.`, empty if there is none.
    pub fn method(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, m)| m)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MessagePattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessagePattern {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for MessagePattern {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Returns the bare name of `T` (e.g. `"UsersController"` instead of
/// `"my_app::controllers::UsersController"`).
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Removes the first occurrence of `suffix` from `type_name` and lowercases
/// the rest.
///
/// Only the first occurrence is removed, wherever it sits, so
/// `"ServiceLocatorService"` becomes `"locatorservice"`.
pub fn conventional_name(type_name: &str, suffix: &str) -> String {
    type_name.replacen(suffix, "", 1).to_lowercase()
}

/// Conventional resource name for the type `T`.
pub fn conventional_name_of<T: ?Sized>(suffix: &str) -> String {
    conventional_name(short_type_name::<T>(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UsersController;
    struct OrdersService;
    #[allow(dead_code)]
    struct Wrapper<T>(T);

    #[test]
    fn joins_resource_and_method() {
        let pattern = MessagePattern::new("users", "findAll");
        assert_eq!(pattern.as_str(), "users.findAll");
        assert_eq!(pattern.resource(), "users");
        assert_eq!(pattern.method(), "findAll");
    }

    #[test]
    fn special_characters_pass_through() {
        let pattern = MessagePattern::new("a.b", "c-d");
        assert_eq!(pattern.to_string(), "a.b.c-d");
        assert_eq!(pattern.resource(), "a");
        assert_eq!(pattern.method(), "b.c-d");
    }

    #[test]
    fn short_names_drop_module_path_and_generics() {
        assert_eq!(short_type_name::<UsersController>(), "UsersController");
        assert_eq!(short_type_name::<Wrapper<OrdersService>>(), "Wrapper");
    }

    #[test]
    fn convention_strips_first_suffix_occurrence() {
        assert_eq!(conventional_name("UsersController", CONTROLLER_SUFFIX), "users");
        assert_eq!(conventional_name("OrdersService", SERVICE_SUFFIX), "orders");
        assert_eq!(conventional_name("Billing", SERVICE_SUFFIX), "billing");
        assert_eq!(
            conventional_name("ServiceLocatorService", SERVICE_SUFFIX),
            "locatorservice"
        );
        // Case-sensitive: a lowercase suffix is left alone.
        assert_eq!(conventional_name("Userscontroller", CONTROLLER_SUFFIX), "userscontroller");
    }

    #[test]
    fn convention_of_type() {
        assert_eq!(conventional_name_of::<UsersController>(CONTROLLER_SUFFIX), "users");
        assert_eq!(conventional_name_of::<OrdersService>(SERVICE_SUFFIX), "orders");
    }

    #[test]
    fn serializes_as_plain_string() {
        let pattern = MessagePattern::new("users", "create");
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, "\"users.create\"");
        let back: MessagePattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern);
    }
}
