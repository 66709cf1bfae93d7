//! # Inbound Controllers
//!
//! Controllers are the answering side of the bus. Their methods all have
//! the shape `async fn(&self, arg) -> Result<T, E>` and are registered with
//! [`message_patterns!`](pattern_framework::message_patterns), so the
//! method name is the pattern's method and the resource comes from the
//! controller:
//!
//! | Controller            | Resource  | Source                         |
//! |-----------------------|-----------|--------------------------------|
//! | [`UsersController`]   | `users`   | naming convention              |
//! | [`ProductsController`]| `catalog` | path in the `MetadataRegistry` |
//! | [`OrdersController`]  | `orders`  | naming convention              |
//!
//! `OrdersController` is both a controller and a caller: placing an order
//! looks the user up and reserves stock through the bus.

pub mod catalog;
pub mod orders;
pub mod users;

pub use catalog::*;
pub use orders::*;
pub use users::*;
