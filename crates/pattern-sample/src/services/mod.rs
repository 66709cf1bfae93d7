//! # Outbound Services
//!
//! Services are the calling side of the bus. Each one owns an
//! [`AutoSender`](pattern_framework::AutoSender), and its methods are
//! declared with [`auto_send!`](pattern_framework::auto_send): the method
//! name becomes the pattern's method and the service type (minus
//! `Service`) its resource, unless the service names one explicitly.
//!
//! | Service            | Resource  | Source                        |
//! |--------------------|-----------|-------------------------------|
//! | [`UsersService`]   | `users`   | naming convention             |
//! | [`InventoryService`] | `catalog` | explicit `service_name`     |
//! | [`OrdersService`]  | `orders`  | naming convention             |
//!
//! Services are generic over their client so tests can swap the bus for a
//! [`MockClient`](pattern_framework::mock::MockClient).

pub mod inventory;
pub mod orders;
pub mod users;

pub use inventory::*;
pub use orders::*;
pub use users::*;

use crate::error::ServiceError;
use pattern_framework::{DispatchError, TransportError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;

/// Awaits the reply of an outbound call and decodes it into `T`.
pub async fn reply<T, R>(sent: Result<R, DispatchError>) -> Result<T, ServiceError>
where
    T: DeserializeOwned,
    R: Future<Output = Result<Value, TransportError>>,
{
    let value = sent?.await?;
    Ok(serde_json::from_value(value)?)
}
