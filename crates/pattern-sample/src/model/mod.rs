//! Data transfer objects exchanged over the bus.
//!
//! Everything here is plain `serde` data: controllers decode these from
//! payloads and services encode them into payloads.

pub mod order;
pub mod product;
pub mod user;

pub use order::*;
pub use product::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// The `{"id": value}` payload produced when a service is called with a
/// bare identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdArg {
    pub id: u64,
}
