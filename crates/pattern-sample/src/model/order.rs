use serde::{Deserialize, Serialize};

/// A placed order. The total is fixed at the price current when it was
/// placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub user_id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub total: f64,
}

/// Payload for placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: u64,
    pub product_id: u64,
    pub quantity: u32,
}
