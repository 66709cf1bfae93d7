//! Outbound client for the product catalog.

use crate::model::{NewProduct, StockReservation};
use pattern_framework::{
    auto_send, AutoSend, AutoSendOptions, AutoSender, BusClient, ClientProxy, DispatchError,
    ReplyOf,
};
use std::sync::Arc;

const OPTIONS: AutoSendOptions = AutoSendOptions::new("catalogClient");

/// Resource served by [`ProductsController`](crate::controllers::ProductsController).
pub const CATALOG: &str = "catalog";

/// Calls `catalog.*` patterns. The type name would give `inventory`, so the
/// resource is named explicitly.
#[derive(Debug)]
pub struct InventoryService<C: ClientProxy = BusClient> {
    sender: AutoSender<C>,
}

impl<C: ClientProxy> InventoryService<C> {
    /// Creates an unbound service; [`bind`](Self::bind) a client before use.
    pub fn new() -> Self {
        Self {
            sender: AutoSender::new::<Self>(OPTIONS),
        }
    }

    pub fn with_client(client: Arc<C>) -> Self {
        Self {
            sender: AutoSender::new::<Self>(OPTIONS).with_client(client),
        }
    }

    pub fn bind(&mut self, client: Arc<C>) {
        self.sender.bind(client);
    }

    /// Reserves stock. Zero quantities are rejected before anything is sent.
    pub fn reserve(&self, reservation: StockReservation) -> Result<ReplyOf<Self>, DispatchError> {
        self.auto_send_with("reserve", reservation, |reservation| {
            if reservation.quantity == 0 {
                Err("quantity must be positive")
            } else {
                Ok(reservation)
            }
        })
    }
}

impl<C: ClientProxy> Default for InventoryService<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClientProxy> AutoSend for InventoryService<C> {
    type Client = C;

    fn sender(&self) -> &AutoSender<C> {
        &self.sender
    }

    fn service_name(&self) -> Option<&str> {
        Some(CATALOG)
    }
}

auto_send! {
    impl<C: ClientProxy> InventoryService<C> {
        pub fn create(&self, product: NewProduct);
        pub fn find_one(&self, id: u64);
    }
}
