//! Serves the `orders` resource.
//!
//! Placing an order takes two outbound calls, `users.find_one` and
//! `catalog.reserve`, so this controller is also a client of the bus.

use crate::error::{OrderError, ServiceError};
use crate::model::{NewOrder, Order, Product, StockReservation, User};
use crate::services::{reply, InventoryService, UsersService};
use pattern_framework::{BusClient, ClientProxy, HandlerError, PendingReply};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument};

pub struct OrdersController<C: ClientProxy<Reply = PendingReply> = BusClient> {
    users: Arc<UsersService<C>>,
    inventory: Arc<InventoryService<C>>,
    orders: Mutex<Vec<Order>>,
    next_id: AtomicU64,
}

impl<C: ClientProxy<Reply = PendingReply>> OrdersController<C> {
    pub fn new(users: Arc<UsersService<C>>, inventory: Arc<InventoryService<C>>) -> Self {
        Self {
            users,
            inventory,
            orders: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    #[instrument(skip(self))]
    pub async fn place(&self, order: NewOrder) -> Result<Order, OrderError> {
        if order.quantity == 0 {
            return Err(OrderError::ValidationError("quantity must be positive".into()));
        }

        let user: User = reply(self.users.find_one(order.user_id))
            .await
            .map_err(|e| classify(e, OrderError::InvalidUser(format!("user {}", order.user_id))))?;

        let reservation = StockReservation {
            id: order.product_id,
            quantity: order.quantity,
        };
        let product: Product = reply(self.inventory.reserve(reservation))
            .await
            .map_err(|e| {
                if e.is_invalid() {
                    OrderError::InsufficientStock(format!("product {}", order.product_id))
                } else {
                    classify(e, OrderError::InvalidProduct(format!("product {}", order.product_id)))
                }
            })?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let placed = Order {
            id,
            user_id: user.id,
            product_id: product.id,
            quantity: order.quantity,
            total: product.price * f64::from(order.quantity),
        };
        self.orders.lock().await.push(placed.clone());
        info!(id, user_id = user.id, product_id = product.id, "Order placed");
        Ok(placed)
    }

    pub async fn find_all(&self, _filter: Value) -> Result<Vec<Order>, HandlerError> {
        Ok(self.orders.lock().await.clone())
    }
}

/// `missing` when the remote side answered `NotFound`, else a
/// communication error.
fn classify(e: ServiceError, missing: OrderError) -> OrderError {
    if e.is_not_found() {
        missing
    } else {
        OrderError::CommunicationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_framework::mock::MockClient;
    use pattern_framework::{RouterError, TransportError};
    use serde_json::json;

    fn controller(mock: &Arc<MockClient>) -> OrdersController<MockClient> {
        OrdersController::new(
            Arc::new(UsersService::with_client(mock.clone())),
            Arc::new(InventoryService::with_client(mock.clone())),
        )
    }

    fn new_order(quantity: u32) -> NewOrder {
        NewOrder {
            user_id: 1,
            product_id: 2,
            quantity,
        }
    }

    #[tokio::test]
    async fn place_looks_up_user_then_reserves_stock() {
        let mock = Arc::new(MockClient::new());
        mock.expect_send("users.find_one")
            .return_ok(json!({ "id": 1, "name": "Alice", "email": "alice@example.com" }));
        mock.expect_send("catalog.reserve")
            .return_ok(json!({ "id": 2, "name": "Widget", "price": 2.5, "quantity": 6 }));

        let order = controller(&mock).place(new_order(4)).await.unwrap();

        assert_eq!(order.total, 10.0);
        let sent = mock.sent();
        assert_eq!(sent[0].payload, json!({ "id": 1 }));
        assert_eq!(sent[1].payload, json!({ "id": 2, "quantity": 4 }));
        mock.verify();
    }

    #[tokio::test]
    async fn unknown_user_stops_before_reserving() {
        let mock = Arc::new(MockClient::new());
        mock.expect_send("users.find_one")
            .return_err(TransportError::Remote(RouterError::Handler(
                HandlerError::NotFound("user 1".into()),
            )));

        let err = controller(&mock).place(new_order(1)).await.unwrap_err();

        assert_eq!(err, OrderError::InvalidUser("user 1".into()));
        assert_eq!(mock.send_count(), 1);
    }

    #[tokio::test]
    async fn rejected_reservation_is_insufficient_stock() {
        let mock = Arc::new(MockClient::new());
        mock.expect_send("users.find_one")
            .return_ok(json!({ "id": 1, "name": "Alice", "email": "alice@example.com" }));
        mock.expect_send("catalog.reserve")
            .return_err(TransportError::Remote(RouterError::Handler(
                HandlerError::Invalid("only 0 left".into()),
            )));

        let err = controller(&mock).place(new_order(3)).await.unwrap_err();

        assert_eq!(err, OrderError::InsufficientStock("product 2".into()));
    }

    #[tokio::test]
    async fn zero_quantity_sends_nothing() {
        let mock = Arc::new(MockClient::new());

        let err = controller(&mock).place(new_order(0)).await.unwrap_err();

        assert!(matches!(err, OrderError::ValidationError(_)));
        assert_eq!(mock.send_count(), 0);
    }

    #[tokio::test]
    async fn closed_bus_is_a_communication_error() {
        let mock = Arc::new(MockClient::new());
        mock.expect_send("users.find_one")
            .return_err(TransportError::BusClosed);

        let err = controller(&mock).place(new_order(1)).await.unwrap_err();

        assert!(matches!(err, OrderError::CommunicationError(_)));
    }
}
