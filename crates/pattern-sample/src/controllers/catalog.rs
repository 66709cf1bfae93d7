//! Serves the product catalog.
//!
//! The type is `ProductsController`, which would give `products`, but it is
//! registered under the `catalog` path (see
//! [`PatternSystem`](crate::lifecycle::PatternSystem)).

use crate::model::{IdArg, NewProduct, Product, StockReservation};
use pattern_framework::HandlerError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

#[derive(Debug)]
pub struct ProductsController {
    products: Mutex<BTreeMap<u64, Product>>,
    next_id: AtomicU64,
}

impl Default for ProductsController {
    fn default() -> Self {
        Self {
            products: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl ProductsController {
    #[instrument(skip(self), fields(name = %product.name))]
    pub async fn create(&self, product: NewProduct) -> Result<Product, HandlerError> {
        if !(product.price.is_finite() && product.price >= 0.0) {
            return Err(HandlerError::Invalid(format!("bad price: {}", product.price)));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product {
            id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
        };
        self.products.lock().await.insert(id, product.clone());
        debug!(id, "Product created");
        Ok(product)
    }

    pub async fn find_one(&self, arg: IdArg) -> Result<Product, HandlerError> {
        self.products
            .lock()
            .await
            .get(&arg.id)
            .cloned()
            .ok_or_else(|| HandlerError::NotFound(format!("product {}", arg.id)))
    }

    /// Takes stock out and returns the product as it was at reservation
    /// time, with `quantity` set to what remains.
    #[instrument(skip(self))]
    pub async fn reserve(&self, reservation: StockReservation) -> Result<Product, HandlerError> {
        let mut products = self.products.lock().await;
        let product = products
            .get_mut(&reservation.id)
            .ok_or_else(|| HandlerError::NotFound(format!("product {}", reservation.id)))?;

        if product.quantity < reservation.quantity {
            warn!(
                available = product.quantity,
                requested = reservation.quantity,
                "Insufficient stock"
            );
            return Err(HandlerError::Invalid(format!(
                "only {} of product {} left",
                product.quantity, product.id
            )));
        }
        product.quantity -= reservation.quantity;
        Ok(product.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".into(),
            price: 2.5,
            quantity: 10,
        }
    }

    #[tokio::test]
    async fn reserve_decrements_stock() {
        let catalog = ProductsController::default();
        let product = catalog.create(widget()).await.unwrap();

        let after = catalog
            .reserve(StockReservation {
                id: product.id,
                quantity: 4,
            })
            .await
            .unwrap();

        assert_eq!(after.quantity, 6);
        assert_eq!(catalog.find_one(IdArg { id: product.id }).await.unwrap().quantity, 6);
    }

    #[tokio::test]
    async fn over_reservation_leaves_stock_untouched() {
        let catalog = ProductsController::default();
        let product = catalog.create(widget()).await.unwrap();

        let err = catalog
            .reserve(StockReservation {
                id: product.id,
                quantity: 11,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, HandlerError::Invalid(_)));
        assert_eq!(catalog.find_one(IdArg { id: product.id }).await.unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let catalog = ProductsController::default();
        let mut product = widget();
        product.price = -1.0;
        assert!(matches!(
            catalog.create(product).await.unwrap_err(),
            HandlerError::Invalid(_)
        ));
    }
}
