//! # Pattern Framework Sample
//!
//! A walk through the framework with a real bus:
//!
//! 1. Starting the [`PatternSystem`].
//! 2. Creating a [`User`] (`users.create`) and a [`Product`] (`catalog.create`).
//! 3. Placing an [`Order`] (`orders.place`), which itself calls
//!    `users.find_one` and `catalog.reserve`.
//!
//! Run with `RUST_LOG=debug` to see each derived pattern and payload.

use pattern_framework::setup_tracing;
use pattern_sample::lifecycle::PatternSystem;
use pattern_sample::model::{NewOrder, NewProduct, NewUser, Order, Product, User};
use pattern_sample::services::reply;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting application");

    let system = PatternSystem::new().map_err(|e| e.to_string())?;
    for pattern in system.patterns() {
        info!(%pattern, "Serving");
    }

    let span = tracing::info_span!("user_creation");
    let user: User = async {
        info!("Creating test user");
        reply(system.users.create(NewUser::new("Alice", "alice@example.com")))
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(user_id = user.id, "User created successfully");

    let product: Product = reply(system.inventory.create(NewProduct {
        name: "Test Product".to_string(),
        price: 100.0,
        quantity: 10,
    }))
    .await
    .map_err(|e| e.to_string())?;

    info!(product_id = product.id, "Product created successfully");

    let span = tracing::info_span!("order_processing");
    let placed = async {
        info!("Placing order");
        reply::<Order, _>(system.orders.place(NewOrder {
            user_id: user.id,
            product_id: product.id,
            quantity: 5,
        }))
        .await
    }
    .instrument(span)
    .await;

    match placed {
        Ok(order) => info!(order_id = order.id, total = order.total, "Order placed successfully"),
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
