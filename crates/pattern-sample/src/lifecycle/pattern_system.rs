use crate::controllers::{OrdersController, ProductsController, UsersController};
use crate::services::{InventoryService, OrdersService, UsersService, CATALOG};
use pattern_framework::{
    message_patterns, BusClient, BusConfig, MessageBus, MessagePattern, MetadataRegistry,
    PatternRouter, RouterError,
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running users/catalog/orders system.
///
/// ```ignore
/// let system = PatternSystem::new()?;
///
/// let user = reply::<User>(system.users.create(NewUser::new("Alice", "a@x.io"))).await?;
/// let order = reply::<Order>(system.orders.place(new_order)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct PatternSystem {
    /// Calls `users.*`.
    pub users: Arc<UsersService>,

    /// Calls `catalog.*`.
    pub inventory: Arc<InventoryService>,

    /// Calls `orders.*`.
    pub orders: Arc<OrdersService>,

    client: BusClient,
    patterns: Vec<MessagePattern>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl PatternSystem {
    /// Starts the system with [`BusConfig::from_env`].
    pub fn new() -> Result<Self, RouterError> {
        Self::with_config(BusConfig::from_env())
    }

    /// Starts the system. Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// [`RouterError::DuplicatePattern`] if two controllers derive the same
    /// pattern.
    pub fn with_config(config: BusConfig) -> Result<Self, RouterError> {
        let metadata = MetadataRegistry::new().with_path::<ProductsController>(CATALOG);

        let (bus, client) = MessageBus::new(config);
        let shared = Arc::new(client.clone());
        let users = Arc::new(UsersService::with_client(Arc::clone(&shared)));
        let inventory = Arc::new(InventoryService::with_client(Arc::clone(&shared)));
        let orders = Arc::new(OrdersService::with_client(shared));

        let users_controller = Arc::new(UsersController::default());
        let catalog = Arc::new(ProductsController::default());
        let orders_controller = Arc::new(OrdersController::new(
            Arc::clone(&users),
            Arc::clone(&inventory),
        ));

        let mut router = PatternRouter::new();
        let mut patterns = Vec::new();
        patterns.extend(message_patterns!(
            &mut router, &metadata,
            users_controller: UsersController => [create, find_one, find_all]
        )?);
        patterns.extend(message_patterns!(
            &mut router, &metadata,
            catalog: ProductsController => [create, find_one, reserve]
        )?);
        patterns.extend(message_patterns!(
            &mut router, &metadata,
            orders_controller: OrdersController => [place, find_all]
        )?);

        let (shutdown, stopped) = oneshot::channel();
        let handle = tokio::spawn(bus.run_until(router, async move {
            let _ = stopped.await;
        }));
        info!(
            count = patterns.len(),
            paths = metadata.len(),
            "System started"
        );

        Ok(Self {
            users,
            inventory,
            orders,
            client,
            patterns,
            shutdown,
            handle,
        })
    }

    /// Raw access to the bus, for patterns no service wraps.
    pub fn client(&self) -> &BusClient {
        &self.client
    }

    /// Every pattern the system answers, in registration order.
    pub fn patterns(&self) -> &[MessagePattern] {
        &self.patterns
    }

    /// Stops the bus loop and waits for it to finish.
    ///
    /// Requests already dispatched run to completion; later ones fail with
    /// [`TransportError::BusClosed`](pattern_framework::TransportError::BusClosed).
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // The loop may already be gone, in which case there is nobody to tell.
        let _ = self.shutdown.send(());

        if let Err(e) = self.handle.await {
            error!(error = %e, "Bus task failed");
            return Err(format!("Bus task failed: {e}"));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
