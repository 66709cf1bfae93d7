//! Outbound client for the `orders` resource.

use crate::model::NewOrder;
use pattern_framework::{auto_send, AutoSend, AutoSendOptions, AutoSender, BusClient, ClientProxy};
use std::sync::Arc;

const OPTIONS: AutoSendOptions = AutoSendOptions::new("orderClient");

#[derive(Debug)]
pub struct OrdersService<C: ClientProxy = BusClient> {
    sender: AutoSender<C>,
}

impl<C: ClientProxy> OrdersService<C> {
    pub fn with_client(client: Arc<C>) -> Self {
        Self {
            sender: AutoSender::new::<Self>(OPTIONS).with_client(client),
        }
    }
}

impl<C: ClientProxy> AutoSend for OrdersService<C> {
    type Client = C;

    fn sender(&self) -> &AutoSender<C> {
        &self.sender
    }
}

auto_send! {
    impl<C: ClientProxy> OrdersService<C> {
        pub fn place(&self, order: NewOrder);
        pub fn find_all(&self);
    }
}
