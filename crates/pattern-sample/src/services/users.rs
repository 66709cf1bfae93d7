//! Outbound client for the `users` resource.

use crate::model::{NewUser, UserFilter};
use pattern_framework::{auto_send, AutoSend, AutoSendOptions, AutoSender, BusClient, ClientProxy};
use std::sync::Arc;

const OPTIONS: AutoSendOptions = AutoSendOptions::new("userClient");

/// Calls `users.*` patterns. The resource name comes from the type name.
#[derive(Debug)]
pub struct UsersService<C: ClientProxy = BusClient> {
    sender: AutoSender<C>,
}

impl<C: ClientProxy> UsersService<C> {
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
}

impl<C: ClientProxy> Default for UsersService<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClientProxy> AutoSend for UsersService<C> {
    type Client = C;

    fn sender(&self) -> &AutoSender<C> {
        &self.sender
    }
}

auto_send! {
    impl<C: ClientProxy> UsersService<C> {
        pub fn create(&self, user: NewUser);
        pub fn find_one(&self, id: u64);
        pub fn find_all(&self, filter: UserFilter);
    }
}
