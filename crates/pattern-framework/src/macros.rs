//! # Declarative Registration Macros
//!
//! Two macros remove the per-method glue on either side of the bus. In both,
//! the Rust method name is the pattern's method name.
//!
//! - [`message_patterns!`](crate::message_patterns) registers controller
//!   methods as inbound handlers under derived patterns.
//! - [`auto_send!`](crate::auto_send) generates outbound service methods
//!   that dispatch through [`AutoSend`](crate::AutoSend).

/// Registers controller methods on a [`PatternRouter`](crate::PatternRouter).
///
/// Each listed method must have the shape
/// `async fn name(&self, arg: T) -> Result<R, E>` where `T: Deserialize`,
/// `R: Serialize` and `HandlerError: From<E>`. The payload is decoded into
/// `T` and the output encoded back to JSON. Evaluates to
/// `Result<Vec<MessagePattern>, RouterError>`, stopping at the first failed
/// registration.
///
/// ```rust
/// use pattern_framework::{message_patterns, HandlerError, MetadataRegistry, PatternRouter};
/// use std::sync::Arc;
///
/// struct UsersController;
///
/// impl UsersController {
///     async fn count(&self, _filter: serde_json::Value) -> Result<u32, HandlerError> {
///         Ok(3)
///     }
/// }
///
/// let metadata = MetadataRegistry::new();
/// let mut router = PatternRouter::new();
/// let users = Arc::new(UsersController);
/// let patterns = message_patterns!(&mut router, &metadata, users: UsersController => [count]).unwrap();
/// assert_eq!(patterns[0].as_str(), "users.count");
/// ```
#[macro_export]
macro_rules! message_patterns {
    ($router:expr, $metadata:expr, $controller:ident : $ty:ty => [ $($method:ident),+ $(,)? ]) => {
        (|router: &mut $crate::PatternRouter,
          metadata: &$crate::MetadataRegistry|
         -> ::std::result::Result<::std::vec::Vec<$crate::MessagePattern>, $crate::RouterError> {
            let mut patterns = ::std::vec::Vec::new();
            $(
                let handler = {
                    let controller: ::std::sync::Arc<$ty> = ::std::sync::Arc::clone(&$controller);
                    move |payload: $crate::__private::Value| {
                        let controller = ::std::sync::Arc::clone(&controller);
                        async move {
                            let arg = $crate::handler::decode(payload)?;
                            let reply = controller.$method(arg).await?;
                            $crate::handler::encode(reply)
                        }
                    }
                };
                patterns.push(router.auto_message_pattern::<$ty, _>(
                    metadata,
                    ::std::stringify!($method),
                    handler,
                )?);
            )+
            ::std::result::Result::Ok(patterns)
        })($router, $metadata)
    };
}

/// Generates replace-mode outbound methods on a type implementing
/// [`AutoSend`](crate::AutoSend).
///
/// Each declared method sends its single argument (or `()` when it has
/// none) under `"<resource>.<method>"` and returns
/// `Result<ReplyOf<Self>, DispatchError>`. Services generic over their
/// client are written `impl<C: ClientProxy> UsersService<C> { ... }`.
///
/// A method without an argument sends `()`, which normalizes to
/// `{"id": null}`. The `id` key is always present, never omitted, so
/// handlers can decode it as an `Option`.
///
/// ```rust
/// use pattern_framework::mock::MockClient;
/// use pattern_framework::{auto_send, AutoSend, AutoSendOptions, AutoSender};
/// use std::sync::Arc;
///
/// struct UsersService {
///     sender: AutoSender<MockClient>,
/// }
///
/// impl AutoSend for UsersService {
///     type Client = MockClient;
///     fn sender(&self) -> &AutoSender<MockClient> {
///         &self.sender
///     }
/// }
///
/// auto_send! {
///     impl UsersService {
///         pub fn find_all(&self);
///         pub fn find_one(&self, id: u32);
///     }
/// }
///
/// let client = Arc::new(MockClient::new());
/// client.expect_send("users.find_one").return_ok(serde_json::json!(null));
/// let service = UsersService {
///     sender: AutoSender::new::<UsersService>(AutoSendOptions::new("userClient"))
///         .with_client(client.clone()),
/// };
/// let _pending = service.find_one(1).unwrap();
/// assert_eq!(client.sent()[0].payload, serde_json::json!({ "id": 1 }));
/// ```
#[macro_export]
macro_rules! auto_send {
    (impl<$($generic:ident : $bound:path),*> $service:ty {
        $(
            $(#[$meta:meta])*
            $vis:vis fn $method:ident(&self $(, $arg:ident : $arg_ty:ty)?);
        )*
    }) => {
        impl<$($generic: $bound),*> $service {
            $(
                $(#[$meta])*
                $vis fn $method(
                    &self
                    $(, $arg: $arg_ty)?
                ) -> ::std::result::Result<$crate::ReplyOf<Self>, $crate::DispatchError> {
                    #[allow(unused_variables)]
                    let payload = ();
                    $( let payload = $arg; )?
                    $crate::AutoSend::auto_send(self, ::std::stringify!($method), payload)
                }
            )*
        }
    };
    (impl $service:ty { $($body:tt)* }) => {
        $crate::auto_send! { impl<> $service { $($body)* } }
    };
}
