//! Push notifications for saved transactions.
//!
//! Delivery is best-effort: nothing here can fail the request that saved the
//! transaction. Lookups run inline, the gateway call runs on a detached task.

pub mod dispatcher;
pub mod error;
pub mod message;

pub use dispatcher::{DisabledNotifier, Notifier, PushDispatcher, PushGateway};
pub use error::NotificationError;
pub use message::{Audience, NotifyAction, compose};
