//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is a one-way fan-out: the publisher does not wait for, or hear back
//! from, its subscribers. Delivery is in publish order per subscriber. There is
//! no persistence; a subscriber only sees events published after it subscribed.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvError};

/// A subscription to an event stream.
///
/// Each subscription gets its own copy of every message published after it was
/// created (broadcast semantics).
///
/// ```ignore
/// let subscription = bus.subscribe();
/// store.add_product(new_product)?;
/// for event in subscription.drain() {
///     println!("{}", event.message());
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, RecvError> {
        self.receiver.recv()
    }

    /// Everything currently queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` may fail (e.g. a poisoned lock); the caller decides whether that
/// matters. The inventory store treats notifications as best-effort: a failed
/// publish is logged and the committed mutation stands.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
