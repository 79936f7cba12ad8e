//! Object-safe publishing handle.
//!
//! `EventBus` carries an associated error type, which makes `dyn EventBus`
//! awkward to store. Producers that only publish hold an
//! `Arc<dyn EventPublisher<M>>` instead; every `EventBus` is one.

use std::sync::Arc;

use thiserror::Error;

use crate::bus::EventBus;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to publish event: {0}")]
pub struct PublishError(pub String);

pub trait EventPublisher<M>: Send + Sync {
    fn publish(&self, message: M) -> Result<(), PublishError>;
}

impl<M, B> EventPublisher<M> for B
where
    B: EventBus<M>,
{
    fn publish(&self, message: M) -> Result<(), PublishError> {
        EventBus::publish(self, message).map_err(|e| PublishError(format!("{e:?}")))
    }
}

/// Convenience for handing a shared bus to a producer.
pub fn publisher_for<M, B>(bus: Arc<B>) -> Arc<dyn EventPublisher<M>>
where
    M: 'static,
    B: EventBus<M> + 'static,
{
    bus
}
