//! Domain events and the in-process bus that fans them out.
//!
//! The inventory store emits one event per successful mutation; anything that
//! wants to react (toast-style notifications, logging, tests) subscribes here.

pub mod bus;
pub mod event;
pub mod in_memory_bus;
pub mod publisher;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use publisher::{EventPublisher, PublishError, publisher_for};
