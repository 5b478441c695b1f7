//! In-process request/reply bus.
//!
//! Consumers register under a logical address; `EventBus::request` hands a
//! bodiless `BusMessage` to the consumer on its own task and awaits the one
//! reply that message can produce.

pub mod event_bus;
pub mod message;

pub use event_bus::{Consumer, EventBus};
pub use message::BusMessage;
