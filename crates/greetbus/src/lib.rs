//! Top-level facade crate for greetbus.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use greetbus_core::*;
}

pub mod gateway {
    pub use greetbus_gateway::*;
}
