//! greetbus core: error types, the greeting catalogue, and the randomness
//! seam used to simulate variable-latency work.
//!
//! This crate carries no transport or runtime dependencies. The gateway
//! crate wires these primitives into the HTTP front door and the in-process
//! bus; tests use them directly with a seeded random source.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `GreetBusError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod greeting;
pub mod random;

/// Shared result type.
pub use error::{GreetBusError, Result};
pub use greeting::{DelayRange, Greeting, GreetingCatalog};
pub use random::{Randomness, SeededRandomness, ThreadRandomness};
