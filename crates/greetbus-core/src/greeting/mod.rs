//! Greeting domain: the fixed reply catalogue and the simulated-work delay.
//!
//! - `catalog`: immutable set of greetings the worker chooses from
//! - `delay`: uniform delay range sampled once per request

pub mod catalog;
pub mod delay;

pub use catalog::{Greeting, GreetingCatalog, GREETINGS};
pub use delay::{DelayRange, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS};
