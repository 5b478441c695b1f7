//! Built-in bus consumers.

pub mod greeting;

pub use greeting::GreetingWorker;
