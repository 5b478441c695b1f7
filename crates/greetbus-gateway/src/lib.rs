//! greetbus gateway library entry.
//!
//! This crate wires the HTTP transport, the in-process request/reply bus,
//! the greeting worker, and the Prometheus registry into one service. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod bus;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
pub mod transport;
