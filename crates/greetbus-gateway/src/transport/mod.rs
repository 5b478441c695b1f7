//! Transport layer (HTTP).
//!
//! Translates HTTP calls into bus requests and bus replies into HTTP
//! responses.

pub mod http;
