//! Network layer - the HTTP exchange behind each POST

pub mod client;

pub use client::{HttpExchange, Timeouts};
