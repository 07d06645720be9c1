//! # Infrastructure Layer
//!
//! Concrete transports implementing the traits defined in the Domain layer.

pub mod console;
