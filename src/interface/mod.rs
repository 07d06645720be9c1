//! # Interface Layer
//!
//! User-facing command handlers invoked by the dispatcher.

pub mod commands;
