//! Networking modules for the chatbot exchange.
//!
//! SYSTEM CONTEXT
//! ==============
//! `exchange` owns the submit flow and the `Transport` seam, `api` provides
//! the browser transport. Wire shapes live in the shared `envelope` crate.

pub mod api;
pub mod exchange;
