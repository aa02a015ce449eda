//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own bot logic so route handlers can stay focused on
//! protocol translation.

pub mod dining;
pub mod responder;
pub mod yelp;
