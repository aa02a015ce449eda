//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chat surfaces while reading/writing shared state
//! from Leptos context providers.

pub mod chat_composer;
pub mod chat_feed;
pub mod chat_widget;
