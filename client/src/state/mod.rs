//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is held as plain structs wrapped in `RwSignal`s provided via
//! context, so logic stays testable without a reactive runtime.

pub mod chat;
