//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the responder that answers chatbot exchanges.

use std::sync::Arc;

use crate::services::responder::Responder;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the responder is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<dyn Responder>,
}

impl AppState {
    #[must_use]
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self { responder }
    }
}
