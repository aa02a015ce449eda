//! # chat-widget
//!
//! Leptos + WASM chat widget: a scrollable message feed and an input box that
//! forwards submitted text to a chatbot endpoint and shows the reply as a bot
//! message.
//!
//! This crate contains the page, components, the message store, the exchange
//! client and its browser transport, and the session credential helpers.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
