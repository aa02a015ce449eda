//! Single-line message input that starts an exchange on submit.
//!
//! SYSTEM CONTEXT
//! ==============
//! The User message is appended synchronously inside the submit handler; the
//! network half of the exchange is spawned onto the browser task queue. On
//! the server nothing is spawned.

#[cfg(test)]
#[path = "chat_composer_test.rs"]
mod chat_composer_test;

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::config::ClientConfig;
use crate::net::exchange::begin_exchange;
use crate::state::chat::ChatState;

/// Whether the current draft would be accepted by the exchange client.
fn can_send(draft: &str) -> bool {
    !draft.trim().is_empty()
}

/// Message input form. Enter submits; the draft clears only when accepted.
#[component]
pub fn ChatComposer() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    #[cfg(feature = "hydrate")]
    let config = expect_context::<RwSignal<ClientConfig>>();
    let input = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked();
        #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
        let Ok(pending) = begin_exchange(&chat, &text) else {
            return;
        };
        input.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            use crate::net::api::{BrowserExchangeClient, GlooTransport};

            let client = BrowserExchangeClient::new(config.get_untracked(), GlooTransport);
            leptos::task::spawn_local(async move {
                client.complete(&chat, pending).await;
            });
        }
    };

    view! {
        <form class="chat-composer" on:submit=on_submit>
            <input
                class="chat-composer__input"
                type="text"
                placeholder="Type a message..."
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
            />
            <button class="btn btn--primary chat-composer__send" type="submit" disabled=move || !can_send(&input.get())>
                "Send"
            </button>
        </form>
    }
}
