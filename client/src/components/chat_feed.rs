//! Passive message feed for the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the message store in order and keeps the newest message in view.
//! Never writes to the store.

#[cfg(test)]
#[path = "chat_feed_test.rs"]
mod chat_feed_test;

use leptos::prelude::*;

use crate::state::chat::{ChatState, Sender};

/// BEM modifier class for a message bubble.
fn message_class(sender: Sender) -> &'static str {
    match sender {
        Sender::Bot => "chat-feed__message chat-feed__message--bot",
        Sender::User => "chat-feed__message chat-feed__message--user",
    }
}

/// Scrollable list of chat messages with sender names.
#[component]
pub fn ChatFeed() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = chat.with(ChatState::len);

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    view! {
        <div class="chat-feed" node_ref=messages_ref>
            {move || {
                let messages = chat.with(|c| c.messages().to_vec());
                if messages.is_empty() {
                    return view! { <div class="chat-feed__empty">"Say hello to start chatting"</div> }
                        .into_any();
                }

                messages
                    .into_iter()
                    .map(|msg| {
                        view! {
                            <div class=message_class(msg.sender)>
                                <span class="chat-feed__sender">{msg.display_name()}</span>
                                <span class="chat-feed__text">{msg.text}</span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </div>
    }
}
