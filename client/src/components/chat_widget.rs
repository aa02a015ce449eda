//! Chat widget: message feed, pending indicator and composer.

#[cfg(test)]
#[path = "chat_widget_test.rs"]
mod chat_widget_test;

use leptos::prelude::*;

use crate::components::chat_composer::ChatComposer;
use crate::components::chat_feed::ChatFeed;
use crate::state::chat::{ChatState, ExchangeStatus};

/// Text shown under the feed for the aggregate exchange status.
fn status_label(status: ExchangeStatus, pending: usize) -> Option<String> {
    match status {
        ExchangeStatus::Pending if pending > 1 => Some(format!("Bot is replying to {pending} messages...")),
        ExchangeStatus::Pending => Some("Bot is typing...".to_owned()),
        ExchangeStatus::Idle | ExchangeStatus::Succeeded | ExchangeStatus::Failed => None,
    }
}

#[component]
pub fn ChatWidget() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();

    let label = move || chat.with(|c| status_label(c.status(), c.pending_count()));

    view! {
        <div class="chat-widget">
            <ChatFeed/>
            {move || label().map(|text| view! { <div class="chat-widget__pending">{text}</div> })}
            <ChatComposer/>
        </div>
    }
}
