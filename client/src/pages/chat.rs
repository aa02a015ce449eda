//! Single chat page hosting the widget.

use leptos::prelude::*;

use crate::components::chat_widget::ChatWidget;

#[component]
pub fn ChatPage() -> impl IntoView {
    view! {
        <div class="container">
            <h1 class="text-center">"Chatbot"</h1>
            <ChatWidget/>
        </div>
    }
}
