//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::pages::chat::ChatPage;
use crate::state::chat::ChatState;
use crate::util::credentials;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the message store and the exchange configuration, and attaches
/// session credentials from the URL fragment once mounted in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let chat = RwSignal::new(ChatState::default());
    let config = RwSignal::new(ClientConfig::from_build_env());

    provide_context(chat);
    provide_context(config);

    // Effects only run in the browser, where the fragment is visible.
    Effect::new(move || {
        if let Some(found) = credentials::read_from_location() {
            leptos::logging::log!("session credentials attached from URL fragment");
            config.update(|c| c.credentials = Some(found));
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/chatbot.css"/>
        <Title text="Chatbot"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=ChatPage/>
            </Routes>
        </Router>
    }
}
