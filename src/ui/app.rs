//! Root widget component.

use std::sync::Arc;

use leptos::prelude::*;

use crate::settings::EmbedSettings;
use crate::ui::chat::ChatWindow;
use crate::ui::components::{ChatBubbleIcon, PlusIcon, SparklesIcon};
use crate::widget::{OpenToggle, WidgetSnapshot};

/// Icon on the floating open button for a `chatIcon` value.
#[component]
fn OpenButtonIcon(chat_icon: String) -> impl IntoView {
    const CLASS: &str = "allm-text-white allm-w-6 allm-h-6";
    match chat_icon.as_str() {
        "chatBubble" | "chatCircle" => view! { <ChatBubbleIcon class=CLASS /> }.into_any(),
        "magic" | "sparkles" => view! { <SparklesIcon class=CLASS /> }.into_any(),
        _ => view! { <PlusIcon class=CLASS /> }.into_any(),
    }
}

/// Floating button shown while the panel is closed.
#[component]
fn OpenButton(settings: Arc<EmbedSettings>, open: OpenToggle) -> impl IntoView {
    let style = format!("background-color: {};", settings.button_color);
    let classes = format!(
        "allm-fixed allm-mb-4 allm-z-50 {}",
        settings.position.classes()
    );

    view! {
        <div id="anything-llm-embed-chat-button-container" class=classes>
            <button
                type="button"
                id="anything-llm-embed-chat-button"
                aria-label="Toggle Menu"
                style=style
                class="hover:allm-cursor-pointer allm-border-none allm-flex allm-items-center allm-justify-center allm-p-4 allm-rounded-full allm-text-white allm-text-2xl hover:allm-opacity-95"
                on:click=move |_| open.toggle_open_chat(true)
            >
                <OpenButtonIcon chat_icon=settings.chat_icon.clone() />
            </button>
        </div>
    }
}

/// The whole widget.
///
/// Renders nothing until settings resolution settles. Afterwards the panel
/// is anchored at the configured corner and sized by `windowWidth` and
/// `windowHeight`; the open flag swaps it for the floating open button.
#[component]
pub fn EmbedApp(
    /// Current widget state.
    snapshot: WidgetSnapshot,
) -> impl IntoView {
    let WidgetSnapshot {
        settings,
        history,
        open,
        controller,
        platform,
    } = snapshot;
    let Some(settings) = settings else {
        return ().into_any();
    };

    let is_open = open.is_open();
    let container_class = if is_open { "allm-block" } else { "allm-hidden" };
    let panel_style = format!(
        "max-width: {width}; max-height: {height}; height: 100%;",
        width = settings.window_width_or_default(),
        height = settings.window_height_or_default(),
    );
    let panel_class = format!(
        "allm-h-full allm-w-full allm-bg-white allm-fixed allm-mb-4 allm-rounded-2xl allm-border allm-border-gray-300 allm-shadow-[0_4px_14px_rgba(0,0,0,0.25)] allm-flex allm-flex-col allm-z-50 {}",
        settings.position.classes()
    );

    let panel = is_open.then(|| {
        view! {
            <ChatWindow
                settings=Arc::clone(&settings)
                history=history
                controller=controller
                platform=platform
                open=open.clone()
            />
        }
    });
    let button = (!is_open).then(|| {
        view! { <OpenButton settings=Arc::clone(&settings) open=open.clone() /> }
    });

    view! {
        <div id="anything-llm-embed-chat-container" class=container_class>
            <div
                id="anything-llm-chat"
                class=panel_class
                style=panel_style
                data-position=settings.position.as_str()
            >
                {panel}
            </div>
        </div>
        {button}
    }
    .into_any()
}
