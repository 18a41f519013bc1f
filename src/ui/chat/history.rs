//! Chat history list, empty-state welcome and suggested messages.

use std::sync::Arc;

use leptos::prelude::*;
use tracing::debug;

use super::message::{HistoricalMessage, PromptReply};
use crate::history::{ChatHistory, ChatHistoryController, RenderMode, plan};
use crate::platform::{Platform, WidgetEvent};
use crate::settings::EmbedSettings;
use crate::ui::components::{ArrowDownIcon, LoaderIcon, ScrollArea};

/// Greeting shown on an empty history when none is configured.
pub const DEFAULT_GREETING: &str = "Send a chat to get started.";

/// Welcome animation on the empty history.
pub const WELCOME_GIF: &str = "https://media.giphy.com/media/v1.Y2lkPTc5MGI3NjExcDJ3cm50Y3ExOWF1NXdnbzFiMjR2NmRzZnB0MXE0cWhhbG41NjB6dyZlcD12MV9pbnRlcm5hbF9naWZfYnlfaWQmY3Q9cw/bcKmIWkUMCjVm/giphy.gif";

/// Forward a suggested message to the send pathway.
pub fn send_suggestion(platform: &dyn Platform, text: &str) {
    debug!(name: "embed.history.suggestion_clicked", "Suggested message selected");
    platform.dispatch_event(WidgetEvent::send_text(text));
}

/// Clickable suggested messages; renders nothing when none are configured.
#[component]
pub fn SuggestedMessages(
    /// Resolved widget settings.
    settings: Arc<EmbedSettings>,
    /// Event target for the send-text event.
    platform: Arc<dyn Platform>,
) -> impl IntoView {
    if settings.default_messages.is_empty() {
        return ().into_any();
    }

    let mut style = format!(
        "word-break: break-word; background-color: {};",
        settings.button_color
    );
    if let Some(px) = settings.text_size {
        style.push_str(&format!(" font-size: {px}px;"));
    }

    let buttons = settings
        .default_messages
        .iter()
        .map(|content| {
            let platform = Arc::clone(&platform);
            let command = content.clone();
            view! {
                <button
                    type="button"
                    style=style.clone()
                    class="msg-suggestion allm-border-none hover:allm-shadow-[0_4px_14px_rgba(0,0,0,0.5)] allm-cursor-pointer allm-px-2 allm-py-2 allm-rounded-lg allm-text-white allm-w-full allm-shadow-[0_4px_14px_rgba(0,0,0,0.25)]"
                    on:click=move |_| send_suggestion(platform.as_ref(), &command)
                >
                    {content.clone()}
                </button>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="allm-flex allm-flex-col allm-gap-y-2 allm-w-[75%]">
            {buttons}
        </div>
    }
    .into_any()
}

/// Empty-history state: welcome graphic, greeting and suggestions.
#[component]
fn WelcomePanel(settings: Arc<EmbedSettings>, platform: Arc<dyn Platform>) -> impl IntoView {
    let greeting = settings
        .greeting
        .clone()
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    view! {
        <div class="allm-pb-[50px] allm-pt-[5px] allm-rounded-lg allm-px-2 allm-h-full allm-mt-2 allm-gap-y-2 allm-overflow-y-scroll allm-flex allm-flex-col allm-justify-start allm-no-scroll">
            <div class="allm-flex allm-h-full allm-flex-col allm-items-center allm-justify-center">
                <img
                    src=WELCOME_GIF
                    alt="Welcome"
                    class="allm-w-24 allm-h-24 allm-mb-4 allm-rounded-full allm-shadow-lg allm-animate-bounce"
                />
                <p class="allm-greeting allm-text-slate-400 allm-text-sm allm-font-sans allm-py-4 allm-text-center">
                    {greeting}
                </p>
                <SuggestedMessages settings=settings platform=platform />
            </div>
        </div>
    }
}

/// Floating control that smooth-scrolls to the newest entry.
#[component]
fn ScrollToBottomButton(controller: Arc<ChatHistoryController>) -> impl IntoView {
    view! {
        <div class="allm-fixed allm-bottom-[10rem] allm-right-[50px] allm-z-50 allm-cursor-pointer allm-animate-pulse">
            <div class="allm-flex allm-flex-col allm-items-center">
                <button
                    type="button"
                    id="scroll-to-bottom-button"
                    aria-label="Scroll to bottom"
                    class="allm-p-1 allm-rounded-full allm-border allm-border-white/10 allm-bg-black/20 hover:allm-bg-black/50"
                    on:click=move |_| controller.jump_to_bottom()
                >
                    <ArrowDownIcon class="allm-text-white/50 allm-w-5 allm-h-5" />
                </button>
            </div>
        </div>
    }
}

/// The chat history.
///
/// Empty history renders the welcome panel. Otherwise every entry renders as
/// a historical bubble except a trailing animating assistant turn, which
/// renders as the live reply. The jump-to-bottom control appears whenever the
/// controller reports the view is scrolled away from the bottom.
#[component]
pub fn ChatHistoryView(
    /// Snapshot to render.
    history: ChatHistory,
    /// Resolved widget settings.
    settings: Arc<EmbedSettings>,
    /// Scroll state of the history element.
    controller: Arc<ChatHistoryController>,
    /// Event target for suggested messages.
    platform: Arc<dyn Platform>,
) -> impl IntoView {
    if history.is_empty() {
        return view! { <WelcomePanel settings=settings platform=platform /> }.into_any();
    }

    let rows = plan(history.entries())
        .map(|(mode, entry)| match mode {
            RenderMode::Historical => view! {
                <HistoricalMessage entry=entry.clone() settings=Arc::clone(&settings) />
            }
            .into_any(),
            RenderMode::LiveReply => view! {
                <PromptReply entry=entry.clone() settings=Arc::clone(&settings) />
            }
            .into_any(),
        })
        .collect::<Vec<_>>();

    let jump = controller
        .show_jump_to_bottom()
        .then(|| view! { <ScrollToBottomButton controller=Arc::clone(&controller) /> });

    view! {
        <ScrollArea id="chat-history" class="allm-pt-[5px] allm-rounded-lg allm-px-2 allm-gap-y-2">
            {rows}
            {jump}
        </ScrollArea>
    }
    .into_any()
}

/// Placeholder while history is loading.
#[component]
pub fn ChatHistoryLoading() -> impl IntoView {
    view! {
        <div class="allm-h-full allm-w-full allm-relative">
            <div class="allm-h-full allm-max-h-[82vh] allm-pb-[100px] allm-pt-[5px] allm-bg-gray-100 allm-rounded-lg allm-px-2 allm-mt-2 allm-gap-y-2 allm-overflow-y-scroll allm-flex allm-flex-col allm-justify-start allm-no-scroll">
                <div class="allm-flex allm-h-full allm-flex-col allm-items-center allm-justify-center">
                    <LoaderIcon class="allm-text-slate-400" />
                </div>
            </div>
        </div>
    }
}
