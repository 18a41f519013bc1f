//! Message bubbles: historical entries, the live reply and error bubbles.

use std::sync::Arc;

use chrono::Utc;
use leptos::prelude::*;
use tracing::error;

use crate::format::{format_sent_at, text_size_class};
use crate::history::{ChatEntry, Role};
use crate::markdown::render_markdown;
use crate::settings::EmbedSettings;
use crate::ui::components::{AssistantAvatar, UserAvatar, WarningIcon};

/// Shown when a failed entry carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Server error";

const BUBBLE_BASE: &str =
    "allm-py-[11px] allm-px-4 allm-flex allm-flex-col allm-font-sans allm-mx-2 allm-shadow-[0_4px_14px_rgba(0,0,0,0.15)]";
const ERROR_BUBBLE: &str = "allm-bg-red-200 allm-rounded-[20px] allm-mr-[37px] allm-ml-[9px]";
const USER_BUBBLE: &str = "allm-anything-llm-user-message allm-rounded-[20px_20px_0_20px]";
const ASSISTANT_BUBBLE: &str =
    "allm-anything-llm-assistant-message allm-rounded-[20px_20px_20px_0]";

/// Inline error body for a failed reply.
#[component]
pub fn ErrorBubble(
    /// Message reported by the caller, if any.
    message: Option<String>,
) -> impl IntoView {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

    view! {
        <div class="allm-error-bubble allm-p-2 allm-rounded-lg allm-bg-red-50 allm-text-red-500">
            <span class="allm-inline-block">
                <WarningIcon class="allm-mb-1 allm-inline-block" />
                " Could not respond to message."
            </span>
            <p class="allm-text-xs allm-font-mono allm-mt-2 allm-border-l-2 allm-border-red-500 allm-pl-2 allm-bg-red-300 allm-p-2 allm-rounded-sm">
                {message}
            </p>
        </div>
    }
}

/// Sanitized markdown body.
#[component]
fn MarkdownBody(content: String, text_size: Option<u32>) -> impl IntoView {
    let classes = format!(
        "allm-whitespace-pre-line allm-flex allm-flex-col allm-gap-y-1 {} allm-leading-[20px]",
        text_size_class(text_size)
    );
    let html = render_markdown(&content);

    view! { <span class=classes inner_html=html></span> }
}

fn bubble_style(entry: &ChatEntry, settings: &EmbedSettings) -> String {
    let color = match entry.role {
        Role::User => &settings.user_bg_color,
        Role::Assistant => &settings.assistant_bg_color,
    };
    format!("word-break: break-word; background-color: {color};")
}

/// A finalized chat bubble.
#[component]
pub fn HistoricalMessage(
    /// The entry to render.
    entry: ChatEntry,
    /// Resolved widget settings.
    settings: Arc<EmbedSettings>,
) -> impl IntoView {
    let is_user = entry.role == Role::User;
    if entry.error {
        error!(
            name: "embed.message.error",
            uuid = %entry.uuid,
            error_msg = entry.error_msg.as_deref().unwrap_or_default(),
            "Chat widget message failed"
        );
    }

    let variant = if entry.error {
        ERROR_BUBBLE
    } else if is_user {
        USER_BUBBLE
    } else {
        ASSISTANT_BUBBLE
    };
    let bubble_classes = format!("{BUBBLE_BASE} {variant}");
    let style = bubble_style(&entry, &settings);
    let row_classes = if is_user {
        "allm-flex allm-items-start allm-w-full allm-h-fit allm-justify-end"
    } else {
        "allm-flex allm-items-start allm-w-full allm-h-fit allm-justify-start"
    };
    let timestamp_classes = if is_user {
        "allm-font-sans allm-text-[10px] allm-text-gray-400 allm-ml-[54px] allm-mr-6 allm-mt-2 allm-text-right"
    } else {
        "allm-font-sans allm-text-[10px] allm-text-gray-400 allm-ml-[54px] allm-mr-6 allm-mt-2 allm-text-left"
    };
    let sent_at = format_sent_at(entry.sent_at.unwrap_or_else(|| Utc::now().timestamp()));
    let assistant_name = settings.assistant_name.clone();
    let assistant_icon = settings.assistant_icon.clone();

    let body = if entry.error {
        view! { <ErrorBubble message=entry.error_msg.clone() /> }.into_any()
    } else {
        view! { <MarkdownBody content=entry.content.clone() text_size=settings.text_size /> }
            .into_any()
    };

    view! {
        <div class="allm-historical-message allm-py-[5px]" data-message-uuid=entry.uuid.clone()>
            {(!is_user).then(|| view! {
                <div class="allm-text-[10px] allm-text-gray-400 allm-ml-[54px] allm-mr-6 allm-mb-2 allm-text-left allm-font-sans">
                    {assistant_name}
                </div>
            })}
            <div class=row_classes>
                {(!is_user).then(|| view! { <AssistantAvatar icon=assistant_icon /> })}
                <div style=style class=bubble_classes>
                    <div class="allm-flex">{body}</div>
                </div>
                {is_user.then(|| view! { <UserAvatar /> })}
            </div>
            <div class=timestamp_classes>{sent_at}</div>
        </div>
    }
}

/// The in-progress assistant reply.
///
/// Pending replies show a typing indicator; once text streams in it renders
/// like a historical bubble, flagged as streaming until `closed`.
#[component]
pub fn PromptReply(
    /// The live entry.
    entry: ChatEntry,
    /// Resolved widget settings.
    settings: Arc<EmbedSettings>,
) -> impl IntoView {
    let style = bubble_style(&entry, &settings);
    let assistant_name = settings.assistant_name.clone();
    let streaming = if entry.closed { "false" } else { "true" };

    let body = if entry.pending {
        view! {
            <div class="allm-mx-4 allm-my-1">
                <div class="allm-dot-falling" aria-label="Assistant is typing"></div>
            </div>
        }
        .into_any()
    } else if entry.error {
        view! { <ErrorBubble message=entry.error_msg.clone() /> }.into_any()
    } else {
        view! { <MarkdownBody content=entry.content.clone() text_size=settings.text_size /> }
            .into_any()
    };

    let bubble_classes = if entry.error {
        format!("{BUBBLE_BASE} {ERROR_BUBBLE}")
    } else {
        format!("{BUBBLE_BASE} {ASSISTANT_BUBBLE}")
    };

    view! {
        <div
            class="allm-live-reply allm-py-[5px]"
            data-message-uuid=entry.uuid.clone()
            data-streaming=streaming
        >
            <div class="allm-text-[10px] allm-text-gray-400 allm-ml-[54px] allm-mr-6 allm-mb-2 allm-text-left allm-font-sans">
                {assistant_name}
            </div>
            <div class="allm-flex allm-items-start allm-w-full allm-h-fit allm-justify-start">
                <AssistantAvatar icon=settings.assistant_icon.clone() />
                <div style=style class=bubble_classes>
                    <div class="allm-flex">{body}</div>
                </div>
            </div>
        </div>
    }
}
