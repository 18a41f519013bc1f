//! Message author avatars.

use leptos::prelude::*;

use super::icons::UserIcon;

/// Icon shown next to assistant bubbles when no `assistantIcon` is configured.
pub const DEFAULT_ASSISTANT_ICON: &str =
    "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 36 36'><circle cx='18' cy='18' r='18' fill='%232563eb'/></svg>";

/// Assistant avatar image.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <AssistantAvatar icon=settings.assistant_icon.clone() />
/// }
/// ```
#[component]
pub fn AssistantAvatar(
    /// Configured icon URL, if any.
    icon: Option<String>,
) -> impl IntoView {
    let src = icon
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ASSISTANT_ICON.to_string());

    view! {
        <img
            src=src
            alt="Assistant Icon"
            class="allm-w-9 allm-h-9 allm-flex-shrink-0 allm-ml-2 allm-mt-2"
            id="anything-llm-icon"
        />
    }
}

/// Round user avatar with a glyph fallback.
#[component]
pub fn UserAvatar() -> impl IntoView {
    view! {
        <div class="allm-w-9 allm-h-9 allm-flex-shrink-0 allm-mr-2 allm-mt-2 allm-flex allm-items-center allm-justify-center allm-bg-blue-500 allm-rounded-full allm-shadow-md">
            <UserIcon class="allm-text-white allm-w-6 allm-h-6" />
        </div>
    }
}
