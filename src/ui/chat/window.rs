//! The open chat panel: header, history and sponsor footer.

use std::sync::Arc;

use leptos::prelude::*;

use super::history::ChatHistoryView;
use crate::history::{ChatHistory, ChatHistoryController};
use crate::platform::Platform;
use crate::settings::EmbedSettings;
use crate::ui::components::XIcon;
use crate::widget::OpenToggle;

/// Brand image or assistant name, optional support link and the close control.
#[component]
pub fn ChatWindowHeader(
    /// Resolved widget settings.
    settings: Arc<EmbedSettings>,
    /// Open state; the close control sets it to `false`.
    open: OpenToggle,
) -> impl IntoView {
    let brand = match settings.brand_image_url.clone().filter(|u| !u.trim().is_empty()) {
        Some(url) => view! {
            <img src=url alt="Brand" class="allm-h-8 allm-max-w-[150px] allm-object-contain" />
        }
        .into_any(),
        None => view! {
            <span class="allm-text-sm allm-font-semibold allm-text-slate-700">
                {settings.assistant_name.clone()}
            </span>
        }
        .into_any(),
    };

    let support = settings.support_email.clone().map(|email| {
        let href = format!("mailto:{email}");
        view! {
            <a href=href class="allm-text-xs allm-text-slate-500 hover:allm-underline">
                "Email support"
            </a>
        }
    });

    view! {
        <div
            id="anything-llm-header"
            class="allm-flex allm-items-center allm-justify-between allm-px-4 allm-py-3 allm-border-b allm-border-gray-200 allm-bg-white"
        >
            <div class="allm-flex allm-items-center allm-gap-x-2">{brand}</div>
            <div class="allm-flex allm-items-center allm-gap-x-2">
                {support}
                <button
                    type="button"
                    aria-label="Close"
                    class="allm-border-none allm-bg-transparent allm-cursor-pointer allm-text-slate-500 hover:allm-text-slate-800"
                    on:click=move |_| open.toggle_open_chat(false)
                >
                    <XIcon class="allm-w-4 allm-h-4" />
                </button>
            </div>
        </div>
    }
}

/// "Powered by" link; hidden when `noSponsor` is set.
#[component]
pub fn SponsorFooter(settings: Arc<EmbedSettings>) -> impl IntoView {
    (!settings.no_sponsor).then(|| {
        view! {
            <div class="allm-flex allm-w-full allm-items-center allm-justify-center allm-py-2">
                <a
                    href=settings.sponsor_link.clone()
                    target="_blank"
                    rel="noreferrer"
                    class="allm-sponsor allm-text-xs allm-font-sans allm-text-gray-400 allm-no-underline hover:allm-opacity-80"
                >
                    {settings.sponsor_text.clone()}
                </a>
            </div>
        }
    })
}

/// Full open-state panel.
#[component]
pub fn ChatWindow(
    settings: Arc<EmbedSettings>,
    history: ChatHistory,
    controller: Arc<ChatHistoryController>,
    platform: Arc<dyn Platform>,
    open: OpenToggle,
) -> impl IntoView {
    view! {
        <div class="allm-flex allm-flex-col allm-h-full allm-bg-white">
            <ChatWindowHeader settings=Arc::clone(&settings) open=open />
            <div class="allm-flex-grow allm-overflow-y-auto">
                <ChatHistoryView
                    history=history
                    settings=Arc::clone(&settings)
                    controller=controller
                    platform=platform
                />
            </div>
            <SponsorFooter settings=settings />
        </div>
    }
}
