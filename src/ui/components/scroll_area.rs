//! Scrollable area component.

use leptos::prelude::*;

/// Scrollable container with the scrollbar hidden.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <ScrollArea id="chat-history" class="allm-h-full">
///         // Long content here
///     </ScrollArea>
/// }
/// ```
#[component]
pub fn ScrollArea(
    /// Element id, used by the host script to attach scroll listeners.
    id: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Scrollable content.
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "allm-overflow-y-scroll allm-flex allm-flex-col allm-justify-start allm-no-scroll {class}"
    );

    view! {
        <div id=id class=classes>
            {children()}
        </div>
    }
}
