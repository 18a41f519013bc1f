//! Markdown to sanitized HTML for message bodies.
//!
//! Model output is untrusted. Raw HTML blocks and inline HTML are demoted to
//! text before rendering, and the rendered HTML is passed through `ammonia`,
//! so nothing in a message can execute in the host page.

use pulldown_cmark::{Event, Options, Parser, html};

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render `source` as markdown and sanitize the result.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    let parser = Parser::new_ext(source, markdown_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut rendered = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut rendered, parser);
    sanitize_html(&rendered)
}

/// Strip script-executing markup from an HTML fragment.
#[must_use]
pub fn sanitize_html(fragment: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder.link_rel(Some("noopener noreferrer nofollow"));
    builder.clean(fragment).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_markdown("**bold** and `code`");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_script_tags_are_escaped() {
        let html = render_markdown("Hello <script>alert('x')</script> world");
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_block_html_is_escaped() {
        let html = render_markdown("<div onclick=\"steal()\">hi</div>\n\ntext");
        assert!(!html.contains("<div"));
        assert!(html.contains("&lt;div"));
    }

    #[test]
    fn test_javascript_links_are_neutralized() {
        let html = render_markdown("[click](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("click"));
    }

    #[test]
    fn test_links_get_rel() {
        let html = render_markdown("[docs](https://example.com)");
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("noopener"));
    }

    #[test]
    fn test_sanitize_strips_handlers() {
        let html = sanitize_html("<img src=\"x.png\" onerror=\"alert(1)\">");
        assert!(!html.contains("onerror"));
    }
}
