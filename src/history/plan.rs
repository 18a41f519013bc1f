//! Decides how each history entry is rendered.

use super::entry::{ChatEntry, Role};

/// Rendering path for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Finalized bubble rendered once.
    Historical,
    /// The single in-progress assistant reply.
    LiveReply,
}

/// Only the final entry, and only when it is an animating assistant turn,
/// takes the live-reply path.
#[must_use]
pub fn render_mode(index: usize, len: usize, entry: &ChatEntry) -> RenderMode {
    let is_last = index + 1 == len;
    if is_last && entry.role == Role::Assistant && entry.animate {
        RenderMode::LiveReply
    } else {
        RenderMode::Historical
    }
}

/// Pair every entry with its rendering path, in order.
pub fn plan(entries: &[ChatEntry]) -> impl Iterator<Item = (RenderMode, &ChatEntry)> {
    let len = entries.len();
    entries
        .iter()
        .enumerate()
        .map(move |(index, entry)| (render_mode(index, len, entry), entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animating(role: Role) -> ChatEntry {
        let mut entry = match role {
            Role::User => ChatEntry::user("x"),
            Role::Assistant => ChatEntry::assistant("x"),
        };
        entry.animate = true;
        entry
    }

    #[test]
    fn test_only_last_animating_assistant_is_live() {
        let entries = vec![
            ChatEntry::user("a"),
            animating(Role::Assistant),
            ChatEntry::user("b"),
            animating(Role::Assistant),
        ];
        let modes: Vec<RenderMode> = plan(&entries).map(|(mode, _)| mode).collect();
        assert_eq!(
            modes,
            vec![
                RenderMode::Historical,
                RenderMode::Historical,
                RenderMode::Historical,
                RenderMode::LiveReply,
            ]
        );
    }

    #[test]
    fn test_last_user_turn_is_never_live() {
        let entries = vec![ChatEntry::assistant("a"), animating(Role::User)];
        assert!(plan(&entries).all(|(mode, _)| mode == RenderMode::Historical));
    }

    #[test]
    fn test_last_assistant_without_animate_is_historical() {
        let entries = vec![ChatEntry::user("a"), ChatEntry::assistant("b")];
        assert!(plan(&entries).all(|(mode, _)| mode == RenderMode::Historical));
    }
}
