//! Ready-made ratatui mapping for the four visual style slots.
//!
//! Hosts with their own theming can ignore this module and map
//! [`VisualStyle`] directives to whatever styling they use; this is the
//! default look for hosts that want one.

use ratatui::style::{Color, Modifier, Style};

use crate::config::{SlotStyle, StyleConfig};
use crate::engine::VisualStyle;

/// UI symbols for fold markers - centralized for consistency
pub mod symbols {
    pub const THREAD_FOLDED: &str = "▶ ";
    pub const THREAD_UNFOLDED: &str = "▼ ";
    pub const THREAD_SINGLE: &str = "  ";

    // Thread child indent (visual tree lines)
    pub const THREAD_CHILD: &str = "  │ ";
    pub const THREAD_CHILD_MID: &str = "  ├─";
    pub const THREAD_CHILD_LAST: &str = "  └─";

    /// Shown on a folded root in place of its hidden children, e.g. "[+3]"
    pub fn hidden_badge(count: usize) -> String {
        format!("[+{}]", count)
    }
}

/// Resolve a configured slot style to a concrete ratatui style.
pub fn slot_style(slot: SlotStyle) -> Style {
    match slot {
        SlotStyle::Default => Style::default(),
        SlotStyle::Bold => Style::default().add_modifier(Modifier::BOLD),
        SlotStyle::Muted => Style::default().fg(Color::DarkGray),
        SlotStyle::Accent => Style::default().fg(Color::Cyan),
    }
}

/// Resolve a visual directive style through the configured slots.
pub fn style_for(style: VisualStyle, config: &StyleConfig) -> Style {
    let slot = match style {
        VisualStyle::RootFolded => config.root_folded,
        VisualStyle::RootUnfolded => config.root_unfolded,
        VisualStyle::ChildFolded => config.child_folded,
        VisualStyle::ChildUnfolded => config.child_unfolded,
    };
    slot_style(slot)
}

/// Fold marker for a root row in the given state.
pub fn fold_marker(style: VisualStyle) -> &'static str {
    match style {
        VisualStyle::RootFolded => symbols::THREAD_FOLDED,
        VisualStyle::RootUnfolded => symbols::THREAD_UNFOLDED,
        VisualStyle::ChildFolded | VisualStyle::ChildUnfolded => symbols::THREAD_SINGLE,
    }
}
