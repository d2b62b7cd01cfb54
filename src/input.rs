//! Advisory key bindings for fold commands.
//!
//! Built from the key strings in [`crate::config::KeyConfig`]; the host is
//! free to rebind or ignore these and drive the controller directly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::command::FoldCommand;
use crate::config::KeyConfig;

/// A displayable keybinding entry
#[derive(Debug, Clone)]
pub struct KeybindingEntry {
    pub key: String,
    pub description: String,
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, FoldCommand>,
}

impl KeyBindings {
    /// Build bindings from config key strings. Strings that fail to parse
    /// are skipped, leaving the command reachable via command mode only.
    pub fn new(keys: &KeyConfig) -> Self {
        let mut bindings = HashMap::new();
        if let Some(event) = parse_key(&keys.toggle_at_point) {
            bindings.insert(event, FoldCommand::ToggleAtPoint);
        }
        if let Some(event) = parse_key(&keys.toggle_all) {
            bindings.insert(event, FoldCommand::ToggleAll);
        }
        Self { bindings }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<FoldCommand> {
        self.bindings.get(event).copied()
    }

    /// All bindings as displayable entries for a help view.
    pub fn all_bindings(&self) -> Vec<KeybindingEntry> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(event, command)| KeybindingEntry {
                key: format_key_event(event),
                description: command_description(*command),
            })
            .collect();
        entries.sort_by(|a, b| a.description.cmp(&b.description));
        entries
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(&KeyConfig::default())
    }
}

/// Parse a key string like "Tab", "Space", "Ctrl+T" or "z" into a KeyEvent.
pub fn parse_key(input: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut key = input.trim();

    loop {
        let lower = key.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("ctrl+") {
            modifiers |= KeyModifiers::CONTROL;
            key = &key[key.len() - rest.len()..];
        } else if let Some(rest) = lower.strip_prefix("shift+") {
            modifiers |= KeyModifiers::SHIFT;
            key = &key[key.len() - rest.len()..];
        } else if let Some(rest) = lower.strip_prefix("alt+") {
            modifiers |= KeyModifiers::ALT;
            key = &key[key.len() - rest.len()..];
        } else {
            break;
        }
    }

    let code = match key.to_ascii_lowercase().as_str() {
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        _ => {
            let mut chars = key.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            // Ctrl+T arrives from crossterm as a lowercase char
            if modifiers.contains(KeyModifiers::CONTROL) {
                KeyCode::Char(c.to_ascii_lowercase())
            } else {
                KeyCode::Char(c)
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

/// Format a KeyEvent for display
fn format_key_event(event: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl+");
    }
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift+");
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt+");
    }

    let key_str = match event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        _ => format!("{:?}", event.code),
    };

    format!("{}{}", parts.join(""), key_str)
}

fn command_description(command: FoldCommand) -> String {
    match command {
        FoldCommand::FoldAtPoint => "Fold thread at point".to_string(),
        FoldCommand::UnfoldAtPoint => "Unfold thread at point".to_string(),
        FoldCommand::ToggleAtPoint => "Toggle thread folding at point".to_string(),
        FoldCommand::FoldAll => "Fold all threads".to_string(),
        FoldCommand::UnfoldAll => "Unfold all threads".to_string(),
        FoldCommand::ToggleAll => "Toggle folding of all threads".to_string(),
        FoldCommand::Activate => "Enable thread folding".to_string(),
        FoldCommand::Deactivate => "Disable thread folding".to_string(),
    }
}
