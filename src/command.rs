//! Command types and parsing for the host's command mode.

use crate::engine::{FoldOutcome, ViewFold};
use crate::lifecycle::{FoldController, NotificationSource};
use crate::view::MessageListView;

/// Result of command execution, for the host status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Success(String),
    Error(String),
}

/// Help information for a command
#[derive(Debug, Clone)]
pub struct CommandHelp {
    pub name: &'static str,
    pub description: &'static str,
}

/// Parsed fold command from user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldCommand {
    FoldAtPoint,
    UnfoldAtPoint,
    ToggleAtPoint,
    FoldAll,
    UnfoldAll,
    ToggleAll,
    Activate,
    Deactivate,
}

/// Parse a command string into a FoldCommand
pub fn parse_command(input: &str) -> Option<FoldCommand> {
    let trimmed = input.trim();
    match trimmed {
        "fold" => Some(FoldCommand::FoldAtPoint),
        "unfold" => Some(FoldCommand::UnfoldAtPoint),
        "toggle" | "fold-toggle" => Some(FoldCommand::ToggleAtPoint),
        "fold-all" | "foldall" => Some(FoldCommand::FoldAll),
        "unfold-all" | "unfoldall" => Some(FoldCommand::UnfoldAll),
        "toggle-all" | "toggleall" => Some(FoldCommand::ToggleAll),
        "fold-on" => Some(FoldCommand::Activate),
        "fold-off" => Some(FoldCommand::Deactivate),
        _ => None,
    }
}

/// Get all available commands for help display
pub fn available_commands() -> Vec<CommandHelp> {
    vec![
        CommandHelp {
            name: "fold",
            description: "Fold the thread at point (hide read replies)",
        },
        CommandHelp {
            name: "unfold",
            description: "Unfold the thread at point",
        },
        CommandHelp {
            name: "toggle",
            description: "Toggle folding of the thread at point",
        },
        CommandHelp {
            name: "fold-all",
            description: "Fold every thread in the view",
        },
        CommandHelp {
            name: "unfold-all",
            description: "Unfold every thread in the view",
        },
        CommandHelp {
            name: "toggle-all",
            description: "Toggle folding of the whole view",
        },
        CommandHelp {
            name: "fold-on",
            description: "Enable thread folding in this view",
        },
        CommandHelp {
            name: "fold-off",
            description: "Disable thread folding and restore visibility",
        },
    ]
}

/// Execute a fold command against the controller.
pub fn run(
    command: FoldCommand,
    controller: &mut FoldController,
    source: &mut dyn NotificationSource,
    view: &dyn MessageListView,
) -> CommandResult {
    let outcome = match command {
        FoldCommand::Activate => {
            controller.activate(source, view);
            return CommandResult::Success("Thread folding enabled".to_string());
        }
        FoldCommand::Deactivate => {
            controller.deactivate(source);
            return CommandResult::Success("Thread folding disabled".to_string());
        }
        FoldCommand::FoldAtPoint => controller.fold_at_point(view),
        FoldCommand::UnfoldAtPoint => controller.unfold_at_point(view),
        FoldCommand::ToggleAtPoint => controller.toggle_at_point(view),
        FoldCommand::FoldAll => controller.fold_all(view).map(|()| FoldOutcome::Folded),
        FoldCommand::UnfoldAll => controller.unfold_all(view).map(|()| FoldOutcome::Unfolded),
        FoldCommand::ToggleAll => controller.toggle_all(view).map(|()| {
            match controller.engine().view_state() {
                ViewFold::Folded => FoldOutcome::Folded,
                ViewFold::Unfolded => FoldOutcome::Unfolded,
            }
        }),
    };

    match outcome {
        Ok(FoldOutcome::NotAThread) => CommandResult::Success("Not on a thread".to_string()),
        Ok(FoldOutcome::NotFoldable) => CommandResult::Success("Thread has no replies".to_string()),
        Ok(FoldOutcome::Folded) => CommandResult::Success("Folded".to_string()),
        Ok(FoldOutcome::PartiallyUnfolded) => {
            CommandResult::Success("Folded (unread replies stay visible)".to_string())
        }
        Ok(FoldOutcome::Unfolded) => CommandResult::Success("Unfolded".to_string()),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}
