use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::engine::ViewFold;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoldConfig {
    /// Initial whole-view fold state when folding is activated.
    #[serde(default)]
    pub default_view: ViewFold,
    #[serde(default)]
    pub styles: StyleConfig,
    #[serde(default)]
    pub keys: KeyConfig,
}

/// Named style for each of the four visual slots. The host maps these to
/// its own styling; [`crate::theme`] provides a ready-made ratatui mapping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotStyle {
    #[default]
    Default,
    Bold,
    Muted,
    Accent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleConfig {
    #[serde(default = "default_root_folded")]
    pub root_folded: SlotStyle,
    #[serde(default)]
    pub root_unfolded: SlotStyle,
    #[serde(default = "default_child_folded")]
    pub child_folded: SlotStyle,
    #[serde(default)]
    pub child_unfolded: SlotStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            root_folded: default_root_folded(),
            root_unfolded: SlotStyle::default(),
            child_folded: default_child_folded(),
            child_unfolded: SlotStyle::default(),
        }
    }
}

/// Advisory key bindings; the host may rebind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyConfig {
    #[serde(default = "default_toggle_at_point")]
    pub toggle_at_point: String,
    #[serde(default = "default_toggle_all")]
    pub toggle_all: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            toggle_at_point: default_toggle_at_point(),
            toggle_all: default_toggle_all(),
        }
    }
}

fn default_root_folded() -> SlotStyle {
    SlotStyle::Accent
}

fn default_child_folded() -> SlotStyle {
    SlotStyle::Muted
}

fn default_toggle_at_point() -> String {
    "Tab".to_string()
}

fn default_toggle_all() -> String {
    "Ctrl+T".to_string()
}

impl FoldConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mailfold");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it is absent.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = path
            .parent()
            .context("Config path has no parent directory")?;

        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
