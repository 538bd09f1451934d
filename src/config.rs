//! Render style configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rstree/rstree.toml`
//! 3. Environment variables: `RSTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::errors::{StyleError, StyleResult};

/// Connector glyphs and indent width used by the renderer.
///
/// Rendering is a pure function of (tree, style); there is no process-wide
/// mutable state. The plain `render`/`display` calls use
/// [`Style::default`], everything else goes through
/// [`Tree::render_with`](crate::Tree::render_with).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Style {
    /// Number of spaces per tree level
    pub indent: usize,
    /// Vertical rail drawn through open ancestor levels
    pub edge_link: String,
    /// Connector for a child with further siblings below it
    pub edge_mid: String,
    /// Connector for the last child of its parent
    pub edge_end: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            indent: 3,
            edge_link: "│".to_string(),
            edge_mid: "├──".to_string(),
            edge_end: "└──".to_string(),
        }
    }
}

/// Raw style for intermediate parsing (fields are Option to detect "not
/// specified", so a partial file only overrides what it names).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawStyle {
    pub indent: Option<usize>,
    pub edge_link: Option<String>,
    pub edge_mid: Option<String>,
    pub edge_end: Option<String>,
}

/// Get the XDG config directory for rstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global style file.
pub fn global_style_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rstree.toml"))
}

/// Load a TOML file into RawStyle for manual merging.
fn load_raw_style(path: &Path) -> StyleResult<RawStyle> {
    let content = std::fs::read_to_string(path).map_err(|e| StyleError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| StyleError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Style {
    /// Pure-ASCII glyph set for terminals without box-drawing characters.
    pub fn ascii() -> Self {
        Self {
            indent: 3,
            edge_link: "|".to_string(),
            edge_mid: "+--".to_string(),
            edge_end: "`--".to_string(),
        }
    }

    /// Merge overlay onto self; overlay wins where specified.
    fn merge_with(&self, overlay: &RawStyle) -> Self {
        Self {
            indent: overlay.indent.unwrap_or(self.indent),
            edge_link: overlay
                .edge_link
                .clone()
                .unwrap_or_else(|| self.edge_link.clone()),
            edge_mid: overlay
                .edge_mid
                .clone()
                .unwrap_or_else(|| self.edge_mid.clone()),
            edge_end: overlay
                .edge_end
                .clone()
                .unwrap_or_else(|| self.edge_end.clone()),
        }
    }

    /// Load style with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rstree/rstree.toml`
    /// 3. Environment variables: `RSTREE_*` prefix (explicit override)
    #[instrument(level = "debug")]
    pub fn load() -> StyleResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_style_path() {
            if global_path.exists() {
                let raw = load_raw_style(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Load style from an explicit TOML file merged over the defaults.
    ///
    /// Skips the global file and the environment overrides.
    #[instrument(level = "debug")]
    pub fn load_from(path: &Path) -> StyleResult<Self> {
        let raw = load_raw_style(path)?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Apply RSTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut style: Self) -> StyleResult<Self> {
        let builder = Config::builder().add_source(Environment::with_prefix("RSTREE"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_int("indent") {
            style.indent = usize::try_from(val).map_err(|_| StyleError::Env {
                message: format!("indent must be non-negative, got {val}"),
            })?;
        }
        if let Ok(val) = config.get_string("edge_link") {
            style.edge_link = val;
        }
        if let Ok(val) = config.get_string("edge_mid") {
            style.edge_mid = val;
        }
        if let Ok(val) = config.get_string("edge_end") {
            style.edge_end = val;
        }

        Ok(style)
    }

    /// Show the effective style as TOML.
    pub fn to_toml(&self) -> StyleResult<String> {
        toml::to_string_pretty(self).map_err(|e| StyleError::Serialize {
            message: e.to_string(),
        })
    }
}

fn config_err(e: ConfigError) -> StyleError {
    StyleError::Env {
        message: e.to_string(),
    }
}
