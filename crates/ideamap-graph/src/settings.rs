use crate::animation::AnimationSettings;
use crate::layout::{ForceLayouter, RadialLayouter, TreeLayouter};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options for every layout plus animation, as stored in `layout.json`.
/// Any missing field takes its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub tree: TreeLayouter,
    pub radial: RadialLayouter,
    pub force: ForceLayouter,
    pub animation: AnimationSettings,
}

impl LayoutSettings {
    const APP_DIR: &'static str = "ideamap";
    const FILE_NAME: &'static str = "layout.json";

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join(Self::FILE_NAME))
    }

    /// Loads from the user config directory, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!("No layout settings at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("Layout settings loaded from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::error!("Failed to load layout settings: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading layout settings {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing layout settings {:?}", path))
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating settings directory {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing layout settings {:?}", path))
    }
}
