use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::target::{IconOptions, MetaData, PinningTarget};

/// Index into the host's icon sprite and visibility tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IconType(pub u32);

impl IconType {
    /// Generic marker used when nothing in the catalog matches.
    pub const DEFAULT: IconType = IconType(3);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for IconType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "icon-{}", self.0)
    }
}

/// Sprite reference as written in a definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteInfo {
    /// Image path relative to the definition file. Empty when not given.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A sprite that was resolved to an image on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Sprite {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Entry from a flat legacy table: a name and a sprite, nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyIcon {
    pub name: String,
    /// Cached at load time; legacy names never change afterwards.
    pub is_internal_name: bool,
    pub sprite: Sprite,
}

/// Entry from a structured document.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredIcon {
    pub target: PinningTarget,
    pub sprite: Sprite,
    pub options: IconOptions,
}

/// One catalog entry, tagged by the format generation it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum IconDefinition {
    Legacy(LegacyIcon),
    Structured(StructuredIcon),
}

impl IconDefinition {
    pub fn name(&self) -> &str {
        match self {
            IconDefinition::Legacy(icon) => &icon.name,
            IconDefinition::Structured(icon) => &icon.target.name,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        match self {
            IconDefinition::Legacy(icon) => &icon.sprite,
            IconDefinition::Structured(icon) => &icon.sprite,
        }
    }

    /// Legacy entries never carry a metadata constraint.
    pub fn metadata(&self) -> Option<MetaData> {
        match self {
            IconDefinition::Legacy(_) => None,
            IconDefinition::Structured(icon) => icon.target.metadata,
        }
    }

    /// Legacy entries always resolve with default options.
    pub fn options(&self) -> IconOptions {
        match self {
            IconDefinition::Legacy(_) => IconOptions::default(),
            IconDefinition::Structured(icon) => icon.options,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, IconDefinition::Legacy(_))
    }
}
