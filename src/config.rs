use std::path::PathBuf;

use waymark_core::registry::DEFAULT_NEW_ICON_VISIBILITY;
use waymark_core::TEXTURES_DIR;

/// Icon source locations and registration policy, from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bundled `Textures` directory, always loaded first.
    pub default_textures: PathBuf,
    /// Directory whose subdirectories each may carry a `Textures` directory.
    pub plugin_dir: Option<PathBuf>,
    /// `Textures` directory loaded last, after every extension.
    pub injected_textures: Option<PathBuf>,
    pub new_icons_visible: bool,
    /// JSON `{ "key": "text" }` table used to translate target names.
    pub translations: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    /// WAYMARK_DEFAULT_TEXTURES defaults to "./Textures"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |key: &str| var(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        let default_textures =
            path("WAYMARK_DEFAULT_TEXTURES").unwrap_or_else(|| PathBuf::from(TEXTURES_DIR));

        let new_icons_visible = match var("WAYMARK_NEW_ICONS_VISIBLE") {
            None => DEFAULT_NEW_ICON_VISIBILITY,
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid(
                "WAYMARK_NEW_ICONS_VISIBLE",
                "must be true or false",
            ))?,
        };

        Ok(Config {
            default_textures,
            plugin_dir: path("WAYMARK_PLUGIN_DIR"),
            injected_textures: path("WAYMARK_INJECTED_TEXTURES"),
            new_icons_visible,
            translations: path("WAYMARK_TRANSLATIONS"),
        })
    }

    /// Create a test configuration rooted at `root`.
    #[cfg(test)]
    pub fn for_testing(root: &std::path::Path) -> Self {
        Config {
            default_textures: root.join(TEXTURES_DIR),
            plugin_dir: None,
            injected_textures: None,
            new_icons_visible: true,
            translations: None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
