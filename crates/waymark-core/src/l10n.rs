//! Localization seam.
//!
//! The host owns translation. The resolver only needs to tell internal
//! translation keys (`$piece_deposit_copper`) apart from display strings and
//! to turn a key into the text a player would see.

use std::collections::HashMap;
use std::path::Path;

use crate::error::LoadError;
use crate::loader;

/// Leading marker of an internal-form (translation key) name.
pub const INTERNAL_NAME_PREFIX: char = '$';

pub trait Localizer: Send + Sync {
    /// Translate a key. Unknown keys come back unchanged.
    fn translate(&self, key: &str) -> String;

    /// Translate a key and substitute `{0}`, `{1}`, ... with `args`.
    fn localize(&self, key: &str, args: &[&str]) -> String {
        args.iter()
            .enumerate()
            .fold(self.translate(key), |text, (i, arg)| {
                text.replace(&format!("{{{}}}", i), arg)
            })
    }

    fn is_internal_name(&self, name: &str) -> bool {
        name.starts_with(INTERNAL_NAME_PREFIX)
    }

    /// Translate `name` if it is a key, otherwise return it as is.
    fn translate_internal_name_only(&self, name: &str) -> String {
        if self.is_internal_name(name) {
            self.translate(name)
        } else {
            name.to_string()
        }
    }
}

/// Localizer backed by a flat key -> text table.
///
/// Keys are stored without the `$` prefix, so both `"$item_wood"` and
/// `"item_wood"` in the source table address the same entry.
#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    entries: HashMap<String, String>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl AsRef<str>, text: impl Into<String>) {
        self.entries
            .insert(strip_prefix(key.as_ref()).to_string(), text.into());
    }

    /// Load a JSON object of `{ "key": "text" }` pairs.
    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let content = loader::read(path)?;
        let raw: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| LoadError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(raw.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for KeyTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = KeyTable::new();
        for (key, text) in iter {
            table.insert(key, text);
        }
        table
    }
}

impl Localizer for KeyTable {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(strip_prefix(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn strip_prefix(key: &str) -> &str {
    key.strip_prefix(INTERNAL_NAME_PREFIX).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> KeyTable {
        [
            ("$piece_deposit_copper", "Copper deposit"),
            ("msg_found", "Found {0} at {1}"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_internal_name_detection() {
        let l10n = table();
        assert!(l10n.is_internal_name("$piece_deposit_copper"));
        assert!(!l10n.is_internal_name("Copper"));
        assert!(!l10n.is_internal_name(""));
    }

    #[test]
    fn test_translate_with_and_without_prefix() {
        let l10n = table();
        assert_eq!(l10n.translate("$piece_deposit_copper"), "Copper deposit");
        assert_eq!(l10n.translate("piece_deposit_copper"), "Copper deposit");
        assert_eq!(l10n.translate("$unknown_key"), "$unknown_key");
    }

    #[test]
    fn test_translate_internal_name_only() {
        let l10n = table();
        assert_eq!(
            l10n.translate_internal_name_only("$piece_deposit_copper"),
            "Copper deposit"
        );
        // Display strings that happen to equal a key are left alone.
        assert_eq!(
            l10n.translate_internal_name_only("piece_deposit_copper"),
            "piece_deposit_copper"
        );
    }

    #[test]
    fn test_localize_substitutes_arguments() {
        let l10n = table();
        assert_eq!(
            l10n.localize("$msg_found", &["Copper", "Black Forest"]),
            "Found Copper at Black Forest"
        );
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");
        std::fs::write(&path, r#"{"$enemy_troll": "Troll"}"#).unwrap();

        let l10n = KeyTable::from_json_file(&path).unwrap();
        assert_eq!(l10n.len(), 1);
        assert_eq!(l10n.translate("$enemy_troll"), "Troll");
    }

    #[test]
    fn test_from_json_file_with_byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");
        std::fs::write(&path, "\u{feff}{\"$enemy_troll\": \"Troll\"}").unwrap();

        let l10n = KeyTable::from_json_file(&path).unwrap();
        assert_eq!(l10n.translate("$enemy_troll"), "Troll");
    }

    #[test]
    fn test_from_json_file_rejects_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            KeyTable::from_json_file(&path),
            Err(LoadError::Parse { .. })
        ));
    }
}
