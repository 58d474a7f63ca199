//! Ordered collection of custom icon definitions.
//!
//! Sources are loaded in precedence order: bundled defaults, then every
//! extension directory, then the injected override directory. Inside one
//! `Textures` directory the legacy table is read before the structured
//! document. A source that is missing is skipped quietly; a source that is
//! broken is logged and skipped; an entry whose image cannot be found is
//! dropped with a warning. None of these stop the remaining sources.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::icon::{IconDefinition, LegacyIcon, StructuredIcon};
use crate::l10n::Localizer;
use crate::loader::{self, SpriteLoader, DOCUMENT_FILE, LEGACY_TABLE_FILE};

/// Name of the asset subdirectory holding definition files and images.
pub const TEXTURES_DIR: &str = "Textures";

pub struct IconCatalog {
    entries: Vec<IconDefinition>,
    sprites: Arc<dyn SpriteLoader>,
    l10n: Arc<dyn Localizer>,
}

impl IconCatalog {
    pub fn new(sprites: Arc<dyn SpriteLoader>, l10n: Arc<dyn Localizer>) -> Self {
        Self {
            entries: Vec::new(),
            sprites,
            l10n,
        }
    }

    /// Load the bundled definitions. Returns the number of entries added.
    pub fn load_defaults(&mut self, textures_dir: &Path) -> usize {
        tracing::info!("Loading default icons from {}", textures_dir.display());
        self.load_source(textures_dir)
    }

    /// Load one override source. Returns the number of entries added.
    pub fn load_overrides(&mut self, textures_dir: &Path) -> usize {
        self.load_source(textures_dir)
    }

    /// Load `<sub>/Textures` for every immediate subdirectory of
    /// `plugin_dir`, in directory name order.
    pub fn load_extensions(&mut self, plugin_dir: &Path) -> usize {
        extension_dirs(plugin_dir)
            .iter()
            .map(|dir| self.load_overrides(dir))
            .sum()
    }

    pub fn entries(&self) -> &[IconDefinition] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<IconDefinition> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn load_source(&mut self, dir: &Path) -> usize {
        let before = self.entries.len();

        let table = dir.join(LEGACY_TABLE_FILE);
        if table.is_file() {
            self.load_legacy_table(dir, &table);
        }

        let document = dir.join(DOCUMENT_FILE);
        if document.is_file() {
            self.load_document(dir, &document);
        }

        self.entries.len() - before
    }

    fn load_legacy_table(&mut self, dir: &Path, path: &Path) {
        tracing::info!("Load custom icon data from {}", path.display());

        let rows = match loader::read_legacy_table(path) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Failed to load custom icon data: {}: {}", path.display(), e);
                return;
            }
        };

        for row in rows {
            match self.sprites.load(dir, &row.sprite) {
                Ok(sprite) => {
                    tracing::info!("* Loaded custom icon for {}", row.name);
                    self.entries.push(IconDefinition::Legacy(LegacyIcon {
                        is_internal_name: self.l10n.is_internal_name(&row.name),
                        name: row.name,
                        sprite,
                    }));
                }
                Err(e) => tracing::warn!("Skipping custom icon for {}: {}", row.name, e),
            }
        }
    }

    fn load_document(&mut self, dir: &Path, path: &Path) {
        tracing::info!("Load custom icon data from {}", path.display());

        let definitions = match loader::read_document(path) {
            Ok(definitions) => definitions,
            Err(e) => {
                tracing::error!("Failed to load custom icon data: {}: {}", path.display(), e);
                return;
            }
        };

        for data in definitions {
            match self.sprites.load(dir, &data.sprite) {
                Ok(sprite) => {
                    tracing::info!("* Loaded custom icon data for {}", data.target.name);
                    self.entries.push(IconDefinition::Structured(StructuredIcon {
                        target: data.target,
                        sprite,
                        options: data.options,
                    }));
                }
                Err(e) => tracing::error!(
                    "Failed to load custom icon data for {}: {}",
                    data.target.name,
                    e
                ),
            }
        }
    }
}

fn extension_dirs(plugin_dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(plugin_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                "Failed to read extension directory {}: {}",
                plugin_dir.display(),
                e
            );
            return Vec::new();
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs.into_iter().map(|dir| dir.join(TEXTURES_DIR)).collect()
}
