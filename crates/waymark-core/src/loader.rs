//! Readers for the two on-disk icon definition formats.
//!
//! Supports two formats, both living in a `Textures` directory:
//! - Legacy: `CustomMapIcon.csv`, a header row then `name,file,width,height`
//! - Structured: `custom-map-icon.json`, a list of `{target, sprite, options}`
//!   objects; `//` and `/* */` comments are allowed

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::icon::{Sprite, SpriteInfo};
use crate::target::{IconOptions, PinningTarget};

pub const LEGACY_TABLE_FILE: &str = "CustomMapIcon.csv";
pub const DOCUMENT_FILE: &str = "custom-map-icon.json";

/// Turns a sprite reference into a sprite handle.
///
/// `dir` is the directory holding the definition file; sprite files are
/// resolved relative to it.
pub trait SpriteLoader: Send + Sync {
    fn load(&self, dir: &Path, info: &SpriteInfo) -> Result<Sprite, LoadError>;
}

/// Resolves sprites to image files on disk without decoding them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSpriteLoader;

impl SpriteLoader for FileSpriteLoader {
    fn load(&self, dir: &Path, info: &SpriteInfo) -> Result<Sprite, LoadError> {
        let path = dir.join(&info.file);
        if info.file.is_empty() || !path.is_file() {
            return Err(LoadError::MissingImage { path });
        }

        Ok(Sprite {
            path,
            width: info.width,
            height: info.height,
        })
    }
}

/// One row of a legacy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRow {
    pub name: String,
    pub sprite: SpriteInfo,
}

/// One object of a structured document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IconDefinitionData {
    pub target: PinningTarget,
    pub sprite: SpriteInfo,
    #[serde(default)]
    pub options: IconOptions,
}

pub fn read_legacy_table(path: &Path) -> Result<Vec<LegacyRow>, LoadError> {
    let content = read(path)?;
    parse_legacy_table(path, &content)
}

/// Parse legacy table text.
///
/// Rows with fewer than four columns are skipped. Unparsable sizes become
/// 0 and negative sizes are clamped to 0. A name seen twice keeps its first
/// position but takes the later row's sprite.
pub fn parse_legacy_table(path: &Path, content: &str) -> Result<Vec<LegacyRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows: Vec<LegacyRow> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if record.len() < 4 {
            continue;
        }

        let row = LegacyRow {
            name: record[0].to_string(),
            sprite: SpriteInfo {
                file: record[1].to_string(),
                width: parse_size(&record[2]),
                height: parse_size(&record[3]),
            },
        };

        match positions.get(&row.name) {
            Some(&i) => rows[i] = row,
            None => {
                positions.insert(row.name.clone(), rows.len());
                rows.push(row);
            }
        }
    }

    Ok(rows)
}

fn parse_size(field: &str) -> u32 {
    field.parse::<i32>().map_or(0, |size| size.max(0) as u32)
}

pub fn read_document(path: &Path) -> Result<Vec<IconDefinitionData>, LoadError> {
    let content = read(path)?;
    parse_document(path, &content)
}

/// Parse structured document text.
///
/// The document as a whole must be a JSON array. An element that does not
/// describe an icon is logged and skipped; the rest still load.
pub fn parse_document(path: &Path, content: &str) -> Result<Vec<IconDefinitionData>, LoadError> {
    let elements: Vec<serde_json::Value> =
        serde_json::from_str(&strip_comments(content)).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let definitions = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            match serde_json::from_value::<IconDefinitionData>(element) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!(
                        "Skipping custom icon data #{} in {}: {}",
                        index,
                        path.display(),
                        e
                    );
                    None
                }
            }
        })
        .collect();

    Ok(definitions)
}

/// Blank out `//` and `/* */` comments outside of string literals.
///
/// Newlines are kept so parse errors still point at the right line.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

/// Read a UTF-8 text file, dropping a leading byte order mark.
pub(crate) fn read(path: &Path) -> Result<String, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match content.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::MetaData;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("Textures/test")
    }

    #[test]
    fn test_legacy_table_skips_header_and_short_rows() {
        let rows = parse_legacy_table(
            &path(),
            "name,file,width,height\n\
             $piece_deposit_copper,copper.png,32,32\n\
             broken,row\n\
             Tin,tin.png,24,16\n",
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "$piece_deposit_copper");
        assert_eq!(rows[1].sprite.file, "tin.png");
        assert_eq!(rows[1].sprite.width, 24);
        assert_eq!(rows[1].sprite.height, 16);
    }

    #[test]
    fn test_legacy_table_bad_numbers_become_zero() {
        let rows = parse_legacy_table(
            &path(),
            "name,file,width,height\nCopper,copper.png,wide,32\nTin,tin.png,24,24\n",
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sprite.width, 0);
        assert_eq!(rows[0].sprite.height, 32);
        assert_eq!(rows[1].sprite.width, 24);
    }

    #[test]
    fn test_legacy_table_negative_sizes_clamp_to_zero() {
        let rows = parse_legacy_table(
            &path(),
            "name,file,width,height\nCopper,copper.png,-5,24\n",
        )
        .unwrap();

        assert_eq!(rows[0].sprite.width, 0);
        assert_eq!(rows[0].sprite.height, 24);
    }

    #[test]
    fn test_legacy_table_quoted_fields() {
        let rows = parse_legacy_table(
            &path(),
            "name,file,width,height\n\"Copper, raw\", copper.png ,32,32\n",
        )
        .unwrap();

        assert_eq!(rows[0].name, "Copper, raw");
        assert_eq!(rows[0].sprite.file, "copper.png");
    }

    #[test]
    fn test_legacy_table_duplicate_name_keeps_position() {
        let rows = parse_legacy_table(
            &path(),
            "name,file,width,height\nCopper,a.png,1,1\nTin,b.png,1,1\nCopper,c.png,2,2\n",
        )
        .unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Copper", "Tin"]);
        assert_eq!(rows[0].sprite.file, "c.png");
    }

    #[test]
    fn test_document_with_comments() {
        let defs = parse_document(
            &path(),
            r#"
            // Deposits
            [
              {
                "target": { "name": "$piece_deposit_copper" },
                "sprite": { "file": "copper.png", "width": 32, "height": 32 }
              },
              /* level-specific troll */
              {
                "target": { "name": "Troll", "metadata": { "level": 2 } },
                "sprite": { "file": "http://x/troll.png" },
                "options": { "hideNameTag": true }
              }
            ]
            "#,
        )
        .unwrap();

        assert_eq!(defs.len(), 2);
        assert!(defs[0].target.metadata.is_none());
        assert!(!defs[0].options.hide_name_tag);
        assert_eq!(defs[1].target.metadata, Some(MetaData::new(2)));
        assert_eq!(defs[1].sprite.file, "http://x/troll.png");
        assert!(defs[1].options.hide_name_tag);
    }

    #[test]
    fn test_document_parse_error() {
        let err = parse_document(&path(), "[ { \"target\": ").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));

        let err = parse_document(&path(), r#"{"target": {"name": "Copper"}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_document_skips_malformed_elements() {
        let defs = parse_document(
            &path(),
            r#"[
              { "target": { "name": "Copper" }, "sprite": { "file": "copper.png" } },
              { "target": 5, "sprite": { "file": "x.png" } },
              { "sprite": { "file": "no_target.png" } },
              { "target": { "name": "Tin" }, "sprite": { "width": 32, "height": 32 } },
              { "target": { "name": "Iron" }, "sprite": { "file": "iron.png" } }
            ]"#,
        )
        .unwrap();

        let names: Vec<&str> = defs.iter().map(|d| d.target.name.as_str()).collect();
        assert_eq!(names, vec!["Copper", "Tin", "Iron"]);
        // Missing file is left empty for the sprite loader to reject
        assert_eq!(defs[1].sprite.file, "");
        assert_eq!(defs[1].sprite.width, 32);
    }

    #[test]
    fn test_read_drops_byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join(DOCUMENT_FILE);
        std::fs::write(
            &document,
            "\u{feff}[{\"target\": {\"name\": \"Copper\"}, \"sprite\": {\"file\": \"a.png\"}}]",
        )
        .unwrap();
        let table = dir.path().join(LEGACY_TABLE_FILE);
        std::fs::write(&table, "\u{feff}name,file,width,height\nTin,tin.png,8,8\n").unwrap();

        let defs = read_document(&document).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].target.name, "Copper");

        let rows = read_legacy_table(&table).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Tin");
    }

    #[test]
    fn test_strip_comments_leaves_strings_alone() {
        let stripped = strip_comments(r#"{"a": "b // c", "d": "e \" /* f */"} // g"#);
        assert_eq!(stripped, r#"{"a": "b // c", "d": "e \" /* f */"} "#);
    }

    #[test]
    fn test_strip_comments_keeps_line_count() {
        let stripped = strip_comments("[\n/* one\ntwo */\n1 // x\n]");
        assert_eq!(stripped.lines().count(), 5);
        assert_eq!(
            serde_json::from_str::<Vec<i32>>(&stripped).unwrap(),
            vec![1]
        );
    }

    #[test]
    fn test_file_sprite_loader() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("copper.png"), b"png").unwrap();

        let info = SpriteInfo {
            file: "copper.png".to_string(),
            width: 32,
            height: 16,
        };
        let sprite = FileSpriteLoader.load(dir.path(), &info).unwrap();
        assert_eq!(sprite.path, dir.path().join("copper.png"));
        assert_eq!((sprite.width, sprite.height), (32, 16));

        let missing = SpriteInfo {
            file: "tin.png".to_string(),
            width: 32,
            height: 32,
        };
        assert!(matches!(
            FileSpriteLoader.load(dir.path(), &missing),
            Err(LoadError::MissingImage { .. })
        ));

        let empty = SpriteInfo {
            file: String::new(),
            width: 32,
            height: 32,
        };
        assert!(matches!(
            FileSpriteLoader.load(dir.path(), &empty),
            Err(LoadError::MissingImage { .. })
        ));
    }
}
