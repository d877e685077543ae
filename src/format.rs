//! Reading and writing font definition files.
//!
//! A definition file is a JSON document with a single `Font` section. Each
//! entry maps a character to its list of glyph records:
//!
//! ```json
//! {
//!   "Font": {
//!     "a": [{ "fileName": "a.svg", "inPoint": [0, 0], "outPoint": [5, 0], "limits": [0, 0, 5, 9] }],
//!     "slash": [{ "fileName": "slash.svg", "inPoint": [0, 0], "outPoint": [0, 0], "limits": [0, 0, 0, 0] }],
//!     "UpperCase": {
//!       "A": [{ "fileName": "UP_A.svg", "inPoint": [0, 0], "outPoint": [0, 0], "limits": [0, 0, 0, 0] }]
//!     }
//!   }
//! }
//! ```
//!
//! `/` and `\` are stored under the names `slash` and `backslash`. Uppercase
//! ASCII letters live in their own `UpperCase` section so that definition
//! files stay readable by tools which fold the case of keys.
use crate::{
    glyph::{GlyphList, GlyphRegistry},
    SvgFontError,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const FONT_SECTION: &str = "Font";
pub const UPPER_CASE_SECTION: &str = "UpperCase";
const SLASH: &str = "slash";
const BACKSLASH: &str = "backslash";

#[derive(Debug, Default, Serialize, Deserialize)]
struct DefinitionFile {
    #[serde(rename = "Font", default)]
    font: FontSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FontSection {
    #[serde(flatten)]
    entries: IndexMap<String, GlyphList>,
    #[serde(
        rename = "UpperCase",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    upper_case: IndexMap<String, GlyphList>,
}

/// Where a character's records are stored in the `Font` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKey {
    /// A key of the `Font` section itself
    Direct(String),
    /// A key of the `UpperCase` sub-section
    UpperCase(String),
}

pub fn storage_key(character: char) -> StorageKey {
    match character {
        '/' => StorageKey::Direct(SLASH.to_string()),
        '\\' => StorageKey::Direct(BACKSLASH.to_string()),
        c if c.is_ascii_uppercase() => StorageKey::UpperCase(c.to_string()),
        c => StorageKey::Direct(c.to_string()),
    }
}

fn decode_key(key: &str, upper_case: bool) -> Option<char> {
    if !upper_case {
        match key {
            SLASH => return Some('/'),
            BACKSLASH => return Some('\\'),
            _ => {}
        }
    }
    let mut chars = key.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        log::warn!("Definition key {:?} is longer than one character, using {:?}", key, first);
    }
    Some(if upper_case {
        first.to_ascii_uppercase()
    } else {
        first.to_ascii_lowercase()
    })
}

impl From<&GlyphRegistry> for DefinitionFile {
    fn from(registry: &GlyphRegistry) -> Self {
        let mut font = FontSection::default();
        for (character, records) in registry.iter() {
            match storage_key(character) {
                StorageKey::Direct(key) => font.entries.insert(key, records.clone()),
                StorageKey::UpperCase(key) => font.upper_case.insert(key, records.clone()),
            };
        }
        DefinitionFile { font }
    }
}

impl From<DefinitionFile> for GlyphRegistry {
    fn from(file: DefinitionFile) -> Self {
        let mut registry = GlyphRegistry::new();
        let sections = [(file.font.upper_case, true), (file.font.entries, false)];
        for (section, upper_case) in sections {
            for (key, records) in section {
                let Some(character) = decode_key(&key, upper_case) else {
                    log::warn!("Ignoring empty definition key");
                    continue;
                };
                for record in records.0 {
                    if registry.contains_file(character, &record.file_name) {
                        log::debug!(
                            "Skipping duplicate glyph {} for {:?}",
                            record.file_name,
                            character
                        );
                        continue;
                    }
                    registry.insert(character, record);
                }
            }
        }
        registry
    }
}

/// Parses a definition document. Empty or malformed documents give an empty
/// registry.
pub fn load_from_str(contents: &str) -> GlyphRegistry {
    if contents.trim().is_empty() {
        return GlyphRegistry::new();
    }
    match serde_json::from_str::<DefinitionFile>(contents) {
        Ok(file) => file.into(),
        Err(e) => {
            log::warn!("Could not parse font definition, treating it as empty: {}", e);
            GlyphRegistry::new()
        }
    }
}

/// Reads a definition file. A file which does not exist yet is an empty font.
pub fn load(path: impl AsRef<Path>) -> Result<GlyphRegistry, SvgFontError> {
    let path = path.as_ref();
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("{} does not exist yet, starting an empty font", path.display());
            return Ok(GlyphRegistry::new());
        }
        Err(e) => return Err(e.into()),
    };
    let registry = load_from_str(&contents);
    log::info!(
        "Loaded {} characters from {}",
        registry.len(),
        path.display()
    );
    Ok(registry)
}

pub fn to_string(registry: &GlyphRegistry) -> Result<String, SvgFontError> {
    Ok(serde_json::to_string_pretty(&DefinitionFile::from(registry))?)
}

/// Writes the registry to `path`, replacing whatever was there
pub fn save(registry: &GlyphRegistry, path: impl AsRef<Path>) -> Result<(), SvgFontError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    let mut buffer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut buffer, &DefinitionFile::from(registry))?;
    std::io::Write::flush(&mut buffer)?;
    log::info!("Saved {} characters to {}", registry.len(), path.display());
    Ok(())
}
