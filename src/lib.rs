//! # Svgfont
//!
//! Svgfont assembles stroke fonts out of SVG files. A font maps single
//! characters to one or more glyph files, and annotates each glyph with the
//! geometry a stroke renderer needs to chain glyphs together:
//!
//! - an **in-point**, where the stroke enters the glyph
//! - an **out-point**, where it leaves
//! - a **limits** rectangle bounding the rendered glyph
//!
//! ## Core Concepts
//!
//! - [`GlyphRegistry`]: every [`GlyphRecord`] of the font, bucketed by character
//! - [`GlyphTree`]: the registry grouped by [`Category`] and character, as a
//!   font editor shows it
//! - [`FontSession`]: an editing session over one definition file, keeping
//!   registry, tree and a [`SymbolDataEditor`] in step
//! - [`format`]: the JSON definition file
//! - [`matcher`]: detecting the character of a glyph file from its name
//!
//! ```no_run
//! # use svgfont::{FontSession, SvgFontError};
//! # fn main() -> Result<(), SvgFontError> {
//! let mut session = FontSession::default();
//! session.choose_font_file("glyphs/font.json")?;
//! session.auto_load_symbols(&["glyphs/a.svg", "glyphs/UP_A.svg", "glyphs/dot.svg"])?;
//! session.save()?;
//! # Ok(())
//! # }
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod category;
mod editor;
mod error;
pub mod format;
mod glyph;
pub mod matcher;
mod serde_helpers;
mod session;
mod tree;

pub use crate::{
    category::{classify, is_letter, Category},
    editor::{DrawMode, GeometryEditor, SymbolDataEditor},
    error::SvgFontError,
    glyph::{GlyphList, GlyphRecord, GlyphRegistry},
    session::{AddedSymbols, ContextActions, DrawControls, FontSession},
    tree::{CategoryNode, CharacterNode, GlyphTree, TreeNode},
};
pub use kurbo::{Point, Rect};
use std::path::Path;

/// Loads a definition file into a registry
pub fn load(filename: impl AsRef<Path>) -> Result<GlyphRegistry, SvgFontError> {
    format::load(filename)
}

/// Writes a registry to a definition file
pub fn save(registry: &GlyphRegistry, filename: impl AsRef<Path>) -> Result<(), SvgFontError> {
    format::save(registry, filename)
}
