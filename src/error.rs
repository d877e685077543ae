use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvgFontError {
    #[error("Cannot read glyph file {path:?}")]
    UnreadableGlyph { path: PathBuf },

    #[error("Symbols must be in the same folder as the font ({font_folder:?}), not {folder:?}")]
    SymbolsOutsideFontFolder {
        folder: PathBuf,
        font_folder: PathBuf,
    },

    #[error("No font definition file has been chosen")]
    NoFontFile,

    #[error("No target character has been chosen")]
    NoChosenSymbol,

    #[error("No such tree node: {0}")]
    NoSuchNode(String),

    #[error("Categories cannot be deleted or copied")]
    CategoryAction,

    #[error("IO Error: {0}")]
    IO(#[from] io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}
