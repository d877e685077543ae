use crate::SvgFontError;
use kurbo::{Point, Rect};
use std::path::{Path, PathBuf};

/// Which marker a drawing gesture edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    InPoint,
    OutPoint,
    Limits,
}

/// The widget showing one glyph and letting the user place its markers.
///
/// A session pushes stored geometry in with [`set_symbol_data`] and reads the
/// (possibly edited) geometry back before it moves on to another glyph.
///
/// [`set_symbol_data`]: SymbolDataEditor::set_symbol_data
pub trait SymbolDataEditor {
    fn load(&mut self, path: &Path) -> Result<(), SvgFontError>;
    fn set_symbol_data(&mut self, in_point: Point, out_point: Point, limits: Rect);
    fn in_point(&self) -> Point;
    fn out_point(&self) -> Point;
    fn limits(&self) -> Rect;
    fn clear(&mut self);
    /// Leaves every edit mode
    fn disable_changes(&mut self);
    /// Hides the in and out points, for glyphs which are not letters
    fn disable_points(&mut self);
    fn enable_in_point_changes(&mut self);
    fn enable_out_point_changes(&mut self);
    fn enable_limits_changes(&mut self);
}

/// An editor without a display, driven through its setters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryEditor {
    pub file: Option<PathBuf>,
    pub in_point: Point,
    pub out_point: Point,
    pub limits: Rect,
    pub mode: Option<DrawMode>,
    pub points_disabled: bool,
}

impl GeometryEditor {
    pub fn new() -> Self {
        GeometryEditor::default()
    }

    /// Moves the in-point, as a drag in in-point mode would. Ignored in any
    /// other mode.
    pub fn set_in_point(&mut self, point: Point) -> bool {
        let editable = self.mode == Some(DrawMode::InPoint) && !self.points_disabled;
        if editable {
            self.in_point = point;
        }
        editable
    }

    pub fn set_out_point(&mut self, point: Point) -> bool {
        let editable = self.mode == Some(DrawMode::OutPoint) && !self.points_disabled;
        if editable {
            self.out_point = point;
        }
        editable
    }

    pub fn set_limits(&mut self, limits: Rect) -> bool {
        let editable = self.mode == Some(DrawMode::Limits);
        if editable {
            self.limits = limits;
        }
        editable
    }
}

impl SymbolDataEditor for GeometryEditor {
    fn load(&mut self, path: &Path) -> Result<(), SvgFontError> {
        let contents = std::fs::read(path).map_err(|e| {
            log::debug!("Failed to read {}: {}", path.display(), e);
            SvgFontError::UnreadableGlyph {
                path: path.to_path_buf(),
            }
        })?;
        if !contents.windows(4).any(|window| window == b"<svg") {
            log::warn!("{} does not look like an SVG file", path.display());
        }
        self.file = Some(path.to_path_buf());
        self.points_disabled = false;
        Ok(())
    }

    fn set_symbol_data(&mut self, in_point: Point, out_point: Point, limits: Rect) {
        self.in_point = in_point;
        self.out_point = out_point;
        self.limits = limits;
    }

    fn in_point(&self) -> Point {
        self.in_point
    }

    fn out_point(&self) -> Point {
        self.out_point
    }

    fn limits(&self) -> Rect {
        self.limits
    }

    fn clear(&mut self) {
        *self = GeometryEditor {
            mode: self.mode,
            ..GeometryEditor::default()
        };
    }

    fn disable_changes(&mut self) {
        self.mode = None;
    }

    fn disable_points(&mut self) {
        self.points_disabled = true;
    }

    fn enable_in_point_changes(&mut self) {
        self.mode = Some(DrawMode::InPoint);
    }

    fn enable_out_point_changes(&mut self) {
        self.mode = Some(DrawMode::OutPoint);
    }

    fn enable_limits_changes(&mut self) {
        self.mode = Some(DrawMode::Limits);
    }
}
