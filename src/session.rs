//! The font definition dialog, without the widgets.
//!
//! A [`FontSession`] owns the glyph registry of one definition file together
//! with the tree which mirrors it, and implements what the dialog's buttons,
//! tree clicks and context menu do. Every mutation updates the registry and
//! the tree together.
//!
//! Geometry edited in the [`SymbolDataEditor`] is written back into the
//! registry whenever the selection moves, and before copying, deleting or
//! saving, so switching glyphs never loses an edit. Nothing reaches the
//! definition file until [`FontSession::save`].
use crate::{
    category::is_letter,
    editor::{DrawMode, GeometryEditor, SymbolDataEditor},
    format,
    glyph::{GlyphRecord, GlyphRegistry},
    matcher::character_for_file_name,
    tree::{GlyphTree, TreeNode},
    SvgFontError,
};
use std::path::{Path, PathBuf};

/// Which draw buttons are enabled, and which one is pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawControls {
    pub in_point: bool,
    pub out_point: bool,
    pub limits: bool,
    pub checked: Option<DrawMode>,
}

impl DrawControls {
    pub fn is_enabled(&self, mode: DrawMode) -> bool {
        match mode {
            DrawMode::InPoint => self.in_point,
            DrawMode::OutPoint => self.out_point,
            DrawMode::Limits => self.limits,
        }
    }
}

/// Enabled entries of the tree context menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextActions {
    pub delete: bool,
    pub copy: bool,
}

/// Outcome of adding a batch of glyph files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddedSymbols {
    /// New leaves, in the order the files were given
    pub added: Vec<TreeNode>,
    /// Glyph files which were registered but could not be opened
    pub unreadable: Vec<PathBuf>,
}

type FontReadyListener = Box<dyn FnMut(&Path)>;

pub struct FontSession<E: SymbolDataEditor = GeometryEditor> {
    font_file: Option<PathBuf>,
    registry: GlyphRegistry,
    tree: GlyphTree,
    chosen_symbol: Option<char>,
    selected: Option<TreeNode>,
    // The file leaf whose geometry is currently in the editor
    last_item: Option<TreeNode>,
    controls: DrawControls,
    add_enabled: bool,
    auto_load_enabled: bool,
    editor: E,
    font_ready: Vec<FontReadyListener>,
}

impl Default for FontSession<GeometryEditor> {
    fn default() -> Self {
        FontSession::new(GeometryEditor::new())
    }
}

impl<E: SymbolDataEditor> FontSession<E> {
    pub fn new(editor: E) -> Self {
        FontSession {
            font_file: None,
            registry: GlyphRegistry::new(),
            tree: GlyphTree::new(),
            chosen_symbol: None,
            selected: None,
            last_item: None,
            controls: DrawControls::default(),
            add_enabled: false,
            auto_load_enabled: false,
            editor,
            font_ready: vec![],
        }
    }

    pub fn registry(&self) -> &GlyphRegistry {
        &self.registry
    }

    pub fn tree(&self) -> &GlyphTree {
        &self.tree
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn font_file(&self) -> Option<&Path> {
        self.font_file.as_deref()
    }

    pub fn chosen_symbol(&self) -> Option<char> {
        self.chosen_symbol
    }

    pub fn selected(&self) -> Option<&TreeNode> {
        self.selected.as_ref()
    }

    pub fn draw_controls(&self) -> DrawControls {
        self.controls
    }

    pub fn can_add_symbols(&self) -> bool {
        self.add_enabled
    }

    pub fn can_auto_load(&self) -> bool {
        self.auto_load_enabled
    }

    /// Registers a callback run after every successful save
    pub fn on_font_ready(&mut self, listener: impl FnMut(&Path) + 'static) {
        self.font_ready.push(Box::new(listener));
    }

    /// Folder glyph files are resolved against
    pub fn font_folder(&self) -> Option<PathBuf> {
        let file = self.font_file.as_ref()?;
        Some(match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        })
    }

    /// Switches to another definition file.
    ///
    /// If the file has entries they replace the current font. A new or empty
    /// file keeps the glyphs already in the session, so they can be saved
    /// under the new name.
    pub fn choose_font_file(&mut self, path: impl Into<PathBuf>) -> Result<(), SvgFontError> {
        let path = path.into();
        let loaded = format::load(&path)?;
        self.font_file = Some(path);
        self.last_item = None;
        self.auto_load_enabled = true;
        self.add_enabled = self.chosen_symbol.is_some();

        if loaded.is_empty() {
            return Ok(());
        }

        self.registry = loaded;
        self.tree.rebuild(&self.registry);
        self.selected = None;
        self.editor.clear();
        self.enable_draw_buttons(false, false);
        Ok(())
    }

    /// Sets the character which added and copied glyphs go to. Only the first
    /// character of `text` is kept.
    pub fn set_chosen_symbol(&mut self, text: &str) -> Option<char> {
        self.chosen_symbol = text.chars().next();
        if self.font_file.is_some() {
            self.add_enabled = self.chosen_symbol.is_some();
        }
        self.chosen_symbol
    }

    /// Adds glyph files to the chosen character. Files already registered
    /// there are skipped. The last new leaf ends up selected; files which
    /// stay registered but cannot be opened are reported as unreadable.
    pub fn add_symbols<P: AsRef<Path>>(
        &mut self,
        files: &[P],
    ) -> Result<AddedSymbols, SvgFontError> {
        if self.font_file.is_none() {
            return Err(SvgFontError::NoFontFile);
        }
        let character = self.chosen_symbol.ok_or(SvgFontError::NoChosenSymbol)?;
        let mut outcome = AddedSymbols::default();
        for file in files {
            let Some(file_name) = bare_file_name(file.as_ref()) else {
                continue;
            };
            self.add_record(character, file_name, &mut outcome)?;
        }
        log::info!("Added {} glyphs to {:?}", outcome.added.len(), character);
        Ok(outcome)
    }

    /// Adds glyph files under the character their names stand for. Files
    /// with unrecognised names, and files already registered, are skipped.
    pub fn auto_load_symbols<P: AsRef<Path>>(
        &mut self,
        files: &[P],
    ) -> Result<AddedSymbols, SvgFontError> {
        if self.font_file.is_none() {
            return Err(SvgFontError::NoFontFile);
        }
        let mut outcome = AddedSymbols::default();
        for file in files {
            let Some(file_name) = bare_file_name(file.as_ref()) else {
                continue;
            };
            let Some(character) = character_for_file_name(file_name) else {
                log::debug!("No character found for {}, skipping", file_name);
                continue;
            };
            self.add_record(character, file_name, &mut outcome)?;
        }
        log::info!("Imported {} glyphs", outcome.added.len());
        Ok(outcome)
    }

    /// Glyph files must sit next to the definition file, since only their
    /// names are stored.
    pub fn check_symbols_folder(&self, folder: impl AsRef<Path>) -> Result<(), SvgFontError> {
        let font_folder = self.font_folder().ok_or(SvgFontError::NoFontFile)?;
        let font_folder = std::path::absolute(&font_folder)?;
        let folder = std::path::absolute(folder.as_ref())?;
        if font_folder == folder {
            Ok(())
        } else {
            Err(SvgFontError::SymbolsOutsideFontFolder {
                folder,
                font_folder,
            })
        }
    }

    /// Handles a click on a tree node
    pub fn select(&mut self, node: TreeNode) -> Result<(), SvgFontError> {
        self.commit_editor();
        if !self.tree.contains(&node) {
            return Err(SvgFontError::NoSuchNode(format!("{:?}", node)));
        }
        self.selected = Some(node.clone());

        let (character, file_name) = match node {
            TreeNode::Category(_) => {
                self.reset_editor();
                return Ok(());
            }
            TreeNode::CharacterGroup(character) => {
                self.set_chosen_symbol(&character.to_string());
                self.reset_editor();
                return Ok(());
            }
            TreeNode::FileLeaf {
                character,
                file_name,
            } => (character, file_name),
        };

        let folder = self.font_folder().unwrap_or_else(|| PathBuf::from("."));
        let path = folder.join(&file_name);
        if !is_readable(&path) {
            self.reset_editor();
            return Err(SvgFontError::UnreadableGlyph { path });
        }

        let letter = is_letter(character);
        self.enable_draw_buttons(true, letter);
        self.set_chosen_symbol(&character.to_string());
        if let Err(e) = self.editor.load(&path) {
            self.reset_editor();
            return Err(e);
        }
        if let Some(record) = self.registry.get(character, &file_name) {
            self.editor
                .set_symbol_data(record.in_point, record.out_point, record.limits);
        }
        self.last_item = Some(TreeNode::FileLeaf {
            character,
            file_name,
        });
        if !letter {
            self.editor.disable_points();
        }
        Ok(())
    }

    /// Writes the editor's geometry into the record being edited, if any
    pub fn commit_editor(&mut self) {
        let Some(TreeNode::FileLeaf {
            character,
            file_name,
        }) = &self.last_item
        else {
            return;
        };
        let record = GlyphRecord::new(file_name.as_str()).with_geometry(
            self.editor.in_point(),
            self.editor.out_point(),
            self.editor.limits(),
        );
        if self.registry.update(*character, file_name, record) {
            log::debug!("Committed geometry of {} ({:?})", file_name, character);
        }
    }

    /// Presses one of the draw buttons. Returns false if that button is
    /// disabled.
    pub fn toggle_draw_mode(&mut self, mode: DrawMode) -> bool {
        if !self.controls.is_enabled(mode) {
            return false;
        }
        self.controls.checked = Some(mode);
        match mode {
            DrawMode::InPoint => self.editor.enable_in_point_changes(),
            DrawMode::OutPoint => self.editor.enable_out_point_changes(),
            DrawMode::Limits => self.editor.enable_limits_changes(),
        }
        true
    }

    /// What the context menu offers for `node`
    pub fn context_actions(&self, node: &TreeNode) -> ContextActions {
        if matches!(node, TreeNode::Category(_)) || !self.tree.contains(node) {
            return ContextActions::default();
        }
        ContextActions {
            delete: true,
            copy: self.chosen_symbol.is_some(),
        }
    }

    /// Deletes a single glyph, or a character with all of its glyphs
    pub fn delete(&mut self, node: &TreeNode) -> Result<(), SvgFontError> {
        self.commit_editor();
        match node {
            TreeNode::Category(_) => return Err(SvgFontError::CategoryAction),
            TreeNode::CharacterGroup(character) => {
                if self.registry.remove_all(*character).is_none() {
                    return Err(SvgFontError::NoSuchNode(format!("{:?}", node)));
                }
                self.tree.remove_character_node(*character);
                log::info!("Deleted {:?}", character);
            }
            TreeNode::FileLeaf {
                character,
                file_name,
            } => {
                if self.registry.remove(*character, file_name).is_none() {
                    return Err(SvgFontError::NoSuchNode(format!("{:?}", node)));
                }
                self.tree.remove_file_leaf(*character, file_name);
                log::info!("Deleted {} from {:?}", file_name, character);
            }
        }
        if self.selected.as_ref().is_some_and(|s| !self.tree.contains(s)) {
            self.selected = None;
        }
        self.reset_editor();
        Ok(())
    }

    /// Copies a glyph, or every glyph of a character, to the chosen
    /// character. Glyphs already registered there are skipped. Returns the
    /// new leaves.
    pub fn copy_to_chosen_symbol(&mut self, node: &TreeNode) -> Result<Vec<TreeNode>, SvgFontError> {
        let target = self.chosen_symbol.ok_or(SvgFontError::NoChosenSymbol)?;
        self.commit_editor();
        let records: Vec<GlyphRecord> = match node {
            TreeNode::Category(_) => return Err(SvgFontError::CategoryAction),
            TreeNode::CharacterGroup(character) => self.registry.values(*character).to_vec(),
            TreeNode::FileLeaf {
                character,
                file_name,
            } => self
                .registry
                .get(*character, file_name)
                .cloned()
                .into_iter()
                .collect(),
        };
        if records.is_empty() {
            return Err(SvgFontError::NoSuchNode(format!("{:?}", node)));
        }

        let mut copied = vec![];
        for record in records {
            if self.registry.contains_file(target, &record.file_name) {
                log::debug!("{} is already in {:?}", record.file_name, target);
                continue;
            }
            copied.push(self.tree.add_file_leaf(target, &record.file_name));
            self.registry.insert(target, record);
        }
        Ok(copied)
    }

    /// Writes the font to its definition file and tells the listeners.
    /// Returns false if no definition file was chosen.
    pub fn save(&mut self) -> Result<bool, SvgFontError> {
        let Some(path) = self.font_file.clone() else {
            log::warn!("No font file chosen, nothing saved");
            return Ok(false);
        };
        self.commit_editor();
        format::save(&self.registry, &path)?;
        for listener in self.font_ready.iter_mut() {
            listener(&path);
        }
        Ok(true)
    }

    /// Throws away the whole session
    pub fn reject(&mut self) {
        self.registry.clear();
        self.font_file = None;
        self.add_enabled = false;
        self.auto_load_enabled = false;
        self.chosen_symbol = None;
        self.tree.clear();
        self.selected = None;
        self.reset_editor();
    }

    fn add_record(
        &mut self,
        character: char,
        file_name: &str,
        outcome: &mut AddedSymbols,
    ) -> Result<(), SvgFontError> {
        if self.registry.contains_file(character, file_name) {
            log::debug!("{} is already in {:?}", file_name, character);
            return Ok(());
        }
        self.registry.insert(character, GlyphRecord::new(file_name));
        let leaf = self.tree.add_file_leaf(character, file_name);
        match self.select(leaf.clone()) {
            Ok(()) => {}
            Err(SvgFontError::UnreadableGlyph { path }) => {
                log::warn!("Cannot open glyph file {}", path.display());
                outcome.unreadable.push(path);
            }
            Err(e) => return Err(e),
        }
        outcome.added.push(leaf);
        Ok(())
    }

    fn enable_draw_buttons(&mut self, enable: bool, letter: bool) {
        self.controls.in_point = enable && letter;
        self.controls.out_point = enable && letter;
        self.controls.limits = enable;
        if let Some(mode) = self.controls.checked {
            if !self.controls.is_enabled(mode) {
                self.controls.checked = None;
                self.editor.disable_changes();
            }
        }
    }

    fn reset_editor(&mut self) {
        self.enable_draw_buttons(false, false);
        self.editor.disable_changes();
        self.editor.clear();
        self.last_item = None;
    }
}

fn bare_file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

fn is_readable(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}
