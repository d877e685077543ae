use std::path::Path;

use pretty_assertions::assert_eq;
use svgfont::{
    classify, load, save, Category, DrawControls, DrawMode, FontSession, GlyphRecord,
    GlyphRegistry, Point, Rect, SvgFontError, TreeNode,
};

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M0 0L10 10"/></svg>"#;

fn write_glyphs(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), SVG).unwrap();
    }
}

fn file_names(registry: &GlyphRegistry, character: char) -> Vec<String> {
    registry
        .values(character)
        .iter()
        .map(|r| r.file_name.clone())
        .collect()
}

#[test]
fn test_round_trip_keeps_case_pairs() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("font.json");
    let mut registry = GlyphRegistry::new();
    for (c, name) in [
        ('a', "a.svg"),
        ('a', "a_1.svg"),
        ('A', "UP_A.svg"),
        ('A', "UP_A_1.svg"),
        ('z', "z.svg"),
        ('Z', "UP_Z.svg"),
        ('0', "0.svg"),
        ('/', "slash.svg"),
        ('\\', "backslash.svg"),
        (':', "colon.svg"),
        (';', "semicolon.svg"),
        ('?', "question.svg"),
        ('|', "vertical.svg"),
        ('*', "asterisk.svg"),
        ('<', "less.svg"),
        ('>', "greater.svg"),
        ('^', "caret.svg"),
        ('"', "quotes.svg"),
        ('.', "dot.svg"),
    ] {
        registry.insert(
            c,
            GlyphRecord::new(name).with_geometry(
                Point::new(1.5, 2.0),
                Point::new(8.0, 2.25),
                Rect::new(0.0, -1.0, 10.0, 12.0),
            ),
        );
    }
    save(&registry, &path)?;
    let loaded = load(&path)?;
    assert_eq!(loaded, registry);
    assert_eq!(file_names(&loaded, 'a'), vec!["a.svg", "a_1.svg"]);
    assert_eq!(file_names(&loaded, 'A'), vec!["UP_A.svg", "UP_A_1.svg"]);
    Ok(())
}

#[test]
fn test_classify_ascii_letters_are_latin() {
    assert_eq!(classify('A'), Category::LatinLetters);
    assert_ne!(classify('A'), Category::NonLatinLetters);
}

#[test]
fn test_auto_import_then_reload() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    write_glyphs(
        dir.path(),
        &["a.svg", "A_2.svg", "UP_A.svg", "dot.svg", "dot_3.svg", "notes.txt"],
    );
    let mut session = FontSession::default();
    session.choose_font_file(dir.path().join("font.json"))?;
    assert!(session.can_auto_load());

    let files: Vec<_> = ["a.svg", "A_2.svg", "UP_A.svg", "dot.svg", "dot_3.svg", "notes.txt"]
        .iter()
        .map(|name| dir.path().join(name))
        .collect();
    let outcome = session.auto_load_symbols(&files)?;
    assert_eq!(outcome.added.len(), 5);
    assert!(outcome.unreadable.is_empty());
    assert_eq!(file_names(session.registry(), 'a'), vec!["a.svg", "A_2.svg"]);
    assert_eq!(file_names(session.registry(), 'A'), vec!["UP_A.svg"]);
    assert_eq!(file_names(session.registry(), '.'), vec!["dot.svg", "dot_3.svg"]);
    assert!(session.tree().mirrors(session.registry()));
    // The last imported glyph is selected
    assert_eq!(session.selected(), Some(&TreeNode::leaf('.', "dot_3.svg")));

    // Importing again changes nothing
    assert!(session.auto_load_symbols(&files)?.added.is_empty());
    assert_eq!(file_names(session.registry(), 'a').len(), 2);

    session.save()?;
    let mut reopened = FontSession::default();
    reopened.choose_font_file(dir.path().join("font.json"))?;
    assert_eq!(reopened.registry(), session.registry());
    assert_eq!(reopened.tree(), session.tree());
    Ok(())
}

#[test]
fn test_manual_add_skips_duplicates() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    write_glyphs(dir.path(), &["k1.svg", "k2.svg"]);
    let mut session = FontSession::default();
    session.choose_font_file(dir.path().join("font.json"))?;
    session.set_chosen_symbol("k");
    assert_eq!(session.add_symbols(&["k1.svg"])?.added.len(), 1);
    let outcome = session.add_symbols(&[dir.path().join("k1.svg"), dir.path().join("k2.svg")])?;
    assert_eq!(outcome.added, vec![TreeNode::leaf('k', "k2.svg")]);
    assert_eq!(file_names(session.registry(), 'k'), vec!["k1.svg", "k2.svg"]);
    assert!(session.tree().mirrors(session.registry()));
    Ok(())
}

#[test]
fn test_deleting_last_glyph_prunes_tree() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    write_glyphs(dir.path(), &["q.svg"]);
    let mut session = FontSession::default();
    session.choose_font_file(dir.path().join("font.json"))?;
    session.auto_load_symbols(&["q.svg"])?;
    assert!(session
        .tree()
        .contains(&TreeNode::Category(Category::LatinLetters)));

    session.delete(&TreeNode::leaf('q', "q.svg"))?;
    assert!(session.registry().is_empty());
    assert!(!session.tree().contains(&TreeNode::CharacterGroup('q')));
    assert!(!session
        .tree()
        .contains(&TreeNode::Category(Category::LatinLetters)));
    assert!(session.tree().is_empty());
    Ok(())
}

#[test]
fn test_deleting_a_character_group() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    write_glyphs(dir.path(), &["q.svg", "q_1.svg", "r.svg"]);
    let mut session = FontSession::default();
    session.choose_font_file(dir.path().join("font.json"))?;
    session.auto_load_symbols(&["q.svg", "q_1.svg", "r.svg"])?;
    session.delete(&TreeNode::CharacterGroup('q'))?;
    assert!(!session.registry().contains('q'));
    assert!(session.registry().contains('r'));
    assert!(session.tree().mirrors(session.registry()));
    assert!(matches!(
        session.delete(&TreeNode::CharacterGroup('q')),
        Err(SvgFontError::NoSuchNode(_))
    ));
    Ok(())
}

#[test]
fn test_copy_to_chosen_symbol() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    write_glyphs(dir.path(), &["o.svg", "o_1.svg"]);
    let mut session = FontSession::default();
    session.choose_font_file(dir.path().join("font.json"))?;
    session.auto_load_symbols(&["o.svg", "o_1.svg"])?;

    // A single glyph to a new character creates the group and the leaf
    session.set_chosen_symbol("0");
    let copied = session.copy_to_chosen_symbol(&TreeNode::leaf('o', "o.svg"))?;
    assert_eq!(copied, vec![TreeNode::leaf('0', "o.svg")]);
    assert!(session
        .tree()
        .contains(&TreeNode::Category(Category::Numbers)));
    assert_eq!(file_names(session.registry(), '0'), vec!["o.svg"]);

    // Copying it again is a no-op
    assert!(session
        .copy_to_chosen_symbol(&TreeNode::leaf('o', "o.svg"))?
        .is_empty());
    assert_eq!(file_names(session.registry(), '0'), vec!["o.svg"]);

    // A whole group only brings what is missing
    let copied = session.copy_to_chosen_symbol(&TreeNode::CharacterGroup('o'))?;
    assert_eq!(copied, vec![TreeNode::leaf('0', "o_1.svg")]);
    assert_eq!(file_names(session.registry(), '0'), vec!["o.svg", "o_1.svg"]);
    assert!(session.tree().mirrors(session.registry()));
    Ok(())
}

#[test]
fn test_switching_selection_commits_edits() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    write_glyphs(dir.path(), &["b.svg", "c.svg"]);
    let mut session = FontSession::default();
    session.choose_font_file(dir.path().join("font.json"))?;
    session.auto_load_symbols(&["b.svg", "c.svg"])?;

    session.select(TreeNode::leaf('b', "b.svg"))?;
    assert!(session.toggle_draw_mode(DrawMode::InPoint));
    session.editor_mut().set_in_point(Point::new(3.0, 4.0));
    assert!(session.toggle_draw_mode(DrawMode::OutPoint));
    session.editor_mut().set_out_point(Point::new(9.0, 4.0));
    assert!(session.toggle_draw_mode(DrawMode::Limits));
    session
        .editor_mut()
        .set_limits(Rect::new(0.0, 0.0, 12.0, 16.0));

    session.select(TreeNode::leaf('c', "c.svg"))?;
    let b = session.registry().get('b', "b.svg").unwrap();
    assert_eq!(b.in_point, Point::new(3.0, 4.0));
    assert_eq!(b.out_point, Point::new(9.0, 4.0));
    assert_eq!(b.limits, Rect::new(0.0, 0.0, 12.0, 16.0));

    // Not saved yet
    assert!(!dir.path().join("font.json").exists());

    // Going back shows the committed values
    session.select(TreeNode::leaf('b', "b.svg"))?;
    assert_eq!(session.editor().in_point, Point::new(3.0, 4.0));
    Ok(())
}

#[test]
fn test_glyph_folder_must_match_font_folder() -> Result<(), SvgFontError> {
    let fonts = tempfile::tempdir()?;
    let elsewhere = tempfile::tempdir()?;
    let mut session = FontSession::default();
    session.choose_font_file(fonts.path().join("font.json"))?;
    assert!(matches!(
        session.check_symbols_folder(elsewhere.path()),
        Err(SvgFontError::SymbolsOutsideFontFolder { .. })
    ));
    session.check_symbols_folder(fonts.path())?;
    Ok(())
}

#[test]
fn test_malformed_definition_is_empty() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("font.json");
    std::fs::write(&path, "this is not json")?;
    assert!(load(&path)?.is_empty());
    let mut session = FontSession::default();
    session.choose_font_file(&path)?;
    assert!(session.registry().is_empty());
    Ok(())
}

#[test]
fn test_missing_glyph_files_are_reported() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    write_glyphs(dir.path(), &["m.svg"]);
    let mut session = FontSession::default();
    session.choose_font_file(dir.path().join("font.json"))?;
    let outcome = session.auto_load_symbols(&["m.svg", "n.svg"])?;
    assert_eq!(
        outcome.added,
        vec![TreeNode::leaf('m', "m.svg"), TreeNode::leaf('n', "n.svg")]
    );
    assert_eq!(outcome.unreadable, vec![dir.path().join("n.svg")]);
    assert!(session.tree().mirrors(session.registry()));
    Ok(())
}

#[test]
fn test_opening_a_font_replaces_the_session() -> Result<(), SvgFontError> {
    let dir = tempfile::tempdir()?;
    write_glyphs(dir.path(), &["a.svg", "b.svg", "x.svg"]);
    let stored: GlyphRegistry = vec![
        ('x', GlyphRecord::new("x.svg")),
        ('B', GlyphRecord::new("b.svg")),
    ]
    .into_iter()
    .collect();
    save(&stored, dir.path().join("other.json"))?;

    let mut session = FontSession::default();
    session.choose_font_file(dir.path().join("font.json"))?;
    session.auto_load_symbols(&["a.svg", "b.svg"])?;
    assert!(session.selected().is_some());

    session.choose_font_file(dir.path().join("other.json"))?;
    assert_eq!(session.registry(), &stored);
    assert!(!session.registry().contains('a'));
    assert!(session.tree().mirrors(session.registry()));
    assert!(!session.tree().contains(&TreeNode::CharacterGroup('a')));
    assert!(session.tree().contains(&TreeNode::leaf('B', "b.svg")));
    assert_eq!(session.selected(), None);
    assert_eq!(session.draw_controls(), DrawControls::default());
    assert_eq!(session.font_file(), Some(dir.path().join("other.json").as_path()));
    Ok(())
}
