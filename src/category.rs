use std::fmt;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Display group of a character in the glyph tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Numbers,
    LatinLetters,
    NonLatinLetters,
    OtherMarks,
    PunctuationMarks,
    OtherSymbols,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Numbers,
        Category::LatinLetters,
        Category::NonLatinLetters,
        Category::OtherMarks,
        Category::PunctuationMarks,
        Category::OtherSymbols,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Numbers => "Numbers",
            Category::LatinLetters => "Latin letters",
            Category::NonLatinLetters => "Non-latin letters",
            Category::OtherMarks => "Other marks",
            Category::PunctuationMarks => "Punctuation marks",
            Category::OtherSymbols => "Other symbols",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Any Unicode letter (general category `L*`)
pub fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

fn is_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::DecimalNumber | GeneralCategory::LetterNumber | GeneralCategory::OtherNumber
    )
}

fn is_mark(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::NonspacingMark
            | GeneralCategory::SpacingMark
            | GeneralCategory::EnclosingMark
    )
}

fn is_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// Works out which tree group a character belongs to.
///
/// Every rule that matches overwrites the previous result, so the order of the
/// checks below is significant: ASCII letters end up as Latin letters even
/// though they are also letters, and a character that is both a mark and
/// punctuation ends up as punctuation.
pub fn classify(c: char) -> Category {
    let mut category = Category::OtherSymbols;
    if is_number(c) {
        category = Category::Numbers;
    }
    if is_letter(c) {
        category = Category::NonLatinLetters;
    }
    if c.is_ascii_alphabetic() {
        category = Category::LatinLetters;
    }
    if is_mark(c) {
        category = Category::OtherMarks;
    }
    if is_punctuation(c) {
        category = Category::PunctuationMarks;
    }
    category
}
