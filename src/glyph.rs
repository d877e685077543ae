use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

/// One SVG glyph file and the geometry used to connect and size it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphRecord {
    /// Bare file name, resolved against the definition file's folder
    pub file_name: String,
    /// Where the stroke enters the glyph
    #[serde(
        default = "crate::serde_helpers::zero_point",
        serialize_with = "crate::serde_helpers::point_ser",
        deserialize_with = "crate::serde_helpers::point_de"
    )]
    pub in_point: Point,
    /// Where the stroke leaves the glyph
    #[serde(
        default = "crate::serde_helpers::zero_point",
        serialize_with = "crate::serde_helpers::point_ser",
        deserialize_with = "crate::serde_helpers::point_de"
    )]
    pub out_point: Point,
    /// Bounding rectangle constraining the rendered extent
    #[serde(
        default = "crate::serde_helpers::zero_rect",
        serialize_with = "crate::serde_helpers::rect_ser",
        deserialize_with = "crate::serde_helpers::rect_de"
    )]
    pub limits: Rect,
}

impl GlyphRecord {
    /// A record with no geometry yet
    pub fn new(file_name: impl Into<String>) -> Self {
        GlyphRecord {
            file_name: file_name.into(),
            in_point: Point::ZERO,
            out_point: Point::ZERO,
            limits: Rect::ZERO,
        }
    }

    pub fn with_geometry(mut self, in_point: Point, out_point: Point, limits: Rect) -> Self {
        self.in_point = in_point;
        self.out_point = out_point;
        self.limits = limits;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphList(pub Vec<GlyphRecord>);
impl GlyphList {
    pub fn get(&self, file_name: &str) -> Option<&GlyphRecord> {
        self.0.iter().find(|record| record.file_name == file_name)
    }
    pub fn get_mut(&mut self, file_name: &str) -> Option<&mut GlyphRecord> {
        self.0
            .iter_mut()
            .find(|record| record.file_name == file_name)
    }

    pub fn contains_file(&self, file_name: &str) -> bool {
        self.get(file_name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlyphRecord> {
        self.0.iter()
    }
}

impl Deref for GlyphList {
    type Target = Vec<GlyphRecord>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for GlyphList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<GlyphRecord> for GlyphList {
    fn from_iter<I: IntoIterator<Item = GlyphRecord>>(iter: I) -> Self {
        GlyphList(iter.into_iter().collect())
    }
}

/// Every glyph record of a font, bucketed by the character it draws.
///
/// Buckets are never empty: removing the last record of a character drops the
/// character as well. Keeping one record per file name within a bucket is up to
/// the caller, who should check [`GlyphRegistry::contains_file`] before
/// inserting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphRegistry {
    buckets: BTreeMap<char, GlyphList>,
}

impl GlyphRegistry {
    pub fn new() -> Self {
        GlyphRegistry::default()
    }

    /// Replaces the whole content of the registry
    pub fn load(&mut self, records: impl IntoIterator<Item = (char, GlyphList)>) {
        self.buckets = records
            .into_iter()
            .filter(|(_, list)| !list.is_empty())
            .collect();
    }

    pub fn insert(&mut self, character: char, record: GlyphRecord) {
        self.buckets.entry(character).or_default().push(record);
    }

    /// Replaces the record named `file_name` in place. Returns false if there
    /// was no such record.
    pub fn update(&mut self, character: char, file_name: &str, record: GlyphRecord) -> bool {
        match self
            .buckets
            .get_mut(&character)
            .and_then(|list| list.get_mut(file_name))
        {
            Some(existing) => {
                *existing = record;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, character: char, file_name: &str) -> Option<GlyphRecord> {
        let list = self.buckets.get_mut(&character)?;
        let index = list.iter().position(|r| r.file_name == file_name)?;
        let removed = list.remove(index);
        if list.is_empty() {
            self.buckets.remove(&character);
        }
        Some(removed)
    }

    pub fn remove_all(&mut self, character: char) -> Option<GlyphList> {
        self.buckets.remove(&character)
    }

    pub fn values(&self, character: char) -> &[GlyphRecord] {
        self.buckets
            .get(&character)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn get(&self, character: char, file_name: &str) -> Option<&GlyphRecord> {
        self.buckets.get(&character)?.get(file_name)
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.buckets.keys().copied()
    }

    pub fn contains(&self, character: char) -> bool {
        self.buckets.contains_key(&character)
    }

    pub fn contains_file(&self, character: char, file_name: &str) -> bool {
        self.buckets
            .get(&character)
            .is_some_and(|list| list.contains_file(file_name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &GlyphList)> + '_ {
        self.buckets.iter().map(|(c, list)| (*c, list))
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

impl FromIterator<(char, GlyphRecord)> for GlyphRegistry {
    fn from_iter<I: IntoIterator<Item = (char, GlyphRecord)>>(iter: I) -> Self {
        let mut registry = GlyphRegistry::new();
        for (character, record) in iter {
            registry.insert(character, record);
        }
        registry
    }
}
