use crate::{
    category::{classify, Category},
    glyph::GlyphRegistry,
};
use std::fmt;

/// A node of the glyph tree, addressed by what it stands for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TreeNode {
    Category(Category),
    CharacterGroup(char),
    FileLeaf { character: char, file_name: String },
}

impl TreeNode {
    pub fn leaf(character: char, file_name: impl Into<String>) -> Self {
        TreeNode::FileLeaf {
            character,
            file_name: file_name.into(),
        }
    }

    /// The character a group or leaf belongs to
    pub fn character(&self) -> Option<char> {
        match self {
            TreeNode::Category(_) => None,
            TreeNode::CharacterGroup(c) => Some(*c),
            TreeNode::FileLeaf { character, .. } => Some(*character),
        }
    }

    pub fn parent(&self) -> Option<TreeNode> {
        match self {
            TreeNode::Category(_) => None,
            TreeNode::CharacterGroup(c) => Some(TreeNode::Category(classify(*c))),
            TreeNode::FileLeaf { character, .. } => Some(TreeNode::CharacterGroup(*character)),
        }
    }

    pub fn text(&self) -> String {
        match self {
            TreeNode::Category(category) => category.to_string(),
            TreeNode::CharacterGroup(c) => c.to_string(),
            TreeNode::FileLeaf { file_name, .. } => file_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterNode {
    pub character: char,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub category: Category,
    pub characters: Vec<CharacterNode>,
}

/// Category → character → file view of a [`GlyphRegistry`].
///
/// Every level is kept sorted ascending by its display text. Character groups
/// and categories only exist while they have children; removing the last leaf
/// prunes its group, and removing the last group prunes its category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphTree {
    categories: Vec<CategoryNode>,
}

impl GlyphTree {
    pub fn new() -> Self {
        GlyphTree::default()
    }

    pub fn from_registry(registry: &GlyphRegistry) -> Self {
        let mut tree = GlyphTree::new();
        tree.rebuild(registry);
        tree
    }

    pub fn rebuild(&mut self, registry: &GlyphRegistry) {
        self.categories.clear();
        for (character, records) in registry.iter() {
            for record in records.iter() {
                self.add_file_leaf(character, &record.file_name);
            }
        }
    }

    pub fn clear(&mut self) {
        self.categories.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[CategoryNode] {
        &self.categories
    }

    pub fn ensure_category_node(&mut self, category: Category) -> &mut CategoryNode {
        let index = match self
            .categories
            .binary_search_by(|node| node.category.label().cmp(category.label()))
        {
            Ok(index) => index,
            Err(index) => {
                log::trace!("Adding category node {}", category);
                self.categories.insert(
                    index,
                    CategoryNode {
                        category,
                        characters: vec![],
                    },
                );
                index
            }
        };
        &mut self.categories[index]
    }

    pub fn ensure_character_node(&mut self, character: char) -> &mut CharacterNode {
        let category = self.ensure_category_node(classify(character));
        let index = match category
            .characters
            .binary_search_by(|node| node.character.cmp(&character))
        {
            Ok(index) => index,
            Err(index) => {
                category.characters.insert(
                    index,
                    CharacterNode {
                        character,
                        files: vec![],
                    },
                );
                index
            }
        };
        &mut category.characters[index]
    }

    pub fn add_file_leaf(&mut self, character: char, file_name: &str) -> TreeNode {
        let node = self.ensure_character_node(character);
        if let Err(index) = node.files.binary_search_by(|f| f.as_str().cmp(file_name)) {
            node.files.insert(index, file_name.to_string());
        }
        TreeNode::leaf(character, file_name)
    }

    /// Removes a leaf, pruning its group and category if they become empty.
    /// Returns false if there was no such leaf.
    pub fn remove_file_leaf(&mut self, character: char, file_name: &str) -> bool {
        let Some((cat_ix, char_ix)) = self.position(character) else {
            return false;
        };
        let files = &mut self.categories[cat_ix].characters[char_ix].files;
        let Some(file_ix) = files.iter().position(|f| f == file_name) else {
            return false;
        };
        files.remove(file_ix);
        if files.is_empty() {
            self.categories[cat_ix].characters.remove(char_ix);
        }
        self.prune_category(cat_ix);
        true
    }

    /// Removes a character group with all its leaves
    pub fn remove_character_node(&mut self, character: char) -> bool {
        let Some((cat_ix, char_ix)) = self.position(character) else {
            return false;
        };
        self.categories[cat_ix].characters.remove(char_ix);
        self.prune_category(cat_ix);
        true
    }

    pub fn character_node(&self, character: char) -> Option<&CharacterNode> {
        self.position(character)
            .map(|(cat_ix, char_ix)| &self.categories[cat_ix].characters[char_ix])
    }

    pub fn contains(&self, node: &TreeNode) -> bool {
        match node {
            TreeNode::Category(category) => {
                self.categories.iter().any(|c| c.category == *category)
            }
            TreeNode::CharacterGroup(c) => self.character_node(*c).is_some(),
            TreeNode::FileLeaf {
                character,
                file_name,
            } => self
                .character_node(*character)
                .is_some_and(|node| node.files.iter().any(|f| f == file_name)),
        }
    }

    /// All nodes, depth first, in display order
    pub fn nodes(&self) -> Vec<TreeNode> {
        let mut nodes = vec![];
        for category in &self.categories {
            nodes.push(TreeNode::Category(category.category));
            for character in &category.characters {
                nodes.push(TreeNode::CharacterGroup(character.character));
                for file in &character.files {
                    nodes.push(TreeNode::leaf(character.character, file.as_str()));
                }
            }
        }
        nodes
    }

    /// Checks that the tree has exactly one group per registry key, and
    /// exactly one leaf per record
    pub fn mirrors(&self, registry: &GlyphRegistry) -> bool {
        let group_count: usize = self.categories.iter().map(|c| c.characters.len()).sum();
        if group_count != registry.len() {
            return false;
        }
        registry.iter().all(|(character, records)| {
            let Some(node) = self.character_node(character) else {
                return false;
            };
            let mut expected: Vec<&str> = records.iter().map(|r| r.file_name.as_str()).collect();
            expected.sort_unstable();
            node.files.iter().map(|f| f.as_str()).eq(expected)
        })
    }

    fn position(&self, character: char) -> Option<(usize, usize)> {
        let category = classify(character);
        let cat_ix = self
            .categories
            .iter()
            .position(|node| node.category == category)?;
        let char_ix = self.categories[cat_ix]
            .characters
            .iter()
            .position(|node| node.character == character)?;
        Some((cat_ix, char_ix))
    }

    fn prune_category(&mut self, cat_ix: usize) {
        if self.categories[cat_ix].characters.is_empty() {
            let removed = self.categories.remove(cat_ix);
            log::trace!("Pruned empty category node {}", removed.category);
        }
    }
}

impl fmt::Display for GlyphTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in &self.categories {
            writeln!(f, "{}", category.category)?;
            for character in &category.characters {
                writeln!(f, "  {}", character.character)?;
                for file in &character.files {
                    writeln!(f, "    {}", file)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphRecord;
    use pretty_assertions::assert_eq;

    fn registry(entries: &[(char, &str)]) -> GlyphRegistry {
        entries
            .iter()
            .map(|(c, name)| (*c, GlyphRecord::new(*name)))
            .collect()
    }

    #[test]
    fn test_cascading_prune_single_glyph() {
        let mut tree = GlyphTree::new();
        tree.add_file_leaf('a', "a.svg");
        assert!(tree.contains(&TreeNode::Category(Category::LatinLetters)));
        assert!(tree.remove_file_leaf('a', "a.svg"));
        assert!(!tree.contains(&TreeNode::CharacterGroup('a')));
        assert!(!tree.contains(&TreeNode::Category(Category::LatinLetters)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_prune_keeps_non_empty_parents() {
        let mut tree = GlyphTree::from_registry(&registry(&[
            ('a', "a.svg"),
            ('a', "a_1.svg"),
            ('b', "b.svg"),
        ]));
        tree.remove_file_leaf('a', "a.svg");
        assert!(tree.contains(&TreeNode::CharacterGroup('a')));
        tree.remove_file_leaf('a', "a_1.svg");
        assert!(!tree.contains(&TreeNode::CharacterGroup('a')));
        assert!(tree.contains(&TreeNode::Category(Category::LatinLetters)));
        assert!(tree.remove_character_node('b'));
        assert!(tree.is_empty());
        assert!(!tree.remove_character_node('b'));
    }

    #[test]
    fn test_groups_land_in_their_category() {
        let tree = GlyphTree::from_registry(&registry(&[
            ('1', "1.svg"),
            ('.', "dot.svg"),
            ('A', "UP_A.svg"),
            ('ж', "zh.svg"),
        ]));
        assert_eq!(
            tree.nodes(),
            vec![
                TreeNode::Category(Category::LatinLetters),
                TreeNode::CharacterGroup('A'),
                TreeNode::leaf('A', "UP_A.svg"),
                TreeNode::Category(Category::NonLatinLetters),
                TreeNode::CharacterGroup('ж'),
                TreeNode::leaf('ж', "zh.svg"),
                TreeNode::Category(Category::Numbers),
                TreeNode::CharacterGroup('1'),
                TreeNode::leaf('1', "1.svg"),
                TreeNode::Category(Category::PunctuationMarks),
                TreeNode::CharacterGroup('.'),
                TreeNode::leaf('.', "dot.svg"),
            ]
        );
    }

    #[test]
    fn test_mirrors() {
        let mut reg = registry(&[('a', "a_2.svg"), ('a', "a.svg"), ('/', "slash.svg")]);
        let mut tree = GlyphTree::from_registry(&reg);
        assert!(tree.mirrors(&reg));
        reg.insert('b', GlyphRecord::new("b.svg"));
        assert!(!tree.mirrors(&reg));
        tree.add_file_leaf('b', "b.svg");
        assert!(tree.mirrors(&reg));
        tree.add_file_leaf('b', "b_1.svg");
        assert!(!tree.mirrors(&reg));
    }

    #[test]
    fn test_display() {
        let tree = GlyphTree::from_registry(&registry(&[('a', "a.svg"), ('1', "1.svg")]));
        assert_eq!(
            tree.to_string(),
            "Latin letters\n  a\n    a.svg\nNumbers\n  1\n    1.svg\n"
        );
    }

    #[test]
    fn test_node_parents() {
        assert_eq!(
            TreeNode::leaf('x', "x.svg").parent(),
            Some(TreeNode::CharacterGroup('x'))
        );
        assert_eq!(
            TreeNode::CharacterGroup('?').parent(),
            Some(TreeNode::Category(Category::PunctuationMarks))
        );
        assert_eq!(TreeNode::Category(Category::Numbers).parent(), None);
    }
}
