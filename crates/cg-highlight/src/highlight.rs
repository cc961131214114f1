//! Classification tags and highlights

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::syntax::{TextRange, TextSize};

/// The role an identifier plays, as far as colorizing is concerned.
///
/// Ordering follows declaration order and only exists so highlights can be
/// sorted deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationTag {
    /// Reserved words, built-in types and shader semantics
    Keyword,
    /// User-declared type names and type references in declarations
    TypeIdentifier,
    /// Struct members and field accesses
    FieldIdentifier,
    /// Declared variables
    VariableIdentifier,
    /// Declared or called functions
    FunctionIdentifier,
}

impl ClassificationTag {
    /// Every tag, in declaration order.
    pub const ALL: [ClassificationTag; 5] = [
        ClassificationTag::Keyword,
        ClassificationTag::TypeIdentifier,
        ClassificationTag::FieldIdentifier,
        ClassificationTag::VariableIdentifier,
        ClassificationTag::FunctionIdentifier,
    ];

    /// Stable attribute id hosts register colors under.
    pub fn attribute_id(self) -> &'static str {
        match self {
            ClassificationTag::Keyword => "CG_KEYWORD",
            ClassificationTag::TypeIdentifier => "CG_TYPE_IDENTIFIER",
            ClassificationTag::FieldIdentifier => "CG_FIELD_IDENTIFIER",
            ClassificationTag::VariableIdentifier => "CG_VARIABLE_IDENTIFIER",
            ClassificationTag::FunctionIdentifier => "CG_FUNCTION_IDENTIFIER",
        }
    }

    /// Tree-sitter style capture name, for hosts whose themes are keyed
    /// that way (`@keyword`, `@type`, ...).
    pub fn capture_name(self) -> &'static str {
        match self {
            ClassificationTag::Keyword => "keyword",
            ClassificationTag::TypeIdentifier => "type",
            ClassificationTag::FieldIdentifier => "property",
            ClassificationTag::VariableIdentifier => "variable",
            ClassificationTag::FunctionIdentifier => "function",
        }
    }
}

impl fmt::Display for ClassificationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_id())
    }
}

/// Returned when parsing an unknown attribute id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown classification tag `{0}`")]
pub struct UnknownTag(pub String);

impl FromStr for ClassificationTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.attribute_id() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// A single `(tag, range)` fact about how to colorize source text.
///
/// Highlights sort by range start, then range end, then tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Highlight {
    /// Source range being classified
    pub range: TextRange,
    /// Role of the text in that range
    pub tag: ClassificationTag,
}

impl Highlight {
    /// Create a highlight.
    pub fn new(tag: ClassificationTag, range: TextRange) -> Self {
        Self { range, tag }
    }

    /// The highlighted text, or `None` if the range is out of bounds for
    /// `source` or splits a character.
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(Range::<usize>::from(self.range))
    }

    fn sort_key(&self) -> (TextSize, TextSize, ClassificationTag) {
        (self.range.start(), self.range.end(), self.tag)
    }
}

impl Ord for Highlight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Highlight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn test_attribute_id_round_trip() {
        for tag in ClassificationTag::ALL {
            assert_eq!(tag.to_string().parse::<ClassificationTag>(), Ok(tag));
        }
        assert_eq!(
            "CG_MACRO".parse::<ClassificationTag>(),
            Err(UnknownTag("CG_MACRO".to_string()))
        );
    }

    #[test]
    fn test_capture_names_unique() {
        let mut names: Vec<_> = ClassificationTag::ALL
            .iter()
            .map(|t| t.capture_name())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ClassificationTag::ALL.len());
    }

    #[test]
    fn test_highlight_ordering_by_range_first() {
        let a = Highlight::new(ClassificationTag::FunctionIdentifier, range(0, 3));
        let b = Highlight::new(ClassificationTag::Keyword, range(4, 5));
        assert!(a < b);
    }

    #[test]
    fn test_highlight_ordering_by_end_then_tag() {
        let outer = Highlight::new(ClassificationTag::Keyword, range(0, 9));
        let inner = Highlight::new(ClassificationTag::Keyword, range(0, 3));
        let other_tag = Highlight::new(ClassificationTag::TypeIdentifier, inner.range);
        let mut sorted = vec![other_tag, outer, inner];
        sorted.sort();
        assert_eq!(sorted, vec![inner, other_tag, outer]);
    }

    #[test]
    fn test_highlight_text_out_of_bounds() {
        let h = Highlight::new(ClassificationTag::Keyword, range(3, 40));
        assert_eq!(h.text("float"), None);
    }

    #[test]
    fn test_highlight_text() {
        let h = Highlight::new(ClassificationTag::TypeIdentifier, range(7, 10));
        assert_eq!(h.text("struct Foo {};"), Some("Foo"));
    }
}
