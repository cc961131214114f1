//! Syntax tree model
//!
//! The classifier consumes trees built elsewhere: a front-end parses Cg/HLSL
//! source and assembles [`SyntaxNode`]s, either directly through
//! [`TreeBuilder`] or by handing over a serialized tree. Once built, a tree
//! is never mutated.
//!
//! # Tree shapes
//!
//! Named sub-parts of a node are found by position and kind rather than
//! stored separately; the typed views in [`nodes`] encode those conventions:
//!
//! ```text
//! StructDeclaration       Identifier(name) FieldDeclaration*
//! FieldDeclaration        VariableDeclaration
//! VariableDeclaration     <type> (Identifier Semantic? Initializer?)+
//! FunctionDeclaration     FunctionHeader Block?
//! FunctionHeader          <type> Identifier(name) ParameterList Semantic?
//! ParameterList           SingleVariableDeclaration*
//! SingleVariableDeclaration <type> Identifier Semantic? Initializer?
//! Initializer             <expr>
//! PostfixExpression       <expr>(operand) <operator>+
//! FieldOperator           Identifier(field)
//! CallOperator            <expr>*  (arguments)
//! ```
//!
//! `<type>` is a `BuiltInType` or a `TypeName`. Operator chains nest to the
//! left: `a.b()` is a call postfix whose operand is the field postfix `a.b`.

mod builder;
pub mod nodes;

pub use builder::TreeBuilder;
pub use text_size::{TextRange, TextSize};

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::TreeError;

// ═══════════════════════════════════════════════════════════════════════
// Node Kinds
// ═══════════════════════════════════════════════════════════════════════

/// The closed set of node kinds a front-end may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    /// Root of a file
    File,
    /// `.field` in a postfix chain
    FieldOperator,
    /// An operand followed by postfix operators
    PostfixExpression,
    /// `(args)` in a postfix chain
    CallOperator,
    /// `[index]` in a postfix chain
    IndexOperator,
    /// A declaration of exactly one variable, e.g. a function parameter
    SingleVariableDeclaration,
    /// A declaration of one or more variables sharing a type
    VariableDeclaration,
    /// `= expr` after a declared name
    Initializer,
    /// A built-in type such as `float3` or `void`
    BuiltInType,
    /// A reference to a user-declared type
    TypeName,
    /// A member declaration inside a struct
    FieldDeclaration,
    /// `struct Name { ... }`
    StructDeclaration,
    /// A function with its header and optional body
    FunctionDeclaration,
    /// Return type, name, parameters and semantic of a function
    FunctionHeader,
    /// Parenthesized function parameters
    ParameterList,
    /// Shader semantic binding such as `SV_Target`
    Semantic,
    /// A bare identifier
    Identifier,
    /// `{ ... }`
    Block,
    /// An expression followed by `;`
    ExpressionStatement,
    /// `return expr;`
    ReturnStatement,
    /// `lhs op rhs`
    BinaryExpression,
    /// Numeric, boolean or string literal
    Literal,
    /// Anything the front-end failed to parse
    Error,
}

impl SyntaxKind {
    /// True for kinds that can stand in a type position.
    pub fn is_type(self) -> bool {
        matches!(self, SyntaxKind::BuiltInType | SyntaxKind::TypeName)
    }

    /// True for the operators a postfix expression chains.
    pub fn is_postfix_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::FieldOperator | SyntaxKind::CallOperator | SyntaxKind::IndexOperator
        )
    }

    /// Human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::File => "file",
            SyntaxKind::FieldOperator => "field operator",
            SyntaxKind::PostfixExpression => "postfix expression",
            SyntaxKind::CallOperator => "call operator",
            SyntaxKind::IndexOperator => "index operator",
            SyntaxKind::SingleVariableDeclaration => "single variable declaration",
            SyntaxKind::VariableDeclaration => "variable declaration",
            SyntaxKind::Initializer => "initializer",
            SyntaxKind::BuiltInType => "built-in type",
            SyntaxKind::TypeName => "type name",
            SyntaxKind::FieldDeclaration => "field declaration",
            SyntaxKind::StructDeclaration => "struct declaration",
            SyntaxKind::FunctionDeclaration => "function declaration",
            SyntaxKind::FunctionHeader => "function header",
            SyntaxKind::ParameterList => "parameter list",
            SyntaxKind::Semantic => "semantic",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::Block => "block",
            SyntaxKind::ExpressionStatement => "expression statement",
            SyntaxKind::ReturnStatement => "return statement",
            SyntaxKind::BinaryExpression => "binary expression",
            SyntaxKind::Literal => "literal",
            SyntaxKind::Error => "error",
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Ranges
// ═══════════════════════════════════════════════════════════════════════

/// A node range as handed over by a front-end: either a [`TextRange`] or a
/// plain `start..end` of byte offsets.
///
/// Only the bounds are extracted, so an inverted `start..end` can be
/// reported instead of tripping [`TextRange::new`]'s assertion.
pub trait NodeRange {
    /// `(start, end)`, possibly with `start > end`.
    fn bounds(self) -> (TextSize, TextSize);
}

impl NodeRange for TextRange {
    fn bounds(self) -> (TextSize, TextSize) {
        (self.start(), self.end())
    }
}

impl NodeRange for Range<u32> {
    fn bounds(self) -> (TextSize, TextSize) {
        (TextSize::new(self.start), TextSize::new(self.end))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Nodes
// ═══════════════════════════════════════════════════════════════════════

/// An immutable node of a Cg syntax tree.
///
/// Each node owns its children in source order. Children are expected to
/// lie within their parent's range; [`SyntaxNode::validate`] checks this
/// for trees that did not come from a [`TreeBuilder`]. On the wire a range
/// is a `[start, end]` pair, and inverted pairs fail to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    range: TextRange,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Create a node. Prefer [`TreeBuilder`], which checks nesting.
    ///
    /// # Panics
    ///
    /// Panics if the range's start is past its end.
    pub fn new(kind: SyntaxKind, range: impl NodeRange, children: Vec<SyntaxNode>) -> Self {
        let (start, end) = range.bounds();
        Self {
            kind,
            range: TextRange::new(start, end),
            children,
        }
    }

    /// Create a node with no children.
    ///
    /// # Panics
    ///
    /// Panics if the range's start is past its end.
    pub fn leaf(kind: SyntaxKind, range: impl NodeRange) -> Self {
        Self::new(kind, range, Vec::new())
    }

    /// The node's kind.
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// The node's source range.
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Children in source order.
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// First child of the given kind.
    pub fn child_of_kind(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// All children of the given kind.
    pub fn children_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Position and node of the first child in a type position.
    pub(crate) fn type_child(&self) -> Option<(usize, &SyntaxNode)> {
        self.children
            .iter()
            .enumerate()
            .find(|(_, c)| c.kind.is_type())
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Check that every child lies within its parent.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in pre-order.
    pub fn validate(&self) -> Result<(), TreeError> {
        for node in self.descendants() {
            for child in &node.children {
                if !node.range.contains_range(child.range) {
                    return Err(TreeError::ChildOutsideParent {
                        parent: node.kind,
                        parent_range: node.range,
                        child: child.kind,
                        child_range: child.range,
                    });
                }
            }
        }
        Ok(())
    }
}

// Iterative so that dropping a deeply nested tree cannot overflow the stack.
impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Pre-order iterator returned by [`SyntaxNode::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SyntaxNode {
        // float a, b;
        SyntaxNode::new(
            SyntaxKind::VariableDeclaration,
            0..11,
            vec![
                SyntaxNode::leaf(SyntaxKind::BuiltInType, 0..5),
                SyntaxNode::leaf(SyntaxKind::Identifier, 6..7),
                SyntaxNode::leaf(SyntaxKind::Identifier, 9..10),
            ],
        )
    }

    #[test]
    fn test_descendants_preorder() {
        let kinds: Vec<_> = sample().descendants().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::VariableDeclaration,
                SyntaxKind::BuiltInType,
                SyntaxKind::Identifier,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_children_of_kind() {
        let node = sample();
        assert_eq!(node.children_of_kind(SyntaxKind::Identifier).count(), 2);
        assert_eq!(
            node.child_of_kind(SyntaxKind::BuiltInType).map(|n| n.range()),
            Some(TextRange::new(0.into(), 5.into()))
        );
        assert!(node.child_of_kind(SyntaxKind::Semantic).is_none());
    }

    #[test]
    fn test_validate_rejects_escaping_child() {
        let node = SyntaxNode::new(
            SyntaxKind::Block,
            0..4,
            vec![SyntaxNode::leaf(SyntaxKind::Identifier, 2..8)],
        );
        assert!(matches!(
            node.validate(),
            Err(TreeError::ChildOutsideParent { .. })
        ));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_plain_ranges_convert() {
        let node = SyntaxNode::leaf(SyntaxKind::Identifier, 6..7);
        assert_eq!(node.range(), TextRange::at(6.into(), 1.into()));
        assert_eq!((5u32..1).bounds(), (TextSize::new(5), TextSize::new(1)));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(SyntaxKind::BuiltInType.to_string(), "built-in type");
        assert!(SyntaxKind::TypeName.is_type());
        assert!(!SyntaxKind::Identifier.is_type());
        assert!(SyntaxKind::CallOperator.is_postfix_operator());
    }
}
