//! Typed views over [`SyntaxNode`]
//!
//! Each view wraps a node of one [`SyntaxKind`] and resolves its named
//! sub-parts. Accessors return `Option` when a part may be missing from a
//! partially typed file; [`FunctionHeader::name`] returns a `Result`
//! because a present-but-wrong node there is an internal inconsistency the
//! caller has to report.

use super::{SyntaxKind, SyntaxNode};
use crate::error::ClassifyError;

/// A borrowed, typed view of a single node kind.
pub trait AstView<'a>: Sized {
    /// True if nodes of `kind` can be viewed as this type.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// View `node` as this type, if its kind matches.
    fn cast(node: &'a SyntaxNode) -> Option<Self>;

    /// The underlying node.
    fn syntax(&self) -> &'a SyntaxNode;
}

macro_rules! ast_view {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            node: &'a SyntaxNode,
        }

        impl<'a> AstView<'a> for $name<'a> {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == $kind
            }

            fn cast(node: &'a SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self { node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &'a SyntaxNode {
                self.node
            }
        }
    };
}

ast_view!(
    /// `.field` inside a postfix chain.
    FieldOperator,
    SyntaxKind::FieldOperator
);
ast_view!(
    /// An operand followed by postfix operators.
    PostfixExpression,
    SyntaxKind::PostfixExpression
);
ast_view!(
    /// `(args)` inside a postfix chain.
    CallOperator,
    SyntaxKind::CallOperator
);
ast_view!(
    /// A single-variable declaration such as a function parameter.
    SingleVariableDeclaration,
    SyntaxKind::SingleVariableDeclaration
);
ast_view!(
    /// A declaration of one or more variables sharing a type.
    VariableDeclaration,
    SyntaxKind::VariableDeclaration
);
ast_view!(
    /// A member declaration inside a struct.
    FieldDeclaration,
    SyntaxKind::FieldDeclaration
);
ast_view!(
    /// `struct Name { ... }`.
    StructDeclaration,
    SyntaxKind::StructDeclaration
);
ast_view!(
    /// A function declaration or definition.
    FunctionDeclaration,
    SyntaxKind::FunctionDeclaration
);
ast_view!(
    /// Return type, name and parameters of a function.
    FunctionHeader,
    SyntaxKind::FunctionHeader
);
ast_view!(
    /// A built-in type keyword such as `float4x4`.
    BuiltInType,
    SyntaxKind::BuiltInType
);
ast_view!(
    /// A shader semantic binding such as `SV_Target`.
    Semantic,
    SyntaxKind::Semantic
);

impl<'a> FieldOperator<'a> {
    /// The accessed field's identifier.
    pub fn field(&self) -> Option<&'a SyntaxNode> {
        self.node.child_of_kind(SyntaxKind::Identifier)
    }
}

impl<'a> PostfixExpression<'a> {
    /// The expression the operators apply to.
    pub fn operand(&self) -> Option<&'a SyntaxNode> {
        self.node
            .children()
            .first()
            .filter(|c| !c.kind().is_postfix_operator())
    }

    /// The chained operators, in source order.
    pub fn operators(&self) -> impl Iterator<Item = &'a SyntaxNode> + 'a {
        self.node
            .children()
            .iter()
            .filter(|c| c.kind().is_postfix_operator())
    }

    /// The operand, if it is a bare identifier.
    pub fn identifier_operand(&self) -> Option<&'a SyntaxNode> {
        self.operand().filter(|o| o.kind() == SyntaxKind::Identifier)
    }
}

impl<'a> SingleVariableDeclaration<'a> {
    /// The declared type.
    pub fn type_node(&self) -> Option<&'a SyntaxNode> {
        self.node.type_child().map(|(_, node)| node)
    }
}

impl<'a> VariableDeclaration<'a> {
    /// The type shared by every declared variable, i.e. the type of the
    /// first one.
    pub fn type_node(&self) -> Option<&'a SyntaxNode> {
        self.node.type_child().map(|(_, node)| node)
    }

    /// One identifier per declared variable.
    pub fn names(&self) -> impl Iterator<Item = &'a SyntaxNode> + 'a {
        self.node.children_of_kind(SyntaxKind::Identifier)
    }
}

impl<'a> FieldDeclaration<'a> {
    /// The variable declaration this field wraps.
    pub fn content(&self) -> Option<VariableDeclaration<'a>> {
        self.node
            .child_of_kind(SyntaxKind::VariableDeclaration)
            .and_then(VariableDeclaration::cast)
    }
}

impl<'a> StructDeclaration<'a> {
    /// The struct's name.
    pub fn name(&self) -> Option<&'a SyntaxNode> {
        self.node.child_of_kind(SyntaxKind::Identifier)
    }
}

impl<'a> FunctionDeclaration<'a> {
    /// The function's header.
    pub fn header(&self) -> Option<FunctionHeader<'a>> {
        self.node
            .child_of_kind(SyntaxKind::FunctionHeader)
            .and_then(FunctionHeader::cast)
    }
}

impl<'a> FunctionHeader<'a> {
    /// The return type.
    pub fn type_node(&self) -> Option<&'a SyntaxNode> {
        self.node.type_child().map(|(_, node)| node)
    }

    /// The function name: the node right after the return type.
    ///
    /// Returns `Ok(None)` when there is no return type to anchor on, or
    /// when the header ends before a name.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if a node is present in the name position
    /// but is not an identifier.
    pub fn name(&self) -> Result<Option<&'a SyntaxNode>, ClassifyError> {
        let Some((type_index, _)) = self.node.type_child() else {
            return Ok(None);
        };
        match self.node.children().get(type_index + 1) {
            Some(node) if node.kind() == SyntaxKind::Identifier => Ok(Some(node)),
            Some(node) => Err(ClassifyError::ShapeMismatch {
                node: SyntaxKind::FunctionHeader,
                expected: SyntaxKind::Identifier,
                found: node.kind(),
                range: node.range(),
            }),
            None => Ok(None),
        }
    }
}
