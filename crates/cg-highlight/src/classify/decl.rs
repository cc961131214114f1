//! Declaration rules: variables, fields, structs and functions

use crate::highlight::ClassificationTag;
use crate::syntax::nodes::{
    AstView, FieldDeclaration, FunctionDeclaration, SingleVariableDeclaration,
    StructDeclaration, VariableDeclaration,
};

use super::{Classifier, Classify};

/// A lone declaration such as a parameter tags its type.
impl Classify for SingleVariableDeclaration<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        match self.type_node() {
            Some(ty) => cx.emit(ClassificationTag::TypeIdentifier, ty),
            None => cx.skip(self.syntax(), "type"),
        }
    }
}

/// `float a, b;` tags each declared name as a variable.
impl Classify for VariableDeclaration<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        for name in self.names() {
            cx.emit(ClassificationTag::VariableIdentifier, name);
        }
    }
}

/// A struct member tags its type and every declared name as a field.
///
/// All or nothing: while a member is still being typed its variable or
/// type may be missing, and then the member is skipped entirely.
impl Classify for FieldDeclaration<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        let Some(content) = self.content() else {
            cx.skip(self.syntax(), "variable declaration");
            return;
        };
        let Some(ty) = content.type_node() else {
            cx.skip(self.syntax(), "type");
            return;
        };

        cx.emit(ClassificationTag::TypeIdentifier, ty);
        for name in content.names() {
            cx.emit(ClassificationTag::FieldIdentifier, name);
        }
    }
}

impl Classify for StructDeclaration<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        match self.name() {
            Some(name) => cx.emit(ClassificationTag::TypeIdentifier, name),
            None => cx.skip(self.syntax(), "name"),
        }
    }
}

/// Tags the return type, then the name.
///
/// The return type is emitted first and independently: a name that fails
/// to resolve is recorded through diagnostics and only the name is lost.
impl Classify for FunctionDeclaration<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        let Some(header) = self.header() else {
            cx.skip(self.syntax(), "header");
            return;
        };

        match header.type_node() {
            Some(ty) => cx.emit(ClassificationTag::TypeIdentifier, ty),
            None => cx.skip(header.syntax(), "return type"),
        }

        match header.name() {
            Ok(Some(name)) => cx.emit(ClassificationTag::FunctionIdentifier, name),
            Ok(None) => cx.skip(header.syntax(), "name"),
            Err(err) => cx.record(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::{SyntaxKind, SyntaxNode};
    use crate::{classify, ClassificationTag, CollectedDiagnostics, Highlight, TextRange};

    fn h(tag: ClassificationTag, start: u32, end: u32) -> Highlight {
        Highlight::new(tag, TextRange::new(start.into(), end.into()))
    }

    #[test]
    fn test_variable_declaration_names() {
        // float a, b;
        let root = SyntaxNode::new(
            SyntaxKind::VariableDeclaration,
            0..11,
            vec![
                SyntaxNode::leaf(SyntaxKind::BuiltInType, 0..5),
                SyntaxNode::leaf(SyntaxKind::Identifier, 6..7),
                SyntaxNode::leaf(SyntaxKind::Identifier, 9..10),
            ],
        );
        let mut sink: Vec<Highlight> = Vec::new();
        classify(&root, &mut sink, &());
        assert_eq!(
            sink,
            vec![
                h(ClassificationTag::VariableIdentifier, 6, 7),
                h(ClassificationTag::VariableIdentifier, 9, 10),
                h(ClassificationTag::Keyword, 0, 5),
            ]
        );
    }

    #[test]
    fn test_field_declaration_without_type_is_skipped() {
        // struct member mid-edit: `bar;`
        let root = SyntaxNode::new(
            SyntaxKind::FieldDeclaration,
            0..4,
            vec![SyntaxNode::new(
                SyntaxKind::VariableDeclaration,
                0..3,
                vec![SyntaxNode::leaf(SyntaxKind::Identifier, 0..3)],
            )],
        );
        let mut sink: Vec<Highlight> = Vec::new();
        classify(&root, &mut sink, &());
        // Only the nested variable declaration's own rule fires.
        assert_eq!(sink, vec![h(ClassificationTag::VariableIdentifier, 0, 3)]);
    }

    #[test]
    fn test_function_name_mismatch_keeps_return_type() {
        // float4 <error>() : the name position holds an error node
        let root = SyntaxNode::new(
            SyntaxKind::FunctionDeclaration,
            0..14,
            vec![SyntaxNode::new(
                SyntaxKind::FunctionHeader,
                0..14,
                vec![
                    SyntaxNode::leaf(SyntaxKind::BuiltInType, 0..6),
                    SyntaxNode::leaf(SyntaxKind::Error, 7..12),
                    SyntaxNode::leaf(SyntaxKind::ParameterList, 12..14),
                ],
            )],
        );
        let mut sink: Vec<Highlight> = Vec::new();
        let diagnostics = CollectedDiagnostics::new();
        classify(&root, &mut sink, &diagnostics);
        assert_eq!(
            sink,
            vec![
                h(ClassificationTag::TypeIdentifier, 0, 6),
                h(ClassificationTag::Keyword, 0, 6),
            ]
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_function_without_header() {
        let root = SyntaxNode::new(
            SyntaxKind::FunctionDeclaration,
            0..2,
            vec![SyntaxNode::leaf(SyntaxKind::Block, 0..2)],
        );
        let mut sink: Vec<Highlight> = Vec::new();
        classify(&root, &mut sink, &());
        assert!(sink.is_empty());
    }
}
