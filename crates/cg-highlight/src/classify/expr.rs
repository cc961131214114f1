//! Expression rules: field accesses and calls

use crate::highlight::ClassificationTag;
use crate::syntax::nodes::{AstView, CallOperator, FieldOperator, PostfixExpression};
use crate::syntax::SyntaxKind;

use super::{Classifier, Classify};

/// `a.b` tags `b` as a field. The base `a` is left to its own rules.
impl Classify for FieldOperator<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        match self.field() {
            Some(field) => cx.emit(ClassificationTag::FieldIdentifier, field),
            None => cx.skip(self.syntax(), "field"),
        }
    }
}

/// `foo(...)` tags `foo` as a function.
///
/// Only a bare identifier directly followed by a call qualifies. In
/// `a.b()` the operand of the call is the postfix `a.b`, not an identifier,
/// so nothing is emitted here and `b` is tagged by the field rule instead.
impl Classify for PostfixExpression<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        let first_is_call = self
            .operators()
            .next()
            .is_some_and(|op| op.kind() == SyntaxKind::CallOperator);
        if !first_is_call {
            return;
        }
        if let Some(callee) = self.identifier_operand() {
            cx.emit(ClassificationTag::FunctionIdentifier, callee);
        }
    }
}

/// A call whose parent postfix has an identifier operand tags that
/// identifier as a function.
///
/// This overlaps with the postfix rule: for `foo()` both fire and the same
/// highlight is emitted twice. It also fires for constructor-style calls,
/// so `Light(1)` with a user-declared `Light` struct tags `Light` as a
/// function.
impl Classify for CallOperator<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        let callee = cx
            .parent()
            .and_then(PostfixExpression::cast)
            .and_then(|postfix| postfix.identifier_operand());
        if let Some(callee) = callee {
            cx.emit(ClassificationTag::FunctionIdentifier, callee);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::{SyntaxKind, SyntaxNode};
    use crate::{classify, ClassificationTag, Highlight, TextRange};

    fn run(root: &SyntaxNode) -> Vec<Highlight> {
        let mut sink: Vec<Highlight> = Vec::new();
        classify(root, &mut sink, &());
        sink
    }

    fn call(callee: SyntaxNode, end: u32) -> SyntaxNode {
        let start = callee.range().start();
        let open = callee.range().end();
        let end = end.into();
        SyntaxNode::new(
            SyntaxKind::PostfixExpression,
            TextRange::new(start, end),
            vec![callee, SyntaxNode::leaf(SyntaxKind::CallOperator, TextRange::new(open, end))],
        )
    }

    #[test]
    fn test_call_on_identifier_emits_twice() {
        // foo()
        let root = call(SyntaxNode::leaf(SyntaxKind::Identifier, 0..3), 5);
        let expected = Highlight::new(
            ClassificationTag::FunctionIdentifier,
            TextRange::new(0.into(), 3.into()),
        );
        assert_eq!(run(&root), vec![expected, expected]);
    }

    #[test]
    fn test_method_style_call_tags_field_only() {
        // a.b()
        let field_access = SyntaxNode::new(
            SyntaxKind::PostfixExpression,
            0..3,
            vec![
                SyntaxNode::leaf(SyntaxKind::Identifier, 0..1),
                SyntaxNode::new(
                    SyntaxKind::FieldOperator,
                    1..3,
                    vec![SyntaxNode::leaf(SyntaxKind::Identifier, 2..3)],
                ),
            ],
        );
        let root = call(field_access, 5);
        assert_eq!(
            run(&root),
            vec![Highlight::new(
                ClassificationTag::FieldIdentifier,
                TextRange::new(2.into(), 3.into())
            )]
        );
    }

    #[test]
    fn test_index_then_call_only_call_rule_fires() {
        // f[0]() : first operator is an index, so only the call rule applies
        let root = SyntaxNode::new(
            SyntaxKind::PostfixExpression,
            0..6,
            vec![
                SyntaxNode::leaf(SyntaxKind::Identifier, 0..1),
                SyntaxNode::new(
                    SyntaxKind::IndexOperator,
                    1..4,
                    vec![SyntaxNode::leaf(SyntaxKind::Literal, 2..3)],
                ),
                SyntaxNode::leaf(SyntaxKind::CallOperator, 4..6),
            ],
        );
        assert_eq!(
            run(&root),
            vec![Highlight::new(
                ClassificationTag::FunctionIdentifier,
                TextRange::new(0.into(), 1.into())
            )]
        );
    }

    #[test]
    fn test_orphan_call_operator_emits_nothing() {
        let root = SyntaxNode::new(
            SyntaxKind::Block,
            0..2,
            vec![SyntaxNode::leaf(SyntaxKind::CallOperator, 0..2)],
        );
        assert!(run(&root).is_empty());
    }

    #[test]
    fn test_field_operator_without_field() {
        let root = SyntaxNode::leaf(SyntaxKind::FieldOperator, 0..1);
        assert!(run(&root).is_empty());
    }
}
