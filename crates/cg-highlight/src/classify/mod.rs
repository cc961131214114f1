//! Identifier classification
//!
//! A single pre-order walk over the tree. Every node is visited exactly
//! once; if its kind has a rule, the rule emits highlights for the node or
//! its sub-parts, and the walk then continues into the node's children
//! whether or not anything was emitted. Rules never look at what other
//! rules emitted, so a declaration and the nodes nested inside it are
//! classified independently.

pub mod decl;
pub mod expr;
pub mod keyword;

use serde::Serialize;
use tracing::{debug, trace};

use crate::context::ClassifyContext;
use crate::diagnostics::Diagnostics;
use crate::error::{ClassifyError, Result};
use crate::highlight::ClassificationTag;
use crate::sink::HighlightSink;
use crate::syntax::nodes::{
    AstView, BuiltInType, CallOperator, FieldDeclaration, FieldOperator, FunctionDeclaration,
    PostfixExpression, Semantic, SingleVariableDeclaration, StructDeclaration,
    VariableDeclaration,
};
use crate::syntax::{SyntaxKind, SyntaxNode};

/// Trait for node shapes that have a classification rule.
///
/// Implementations emit through the [`Classifier`] and never recurse
/// themselves; the walk in [`classify_with`] visits children.
pub trait Classify {
    /// Apply this node's rule.
    fn classify(&self, cx: &mut Classifier<'_>);
}

/// Counters for one classification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    /// Nodes visited
    pub nodes_visited: usize,
    /// Highlights handed to the sink, duplicates included
    pub highlights_emitted: usize,
    /// Shape mismatches recorded through diagnostics
    pub mismatches: usize,
}

// ═══════════════════════════════════════════════════════════════════════
// Classifier
// ═══════════════════════════════════════════════════════════════════════

/// Per-pass state handed to every rule: the output sink, the diagnostics
/// collaborator, and the parent of the node being classified.
pub struct Classifier<'a> {
    sink: &'a mut dyn HighlightSink,
    diagnostics: &'a dyn Diagnostics,
    parent: Option<&'a SyntaxNode>,
    trace: bool,
    stats: PassStats,
}

impl<'a> Classifier<'a> {
    fn new(
        sink: &'a mut dyn HighlightSink,
        diagnostics: &'a dyn Diagnostics,
        trace: bool,
    ) -> Self {
        Self {
            sink,
            diagnostics,
            parent: None,
            trace,
            stats: PassStats::default(),
        }
    }

    /// Parent of the node currently being classified; `None` at the root.
    pub fn parent(&self) -> Option<&'a SyntaxNode> {
        self.parent
    }

    /// Emit `tag` for the whole range of `node`.
    pub fn emit(&mut self, tag: ClassificationTag, node: &SyntaxNode) {
        let range = node.range();
        if self.trace {
            trace!(%tag, ?range, kind = %node.kind(), "highlight");
        }
        self.sink.add(tag, range);
        self.stats.highlights_emitted += 1;
    }

    /// Note that `owner` had no `part` to highlight.
    pub fn skip(&self, owner: &SyntaxNode, part: &str) {
        trace!(
            kind = %owner.kind(),
            range = ?owner.range(),
            part,
            "missing sub-node, skipped"
        );
    }

    /// Hand a non-fatal error to the diagnostics collaborator.
    pub fn record(&mut self, error: ClassifyError) {
        self.stats.mismatches += 1;
        self.diagnostics.record_silent(&error);
    }

    /// Counters so far.
    pub fn stats(&self) -> PassStats {
        self.stats
    }
}

impl std::fmt::Debug for Classifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("parent", &self.parent.map(|p| p.kind()))
            .field("trace", &self.trace)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Node Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Classify for SyntaxNode {
    fn classify(&self, cx: &mut Classifier<'_>) {
        match self.kind() {
            // Expressions
            SyntaxKind::FieldOperator => dispatch::<FieldOperator>(self, cx),
            SyntaxKind::PostfixExpression => dispatch::<PostfixExpression>(self, cx),
            SyntaxKind::CallOperator => dispatch::<CallOperator>(self, cx),

            // Declarations
            SyntaxKind::SingleVariableDeclaration => {
                dispatch::<SingleVariableDeclaration>(self, cx)
            }
            SyntaxKind::VariableDeclaration => dispatch::<VariableDeclaration>(self, cx),
            SyntaxKind::FieldDeclaration => dispatch::<FieldDeclaration>(self, cx),
            SyntaxKind::StructDeclaration => dispatch::<StructDeclaration>(self, cx),
            SyntaxKind::FunctionDeclaration => dispatch::<FunctionDeclaration>(self, cx),

            // Reserved words
            SyntaxKind::BuiltInType => dispatch::<BuiltInType>(self, cx),
            SyntaxKind::Semantic => dispatch::<Semantic>(self, cx),

            // No rule; children are still visited
            SyntaxKind::File
            | SyntaxKind::IndexOperator
            | SyntaxKind::Initializer
            | SyntaxKind::TypeName
            | SyntaxKind::FunctionHeader
            | SyntaxKind::ParameterList
            | SyntaxKind::Identifier
            | SyntaxKind::Block
            | SyntaxKind::ExpressionStatement
            | SyntaxKind::ReturnStatement
            | SyntaxKind::BinaryExpression
            | SyntaxKind::Literal
            | SyntaxKind::Error => {}
        }
    }
}

fn dispatch<'n, V>(node: &'n SyntaxNode, cx: &mut Classifier<'_>)
where
    V: AstView<'n> + Classify,
{
    if let Some(view) = V::cast(node) {
        view.classify(cx);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Entry Points
// ═══════════════════════════════════════════════════════════════════════

/// Classify every node under `root`, sending highlights to `sink`.
///
/// Never fails. Shape mismatches go to `diagnostics`; if the sink asks to
/// stop, the pass ends early and whatever was emitted so far stands.
pub fn classify<S, D>(root: &SyntaxNode, sink: &mut S, diagnostics: &D)
where
    S: HighlightSink,
    D: Diagnostics,
{
    if let Err(err) = classify_with(root, sink, diagnostics, &ClassifyContext::default()) {
        debug!("{}", err);
    }
}

/// Classify every node under `root` under the control of `ctx`.
///
/// The walk is iterative, so tree depth is bounded only by memory. Before
/// each node it checks the context's interrupt flag and the sink's
/// [`should_stop`](HighlightSink::should_stop).
///
/// # Errors
///
/// Returns `Interrupted` if either check asked the pass to stop.
pub fn classify_with<S, D>(
    root: &SyntaxNode,
    sink: &mut S,
    diagnostics: &D,
    ctx: &ClassifyContext,
) -> Result<PassStats>
where
    S: HighlightSink,
    D: Diagnostics,
{
    let mut cx = Classifier::new(sink, diagnostics, ctx.trace);
    let mut stack: Vec<(&SyntaxNode, Option<&SyntaxNode>)> = vec![(root, None)];

    while let Some((node, parent)) = stack.pop() {
        if ctx.is_interrupted() || cx.sink.should_stop() {
            let visited = cx.stats.nodes_visited;
            debug!(visited, "classification pass interrupted");
            return Err(ClassifyError::Interrupted { visited });
        }

        cx.parent = parent;
        cx.stats.nodes_visited += 1;
        node.classify(&mut cx);

        stack.extend(node.children().iter().rev().map(|child| (child, Some(node))));
    }

    let stats = cx.stats;
    debug!(
        nodes = stats.nodes_visited,
        highlights = stats.highlights_emitted,
        mismatches = stats.mismatches,
        "classification pass finished"
    );
    Ok(stats)
}
