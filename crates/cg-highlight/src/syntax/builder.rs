//! Incremental tree construction for front-ends

use super::{NodeRange, SyntaxKind, SyntaxNode, TextRange};
use crate::error::TreeError;

/// Builds a [`SyntaxNode`] tree from a stream of start/finish events.
///
/// Front-ends call [`start_node`](Self::start_node) when they enter a
/// construct, [`token`](Self::token) for leaves, and
/// [`finish_node`](Self::finish_node) when they leave it. Misuse is not a
/// panic, inverted ranges included: the first problem is remembered and
/// reported by [`finish`](Self::finish).
///
/// Unlike a lossless token-tree builder, ranges are given explicitly and
/// need not tile their parent, so trivia and unclassified text can simply
/// be left out.
///
/// # Example
///
/// ```
/// use cg_highlight::{SyntaxKind, TreeBuilder};
///
/// // float a;
/// let mut builder = TreeBuilder::new();
/// builder.start_node(SyntaxKind::VariableDeclaration, 0..8);
/// builder.token(SyntaxKind::BuiltInType, 0..5);
/// builder.token(SyntaxKind::Identifier, 6..7);
/// builder.finish_node();
///
/// let root = builder.finish().unwrap();
/// assert_eq!(root.children().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// Open nodes, innermost last
    open: Vec<(SyntaxKind, TextRange, Vec<SyntaxNode>)>,
    /// Completed top-level node
    root: Option<SyntaxNode>,
    /// First error encountered
    error: Option<TreeError>,
}

impl TreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a node; subsequent nodes become its children until the matching
    /// [`finish_node`](Self::finish_node).
    pub fn start_node(&mut self, kind: SyntaxKind, range: impl NodeRange) {
        let range = self.checked(kind, range);
        self.open.push((kind, range, Vec::new()));
    }

    /// Add a leaf node to the currently open node.
    pub fn token(&mut self, kind: SyntaxKind, range: impl NodeRange) {
        let range = self.checked(kind, range);
        self.attach(SyntaxNode::leaf(kind, range));
    }

    /// Close the innermost open node.
    pub fn finish_node(&mut self) {
        match self.open.pop() {
            Some((kind, range, children)) => self.attach(SyntaxNode::new(kind, range, children)),
            None => self.fail(TreeError::UnbalancedFinish),
        }
    }

    /// Number of currently open nodes.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Return the finished tree.
    ///
    /// # Errors
    ///
    /// - `UnbalancedFinish` if `finish_node` was called with nothing open
    /// - `UnclosedNodes` if nodes are still open
    /// - `MultipleRoots` if more than one top-level node was produced
    /// - `ChildOutsideParent` if a child's range escapes its parent
    /// - `InvalidRange` if a range starts past its end
    /// - `Empty` if nothing was built
    pub fn finish(mut self) -> Result<SyntaxNode, TreeError> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        if !self.open.is_empty() {
            return Err(TreeError::UnclosedNodes {
                count: self.open.len(),
            });
        }
        self.root.take().ok_or(TreeError::Empty)
    }

    // An inverted range is recorded and replaced by an empty one at its
    // start; the builder is already failed, so the placeholder never escapes.
    fn checked(&mut self, kind: SyntaxKind, range: impl NodeRange) -> TextRange {
        let (start, end) = range.bounds();
        if start <= end {
            return TextRange::new(start, end);
        }
        self.fail(TreeError::InvalidRange {
            kind,
            start: start.into(),
            end: end.into(),
        });
        TextRange::empty(start)
    }

    fn attach(&mut self, node: SyntaxNode) {
        match self.open.last_mut() {
            Some((parent, parent_range, children)) => {
                if !parent_range.contains_range(node.range()) {
                    let error = TreeError::ChildOutsideParent {
                        parent: *parent,
                        parent_range: *parent_range,
                        child: node.kind(),
                        child_range: node.range(),
                    };
                    self.fail(error);
                    return;
                }
                children.push(node);
            }
            None if self.root.is_none() => self.root = Some(node),
            None => self.fail(TreeError::MultipleRoots),
        }
    }

    fn fail(&mut self, error: TreeError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}
