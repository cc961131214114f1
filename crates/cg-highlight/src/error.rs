//! Error types for classification and tree construction

use thiserror::Error;

use crate::syntax::{SyntaxKind, TextRange};

/// Errors raised while classifying a tree.
///
/// None of these abort a pass on their own: shape mismatches are recorded
/// through [`Diagnostics`](crate::Diagnostics) and classification moves on.
/// Only [`Interrupted`](ClassifyError::Interrupted) is returned to the
/// caller, and only from [`classify_with`](crate::classify_with).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// A sub-node was present but not of the expected kind
    #[error("Shape mismatch in {node} at {range:?}: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Kind of the node whose sub-part was being resolved
        node: SyntaxKind,
        /// Expected kind of the sub-part
        expected: SyntaxKind,
        /// Kind actually found
        found: SyntaxKind,
        /// Range of the offending sub-node
        range: TextRange,
    },

    /// The pass was stopped before visiting every node
    #[error("Classification interrupted after {visited} nodes")]
    Interrupted {
        /// Nodes visited before stopping
        visited: usize,
    },
}

/// Errors raised while building or validating a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// `finish_node` without a matching `start_node`
    #[error("finish_node called with no open node")]
    UnbalancedFinish,

    /// `finish` called while nodes were still open
    #[error("{count} node(s) left open")]
    UnclosedNodes {
        /// Number of open nodes
        count: usize,
    },

    /// More than one top-level node
    #[error("tree has more than one root")]
    MultipleRoots,

    /// Nothing was built
    #[error("tree is empty")]
    Empty,

    /// A child's range is not contained in its parent's
    #[error("{child} at {child_range:?} lies outside its parent {parent} at {parent_range:?}")]
    ChildOutsideParent {
        /// Parent kind
        parent: SyntaxKind,
        /// Parent range
        parent_range: TextRange,
        /// Child kind
        child: SyntaxKind,
        /// Child range
        child_range: TextRange,
    },

    /// A range whose start is past its end
    #[error("{kind} has inverted range {start}..{end}")]
    InvalidRange {
        /// Node kind
        kind: SyntaxKind,
        /// Start offset
        start: u32,
        /// End offset
        end: u32,
    },
}

/// Result type alias for classification
pub type Result<T> = std::result::Result<T, ClassifyError>;
