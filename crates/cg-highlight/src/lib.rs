//! # cg-highlight
//!
//! An identifier highlighting pass for Cg/HLSL syntax trees.
//!
//! The pass walks an already-built syntax tree and reports which source
//! ranges name a type, a field, a variable, a function, or a reserved word.
//! Hosts feed the resulting highlights to whatever colorizes the editor.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → [Front-end] → SyntaxNode tree → [classify] → HighlightSink
//!                                                    ↓
//!                                               Diagnostics
//! ```
//!
//! - **Syntax model** ([`syntax`]): immutable tree, closed node kinds, typed views
//! - **Classifier** ([`classify`]): pre-order walk with one handler per node shape
//! - **Sinks** ([`sink`]): raw multiset or deduplicated, order-preserving set
//! - **Diagnostics** ([`diagnostics`]): silent recording of internal mismatches
//!
//! ## Example
//!
//! ```
//! use cg_highlight::{
//!     classify, ClassificationTag, HighlightSet, SyntaxKind, TextRange, TreeBuilder,
//! };
//!
//! // struct Foo { };
//! let mut builder = TreeBuilder::new();
//! builder.start_node(SyntaxKind::File, 0..15);
//! builder.start_node(SyntaxKind::StructDeclaration, 0..14);
//! builder.token(SyntaxKind::Identifier, 7..10);
//! builder.finish_node();
//! builder.finish_node();
//! let root = builder.finish().unwrap();
//!
//! let mut highlights = HighlightSet::new();
//! classify(&root, &mut highlights, &());
//! let name = TextRange::new(7.into(), 10.into());
//! assert!(highlights.contains(ClassificationTag::TypeIdentifier, name));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod highlight;
pub mod line_index;
pub mod sink;
pub mod syntax;

// Re-export main types
pub use classify::{classify, classify_with, Classify, Classifier, PassStats};
pub use context::ClassifyContext;
pub use diagnostics::{CollectedDiagnostics, Diagnostics, TracingDiagnostics};
pub use error::{ClassifyError, Result, TreeError};
pub use highlight::{ClassificationTag, Highlight, UnknownTag};
pub use line_index::{LineCol, LineIndex, LineSpan};
pub use sink::{Bounded, HighlightSet, HighlightSink};
pub use syntax::{NodeRange, SyntaxKind, SyntaxNode, TextRange, TextSize, TreeBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
