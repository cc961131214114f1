//! Reserved-word rules

use crate::highlight::ClassificationTag;
use crate::syntax::nodes::{AstView, BuiltInType, Semantic};

use super::{Classifier, Classify};

/// Built-in types are reserved words, not user symbols, so they are
/// keywords rather than type identifiers.
impl Classify for BuiltInType<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        cx.emit(ClassificationTag::Keyword, self.syntax());
    }
}

// TODO: give semantics their own tag once hosts can theme them separately.
impl Classify for Semantic<'_> {
    fn classify(&self, cx: &mut Classifier<'_>) {
        cx.emit(ClassificationTag::Keyword, self.syntax());
    }
}
