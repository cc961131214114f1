//! Highlight sinks
//!
//! The classifier only ever appends. What happens to duplicates is the
//! sink's decision:
//!
//! - `Vec<Highlight>` keeps the raw multiset, duplicates included
//! - [`HighlightSet`] keeps each `(tag, range)` pair once, in first-seen order
//! - [`Bounded`] forwards to another sink and asks the pass to stop once a
//!   budget is spent

use indexmap::{IndexMap, IndexSet};

use crate::highlight::{ClassificationTag, Highlight};
use crate::syntax::TextRange;

/// Receiver for highlights produced by a classification pass.
pub trait HighlightSink {
    /// Record one highlight.
    fn add(&mut self, tag: ClassificationTag, range: TextRange);

    /// Checked at every node boundary; returning `true` ends the pass early.
    fn should_stop(&self) -> bool {
        false
    }
}

impl HighlightSink for Vec<Highlight> {
    fn add(&mut self, tag: ClassificationTag, range: TextRange) {
        self.push(Highlight::new(tag, range));
    }
}

impl<S: HighlightSink + ?Sized> HighlightSink for &mut S {
    fn add(&mut self, tag: ClassificationTag, range: TextRange) {
        (**self).add(tag, range);
    }

    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Deduplicating Sink
// ═══════════════════════════════════════════════════════════════════════

/// Set of highlights, deduplicated by `(tag, range)`, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    entries: IndexSet<Highlight>,
}

impl HighlightSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct highlights.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if this exact `(tag, range)` pair was recorded.
    pub fn contains(&self, tag: ClassificationTag, range: TextRange) -> bool {
        self.entries.contains(&Highlight::new(tag, range))
    }

    /// Highlights in the order they were first recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Highlight> + '_ {
        self.entries.iter()
    }

    /// Tags recorded for exactly `range`, in first-seen order.
    pub fn tags_at(&self, range: TextRange) -> Vec<ClassificationTag> {
        self.entries
            .iter()
            .filter(|h| h.range == range)
            .map(|h| h.tag)
            .collect()
    }

    /// One tag per distinct range, sorted by range.
    ///
    /// When several tags cover the identical range the first recorded wins.
    /// Passes record in pre-order, so a declaration's own tagging of a
    /// sub-node beats the generic rule for that sub-node's kind.
    pub fn resolved(&self) -> Vec<Highlight> {
        let mut by_range: IndexMap<TextRange, ClassificationTag> = IndexMap::new();
        for highlight in &self.entries {
            by_range.entry(highlight.range).or_insert(highlight.tag);
        }
        let mut resolved: Vec<_> = by_range
            .into_iter()
            .map(|(range, tag)| Highlight::new(tag, range))
            .collect();
        resolved.sort();
        resolved
    }

    /// Consume the set, returning highlights sorted by range.
    pub fn into_sorted_vec(self) -> Vec<Highlight> {
        let mut highlights: Vec<_> = self.entries.into_iter().collect();
        highlights.sort();
        highlights
    }
}

impl HighlightSink for HighlightSet {
    fn add(&mut self, tag: ClassificationTag, range: TextRange) {
        self.entries.insert(Highlight::new(tag, range));
    }
}

impl<'a> IntoIterator for &'a HighlightSet {
    type Item = &'a Highlight;
    type IntoIter = indexmap::set::Iter<'a, Highlight>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Highlight> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = Highlight>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Budgeted Sink
// ═══════════════════════════════════════════════════════════════════════

/// Forwards to an inner sink and requests a stop after `limit` highlights.
///
/// Useful for hosts that only colorize a visible window and want the pass
/// to bail out once it has produced enough.
#[derive(Debug)]
pub struct Bounded<S> {
    inner: S,
    remaining: usize,
}

impl<S: HighlightSink> Bounded<S> {
    /// Wrap `inner`, allowing at most `limit` highlights through.
    pub fn new(inner: S, limit: usize) -> Self {
        Self {
            inner,
            remaining: limit,
        }
    }

    /// The wrapped sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: HighlightSink> HighlightSink for Bounded<S> {
    fn add(&mut self, tag: ClassificationTag, range: TextRange) {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.inner.add(tag, range);
        }
    }

    fn should_stop(&self) -> bool {
        self.remaining == 0 || self.inner.should_stop()
    }
}
