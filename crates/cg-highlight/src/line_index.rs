//! Offset to line/column conversion
//!
//! Highlights carry byte offsets. Editors usually render line by line, so
//! [`LineIndex`] converts offsets to positions and splits highlights into
//! per-line spans.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::highlight::{ClassificationTag, Highlight};
use crate::syntax::{TextRange, TextSize};

/// A line/column position, both 0-indexed. `col` is a byte offset from the
/// start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineCol {
    /// Line number
    pub line: u32,
    /// Byte offset within the line
    pub col: u32,
}

/// A highlighted span within one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    /// Start column (inclusive)
    pub start_col: u32,
    /// End column (exclusive)
    pub end_col: u32,
    /// Tag of the highlight this span came from
    pub tag: ClassificationTag,
}

/// Line start table for one source text.
///
/// Lines end at `\n`; a preceding `\r` counts as an ordinary byte of the
/// line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of each line; always starts with 0
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    /// Index `source`.
    ///
    /// # Panics
    ///
    /// Panics if `source` is longer than `u32::MAX` bytes.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        line_starts.extend(
            source
                .match_indices('\n')
                .map(|(i, _)| TextSize::of(&source[..=i])),
        );
        Self {
            line_starts,
            len: TextSize::of(source),
        }
    }

    /// Number of lines. An empty source has one empty line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of `offset`. Offsets past the end clamp to the end.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        LineCol {
            line: line as u32,
            col: u32::from(offset - self.line_starts[line]),
        }
    }

    /// Range of `line`, excluding its `\n`.
    pub fn line_range(&self, line: u32) -> Option<TextRange> {
        let line = line as usize;
        let start = *self.line_starts.get(line)?;
        let end = match self.line_starts.get(line + 1) {
            Some(&next) => next - TextSize::new(1),
            None => self.len,
        };
        Some(TextRange::new(start, end))
    }

    /// Split highlights into per-line spans, sorted by column within each
    /// line. A highlight crossing a line break yields one span per line.
    pub fn per_line<I>(&self, highlights: I) -> BTreeMap<u32, Vec<LineSpan>>
    where
        I: IntoIterator<Item = Highlight>,
    {
        let mut lines: BTreeMap<u32, Vec<LineSpan>> = BTreeMap::new();
        for highlight in highlights {
            let start = self.line_col(highlight.range.start());
            let end = self.line_col(highlight.range.end());
            for line in start.line..=end.line {
                let start_col = if line == start.line { start.col } else { 0 };
                let end_col = if line == end.line {
                    end.col
                } else {
                    self.line_range(line)
                        .map_or(start_col, |r| u32::from(r.len()))
                };
                if start_col < end_col {
                    lines.entry(line).or_default().push(LineSpan {
                        start_col,
                        end_col,
                        tag: highlight.tag,
                    });
                }
            }
        }
        for spans in lines.values_mut() {
            spans.sort_by_key(|s| (s.start_col, s.end_col));
        }
        lines
    }
}
