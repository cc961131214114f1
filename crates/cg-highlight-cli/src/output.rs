//! Rendering highlights as text, per-line text, or JSON

use cg_highlight::{ClassificationTag, Highlight, LineCol, LineIndex};
use serde::Serialize;

/// Source text together with its line table.
#[derive(Debug)]
pub struct Source<'s> {
    pub text: &'s str,
    pub index: LineIndex,
}

impl<'s> Source<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            index: LineIndex::new(text),
        }
    }
}

/// One output row. Positions and text are only known with a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record<'s> {
    pub tag: ClassificationTag,
    /// Highlight query capture name for `tag`
    pub capture: &'static str,
    pub start: u32,
    pub end: u32,
    /// Start line (0-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Start column in bytes (0-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'s str>,
    #[serde(skip)]
    pub end_pos: Option<LineCol>,
}

pub fn records<'s>(highlights: &[Highlight], source: Option<&Source<'s>>) -> Vec<Record<'s>> {
    highlights
        .iter()
        .map(|highlight| {
            let range = highlight.range;
            let start_pos = source.map(|s| s.index.line_col(range.start()));
            Record {
                tag: highlight.tag,
                capture: highlight.tag.capture_name(),
                start: range.start().into(),
                end: range.end().into(),
                line: start_pos.map(|p| p.line),
                column: start_pos.map(|p| p.col),
                text: source.and_then(|s| highlight.text(s.text)),
                end_pos: source.map(|s| s.index.line_col(range.end())),
            }
        })
        .collect()
}

/// One line per record. Positions are printed 1-indexed, the way editors
/// and compilers report them.
pub fn render_text(records: &[Record<'_>]) -> String {
    let mut out = String::new();
    for record in records {
        let line = match (record.line, record.column, record.end_pos) {
            (Some(line), Some(column), Some(end)) => format!(
                "{}:{}-{}:{} {} '{}'",
                line + 1,
                column + 1,
                end.line + 1,
                end.col + 1,
                record.tag,
                record.text.unwrap_or_default()
            ),
            _ => format!("{}..{} {}", record.start, record.end, record.tag),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// One row per highlighted source line: the 1-indexed line number, then
/// each span as `start-end:capture` with 1-indexed, end-exclusive columns.
/// Lines without highlights are left out.
pub fn render_lines(highlights: &[Highlight], source: &Source<'_>) -> String {
    let mut out = String::new();
    for (line, spans) in source.index.per_line(highlights.iter().copied()) {
        out.push_str(&(line + 1).to_string());
        out.push(':');
        for span in spans {
            let capture = span.tag.capture_name();
            out.push_str(&format!(" {}-{}:{}", span.start_col + 1, span.end_col + 1, capture));
        }
        out.push('\n');
    }
    out
}

pub fn render_json(records: &[Record<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
