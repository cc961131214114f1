//! cg-highlight - run the identifier classification pass over a syntax tree
//! a front-end serialized to JSON.

mod cli;
mod logging;
mod output;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{Read, Write};

use cg_highlight::{
    classify_with, ClassifyContext, Highlight, HighlightSet, PassStats, SyntaxNode,
    TracingDiagnostics,
};

use cli::{CliArgs, Format, Mode};
use output::Source;

fn main() -> Result<()> {
    logging::init();
    let args = CliArgs::parse();
    run(&args)
}

fn run(args: &CliArgs) -> Result<()> {
    let root = load_tree(args)?;

    let source_text = match &args.source {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read source {}", path.display()))?,
        ),
        None => None,
    };
    if args.format == Format::Lines && source_text.is_none() {
        bail!("--format lines needs the source text (--source)");
    }
    if let Some(text) = &source_text {
        let end = usize::from(root.range().end());
        if end > text.len() {
            bail!(
                "tree covers {} bytes but the source is only {} bytes long",
                end,
                text.len()
            );
        }
    }

    let ctx = ClassifyContext {
        trace: args.trace,
        ..ClassifyContext::default()
    };
    let (highlights, stats) = highlight(&root, args.mode(), &ctx)?;
    tracing::debug!(count = highlights.len(), mode = ?args.mode(), "highlights collected");

    let source = source_text.as_deref().map(Source::new);
    let records = output::records(&highlights, source.as_ref());
    let rendered = match (args.format, &source) {
        (Format::Lines, Some(source)) => output::render_lines(&highlights, source),
        (Format::Text | Format::Lines, _) => output::render_text(&records),
        (Format::Json, _) => {
            let mut json = output::render_json(&records).context("failed to encode output")?;
            json.push('\n');
            json
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write output")?;

    if args.stats {
        eprintln!("{}", serde_json::to_string(&stats)?);
    }
    Ok(())
}

fn load_tree(args: &CliArgs) -> Result<SyntaxNode> {
    let (name, text) = if args.tree_from_stdin() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read tree from stdin")?;
        ("<stdin>".to_string(), text)
    } else {
        let text = std::fs::read_to_string(&args.tree)
            .with_context(|| format!("failed to read tree {}", args.tree.display()))?;
        (args.tree.display().to_string(), text)
    };

    let root: SyntaxNode = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse syntax tree from {}", name))?;
    root.validate()
        .with_context(|| format!("malformed syntax tree in {}", name))?;
    Ok(root)
}

fn highlight(
    root: &SyntaxNode,
    mode: Mode,
    ctx: &ClassifyContext,
) -> Result<(Vec<Highlight>, PassStats)> {
    let diagnostics = TracingDiagnostics;
    match mode {
        Mode::Raw => {
            let mut sink: Vec<Highlight> = Vec::new();
            let stats = classify_with(root, &mut sink, &diagnostics, ctx)?;
            Ok((sink, stats))
        }
        Mode::Dedupe => {
            let mut set = HighlightSet::new();
            let stats = classify_with(root, &mut set, &diagnostics, ctx)?;
            Ok((set.iter().copied().collect(), stats))
        }
        Mode::Resolve => {
            let mut set = HighlightSet::new();
            let stats = classify_with(root, &mut set, &diagnostics, ctx)?;
            Ok((set.resolved(), stats))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_highlight::{ClassificationTag, SyntaxKind, TextRange};
    use pretty_assertions::assert_eq;

    // foo();
    fn call_tree() -> SyntaxNode {
        SyntaxNode::new(
            SyntaxKind::PostfixExpression,
            0..5,
            vec![
                SyntaxNode::leaf(SyntaxKind::Identifier, 0..3),
                SyntaxNode::leaf(SyntaxKind::CallOperator, 3..5),
            ],
        )
    }

    #[test]
    fn test_modes() {
        let root = call_tree();
        let ctx = ClassifyContext::default();
        let foo = Highlight::new(
            ClassificationTag::FunctionIdentifier,
            TextRange::new(0.into(), 3.into()),
        );

        let (raw, stats) = highlight(&root, Mode::Raw, &ctx).unwrap();
        assert_eq!(raw, vec![foo, foo]);
        assert_eq!(stats.highlights_emitted, 2);

        let (deduped, _) = highlight(&root, Mode::Dedupe, &ctx).unwrap();
        assert_eq!(deduped, vec![foo]);

        let (resolved, _) = highlight(&root, Mode::Resolve, &ctx).unwrap();
        assert_eq!(resolved, vec![foo]);
    }

    #[test]
    fn test_interrupted_context_is_an_error() {
        let ctx = ClassifyContext::default();
        ctx.interrupt();
        let err = highlight(&call_tree(), Mode::Raw, &ctx).unwrap_err();
        assert!(err.to_string().contains("interrupted"));
    }
}
