//! Deterministic evidence digest, used whenever no validated answer exists.

use chronoguard_core::{QueryContext, ScoredCandidate};

use crate::text::snippet;

/// One header line, then one line per passage in ranking order:
/// `- <id> (<window>): <snippet> [<source>]`.
pub fn evidence_digest(ctx: &QueryContext, passages: &[ScoredCandidate], snippet_chars: usize) -> String {
    if passages.is_empty() {
        return format!(
            "No in-window evidence found for: {} [{}]",
            ctx.query_text,
            ctx.window().label()
        );
    }
    let mut lines = vec![format!(
        "Evidence for: {} [{}]",
        ctx.query_text,
        ctx.window().label()
    )];
    for c in passages {
        let window = c
            .passage
            .window(ctx.axis)
            .window()
            .map(|w| w.label())
            .unwrap_or_else(|| "undated".to_string());
        lines.push(format!(
            "- {} ({}): {} [{}]",
            c.passage.id,
            window,
            snippet(&c.passage.text, snippet_chars),
            c.passage.source_uri
        ));
    }
    lines.join("\n")
}
