//! Prompt construction. Prompts are deterministic for a given passage set so
//! they can be diffed across runs.

use chronoguard_core::constants::STOP_MARKER;
use chronoguard_core::models::ChatMessage;
use chronoguard_core::{QueryContext, ScoredCandidate, TimeAxis, TimeMode};

use crate::text::snippet;

pub const SYSTEM_PROMPT: &str = "You are a time-aware answerer. Use ONLY the supplied evidence. \
Respect the requested time window and axis. Prefer filings and regulators over press and blogs. \
If claims conflict across disjoint windows, describe the timeline instead of picking one.";

/// Output contract appended to every system prompt.
pub const SCHEMA_INSTRUCTIONS: &str = "Reply with a single JSON object and nothing else: \
{\"range\": {\"low\": number, \"high\": number, \"most_likely\": number, \"unit\": string}, \
\"evidence\": [{\"text\": string, \"year\": integer, \"passage_id\": string}], \"summary\": string}. \
Every evidence bullet must cite a year and the passage id it comes from.";

/// Extra guidance per domain.
pub fn domain_note(domain: &str) -> Option<&'static str> {
    match domain {
        "world-economy" => Some(
            "Keep answers time-scoped. Always cite benchmark years and units \
             (e.g. '1990 international dollars'). Note region coverage and comparability caveats.",
        ),
        "roles" => Some("Name the holder of the role for the requested window only."),
        "finance" => Some("Quote figures as reported in the filing period they come from."),
        _ => None,
    }
}

fn system_message(domain: &str) -> ChatMessage {
    let mut prompt = format!("{SYSTEM_PROMPT} {SCHEMA_INSTRUCTIONS}");
    if let Some(note) = domain_note(domain) {
        prompt.push(' ');
        prompt.push_str(note);
    }
    prompt.push_str(&format!(" End your reply with {STOP_MARKER}."));
    ChatMessage::system(prompt)
}

fn mode_label(mode: TimeMode) -> &'static str {
    match mode {
        TimeMode::Hard => "HARD",
        TimeMode::Intelligent => "INTELLIGENT",
    }
}

fn axis_label(axis: TimeAxis) -> &'static str {
    match axis {
        TimeAxis::Valid => "valid",
        TimeAxis::Transaction => "transaction",
    }
}

fn evidence_lines(ctx: &QueryContext, evidence: &[ScoredCandidate], snippet_chars: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(evidence.len() * 2);
    for c in evidence {
        let p = &c.passage;
        let window = p
            .window(ctx.axis)
            .window()
            .map(|w| w.label())
            .unwrap_or_else(|| "undated".to_string());
        lines.push(format!(
            "- [{}] [{:.2}] {}: {} ({})",
            p.id,
            c.fused_score,
            window,
            snippet(&p.text, snippet_chars),
            p.source_uri
        ));
        lines.push(format!(
            "  Units: {} | Entities: {} | Region: {}",
            p.unit.as_deref().unwrap_or("n/a"),
            if p.entities.is_empty() {
                "n/a".to_string()
            } else {
                p.entities.join(", ")
            },
            p.region.as_deref().unwrap_or("n/a"),
        ));
    }
    lines
}

/// The first-attempt prompt over the full accepted passage set.
pub fn build_messages(
    ctx: &QueryContext,
    window_kind: &str,
    evidence: &[ScoredCandidate],
    snippet_chars: usize,
) -> Vec<ChatMessage> {
    let mut lines = vec![format!(
        "[MODE] {} | [AXIS] {} | [WINDOW] {} | [DOMAIN] {} | [WINDOW_KIND] {}",
        mode_label(ctx.mode),
        axis_label(ctx.axis),
        ctx.window().label(),
        ctx.domain,
        window_kind
    )];
    lines.push(format!("Question: {}", ctx.query_text));
    lines.push("Evidence (ranked):".to_string());
    lines.extend(evidence_lines(ctx, evidence, snippet_chars));
    vec![system_message(&ctx.domain), ChatMessage::user(lines.join("\n"))]
}

/// The retry prompt: only the top `passage_count` passages, plus the reason
/// the previous reply was rejected.
pub fn build_narrowed_messages(
    ctx: &QueryContext,
    evidence: &[ScoredCandidate],
    passage_count: usize,
    snippet_chars: usize,
    rejection: &str,
    required_unit: Option<&str>,
) -> Vec<ChatMessage> {
    let top = &evidence[..evidence.len().min(passage_count)];
    let mut lines = vec![
        format!("Your previous reply was rejected: {rejection}."),
        "Answer again using only these passages and the exact JSON shape.".to_string(),
    ];
    if let Some(unit) = required_unit {
        lines.push(format!("The unit must be \"{unit}\"."));
    }
    lines.push(format!(
        "Question: {} [WINDOW] {}",
        ctx.query_text,
        ctx.window().label()
    ));
    lines.extend(evidence_lines(ctx, top, snippet_chars));
    vec![system_message(&ctx.domain), ChatMessage::user(lines.join("\n"))]
}

pub const JUDGE_PROMPT: &str = "Score how well each passage answers the query, from 0.0 to 1.0. \
Weigh temporal fit and source authority; penalize passages that contradict better sources. \
Reply with a JSON array only: [{\"id\": integer, \"score\": number}].";

/// Characters of each passage shown to the judge.
pub const JUDGE_SNIPPET_CHARS: usize = 220;

/// Judge prompt. Passages are numbered from 1 in the order given.
pub fn build_judge_messages(query_text: &str, passages: &[&str]) -> Vec<ChatMessage> {
    let mut lines = vec![format!("Query: {query_text}"), "Passages:".to_string()];
    for (i, text) in passages.iter().enumerate() {
        lines.push(format!(
            "id={} :: {}",
            i + 1,
            snippet(text, JUDGE_SNIPPET_CHARS)
        ));
    }
    vec![
        ChatMessage::system(JUDGE_PROMPT),
        ChatMessage::user(lines.join("\n")),
    ]
}
