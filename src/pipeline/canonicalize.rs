//! Canonicalization: one generation call, then deterministic cleanup.
//!
//! ## Why post-process the reply?
//!
//! Even a well-instructed model occasionally disobeys formatting rules —
//! bold markers around headers, `[Name]`-style placeholders, a trailing
//! "Note: …" explanation, or a header typed in the wrong case without
//! its colon. The cleanup rules here are cheap, deterministic string
//! passes that repair those quirks without touching content, keeping the
//! instruction focused on *what to write* rather than edge-case syntax.
//! Each rule is a pure function and independently testable.
//!
//! ## Failure policy
//!
//! A generation error (failure, timeout, cancellation) is propagated
//! verbatim — this stage never retries; retry policy belongs to the
//! caller. A reply that cleans down to pure whitespace is returned as-is
//! and classified by the orchestrator as
//! [`crate::error::ImportError::EmptyCanonicalization`].

use crate::config::ImportConfig;
use crate::error::GenerationError;
use crate::prompts::{DEFAULT_INSTRUCTIONS, SECTION_HEADERS};
use crate::services::{GenerationRequest, TextGenerator};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Reformat raw résumé text into the canonical seven-header layout.
pub async fn canonicalize(
    generator: &Arc<dyn TextGenerator>,
    raw_text: &str,
    config: &ImportConfig,
) -> Result<String, GenerationError> {
    let instructions = config
        .instructions
        .as_deref()
        .unwrap_or(DEFAULT_INSTRUCTIONS);

    let reply = generator
        .generate(GenerationRequest {
            instructions,
            input: raw_text,
        })
        .await?;

    debug!("generation replied with {} chars", reply.len());
    Ok(clean_reply(&reply))
}

/// Apply all cleanup rules to the raw generation reply.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF → LF)
/// 2. Strip bold markers — before header canonicalization so
///    `**SKILLS**` still normalises
/// 3. Strip bracketed placeholder spans (`[Name]`, `[Company]`)
/// 4. Drop explanatory lines ("Note: …", "Important: …")
/// 5. Canonicalize case-variant or colon-missing header lines to the
///    exact literal header + colon
/// 6. Collapse 3+ consecutive newlines down to 2
/// 7. Trim outer whitespace
pub fn clean_reply(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = strip_bold_markers(&s);
    let s = strip_placeholder_brackets(&s);
    let s = strip_explanatory_lines(&s);
    let s = canonicalize_headers(&s);
    let s = collapse_blank_lines(&s);
    s.trim().to_string()
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Strip bold markers ───────────────────────────────────────────

fn strip_bold_markers(input: &str) -> String {
    input.replace("**", "").replace("__", "")
}

// ── Rule 3: Strip bracketed placeholder spans ────────────────────────────

static RE_BRACKET_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]\n]*\]").unwrap());

fn strip_placeholder_brackets(input: &str) -> String {
    RE_BRACKET_SPAN.replace_all(input, "").to_string()
}

// ── Rule 4: Drop explanatory lines ───────────────────────────────────────

const EXPLANATORY_PREFIXES: [&str; 2] = ["Note:", "Important:"];

fn strip_explanatory_lines(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let t = line.trim_start();
            !EXPLANATORY_PREFIXES.iter().any(|p| t.starts_with(p))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 5: Canonicalize header lines ────────────────────────────────────

fn canonicalize_headers(input: &str) -> String {
    input
        .lines()
        .map(|line| {
            let bare = line.trim().trim_end_matches(':').trim_end();
            let collapsed = bare.split_whitespace().collect::<Vec<_>>().join(" ");
            for header in SECTION_HEADERS {
                if collapsed.eq_ignore_ascii_case(header) {
                    return format!("{header}:");
                }
            }
            line.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 6: Collapse excessive blank lines ───────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────
