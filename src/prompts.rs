//! Instruction template for the canonicalization call.
//!
//! Centralising the instruction here keeps a single source of truth and
//! lets unit tests inspect it without a live generation service. Callers
//! can override it via [`crate::config::ImportConfigBuilder::instructions`];
//! the constant is used only when no override is provided.

/// The canonical section headers, in output order. The section splitter
/// and the cleanup rules both key off this list.
pub const SECTION_HEADERS: [&str; 7] = [
    "CONTACT",
    "SKILLS",
    "WORK EXPERIENCE",
    "EDUCATION",
    "PROJECTS",
    "EXTRACURRICULAR",
    "LANGUAGES",
];

/// Default instruction for reformatting raw résumé text into the fixed
/// seven-header layout.
pub const DEFAULT_INSTRUCTIONS: &str = r#"You are a résumé reformatter. Rewrite the text you are given into exactly seven sections, in this order, each header on its own line followed by a colon:

CONTACT:
SKILLS:
WORK EXPERIENCE:
EDUCATION:
PROJECTS:
EXTRACURRICULAR:
LANGUAGES:

Follow these rules precisely:

1. Keep every header even when its section is empty — leave the section blank but present.
2. Use only information present in the input. Do NOT invent content.
3. Do NOT use markdown emphasis (no ** or __ markers).
4. Do NOT use placeholder brackets such as [Name] or [Company].
5. Start each itemized line with "- ".
6. Write dates as a three-letter month and four-digit year ("Jan 2020"). Use "Present" for ongoing positions.
7. Output ONLY the sections. Do NOT add commentary, notes, or explanations."#;
