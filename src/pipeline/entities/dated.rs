//! Date-anchored entry scanner shared by experience and education.
//!
//! A single-pass state machine over the section's lines. A line matching
//! the date-range pattern terminates the currently open entry and starts
//! a new one; every other line is appended to the open entry's detail
//! buffer. The headline (title/company or degree/institution) comes from
//! the text before the date match on the same line, or — when the date
//! stands alone on its line — from the nearest preceding line.
//!
//! An entry missing either headline field is discarded at flush time.

use crate::patterns::RE_DATE_RANGE;
use crate::records::{EducationDraft, JobExperienceDraft};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Headline field separators: comma, pipe, spaced hyphen, en/em dash.
/// A bare hyphen splits only when space-surrounded so hyphenated names
/// ("Hewlett-Packard") survive.
static RE_FIELD_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(?:[,|–—]|\s-\s)\s*").unwrap());

/// A kind-agnostic dated entry; the public wrappers map the two headline
/// fields onto their domain meaning.
#[derive(Debug)]
struct DatedEntry {
    first_field: String,
    second_field: String,
    start: String,
    end: String,
    details: Vec<String>,
}

/// Extract work-experience entries: headline is `title, company`.
pub fn extract_experience(text: &str) -> Vec<JobExperienceDraft> {
    scan(text)
        .into_iter()
        .map(|e| JobExperienceDraft {
            title: e.first_field,
            company: e.second_field,
            start_date: Some(e.start),
            end_date: Some(e.end),
            details: e.details.join("\n"),
        })
        .collect()
}

/// Extract education entries: headline is `degree, institution`.
pub fn extract_education(text: &str) -> Vec<EducationDraft> {
    scan(text)
        .into_iter()
        .map(|e| EducationDraft {
            degree: e.first_field,
            institution: e.second_field,
            start_date: Some(e.start),
            end_date: Some(e.end),
            details: e.details.join("\n"),
        })
        .collect()
}

fn scan(text: &str) -> Vec<DatedEntry> {
    let mut entries: Vec<DatedEntry> = Vec::new();
    let mut open: Option<DatedEntry> = None;
    // Lines seen before the first date match; the last of them may be
    // claimed as a headline when the date stands alone on its line.
    let mut preamble: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(caps) = RE_DATE_RANGE.captures(line) else {
            match open.as_mut() {
                Some(entry) => entry.details.push(line.to_string()),
                None => preamble.push(line.to_string()),
            }
            continue;
        };

        let range = caps.get(0).expect("match 0 always present");
        let before = line[..range.start()].trim();
        let headline = if !before.is_empty() {
            before.to_string()
        } else {
            // Date on its own line: the previous line is the headline.
            match open.as_mut() {
                Some(entry) => entry.details.pop().unwrap_or_default(),
                None => preamble.pop().unwrap_or_default(),
            }
        };

        flush(&mut entries, open.take());

        let (first_field, second_field) = split_headline(&headline);
        open = Some(DatedEntry {
            first_field,
            second_field,
            start: caps[1].to_string(),
            end: caps[2].to_string(),
            details: Vec::new(),
        });
    }

    flush(&mut entries, open.take());
    entries
}

/// Keep the entry only when both headline fields are present.
fn flush(entries: &mut Vec<DatedEntry>, entry: Option<DatedEntry>) {
    let Some(entry) = entry else { return };
    if entry.first_field.is_empty() || entry.second_field.is_empty() {
        debug!(
            "dropping dated entry with incomplete headline: {:?} / {:?}",
            entry.first_field, entry.second_field
        );
        return;
    }
    entries.push(entry);
}

/// Split a headline on the separator class into two fields; fragments
/// beyond the second are folded into the second ("Acme, Platform Team"
/// stays one company).
fn split_headline(headline: &str) -> (String, String) {
    let parts: Vec<&str> = RE_FIELD_SEPARATOR
        .split(headline)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [] => (String::new(), String::new()),
        [first] => ((*first).to_string(), String::new()),
        [first, rest @ ..] => ((*first).to_string(), rest.join(", ")),
    }
}
