//! Paragraph-buffered extraction for projects and extracurriculars.
//!
//! Both sections read as prose blocks: consecutive non-blank lines form
//! one entry, a blank line flushes it, and a non-empty trailing buffer
//! flushes at end of input. The two kinds differ only in how the
//! buffered lines map onto fields.

use crate::records::{ExtracurricularDraft, ProjectDraft};

/// Extract project entries: first line is the name, the rest is detail.
pub fn extract_projects(text: &str) -> Vec<ProjectDraft> {
    paragraphs(text)
        .into_iter()
        .map(|para| ProjectDraft {
            name: para[0].clone(),
            details: para[1..].join("\n"),
            technologies: String::new(),
            link: None,
        })
        .collect()
}

/// Extract extracurricular entries: title, then organization, then
/// detail lines.
pub fn extract_extracurriculars(text: &str) -> Vec<ExtracurricularDraft> {
    paragraphs(text)
        .into_iter()
        .map(|para| ExtracurricularDraft {
            title: para[0].clone(),
            organization: para.get(1).cloned().unwrap_or_default(),
            details: if para.len() > 2 { para[2..].join("\n") } else { String::new() },
        })
        .collect()
}

/// Group lines into blank-line-separated paragraphs. Every returned
/// paragraph is non-empty.
fn paragraphs(text: &str) -> Vec<Vec<String>> {
    let mut paras: Vec<Vec<String>> = Vec::new();
    let mut buffer: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !buffer.is_empty() {
                paras.push(std::mem::take(&mut buffer));
            }
        } else {
            buffer.push(line.to_string());
        }
    }
    if !buffer.is_empty() {
        paras.push(buffer);
    }
    paras
}
