//! Section splitting: partition canonical text into named sections.
//!
//! The splitter also runs on less-clean text (the canonicalizer is not
//! the only producer — callers can feed it pasted plain text), so the
//! header pattern accepts pre-canonicalization synonyms ("EMPLOYMENT",
//! "Academic Background") alongside the seven canonical spellings, in
//! any case, with or without the trailing colon.
//!
//! ## Recovery path
//!
//! Text with no recognisable header at all is treated as one big
//! `contact` section rather than rejected — minimally structured input
//! still yields name/email extraction downstream.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Recognised header spellings. Longest-first so prefixed variants win
/// the alternation; inner spaces match any run of whitespace.
const HEADER_SPELLINGS: [&str; 22] = [
    "contact information",
    "contact info",
    "contact",
    "personal details",
    "technical skills",
    "skills",
    "professional experience",
    "employment history",
    "work experience",
    "work history",
    "employment",
    "experience",
    "academic background",
    "academics",
    "education",
    "personal projects",
    "projects",
    "extracurricular activities",
    "extracurricular",
    "activities",
    "volunteering",
    "languages",
];

/// Synonym → canonical key table, consulted by substring match in order.
/// More specific synonyms come first ("work experience" before
/// "experience", "extracurricular" before "activities").
const SECTION_SYNONYMS: [(&str, &str); 16] = [
    ("contact", "contact"),
    ("personal details", "contact"),
    ("technical skills", "skills"),
    ("skills", "skills"),
    ("work experience", "work experience"),
    ("employment", "work experience"),
    ("experience", "work experience"),
    ("academic background", "education"),
    ("academic", "education"),
    ("education", "education"),
    ("project", "projects"),
    ("extracurricular", "extracurricular"),
    ("activities", "extracurricular"),
    ("volunteer", "extracurricular"),
    ("language", "languages"),
    ("work history", "work experience"),
];

static RE_SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    let alternation = HEADER_SPELLINGS
        .iter()
        .map(|s| s.replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?im)^[ \t]*({alternation})[ \t]*:?[ \t]*$")).unwrap()
});

/// Map a matched header's text onto a canonical section key.
///
/// Falls through to the lowercased, trimmed header text when no synonym
/// matches, so a spelling added to the pattern but missed here still
/// produces a usable key.
fn normalize_header(header: &str) -> String {
    let lowered = header.trim().to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    for (synonym, key) in SECTION_SYNONYMS {
        if collapsed.contains(synonym) {
            return key.to_string();
        }
    }
    collapsed
}

/// Split canonical (or raw) text into `section key → body` in document
/// order. Sections whose trimmed body is empty are omitted.
pub fn split_sections(text: &str) -> IndexMap<String, String> {
    let mut sections: IndexMap<String, String> = IndexMap::new();

    let matches: Vec<_> = RE_SECTION_HEADER.captures_iter(text).collect();

    if matches.is_empty() {
        // No headers anywhere: the whole text is a contact section.
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            debug!("no section headers matched; treating entire text as contact");
            sections.insert("contact".to_string(), trimmed.to_string());
        }
        return sections;
    }

    let mut insert = |key: String, body: &str| {
        let body = body.trim();
        if body.is_empty() {
            return;
        }
        match sections.get_mut(&key) {
            // A repeated header concatenates rather than losing text.
            Some(existing) => {
                existing.push('\n');
                existing.push_str(body);
            }
            None => {
                sections.insert(key, body.to_string());
            }
        }
    };

    // Anything before the first header belongs to contact.
    let first_start = matches[0].get(0).map(|m| m.start()).unwrap_or(0);
    insert("contact".to_string(), &text[..first_start]);

    for (i, caps) in matches.iter().enumerate() {
        let whole = caps.get(0).expect("match 0 always present");
        let header = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let body_start = whole.end();
        let body_end = matches
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        insert(normalize_header(header), &text[body_start..body_end]);
    }

    debug!("split into {} sections: {:?}", sections.len(), sections.keys().collect::<Vec<_>>());
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_headers_yields_single_contact_section() {
        let text = "Jane Doe\njane@x.com\n+1 555 0100";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get("contact").map(String::as_str), Some(text));
    }

    #[test]
    fn empty_text_yields_no_sections() {
        assert!(split_sections("   \n  ").is_empty());
    }

    #[test]
    fn case_and_colon_variants_map_to_same_key() {
        for header in ["Work Experience", "WORK EXPERIENCE:", "work   experience"] {
            let text = format!("{header}\nEngineer at Acme");
            let sections = split_sections(&text);
            assert!(
                sections.contains_key("work experience"),
                "header {header:?} did not normalise, got keys {:?}",
                sections.keys().collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn synonyms_normalise() {
        let text = "EMPLOYMENT:\nEngineer\n\nAcademic Background:\nBSc";
        let sections = split_sections(text);
        assert_eq!(
            sections.keys().collect::<Vec<_>>(),
            vec!["work experience", "education"]
        );
    }

    #[test]
    fn preamble_before_first_header_is_contact() {
        let text = "Jane Doe\njane@x.com\n\nSKILLS:\nRust";
        let sections = split_sections(text);
        assert_eq!(
            sections.get("contact").map(String::as_str),
            Some("Jane Doe\njane@x.com")
        );
        assert_eq!(sections.get("skills").map(String::as_str), Some("Rust"));
    }

    #[test]
    fn empty_bodies_are_omitted() {
        let text = "SKILLS:\n\nEDUCATION:\nBSc, MIT";
        let sections = split_sections(text);
        assert!(!sections.contains_key("skills"));
        assert!(sections.contains_key("education"));
    }

    #[test]
    fn repeated_headers_concatenate() {
        let text = "SKILLS:\nRust\n\nSKILLS:\nGo";
        let sections = split_sections(text);
        assert_eq!(sections.get("skills").map(String::as_str), Some("Rust\nGo"));
    }

    #[test]
    fn sections_keep_document_order() {
        let text = "EDUCATION:\nBSc\n\nSKILLS:\nRust\n\nLANGUAGES:\nEnglish";
        let keys: Vec<_> = split_sections(text).keys().cloned().collect();
        assert_eq!(keys, vec!["education", "skills", "languages"]);
    }

    #[test]
    fn header_mid_line_does_not_split() {
        let text = "My education at MIT was great";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 1);
        assert!(sections.contains_key("contact"));
    }
}
