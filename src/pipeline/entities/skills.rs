//! Skills tokenizer.
//!
//! Two line shapes appear in practice:
//!
//! * `Category: a, b, c` — the prefix becomes the category for every
//!   token after the colon;
//! * bullet or comma lists (`• Rust • Go`, `- Rust, Go`) — split on the
//!   bullet class, then again on commas, no category.
//!
//! All fragments are trimmed; empty fragments are dropped.

use crate::records::SkillDraft;
use once_cell::sync::Lazy;
use regex::Regex;

/// Bullet/asterisk/hyphen separators inside an uncategorised line.
static RE_BULLET_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•▪*\-]+").unwrap());

/// Extract skill tokens from the skills section body.
pub fn extract_skills(text: &str) -> Vec<SkillDraft> {
    let mut skills = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((prefix, suffix)) = line.split_once(':') {
            let category = prefix.trim_matches(|c: char| c.is_whitespace() || "•▪*-".contains(c));
            for token in suffix.split(',') {
                push_skill(&mut skills, token, category);
            }
        } else {
            for fragment in RE_BULLET_SPLIT.split(line) {
                for token in fragment.split(',') {
                    push_skill(&mut skills, token, "");
                }
            }
        }
    }

    skills
}

fn push_skill(skills: &mut Vec<SkillDraft>, token: &str, category: &str) {
    let name = token.trim();
    if name.is_empty() {
        return;
    }
    skills.push(SkillDraft {
        name: name.to_string(),
        category: category.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(skills: &[SkillDraft]) -> Vec<&str> {
        skills.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn plain_comma_list() {
        let skills = extract_skills("Python, Go");
        assert_eq!(names(&skills), vec!["Python", "Go"]);
        assert!(skills.iter().all(|s| s.category.is_empty()));
    }

    #[test]
    fn categorised_line() {
        let skills = extract_skills("Languages: Rust, Go, SQL");
        assert_eq!(names(&skills), vec!["Rust", "Go", "SQL"]);
        assert!(skills.iter().all(|s| s.category == "Languages"));
    }

    #[test]
    fn bulleted_category_prefix_is_cleaned() {
        let skills = extract_skills("- Tools: Docker, Kubernetes");
        assert_eq!(skills[0].category, "Tools");
    }

    #[test]
    fn bullet_separated_line() {
        let skills = extract_skills("• Rust • Go • SQL");
        assert_eq!(names(&skills), vec!["Rust", "Go", "SQL"]);
    }

    #[test]
    fn mixed_bullets_and_commas() {
        let skills = extract_skills("- Rust, Go\n- SQL");
        assert_eq!(names(&skills), vec!["Rust", "Go", "SQL"]);
    }

    #[test]
    fn empty_fragments_dropped() {
        let skills = extract_skills("Rust,, , Go");
        assert_eq!(names(&skills), vec!["Rust", "Go"]);
    }

    #[test]
    fn blank_section_yields_nothing() {
        assert!(extract_skills("\n  \n").is_empty());
    }
}
