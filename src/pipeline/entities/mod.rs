//! Entity extraction: one pure scanner per section kind.
//!
//! Every scanner is a total function from a section body to draft
//! records — extraction never fails. Malformed or unparseable lines are
//! silently dropped or folded into the preceding entry's detail text;
//! over-merging into free text is preferred to losing data.
//!
//! The scanners are deliberately small explicit state machines over a
//! list-of-lines iterator ("no open entry" / "entry open"), each
//! returning a local accumulator at loop end — no shared mutable state.

pub mod contact;
pub mod dated;
pub mod languages;
pub mod paragraphs;
pub mod skills;

use crate::records::ExtractedDrafts;
use indexmap::IndexMap;
use tracing::debug;

/// Run the matching extractor over every split section.
///
/// Section keys are the canonical keys produced by
/// [`crate::pipeline::sections::split_sections`]; unknown keys are
/// logged and skipped.
pub fn extract_all(sections: &IndexMap<String, String>) -> ExtractedDrafts {
    let mut drafts = ExtractedDrafts::default();

    for (key, body) in sections {
        match key.as_str() {
            "contact" => {
                drafts.contact = contact::extract_contact(body);
            }
            "skills" => drafts.skills.extend(skills::extract_skills(body)),
            "work experience" => {
                drafts.experiences.extend(dated::extract_experience(body));
            }
            "education" => drafts.education.extend(dated::extract_education(body)),
            "projects" => drafts.projects.extend(paragraphs::extract_projects(body)),
            "extracurricular" => {
                drafts
                    .extracurriculars
                    .extend(paragraphs::extract_extracurriculars(body));
            }
            "languages" => drafts.languages.extend(languages::extract_languages(body)),
            other => debug!("no extractor for section {:?}; skipped", other),
        }
    }

    drafts
}
