//! Domain records: transient extraction drafts and persistent entities.
//!
//! Draft types are immutable value records produced by the entity
//! extractors and consumed once by the merge stage. Persistent types are
//! the shape this crate hands to the host's entity store: every child
//! record carries a stable [`uuid::Uuid`] identity, a `visible` flag, and
//! an `order_index` defining presentation order.
//!
//! ## Order-index invariant
//!
//! Within one résumé's collection of a given kind, `order_index` values
//! form a contiguous zero-based sequence after any mutation. Every
//! structural operation on [`ResumeAggregate`] (append, remove, move,
//! merge) re-establishes the invariant through the same renumbering
//! routine, so user-edit paths and the import pipeline cannot drift apart.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Draft records (pipeline-internal) ────────────────────────────────────

/// Contact details scraped from the contact section. All fields optional;
/// a résumé with no recognisable contact block is still importable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_link: Option<String>,
}

impl ContactInfo {
    /// True when no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.profile_link.is_none()
    }
}

/// One position parsed from the work-experience section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobExperienceDraft {
    pub title: String,
    pub company: String,
    /// Date strings are kept as natural text ("Jan 2020"), never parsed
    /// into calendar types at this stage.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Description lines joined with newlines.
    pub details: String,
}

/// One entry parsed from the education section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationDraft {
    pub degree: String,
    pub institution: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub details: String,
}

/// One skill token, optionally under a category prefix
/// ("Languages: Rust, Go" yields two drafts with category "Languages").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDraft {
    pub name: String,
    /// Empty when the section line carried no category prefix.
    pub category: String,
}

/// One project paragraph: first line is the name, the rest is detail text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub details: String,
    /// Always empty from extraction; populated by the user later.
    pub technologies: String,
    pub link: Option<String>,
}

/// One extracurricular paragraph: title, organization, remaining detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtracurricularDraft {
    pub title: String,
    pub organization: String,
    pub details: String,
}

/// One language token, with proficiency when a parenthetical was present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDraft {
    pub name: String,
    /// Empty string when the token had no `(proficiency)` suffix.
    pub proficiency: String,
}

/// Everything the entity extractors produced for one import run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDrafts {
    pub contact: ContactInfo,
    pub experiences: Vec<JobExperienceDraft>,
    pub education: Vec<EducationDraft>,
    pub skills: Vec<SkillDraft>,
    pub projects: Vec<ProjectDraft>,
    pub extracurriculars: Vec<ExtracurricularDraft>,
    pub languages: Vec<LanguageDraft>,
}

impl ExtractedDrafts {
    /// Total number of collection drafts (contact excluded — it is not a
    /// collection record).
    pub fn record_count(&self) -> usize {
        self.experiences.len()
            + self.education.len()
            + self.skills.len()
            + self.projects.len()
            + self.extracurriculars.len()
            + self.languages.len()
    }
}

// ── Persistent records (handed to the entity store) ──────────────────────

/// A persisted work-experience entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// User-editable; never set by extraction, filled on merge only when
    /// empty.
    pub location: Option<String>,
    pub details: String,
    pub visible: bool,
    pub order_index: usize,
}

/// A persisted education entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub id: Uuid,
    pub degree: String,
    pub institution: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub grade: Option<String>,
    pub field_of_study: Option<String>,
    pub details: String,
    pub visible: bool,
    pub order_index: usize,
}

/// A persisted skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub visible: bool,
    pub order_index: usize,
}

/// A persisted project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub details: String,
    /// Comma-separated technology tokens; merged as a sorted union.
    pub technologies: String,
    pub link: Option<String>,
    pub visible: bool,
    pub order_index: usize,
}

/// A persisted extracurricular activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtracurricularRecord {
    pub id: Uuid,
    pub title: String,
    pub organization: String,
    pub details: String,
    pub visible: bool,
    pub order_index: usize,
}

/// A persisted language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub id: Uuid,
    pub name: String,
    pub proficiency: String,
    pub visible: bool,
    pub order_index: usize,
}

/// The in-memory résumé aggregate: resume-level contact fields plus the
/// six child collections.
///
/// The aggregate and its collections are **not** safe for concurrent
/// structural mutation — the host must serialise all mutation of one
/// aggregate through a single execution context (one actor/owner task).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeAggregate {
    pub contact: ContactInfo,
    pub experiences: Vec<ExperienceRecord>,
    pub education: Vec<EducationRecord>,
    pub skills: Vec<SkillRecord>,
    pub projects: Vec<ProjectRecord>,
    pub extracurriculars: Vec<ExtracurricularRecord>,
    pub languages: Vec<LanguageRecord>,
}

/// Renumber a collection densely from zero in its current order.
fn renumber<T, F: FnMut(&mut T) -> &mut usize>(records: &mut [T], mut index_of: F) {
    for (i, record) in records.iter_mut().enumerate() {
        *index_of(record) = i;
    }
}

macro_rules! collection_ops {
    ($push:ident, $remove:ident, $move_to:ident, $field:ident, $record:ty) => {
        /// Append a record at the end of the collection and renumber.
        pub fn $push(&mut self, mut record: $record) {
            record.order_index = self.$field.len();
            self.$field.push(record);
        }

        /// Remove the record with the given id, if present, and renumber.
        pub fn $remove(&mut self, id: Uuid) -> Option<$record> {
            let pos = self.$field.iter().position(|r| r.id == id)?;
            let removed = self.$field.remove(pos);
            renumber(&mut self.$field, |r| &mut r.order_index);
            Some(removed)
        }

        /// Move the record with the given id to `to` (clamped) and renumber.
        pub fn $move_to(&mut self, id: Uuid, to: usize) {
            if let Some(pos) = self.$field.iter().position(|r| r.id == id) {
                let record = self.$field.remove(pos);
                let to = to.min(self.$field.len());
                self.$field.insert(to, record);
                renumber(&mut self.$field, |r| &mut r.order_index);
            }
        }
    };
}

impl ResumeAggregate {
    collection_ops!(push_experience, remove_experience, move_experience, experiences, ExperienceRecord);
    collection_ops!(push_education, remove_education, move_education, education, EducationRecord);
    collection_ops!(push_skill, remove_skill, move_skill, skills, SkillRecord);
    collection_ops!(push_project, remove_project, move_project, projects, ProjectRecord);
    collection_ops!(push_extracurricular, remove_extracurricular, move_extracurricular, extracurriculars, ExtracurricularRecord);
    collection_ops!(push_language, remove_language, move_language, languages, LanguageRecord);

    /// Re-establish the dense zero-based order-index invariant on every
    /// collection. The merge engine calls this after deduplication.
    pub fn renumber_all(&mut self) {
        renumber(&mut self.experiences, |r| &mut r.order_index);
        renumber(&mut self.education, |r| &mut r.order_index);
        renumber(&mut self.skills, |r| &mut r.order_index);
        renumber(&mut self.projects, |r| &mut r.order_index);
        renumber(&mut self.extracurriculars, |r| &mut r.order_index);
        renumber(&mut self.languages, |r| &mut r.order_index);
    }

    /// Apply extracted contact fields fill-if-empty: an import never
    /// overwrites user-entered contact data.
    pub fn fill_contact(&mut self, extracted: &ContactInfo) {
        fill_if_empty(&mut self.contact.name, &extracted.name);
        fill_if_empty(&mut self.contact.email, &extracted.email);
        fill_if_empty(&mut self.contact.phone, &extracted.phone);
        fill_if_empty(&mut self.contact.location, &extracted.location);
        fill_if_empty(&mut self.contact.profile_link, &extracted.profile_link);
    }
}

fn fill_if_empty(slot: &mut Option<String>, value: &Option<String>) {
    let empty = slot.as_deref().map(str::trim).is_none_or(str::is_empty);
    if empty {
        if let Some(v) = value {
            *slot = Some(v.clone());
        }
    }
}

// ── Draft → record conversion ────────────────────────────────────────────

impl From<JobExperienceDraft> for ExperienceRecord {
    fn from(d: JobExperienceDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: d.title,
            company: d.company,
            start_date: d.start_date,
            end_date: d.end_date,
            location: None,
            details: d.details,
            visible: true,
            order_index: 0,
        }
    }
}

impl From<EducationDraft> for EducationRecord {
    fn from(d: EducationDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            degree: d.degree,
            institution: d.institution,
            start_date: d.start_date,
            end_date: d.end_date,
            grade: None,
            field_of_study: None,
            details: d.details,
            visible: true,
            order_index: 0,
        }
    }
}

impl From<SkillDraft> for SkillRecord {
    fn from(d: SkillDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: d.name,
            category: d.category,
            visible: true,
            order_index: 0,
        }
    }
}

impl From<ProjectDraft> for ProjectRecord {
    fn from(d: ProjectDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: d.name,
            details: d.details,
            technologies: d.technologies,
            link: d.link,
            visible: true,
            order_index: 0,
        }
    }
}

impl From<ExtracurricularDraft> for ExtracurricularRecord {
    fn from(d: ExtracurricularDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: d.title,
            organization: d.organization,
            details: d.details,
            visible: true,
            order_index: 0,
        }
    }
}

impl From<LanguageDraft> for LanguageRecord {
    fn from(d: LanguageDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: d.name,
            proficiency: d.proficiency,
            visible: true,
            order_index: 0,
        }
    }
}
