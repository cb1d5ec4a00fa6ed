//! Merge/dedup engine: reconcile freshly appended records against what
//! the aggregate already holds.
//!
//! Runs once per import, after all drafts have been converted into
//! persistent records and appended. For each collection a normalized key
//! (lowercased, trimmed, whitespace-collapsed identity fields) is built
//! per record; the collection is walked in original order keeping the
//! first record per key and merging every later duplicate into it.
//!
//! The aggregation uses an insertion-order-preserving map so surviving
//! records keep their positions, then reassigns `order_index` densely.
//!
//! ## Idempotence
//!
//! Field rules are chosen so that importing identical content twice is a
//! no-op: detail text merges as a sorted line-set union (original line
//! order is not preserved), scalars fill only when empty, end dates take
//! the later, proficiencies keep the higher ordinal. The stage is a pure,
//! total function over the collection state — it has no failure mode.
//! It is **not** safe to run concurrently with another mutation of the
//! same aggregate; the caller serialises all structural mutation.

use crate::patterns::date_rank;
use crate::records::ResumeAggregate;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Duplicates absorbed per collection during one merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    pub experiences_merged: usize,
    pub education_merged: usize,
    pub skills_merged: usize,
    pub projects_merged: usize,
    pub extracurriculars_merged: usize,
    pub languages_merged: usize,
}

impl MergeStats {
    /// Total duplicates absorbed across all collections.
    pub fn total(&self) -> usize {
        self.experiences_merged
            + self.education_merged
            + self.skills_merged
            + self.projects_merged
            + self.extracurriculars_merged
            + self.languages_merged
    }
}

/// Deduplicate every collection of the aggregate and renumber.
pub fn dedupe_aggregate(aggregate: &mut ResumeAggregate) -> MergeStats {
    let mut stats = MergeStats::default();

    let experiences = std::mem::take(&mut aggregate.experiences);
    (aggregate.experiences, stats.experiences_merged) = dedupe(
        experiences,
        |r| {
            normalized_key(&[
                &r.title,
                &r.company,
                r.start_date.as_deref().unwrap_or(""),
            ])
        },
        |kept, dup| {
            kept.visible |= dup.visible;
            merge_detail_lines(&mut kept.details, &dup.details);
            fill_if_empty(&mut kept.location, dup.location);
            take_later_end_date(&mut kept.end_date, dup.end_date);
        },
    );

    let education = std::mem::take(&mut aggregate.education);
    (aggregate.education, stats.education_merged) = dedupe(
        education,
        |r| {
            normalized_key(&[
                &r.institution,
                &r.degree,
                r.start_date.as_deref().unwrap_or(""),
            ])
        },
        |kept, dup| {
            kept.visible |= dup.visible;
            merge_detail_lines(&mut kept.details, &dup.details);
            fill_if_empty(&mut kept.grade, dup.grade);
            fill_if_empty(&mut kept.field_of_study, dup.field_of_study);
            take_later_end_date(&mut kept.end_date, dup.end_date);
        },
    );

    let skills = std::mem::take(&mut aggregate.skills);
    (aggregate.skills, stats.skills_merged) = dedupe(
        skills,
        |r| normalized_key(&[&r.name, &r.category]),
        |kept, dup| {
            kept.visible |= dup.visible;
        },
    );

    let projects = std::mem::take(&mut aggregate.projects);
    (aggregate.projects, stats.projects_merged) = dedupe(
        projects,
        |r| normalized_key(&[&r.name]),
        |kept, dup| {
            kept.visible |= dup.visible;
            merge_detail_lines(&mut kept.details, &dup.details);
            merge_technologies(&mut kept.technologies, &dup.technologies);
            fill_if_empty(&mut kept.link, dup.link);
        },
    );

    let extracurriculars = std::mem::take(&mut aggregate.extracurriculars);
    (aggregate.extracurriculars, stats.extracurriculars_merged) = dedupe(
        extracurriculars,
        |r| normalized_key(&[&r.title, &r.organization]),
        |kept, dup| {
            kept.visible |= dup.visible;
            merge_detail_lines(&mut kept.details, &dup.details);
        },
    );

    let languages = std::mem::take(&mut aggregate.languages);
    (aggregate.languages, stats.languages_merged) = dedupe(
        languages,
        |r| normalized_key(&[&r.name]),
        |kept, dup| {
            kept.visible |= dup.visible;
            if proficiency_rank(&dup.proficiency) > proficiency_rank(&kept.proficiency) {
                kept.proficiency = dup.proficiency;
            }
        },
    );

    aggregate.renumber_all();

    if stats.total() > 0 {
        info!("merge absorbed {} duplicate records", stats.total());
    } else {
        debug!("merge pass found no duplicates");
    }
    stats
}

/// First-seen-wins aggregation over a normalized key.
///
/// Returns the surviving records in original order plus the number of
/// duplicates merged away.
fn dedupe<T, K, M>(records: Vec<T>, key_of: K, mut merge: M) -> (Vec<T>, usize)
where
    K: Fn(&T) -> String,
    M: FnMut(&mut T, T),
{
    let mut kept: IndexMap<String, T> = IndexMap::with_capacity(records.len());
    let mut merged = 0;

    for record in records {
        match kept.entry(key_of(&record)) {
            Entry::Occupied(mut entry) => {
                merge(entry.get_mut(), record);
                merged += 1;
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
            }
        }
    }

    (kept.into_values().collect(), merged)
}

/// Lowercased, trimmed, whitespace-collapsed concatenation of identity
/// fields. The unit separator keeps `("ab", "c")` distinct from
/// `("a", "bc")`.
fn normalized_key(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| {
            f.trim()
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\u{1f}")
}

/// Union both detail texts at line granularity and rejoin sorted.
fn merge_detail_lines(kept: &mut String, other: &str) {
    let lines: BTreeSet<&str> = kept
        .lines()
        .chain(other.lines())
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    *kept = lines.into_iter().collect::<Vec<_>>().join("\n");
}

/// Fill the slot only when it currently holds nothing.
fn fill_if_empty(slot: &mut Option<String>, value: Option<String>) {
    let empty = slot.as_deref().map(str::trim).is_none_or(str::is_empty);
    if empty {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            *slot = Some(v);
        }
    }
}

/// Keep the later of two end dates; a lone value wins over none.
/// Unparseable tokens rank below any parseable date, and ties keep the
/// first record's value.
fn take_later_end_date(kept: &mut Option<String>, other: Option<String>) {
    let Some(other) = other.filter(|v| !v.trim().is_empty()) else {
        return;
    };
    match kept.as_deref().filter(|v| !v.trim().is_empty()) {
        None => *kept = Some(other),
        Some(current) => {
            let current_rank = date_rank(current).map(|r| r as u64).unwrap_or(0);
            let other_rank = date_rank(&other).map(|r| r as u64).unwrap_or(0);
            if other_rank > current_rank {
                *kept = Some(other);
            }
        }
    }
}

/// Sorted union of comma-split technology tokens.
fn merge_technologies(kept: &mut String, other: &str) {
    let tokens: BTreeSet<&str> = kept
        .split(',')
        .chain(other.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    *kept = tokens.into_iter().collect::<Vec<_>>().join(", ");
}

/// Fixed ordinal scale for language proficiency. Substring match so
/// "Professional working proficiency" still ranks as professional.
fn proficiency_rank(value: &str) -> u8 {
    let v = value.to_lowercase();
    const SCALE: [(&str, u8); 5] = [
        ("native", 5),
        ("fluent", 4),
        ("professional", 3),
        ("intermediate", 2),
        ("basic", 1),
    ];
    SCALE
        .iter()
        .find_map(|(token, rank)| v.contains(token).then_some(*rank))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ExperienceRecord, LanguageRecord, ProjectRecord, SkillRecord};
    use uuid::Uuid;

    fn experience(title: &str, company: &str, start: &str, end: Option<&str>) -> ExperienceRecord {
        ExperienceRecord {
            id: Uuid::new_v4(),
            title: title.into(),
            company: company.into(),
            start_date: Some(start.into()),
            end_date: end.map(Into::into),
            location: None,
            details: String::new(),
            visible: true,
            order_index: 0,
        }
    }

    fn language(name: &str, proficiency: &str) -> LanguageRecord {
        LanguageRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            proficiency: proficiency.into(),
            visible: true,
            order_index: 0,
        }
    }

    #[test]
    fn normalized_key_collapses_case_and_whitespace() {
        assert_eq!(
            normalized_key(&["  Software   Engineer ", "ACME Corp"]),
            normalized_key(&["software engineer", "acme corp"])
        );
    }

    #[test]
    fn normalized_key_field_boundaries_matter() {
        assert_ne!(normalized_key(&["ab", "c"]), normalized_key(&["a", "bc"]));
    }

    #[test]
    fn duplicate_experience_merges_to_first_seen() {
        let mut agg = ResumeAggregate::default();
        let mut a = experience("Engineer", "Acme", "Jan 2020", None);
        a.details = "- Built billing\n- Led team".into();
        let mut b = experience("engineer", "ACME", "Jan 2020", Some("Jun 2021"));
        b.details = "- Built billing\n- Wrote docs".into();
        agg.push_experience(a);
        agg.push_experience(b);

        let stats = dedupe_aggregate(&mut agg);
        assert_eq!(stats.experiences_merged, 1);
        assert_eq!(agg.experiences.len(), 1);

        let kept = &agg.experiences[0];
        // Non-nil end date wins over nil.
        assert_eq!(kept.end_date.as_deref(), Some("Jun 2021"));
        // Line union, sorted, deduplicated.
        assert_eq!(kept.details, "- Built billing\n- Led team\n- Wrote docs");
    }

    #[test]
    fn later_end_date_wins_when_both_set() {
        let mut agg = ResumeAggregate::default();
        agg.push_experience(experience("Engineer", "Acme", "Jan 2020", Some("Mar 2021")));
        agg.push_experience(experience("Engineer", "Acme", "Jan 2020", Some("Jun 2021")));
        dedupe_aggregate(&mut agg);
        assert_eq!(agg.experiences[0].end_date.as_deref(), Some("Jun 2021"));
    }

    #[test]
    fn present_outranks_calendar_end_date() {
        let mut agg = ResumeAggregate::default();
        agg.push_experience(experience("Engineer", "Acme", "Jan 2020", Some("Jun 2021")));
        agg.push_experience(experience("Engineer", "Acme", "Jan 2020", Some("Present")));
        dedupe_aggregate(&mut agg);
        assert_eq!(agg.experiences[0].end_date.as_deref(), Some("Present"));
    }

    #[test]
    fn different_start_dates_stay_separate() {
        let mut agg = ResumeAggregate::default();
        agg.push_experience(experience("Engineer", "Acme", "Jan 2020", None));
        agg.push_experience(experience("Engineer", "Acme", "Feb 2022", None));
        let stats = dedupe_aggregate(&mut agg);
        assert_eq!(stats.experiences_merged, 0);
        assert_eq!(agg.experiences.len(), 2);
    }

    #[test]
    fn visibility_is_ored() {
        let mut agg = ResumeAggregate::default();
        let mut hidden = experience("Engineer", "Acme", "Jan 2020", None);
        hidden.visible = false;
        agg.push_experience(hidden);
        agg.push_experience(experience("Engineer", "Acme", "Jan 2020", None));
        dedupe_aggregate(&mut agg);
        assert!(agg.experiences[0].visible);
    }

    #[test]
    fn skill_key_includes_category() {
        let mut agg = ResumeAggregate::default();
        for (name, category) in [("Rust", "Languages"), ("Rust", ""), ("rust", "languages")] {
            agg.push_skill(SkillRecord {
                id: Uuid::new_v4(),
                name: name.into(),
                category: category.into(),
                visible: true,
                order_index: 0,
            });
        }
        let stats = dedupe_aggregate(&mut agg);
        assert_eq!(stats.skills_merged, 1);
        assert_eq!(agg.skills.len(), 2);
    }

    #[test]
    fn project_technologies_union_sorted() {
        let mut agg = ResumeAggregate::default();
        let a = ProjectRecord {
            id: Uuid::new_v4(),
            name: "Portfolio".into(),
            details: String::new(),
            technologies: "Rust, Axum".into(),
            link: None,
            visible: true,
            order_index: 0,
        };
        let mut b = a.clone();
        b.id = Uuid::new_v4();
        b.technologies = "Axum, Postgres".into();
        b.link = Some("https://example.dev".into());
        agg.push_project(a);
        agg.push_project(b);

        let stats = dedupe_aggregate(&mut agg);
        assert_eq!(stats.projects_merged, 1);
        let kept = &agg.projects[0];
        assert_eq!(kept.technologies, "Axum, Postgres, Rust");
        assert_eq!(kept.link.as_deref(), Some("https://example.dev"));
    }

    #[test]
    fn language_keeps_higher_proficiency() {
        let mut agg = ResumeAggregate::default();
        agg.push_language(language("Spanish", "intermediate"));
        agg.push_language(language("spanish", "Professional working proficiency"));
        agg.push_language(language("French", ""));
        agg.push_language(language("French", "basic"));

        let stats = dedupe_aggregate(&mut agg);
        assert_eq!(stats.languages_merged, 2);
        assert_eq!(agg.languages[0].proficiency, "Professional working proficiency");
        assert_eq!(agg.languages[1].proficiency, "basic");
    }

    #[test]
    fn order_indices_dense_after_merge() {
        let mut agg = ResumeAggregate::default();
        agg.push_experience(experience("A", "X", "Jan 2020", None));
        agg.push_experience(experience("B", "Y", "Jan 2020", None));
        agg.push_experience(experience("A", "X", "Jan 2020", None));
        agg.push_experience(experience("C", "Z", "Jan 2020", None));
        dedupe_aggregate(&mut agg);

        let mut indices: Vec<usize> = agg.experiences.iter().map(|r| r.order_index).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2]);
        // Survivors keep first-seen order.
        let titles: Vec<&str> = agg.experiences.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut agg = ResumeAggregate::default();
        let mut a = experience("Engineer", "Acme", "Jan 2020", Some("Present"));
        a.details = "- Led team\n- Built billing".into();
        agg.push_experience(a.clone());
        agg.push_experience(a);
        dedupe_aggregate(&mut agg);
        let first_pass = agg.clone();

        dedupe_aggregate(&mut agg);
        assert_eq!(agg.experiences, first_pass.experiences);
    }
}
