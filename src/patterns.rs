//! Named heuristic patterns shared by the entity extractors.
//!
//! Extraction correctness lives or dies on pattern edge cases (2-digit
//! day-less dates, "Present" in any case, international phone lengths),
//! so every pattern is a named constant with its own unit tests rather
//! than an inline literal in a scanner.

use once_cell::sync::Lazy;
use regex::Regex;

/// Domain of the professional-network profile URLs the contact extractor
/// looks for.
pub const PROFILE_DOMAIN: &str = "linkedin.com";

/// Permissive email pattern. Deliberately wider than RFC 5322 — résumés
/// contain addresses copy-pasted from anywhere.
pub static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Phone candidate: an optional `+`, then digits with common grouping
/// punctuation. Candidates are filtered by [`first_phone`] to the 7–15
/// digit range international numbers occupy.
pub static RE_PHONE_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+(]?\d[\d\s().-]{4,18}\d").unwrap());

/// Primary profile path (`…/in/<handle>`), tried first.
pub static RE_PROFILE_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_%.-]+/?").unwrap()
});

/// Legacy profile path (`…/pub/<handle>/…`), tried second.
pub static RE_PROFILE_PUB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/pub/[A-Za-z0-9_%.-]+(?:/[A-Za-z0-9_%.-]+)*")
        .unwrap()
});

/// A date range: `MONTH YEAR - MONTH YEAR` or `MM/YYYY` variants, with
/// `Present`/`Current` allowed as the end token, any dash flavour between.
///
/// Capture 1 is the start token, capture 2 the end token.
pub static RE_DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}|\d{1,2}/\d{4})\s*[–—-]\s*((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}|\d{1,2}/\d{4}|present|current)",
    )
    .unwrap()
});

/// First email in the text, if any.
pub fn first_email(text: &str) -> Option<&str> {
    RE_EMAIL.find(text).map(|m| m.as_str())
}

/// First phone-looking candidate whose digit count is 7–15.
pub fn first_phone(text: &str) -> Option<&str> {
    RE_PHONE_CANDIDATE.find_iter(text).find_map(|m| {
        let digits = m.as_str().chars().filter(char::is_ascii_digit).count();
        (7..=15).contains(&digits).then(|| m.as_str().trim())
    })
}

/// First profile URL, trying the `/in/` path first, then `/pub/`.
pub fn first_profile_link(text: &str) -> Option<&str> {
    RE_PROFILE_IN
        .find(text)
        .or_else(|| RE_PROFILE_PUB.find(text))
        .map(|m| m.as_str())
}

// ── Date ranking (merge support) ─────────────────────────────────────────

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Rank a natural-text date token on a total monthly scale so the merge
/// engine can pick the later of two end dates. `Present`/`Current` rank
/// above every calendar date; unparseable tokens rank `None`.
pub fn date_rank(token: &str) -> Option<u32> {
    let t = token.trim().to_lowercase();
    if t == "present" || t == "current" {
        return Some(u32::MAX);
    }
    if let Some((m, y)) = t.split_once('/') {
        let month: u32 = m.trim().parse().ok()?;
        let year: u32 = y.trim().parse().ok()?;
        if (1..=12).contains(&month) {
            return Some(year * 12 + (month - 1));
        }
        return None;
    }
    let (name, year) = t.split_once(char::is_whitespace)?;
    let month = MONTHS
        .iter()
        .position(|m| name.trim_end_matches('.').starts_with(m))? as u32;
    let year: u32 = year.trim().parse().ok()?;
    Some(year * 12 + month)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Email ────────────────────────────────────────────────────────────

    #[test]
    fn email_basic_and_plus_tag() {
        assert_eq!(first_email("mail jane.doe+cv@x.co.uk ok"), Some("jane.doe+cv@x.co.uk"));
    }

    #[test]
    fn email_absent() {
        assert_eq!(first_email("no at sign here"), None);
    }

    // ── Phone ────────────────────────────────────────────────────────────

    #[test]
    fn phone_international_plus() {
        assert_eq!(first_phone("call +44 20 7946 0958 today"), Some("+44 20 7946 0958"));
    }

    #[test]
    fn phone_us_grouping() {
        assert_eq!(first_phone("(512) 555-0199"), Some("(512) 555-0199"));
    }

    #[test]
    fn phone_seven_digits_accepted() {
        assert_eq!(first_phone("555-0199 x"), Some("555-0199"));
    }

    #[test]
    fn phone_too_few_digits_rejected() {
        assert_eq!(first_phone("room 12-34"), None);
    }

    #[test]
    fn phone_too_many_digits_rejected() {
        assert_eq!(first_phone("serial 1234 5678 9012 3456 7890"), None);
    }

    // ── Profile URLs ─────────────────────────────────────────────────────

    #[test]
    fn profile_in_path_preferred() {
        let text = "linkedin.com/pub/old/1/2 and https://www.linkedin.com/in/jane-doe";
        assert_eq!(
            first_profile_link(text),
            Some("https://www.linkedin.com/in/jane-doe")
        );
    }

    #[test]
    fn profile_pub_fallback() {
        assert_eq!(
            first_profile_link("see linkedin.com/pub/jane/12/a4b"),
            Some("linkedin.com/pub/jane/12/a4b")
        );
    }

    #[test]
    fn profile_absent() {
        assert_eq!(first_profile_link("github.com/jane"), None);
    }

    // ── Date range ───────────────────────────────────────────────────────

    #[test]
    fn date_range_month_year_to_present() {
        let caps = RE_DATE_RANGE.captures("Jan 2020 - Present").unwrap();
        assert_eq!(&caps[1], "Jan 2020");
        assert_eq!(&caps[2], "Present");
    }

    #[test]
    fn date_range_slash_form_no_spaces() {
        let caps = RE_DATE_RANGE.captures("03/2019-06/2021").unwrap();
        assert_eq!(&caps[1], "03/2019");
        assert_eq!(&caps[2], "06/2021");
    }

    #[test]
    fn date_range_en_dash_and_full_month() {
        let caps = RE_DATE_RANGE.captures("June 2018 – December 2019").unwrap();
        assert_eq!(&caps[1], "June 2018");
        assert_eq!(&caps[2], "December 2019");
    }

    #[test]
    fn date_range_current_lowercase() {
        let caps = RE_DATE_RANGE.captures("sep 2021 - current").unwrap();
        assert_eq!(&caps[2], "current");
    }

    #[test]
    fn date_range_rejects_plain_text() {
        assert!(!RE_DATE_RANGE.is_match("Led a team of 4 engineers"));
    }

    #[test]
    fn date_range_rejects_bare_year_span() {
        // Bare years are not dates in the canonical format.
        assert!(!RE_DATE_RANGE.is_match("2019 - 2021"));
    }

    // ── Date ranking ─────────────────────────────────────────────────────

    #[test]
    fn rank_orders_months_within_year() {
        assert!(date_rank("Mar 2020") < date_rank("Apr 2020"));
    }

    #[test]
    fn rank_slash_and_name_forms_agree() {
        assert_eq!(date_rank("06/2021"), date_rank("Jun 2021"));
    }

    #[test]
    fn rank_present_beats_any_date() {
        assert!(date_rank("Present") > date_rank("Dec 9999"));
        assert_eq!(date_rank("current"), Some(u32::MAX));
    }

    #[test]
    fn rank_unparseable_is_none() {
        assert_eq!(date_rank("sometime"), None);
        assert_eq!(date_rank("13/2020"), None);
    }
}
