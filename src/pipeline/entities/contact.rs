//! Contact heuristics: email, phone, profile link, location, name.
//!
//! Pattern scans (email, phone, profile URL) run over the whole section;
//! the line heuristics for location and name look only at the first
//! couple of lines, where contact blocks put them. All fields are
//! optional — a section yielding nothing is a valid result.

use crate::patterns::{first_email, first_phone, first_profile_link, PROFILE_DOMAIN};
use crate::records::ContactInfo;

/// Extract contact details from the contact section body.
pub fn extract_contact(text: &str) -> ContactInfo {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    ContactInfo {
        name: guess_name(&lines).map(str::to_string),
        email: first_email(text).map(str::to_string),
        phone: first_phone(text).map(str::to_string),
        location: guess_location(&lines).map(str::to_string),
        profile_link: first_profile_link(text).map(str::to_string),
    }
}

/// First line containing a comma but no address or profile token —
/// "Austin, TX"-style location lines.
fn guess_location<'a>(lines: &[&'a str]) -> Option<&'a str> {
    lines
        .iter()
        .find(|line| {
            let lower = line.to_lowercase();
            line.contains(',') && !line.contains('@') && !lower.contains(PROFILE_DOMAIN)
        })
        .copied()
}

/// The first line, unless it is an address/URL line, in which case the
/// second line gets one chance. Anything further down is never a name.
fn guess_name<'a>(lines: &[&'a str]) -> Option<&'a str> {
    let qualifies = |line: &str| {
        let lower = line.to_lowercase();
        !line.contains('@') && !lower.contains(PROFILE_DOMAIN) && !lower.contains("http")
    };

    lines
        .first()
        .copied()
        .filter(|l| qualifies(l))
        .or_else(|| lines.get(1).copied().filter(|l| qualifies(l)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_contact_block() {
        let text = "Jane Doe\nAustin, TX\njane@x.com | +1 512 555 0199\nhttps://linkedin.com/in/janedoe";
        let c = extract_contact(text);
        assert_eq!(c.name.as_deref(), Some("Jane Doe"));
        assert_eq!(c.location.as_deref(), Some("Austin, TX"));
        assert_eq!(c.email.as_deref(), Some("jane@x.com"));
        assert_eq!(c.phone.as_deref(), Some("+1 512 555 0199"));
        assert_eq!(
            c.profile_link.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
    }

    #[test]
    fn name_falls_back_to_second_line() {
        let text = "jane@x.com\nJane Doe";
        let c = extract_contact(text);
        assert_eq!(c.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn name_never_taken_from_third_line() {
        let text = "jane@x.com\nlinkedin.com/in/janedoe\nJane Doe";
        let c = extract_contact(text);
        assert_eq!(c.name, None);
    }

    #[test]
    fn location_requires_comma() {
        let text = "Jane Doe\nAustin TX";
        let c = extract_contact(text);
        assert_eq!(c.location, None);
    }

    #[test]
    fn email_line_is_not_a_location() {
        let text = "Jane Doe\ncontact: jane@x.com, backup@y.org";
        let c = extract_contact(text);
        assert_eq!(c.location, None);
        assert_eq!(c.email.as_deref(), Some("jane@x.com"));
    }

    #[test]
    fn empty_section_yields_empty_contact() {
        let c = extract_contact("");
        assert!(c.is_empty());
    }
}
