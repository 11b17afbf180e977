//! Sheet-name sanitization.
//!
//! Excel sheet names may not contain `\ / * ? : [ ]`, may not start or end
//! with an apostrophe, are limited to 31 characters, and must be unique
//! (case-insensitively) within a workbook. Group keys come straight from
//! user data, so every one of those rules has to be enforced here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Name of the trailing all-records sheet. Reserved: no group sheet may
/// take this name.
pub const ALL_RECORDS_SHEET: &str = "Total";

/// Maximum sheet-name length imposed by the xlsx format.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Placeholder for group keys that sanitize down to nothing.
const BLANK_SHEET_NAME: &str = "(blank)";

static FORBIDDEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\\/*?:\[\]]").unwrap());

/// Sanitize a raw group-key value into a legal sheet name.
///
/// Replaces forbidden characters with `_`, strips edge apostrophes, and
/// truncates to [`MAX_SHEET_NAME_LEN`] characters. Total over any input;
/// idempotent.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let replaced = FORBIDDEN.replace_all(raw, "_");
    let trimmed = replaced.trim_matches('\'');
    let truncated: String = trimmed.chars().take(MAX_SHEET_NAME_LEN).collect();
    if truncated.is_empty() {
        BLANK_SHEET_NAME.to_string()
    } else {
        truncated
    }
}

/// Assign unique sheet names to a sequence of group keys, preserving order.
///
/// [`ALL_RECORDS_SHEET`] is reserved up front. Collisions, including those
/// introduced by truncation, get a deterministic ` (2)`, ` (3)`, ... suffix;
/// the base is re-truncated so the suffixed name still fits. Uniqueness is
/// case-insensitive, matching the xlsx format's rules.
pub fn assign_sheet_names<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    taken.insert(ALL_RECORDS_SHEET.to_lowercase());

    let mut names = Vec::with_capacity(keys.len());
    for key in keys {
        let base = sanitize_sheet_name(key.as_ref());
        let name = disambiguate(&base, &taken);
        taken.insert(name.to_lowercase());
        names.push(name);
    }
    names
}

fn disambiguate(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(&base.to_lowercase()) {
        return base.to_string();
    }
    let mut n: u32 = 2;
    loop {
        let suffix = format!(" ({})", n);
        let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
        let stem: String = base.chars().take(room).collect();
        let candidate = format!("{}{}", stem, suffix);
        if !taken.contains(&candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_characters_replaced() {
        assert_eq!(sanitize_sheet_name("A/B:C"), "A_B_C");
        assert_eq!(sanitize_sheet_name(r"a\b*c?d[e]f"), "a_b_c_d_e_f");
    }

    #[test]
    fn test_clean_name_unchanged() {
        assert_eq!(sanitize_sheet_name("2024-01"), "2024-01");
    }

    #[test]
    fn test_idempotent() {
        let once = sanitize_sheet_name("Q1/Q2:report?");
        let twice = sanitize_sheet_name(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_truncates_to_31_chars() {
        let long = "x".repeat(40);
        let name = sanitize_sheet_name(&long);
        assert_eq!(name.chars().count(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn test_empty_becomes_blank() {
        assert_eq!(sanitize_sheet_name(""), "(blank)");
        assert_eq!(sanitize_sheet_name("''"), "(blank)");
    }

    #[test]
    fn test_edge_apostrophes_stripped() {
        assert_eq!(sanitize_sheet_name("'January'"), "January");
    }

    #[test]
    fn test_assign_preserves_order() {
        let names = assign_sheet_names(&["2024-01", "2024-02"]);
        assert_eq!(names, vec!["2024-01", "2024-02"]);
    }

    #[test]
    fn test_total_is_reserved() {
        let names = assign_sheet_names(&["Total", "Total"]);
        assert_eq!(names, vec!["Total (2)", "Total (3)"]);
    }

    #[test]
    fn test_sanitization_collision_suffixed() {
        // Distinct keys that sanitize to the same name
        let names = assign_sheet_names(&["A/B", "A:B", "A*B"]);
        assert_eq!(names, vec!["A_B", "A_B (2)", "A_B (3)"]);
    }

    #[test]
    fn test_truncation_collision_suffixed() {
        let a = format!("{}one", "x".repeat(31));
        let b = format!("{}two", "x".repeat(31));
        let names = assign_sheet_names(&[a, b]);
        assert_eq!(names[0], "x".repeat(31));
        assert_eq!(names[1], format!("{} (2)", "x".repeat(27)));
        assert!(names[1].chars().count() <= MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn test_uniqueness_is_case_insensitive() {
        let names = assign_sheet_names(&["march", "March"]);
        assert_eq!(names, vec!["march", "March (2)"]);
    }
}
