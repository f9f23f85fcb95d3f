// src/network/codes.rs
//! Referral-code normalization and derived labels.

use crate::types::NodeId;

/// Normalizes a raw referral code.
///
/// Non-digit characters are stripped and the remainder must parse as an
/// integer; the result is that integer zero-padded to two digits.
/// `"7"`, `"07"` and `"#7"` all normalize to `"07"`. Empty or non-numeric
/// input yields `None`.
#[must_use]
pub fn normalize_code(raw: &str) -> Option<String> {
    code_number(raw).map(|n| format!("{n:02}"))
}

/// The integer a raw code stands for, if any.
#[must_use]
pub fn code_number(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Deterministic id for the placeholder standing in for `code`.
///
/// Returns `None` when the code is too large to fit the reserved range.
#[must_use]
pub fn virtual_id(code: &str, base: u32) -> Option<NodeId> {
    let n = i64::try_from(code_number(code)?).ok()?;
    let magnitude = i64::from(base).checked_add(n)?;
    Some(NodeId(-magnitude))
}

#[must_use]
pub fn recruiter_label(code: &str) -> String {
    format!("Recruiter {code}")
}

#[must_use]
pub fn referral_label(parent_code: &str) -> String {
    format!("Referral of {parent_code}")
}

#[must_use]
pub fn enrollee_label(index: usize) -> String {
    format!("Enrollee #{}", index + 1)
}

/// Placeholder names are bracketed so they never read as a person's name.
#[must_use]
pub fn virtual_label(prefix: &str, code: &str, directory_name: Option<&str>) -> String {
    match directory_name {
        Some(name) => format!("[{prefix} {code}] {name}"),
        None => format!("[{prefix} {code}]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        let cases = [
            ("7", Some("07")),
            ("07", Some("07")),
            ("007", Some("07")),
            ("#12", Some("12")),
            ("code-3a", Some("03")),
            ("123", Some("123")),
            ("0", Some("00")),
            ("", None),
            ("abc", None),
            ("  ", None),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_code(raw).as_deref(), expected, "input {raw:?}");
        }
    }

    #[test]
    fn test_overflowing_code_is_rejected() {
        assert_eq!(normalize_code("99999999999999999999999"), None);
    }

    #[test]
    fn test_virtual_id_is_deterministic_and_negative() {
        let a = virtual_id("03", 1_000_000);
        assert_eq!(a, Some(NodeId(-1_000_003)));
        assert_eq!(a, virtual_id("3", 1_000_000));
        assert_ne!(a, virtual_id("04", 1_000_000));
    }

    #[test]
    fn test_virtual_label_marks_placeholder() {
        assert_eq!(virtual_label("cluster", "05", None), "[cluster 05]");
        assert_eq!(virtual_label("cluster", "05", Some("Ana")), "[cluster 05] Ana");
    }
}
