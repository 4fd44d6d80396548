// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identifier cleanup for names pulled out of schema documents.

use regex::Regex;
use std::sync::OnceLock;

static NON_WORD: OnceLock<Regex> = OnceLock::new();
static LEADING_DIGITS: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)] // literal patterns, checked by the tests below
fn non_word() -> &'static Regex {
    NON_WORD.get_or_init(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}_]+").expect("valid pattern"))
}

#[allow(clippy::expect_used)] // literal patterns, checked by the tests below
fn leading_digits() -> &'static Regex {
    LEADING_DIGITS.get_or_init(|| Regex::new(r"^\p{Nd}+").expect("valid pattern"))
}

/// Turn an arbitrary schema name into a legal identifier.
///
/// Every maximal run of characters that are not letters, digits or `_`
/// becomes a single `_`; a leading digit run gets a `_` in front.
pub fn clean_name(name: &str) -> String {
    let replaced = non_word().replace_all(name, "_");
    leading_digits().replace(&replaced, "_$0").into_owned()
}

/// Drop the namespace prefix of a qualified type name (`opc:Int32` -> `Int32`).
pub fn strip_namespace(type_name: &str) -> &str {
    match type_name.split_once(':') {
        Some((_, local)) => local,
        None => type_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_replaces_runs() {
        assert_eq!(clean_name("Point"), "Point");
        assert_eq!(clean_name("Point-Extra"), "Point_Extra");
        assert_eq!(clean_name("a -- b"), "a_b");
        assert_eq!(clean_name("Motor.Speed[rpm]"), "Motor_Speed_rpm_");
        assert_eq!(clean_name("already_ok_1"), "already_ok_1");
    }

    #[test]
    fn test_clean_name_leading_digits() {
        assert_eq!(clean_name("3DPoint"), "_3DPoint");
        assert_eq!(clean_name("42"), "_42");
        assert_eq!(clean_name("-1x"), "_1x");
        assert_eq!(clean_name("x42"), "x42");
    }

    #[test]
    fn test_clean_name_keeps_unicode_letters() {
        assert_eq!(clean_name("Température"), "Température");
        assert_eq!(clean_name("Größe/Wert"), "Größe_Wert");
    }

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("opc:Int32"), "Int32");
        assert_eq!(strip_namespace("ns3:CustomAlarm"), "CustomAlarm");
        assert_eq!(strip_namespace("Double"), "Double");
    }
}
