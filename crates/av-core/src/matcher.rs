//! Exact, glob and regular-expression string matching
//!
//! The single matching primitive behind include/exclude filters, discovery
//! rules and footer lookups. Patterns come from user configuration, so an
//! unparseable regex is logged and treated as a non-match rather than
//! failing the whole dashboard generation.

use regex::Regex;
use tracing::warn;

/// Check whether `value` matches `pattern`.
///
/// Three pattern forms are supported:
/// - `/.../` wraps a regular expression. The expression is tested with
///   substring semantics: `/room/` matches `sensor.bedroom_temp`. Anchor
///   with `^`/`$` for whole-string matching.
/// - A pattern containing `*` is a glob. `*` matches zero or more of any
///   character; every other character is literal, so a `.` in the pattern
///   only matches a literal `.`. Globs are anchored at both ends.
/// - Anything else must equal `value`, case sensitively.
pub fn matches(pattern: &str, value: &str) -> bool {
    if let Some(inner) = pattern.strip_prefix('/').and_then(|p| p.strip_suffix('/')) {
        return regex_matches(inner, value);
    }
    if pattern.contains('*') {
        let anchored = format!(
            "^{}$",
            pattern
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*")
        );
        return regex_matches(&anchored, value);
    }
    pattern == value
}

fn regex_matches(pattern: &str, value: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(value),
        Err(err) => {
            warn!(pattern, %err, "ignoring unparseable pattern");
            false
        }
    }
}

/// Check whether any value matches any pattern.
///
/// Exact membership is checked first, then each (pattern, value) pair goes
/// through [`matches`]. An empty pattern list or an empty value list never
/// matches, so an absent exclusion list excludes nothing.
pub fn matches_any(patterns: &[String], values: &[&str]) -> bool {
    if patterns.is_empty() || values.is_empty() {
        return false;
    }
    if values.iter().any(|value| patterns.iter().any(|p| p == value)) {
        return true;
    }
    patterns
        .iter()
        .any(|pattern| values.iter().any(|value| matches(pattern, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches("light.kitchen", "light.kitchen"));
        assert!(!matches("light.kitchen", "light.kitchen_2"));
        assert!(!matches("Light.Kitchen", "light.kitchen"));
    }

    #[test]
    fn test_glob_match() {
        assert!(matches("light.*", "light.kitchen"));
        assert!(!matches("light.*", "switch.kitchen"));
        assert!(matches("*humidifier*", "switch.bedroom_humidifier_power"));
        assert!(matches("*", "anything"));
    }

    #[test]
    fn test_glob_dot_is_literal() {
        // an unescaped `.` metacharacter would let "lightxkitchen" through
        assert!(!matches("light.*", "lightxkitchen_lamp"));
    }

    #[test]
    fn test_glob_is_anchored() {
        assert!(!matches("kitchen*", "light.kitchen"));
        assert!(matches("*kitchen", "light.kitchen"));
    }

    #[test]
    fn test_regex_match() {
        assert!(matches("/^sensor\\..*_temp$/", "sensor.room_temp"));
        assert!(!matches("/^sensor\\..*_temp$/", "sensor.room_humidity"));
        // substring semantics for unanchored expressions
        assert!(matches("/room/", "sensor.bedroom_temp"));
    }

    #[test]
    fn test_invalid_regex_never_matches() {
        assert!(!matches("/((/", "anything"));
    }

    #[test]
    fn test_matches_any_empty_lists() {
        assert!(!matches_any(&[], &["light", "motion"]));
        assert!(!matches_any(&["motion".to_string()], &[]));
    }

    #[test]
    fn test_matches_any_exact_membership() {
        let patterns = vec!["motion".to_string()];
        assert!(matches_any(&patterns, &["door", "motion", "sensor.x"]));
        assert!(!matches_any(&patterns, &["door", "window"]));
    }

    #[test]
    fn test_matches_any_pattern_branch() {
        let patterns = vec!["light.*".to_string()];
        assert!(matches_any(&patterns, &["light", "light.kitchen"]));
        assert!(!matches_any(&patterns, &["switch", "switch.kitchen"]));
    }
}
