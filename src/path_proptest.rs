//! Property-based tests for pattern matching functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{expand_braces, glob_match, normalize_path, PatternSet};
    use proptest::prelude::*;

    fn segmented_path() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-zA-Z0-9_]{1,8}", 1..5).prop_map(|parts| parts.join("/"))
    }

    // ============================================================================
    // glob_match property tests
    // ============================================================================

    proptest! {
        /// Property: "*" matches any single path component
        #[test]
        fn glob_star_matches_single_component(path in "[a-zA-Z0-9_.]+") {
            let result = glob_match("*", &path);
            prop_assert!(result.is_ok());
            prop_assert!(result.unwrap(), "Pattern '*' should match '{}'", path);
        }

        /// Property: "*" never crosses a directory separator
        #[test]
        fn glob_star_stays_in_one_component(
            dir in "[a-zA-Z0-9_]{1,8}",
            file in "[a-zA-Z0-9_]{1,8}",
        ) {
            let path = format!("{}/{}.md", dir, file);
            prop_assert!(!glob_match("*.md", &path).unwrap());
            prop_assert!(glob_match("**/*.md", &path).unwrap());
        }

        /// Property: exact pattern matches only the identical path
        #[test]
        fn glob_exact_match_works(path in segmented_path(), other in segmented_path()) {
            prop_assert!(glob_match(&path, &path).unwrap());
            prop_assert_eq!(glob_match(&path, &other).unwrap(), path == other);
        }

        /// Property: "**" matches any relative path
        #[test]
        fn glob_double_star_matches_all(path in segmented_path()) {
            prop_assert!(glob_match("**", &path).unwrap(), "Pattern '**' should match '{}'", path);
        }
    }

    // ============================================================================
    // PatternSet property tests
    // ============================================================================

    proptest! {
        /// Property: negating a pattern removes exactly what it matches
        #[test]
        fn negation_excludes_matches(path in segmented_path()) {
            let set = PatternSet::new(&["**".to_string(), format!("!{}", path)]).unwrap();
            prop_assert!(!set.matches(&path));
        }

        /// Property: a set with only negations matches nothing
        #[test]
        fn negations_alone_match_nothing(path in segmented_path()) {
            let set = PatternSet::new(&["!nothing.md".to_string()]).unwrap();
            prop_assert!(set.is_empty());
            prop_assert!(!set.matches(&path));
        }
    }

    // ============================================================================
    // expand_braces / normalize_path property tests
    // ============================================================================

    proptest! {
        /// Property: brace alternatives expand to one pattern per alternative
        #[test]
        fn braces_expand_each_alternative(
            alternatives in prop::collection::vec("[a-z]{1,6}", 1..5),
            suffix in "[a-z]{0,4}",
        ) {
            let pattern = format!("{{{}}}{}", alternatives.join(","), suffix);
            let expanded = expand_braces(&pattern);
            let expected: Vec<String> = alternatives.iter().map(|a| format!("{}{}", a, suffix)).collect();
            prop_assert_eq!(expanded, expected);
        }

        /// Property: patterns without braces are left untouched
        #[test]
        fn braceless_patterns_unchanged(pattern in "[a-z*?/.]{0,20}") {
            prop_assert_eq!(expand_braces(&pattern), vec![pattern.clone()]);
        }

        /// Property: normalize_path is idempotent and never yields backslashes
        #[test]
        fn normalize_path_is_idempotent(input in "[a-zA-Z0-9_./\\\\]{0,30}") {
            let once = normalize_path(&input);
            prop_assert!(!once.contains('\\'));
            prop_assert_eq!(normalize_path(&once), once.clone());
        }
    }
}
