//! Depth-aware splitting.
//!
//! Every scan keeps a running bracket depth; a separator only counts when the
//! depth is back to where the scan started.
use crate::error::{ErrorKind, ExpandError, ExpandResult};
use crate::parse::{GROUP_CLOSE, GROUP_OPEN, TERM_SEPARATOR};

/// Split on commas at depth 0. Input without such a comma comes back as a
/// single term.
pub fn split_terms(expression: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (idx, ch) in expression.char_indices() {
        match ch {
            GROUP_OPEN => depth += 1,
            GROUP_CLOSE => depth = depth.saturating_sub(1),
            TERM_SEPARATOR if depth == 0 => {
                terms.push(&expression[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    terms.push(&expression[start..]);
    terms
}

/// Cut a term at its first `[`. `prefix + suffix` is always the whole term.
pub fn split_prefix(term: &str) -> (&str, &str) {
    match term.find(GROUP_OPEN) {
        Some(idx) => term.split_at(idx),
        None => (term, ""),
    }
}

/// Strip the outer brackets of a group, returning its body and whatever
/// follows the matching `]`.
pub fn unwrap_group(group: &str) -> (&str, &str) {
    let Some(inner) = group.strip_prefix(GROUP_OPEN) else {
        return (group, "");
    };
    let mut depth = 1usize;
    for (idx, ch) in inner.char_indices() {
        match ch {
            GROUP_OPEN => depth += 1,
            GROUP_CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return (&inner[..idx], &inner[idx + 1..]);
                }
            }
            _ => {}
        }
    }
    // Unterminated; check_brackets rejects this before expansion starts.
    (inner, "")
}

/// Reject an expression whose brackets do not pair up.
pub fn check_brackets(expression: &str) -> ExpandResult<()> {
    let mut open = Vec::new();
    for (idx, ch) in expression.char_indices() {
        match ch {
            GROUP_OPEN => open.push(idx),
            GROUP_CLOSE => {
                if open.pop().is_none() {
                    return Err(ExpandError::new(
                        ErrorKind::UnbalancedBracket,
                        "unmatched ']'".to_string(),
                    )
                    .with_position(idx)
                    .with_context("Every ']' closes an earlier '[': n[01-04]"));
                }
            }
            _ => {}
        }
    }
    if let Some(&idx) = open.first() {
        return Err(ExpandError::new(
            ErrorKind::UnbalancedBracket,
            "unmatched '['".to_string(),
        )
        .with_position(idx)
        .with_context("Missing closing bracket: n[01-04]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn split_outside_groups() {
        assert_eq!(split_terms("n01,n02"), vec!["n01", "n02"]);
        assert_eq!(split_terms("n[01-02]"), vec!["n[01-02]"]);
        assert_eq!(split_terms("n[0-2]"), vec!["n[0-2]"]);
        assert_eq!(
            split_terms("n[01,02],n03,n[05-07,09]"),
            vec!["n[01,02]", "n03", "n[05-07,09]"]
        );
    }

    #[test]
    fn split_keeps_nested_commas() {
        assert_eq!(
            split_terms("n[1-2],r[[1-2],t[05-07,x[10-11]]]"),
            vec!["n[1-2]", "r[[1-2],t[05-07,x[10-11]]]"]
        );
        assert_eq!(split_terms("05-07,x[10,11]"), vec!["05-07", "x[10,11]"]);
    }

    #[test]
    fn split_keeps_empty_terms() {
        assert_eq!(split_terms(""), vec![""]);
        assert_eq!(split_terms("a,,b,"), vec!["a", "", "b", ""]);
    }

    #[test]
    fn prefix_split() {
        assert_eq!(split_prefix("n[01-02]"), ("n", "[01-02]"));
        assert_eq!(split_prefix("[0-2]"), ("", "[0-2]"));
        assert_eq!(split_prefix("np[05-07,09]"), ("np", "[05-07,09]"));
        assert_eq!(split_prefix("login01"), ("login01", ""));
    }

    #[test]
    fn unwrap_outer_group() {
        assert_eq!(unwrap_group("[0-2]"), ("0-2", ""));
        assert_eq!(unwrap_group("[]"), ("", ""));
        assert_eq!(
            unwrap_group("[t[05-07,x[10-11]]]"),
            ("t[05-07,x[10-11]]", "")
        );
        assert_eq!(unwrap_group("[1-2]-ib"), ("1-2", "-ib"));
        assert_eq!(unwrap_group("[1-2]n[3-4]"), ("1-2", "n[3-4]"));
    }

    #[test]
    fn bracket_balance() {
        assert!(check_brackets("n[t[05-07,x[10-11]]]").is_ok());
        assert!(check_brackets("n01,n02").is_ok());

        let err = check_brackets("n[01-02").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnbalancedBracket);
        assert_eq!(err.position, Some(1));

        let err = check_brackets("n01],n02").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnbalancedBracket);
        assert_eq!(err.position, Some(3));
    }

    proptest! {
        #[test]
        fn prefix_split_round_trips(term in "[a-z0-9\\[\\]\\-]{0,24}") {
            let (prefix, suffix) = split_prefix(&term);
            prop_assert_eq!(format!("{prefix}{suffix}"), term.clone());
            prop_assert!(!prefix.contains('['));
            prop_assert!(suffix.is_empty() || suffix.starts_with('['));
        }

        #[test]
        fn split_terms_without_groups_matches_str_split(input in "[a-z0-9,\\-]{0,32}") {
            let expected: Vec<&str> = input.split(',').collect();
            prop_assert_eq!(split_terms(&input), expected);
        }
    }
}
