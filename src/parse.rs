//! Node-list grammar.
//!
//! An expression is a comma separated list of terms. A term is a literal
//! prefix, optionally followed by a `[...]` group whose body repeats the same
//! grammar one nesting level down:
//!
//! - `GROUP_OPEN` / `GROUP_CLOSE` delimit a group and track nesting depth.
//! - `TERM_SEPARATOR` splits terms, but only at the current depth.
//! - `RANGE_SEPARATOR` joins the two bounds of a numeric range.
mod splitter;

pub const GROUP_OPEN: char = '[';
pub const GROUP_CLOSE: char = ']';
pub const TERM_SEPARATOR: char = ',';
pub const RANGE_SEPARATOR: char = '-';

pub use splitter::{check_brackets, split_prefix, split_terms, unwrap_group};

/// One top-level piece of a group body, tagged before anything is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element<'a> {
    /// Emitted as-is behind the prefix.
    Literal(&'a str),
    /// `low-high`, enumerated by the range expander.
    Range(&'a str),
    /// Still holds a group of its own; expanded on a later pass.
    Nested(&'a str),
}

/// Tag a group element. Inside a group every bracket-free element with a
/// `-` is a range, so `n[01-aa]` is reported rather than kept as a name.
pub fn classify(element: &str) -> Element<'_> {
    if has_brackets(element) {
        Element::Nested(element)
    } else if element.contains(RANGE_SEPARATOR) {
        Element::Range(element)
    } else {
        Element::Literal(element)
    }
}

/// A term is ready once no group is left in it; it may still be a bare range.
pub fn is_ready(term: &str) -> bool {
    !has_brackets(term)
}

/// `digits-digits` with nothing around it.
pub fn is_bare_range(token: &str) -> bool {
    let Some((low, high)) = token.split_once(RANGE_SEPARATOR) else {
        return false;
    };
    is_digits(low) && is_digits(high)
}

/// True when every token is a plain literal: no group syntax, no separator
/// and no bare range left to enumerate.
pub fn is_fully_expanded<S: AsRef<str>>(tokens: &[S]) -> bool {
    tokens.iter().all(|token| {
        let token = token.as_ref();
        is_ready(token) && !token.contains(TERM_SEPARATOR) && !is_bare_range(token)
    })
}

fn has_brackets(input: &str) -> bool {
    input.contains(|ch: char| ch == GROUP_OPEN || ch == GROUP_CLOSE)
}

fn is_digits(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}
