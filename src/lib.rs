//! Bracket expansion for cluster node lists.
//!
//! `n[01-03],login[1,2]` names five machines: `n01 n02 n03 login1 login2`.
//! Groups nest, and each level's prefix is distributed over everything inside
//! it, so `n[t[05-07,x[10-11]]]` yields `nt05 nt06 nt07 ntx10 ntx11`.
//!
//! The crate is pure string processing. The `cli` feature adds the `sexpand`
//! binary; fuzz targets and tests link only the engine.

mod error;
mod expansion;
mod parse;

pub use error::{ErrorKind, ExpandError, ExpandResult};
pub use expansion::{expand, expand_group, expand_prefixed, expand_range};
pub use parse::{
    check_brackets, classify, is_bare_range, is_fully_expanded, is_ready, split_prefix,
    split_terms, unwrap_group, Element,
};

// Keep fuzz inputs from enumerating huge ranges or cartesian products.
const FUZZ_MAX_DIGITS: usize = 2;
const FUZZ_MAX_GROUPS: usize = 3;

/// Fuzz helper for the full expansion path.
pub fn fuzz_expand_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    if longest_digit_run(&input) > FUZZ_MAX_DIGITS || input.matches('[').count() > FUZZ_MAX_GROUPS
    {
        return;
    }
    if let Ok(names) = expand(&input) {
        assert!(names.iter().all(|name| is_ready(name)));
    }
}

/// Fuzz helper for the splitters only.
pub fn fuzz_split_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    for term in split_terms(&input) {
        let (prefix, suffix) = split_prefix(term);
        assert_eq!(prefix.len() + suffix.len(), term.len());
        if !suffix.is_empty() {
            let _ = unwrap_group(suffix);
        }
    }
}

fn longest_digit_run(input: &str) -> usize {
    input
        .split(|ch: char| !ch.is_ascii_digit())
        .map(str::len)
        .max()
        .unwrap_or(0)
}
