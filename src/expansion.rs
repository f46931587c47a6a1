//! Expansion resolves one level of bracket nesting per pass.
//!
//! Terms are rewritten into tokens that are either resolved names or pending
//! text that still holds a group. Each pass replaces pending tokens in place,
//! so the output order always follows the order of the expression.
use log::debug;

use crate::error::ExpandResult;
use crate::parse::{
    check_brackets, classify, is_fully_expanded, is_ready, split_prefix, split_terms,
    unwrap_group, Element,
};

mod range;

pub use range::expand_range;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Resolved(String),
    // Always a single term with at least one group left in it.
    Pending(String),
}

impl Token {
    fn is_pending(&self) -> bool {
        matches!(self, Token::Pending(_))
    }

    /// Resolved unless the text still carries a group further along.
    fn from_text(text: String) -> Self {
        if is_ready(&text) {
            Token::Resolved(text)
        } else {
            Token::Pending(text)
        }
    }
}

/// Expand a node-list expression into every name it denotes, in order.
///
/// ```
/// let names = sexpand::expand("n[01-03],login[1,2]").unwrap();
/// assert_eq!(names, ["n01", "n02", "n03", "login1", "login2"]);
/// ```
pub fn expand(expression: &str) -> ExpandResult<Vec<String>> {
    expand_prefixed("", expression)
}

/// Expand `expression` with `prefix` distributed over each of its terms.
pub fn expand_prefixed(prefix: &str, expression: &str) -> ExpandResult<Vec<String>> {
    check_brackets(expression)?;
    let mut tokens = Vec::new();
    for term in split_terms(expression) {
        if term.is_empty() {
            continue;
        }
        tokens.extend(expand_term(prefix, term)?);
    }
    resolve(tokens)
}

/// Expand a single `[...]` group behind `prefix`.
pub fn expand_group(prefix: &str, group: &str) -> ExpandResult<Vec<String>> {
    check_brackets(group)?;
    resolve(group_tokens(prefix, group)?)
}

fn resolve(mut tokens: Vec<Token>) -> ExpandResult<Vec<String>> {
    let mut depth = 0usize;
    loop {
        let pending = tokens.iter().filter(|token| token.is_pending()).count();
        if pending == 0 {
            break;
        }
        debug!(
            "expand event=pass depth={} pending={} tokens={}",
            depth,
            pending,
            tokens.len()
        );
        let mut next = Vec::with_capacity(tokens.len() + pending);
        for token in tokens {
            match token {
                Token::Resolved(_) => next.push(token),
                Token::Pending(text) => next.extend(expand_term("", &text)?),
            }
        }
        tokens = next;
        depth += 1;
    }

    let names: Vec<String> = tokens
        .into_iter()
        .filter_map(|token| match token {
            Token::Resolved(name) => Some(name),
            Token::Pending(_) => None,
        })
        .collect();
    debug!("expand event=done depth={} tokens={}", depth, names.len());
    Ok(names)
}

fn expand_term(prefix: &str, term: &str) -> ExpandResult<Vec<Token>> {
    let (head, group) = split_prefix(term);
    if !group.is_empty() {
        return group_tokens(&format!("{prefix}{head}"), group);
    }
    if is_fully_expanded(&[term]) {
        return Ok(vec![Token::Resolved(format!("{prefix}{term}"))]);
    }
    // No group and not a plain literal: a bare `digits-digits` term.
    Ok(expand_range(term)?
        .into_iter()
        .map(|n| Token::Resolved(format!("{prefix}{n}")))
        .collect())
}

fn group_tokens(prefix: &str, group: &str) -> ExpandResult<Vec<Token>> {
    let (body, rest) = unwrap_group(group);
    let mut tokens = Vec::new();
    for element in split_terms(body) {
        if element.is_empty() {
            continue;
        }
        match classify(element) {
            Element::Literal(text) => {
                tokens.push(Token::from_text(format!("{prefix}{text}{rest}")));
            }
            Element::Range(text) => {
                for n in expand_range(text)? {
                    tokens.push(Token::from_text(format!("{prefix}{n}{rest}")));
                }
            }
            Element::Nested(text) => {
                tokens.push(Token::Pending(format!("{prefix}{text}{rest}")));
            }
        }
    }
    Ok(tokens)
}
