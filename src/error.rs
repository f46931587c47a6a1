//! Error types and reporting for node-list expansion.
//!
//! Expansion either returns every token or a single `ExpandError`. The error
//! carries its kind, a human-readable message, an optional hint and, when it
//! is known, the byte position in the expression that caused it.

use std::fmt;

/// Categorized error types for better diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A range bound is missing or is not a non-negative integer
    MalformedRange,
    /// A range whose lower bound is above its upper bound
    InvertedRange,
    /// A `[` without its `]`, or the other way round
    UnbalancedBracket,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::MalformedRange => write!(f, "Malformed range"),
            ErrorKind::InvertedRange => write!(f, "Inverted range"),
            ErrorKind::UnbalancedBracket => write!(f, "Unbalanced bracket"),
        }
    }
}

/// Rich error type with context information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandError {
    pub kind: ErrorKind,
    pub message: String,
    /// Hint about the expected syntax
    pub context: Option<String>,
    /// Byte position in the expression where the error occurred
    pub position: Option<usize>,
}

impl ExpandError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ExpandError {
            kind,
            message: message.into(),
            context: None,
            position: None,
        }
    }

    /// Add a hint (e.g., "Ranges look like 01-10")
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_position(mut self, pos: usize) -> Self {
        self.position = Some(pos);
        self
    }

    /// Format error with a snippet of the expression pointing at the problem
    pub fn display_with_input(&self, input: &str) -> String {
        let mut msg = format!("{}: {}", self.kind, self.message);

        match self.position {
            Some(pos) if pos < input.len() && input.is_char_boundary(pos) => {
                let start = floor_boundary(input, pos.saturating_sub(15));
                let end = floor_boundary(input, (pos + 15).min(input.len()));
                let snippet = &input[start..end];

                msg.push_str(&format!("\n  near: '{}'", snippet));
                msg.push('\n');

                let offset = input[start..pos].chars().count();
                msg.push_str(&format!("{}^", " ".repeat(offset + 9)));
            }
            Some(pos) => {
                msg.push_str(&format!("\n  at position {} (end of input)", pos));
            }
            None => {
                if let Some(context) = &self.context {
                    msg.push_str(&format!("\n  hint: {}", context));
                }
            }
        }

        msg
    }

    /// Simplified display without input context
    pub fn display_simple(&self) -> String {
        let mut msg = format!("{}: {}", self.kind, self.message);
        if let Some(context) = &self.context {
            msg.push_str(&format!("\n  hint: {}", context));
        }
        msg
    }
}

fn floor_boundary(input: &str, mut idx: usize) -> usize {
    while idx > 0 && !input.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_simple())
    }
}

impl std::error::Error for ExpandError {}

impl From<ExpandError> for String {
    fn from(err: ExpandError) -> Self {
        err.display_simple()
    }
}

/// Convenience type alias for Results with ExpandError
pub type ExpandResult<T> = Result<T, ExpandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_display_includes_hint() {
        let err = ExpandError::new(ErrorKind::MalformedRange, "bad bound 'aa' in 01-aa")
            .with_context("Ranges look like 01-10");
        assert_eq!(
            err.display_simple(),
            "Malformed range: bad bound 'aa' in 01-aa\n  hint: Ranges look like 01-10"
        );
        assert_eq!(err.to_string(), err.display_simple());
    }

    #[test]
    fn caret_points_at_position() {
        let err = ExpandError::new(ErrorKind::UnbalancedBracket, "unmatched '['").with_position(1);
        let shown = err.display_with_input("n[01-02");
        let lines: Vec<&str> = shown.lines().collect();
        assert_eq!(lines[0], "Unbalanced bracket: unmatched '['");
        assert_eq!(lines[1], "  near: 'n[01-02'");
        // "  near: '" is 9 columns wide; the caret sits under byte 1.
        assert_eq!(lines[2], format!("{}^", " ".repeat(10)));
    }

    #[test]
    fn position_past_end_is_reported() {
        let err = ExpandError::new(ErrorKind::UnbalancedBracket, "unmatched '['").with_position(9);
        assert!(err.display_with_input("n[").contains("at position 9 (end of input)"));
    }

    #[test]
    fn converts_into_string() {
        let err = ExpandError::new(ErrorKind::InvertedRange, "range 5-3 runs backwards");
        let msg: String = err.into();
        assert_eq!(msg, "Inverted range: range 5-3 runs backwards");
    }
}
