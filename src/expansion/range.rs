use crate::error::{ErrorKind, ExpandError, ExpandResult};
use crate::parse::RANGE_SEPARATOR;

/// Enumerate `low-high` inclusively. Every member is zero-padded to the
/// longer of the two bounds as written, so `05-07` keeps its width and `0-2`
/// stays unpadded.
pub fn expand_range(token: &str) -> ExpandResult<Vec<String>> {
    let Some((low_text, high_text)) = token.split_once(RANGE_SEPARATOR) else {
        return Err(malformed(token, "expected two bounds joined by '-'"));
    };
    let low = parse_bound(token, low_text)?;
    let high = parse_bound(token, high_text)?;
    if low > high {
        return Err(ExpandError::new(
            ErrorKind::InvertedRange,
            format!("range {token} runs backwards"),
        )
        .with_context("Write the lower bound first: 03-07"));
    }

    let width = low_text.len().max(high_text.len());
    Ok((low..=high).map(|n| format!("{n:0width$}")).collect())
}

fn parse_bound(token: &str, bound: &str) -> ExpandResult<u64> {
    if bound.is_empty() || !bound.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(token, &format!("bound '{bound}' is not a number")));
    }
    bound
        .parse::<u64>()
        .map_err(|err| malformed(token, &format!("bound '{bound}' is too large: {err}")))
}

fn malformed(token: &str, reason: &str) -> ExpandError {
    ExpandError::new(ErrorKind::MalformedRange, format!("{reason} in {token}"))
        .with_context("Ranges look like 01-10")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn expand_padded_and_plain() {
        assert_eq!(expand_range("01-02").unwrap(), vec!["01", "02"]);
        assert_eq!(expand_range("0-2").unwrap(), vec!["0", "1", "2"]);
        assert_eq!(expand_range("05-07").unwrap(), vec!["05", "06", "07"]);
    }

    #[test]
    fn width_follows_longer_bound() {
        assert_eq!(expand_range("8-10").unwrap(), vec!["08", "09", "10"]);
        assert_eq!(expand_range("098-100").unwrap(), vec!["098", "099", "100"]);
        assert_eq!(expand_range("7-7").unwrap(), vec!["7"]);
    }

    #[test]
    fn malformed_bounds() {
        for token in ["01-aa", "aa-01", "-3", "3-", "12", "1-2-3", "+1-2", " 1-2"] {
            let err = expand_range(token).unwrap_err();
            assert_eq!(err.kind, ErrorKind::MalformedRange, "token {token:?}");
        }
        let err = expand_range("0-99999999999999999999999").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedRange);
    }

    #[test]
    fn inverted_bounds() {
        let err = expand_range("07-05").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvertedRange);
        assert_eq!(err.message, "range 07-05 runs backwards");
    }

    proptest! {
        #[test]
        fn members_are_consecutive_and_padded(low in 0u64..5000, span in 0u64..40, width in 1usize..6) {
            let high = low + span;
            let token = format!("{low:0width$}-{high:0width$}");
            let members = expand_range(&token).unwrap();
            prop_assert_eq!(members.len() as u64, span + 1);
            let expected_width = width.max(high.to_string().len());
            for (offset, member) in members.iter().enumerate() {
                prop_assert_eq!(member.len(), expected_width);
                prop_assert_eq!(member.parse::<u64>().unwrap(), low + offset as u64);
            }
        }
    }
}
