//! Programmatic corrections used by [`Replacement::Transform`] rules
//!
//! [`Replacement::Transform`]: super::Replacement::Transform

use std::ops::Range;

/// Lowercase the matched span, leaving the rest of the line untouched
///
/// The span comes from the original line. If earlier corrections moved text
/// so that it no longer falls on character boundaries of `line`, the line is
/// returned unchanged.
#[must_use]
pub fn to_lowercase(line: &str, span: Range<usize>) -> String {
    let Some(matched) = line.get(span.clone()) else {
        return line.to_string();
    };

    let mut out = String::with_capacity(line.len());
    out.push_str(&line[..span.start]);
    out.push_str(&matched.to_lowercase());
    out.push_str(&line[span.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_span_only() {
        assert_eq!(to_lowercase("REAL :: X\n", 0..7), "real :: X\n");
    }

    #[test]
    fn test_lowercase_middle_span() {
        assert_eq!(to_lowercase("a INTEGER b", 2..9), "a integer b");
    }

    #[test]
    fn test_out_of_range_span_is_noop() {
        assert_eq!(to_lowercase("REAL", 2..10), "REAL");
    }

    #[test]
    fn test_non_boundary_span_is_noop() {
        // 'é' is two bytes; 1..2 splits it
        assert_eq!(to_lowercase("éA", 1..2), "éA");
    }
}
