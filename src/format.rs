//! Fixed-width field formatting.
//!
//! Every field of a direct-entry record occupies an exact column span.
//! Values are first cut to the span width, keeping the leftmost characters,
//! then padded out to exactly that width with the span's fill character.

use log::debug;

/// Which side of the value receives the fill characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// Fill on the left, right-aligning the value.
    Left,
    /// Fill on the right, left-aligning the value.
    Right,
}

/// Handling of values longer than their field width.
///
/// The default mirrors how direct-entry producers have historically behaved:
/// oversized values are cut to the leftmost characters of the field and the
/// file is generated anyway. [`TruncationPolicy::Reject`] opts into strict
/// validation instead, failing the record with
/// [`InvalidFormat`](crate::AbaError::InvalidFormat).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Silently keep the leftmost characters that fit the field (default).
    #[default]
    Truncate,
    /// Leave the value untouched so format validation rejects oversized input.
    Reject,
}

impl TruncationPolicy {
    /// Applies the policy to one named field value.
    pub(crate) fn apply(self, field: &'static str, width: usize, value: &str) -> String {
        match self {
            TruncationPolicy::Reject => value.to_string(),
            TruncationPolicy::Truncate => {
                let chars = value.chars().count();
                if chars > width {
                    debug!("truncated {field} from {chars} to {width} characters");
                    truncate(value, width)
                } else {
                    value.to_string()
                }
            }
        }
    }
}

/// Cuts a value down to its leftmost `width` characters.
fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

/// Truncates `value` to `width` characters, then pads it to exactly `width`.
pub(crate) fn pad(value: &str, width: usize, pad_char: char, side: Side) -> String {
    let value = truncate(value, width);
    let fill = pad_char
        .to_string()
        .repeat(width - value.chars().count());
    match side {
        Side::Left => fill + &value,
        Side::Right => value + &fill,
    }
}

/// A run of `n` blank columns.
pub(crate) fn blanks(n: usize) -> String {
    " ".repeat(n)
}
