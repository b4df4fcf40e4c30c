//! Detection of currency-prefixed amounts embedded in plain text

use once_cell::sync::Lazy;
use regex::Regex;

/// A currency symbol immediately followed by digits, dots or a minus sign.
/// The symbol set is fixed; it is not configurable.
const AMOUNT_PATTERN: &str = "[$￥¥€£؋₩₱₾Т៛С̲৳₮ரூ₫₤₽₴Kƒ₲₦₵฿ΞŁÐ][-0-9.]+";

/// Compiled amount pattern. Compilation cannot fail for the constant above;
/// if it ever does, amount detection is disabled and text passes through
/// unmodified instead of aborting the transform.
static AMOUNT_REGEX: Lazy<Option<Regex>> = Lazy::new(|| match Regex::new(AMOUNT_PATTERN) {
    Ok(regex) => Some(regex),
    Err(err) => {
        log::error!("invalid amount pattern: {err}");
        None
    }
});

/// What a [`Split`] segment holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitKind {
    Text,
    Amount,
}

/// One segment of a text split around detected amounts. Concatenating the
/// `text` of all splits in order reproduces the input exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub text: String,
    pub kind: SplitKind,
}

/// Split `text` around currency-prefixed amounts.
///
/// Returns an empty vector when no amount is present; callers then use the
/// text unmodified. When there is at least one match, the gap before each
/// match is emitted even when empty, the match itself follows, and the
/// remainder after the last match is emitted only when non-empty.
pub fn split_amounts(text: &str) -> Vec<Split> {
    let Some(regex) = AMOUNT_REGEX.as_ref() else {
        return Vec::new();
    };

    let mut splits = Vec::new();
    let mut start = 0;
    for found in regex.find_iter(text) {
        splits.push(Split {
            text: text[start..found.start()].to_string(),
            kind: SplitKind::Text,
        });
        splits.push(Split {
            text: found.as_str().to_string(),
            kind: SplitKind::Amount,
        });
        start = found.end();
    }

    if splits.is_empty() {
        return splits;
    }

    if start < text.len() {
        splits.push(Split {
            text: text[start..].to_string(),
            kind: SplitKind::Text,
        });
    }

    splits
}

/// Numeric value of a detected amount with the currency symbol stripped.
/// Values that fail to parse count as zero, so callers only ever distinguish
/// positive from non-positive.
pub fn amount_value(amount: &str) -> f64 {
    let mut chars = amount.trim().chars();
    chars.next();
    chars.as_str().parse().unwrap_or(0.0)
}
