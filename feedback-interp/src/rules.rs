//! Deterministic local rewrite rules
//!
//! Rules run in a fixed order on the current text: simplify, then soften, then
//! case support. Soften's prefix and case support's suffix therefore wrap whatever
//! simplify already produced.

use crate::options::FeedbackOptions;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Prepended when `soften` is set
pub const SOFTEN_PREFIX: &str = "Consider the following suggestion:\n\n";

/// Appended when `case_support` is set
pub const CASE_SUPPORT_SUFFIX: &str =
    "\n\n• You may want to include a specific example to support this point.";

/// Output when the rewritten text is empty or blank
pub const NO_INPUT_PLACEHOLDER: &str = "(No input provided)";

/// Case-insensitive substitutions for `simplify`, applied in order
static SIMPLIFICATIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [("(?i)utilize", "use"), ("(?i)demonstrate", "show")]
        .into_iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
        .collect()
});

/// Replace every case-insensitive "utilize" with "use", then "demonstrate" with "show"
///
/// Matches are not restricted to whole words, so inflected forms such as
/// "utilizes" become "uses".
pub fn simplify(text: &str) -> String {
    SIMPLIFICATIONS
        .iter()
        .fold(text.to_string(), |current, (pattern, replacement)| {
            pattern
                .replace_all(&current, NoExpand(replacement))
                .into_owned()
        })
}

/// Apply every rule enabled in `options` to `text`
///
/// # Example
///
/// ```
/// use feedback_interp::{FeedbackOptions, apply_rules};
///
/// let output = apply_rules("Good job", FeedbackOptions::new().with_case_support(true));
/// assert_eq!(
///     output,
///     "Good job\n\n• You may want to include a specific example to support this point."
/// );
/// ```
pub fn apply_rules(text: &str, options: FeedbackOptions) -> String {
    let mut output = if options.simplify {
        simplify(text)
    } else {
        text.to_string()
    };

    if options.soften {
        output.insert_str(0, SOFTEN_PREFIX);
    }

    if options.case_support {
        output.push_str(CASE_SUPPORT_SUFFIX);
    }

    // Soften and case support never leave the text blank, so this only
    // triggers when the input itself was blank
    if output.trim().is_empty() {
        return NO_INPUT_PLACEHOLDER.to_string();
    }

    output
}
