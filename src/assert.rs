//! Assertions that fail with an expected/got block.
//!
//! Every assertion panics on failure, which ends the current test
//! immediately. Inside a [`Group`](crate::Group) the host reports that test as
//! failed and continues with its siblings.
//!
//! ```text
//! Expected:
//! +	4
//!
//! Got:
//! -	3
//! ```
//!
//! Values are rendered with their alternate [`Debug`] output, so structs span
//! several decorated lines. For a line based diff of large values use
//! `pretty_assertions::assert_eq!` instead.

use std::fmt::{Debug, Write};

/// Assert that `value` is `true`.
#[track_caller]
pub fn assert_true(value: bool) {
    if !value {
        fail(decorate_diff(&true, &value));
    }
}

/// Assert that `value` is `false`.
#[track_caller]
pub fn assert_false(value: bool) {
    if value {
        fail(decorate_diff(&false, &value));
    }
}

/// Assert that `value` is `None`.
#[track_caller]
pub fn assert_none<T: Debug>(value: &Option<T>) {
    if value.is_some() {
        fail(decorate_diff(&None::<T>, value));
    }
}

/// Assert that `result` is `Ok`.
#[track_caller]
pub fn assert_ok<T, E: Debug>(result: &Result<T, E>) {
    if let Err(err) = result {
        fail(decorate_diff(&Label("Ok(..)"), err));
    }
}

/// Assert that `result` is `Err`.
#[track_caller]
pub fn assert_err<T: Debug, E>(result: &Result<T, E>) {
    if let Ok(value) = result {
        fail(decorate_diff(&Label("Err(..)"), value));
    }
}

/// Assert that `actual` equals `expected`.
#[track_caller]
pub fn assert_equal<E, A>(expected: E, actual: A)
where
    E: Debug + PartialEq<A>,
    A: Debug,
{
    if expected != actual {
        fail(decorate_diff(&expected, &actual));
    }
}

/// Render `expected` and `actual` as two labeled blocks.
pub fn decorate_diff(expected: &dyn Debug, actual: &dyn Debug) -> String {
    let mut diff = decorate_block("Expected", &format!("{expected:#?}"), "+");
    diff.push_str(&decorate_block("Got", &format!("{actual:#?}"), "-"));
    diff
}

/// Render `content` below `label`, each line prefixed with `decoration`.
///
/// A single trailing newline of `content` does not produce an empty line.
pub fn decorate_block(label: &str, content: &str, decoration: &str) -> String {
    let content = content.strip_suffix('\n').unwrap_or(content);

    let mut block = format!("\n{label}:\n");
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            block.push('\n');
        }
        let _ = write!(block, "{decoration}\t{line}");
    }
    block.push('\n');
    block
}

#[track_caller]
fn fail(message: String) -> ! {
    panic!("{message}")
}

// Debug prints the text as is.
struct Label(&'static str);

impl Debug for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
