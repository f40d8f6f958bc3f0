use crate::formatter::GroupFormatter;

/// A formatter that produces no output.
///
/// Useful when the caller only looks at the [`TestReport`](crate::report::TestReport)
/// or integrates the host into another system that handles its own reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoFormatter;

impl GroupFormatter for NoFormatter {
    type Error = ();
}
