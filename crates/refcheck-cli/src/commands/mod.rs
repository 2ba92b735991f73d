pub mod check;
pub mod dispatch;
pub mod refs;

/// How a command ended, for the process exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A determination was reached (valid, mismatch, not found, or a report).
    Determined,
    /// The lookup could not be completed.
    LookupFailed,
}
