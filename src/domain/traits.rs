use super::ExecError;
use std::fmt::Debug;

/// Runs a command line and hands back what it printed.
///
/// The listing pipeline only depends on this seam, so it can be driven with
/// canned output in tests instead of a real container runtime.
pub trait CommandExecutor: Send + Sync + Debug {
    /// Executes `args[0]` with the remaining arguments and returns captured
    /// stdout. A non-zero exit is reported as [`ExecError::NonZeroExit`].
    fn execute(&self, args: &[String]) -> Result<String, ExecError>;
}
