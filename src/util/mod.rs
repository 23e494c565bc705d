//! Small utilities: subprocess execution.

pub mod exec;

pub use exec::{ExecError, ExecOutput, ExecRequest, ExecService};
