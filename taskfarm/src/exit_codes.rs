//! Stable exit codes for taskfarm commands.

/// Command completed. Soft task refusals still count as completion.
pub const OK: i32 = 0;
/// Invalid config, missing credentials, failed authentication or any other error.
pub const INVALID: i32 = 1;
/// A task run stopped part-way on a transport failure.
pub const ABORTED: i32 = 2;
