/// The command finished successfully.
pub const NO_ERROR: i32 = 0;

/// The command failed and printed the error to stderr.
pub const FATAL_ERROR: i32 = 1;
