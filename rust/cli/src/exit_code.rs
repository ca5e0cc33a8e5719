//! Exit code constants for the CLI application.
//!
//! Every subcommand maps its result onto one of these.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code, also used when `check` rejects a word.
pub const ERROR: i32 = 2;

/// The player quit before the match ended.
pub const INTERRUPTED: i32 = 130;
