//! CLI Exit Code Registry
//!
//! Single source of truth for `mfst` exit codes. Exit codes are part
//! of the shell contract: scripts gate on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | Usage error (bad args)                           |
//! | 3    | Invalid job config (parse/validation)            |
//! | 4    | Runtime error (file read, CSV/JSON parse)        |
//! | 5    | Compare run found differences or one-sided rows  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Job config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Runtime failure while loading rows or writing output.
pub const EXIT_RUNTIME: u8 = 4;

/// Compare run completed but the rosters disagree.
pub const EXIT_DIFFERENCES: u8 = 5;
