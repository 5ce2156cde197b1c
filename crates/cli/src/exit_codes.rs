//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Row-level lookup failures never change the exit code: a run that writes
//! its report exits 0 even if every compound was "not found".
//!
//! | Code | Description                                        |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (HTTP client could not be built)     |
//! | 2    | Usage error (no input path given)                  |
//! | 3    | Input spreadsheet could not be read                |
//! | 4    | Report could not be written or restyled            |
//! | 5    | Settings file missing, unparsable or invalid       |

/// Success - report written.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, empty input path.
pub const EXIT_USAGE: u8 = 2;

/// Input spreadsheet missing, unreadable, or without sheets.
pub const EXIT_INPUT_READ: u8 = 3;

/// Either save of the output report failed.
pub const EXIT_OUTPUT_WRITE: u8 = 4;

/// Settings could not be loaded or failed validation.
pub const EXIT_CONFIG: u8 = 5;
