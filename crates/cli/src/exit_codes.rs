//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract; automation relies on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 2    | Usage error (bad args, unreadable/invalid config)   |
//! | 3    | No usable input files                               |
//! | 4    | Ledger (MBR) columns could not be resolved          |
//! | 5    | Nothing to compare (ledger or operational data missing) |
//! | 6    | Runtime failure (read/write/render)                 |

/// Usage error - bad arguments, unreadable or invalid configuration.
pub const EXIT_USAGE: u8 = 2;

/// No input files were given, or none could be read.
pub const EXIT_NO_INPUT: u8 = 3;

/// The ledger file is present but its required columns cannot be resolved.
pub const EXIT_LEDGER_COLUMNS: u8 = 4;

/// Early termination: no ledger file or no operational data detected.
pub const EXIT_NOTHING_TO_COMPARE: u8 = 5;

/// Read, write, or render failure at run time.
pub const EXIT_RUNTIME: u8 = 6;
