//! Verbosity-gated logging for the analysis pipeline.
//!
//! Nothing is formatted when the configured verbosity is below a macro's level.
//! Levels:
//! - 0: SILENT (warnings only)
//! - 1: STAGES (one summary line per pipeline stage)
//! - 2: DETAILS (per-vertex dates, ranks and slack)
//! - 3: DEBUG (traversal internals, path enumeration branches)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_STAGES: u8 = 1;
pub const VERBOSITY_DETAILS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at STAGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_stages {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_STAGES {
            eprintln!("[cpm] {}", format_args!($($arg)*));
        }
    };
}

/// Log at DETAILS level (verbosity >= 2).
#[macro_export]
macro_rules! log_details {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DETAILS {
            eprintln!("[cpm]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[cpm]     {}", format_args!($($arg)*));
        }
    };
}

/// Warnings are printed at every verbosity, including SILENT.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        eprintln!("[cpm] warning: {}", format_args!($($arg)*));
    };
}
