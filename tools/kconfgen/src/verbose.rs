//! Console diagnostics for kconfgen.
//!
//! Generators run inside larger build orchestration, so output is kept
//! terse by default. Three levels are selected from the CLI flags:
//! - **Quiet** (`-q`): warnings and errors only
//! - **Default** (no flag): one summary line per written file
//! - **Verbose** (`-v`): per-input read counts, template lookups, timings
//!
//! Warnings go to stderr at every level so a build log always shows which
//! candidate inputs were skipped.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// Output verbosity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Default = 1,
    Verbose = 2,
}

impl Verbosity {
    /// Map the `-q` / `-v` flag pair to a level. Quiet wins if both are set.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Default,
        }
    }

    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Quiet,
            2 => Self::Verbose,
            _ => Self::Default,
        }
    }
}

static LEVEL: AtomicU8 = AtomicU8::new(Verbosity::Default as u8);

/// Set the process verbosity. Called once from `main` before any command runs.
pub fn init(quiet: bool, verbose: bool) {
    LEVEL.store(Verbosity::from_flags(quiet, verbose) as u8, Ordering::Relaxed);
}

/// Current verbosity level.
pub fn level() -> Verbosity {
    Verbosity::from_raw(LEVEL.load(Ordering::Relaxed))
}

/// Returns `true` if verbose mode is active.
pub fn is_verbose() -> bool {
    level() == Verbosity::Verbose
}

/// Returns `true` if quiet mode is active.
pub fn is_quiet() -> bool {
    level() == Verbosity::Quiet
}

/// `println!` that only fires with `-v`.
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            println!($($arg)*);
        }
    };
}

pub(crate) use vprintln;

/// `println!` that is silenced by `-q`.
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            println!($($arg)*);
        }
    };
}

pub(crate) use dprintln;

/// Warning on stderr, shown at every verbosity level.
macro_rules! wprintln {
    ($($arg:tt)*) => {
        eprintln!($($arg)*)
    };
}

pub(crate) use wprintln;

/// Reports how long a generator step took when it goes out of scope (`-v` only).
///
/// ```ignore
/// let _t = Timer::start("translate");
/// // prints "  translate: 120.0µs" on drop
/// ```
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Begin timing a labeled operation.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        vprintln!("  {}: {:.1?}", self.label, self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Default);
    }

    #[test]
    fn unknown_raw_level_is_default() {
        assert_eq!(Verbosity::from_raw(7), Verbosity::Default);
        assert_eq!(Verbosity::from_raw(Verbosity::Verbose as u8), Verbosity::Verbose);
    }
}
