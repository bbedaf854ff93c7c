//! Process-wide load-verbosity toggle
//!
//! Verbosity is on unless `ATN_QUIET_LOAD` holds a truthy value. The value is
//! read lazily on first access, can be overridden with [`set_verbose_load`],
//! and [`reset_verbose_load`] forgets the cached value so the next read
//! consults the environment again. Components never read this directly; it
//! only seeds `LoadPreferences::default()`.

use super::runtime::env_vars;
use std::env;
use std::sync::atomic::{AtomicU8, Ordering};

const UNSET: u8 = 0;
const QUIET: u8 = 1;
const VERBOSE: u8 = 2;

static VERBOSE_LOAD: AtomicU8 = AtomicU8::new(UNSET);

fn encode(verbose: bool) -> u8 {
    if verbose {
        VERBOSE
    } else {
        QUIET
    }
}

/// Truthy spellings accepted for boolean environment variables
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn from_environment() -> bool {
    !env::var(env_vars::QUIET_LOAD)
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

/// Current load verbosity, initializing from the environment if needed
pub fn verbose_load() -> bool {
    match VERBOSE_LOAD.load(Ordering::Acquire) {
        QUIET => false,
        VERBOSE => true,
        _ => {
            let initial = encode(from_environment());
            // A concurrent set_verbose_load wins over the environment.
            match VERBOSE_LOAD.compare_exchange(UNSET, initial, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => initial == VERBOSE,
                Err(current) => current == VERBOSE,
            }
        }
    }
}

/// Override load verbosity for the rest of the process
pub fn set_verbose_load(verbose: bool) {
    VERBOSE_LOAD.store(encode(verbose), Ordering::Release);
}

/// Forget the cached value; intended for test harnesses
pub fn reset_verbose_load() {
    VERBOSE_LOAD.store(UNSET, Ordering::Release);
}
