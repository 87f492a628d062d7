//! Bundler warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times
//! when a reference shows up in many assets. Used by the parsers, the asset
//! graph and the command line to report recoverable problems.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Warnings printed so far, in emission order, plus a set for deduplication.
struct Ledger {
    seen: HashSet<String>,
    order: Vec<String>,
}

static WARNED: Mutex<Option<Ledger>> = Mutex::new(None);

static QUIET: AtomicBool = AtomicBool::new(false);

/// Report a recoverable problem (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("JS", "bare specifier \"lodash\" left unresolved");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let fresh = {
        let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
        let ledger = guard.get_or_insert_with(|| Ledger {
            seen: HashSet::new(),
            order: Vec::new(),
        });
        let fresh = ledger.seen.insert(key.clone());
        if fresh {
            ledger.order.push(key);
        }
        fresh
    };

    if fresh && !QUIET.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[pak {component}] warning: {message}").yellow());
    }
}

/// Suppress (or restore) terminal output. Warnings are still recorded.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Every warning recorded since the last [`clear_warnings`], formatted as
/// `[component] message`.
#[must_use]
pub fn emitted_warnings() -> Vec<String> {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|ledger| ledger.order.clone())
        .unwrap_or_default()
}

/// Clear all recorded warnings (call when starting a new build).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(ledger) = guard.as_mut() {
        ledger.seen.clear();
        ledger.order.clear();
    }
}
