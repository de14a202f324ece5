//! Ctrl-C handling during status lookup
//!
//! By default SIGINT kills the process mid-prompt and leaves the shell with no
//! output at all. While a [`InterruptGuard`] is alive, SIGINT only sets a flag;
//! the providers check it after every subprocess and bail out with an
//! interrupted error, and the caller falls back to the bare path line.
//!
//! signal-hook never restores a signal's default disposition once an action
//! has been registered, so a process-wide fallback action performs the
//! default SIGINT behavior (terminate) whenever no guard is alive.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(unix)]
use std::sync::OnceLock;

#[cfg(unix)]
use signal_hook::consts::SIGINT;

/// Set while no guard is alive; SIGINT then terminates the process.
///
/// `None` if the fallback action couldn't be registered.
#[cfg(unix)]
static UNGUARDED: OnceLock<Option<Arc<AtomicBool>>> = OnceLock::new();

#[cfg(unix)]
fn unguarded() -> Option<&'static Arc<AtomicBool>> {
    UNGUARDED
        .get_or_init(|| {
            let unguarded = Arc::new(AtomicBool::new(true));
            let registered =
                signal_hook::flag::register_conditional_default(SIGINT, Arc::clone(&unguarded));
            match registered {
                Ok(_) => Some(unguarded),
                Err(e) => {
                    log::debug!("Failed to register default SIGINT action: {e}");
                    None
                }
            }
        })
        .as_ref()
}

/// Scoped SIGINT capture.
///
/// The handler is registered on construction and removed on drop, after which
/// SIGINT terminates the process again.
#[derive(Debug)]
pub struct InterruptGuard {
    flag: Arc<AtomicBool>,
    #[cfg(unix)]
    id: Option<signal_hook::SigId>,
}

impl InterruptGuard {
    /// Start capturing SIGINT into a flag.
    ///
    /// Registration failure is logged and otherwise ignored: the lookup still
    /// runs, it just can't be interrupted gracefully.
    pub fn install() -> Self {
        let flag = Arc::new(AtomicBool::new(false));

        #[cfg(unix)]
        {
            // Without the fallback action, capturing SIGINT would leave it
            // ignored after the guard is dropped.
            let Some(unguarded) = unguarded() else {
                return Self { flag, id: None };
            };

            let id = match signal_hook::flag::register(SIGINT, Arc::clone(&flag)) {
                Ok(id) => {
                    unguarded.store(false, Ordering::SeqCst);
                    Some(id)
                }
                Err(e) => {
                    log::debug!("Failed to register SIGINT handler: {e}");
                    None
                }
            };
            Self { flag, id }
        }

        #[cfg(not(unix))]
        Self { flag }
    }

    /// A guard that never reports an interrupt (used by tests and embedders).
    pub fn inert() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            #[cfg(unix)]
            id: None,
        }
    }

    /// Whether SIGINT arrived since the guard was installed.
    pub fn interrupted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Mark the lookup as interrupted without a signal.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Some(id) = self.id.take() {
            signal_hook::low_level::unregister(id);
            if let Some(unguarded) = unguarded() {
                unguarded.store(true, Ordering::SeqCst);
            }
        }
    }
}
