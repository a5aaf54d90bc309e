//! Notice termination signals so the terminal can be cleaned up
//! before exiting.  Raw mode turns off ISIG, so these only arrive
//! from outside (`kill`, a closing window, etc).

use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::SigId;
use std::io::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const WATCHED: [libc::c_int; 4] = [SIGTERM, SIGHUP, SIGINT, SIGQUIT];

/// Source of a pending shutdown request
pub trait ShutdownCheck {
    /// The signal that asked for shutdown, if any
    fn pending(&self) -> Option<libc::c_int>;
}

/// Flags set from signal handlers for each watched signal
pub struct ShutdownSignals {
    flags: Vec<(libc::c_int, Arc<AtomicBool>, SigId)>,
}

impl ShutdownSignals {
    pub fn register() -> Result<Self> {
        let mut this = Self { flags: Vec::new() };
        for &sig in &WATCHED {
            let flag = Arc::new(AtomicBool::new(false));
            // On failure `this` is dropped, unregistering the others
            let id = signal_hook::flag::register(sig, flag.clone())?;
            this.flags.push((sig, flag, id));
        }
        Ok(this)
    }
}

impl ShutdownCheck for ShutdownSignals {
    fn pending(&self) -> Option<libc::c_int> {
        self.flags
            .iter()
            .find(|(_, flag, _)| flag.load(Ordering::SeqCst))
            .map(|(sig, _, _)| *sig)
    }
}

impl Drop for ShutdownSignals {
    fn drop(&mut self) {
        for (_, _, id) in self.flags.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

/// Never requests shutdown
pub struct NoSignals;

impl ShutdownCheck for NoSignals {
    fn pending(&self) -> Option<libc::c_int> {
        None
    }
}
