use crate::console::TermAttrs;
use crate::error::TermError;
use std::panic::PanicHookInfo;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sequence that leaves the screen blank with the cursor top-left
pub const CLEAR_AND_HOME: &[u8] = b"\x1B[2J\x1B[H";

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + 'static + Sync + Send>;

/// Guard holding the terminal in raw mode
///
/// [`RawMode::enter`] saves the current terminal attributes and
/// switches to raw mode.  The saved attributes are put back exactly
/// once, by whichever of these happens first: a call to
/// [`RawMode::restore`], the guard being dropped (including on early
/// returns and unwinding), or the panic hook installed by
/// [`RawMode::install_panic_hook`].
///
/// # Panic handling
///
/// When Rust panics, the terminal must be restored to its normal
/// state otherwise things would be left in a bad state for the user
/// (in cooked mode with no echo, requiring the user to blindly type
/// `reset` on the command-line).  So the hook saves a copy of the
/// current panic handler (using `std::panic::take_hook`), and then
/// installs its own handler that does terminal cleanup before calling
/// on to the saved panic handler.  This means that if any custom
/// panic handler is needed by the application, then it must be set
/// up before the call to [`RawMode::install_panic_hook`].
pub struct RawMode<A: TermAttrs> {
    attrs: A,
    saved: libc::termios,
    restored: Arc<AtomicBool>,
    prev_hook: Option<Arc<PanicHook>>,
}

impl<A: TermAttrs> RawMode<A> {
    /// Save the terminal attributes and switch to raw mode.  On
    /// failure the screen is cleared before the error is returned.
    pub fn enter(attrs: A) -> Result<Self, TermError> {
        let saved = match attrs.get_attrs() {
            Ok(saved) => saved,
            Err(e) => {
                attrs.write_best_effort(CLEAR_AND_HOME);
                return Err(TermError::AttributeRead(e));
            }
        };

        // From here on, dropping the guard restores `saved`
        let this = Self {
            attrs,
            saved,
            restored: Arc::new(AtomicBool::new(false)),
            prev_hook: None,
        };

        if let Err(e) = this.attrs.set_attrs(&make_raw(&saved)) {
            // tcsetattr may have applied part of the change, so put
            // back what we can.  The guard then has nothing left to do.
            this.restored.store(true, Ordering::SeqCst);
            let _ = this.attrs.set_attrs(&saved);
            this.attrs.write_best_effort(CLEAR_AND_HOME);
            return Err(TermError::AttributeWrite(e));
        }
        tracing::debug!("entered raw mode");
        Ok(this)
    }

    /// Chain a panic hook that clears the screen and restores the
    /// saved attributes before running the previous hook
    pub fn install_panic_hook(&mut self) {
        if self.prev_hook.is_some() {
            return;
        }
        let prev: Arc<PanicHook> = Arc::new(std::panic::take_hook());
        let hook_prev = prev.clone();
        let attrs = self.attrs.clone();
        let saved = self.saved;
        let restored = self.restored.clone();
        std::panic::set_hook(Box::new(move |info| {
            if !restored.swap(true, Ordering::SeqCst) {
                attrs.write_best_effort(CLEAR_AND_HOME);
                let _ = attrs.set_attrs(&saved);
            }
            hook_prev(info);
        }));
        self.prev_hook = Some(prev);
    }

    /// Put back the saved attributes.  If that fails the terminal is
    /// unusable: the screen is cleared and the error returned.
    pub fn restore(mut self) -> Result<(), TermError> {
        self.restore_aux()
    }

    fn restore_aux(&mut self) -> Result<(), TermError> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if let Err(e) = self.attrs.set_attrs(&self.saved) {
            self.attrs.write_best_effort(CLEAR_AND_HOME);
            return Err(TermError::AttributeWrite(e));
        }
        tracing::debug!("restored terminal mode");
        Ok(())
    }
}

impl<A: TermAttrs> Drop for RawMode<A> {
    fn drop(&mut self) {
        if let Some(prev) = self.prev_hook.take() {
            // Discard our hook and put the previous one back
            let _ = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| prev(info)));
        }
        if let Err(e) = self.restore_aux() {
            tracing::error!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// Raw-mode version of the given attributes: no input translation or
/// flow control, no output post-processing, 8-bit characters, no echo,
/// no line editing, no signal keys.  Reads return after at most 0.1s
/// even with no input.
pub fn make_raw(orig: &libc::termios) -> libc::termios {
    let mut raw = *orig;
    raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag |= libc::CS8;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    raw.c_cc[libc::VMIN] = 0;
    raw.c_cc[libc::VTIME] = 1;
    raw
}
