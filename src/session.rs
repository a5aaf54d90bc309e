use crate::console::{Console, TermAttrs};
use crate::document::{Document, Placeholder};
use crate::editor::{EditorState, Flow};
use crate::error::TermError;
use crate::geometry::{probe, ProbeMode, ScreenGeometry};
use crate::key::KeyDecoder;
use crate::render::render_frame;
use crate::signals::ShutdownCheck;
use crate::terminal::{RawMode, CLEAR_AND_HOME};
use crate::termout::TermOut;
use std::io::Write;

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    /// The user pressed the quit key
    Quit,
    /// A termination signal arrived
    Signal(libc::c_int),
}

impl Exit {
    /// Process exit status: 0 for quit, 128 + N for signal N
    pub fn status(self) -> u8 {
        match self {
            Exit::Quit => 0,
            Exit::Signal(sig) => (128 + sig).clamp(0, 255) as u8,
        }
    }
}

/// Take over the terminal: raw mode, sizing, then a session until
/// quit or signal.
///
/// Whatever goes wrong after raw mode is entered, the screen is
/// cleared and the saved mode put back before the error is returned.
pub fn run_terminal<T>(
    tty: T,
    mode: ProbeMode,
    signals: &dyn ShutdownCheck,
) -> Result<Exit, TermError>
where
    T: Console + TermAttrs,
{
    let mut raw = RawMode::enter(tty.clone())?;
    raw.install_panic_hook();

    let mut console = tty.clone();
    let result = probe(&mut console, mode).and_then(|geometry| {
        tracing::info!(rows = geometry.rows, cols = geometry.cols, "screen size");
        Session::new(console, geometry).run(signals)
    });
    match result {
        Ok(exit) => {
            raw.restore()?;
            Ok(exit)
        }
        Err(e) => {
            tty.write_best_effort(CLEAR_AND_HOME);
            drop(raw);
            Err(e)
        }
    }
}

/// Turn the outcome of [`run_terminal`] into a process exit status.
/// A fatal error is logged and reported on `err` as `tilde: <error>`,
/// giving status 1.
pub fn finish<W: Write>(result: Result<Exit, TermError>, err: &mut W) -> u8 {
    match result {
        Ok(exit) => exit.status(),
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            let _ = writeln!(err, "tilde: {}", e);
            1
        }
    }
}

/// The control loop: draw a frame, wait for a key, act on it.
///
/// The terminal must already be in raw mode.  Restoring it afterwards
/// is up to the caller (see [`RawMode`]).
///
/// [`RawMode`]: struct.RawMode.html
pub struct Session<C: Console, D: Document = Placeholder> {
    console: C,
    state: EditorState,
    doc: D,
}

impl<C: Console> Session<C> {
    pub fn new(console: C, geometry: ScreenGeometry) -> Self {
        Self::with_document(console, geometry, Placeholder)
    }
}

impl<C: Console, D: Document> Session<C, D> {
    pub fn with_document(console: C, geometry: ScreenGeometry, doc: D) -> Self {
        Self {
            console,
            state: EditorState::new(geometry),
            doc,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Draw the current frame
    pub fn refresh_screen(&mut self) -> Result<(), TermError> {
        let EditorState { geometry, cursor } = self.state;
        render_frame(&mut self.console, geometry, cursor, &self.doc).map_err(TermError::Write)
    }

    /// Wait up to one read timeout for a key and act on it.  Returns
    /// `None` if no key arrived.
    pub fn process_keypress(&mut self) -> Result<Option<Flow>, TermError> {
        let key = match KeyDecoder::new(&mut self.console).poll_key()? {
            None => return Ok(None),
            Some(key) => key,
        };
        let flow = self.state.dispatch(key);
        if let Flow::Forward(key) = flow {
            self.doc.handle_key(key);
        }
        Ok(Some(flow))
    }

    /// Run until the user quits or a shutdown signal arrives.  The
    /// screen is cleared on the way out.
    pub fn run(&mut self, signals: &dyn ShutdownCheck) -> Result<Exit, TermError> {
        let exit = 'frames: loop {
            self.refresh_screen()?;
            loop {
                if let Some(sig) = signals.pending() {
                    tracing::info!(signal = sig, "shutdown signal");
                    break 'frames Exit::Signal(sig);
                }
                match self.process_keypress()? {
                    None => continue,
                    Some(Flow::Quit) => break 'frames Exit::Quit,
                    Some(_) => continue 'frames,
                }
            }
        };
        self.clear_screen()?;
        tracing::info!(?exit, "session ended");
        Ok(exit)
    }

    fn clear_screen(&mut self) -> Result<(), TermError> {
        let mut to = TermOut::new();
        to.clear_screen();
        to.origin();
        to.flush_to(&mut self.console).map_err(TermError::Write)
    }
}
