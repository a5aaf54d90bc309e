//! Seams between the terminal logic and the OS.
//!
//! The real implementation lives in the OS glue (see [`Tty`]).  Tests
//! drive the same code with scripted fakes.
//!
//! [`Tty`]: struct.Tty.html

use std::io::{Result, Write};

/// Source of input bytes with a bounded wait
pub trait ByteSource {
    /// Read a single byte.  Returns `Ok(None)` if nothing arrived
    /// before the read timeout expired (or the read would block, or
    /// was interrupted by a signal).  Any other failure is an error.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

/// A terminal that can be written to, read from and asked its size
pub trait Console: ByteSource + Write {
    /// Ask the OS for the window size: (rows, columns).  Either value
    /// may be zero if the terminal doesn't know.
    fn window_size(&self) -> Result<(u16, u16)>;
}

/// Access to the terminal attributes, as used by [`RawMode`].
///
/// Implementations are cheap handles onto the device, so that a copy
/// can be kept by the panic hook.
///
/// [`RawMode`]: struct.RawMode.html
pub trait TermAttrs: Clone + Send + Sync + 'static {
    fn get_attrs(&self) -> Result<libc::termios>;

    fn set_attrs(&self, attrs: &libc::termios) -> Result<()>;

    /// Write directly to the terminal, ignoring errors.  Used on
    /// failure paths where nothing better can be done.
    fn write_best_effort(&self, data: &[u8]);
}
