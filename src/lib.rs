//! Raw-mode ANSI terminal front end for a screen-oriented editor
//!
//! This provides the terminal-facing half of a full-screen editor.
//! The text buffer itself is not here: a [`Document`] implementation
//! supplies the rows to show and receives the keys that aren't used
//! for navigation.
//!
//! ## Raw mode
//!
//! [`RawMode`] switches the terminal into byte-at-a-time input with
//! echo, line editing, signal keys and output post-processing turned
//! off, and with a short read timeout so input reads never block for
//! long.  It guarantees the original mode is put back whichever way
//! the program ends: normal exit, error return, or panic.
//!
//! ## Output buffering
//!
//! Each frame is gathered in a [`TermOut`] and sent with a single
//! write, to avoid tearing.
//!
//! ## Input decoding
//!
//! [`KeyDecoder`] turns input bytes into [`Key`] values, telling a
//! lone Escape press apart from the escape sequences sent by arrow
//! and navigation keys.
//!
//! ## Terminal size
//!
//! [`probe`] asks the OS for the window size, or if that doesn't work
//! moves the cursor to the bottom-right corner and asks the terminal
//! where it is.
//!
//! ## Running
//!
//! [`run_terminal`] wires these together for a whole run, and
//! [`finish`] turns the outcome into an exit status.  Any fatal error
//! leaves the screen cleared and the terminal mode restored before it
//! is reported.

#![deny(rust_2018_idioms)]

mod config;
mod console;
mod document;
mod editor;
mod error;
mod geometry;
mod key;
pub mod logging;
mod render;
mod session;
mod signals;
mod terminal;
mod termout;

pub use config::Config;
pub use console::{ByteSource, Console, TermAttrs};
pub use document::{Document, Placeholder};
pub use editor::{CursorPosition, EditorState, Flow, QUIT_KEY};
pub use error::{ProbeError, TermError};
pub use geometry::{parse_cursor_report, probe, ProbeMode, ScreenGeometry};
pub use key::{Key, KeyDecoder};
pub use render::{banner, render_frame, ROW_MARKER};
pub use session::{finish, run_terminal, Exit, Session};
pub use signals::{NoSignals, ShutdownCheck, ShutdownSignals};
pub use terminal::{make_raw, RawMode, CLEAR_AND_HOME};
pub use termout::TermOut;

#[cfg(unix)]
mod os_unix;
#[cfg(unix)]
pub use os_unix::Tty;

#[cfg(not(unix))]
std::compile_error!("OS interface not yet implemented on this platform");
