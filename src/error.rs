//! Fatal error taxonomy for terminal control.
//!
//! Nothing here is recoverable: a terminal left in raw mode without a
//! usable size can't safely continue, so every variant ends the
//! program after the screen has been cleared and the original mode
//! restored.  The `Display` form names the failing operation followed
//! by the OS error, which is what gets printed on the way out.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TermError {
    #[error("tcgetattr: {0}")]
    AttributeRead(#[source] io::Error),

    #[error("tcsetattr: {0}")]
    AttributeWrite(#[source] io::Error),

    #[error("getWindowSize: {0}")]
    GeometryProbe(#[from] ProbeError),

    #[error("read: {0}")]
    Read(#[source] io::Error),

    #[error("write: {0}")]
    Write(#[source] io::Error),

    #[error("signal registration: {0}")]
    Signals(#[source] io::Error),
}

/// Why the terminal size couldn't be established
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to send cursor position query: {0}")]
    Write(#[source] io::Error),

    #[error("failed to read cursor position report: {0}")]
    Read(#[source] io::Error),

    #[error("malformed cursor position report \"{0}\"")]
    BadReport(String),

    #[error("terminal reported a zero size")]
    ZeroSize,
}

impl ProbeError {
    pub(crate) fn bad_report(reply: &[u8]) -> Self {
        Self::BadReport(reply.escape_ascii().to_string())
    }
}
