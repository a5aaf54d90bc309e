//! Find out how big the terminal is.
//!
//! The OS is asked first.  Not every terminal or pty reports a size
//! that way, so the fallback moves the cursor as far right and down
//! as it will go and asks the terminal where it ended up.

use crate::console::Console;
use crate::error::{ProbeError, TermError};

/// Visible terminal size in character cells.  Both values are
/// positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub rows: i32,
    pub cols: i32,
}

/// How to establish the terminal size
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ProbeMode {
    /// Ask the OS, falling back to a cursor position report
    #[default]
    Auto,
    /// Always use the cursor position report
    CursorReport,
}

// Cursor report replies are short.  The final byte of this buffer is
// never filled, matching a 32-byte C string buffer.
const REPLY_MAX: usize = 31;

/// Determine the terminal size
pub fn probe<C: Console + ?Sized>(
    console: &mut C,
    mode: ProbeMode,
) -> Result<ScreenGeometry, TermError> {
    if mode == ProbeMode::Auto {
        match console.window_size() {
            Ok((rows, cols)) if rows != 0 && cols != 0 => {
                let geometry = ScreenGeometry {
                    rows: i32::from(rows),
                    cols: i32::from(cols),
                };
                tracing::debug!(?geometry, "window size from ioctl");
                return Ok(geometry);
            }
            Ok((rows, cols)) => tracing::debug!(rows, cols, "ioctl reported zero size, probing"),
            Err(e) => tracing::debug!(error = %e, "ioctl failed, probing"),
        }
    }
    let geometry = query_cursor_position(console)?;
    tracing::debug!(?geometry, "window size from cursor report");
    Ok(geometry)
}

fn query_cursor_position<C: Console + ?Sized>(
    console: &mut C,
) -> Result<ScreenGeometry, ProbeError> {
    console
        .write_all(b"\x1B[999C\x1B[999B\x1B[6n")
        .and_then(|_| console.flush())
        .map_err(ProbeError::Write)?;

    let mut reply = Vec::with_capacity(REPLY_MAX);
    while reply.len() < REPLY_MAX {
        match console.read_byte().map_err(ProbeError::Read)? {
            None | Some(b'R') => break,
            Some(b) => reply.push(b),
        }
    }

    let (rows, cols) = parse_cursor_report(&reply)?;
    Ok(ScreenGeometry { rows, cols })
}

/// Parse a cursor position report `ESC [ rows ; cols`, with or without
/// the terminating `R`.  Anything after the second number is ignored.
pub fn parse_cursor_report(reply: &[u8]) -> Result<(i32, i32), ProbeError> {
    let body = reply
        .strip_prefix(b"\x1B[")
        .ok_or_else(|| ProbeError::bad_report(reply))?;
    let (rows, rest) = leading_num(body).ok_or_else(|| ProbeError::bad_report(reply))?;
    let rest = rest
        .strip_prefix(b";")
        .ok_or_else(|| ProbeError::bad_report(reply))?;
    let (cols, _) = leading_num(rest).ok_or_else(|| ProbeError::bad_report(reply))?;
    if rows <= 0 || cols <= 0 {
        return Err(ProbeError::ZeroSize);
    }
    Ok((rows, cols))
}

// Split off a run of leading decimal digits
fn leading_num(data: &[u8]) -> Option<(i32, &[u8])> {
    let len = data.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    let num = std::str::from_utf8(&data[..len]).ok()?.parse().ok()?;
    Some((num, &data[len..]))
}
