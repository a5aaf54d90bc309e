//! Talk to the terminal through the stdin/stdout FDs with plain
//! blocking calls.  Reads return promptly because raw mode sets a
//! 0.1s read timeout (VMIN=0, VTIME=1).  Output is written straight
//! to the stdout FD, so this will block the whole thread if the TTY
//! is in XOFF.

use crate::console::{ByteSource, Console, TermAttrs};
use libc::{c_int, c_ushort, c_void, ioctl, size_t, TIOCGWINSZ};
use std::io::{Error, Result, Write};
use std::mem;

#[repr(C)]
#[derive(Default)]
#[allow(dead_code)]
struct WinSize {
    row: c_ushort,
    col: c_ushort,
    xpixel: c_ushort,
    ypixel: c_ushort,
}

const STDIN_FD: c_int = 0;
const STDOUT_FD: c_int = 1;

/// Handle onto the controlling terminal via stdin and stdout
#[derive(Clone, Copy, Debug)]
pub struct Tty {
    fd_in: c_int,
    fd_out: c_int,
}

impl Tty {
    /// Use the process's standard input and output
    pub fn stdio() -> Self {
        Self {
            fd_in: STDIN_FD,
            fd_out: STDOUT_FD,
        }
    }

    fn write_aux(fd: c_int, data: &[u8]) -> Result<usize> {
        let cnt = unsafe { libc::write(fd, data.as_ptr() as *const c_void, data.len() as size_t) };
        if cnt < 0 {
            return Err(Error::last_os_error());
        }
        Ok(cnt as usize)
    }
}

impl ByteSource for Tty {
    #[allow(unreachable_patterns)]
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = 0u8;
        let cnt = unsafe { libc::read(self.fd_in, &mut byte as *mut u8 as *mut c_void, 1) };
        if cnt < 0 {
            return match errno::errno().0 {
                libc::EWOULDBLOCK | libc::EAGAIN | libc::EINTR => Ok(None),
                _ => Err(Error::last_os_error()),
            };
        }
        Ok(if cnt == 1 { Some(byte) } else { None })
    }
}

impl Write for Tty {
    /// One `write` call; may accept fewer bytes than offered
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        Self::write_aux(self.fd_out, buf)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Console for Tty {
    fn window_size(&self) -> Result<(u16, u16)> {
        let mut ws = WinSize::default();
        match unsafe { ioctl(self.fd_out, TIOCGWINSZ, &mut ws as *mut WinSize) } {
            -1 => Err(Error::last_os_error()),
            _ => Ok((ws.row, ws.col)),
        }
    }
}

impl TermAttrs for Tty {
    fn get_attrs(&self) -> Result<libc::termios> {
        let mut tbuf = mem::MaybeUninit::uninit();
        if 0 > unsafe { libc::tcgetattr(self.fd_in, tbuf.as_mut_ptr()) } {
            return Err(Error::last_os_error());
        }
        Ok(unsafe { tbuf.assume_init() })
    }

    fn set_attrs(&self, attrs: &libc::termios) -> Result<()> {
        let attrs = attrs as *const libc::termios;
        if 0 > unsafe { libc::tcsetattr(self.fd_in, libc::TCSAFLUSH, attrs) } {
            return Err(Error::last_os_error());
        }
        Ok(())
    }

    fn write_best_effort(&self, mut data: &[u8]) {
        while !data.is_empty() {
            match Self::write_aux(self.fd_out, data) {
                Ok(0) | Err(_) => break,
                Ok(cnt) => data = &data[cnt..],
            }
        }
    }
}
