//! Scripted stand-in for a real terminal

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use tilde::{ByteSource, Console, TermAttrs};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Byte(u8),
    Timeout,
}

pub struct Inner {
    pub input: VecDeque<Input>,
    pub writes: Vec<Vec<u8>>,
    pub size: (u16, u16),
    pub attrs: libc::termios,
    pub attr_writes: usize,
}

/// Cheap handle; clones share the same state, like FDs onto one tty
#[derive(Clone)]
pub struct FakeTerminal(pub Arc<Mutex<Inner>>);

impl FakeTerminal {
    pub fn new(rows: u16, cols: u16) -> Self {
        let mut attrs: libc::termios = unsafe { std::mem::zeroed() };
        attrs.c_iflag = libc::ICRNL | libc::IXON;
        attrs.c_oflag = libc::OPOST;
        attrs.c_lflag = libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN;
        attrs.c_cc[libc::VMIN] = 1;
        Self(Arc::new(Mutex::new(Inner {
            input: VecDeque::new(),
            writes: Vec::new(),
            size: (rows, cols),
            attrs,
            attr_writes: 0,
        })))
    }

    /// Queue keypress bytes
    pub fn type_bytes(&self, data: &[u8]) -> &Self {
        self.0.lock().unwrap().input.extend(data.iter().map(|&b| Input::Byte(b)));
        self
    }

    /// Queue a read that returns nothing
    pub fn pause(&self) -> &Self {
        self.0.lock().unwrap().input.push_back(Input::Timeout);
        self
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.0.lock().unwrap().writes.clone()
    }

    pub fn output(&self) -> Vec<u8> {
        self.writes().concat()
    }

    pub fn attrs(&self) -> libc::termios {
        self.0.lock().unwrap().attrs
    }

    pub fn pending_input(&self) -> usize {
        self.0.lock().unwrap().input.len()
    }
}

impl ByteSource for FakeTerminal {
    /// Once the script runs out the read fails, so a test that
    /// forgets to quit ends instead of spinning
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.0.lock().unwrap().input.pop_front() {
            Some(Input::Byte(b)) => Ok(Some(b)),
            Some(Input::Timeout) => Ok(None),
            None => Err(io::Error::from_raw_os_error(libc::EIO)),
        }
    }
}

impl io::Write for FakeTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().writes.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Console for FakeTerminal {
    fn window_size(&self) -> io::Result<(u16, u16)> {
        Ok(self.0.lock().unwrap().size)
    }
}

impl TermAttrs for FakeTerminal {
    fn get_attrs(&self) -> io::Result<libc::termios> {
        Ok(self.attrs())
    }

    fn set_attrs(&self, attrs: &libc::termios) -> io::Result<()> {
        let mut inner = self.0.lock().unwrap();
        inner.attrs = *attrs;
        inner.attr_writes += 1;
        Ok(())
    }

    fn write_best_effort(&self, data: &[u8]) {
        self.0.lock().unwrap().writes.push(data.to_vec());
    }
}

/// Occurrences of `needle` in `hay`
pub fn count(hay: &[u8], needle: &[u8]) -> usize {
    hay.windows(needle.len()).filter(|w| *w == needle).count()
}
