use crate::console::ByteSource;
use crate::error::TermError;

const ESC: u8 = 0x1B;

/// A logical keypress decoded from terminal input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any byte that isn't a control character, passed through as-is
    Char(u8),
    /// Control byte (0x00 to 0x1F except ESC), e.g. `Ctrl(0x11)` for
    /// Ctrl-Q.  See [`Key::ctrl`].
    Ctrl(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
    /// Escape pressed on its own, or an escape sequence that wasn't
    /// recognised
    Escape,
}

impl Key {
    /// The key generated by holding Ctrl with the given letter.  The
    /// terminal strips the top three bits of the letter.
    pub const fn ctrl(letter: u8) -> Key {
        Key::Ctrl(letter & 0x1F)
    }

    fn from_byte(b: u8) -> Key {
        if b < 0x20 {
            Key::Ctrl(b)
        } else {
            Key::Char(b)
        }
    }
}

/// Reads input bytes and turns them into [`Key`] values, one key per
/// call.
///
/// An ESC byte is ambiguous: it may be the Escape key, or the start
/// of a sequence sent by a navigation key.  The decoder tries to read
/// the rest of a sequence with the source's short read timeout, and
/// if nothing follows it reports a plain [`Key::Escape`].
pub struct KeyDecoder<'a, S: ByteSource + ?Sized> {
    src: &'a mut S,
}

impl<'a, S: ByteSource + ?Sized> KeyDecoder<'a, S> {
    pub fn new(src: &'a mut S) -> Self {
        Self { src }
    }

    /// Block until a key arrives.  Read timeouts are retried.
    pub fn read_key(&mut self) -> Result<Key, TermError> {
        loop {
            if let Some(key) = self.poll_key()? {
                return Ok(key);
            }
        }
    }

    /// Wait at most one read timeout for a key.  Returns `None` if no
    /// input arrived in that time.
    pub fn poll_key(&mut self) -> Result<Option<Key>, TermError> {
        let b = match self.src.read_byte().map_err(TermError::Read)? {
            None => return Ok(None),
            Some(b) => b,
        };
        let key = if b == ESC {
            self.decode_escape()
        } else {
            Key::from_byte(b)
        };
        tracing::trace!(?key, "key");
        Ok(Some(key))
    }

    // Any failure to get a follow-up byte means the user pressed
    // Escape on its own
    fn next(&mut self) -> Option<u8> {
        self.src.read_byte().ok().flatten()
    }

    fn decode_escape(&mut self) -> Key {
        let Some(b1) = self.next() else {
            return Key::Escape;
        };
        let Some(b2) = self.next() else {
            return Key::Escape;
        };
        let key = match (b1, b2) {
            (b'[', b'0'..=b'9') => match self.next() {
                Some(b'~') => match b2 {
                    b'1' | b'7' => Key::Home,
                    b'3' => Key::Delete,
                    b'4' | b'8' => Key::End,
                    b'5' => Key::PageUp,
                    b'6' => Key::PageDown,
                    _ => Key::Escape,
                },
                _ => Key::Escape,
            },
            (b'[', b'A') => Key::ArrowUp,
            (b'[', b'B') => Key::ArrowDown,
            (b'[', b'C') => Key::ArrowRight,
            (b'[', b'D') => Key::ArrowLeft,
            (b'[', b'H') | (b'O', b'H') => Key::Home,
            (b'[', b'F') | (b'O', b'F') => Key::End,
            _ => Key::Escape,
        };
        if key == Key::Escape {
            let seq = [b1, b2];
            tracing::debug!(seq = %seq.escape_ascii(), "unrecognised escape sequence");
        }
        key
    }
}
