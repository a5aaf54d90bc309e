use std::io::{Error, ErrorKind, Result, Write};
use std::mem;

/// Output buffer for the terminal
///
/// This just buffers byte data on the way to the terminal.  It allows
/// batching up a whole screen update into a single write, to try to
/// avoid tearing.  A fresh buffer is built for each frame and emptied
/// by [`TermOut::flush_to`].
///
/// Note that coordinates are passed as `i32` here, because that is
/// more convenient when relative offsets might be negative.
#[derive(Default)]
pub struct TermOut {
    buf: Vec<u8>,
    dropped: usize,
}

impl TermOut {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes buffered so far
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    /// Add a chunk of byte data to the output buffer.
    ///
    /// If the buffer can't grow to hold the chunk, the chunk is
    /// dropped and the existing contents are left untouched.
    ///
    /// See also the `Write` implementation, which allows use of
    /// `write!` to add data to the buffer.
    #[inline]
    pub fn out(&mut self, data: &[u8]) {
        if self.buf.try_reserve(data.len()).is_err() {
            self.dropped += data.len();
            return;
        }
        self.buf.extend_from_slice(data);
    }

    /// Add a single byte to the output buffer.
    pub fn out1(&mut self, v1: u8) {
        self.out(&[v1]);
    }

    /// Add a non-negative decimal number to the output buffer, as used
    /// in control sequences.  Negative numbers are output as 0.
    pub fn out_num(&mut self, v: i32) {
        let mut digits = [0u8; 10];
        let mut v = v.max(0) as u32;
        let mut i = digits.len();
        loop {
            i -= 1;
            digits[i] = (v % 10) as u8 + b'0';
            v /= 10;
            if v == 0 {
                break;
            }
        }
        self.out(&digits[i..]);
    }

    /// Add ANSI sequence to move cursor to the given coordinates.
    /// Note that coordinates are row-first, with (0,0) as top-left.
    pub fn to(&mut self, y: i32, x: i32) {
        self.out(b"\x1B[");
        self.out_num(y + 1);
        self.out1(b';');
        self.out_num(x + 1);
        self.out1(b'H');
    }

    /// Add ANSI sequence to show cursor
    pub fn show_cursor(&mut self) {
        self.out(b"\x1B[?25h");
    }

    /// Add ANSI sequence to hide cursor
    pub fn hide_cursor(&mut self) {
        self.out(b"\x1B[?25l");
    }

    /// Add ANSI sequence to move to origin (top-left)
    pub fn origin(&mut self) {
        self.out(b"\x1B[H");
    }

    /// Add ANSI sequence to erase the whole display
    pub fn clear_screen(&mut self) {
        self.out(b"\x1B[2J");
    }

    /// Add ANSI sequence to erase to end-of-line
    pub fn erase_eol(&mut self) {
        self.out(b"\x1B[K");
    }

    /// Add CR-LF.  Output post-processing is off in raw mode, so a
    /// bare LF would not return to column 0.
    pub fn newline(&mut self) {
        self.out(b"\r\n");
    }

    /// Send the whole buffer to `w` and release it.
    ///
    /// The data goes out in a single `write` call when the sink
    /// accepts it all, which it normally does for a terminal.  If the
    /// write comes up short, the rest follows in further calls.  The
    /// buffer is emptied whether or not the write succeeds.
    pub fn flush_to<W: Write + ?Sized>(&mut self, w: &mut W) -> Result<()> {
        let buf = mem::take(&mut self.buf);
        if self.dropped != 0 {
            tracing::warn!(dropped = self.dropped, "output buffer could not grow, frame truncated");
            self.dropped = 0;
        }
        let mut data = &buf[..];
        while !data.is_empty() {
            match w.write(data) {
                Ok(0) => return Err(Error::new(ErrorKind::WriteZero, "terminal accepted no data")),
                Ok(cnt) => data = &data[cnt..],
                Err(e) if e.kind() == ErrorKind::Interrupted => (),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl Write for TermOut {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.out(buf);
        Ok(buf.len())
    }

    /// Logically we consider the final destination of the Write trait
    /// to be the buffer.  So this `flush` call does nothing.  Use
    /// [`TermOut::flush_to`] to send a whole frame at once.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Sink recording each write call separately
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Vec<u8>>,
        max_chunk: Option<usize>,
    }

    impl Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> Result<usize> {
            let cnt = self.max_chunk.map_or(buf.len(), |m| m.min(buf.len()));
            self.calls.push(buf[..cnt].to_vec());
            Ok(cnt)
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn appends_are_flushed_in_one_write() {
        let mut to = TermOut::new();
        to.out(b"abc");
        to.out(b"\x1B[K");
        let mut rec = Recorder::default();
        to.flush_to(&mut rec).unwrap();
        assert_eq!(rec.calls, vec![b"abc\x1B[K".to_vec()]);
        assert!(to.data().is_empty());
    }

    #[test]
    fn empty_flush_writes_nothing() {
        let mut rec = Recorder::default();
        TermOut::new().flush_to(&mut rec).unwrap();
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn cursor_moves_are_one_based() {
        let mut to = TermOut::new();
        to.to(0, 0);
        to.to(23, 79);
        to.to(1199, 4000);
        assert_eq!(to.data(), b"\x1B[1;1H\x1B[24;80H\x1B[1200;4001H");
    }

    #[test]
    fn out_num_clamps_negative() {
        let mut to = TermOut::new();
        to.out_num(-5);
        to.out1(b' ');
        to.out_num(i32::MAX);
        assert_eq!(to.data(), b"0 2147483647");
    }

    #[test]
    fn write_macro_appends() {
        let mut to = TermOut::new();
        to.hide_cursor();
        write!(to, "{}x{}", 24, 80).unwrap();
        assert_eq!(to.data(), b"\x1B[?25l24x80");
    }

    #[test]
    fn zero_length_write_is_an_error() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> Result<usize> {
                Ok(0)
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
        }
        let mut to = TermOut::new();
        to.out(b"x");
        let err = to.flush_to(&mut Full).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteZero);
        assert!(to.data().is_empty());
    }

    proptest! {
        #[test]
        fn short_writes_deliver_everything(
            chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..8),
            max_chunk in 1usize..32,
        ) {
            let mut to = TermOut::new();
            let mut expected = Vec::new();
            for c in &chunks {
                to.out(c);
                expected.extend_from_slice(c);
            }
            let mut rec = Recorder { calls: Vec::new(), max_chunk: Some(max_chunk) };
            to.flush_to(&mut rec).unwrap();
            prop_assert_eq!(rec.calls.concat(), expected);
            prop_assert!(rec.calls.iter().all(|c| c.len() <= max_chunk));
        }
    }
}
