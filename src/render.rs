//! Compose a whole frame and send it in one go.

use crate::document::Document;
use crate::editor::CursorPosition;
use crate::geometry::ScreenGeometry;
use crate::termout::TermOut;
use std::io::{Result, Write};

/// Shown on empty rows
pub const ROW_MARKER: u8 = b'~';

/// Banner centered on the last row when the document doesn't use it
pub fn banner() -> String {
    format!("Tilde editor -- version {}", env!("CARGO_PKG_VERSION"))
}

/// Build one frame into a fresh buffer and flush it to `w`
pub fn render_frame<W: Write + ?Sized>(
    w: &mut W,
    geometry: ScreenGeometry,
    cursor: CursorPosition,
    doc: &dyn Document,
) -> Result<()> {
    let mut to = TermOut::new();
    to.hide_cursor();
    to.origin();
    draw_rows(&mut to, geometry, doc);
    to.to(cursor.y, cursor.x);
    to.show_cursor();
    to.flush_to(w)
}

fn draw_rows(to: &mut TermOut, geometry: ScreenGeometry, doc: &dyn Document) {
    let cols = geometry.cols.max(0) as usize;
    let last = geometry.rows - 1;
    for y in 0..geometry.rows {
        match doc.row(y) {
            Some(text) => to.out(&text[..text.len().min(cols)]),
            None if y == last => draw_banner(to, cols),
            None => to.out1(ROW_MARKER),
        }
        to.erase_eol();
        if y < last {
            to.newline();
        }
    }
}

fn draw_banner(to: &mut TermOut, cols: usize) {
    let banner = banner();
    let msg = &banner.as_bytes()[..banner.len().min(cols)];
    let mut padding = (cols - msg.len()) / 2;
    if padding > 0 {
        to.out1(ROW_MARKER);
        padding -= 1;
    }
    for _ in 0..padding {
        to.out1(b' ');
    }
    to.out(msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Placeholder;

    #[derive(Default)]
    struct Recorder(Vec<Vec<u8>>);

    impl Write for Recorder {
        fn write(&mut self, buf: &[u8]) -> Result<usize> {
            self.0.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn frame(rows: i32, cols: i32, x: i32, y: i32, doc: &dyn Document) -> Vec<u8> {
        let mut rec = Recorder::default();
        let geometry = ScreenGeometry { rows, cols };
        render_frame(&mut rec, geometry, CursorPosition { x, y }, doc).unwrap();
        assert_eq!(rec.0.len(), 1, "frame must go out in one write");
        rec.0.remove(0)
    }

    fn centered(cols: usize) -> Vec<u8> {
        let b = banner();
        let pad = (cols - b.len()) / 2;
        let mut v = vec![b'~'];
        v.extend(std::iter::repeat(b' ').take(pad - 1));
        v.extend_from_slice(b.as_bytes());
        v
    }

    #[test]
    fn placeholder_frame() {
        let mut expected = b"\x1B[?25l\x1B[H~\x1B[K\r\n~\x1B[K\r\n".to_vec();
        expected.extend(centered(80));
        expected.extend_from_slice(b"\x1B[K\x1B[1;1H\x1B[?25h");
        assert_eq!(frame(3, 80, 0, 0, &Placeholder), expected);
    }

    #[test]
    fn cursor_is_one_based() {
        let out = frame(2, 80, 9, 1, &Placeholder);
        assert!(out.ends_with(b"\x1B[2;10H\x1B[?25h"));
    }

    #[test]
    fn banner_is_truncated() {
        let out = frame(1, 10, 0, 0, &Placeholder);
        let b = banner();
        let mut expected = b"\x1B[?25l\x1B[H".to_vec();
        expected.extend_from_slice(&b.as_bytes()[..10]);
        expected.extend_from_slice(b"\x1B[K\x1B[1;1H\x1B[?25h");
        assert_eq!(out, expected);
    }

    #[test]
    fn one_column_of_padding_is_just_the_marker() {
        let cols = banner().len() + 3;
        let out = frame(1, cols as i32, 0, 0, &Placeholder);
        let mut expected = b"\x1B[?25l\x1B[H~".to_vec();
        expected.extend_from_slice(banner().as_bytes());
        expected.extend_from_slice(b"\x1B[K");
        assert!(out.starts_with(&expected));
    }

    struct Lines(Vec<&'static [u8]>);

    impl Document for Lines {
        fn row(&self, y: i32) -> Option<&[u8]> {
            self.0.get(y as usize).copied()
        }
    }

    #[test]
    fn document_rows_replace_placeholders() {
        let doc = Lines(vec![&b"hello"[..], &b"a much longer line than fits"[..]]);
        let out = frame(3, 8, 0, 0, &doc);
        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with("\x1B[?25l\x1B[Hhello\x1B[K\r\na much l\x1B[K\r\n"));
        // Last row is empty in the document, so the banner goes there
        let b = banner();
        assert!(text.contains(&format!("\x1B[K\r\n{}\x1B[K", &b[..8])));
    }
}
