use crate::key::Key;

/// The editing component that sits on top of the terminal front end.
///
/// It supplies the text shown on each screen row, and receives every
/// key that navigation and quit handling don't consume.  The default
/// methods give an empty document that ignores input.
pub trait Document {
    /// Text for screen row `y`, or `None` if the document has nothing
    /// there.  Rows are truncated to the screen width when drawn.
    fn row(&self, _y: i32) -> Option<&[u8]> {
        None
    }

    /// Handle a key not consumed by the cursor model
    fn handle_key(&mut self, _key: Key) {}
}

/// Empty document: every row shows the placeholder marker
#[derive(Clone, Copy, Debug, Default)]
pub struct Placeholder;

impl Document for Placeholder {}
