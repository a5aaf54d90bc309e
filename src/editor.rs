use crate::geometry::ScreenGeometry;
use crate::key::Key;

/// Cursor location on screen, 0-based.  `x` runs over `[0, cols]`
/// (one past the last column is reachable) and `y` over
/// `[0, rows-1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorPosition {
    pub x: i32,
    pub y: i32,
}

/// What the control loop should do after a key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Key consumed, carry on
    Continue,
    /// Key not used here; it belongs to the document
    Forward(Key),
    /// The user asked to quit
    Quit,
}

/// The key that ends the session
pub const QUIT_KEY: Key = Key::ctrl(b'q');

/// Screen size plus the cursor moving within it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorState {
    pub geometry: ScreenGeometry,
    pub cursor: CursorPosition,
}

impl EditorState {
    pub fn new(geometry: ScreenGeometry) -> Self {
        Self {
            geometry,
            cursor: CursorPosition::default(),
        }
    }

    /// Apply a key to the cursor
    pub fn dispatch(&mut self, key: Key) -> Flow {
        match key {
            QUIT_KEY => return Flow::Quit,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                self.move_cursor(key)
            }
            Key::Home => self.cursor.x = 0,
            Key::End => self.cursor.x = self.geometry.cols - 1,
            Key::PageUp | Key::PageDown => {
                let step = if key == Key::PageUp {
                    Key::ArrowUp
                } else {
                    Key::ArrowDown
                };
                for _ in 0..self.geometry.rows {
                    self.move_cursor(step);
                }
            }
            _ => return Flow::Forward(key),
        }
        Flow::Continue
    }

    fn move_cursor(&mut self, key: Key) {
        let ScreenGeometry { rows, cols } = self.geometry;
        let c = &mut self.cursor;
        match key {
            Key::ArrowLeft => c.x = (c.x - 1).clamp(0, cols),
            Key::ArrowRight => c.x = (c.x + 1).clamp(0, cols),
            Key::ArrowUp => c.y = (c.y - 1).clamp(0, rows - 1),
            Key::ArrowDown => c.y = (c.y + 1).clamp(0, rows - 1),
            _ => (),
        }
    }
}
