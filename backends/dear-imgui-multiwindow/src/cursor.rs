//! Mouse cursor shapes, per-window cursor sets and the cursor-change cache
//!
//! The OS cursor is only touched when the shape requested by the GUI runtime
//! differs from the one applied on the previous frame.

use tracing::{trace, warn};

use crate::platform::{Platform, PlatformWindow};

/// Logical cursor shapes requested by the GUI runtime
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CursorShape {
    Arrow,
    TextInput,
    ResizeAll,
    ResizeNS,
    ResizeEW,
    ResizeNESW,
    ResizeNWSE,
    Hand,
    Wait,
    Progress,
    NotAllowed,
}

impl CursorShape {
    /// Number of shapes; `NotAllowed` must stay the last variant
    pub const COUNT: usize = CursorShape::NotAllowed as usize + 1;

    pub const ALL: [CursorShape; Self::COUNT] = [
        CursorShape::Arrow,
        CursorShape::TextInput,
        CursorShape::ResizeAll,
        CursorShape::ResizeNS,
        CursorShape::ResizeEW,
        CursorShape::ResizeNESW,
        CursorShape::ResizeNWSE,
        CursorShape::Hand,
        CursorShape::Wait,
        CursorShape::Progress,
        CursorShape::NotAllowed,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Native cursors of one window, one slot per [`CursorShape`]
///
/// A slot is empty when the toolkit cannot build that shape on the host.
pub struct CursorSet<C> {
    cursors: [Option<C>; CursorShape::COUNT],
}

impl<C> CursorSet<C> {
    /// Build every shape through `create`
    pub fn load(mut create: impl FnMut(CursorShape) -> Option<C>) -> Self {
        let cursors = CursorShape::ALL.map(|shape| {
            let cursor = create(shape);
            if cursor.is_none() {
                warn!("Cursor shape {:?} is not available on this platform", shape);
            }
            cursor
        });
        Self { cursors }
    }

    pub fn get(&self, shape: CursorShape) -> Option<&C> {
        self.cursors[shape.index()].as_ref()
    }

    /// The requested shape, falling back to the arrow cursor
    pub fn get_or_arrow(&self, shape: CursorShape) -> Option<&C> {
        self.get(shape).or_else(|| self.get(CursorShape::Arrow))
    }

    /// Shapes that have a native cursor
    pub fn available(&self) -> impl Iterator<Item = CursorShape> + '_ {
        CursorShape::ALL
            .into_iter()
            .filter(|shape| self.cursors[shape.index()].is_some())
    }
}

impl<C> Default for CursorSet<C> {
    fn default() -> Self {
        Self {
            cursors: std::array::from_fn(|_| None),
        }
    }
}

/// Cursor state applied to the window on the last frame
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CursorSettings {
    /// `None` when the runtime requested a hidden cursor
    pub cursor: Option<CursorShape>,
    pub draw_cursor: bool,
}

impl CursorSettings {
    /// Apply cursor settings to the window
    pub fn apply<P: Platform>(&self, platform: &P, window: &P::Window, cursors: &CursorSet<P::Cursor>) {
        trace!("Applying cursor {:?}", self);
        match self.cursor {
            Some(shape) if !self.draw_cursor => {
                window.set_mouse_cursor_visible(true);
                if let Some(cursor) = cursors.get_or_arrow(shape) {
                    platform.set_mouse_cursor(window, cursor);
                }
            }
            _ => window.set_mouse_cursor_visible(false),
        }
    }
}
