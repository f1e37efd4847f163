//! Windowing toolkit contract
//!
//! The registry never owns windows. It identifies them by [`WindowId`] and
//! polls devices and builds native resources through [`Platform`].

use crate::cursor::CursorShape;
use crate::draw::TextureId;
use crate::gamepad::JoystickAxis;
use crate::input::MouseButton;
use crate::runtime::ClipboardBackend;

/// Native window handle, used only for identity comparison
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl From<u64> for WindowId {
    fn from(handle: u64) -> Self {
        Self(handle)
    }
}

/// A native window as seen by the platform layer
pub trait PlatformWindow {
    fn id(&self) -> WindowId;

    fn has_focus(&self) -> bool;

    /// Client area size in pixels
    fn size(&self) -> [u32; 2];

    /// Mouse position relative to the client area
    fn mouse_position(&self) -> [i32; 2];

    /// Position of `finger` relative to the client area
    fn touch_position(&self, finger: u32) -> [i32; 2];

    fn set_mouse_cursor_visible(&self, visible: bool);
}

/// A texture living on the graphics device
pub trait NativeTexture {
    /// Identifier the draw commands use to refer to this texture
    fn texture_id(&self) -> TextureId;
}

/// Device polling and native resource creation
pub trait Platform {
    type Window: PlatformWindow;
    type Cursor;
    type Texture: NativeTexture;

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;

    /// Moves the OS mouse cursor, `position` relative to the current window
    fn set_mouse_position(&self, position: [i32; 2]);

    fn is_touch_down(&self, finger: u32) -> bool;

    fn is_joystick_connected(&self, joystick: u32) -> bool;

    fn is_joystick_button_pressed(&self, joystick: u32, button: u32) -> bool;

    /// Axis position in `[-100, 100]`
    fn joystick_axis_position(&self, joystick: u32, axis: JoystickAxis) -> f32;

    /// Build a native cursor, `None` if the shape is unsupported on this host
    fn create_cursor(&self, shape: CursorShape) -> Option<Self::Cursor>;

    fn set_mouse_cursor(&self, window: &Self::Window, cursor: &Self::Cursor);

    /// Upload tightly packed RGBA8 pixels
    fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> Result<Self::Texture, String>;

    /// Clipboard handed to every new GUI context
    fn clipboard(&self) -> Option<Box<dyn ClipboardBackend>> {
        None
    }

    /// Show or hide the on-screen keyboard, where the host has one
    fn set_virtual_keyboard_visible(&self, _visible: bool) {}
}
