//! GUI runtime contract
//!
//! A runtime hands out one [`GuiContext`] per window. Only one context is
//! active at a time; the registry activates a context before touching its
//! I/O block and suspends it before activating another.

use bitflags::bitflags;

use crate::cursor::CursorShape;
use crate::draw::{DrawData, TextureId};
use crate::input::{Key, MouseButton};

bitflags! {
    /// Configuration flags
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ConfigFlags: u32 {
        /// Master keyboard navigation enable flag.
        const NAV_ENABLE_KEYBOARD = 1 << 0;
        /// Master gamepad navigation enable flag.
        const NAV_ENABLE_GAMEPAD = 1 << 1;
        /// Instruct the runtime to clear mouse position/buttons every frame.
        const NO_MOUSE = 1 << 4;
        /// Instruct the platform layer to not alter mouse cursor shape and visibility.
        const NO_MOUSE_CURSOR_CHANGE = 1 << 5;
        /// Application is SRGB-aware.
        const IS_SRGB = 1 << 20;
        /// Application is using a touch screen instead of a mouse.
        const IS_TOUCH_SCREEN = 1 << 21;
    }
}

bitflags! {
    /// Backend capabilities
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BackendFlags: u32 {
        /// Backend supports gamepad and currently has one connected
        const HAS_GAMEPAD = 1 << 0;
        /// Backend supports honoring the requested cursor shape
        const HAS_MOUSE_CURSORS = 1 << 1;
        /// Backend supports `want_set_mouse_pos` requests to reposition the OS mouse
        const HAS_SET_MOUSE_POS = 1 << 2;
        /// Renderer honors `DrawCmdParams::vtx_offset`
        const RENDERER_HAS_VTX_OFFSET = 1 << 3;
    }
}

/// Trait for clipboard backends
pub trait ClipboardBackend: 'static {
    /// Returns the current clipboard contents, or None if the clipboard is
    /// empty or inaccessible
    fn get(&mut self) -> Option<String>;
    /// Sets the clipboard contents to the given string slice.
    fn set(&mut self, value: &str);
}

/// RGBA8 pixels of a built font atlas
#[derive(Debug)]
pub struct FontAtlasImage<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

/// Creates GUI contexts
pub trait GuiRuntime {
    type Context: GuiContext;

    /// Create a new, suspended context
    fn create_context(&mut self) -> Result<Self::Context, String>;
}

/// One GUI runtime instance
///
/// Every method other than [`activate`](GuiContext::activate) may assume the
/// context is the runtime's active one. Dropping the context destroys it.
pub trait GuiContext {
    /// Make this the runtime's active context
    fn activate(&mut self);

    /// Stop being the runtime's active context
    fn suspend(&mut self);

    fn set_platform_name(&mut self, name: &str);
    fn backend_flags(&self) -> BackendFlags;
    fn set_backend_flags(&mut self, flags: BackendFlags);
    fn config_flags(&self) -> ConfigFlags;
    fn set_clipboard_backend(&mut self, backend: Box<dyn ClipboardBackend>);

    fn display_size(&self) -> [f32; 2];
    fn set_display_size(&mut self, size: [f32; 2]);
    fn set_delta_time(&mut self, delta_time: f32);

    fn mouse_pos(&self) -> [f32; 2];
    fn set_mouse_pos(&mut self, pos: [f32; 2]);
    fn set_mouse_down(&mut self, button: MouseButton, down: bool);
    /// The runtime asks the platform to move the OS cursor to `mouse_pos`
    fn want_set_mouse_pos(&self) -> bool;
    fn want_text_input(&self) -> bool;
    /// The runtime draws its own software cursor
    fn mouse_draw_cursor(&self) -> bool;
    /// Requested cursor shape, `None` to hide the cursor
    fn mouse_cursor(&self) -> Option<CursorShape>;
    fn key_shift(&self) -> bool;

    fn add_mouse_pos_event(&mut self, pos: [f32; 2]);
    fn add_mouse_button_event(&mut self, button: MouseButton, down: bool);
    fn add_mouse_wheel_event(&mut self, wheel: [f32; 2]);
    fn add_key_event(&mut self, key: Key, down: bool);
    fn add_key_analog_event(&mut self, key: Key, down: bool, value: f32);
    fn add_input_character(&mut self, character: char);
    fn add_focus_event(&mut self, focused: bool);

    /// Whether the font atlas holds at least one font
    fn has_fonts(&self) -> bool;
    /// Build the font atlas and return its pixels
    fn font_atlas_rgba32(&mut self) -> FontAtlasImage<'_>;
    fn set_font_texture_id(&mut self, id: Option<TextureId>);

    /// Begin a frame; the I/O block must be fully populated
    fn new_frame(&mut self);
    /// End the frame and produce its draw lists
    fn render(&mut self) -> &DrawData;
}
