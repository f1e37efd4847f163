//! One GUI context bound to one native window

use std::collections::BTreeSet;

use tracing::debug;

use crate::cursor::{CursorSet, CursorSettings};
use crate::error::{PlatformError, PlatformResult};
use crate::gamepad::{GamepadConfig, first_connected_joystick};
use crate::input::Key;
use crate::platform::{NativeTexture, Platform, PlatformWindow, WindowId};
use crate::runtime::{BackendFlags, GuiContext};

/// Input state gathered between two frame updates
#[derive(Debug, Default)]
pub(crate) struct InputState {
    pub has_focus: bool,
    /// The mouse moved after the last touch; mouse position wins over touch position
    pub mouse_moved: bool,
    /// Latched presses for left, right and middle
    pub mouse_pressed: [bool; 3],
    /// Latched touches for fingers 0..3
    pub touch_down: [bool; 3],
    pub touch_pos: [i32; 2],
    pub held_keys: BTreeSet<Key>,
    /// Last value pushed to the on-screen keyboard
    pub want_text_input: bool,
}

/// GUI context, native resources and input state of a single window
///
/// Dropping it destroys the GUI context, the font texture and the cursors.
pub struct WindowContext<P: Platform, C: GuiContext> {
    pub(crate) window: WindowId,
    pub(crate) gui: C,
    pub(crate) font_texture: Option<P::Texture>,
    pub(crate) cursors: CursorSet<P::Cursor>,
    pub(crate) input: InputState,
    pub(crate) last_cursor: Option<CursorSettings>,
    pub(crate) joystick: Option<u32>,
    pub(crate) gamepad: GamepadConfig,
}

impl<P: Platform, C: GuiContext> WindowContext<P, C> {
    pub(crate) fn new(window: &P::Window, gui: C, platform: &P, gamepad: GamepadConfig) -> Self {
        Self {
            window: window.id(),
            gui,
            font_texture: None,
            cursors: CursorSet::load(|shape| platform.create_cursor(shape)),
            input: InputState {
                has_focus: window.has_focus(),
                ..InputState::default()
            },
            last_cursor: None,
            joystick: first_connected_joystick(platform),
            gamepad,
        }
    }

    /// Fill the I/O block of a freshly activated context
    pub(crate) fn configure(&mut self, platform: &P, display_size: [f32; 2]) {
        let mut flags = self.gui.backend_flags()
            | BackendFlags::HAS_MOUSE_CURSORS
            | BackendFlags::HAS_SET_MOUSE_POS;
        flags.set(BackendFlags::HAS_GAMEPAD, self.joystick.is_some());
        self.gui.set_backend_flags(flags);
        self.gui
            .set_platform_name(concat!("dear-imgui-multiwindow ", env!("CARGO_PKG_VERSION")));
        self.gui.set_display_size(display_size);
        if let Some(clipboard) = platform.clipboard() {
            self.gui.set_clipboard_backend(clipboard);
        }
    }

    /// Build the font atlas and replace the font texture with a fresh upload
    ///
    /// On failure the previous texture stays in place.
    pub(crate) fn update_font_texture(&mut self, platform: &P) -> PlatformResult<()> {
        let texture = {
            let atlas = self.gui.font_atlas_rgba32();
            debug!(
                "Uploading {}x{} font atlas for window {:?}",
                atlas.width, atlas.height, self.window
            );
            platform.create_texture(atlas.width, atlas.height, atlas.pixels)
        }
        .map_err(PlatformError::font_upload)?;

        self.gui.set_font_texture_id(Some(texture.texture_id()));
        self.font_texture = Some(texture);
        Ok(())
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn gui(&self) -> &C {
        &self.gui
    }

    pub fn gui_mut(&mut self) -> &mut C {
        &mut self.gui
    }

    /// Font texture owned by this context, if one was uploaded
    pub fn font_texture(&self) -> Option<&P::Texture> {
        self.font_texture.as_ref()
    }

    pub fn cursors(&self) -> &CursorSet<P::Cursor> {
        &self.cursors
    }

    pub fn has_focus(&self) -> bool {
        self.input.has_focus
    }

    /// Joystick feeding gamepad navigation, `None` if no joystick is bound
    pub fn joystick(&self) -> Option<u32> {
        self.joystick
    }

    pub fn gamepad_config(&self) -> &GamepadConfig {
        &self.gamepad
    }
}
