//! Frame building: turn the gathered input into the runtime's I/O block

use std::time::Duration;

use tracing::trace;

use crate::context::WindowContext;
use crate::cursor::CursorSettings;
use crate::error::{PlatformError, PlatformResult};
use crate::gamepad::update_gamepad;
use crate::input::MouseButton;
use crate::platform::{Platform, PlatformWindow};
use crate::runtime::{BackendFlags, ConfigFlags, GuiContext};

impl<P: Platform, C: GuiContext> WindowContext<P, C> {
    /// Re-apply the OS cursor if the requested one changed since the last frame
    pub(crate) fn update_mouse_cursor(&mut self, platform: &P, window: &P::Window) {
        if self
            .gui
            .config_flags()
            .contains(ConfigFlags::NO_MOUSE_CURSOR_CHANGE)
        {
            return;
        }

        let settings = CursorSettings {
            cursor: self.gui.mouse_cursor(),
            draw_cursor: self.gui.mouse_draw_cursor(),
        };
        if self.last_cursor != Some(settings) {
            settings.apply(platform, window, &self.cursors);
            self.last_cursor = Some(settings);
        }
    }

    /// Mouse position for this frame: live mouse after a move, else the last touch
    pub(crate) fn resolve_mouse_position(&mut self, platform: &P, window: &P::Window) -> [i32; 2] {
        if self.input.mouse_moved {
            window.mouse_position()
        } else {
            if platform.is_touch_down(0) {
                self.input.touch_pos = window.touch_position(0);
            }
            self.input.touch_pos
        }
    }

    /// Populate the I/O block and begin a frame
    pub(crate) fn prepare_frame(
        &mut self,
        platform: &P,
        mouse_pos: [i32; 2],
        display_size: [f32; 2],
        delta_time: Duration,
    ) -> PlatformResult<()> {
        if !self.gui.has_fonts() {
            return Err(PlatformError::MissingFontAtlas);
        }

        self.gui.set_display_size(display_size);
        // The runtime rejects a zero timestep
        self.gui.set_delta_time(delta_time.as_secs_f32().max(f32::EPSILON));

        if self.input.has_focus {
            if self.gui.want_set_mouse_pos() {
                let [x, y] = self.gui.mouse_pos();
                platform.set_mouse_position([x as i32, y as i32]);
            } else {
                self.gui
                    .set_mouse_pos([mouse_pos[0] as f32, mouse_pos[1] as f32]);
            }

            for button in MouseButton::TRACKED {
                let i = button.index();
                let down = self.input.mouse_pressed[i]
                    || self.input.touch_down[i]
                    || platform.is_touch_down(i as u32)
                    || platform.is_mouse_button_pressed(button);
                self.gui.set_mouse_down(button, down);
            }
        }
        self.input.mouse_pressed = [false; 3];
        self.input.touch_down = [false; 3];

        let want_text_input = self.gui.want_text_input();
        if want_text_input != self.input.want_text_input {
            platform.set_virtual_keyboard_visible(want_text_input);
            self.input.want_text_input = want_text_input;
        }

        let mut backend_flags = self.gui.backend_flags();
        if backend_flags.contains(BackendFlags::HAS_GAMEPAD) != self.joystick.is_some() {
            backend_flags.set(BackendFlags::HAS_GAMEPAD, self.joystick.is_some());
            self.gui.set_backend_flags(backend_flags);
        }

        if self.gui.config_flags().contains(ConfigFlags::NAV_ENABLE_GAMEPAD)
            && let Some(joystick) = self.joystick
        {
            update_gamepad(
                &mut self.gui,
                platform,
                joystick,
                &self.gamepad,
                self.input.has_focus,
            );
        }

        trace!("New frame for window {:?}", self.window);
        self.gui.new_frame();
        Ok(())
    }
}
