//! Window events and their routing into the GUI context
//!
//! Toolkit adapters translate native events into [`Event`]. The registry
//! hands each one to the context of the window it was delivered to.

use tracing::{debug, trace, warn};

use crate::context::WindowContext;
use crate::gamepad::first_connected_joystick;
use crate::input::{Key, Modifiers, MouseButton, MouseWheel};
use crate::platform::Platform;
use crate::runtime::GuiContext;

/// Events the platform layer reacts to
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Resized { width: u32, height: u32 },
    MouseMoved { x: i32, y: i32 },
    MouseButtonPressed { button: MouseButton },
    MouseButtonReleased { button: MouseButton },
    MouseWheelScrolled { wheel: MouseWheel, delta: f32 },
    TouchBegan { finger: u32, x: i32, y: i32 },
    TouchMoved { finger: u32, x: i32, y: i32 },
    TouchEnded { finger: u32, x: i32, y: i32 },
    /// `key` is `None` when the toolkit key has no GUI counterpart
    KeyPressed { key: Option<Key>, modifiers: Modifiers },
    KeyReleased { key: Option<Key>, modifiers: Modifiers },
    TextEntered { unicode: char },
    JoystickConnected { joystick: u32 },
    JoystickDisconnected { joystick: u32 },
    FocusGained,
    FocusLost,
}

impl<P: Platform, C: GuiContext> WindowContext<P, C> {
    pub(crate) fn handle_event(&mut self, platform: &P, event: &Event) {
        trace!("Window {:?} event {:?}", self.window, event);
        match *event {
            Event::FocusGained => self.handle_focus(true),
            Event::FocusLost => self.handle_focus(false),
            Event::JoystickConnected { joystick } => {
                if self.joystick.is_none() {
                    debug!("Binding joystick {} to window {:?}", joystick, self.window);
                    self.joystick = Some(joystick);
                }
            }
            Event::JoystickDisconnected { joystick } => {
                if self.joystick == Some(joystick) {
                    self.joystick = first_connected_joystick(platform);
                    match self.joystick {
                        Some(next) => debug!(
                            "Joystick {} disconnected, window {:?} now uses joystick {}",
                            joystick, self.window, next
                        ),
                        None => warn!(
                            "Joystick {} disconnected, window {:?} has no gamepad left",
                            joystick, self.window
                        ),
                    }
                }
            }
            _ if !self.input.has_focus => {}
            Event::Resized { width, height } => {
                self.gui.set_display_size([width as f32, height as f32]);
            }
            Event::MouseMoved { x, y } => {
                self.gui.add_mouse_pos_event([x as f32, y as f32]);
                self.input.mouse_moved = true;
            }
            Event::MouseButtonPressed { button } => {
                if let Some(index) = button.tracked_index() {
                    self.input.mouse_pressed[index] = true;
                }
                self.gui.add_mouse_button_event(button, true);
            }
            Event::MouseButtonReleased { button } => {
                self.gui.add_mouse_button_event(button, false);
            }
            Event::TouchBegan { finger, x, y } => {
                self.input.mouse_moved = false;
                if let Some(touch_down) = self.input.touch_down.get_mut(finger as usize) {
                    *touch_down = true;
                }
                if finger == 0 {
                    self.input.touch_pos = [x, y];
                }
            }
            Event::TouchMoved { .. } => {}
            Event::TouchEnded { .. } => self.input.mouse_moved = false,
            Event::MouseWheelScrolled { wheel, delta } => {
                if wheel == MouseWheel::Vertical || self.gui.key_shift() {
                    self.gui.add_mouse_wheel_event([0.0, delta]);
                } else {
                    self.gui.add_mouse_wheel_event([delta, 0.0]);
                }
            }
            Event::KeyPressed { key, modifiers } => self.handle_key(key, modifiers, true),
            Event::KeyReleased { key, modifiers } => self.handle_key(key, modifiers, false),
            Event::TextEntered { unicode } => {
                // Control characters and DEL never reach text widgets
                if unicode >= ' ' && unicode != '\u{7f}' {
                    self.gui.add_input_character(unicode);
                }
            }
        }
    }

    fn handle_key(&mut self, key: Option<Key>, modifiers: Modifiers, down: bool) {
        match key.and_then(Key::modifier) {
            Some(modifier) => self.gui.add_key_event(modifier, down),
            None => {
                for (flag, modifier) in Modifiers::KEYS {
                    self.gui.add_key_event(modifier, modifiers.contains(flag));
                }
            }
        }

        if let Some(key) = key {
            self.gui.add_key_event(key, down);
            if down {
                self.input.held_keys.insert(key);
            } else {
                self.input.held_keys.remove(&key);
            }
        }
    }

    fn handle_focus(&mut self, focused: bool) {
        if !focused {
            // The toolkit drops key releases that happen while unfocused
            for key in std::mem::take(&mut self.input.held_keys) {
                self.gui.add_key_event(key, false);
            }
            for (_, modifier) in Modifiers::KEYS {
                self.gui.add_key_event(modifier, false);
            }
        }
        self.gui.add_focus_event(focused);
        self.input.has_focus = focused;
    }
}
