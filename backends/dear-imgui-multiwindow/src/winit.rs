//! Translation of `winit` window events
//!
//! [`WinitEventTranslator`] turns one `WindowEvent` into the [`Event`]s the
//! registry understands. It remembers the modifier state winit reports
//! separately from key events, so keep one translator per window.
//!
//! ```rust,ignore
//! let mut translator = WinitEventTranslator::default();
//! // in ApplicationHandler::window_event
//! for event in translator.translate(&window_event) {
//!     registry.process_event(&platform_window, &event)?;
//! }
//! ```

use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{Key as WinitKey, KeyLocation, ModifiersState, NamedKey};
use winit::window::CursorIcon;

use crate::cursor::CursorShape;
use crate::events::Event;
use crate::input::{Key, Modifiers, MouseButton, MouseWheel};

/// Pixels per wheel line for touchpads reporting pixel deltas
const PIXELS_PER_LINE: f32 = 100.0;

/// Stateful `WindowEvent` to [`Event`] converter
#[derive(Debug, Default, Clone)]
pub struct WinitEventTranslator {
    modifiers: Modifiers,
    /// winit touch id held in each finger slot; `None` marks a free slot
    touch_slots: Vec<Option<u64>>,
}

impl WinitEventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Modifier state from the last `ModifiersChanged`
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Vec<Event> {
        match event {
            WindowEvent::Resized(size) => vec![Event::Resized {
                width: size.width,
                height: size.height,
            }],
            WindowEvent::CursorMoved { position, .. } => vec![Event::MouseMoved {
                x: position.x as i32,
                y: position.y as i32,
            }],
            WindowEvent::MouseInput { state, button, .. } => to_mouse_button(*button)
                .map(|button| match state {
                    ElementState::Pressed => Event::MouseButtonPressed { button },
                    ElementState::Released => Event::MouseButtonReleased { button },
                })
                .into_iter()
                .collect(),
            WindowEvent::MouseWheel { delta, .. } => {
                let [h, v] = match *delta {
                    MouseScrollDelta::LineDelta(h, v) => [h, v],
                    MouseScrollDelta::PixelDelta(pos) => {
                        [pos.x as f32 / PIXELS_PER_LINE, pos.y as f32 / PIXELS_PER_LINE]
                    }
                };
                let mut events = Vec::new();
                if v != 0.0 {
                    events.push(Event::MouseWheelScrolled {
                        wheel: MouseWheel::Vertical,
                        delta: v,
                    });
                }
                if h != 0.0 {
                    events.push(Event::MouseWheelScrolled {
                        wheel: MouseWheel::Horizontal,
                        delta: h,
                    });
                }
                events
            }
            WindowEvent::KeyboardInput { event, .. } => self.key_event(
                &event.logical_key,
                event.location,
                event.state,
                event.text.as_deref(),
            ),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = to_modifiers(modifiers.state());
                Vec::new()
            }
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x as i32, touch.location.y as i32);
                vec![match touch.phase {
                    TouchPhase::Started => Event::TouchBegan {
                        finger: self.claim_finger(touch.id),
                        x,
                        y,
                    },
                    TouchPhase::Moved => Event::TouchMoved {
                        finger: self.claim_finger(touch.id),
                        x,
                        y,
                    },
                    TouchPhase::Ended | TouchPhase::Cancelled => Event::TouchEnded {
                        finger: self.release_finger(touch.id),
                        x,
                        y,
                    },
                }]
            }
            WindowEvent::Focused(true) => vec![Event::FocusGained],
            WindowEvent::Focused(false) => vec![Event::FocusLost],
            _ => Vec::new(),
        }
    }

    /// Finger slot of a live touch, assigning the lowest free slot to new ids
    ///
    /// winit touch ids are opaque and may be arbitrarily large, while the
    /// platform layer tracks fingers by small 0-based slots.
    fn claim_finger(&mut self, id: u64) -> u32 {
        if let Some(slot) = self.touch_slots.iter().position(|&held| held == Some(id)) {
            return slot as u32;
        }
        match self.touch_slots.iter().position(Option::is_none) {
            Some(slot) => {
                self.touch_slots[slot] = Some(id);
                slot as u32
            }
            None => {
                self.touch_slots.push(Some(id));
                (self.touch_slots.len() - 1) as u32
            }
        }
    }

    /// Free the slot of an ending touch; unknown ids report the lowest free slot
    fn release_finger(&mut self, id: u64) -> u32 {
        match self.touch_slots.iter().position(|&held| held == Some(id)) {
            Some(slot) => {
                self.touch_slots[slot] = None;
                while self.touch_slots.last() == Some(&None) {
                    self.touch_slots.pop();
                }
                slot as u32
            }
            None => self
                .touch_slots
                .iter()
                .position(Option::is_none)
                .unwrap_or(self.touch_slots.len()) as u32,
        }
    }

    /// Key press or release, followed by the text it produced
    pub fn key_event(
        &self,
        key: &WinitKey,
        location: KeyLocation,
        state: ElementState,
        text: Option<&str>,
    ) -> Vec<Event> {
        let key_code = to_key(key, location);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => {
                let mut events = vec![Event::KeyPressed { key: key_code, modifiers }];
                events.extend(
                    text.into_iter()
                        .flat_map(str::chars)
                        .map(|unicode| Event::TextEntered { unicode }),
                );
                events
            }
            ElementState::Released => vec![Event::KeyReleased { key: key_code, modifiers }],
        }
    }
}

pub fn to_modifiers(state: ModifiersState) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::CTRL, state.control_key());
    modifiers.set(Modifiers::SHIFT, state.shift_key());
    modifiers.set(Modifiers::ALT, state.alt_key());
    modifiers.set(Modifiers::SUPER, state.super_key());
    modifiers
}

pub fn to_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back | WinitMouseButton::Other(3) => Some(MouseButton::Extra1),
        WinitMouseButton::Forward | WinitMouseButton::Other(4) => Some(MouseButton::Extra2),
        WinitMouseButton::Other(_) => None,
    }
}

/// Map a logical key, using the location to split keypad and side keys
pub fn to_key(key: &WinitKey, location: KeyLocation) -> Option<Key> {
    match key {
        WinitKey::Character(s) => {
            let ch = s.chars().next()?;
            let numpad = location == KeyLocation::Numpad;
            match ch {
                '0'..='9' if numpad => keypad_digit(ch),
                '0' => Some(Key::Key0),
                '1' => Some(Key::Key1),
                '2' => Some(Key::Key2),
                '3' => Some(Key::Key3),
                '4' => Some(Key::Key4),
                '5' => Some(Key::Key5),
                '6' => Some(Key::Key6),
                '7' => Some(Key::Key7),
                '8' => Some(Key::Key8),
                '9' => Some(Key::Key9),
                'a' | 'A' => Some(Key::A),
                'b' | 'B' => Some(Key::B),
                'c' | 'C' => Some(Key::C),
                'd' | 'D' => Some(Key::D),
                'e' | 'E' => Some(Key::E),
                'f' | 'F' => Some(Key::F),
                'g' | 'G' => Some(Key::G),
                'h' | 'H' => Some(Key::H),
                'i' | 'I' => Some(Key::I),
                'j' | 'J' => Some(Key::J),
                'k' | 'K' => Some(Key::K),
                'l' | 'L' => Some(Key::L),
                'm' | 'M' => Some(Key::M),
                'n' | 'N' => Some(Key::N),
                'o' | 'O' => Some(Key::O),
                'p' | 'P' => Some(Key::P),
                'q' | 'Q' => Some(Key::Q),
                'r' | 'R' => Some(Key::R),
                's' | 'S' => Some(Key::S),
                't' | 'T' => Some(Key::T),
                'u' | 'U' => Some(Key::U),
                'v' | 'V' => Some(Key::V),
                'w' | 'W' => Some(Key::W),
                'x' | 'X' => Some(Key::X),
                'y' | 'Y' => Some(Key::Y),
                'z' | 'Z' => Some(Key::Z),
                '\'' => Some(Key::Apostrophe),
                ',' => Some(Key::Comma),
                '-' if numpad => Some(Key::KeypadSubtract),
                '-' => Some(Key::Minus),
                '.' if numpad => Some(Key::KeypadDecimal),
                '.' => Some(Key::Period),
                '/' if numpad => Some(Key::KeypadDivide),
                '/' => Some(Key::Slash),
                '*' if numpad => Some(Key::KeypadMultiply),
                '+' if numpad => Some(Key::KeypadAdd),
                ';' => Some(Key::Semicolon),
                '=' if numpad => Some(Key::KeypadEqual),
                '=' => Some(Key::Equal),
                '[' => Some(Key::LeftBracket),
                '\\' => Some(Key::Backslash),
                ']' => Some(Key::RightBracket),
                '`' => Some(Key::GraveAccent),
                _ => None,
            }
        }
        WinitKey::Named(named_key) => match named_key {
            NamedKey::ArrowDown => Some(Key::DownArrow),
            NamedKey::ArrowLeft => Some(Key::LeftArrow),
            NamedKey::ArrowRight => Some(Key::RightArrow),
            NamedKey::ArrowUp => Some(Key::UpArrow),
            NamedKey::End => Some(Key::End),
            NamedKey::Home => Some(Key::Home),
            NamedKey::PageDown => Some(Key::PageDown),
            NamedKey::PageUp => Some(Key::PageUp),

            NamedKey::Backspace => Some(Key::Backspace),
            NamedKey::Delete => Some(Key::Delete),
            NamedKey::Insert => Some(Key::Insert),

            NamedKey::Tab => Some(Key::Tab),
            NamedKey::Space => Some(Key::Space),
            NamedKey::Enter if location == KeyLocation::Numpad => Some(Key::KeypadEnter),
            NamedKey::Enter => Some(Key::Enter),
            NamedKey::Escape => Some(Key::Escape),

            // Side-less reports fall back to the left key
            NamedKey::Shift if location == KeyLocation::Right => Some(Key::RightShift),
            NamedKey::Shift => Some(Key::LeftShift),
            NamedKey::Control if location == KeyLocation::Right => Some(Key::RightCtrl),
            NamedKey::Control => Some(Key::LeftCtrl),
            NamedKey::Alt if location == KeyLocation::Right => Some(Key::RightAlt),
            NamedKey::Alt => Some(Key::LeftAlt),
            NamedKey::Super if location == KeyLocation::Right => Some(Key::RightSuper),
            NamedKey::Super => Some(Key::LeftSuper),

            NamedKey::F1 => Some(Key::F1),
            NamedKey::F2 => Some(Key::F2),
            NamedKey::F3 => Some(Key::F3),
            NamedKey::F4 => Some(Key::F4),
            NamedKey::F5 => Some(Key::F5),
            NamedKey::F6 => Some(Key::F6),
            NamedKey::F7 => Some(Key::F7),
            NamedKey::F8 => Some(Key::F8),
            NamedKey::F9 => Some(Key::F9),
            NamedKey::F10 => Some(Key::F10),
            NamedKey::F11 => Some(Key::F11),
            NamedKey::F12 => Some(Key::F12),

            NamedKey::CapsLock => Some(Key::CapsLock),
            NamedKey::ScrollLock => Some(Key::ScrollLock),
            NamedKey::NumLock => Some(Key::NumLock),

            NamedKey::PrintScreen => Some(Key::PrintScreen),
            NamedKey::Pause => Some(Key::Pause),
            NamedKey::ContextMenu => Some(Key::Menu),
            _ => None,
        },
        _ => None,
    }
}

fn keypad_digit(ch: char) -> Option<Key> {
    Some(match ch {
        '0' => Key::Keypad0,
        '1' => Key::Keypad1,
        '2' => Key::Keypad2,
        '3' => Key::Keypad3,
        '4' => Key::Keypad4,
        '5' => Key::Keypad5,
        '6' => Key::Keypad6,
        '7' => Key::Keypad7,
        '8' => Key::Keypad8,
        '9' => Key::Keypad9,
        _ => return None,
    })
}

/// System cursor for a GUI cursor shape
pub fn to_cursor_icon(shape: CursorShape) -> CursorIcon {
    match shape {
        CursorShape::Arrow => CursorIcon::Default,
        CursorShape::TextInput => CursorIcon::Text,
        CursorShape::ResizeAll => CursorIcon::Move,
        CursorShape::ResizeNS => CursorIcon::NsResize,
        CursorShape::ResizeEW => CursorIcon::EwResize,
        CursorShape::ResizeNESW => CursorIcon::NeswResize,
        CursorShape::ResizeNWSE => CursorIcon::NwseResize,
        CursorShape::Hand => CursorIcon::Pointer,
        CursorShape::Wait => CursorIcon::Wait,
        CursorShape::Progress => CursorIcon::Progress,
        CursorShape::NotAllowed => CursorIcon::NotAllowed,
    }
}
