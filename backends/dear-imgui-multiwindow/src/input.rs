//! Toolkit-neutral input vocabulary
//!
//! Toolkit adapters translate their native key codes, mouse buttons and
//! wheel axes into these types before handing events to the registry.

use bitflags::bitflags;

/// Mouse button identifier
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// First extra button (usually "back")
    Extra1,
    /// Second extra button (usually "forward")
    Extra2,
}

impl MouseButton {
    /// Buttons whose presses are latched between frames
    pub const TRACKED: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    /// Index into per-button arrays (`Left` = 0)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot in the latched-press arrays, `None` for the extra buttons
    pub(crate) fn tracked_index(self) -> Option<usize> {
        match self {
            MouseButton::Left | MouseButton::Right | MouseButton::Middle => Some(self.index()),
            MouseButton::Extra1 | MouseButton::Extra2 => None,
        }
    }
}

/// Wheel axis of a scroll event
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseWheel {
    Vertical,
    Horizontal,
}

bitflags! {
    /// Modifier keys held while a key event was produced
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

impl Modifiers {
    /// Modifier flags paired with the key that carries them in the GUI runtime
    pub const KEYS: [(Modifiers, Key); 4] = [
        (Modifiers::CTRL, Key::ModCtrl),
        (Modifiers::SHIFT, Key::ModShift),
        (Modifiers::ALT, Key::ModAlt),
        (Modifiers::SUPER, Key::ModSuper),
    ];
}

/// Key identifier understood by the GUI runtime
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftSuper,
    RightCtrl,
    RightShift,
    RightAlt,
    RightSuper,
    Menu,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    KeypadEnter,
    KeypadEqual,

    /// Menu (Xbox), + (Switch), Start/Options (PS)
    GamepadStart,
    /// View (Xbox), - (Switch), Share (PS)
    GamepadBack,
    /// X (Xbox), Y (Switch), Square (PS)
    GamepadFaceLeft,
    /// B (Xbox), A (Switch), Circle (PS)
    GamepadFaceRight,
    /// Y (Xbox), X (Switch), Triangle (PS)
    GamepadFaceUp,
    /// A (Xbox), B (Switch), Cross (PS)
    GamepadFaceDown,
    GamepadDpadLeft,
    GamepadDpadRight,
    GamepadDpadUp,
    GamepadDpadDown,
    GamepadL1,
    GamepadR1,
    /// Left trigger (analog)
    GamepadL2,
    /// Right trigger (analog)
    GamepadR2,
    /// Left stick press
    GamepadL3,
    /// Right stick press
    GamepadR3,
    GamepadLStickLeft,
    GamepadLStickRight,
    GamepadLStickUp,
    GamepadLStickDown,
    GamepadRStickLeft,
    GamepadRStickRight,
    GamepadRStickUp,
    GamepadRStickDown,

    ModCtrl,
    ModShift,
    ModAlt,
    ModSuper,
}

impl Key {
    /// The `Mod*` key carried by a physical modifier key
    pub fn modifier(self) -> Option<Key> {
        match self {
            Key::LeftCtrl | Key::RightCtrl => Some(Key::ModCtrl),
            Key::LeftShift | Key::RightShift => Some(Key::ModShift),
            Key::LeftAlt | Key::RightAlt => Some(Key::ModAlt),
            Key::LeftSuper | Key::RightSuper => Some(Key::ModSuper),
            _ => None,
        }
    }

    /// Whether this is one of the `Gamepad*` navigation keys
    pub fn is_gamepad(self) -> bool {
        (Key::GamepadStart..=Key::GamepadRStickDown).contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "serde")]
    static_assertions::assert_impl_all!(
        MouseButton: serde::Serialize, serde::de::DeserializeOwned
    );
    #[cfg(feature = "serde")]
    static_assertions::assert_impl_all!(
        MouseWheel: serde::Serialize, serde::de::DeserializeOwned
    );
    #[cfg(feature = "serde")]
    static_assertions::assert_impl_all!(Key: serde::Serialize, serde::de::DeserializeOwned);

    #[test]
    fn test_modifier_keys_map_to_mod_keys() {
        assert_eq!(Key::LeftCtrl.modifier(), Some(Key::ModCtrl));
        assert_eq!(Key::RightShift.modifier(), Some(Key::ModShift));
        assert_eq!(Key::RightAlt.modifier(), Some(Key::ModAlt));
        assert_eq!(Key::LeftSuper.modifier(), Some(Key::ModSuper));
        assert_eq!(Key::A.modifier(), None);
        assert_eq!(Key::ModCtrl.modifier(), None);
    }

    #[test]
    fn test_gamepad_key_range() {
        assert!(Key::GamepadStart.is_gamepad());
        assert!(Key::GamepadL2.is_gamepad());
        assert!(Key::GamepadRStickDown.is_gamepad());
        assert!(!Key::KeypadEqual.is_gamepad());
        assert!(!Key::ModCtrl.is_gamepad());
    }

    #[test]
    fn test_tracked_buttons() {
        assert_eq!(MouseButton::Middle.tracked_index(), Some(2));
        assert_eq!(MouseButton::Extra1.tracked_index(), None);
        for (i, button) in MouseButton::TRACKED.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }
}
