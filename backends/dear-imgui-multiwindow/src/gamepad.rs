//! Joystick binding, calibration and gamepad navigation sampling

use tracing::{debug, trace};

use crate::input::Key;
use crate::platform::Platform;
use crate::runtime::GuiContext;

/// Number of joystick slots the toolkit exposes
pub const MAX_JOYSTICKS: u32 = 8;

/// Number of buttons per joystick the mapping table covers
pub const MAX_JOYSTICK_BUTTONS: usize = 32;

/// Joystick axis selector
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoystickAxis {
    X,
    Y,
    Z,
    R,
    U,
    V,
    PovX,
    PovY,
}

/// Calibration of a two-axis control (d-pad or analog stick)
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickInfo {
    pub x_axis: JoystickAxis,
    pub y_axis: JoystickAxis,
    pub x_inverted: bool,
    pub y_inverted: bool,
    /// Dead zone in `[0, 100]`
    pub threshold: f32,
}

impl Default for StickInfo {
    fn default() -> Self {
        Self {
            x_axis: JoystickAxis::X,
            y_axis: JoystickAxis::Y,
            x_inverted: false,
            y_inverted: false,
            threshold: 15.0,
        }
    }
}

/// Calibration of an analog trigger
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerInfo {
    pub axis: JoystickAxis,
    /// Activation point in `[-100, 100]`
    pub threshold: f32,
}

impl Default for TriggerInfo {
    fn default() -> Self {
        Self {
            axis: JoystickAxis::Z,
            threshold: 0.0,
        }
    }
}

/// Mapping from joystick buttons and axes to gamepad navigation keys
///
/// The default layout matches an XInput controller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GamepadConfig {
    mapping: [Option<Key>; MAX_JOYSTICK_BUTTONS],
    dpad: StickInfo,
    left_stick: StickInfo,
    right_stick: StickInfo,
    left_trigger: TriggerInfo,
    right_trigger: TriggerInfo,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        let mut config = Self {
            mapping: [None; MAX_JOYSTICK_BUTTONS],
            dpad: StickInfo::default(),
            left_stick: StickInfo::default(),
            right_stick: StickInfo::default(),
            left_trigger: TriggerInfo::default(),
            right_trigger: TriggerInfo::default(),
        };

        config.set_mapping(Key::GamepadFaceDown, 0);
        config.set_mapping(Key::GamepadFaceRight, 1);
        config.set_mapping(Key::GamepadFaceLeft, 2);
        config.set_mapping(Key::GamepadFaceUp, 3);
        config.set_mapping(Key::GamepadL1, 4);
        config.set_mapping(Key::GamepadR1, 5);
        config.set_mapping(Key::GamepadBack, 6);
        config.set_mapping(Key::GamepadStart, 7);
        config.set_mapping(Key::GamepadL3, 9);
        config.set_mapping(Key::GamepadR3, 10);

        config.set_dpad_x_axis(JoystickAxis::PovX, false);
        // PovY reports up as negative on Windows
        config.set_dpad_y_axis(JoystickAxis::PovY, cfg!(target_os = "windows"));
        config.set_left_stick_x_axis(JoystickAxis::X, false);
        config.set_left_stick_y_axis(JoystickAxis::Y, false);
        config.set_right_stick_x_axis(JoystickAxis::U, false);
        config.set_right_stick_y_axis(JoystickAxis::V, false);
        config.set_left_trigger_axis(JoystickAxis::Z);
        config.set_right_trigger_axis(JoystickAxis::R);

        config.set_dpad_threshold(5.0);
        config.set_left_stick_threshold(5.0);
        config.set_right_stick_threshold(15.0);
        config.set_left_trigger_threshold(0.0);
        config.set_right_trigger_threshold(0.0);

        config
    }
}

impl GamepadConfig {
    /// A configuration with no buttons mapped and default calibration
    pub fn unmapped() -> Self {
        Self {
            mapping: [None; MAX_JOYSTICK_BUTTONS],
            ..Self::default()
        }
    }

    /// Gamepad key bound to a joystick button
    pub fn mapping(&self, button: u32) -> Option<Key> {
        self.mapping.get(button as usize).copied().flatten()
    }

    /// Bind a joystick button to a gamepad key
    ///
    /// # Panics
    ///
    /// Panics if `key` is not a gamepad key or `button` is out of range.
    pub fn set_mapping(&mut self, key: Key, button: u32) {
        assert!(key.is_gamepad(), "{key:?} is not a gamepad key");
        assert!(
            (button as usize) < MAX_JOYSTICK_BUTTONS,
            "joystick button {button} out of range"
        );
        self.mapping[button as usize] = Some(key);
    }

    /// Remove the key bound to a joystick button
    pub fn clear_mapping(&mut self, button: u32) {
        if let Some(slot) = self.mapping.get_mut(button as usize) {
            *slot = None;
        }
    }

    pub fn dpad(&self) -> &StickInfo {
        &self.dpad
    }

    pub fn left_stick(&self) -> &StickInfo {
        &self.left_stick
    }

    pub fn right_stick(&self) -> &StickInfo {
        &self.right_stick
    }

    pub fn left_trigger(&self) -> &TriggerInfo {
        &self.left_trigger
    }

    pub fn right_trigger(&self) -> &TriggerInfo {
        &self.right_trigger
    }

    pub fn set_dpad_x_axis(&mut self, axis: JoystickAxis, inverted: bool) {
        self.dpad.x_axis = axis;
        self.dpad.x_inverted = inverted;
    }

    pub fn set_dpad_y_axis(&mut self, axis: JoystickAxis, inverted: bool) {
        self.dpad.y_axis = axis;
        self.dpad.y_inverted = inverted;
    }

    pub fn set_left_stick_x_axis(&mut self, axis: JoystickAxis, inverted: bool) {
        self.left_stick.x_axis = axis;
        self.left_stick.x_inverted = inverted;
    }

    pub fn set_left_stick_y_axis(&mut self, axis: JoystickAxis, inverted: bool) {
        self.left_stick.y_axis = axis;
        self.left_stick.y_inverted = inverted;
    }

    pub fn set_right_stick_x_axis(&mut self, axis: JoystickAxis, inverted: bool) {
        self.right_stick.x_axis = axis;
        self.right_stick.x_inverted = inverted;
    }

    pub fn set_right_stick_y_axis(&mut self, axis: JoystickAxis, inverted: bool) {
        self.right_stick.y_axis = axis;
        self.right_stick.y_inverted = inverted;
    }

    pub fn set_left_trigger_axis(&mut self, axis: JoystickAxis) {
        self.left_trigger.axis = axis;
    }

    pub fn set_right_trigger_axis(&mut self, axis: JoystickAxis) {
        self.right_trigger.axis = axis;
    }

    /// # Panics
    ///
    /// Panics if `threshold` is outside `[0, 100]`.
    pub fn set_dpad_threshold(&mut self, threshold: f32) {
        assert_stick_threshold(threshold);
        self.dpad.threshold = threshold;
    }

    /// # Panics
    ///
    /// Panics if `threshold` is outside `[0, 100]`.
    pub fn set_left_stick_threshold(&mut self, threshold: f32) {
        assert_stick_threshold(threshold);
        self.left_stick.threshold = threshold;
    }

    /// # Panics
    ///
    /// Panics if `threshold` is outside `[0, 100]`.
    pub fn set_right_stick_threshold(&mut self, threshold: f32) {
        assert_stick_threshold(threshold);
        self.right_stick.threshold = threshold;
    }

    /// # Panics
    ///
    /// Panics if `threshold` is outside `[-100, 100]`.
    pub fn set_left_trigger_threshold(&mut self, threshold: f32) {
        assert_trigger_threshold(threshold);
        self.left_trigger.threshold = threshold;
    }

    /// # Panics
    ///
    /// Panics if `threshold` is outside `[-100, 100]`.
    pub fn set_right_trigger_threshold(&mut self, threshold: f32) {
        assert_trigger_threshold(threshold);
        self.right_trigger.threshold = threshold;
    }
}

fn assert_stick_threshold(threshold: f32) {
    assert!(
        (0.0..=100.0).contains(&threshold),
        "stick threshold {threshold} outside [0, 100]"
    );
}

fn assert_trigger_threshold(threshold: f32) {
    assert!(
        (-100.0..=100.0).contains(&threshold),
        "trigger threshold {threshold} outside [-100, 100]"
    );
}

/// Lowest connected joystick id
pub fn first_connected_joystick<P: Platform>(platform: &P) -> Option<u32> {
    let joystick = (0..MAX_JOYSTICKS).find(|&id| platform.is_joystick_connected(id));
    debug!("First connected joystick: {:?}", joystick);
    joystick
}

/// Feed the bound joystick into the runtime as gamepad navigation input
pub(crate) fn update_gamepad<P: Platform, C: GuiContext>(
    gui: &mut C,
    platform: &P,
    joystick: u32,
    config: &GamepadConfig,
    has_focus: bool,
) {
    trace!("Sampling joystick {}", joystick);
    update_buttons(gui, platform, joystick, config, has_focus);

    let sampler = AxisSampler {
        platform,
        joystick,
        has_focus,
    };
    sampler.stick(
        gui,
        &config.dpad,
        [
            Key::GamepadDpadLeft,
            Key::GamepadDpadRight,
            Key::GamepadDpadUp,
            Key::GamepadDpadDown,
        ],
    );
    sampler.stick(
        gui,
        &config.left_stick,
        [
            Key::GamepadLStickLeft,
            Key::GamepadLStickRight,
            Key::GamepadLStickUp,
            Key::GamepadLStickDown,
        ],
    );
    sampler.stick(
        gui,
        &config.right_stick,
        [
            Key::GamepadRStickLeft,
            Key::GamepadRStickRight,
            Key::GamepadRStickUp,
            Key::GamepadRStickDown,
        ],
    );
    sampler.trigger(gui, Key::GamepadL2, &config.left_trigger);
    sampler.trigger(gui, Key::GamepadR2, &config.right_trigger);
}

fn update_buttons<P: Platform, C: GuiContext>(
    gui: &mut C,
    platform: &P,
    joystick: u32,
    config: &GamepadConfig,
    has_focus: bool,
) {
    for (button, key) in config.mapping.iter().enumerate() {
        let Some(key) = *key else { continue };
        let pressed = platform.is_joystick_button_pressed(joystick, button as u32);
        // Releases still go through so a button held while focus leaves is not stuck.
        if has_focus || !pressed {
            gui.add_key_event(key, pressed);
        }
    }
}

struct AxisSampler<'a, P> {
    platform: &'a P,
    joystick: u32,
    has_focus: bool,
}

impl<P: Platform> AxisSampler<'_, P> {
    /// `keys` is `[left, right, up, down]`
    fn stick<C: GuiContext>(&self, gui: &mut C, info: &StickInfo, keys: [Key; 4]) {
        let [left, right, up, down] = keys;
        let x = self.position(info.x_axis, info.x_inverted);
        self.axis(gui, left, x, -info.threshold, -100.0);
        self.axis(gui, right, x, info.threshold, 100.0);

        let y = self.position(info.y_axis, info.y_inverted);
        self.axis(gui, up, y, -info.threshold, -100.0);
        self.axis(gui, down, y, info.threshold, 100.0);
    }

    fn trigger<C: GuiContext>(&self, gui: &mut C, key: Key, info: &TriggerInfo) {
        let position = self.position(info.axis, false);
        self.axis(gui, key, position, info.threshold, 100.0);
    }

    fn position(&self, axis: JoystickAxis, inverted: bool) -> f32 {
        let position = self.platform.joystick_axis_position(self.joystick, axis);
        if inverted { -position } else { position }
    }

    /// `position` counts once it lies past `threshold` on the side of `max_threshold`
    fn axis<C: GuiContext>(&self, gui: &mut C, key: Key, position: f32, threshold: f32, max_threshold: f32) {
        let passed = (position > threshold) == (max_threshold > threshold);
        if passed && self.has_focus {
            gui.add_key_analog_event(key, true, (position / 100.0).abs());
        } else {
            gui.add_key_analog_event(key, false, 0.0);
        }
    }
}
