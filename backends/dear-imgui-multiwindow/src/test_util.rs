//! In-memory platform and runtime used by the unit tests
//!
//! `FakeContext` panics when its I/O block is touched while another context
//! is active, so every test also checks that the registry keeps the runtime's
//! active context in sync with its current window.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

use crate::cursor::CursorShape;
use crate::draw::{DrawCmd, DrawCmdParams, DrawData, DrawList, DrawVert, TextureId};
use crate::gamepad::JoystickAxis;
use crate::input::{Key, MouseButton};
use crate::platform::{NativeTexture, Platform, PlatformWindow, WindowId};
use crate::renderer::RenderTarget;
use crate::runtime::{
    BackendFlags, ClipboardBackend, ConfigFlags, FontAtlasImage, GuiContext, GuiRuntime,
};

/// Route log output through the test harness; `RUST_LOG` selects the level
pub(crate) fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "dear_imgui_multiwindow=debug".into());
    // Another test may already have installed the subscriber
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

pub(crate) struct FakeWindow {
    pub id: WindowId,
    pub focus: Cell<bool>,
    pub size: Cell<[u32; 2]>,
    pub mouse_position: Cell<[i32; 2]>,
    pub touch_position: Cell<[i32; 2]>,
    pub cursor_visible: Cell<Option<bool>>,
    pub cursor: Cell<Option<CursorShape>>,
    pub cursor_changes: Cell<u32>,
}

impl FakeWindow {
    pub fn new(id: u64) -> Self {
        Self {
            id: WindowId(id),
            focus: Cell::new(true),
            size: Cell::new([800, 600]),
            mouse_position: Cell::new([0, 0]),
            touch_position: Cell::new([0, 0]),
            cursor_visible: Cell::new(None),
            cursor: Cell::new(None),
            cursor_changes: Cell::new(0),
        }
    }
}

impl PlatformWindow for FakeWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn has_focus(&self) -> bool {
        self.focus.get()
    }

    fn size(&self) -> [u32; 2] {
        self.size.get()
    }

    fn mouse_position(&self) -> [i32; 2] {
        self.mouse_position.get()
    }

    fn touch_position(&self, _finger: u32) -> [i32; 2] {
        self.touch_position.get()
    }

    fn set_mouse_cursor_visible(&self, visible: bool) {
        self.cursor_visible.set(Some(visible));
    }
}

pub(crate) struct FakeTexture {
    id: TextureId,
    live: Rc<Cell<usize>>,
}

impl NativeTexture for FakeTexture {
    fn texture_id(&self) -> TextureId {
        self.id
    }
}

impl Drop for FakeTexture {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Default)]
pub(crate) struct FakePlatform {
    mouse_buttons: RefCell<HashSet<MouseButton>>,
    touches: RefCell<HashSet<u32>>,
    joysticks: RefCell<BTreeSet<u32>>,
    joystick_buttons: RefCell<HashSet<(u32, u32)>>,
    axes: RefCell<HashMap<(u32, JoystickAxis), f32>>,
    pub unsupported_cursors: RefCell<Vec<CursorShape>>,
    pub fail_textures: Cell<bool>,
    next_texture: Cell<u64>,
    pub live_textures: Rc<Cell<usize>>,
    pub mouse_moves: RefCell<Vec<[i32; 2]>>,
    pub keyboard_visible: Cell<Option<bool>>,
}

impl FakePlatform {
    pub fn press_mouse_button(&self, button: MouseButton) {
        self.mouse_buttons.borrow_mut().insert(button);
    }

    pub fn release_mouse_button(&self, button: MouseButton) {
        self.mouse_buttons.borrow_mut().remove(&button);
    }

    pub fn touch(&self, finger: u32, down: bool) {
        if down {
            self.touches.borrow_mut().insert(finger);
        } else {
            self.touches.borrow_mut().remove(&finger);
        }
    }

    pub fn connect_joystick(&self, joystick: u32) {
        self.joysticks.borrow_mut().insert(joystick);
    }

    pub fn disconnect_joystick(&self, joystick: u32) {
        self.joysticks.borrow_mut().remove(&joystick);
    }

    pub fn press_joystick_button(&self, joystick: u32, button: u32) {
        self.joystick_buttons.borrow_mut().insert((joystick, button));
    }

    pub fn set_axis(&self, joystick: u32, axis: JoystickAxis, position: f32) {
        self.axes.borrow_mut().insert((joystick, axis), position);
    }
}

impl Platform for FakePlatform {
    type Window = FakeWindow;
    type Cursor = CursorShape;
    type Texture = FakeTexture;

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.borrow().contains(&button)
    }

    fn set_mouse_position(&self, position: [i32; 2]) {
        self.mouse_moves.borrow_mut().push(position);
    }

    fn is_touch_down(&self, finger: u32) -> bool {
        self.touches.borrow().contains(&finger)
    }

    fn is_joystick_connected(&self, joystick: u32) -> bool {
        self.joysticks.borrow().contains(&joystick)
    }

    fn is_joystick_button_pressed(&self, joystick: u32, button: u32) -> bool {
        self.joystick_buttons.borrow().contains(&(joystick, button))
    }

    fn joystick_axis_position(&self, joystick: u32, axis: JoystickAxis) -> f32 {
        self.axes.borrow().get(&(joystick, axis)).copied().unwrap_or(0.0)
    }

    fn create_cursor(&self, shape: CursorShape) -> Option<CursorShape> {
        (!self.unsupported_cursors.borrow().contains(&shape)).then_some(shape)
    }

    fn set_mouse_cursor(&self, window: &FakeWindow, cursor: &CursorShape) {
        window.cursor.set(Some(*cursor));
        window.cursor_changes.set(window.cursor_changes.get() + 1);
    }

    fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> Result<FakeTexture, String> {
        if self.fail_textures.get() {
            return Err("texture creation disabled".to_string());
        }
        assert_eq!(rgba.len(), (width * height * 4) as usize);
        self.next_texture.set(self.next_texture.get() + 1);
        self.live_textures.set(self.live_textures.get() + 1);
        Ok(FakeTexture {
            id: TextureId::new(self.next_texture.get()),
            live: Rc::clone(&self.live_textures),
        })
    }

    fn clipboard(&self) -> Option<Box<dyn ClipboardBackend>> {
        Some(Box::new(FakeClipboard::default()))
    }

    fn set_virtual_keyboard_visible(&self, visible: bool) {
        self.keyboard_visible.set(Some(visible));
    }
}

#[derive(Default)]
pub(crate) struct FakeClipboard {
    contents: Option<String>,
}

impl ClipboardBackend for FakeClipboard {
    fn get(&mut self) -> Option<String> {
        self.contents.clone()
    }

    fn set(&mut self, value: &str) {
        self.contents = Some(value.to_string());
    }
}

/// Input calls recorded by a [`FakeContext`]
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum IoEvent {
    MousePos([f32; 2]),
    MouseButton(MouseButton, bool),
    Wheel([f32; 2]),
    Key(Key, bool),
    KeyAnalog(Key, bool, f32),
    Char(char),
    Focus(bool),
}

#[derive(Debug, Default)]
pub(crate) struct RuntimeState {
    pub next_id: u32,
    pub active: Option<u32>,
    pub destroyed: Vec<u32>,
    pub fail_next: bool,
}

#[derive(Default)]
pub(crate) struct FakeRuntime {
    pub state: Rc<RefCell<RuntimeState>>,
}

impl FakeRuntime {
    pub fn active(&self) -> Option<u32> {
        self.state.borrow().active
    }
}

impl GuiRuntime for FakeRuntime {
    type Context = FakeContext;

    fn create_context(&mut self) -> Result<FakeContext, String> {
        let mut state = self.state.borrow_mut();
        if state.fail_next {
            state.fail_next = false;
            return Err("out of memory".to_string());
        }
        state.next_id += 1;
        Ok(FakeContext::new(state.next_id, Rc::clone(&self.state)))
    }
}

pub(crate) struct FakeIo {
    pub platform_name: String,
    pub backend_flags: BackendFlags,
    pub config_flags: ConfigFlags,
    pub has_clipboard: bool,
    pub display_size: [f32; 2],
    pub delta_time: f32,
    pub mouse_pos: [f32; 2],
    pub mouse_down: [bool; 5],
    pub want_set_mouse_pos: bool,
    pub want_text_input: bool,
    pub mouse_draw_cursor: bool,
    pub mouse_cursor: Option<CursorShape>,
    pub key_shift: bool,
    pub has_fonts: bool,
    pub font_texture_id: Option<TextureId>,
    pub frames: u32,
}

impl Default for FakeIo {
    fn default() -> Self {
        Self {
            platform_name: String::new(),
            backend_flags: BackendFlags::empty(),
            config_flags: ConfigFlags::empty(),
            has_clipboard: false,
            display_size: [0.0, 0.0],
            delta_time: 0.0,
            mouse_pos: [0.0, 0.0],
            mouse_down: [false; 5],
            want_set_mouse_pos: false,
            want_text_input: false,
            mouse_draw_cursor: false,
            mouse_cursor: Some(CursorShape::Arrow),
            key_shift: false,
            has_fonts: true,
            font_texture_id: None,
            frames: 0,
        }
    }
}

pub(crate) struct FakeContext {
    pub id: u32,
    state: Rc<RefCell<RuntimeState>>,
    pub io: FakeIo,
    pub events: Vec<IoEvent>,
    pub draw_data: DrawData,
    atlas: Vec<u8>,
}

impl FakeContext {
    fn new(id: u32, state: Rc<RefCell<RuntimeState>>) -> Self {
        Self {
            id,
            state,
            io: FakeIo::default(),
            events: Vec::new(),
            draw_data: DrawData::default(),
            atlas: vec![0xff; 4 * 2 * 4],
        }
    }

    pub fn take_events(&mut self) -> Vec<IoEvent> {
        std::mem::take(&mut self.events)
    }

    fn check_active(&self) {
        let active = self.state.borrow().active;
        assert_eq!(
            active,
            Some(self.id),
            "context {} used while {:?} is active",
            self.id,
            active
        );
    }

    fn record(&mut self, event: IoEvent) {
        self.check_active();
        self.events.push(event);
    }
}

impl Drop for FakeContext {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.destroyed.push(self.id);
        if state.active == Some(self.id) {
            state.active = None;
        }
    }
}

impl GuiContext for FakeContext {
    fn activate(&mut self) {
        let mut state = self.state.borrow_mut();
        assert_eq!(
            state.active, None,
            "context {} activated while another is active",
            self.id
        );
        state.active = Some(self.id);
    }

    fn suspend(&mut self) {
        let mut state = self.state.borrow_mut();
        assert_eq!(state.active, Some(self.id), "context {} is not active", self.id);
        state.active = None;
    }

    fn set_platform_name(&mut self, name: &str) {
        self.check_active();
        self.io.platform_name = name.to_string();
    }

    fn backend_flags(&self) -> BackendFlags {
        self.io.backend_flags
    }

    fn set_backend_flags(&mut self, flags: BackendFlags) {
        self.check_active();
        self.io.backend_flags = flags;
    }

    fn config_flags(&self) -> ConfigFlags {
        self.io.config_flags
    }

    fn set_clipboard_backend(&mut self, _backend: Box<dyn ClipboardBackend>) {
        self.check_active();
        self.io.has_clipboard = true;
    }

    fn display_size(&self) -> [f32; 2] {
        self.io.display_size
    }

    fn set_display_size(&mut self, size: [f32; 2]) {
        self.check_active();
        self.io.display_size = size;
    }

    fn set_delta_time(&mut self, delta_time: f32) {
        self.check_active();
        self.io.delta_time = delta_time;
    }

    fn mouse_pos(&self) -> [f32; 2] {
        self.io.mouse_pos
    }

    fn set_mouse_pos(&mut self, pos: [f32; 2]) {
        self.check_active();
        self.io.mouse_pos = pos;
    }

    fn set_mouse_down(&mut self, button: MouseButton, down: bool) {
        self.check_active();
        self.io.mouse_down[button.index()] = down;
    }

    fn want_set_mouse_pos(&self) -> bool {
        self.io.want_set_mouse_pos
    }

    fn want_text_input(&self) -> bool {
        self.io.want_text_input
    }

    fn mouse_draw_cursor(&self) -> bool {
        self.io.mouse_draw_cursor
    }

    fn mouse_cursor(&self) -> Option<CursorShape> {
        self.io.mouse_cursor
    }

    fn key_shift(&self) -> bool {
        self.io.key_shift
    }

    fn add_mouse_pos_event(&mut self, pos: [f32; 2]) {
        self.record(IoEvent::MousePos(pos));
    }

    fn add_mouse_button_event(&mut self, button: MouseButton, down: bool) {
        self.record(IoEvent::MouseButton(button, down));
    }

    fn add_mouse_wheel_event(&mut self, wheel: [f32; 2]) {
        self.record(IoEvent::Wheel(wheel));
    }

    fn add_key_event(&mut self, key: Key, down: bool) {
        self.record(IoEvent::Key(key, down));
    }

    fn add_key_analog_event(&mut self, key: Key, down: bool, value: f32) {
        self.record(IoEvent::KeyAnalog(key, down, value));
    }

    fn add_input_character(&mut self, character: char) {
        self.record(IoEvent::Char(character));
    }

    fn add_focus_event(&mut self, focused: bool) {
        self.record(IoEvent::Focus(focused));
    }

    fn has_fonts(&self) -> bool {
        self.io.has_fonts
    }

    fn font_atlas_rgba32(&mut self) -> FontAtlasImage<'_> {
        self.check_active();
        FontAtlasImage {
            width: 4,
            height: 2,
            pixels: &self.atlas,
        }
    }

    fn set_font_texture_id(&mut self, id: Option<TextureId>) {
        self.check_active();
        self.io.font_texture_id = id;
    }

    fn new_frame(&mut self) {
        self.check_active();
        self.io.frames += 1;
    }

    fn render(&mut self) -> &DrawData {
        self.check_active();
        &self.draw_data
    }
}

/// One 100x100 frame drawing a single textured quad
pub(crate) fn single_quad_frame(texture_id: TextureId) -> DrawData {
    DrawData {
        display_size: [100.0, 100.0],
        draw_lists: vec![DrawList {
            vtx_buffer: vec![DrawVert::default(); 4],
            idx_buffer: vec![0, 1, 2, 0, 2, 3],
            commands: vec![DrawCmd::Elements {
                count: 6,
                cmd_params: DrawCmdParams {
                    clip_rect: [0.0, 0.0, 100.0, 100.0],
                    texture_id,
                    vtx_offset: 0,
                    idx_offset: 0,
                },
            }],
        }],
        ..DrawData::default()
    }
}

/// Render target that only records what it was asked to draw
#[derive(Debug, Default)]
pub(crate) struct RecordingTarget {
    pub backups: u32,
    pub restores: u32,
    pub drawn_textures: Vec<TextureId>,
}

impl RenderTarget for RecordingTarget {
    type StateBackup = ();

    fn backup_state(&mut self) {
        self.backups += 1;
    }

    fn restore_state(&mut self, _backup: ()) {
        self.restores += 1;
    }

    fn set_up_render_state(&mut self, _draw_data: &DrawData, _framebuffer_size: [i32; 2]) {}

    fn upload_draw_list(&mut self, _draw_list: &DrawList) {}

    fn set_scissor(&mut self, _scissor: [i32; 4]) {}

    fn draw_elements(&mut self, texture_id: TextureId, _count: usize, _idx_offset: usize, _vtx_offset: usize) {
        self.drawn_textures.push(texture_id);
    }
}
