//! Registry of per-window GUI contexts
//!
//! Every native window gets its own GUI context. The registry tracks which
//! window is current and keeps that window's context active in the runtime;
//! all other contexts stay suspended.

use std::time::Duration;

use tracing::debug;

use crate::context::WindowContext;
use crate::error::{PlatformError, PlatformResult};
use crate::events::Event;
use crate::gamepad::{GamepadConfig, MAX_JOYSTICKS};
use crate::platform::{Platform, PlatformWindow, WindowId};
use crate::renderer::{RenderTarget, render_draw_data};
use crate::runtime::{GuiContext, GuiRuntime};

/// Options for [`Registry::init`]
#[derive(Clone, Debug)]
pub struct InitConfig {
    /// Display size of the new context; the window size when `None`
    pub display_size: Option<[f32; 2]>,
    /// Build and upload the font atlas right away
    pub load_default_font: bool,
    pub gamepad: GamepadConfig,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            display_size: None,
            load_default_font: true,
            gamepad: GamepadConfig::default(),
        }
    }
}

impl InitConfig {
    pub fn with_display_size(mut self, display_size: [f32; 2]) -> Self {
        self.display_size = Some(display_size);
        self
    }

    /// Skip the font upload; the caller provides the font texture
    pub fn without_default_font(mut self) -> Self {
        self.load_default_font = false;
        self
    }

    pub fn with_gamepad(mut self, gamepad: GamepadConfig) -> Self {
        self.gamepad = gamepad;
        self
    }
}

/// Live window contexts plus the current window
pub struct Registry<P: Platform, R: GuiRuntime> {
    platform: P,
    runtime: R,
    contexts: Vec<WindowContext<P, R::Context>>,
    current: Option<WindowId>,
}

impl<P: Platform, R: GuiRuntime> Registry<P, R> {
    pub fn new(platform: P, runtime: R) -> Self {
        Self {
            platform,
            runtime,
            contexts: Vec::new(),
            current: None,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Create a GUI context for `window` and make it current
    ///
    /// A failed font upload is reported after the context was registered; it
    /// stays current without a font texture.
    pub fn init(&mut self, window: &P::Window, config: InitConfig) -> PlatformResult<()> {
        let id = window.id();
        if self.contains(id) {
            return Err(PlatformError::DuplicateWindow(id));
        }

        let gui = self
            .runtime
            .create_context()
            .map_err(PlatformError::context_creation)?;

        if let Some(current) = self.current_index() {
            self.contexts[current].gui.suspend();
        }
        let mut context = WindowContext::new(window, gui, &self.platform, config.gamepad);
        context.gui.activate();

        let display_size = config.display_size.unwrap_or_else(|| {
            let [width, height] = window.size();
            [width as f32, height as f32]
        });
        context.configure(&self.platform, display_size);

        self.contexts.push(context);
        self.current = Some(id);
        debug!(
            "Initialized GUI context for window {:?} ({} live)",
            id,
            self.contexts.len()
        );

        if config.load_default_font {
            self.update_font_texture()?;
        }
        Ok(())
    }

    /// Make `window` current and activate its GUI context
    pub fn set_current_window(&mut self, window: WindowId) -> PlatformResult<()> {
        if self.current == Some(window) {
            return Ok(());
        }
        let index = self
            .index_of(window)
            .ok_or(PlatformError::UnknownWindow(window))?;

        if let Some(current) = self.current_index() {
            self.contexts[current].gui.suspend();
        }
        self.contexts[index].gui.activate();
        self.current = Some(window);
        debug!("Current window is now {:?}", window);
        Ok(())
    }

    /// Destroy the context of `window`
    ///
    /// If it was current, some other live window becomes current, or none if
    /// the registry is empty. Which survivor is picked is unspecified.
    ///
    /// The window's font texture and cursors are dropped inside this call.
    /// Graphics-backed textures such as `GlowTexture` delete their object in
    /// whatever graphics context is current at that moment, so make the
    /// window's own graphics context current before shutting it down.
    pub fn shutdown_window(&mut self, window: WindowId) -> PlatformResult<()> {
        let index = self
            .index_of(window)
            .ok_or(PlatformError::UnknownWindow(window))?;
        let was_current = self.current == Some(window);

        let mut context = self.contexts.remove(index);
        if was_current {
            context.gui.suspend();
        }
        drop(context);

        if was_current {
            self.current = self.contexts.first().map(WindowContext::window);
            if let Some(next) = self.contexts.first_mut() {
                next.gui.activate();
            }
        }
        debug!(
            "Shut down window {:?}, current is {:?} ({} live)",
            window,
            self.current,
            self.contexts.len()
        );
        Ok(())
    }

    /// Destroy every context
    pub fn shutdown(&mut self) {
        if let Some(current) = self.current_index() {
            self.contexts[current].gui.suspend();
        }
        self.contexts.clear();
        self.current = None;
        debug!("Shut down all GUI contexts");
    }

    /// Route an event delivered to `window`, making it current
    pub fn process_event(&mut self, window: &P::Window, event: &Event) -> PlatformResult<()> {
        self.set_current_window(window.id())?;
        self.process_current_event(event)
    }

    /// Route an event to the current window
    pub fn process_current_event(&mut self, event: &Event) -> PlatformResult<()> {
        let (platform, context) = self.current_parts()?;
        context.handle_event(platform, event);
        Ok(())
    }

    /// Begin a frame for `window`, sized to the window
    pub fn update(&mut self, window: &P::Window, delta_time: Duration) -> PlatformResult<()> {
        let [width, height] = window.size();
        self.update_with_display_size(window, [width as f32, height as f32], delta_time)
    }

    /// Begin a frame for `window` with an explicit render-target size
    pub fn update_with_display_size(
        &mut self,
        window: &P::Window,
        display_size: [f32; 2],
        delta_time: Duration,
    ) -> PlatformResult<()> {
        self.set_current_window(window.id())?;
        let (platform, context) = self.current_parts()?;
        context.update_mouse_cursor(platform, window);
        let mouse_pos = context.resolve_mouse_position(platform, window);
        context.prepare_frame(platform, mouse_pos, display_size, delta_time)
    }

    /// Begin a frame for the current window with a caller-supplied mouse position
    pub fn update_with_mouse(
        &mut self,
        mouse_pos: [i32; 2],
        display_size: [f32; 2],
        delta_time: Duration,
    ) -> PlatformResult<()> {
        let (platform, context) = self.current_parts()?;
        context.prepare_frame(platform, mouse_pos, display_size, delta_time)
    }

    /// Finish the frame of `window` and replay it into `target`
    pub fn render<T: RenderTarget + ?Sized>(
        &mut self,
        window: &P::Window,
        target: &mut T,
    ) -> PlatformResult<()> {
        self.set_current_window(window.id())?;
        self.render_current(target)
    }

    /// Finish the frame of the current window and replay it into `target`
    pub fn render_current<T: RenderTarget + ?Sized>(&mut self, target: &mut T) -> PlatformResult<()> {
        let context = self.current_mut()?;
        let draw_data = context.gui.render();
        render_draw_data(target, draw_data);
        Ok(())
    }

    /// Rebuild the font atlas of the current context and upload it
    pub fn update_font_texture(&mut self) -> PlatformResult<()> {
        let (platform, context) = self.current_parts()?;
        context.update_font_texture(platform)
    }

    /// Font texture of the current context
    pub fn font_texture(&self) -> PlatformResult<Option<&P::Texture>> {
        Ok(self.current()?.font_texture())
    }

    /// Feed gamepad navigation of the current context from `joystick`
    ///
    /// # Panics
    ///
    /// Panics if `joystick` is not below [`MAX_JOYSTICKS`].
    pub fn set_active_joystick_id(&mut self, joystick: u32) -> PlatformResult<()> {
        assert!(joystick < MAX_JOYSTICKS, "joystick id {joystick} out of range");
        self.current_mut()?.joystick = Some(joystick);
        Ok(())
    }

    /// Gamepad mapping and calibration of the current context
    pub fn gamepad_config_mut(&mut self) -> PlatformResult<&mut GamepadConfig> {
        Ok(&mut self.current_mut()?.gamepad)
    }

    pub fn current_window(&self) -> Option<WindowId> {
        self.current
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.index_of(window).is_some()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.contexts.iter().map(WindowContext::window)
    }

    pub fn context(&self, window: WindowId) -> Option<&WindowContext<P, R::Context>> {
        self.contexts.iter().find(|context| context.window == window)
    }

    pub fn current(&self) -> PlatformResult<&WindowContext<P, R::Context>> {
        let index = self.current_index().ok_or(PlatformError::NoCurrentWindow)?;
        Ok(&self.contexts[index])
    }

    pub fn current_mut(&mut self) -> PlatformResult<&mut WindowContext<P, R::Context>> {
        let index = self.current_index().ok_or(PlatformError::NoCurrentWindow)?;
        Ok(&mut self.contexts[index])
    }

    /// GUI context of the current window, for issuing widget calls
    pub fn gui(&self) -> PlatformResult<&R::Context> {
        Ok(self.current()?.gui())
    }

    pub fn gui_mut(&mut self) -> PlatformResult<&mut R::Context> {
        Ok(self.current_mut()?.gui_mut())
    }

    fn index_of(&self, window: WindowId) -> Option<usize> {
        self.contexts.iter().position(|context| context.window == window)
    }

    fn current_index(&self) -> Option<usize> {
        self.current.and_then(|window| self.index_of(window))
    }

    fn current_parts(&mut self) -> PlatformResult<(&P, &mut WindowContext<P, R::Context>)> {
        let index = self.current_index().ok_or(PlatformError::NoCurrentWindow)?;
        Ok((&self.platform, &mut self.contexts[index]))
    }
}
