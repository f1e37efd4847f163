//! Multi-window platform layer for Dear ImGui
//!
//! Every native window gets its own, fully isolated GUI context. A
//! [`Registry`] owns those contexts, keeps the runtime's active context in
//! sync with the window currently being driven, turns toolkit events and
//! polled device state into the runtime's I/O block once per frame, and
//! replays the finished draw lists through a [`RenderTarget`].
//!
//! The GUI runtime and the windowing toolkit are reached through traits
//! ([`GuiRuntime`]/[`GuiContext`] and [`Platform`]/[`PlatformWindow`]).
//!
//! # Features
//!
//! - **`glow`**: an OpenGL [`RenderTarget`] and font texture upload on top of `glow`
//! - **`winit`**: translation of `winit` window events into [`Event`]
//! - **`serde`**: serialization of [`GamepadConfig`] and the flag types
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use dear_imgui_multiwindow::{InitConfig, Registry};
//!
//! let mut registry = Registry::new(platform, runtime);
//! registry.init(&main_window, InitConfig::default())?;
//! registry.init(&tool_window, InitConfig::default())?;
//!
//! // Per frame, per window:
//! for event in main_window_events {
//!     registry.process_event(&main_window, &event)?;
//! }
//! registry.update(&main_window, Duration::from_millis(16))?;
//! // ... build the UI through registry.gui_mut()? ...
//! registry.render(&main_window, &mut main_target)?;
//!
//! registry.shutdown_window(tool_window.id())?;
//! registry.shutdown();
//! ```

mod context;
mod cursor;
mod draw;
mod error;
mod events;
mod frame;
mod gamepad;
mod input;
mod platform;
mod registry;
mod renderer;
mod runtime;

#[cfg(feature = "glow")]
pub mod glow;

#[cfg(feature = "winit")]
pub mod winit;

#[cfg(test)]
mod test_util;

pub use context::*;
pub use cursor::*;
pub use draw::*;
pub use error::*;
pub use events::*;
pub use gamepad::*;
pub use input::*;
pub use platform::*;
pub use registry::*;
pub use renderer::*;
pub use runtime::*;
