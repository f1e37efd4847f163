//! Error types for the multi-window platform layer

use thiserror::Error;
use tracing::{error, warn};

use crate::platform::WindowId;

/// Result type for registry and frame operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Errors raised by the window-context registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// `init` was called twice for the same native window
    #[error("Window {0:?} already has a GUI context")]
    DuplicateWindow(WindowId),

    /// The window was never initialized, or was already shut down
    #[error("Window {0:?} has no GUI context; call `init` first")]
    UnknownWindow(WindowId),

    /// A current-context operation was issued while no window is current
    #[error("No current window")]
    NoCurrentWindow,

    /// The GUI runtime refused to create a context
    #[error("Failed to create GUI context: {reason}")]
    ContextCreation { reason: String },

    /// Building or uploading the font atlas texture failed
    #[error("Font texture upload failed: {reason}")]
    FontUpload { reason: String },

    /// A frame was started before any font was added to the atlas
    #[error("Font atlas is empty; upload a font texture before starting a frame")]
    MissingFontAtlas,
}

impl PlatformError {
    /// Create a context creation error
    pub fn context_creation(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        error!("Context creation failed: {}", reason);
        Self::ContextCreation { reason }
    }

    /// Create a font upload error
    pub fn font_upload(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!("Font texture upload failed: {}", reason);
        Self::FontUpload { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_window() {
        let err = PlatformError::UnknownWindow(WindowId(7));
        assert!(err.to_string().contains("WindowId(7)"));
        assert!(err.to_string().contains("init"));
    }

    #[test]
    fn test_font_upload_constructor() {
        let err = PlatformError::font_upload("out of video memory");
        assert_eq!(
            err,
            PlatformError::FontUpload {
                reason: "out of video memory".to_string()
            }
        );
    }
}
