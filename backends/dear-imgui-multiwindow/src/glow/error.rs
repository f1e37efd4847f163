//! Error types for the OpenGL render target

use thiserror::Error;

/// Errors that can occur while creating OpenGL resources
#[derive(Error, Debug)]
pub enum GlowError {
    /// Failed to create OpenGL buffer object
    #[error("Failed to create buffer object: {0}")]
    CreateBufferObject(String),

    /// Failed to create OpenGL texture
    #[error("Failed to create texture: {0}")]
    CreateTexture(String),

    /// Pixel data does not match the requested texture size
    #[error("Expected {expected} bytes of RGBA pixels, got {actual}")]
    PixelDataSize { expected: usize, actual: usize },

    /// Failed to create OpenGL shader
    #[error("Failed to create shader: {0}")]
    CreateShader(String),

    /// Failed to compile shader
    #[error("Failed to compile shader: {0}")]
    CompileShader(String),

    /// Failed to link shader program
    #[error("Failed to link program: {0}")]
    LinkProgram(String),

    /// A vertex attribute is missing from the linked program
    #[error("Shader attribute `{0}` not found")]
    MissingAttribute(&'static str),

    /// Failed to create vertex array object
    #[error("Failed to create vertex array: {0}")]
    CreateVertexArray(String),
}

/// Result type for OpenGL resource creation
pub type GlowResult<T> = Result<T, GlowError>;
