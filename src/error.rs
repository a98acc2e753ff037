//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::gpu::shader_composer::ShaderError;

/// Errors produced by the scrollscene crate.
#[derive(Debug)]
pub enum SceneError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// A WGSL shader failed to compose.
    Shader(ShaderError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// The gradient map could not be decoded.
    TextureLoad(String),
    /// Viewer or host event-loop failure.
    Viewer(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(e) => write!(f, "shader error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::TextureLoad(msg) => {
                write!(f, "texture load error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Shader(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for SceneError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ShaderError> for SceneError {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
