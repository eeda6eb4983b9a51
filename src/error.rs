use thiserror::Error;

use crate::abs::ShaderError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A buffer or vertex array could not be allocated.
    #[error("GPU resource allocation failed: {0}")]
    Gpu(String),
    /// Vertex data that does not split into whole vertices of 1 to 4 components.
    #[error("{len} floats do not form whole vertices of {components} components")]
    Layout { components: i32, len: usize },
    #[error("no rendering context available: {0}")]
    NoContext(String),
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}
