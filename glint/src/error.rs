use crate::shader::ShaderStage;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between bootstrap and the last frame.
#[derive(Error, Debug)]
pub enum GlintError {
    #[error("glfw initialization error")]
    GlfwInit(#[from] glfw::InitError),
    #[error("window creation failed")]
    WindowCreation,
    #[error("could not read shader source at {0:?}")]
    SourceIo(PathBuf, #[source] std::io::Error),
    #[error("{stage} shader compilation error:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("program link error:\n{0}")]
    ProgramLink(String),
    #[error("no uniform named `{0}` in linked program")]
    UnknownUniform(String),
    #[error("gl object allocation error: {0}")]
    Allocation(String),
    #[error("vertex data length {len} does not divide into vertices of {floats} floats")]
    MisalignedVertexData { len: usize, floats: usize },
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: u32 },
    #[error("texture decode error")]
    TextureDecode(#[from] image::ImageError),
    #[error("gl error {code:#06x} during {context}")]
    Gl { context: &'static str, code: u32 },
}

pub type Result<T> = std::result::Result<T, GlintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_errors_name_the_offender() {
        let err = GlintError::IndexOutOfRange {
            index: 4,
            vertex_count: 4,
        };
        assert_eq!(err.to_string(), "index 4 out of range for 4 vertices");
    }

    #[test]
    fn gl_errors_format_the_code_as_hex() {
        let err = GlintError::Gl {
            context: "frame",
            code: 0x0502,
        };
        assert_eq!(err.to_string(), "gl error 0x0502 during frame");
    }
}
