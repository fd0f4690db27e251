use thiserror::Error;

use crate::shaders::ShaderStage;

/// Startup failures. Each one is fatal for the binary.
#[derive(Error, Debug)]
pub enum SystemError {
    #[error("library init failed: {0}")]
    Init(String),

    #[error("window creation failed: {0}")]
    Window(String),

    #[error("OpenGL context creation failed: {0}")]
    Context(String),

    #[error("OpenGL function loading failed, missing: {}", .0.join(", "))]
    Loader(Vec<&'static str>),

    #[error("invalid framebuffer size {width}x{height}")]
    Framebuffer { width: i64, height: i64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SystemError {
    /// Process exit status the binary reports for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    #[error("glCreateShader({0}) failed")]
    CreateShader(ShaderStage),

    #[error("glCreateProgram failed")]
    CreateProgram,

    #[error("{stage} shader source is not valid: {reason}")]
    InvalidSource { stage: ShaderStage, reason: String },

    #[error("{stage} shader compilation error: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("program link error: {log}")]
    Link { log: String },
}

impl ShaderError {
    /// Driver diagnostic attached to this failure, if any.
    pub fn log(&self) -> Option<&str> {
        match self {
            ShaderError::Compile { log, .. }
            | ShaderError::Link { log } => Some(log),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("OpenGL error {name} (0x{code:04X})")]
pub struct GlError {
    pub code: u32,
    pub name: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_error_lists_missing_functions() {
        let err = SystemError::Loader(vec!["glCreateShader", "glGenVertexArrays"]);
        assert_eq!(
            err.to_string(),
            "OpenGL function loading failed, missing: glCreateShader, glGenVertexArrays"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn every_startup_failure_exits_with_one() {
        let errs = [
            SystemError::Init("no video device".into()),
            SystemError::Window("no display".into()),
            SystemError::Context("3.3 unsupported".into()),
            SystemError::Loader(vec!["glBufferData"]),
        ];
        for err in errs {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    #[test]
    fn compile_error_carries_stage_and_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: syntax error".into(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader compilation error: 0:3(1): error: syntax error"
        );
        assert_eq!(err.log(), Some("0:3(1): error: syntax error"));
        assert_eq!(ShaderError::CreateProgram.log(), None);
    }

    #[test]
    fn gl_error_display() {
        let err = GlError {
            code: 0x0502,
            name: "GL_INVALID_OPERATION",
        };
        assert_eq!(err.to_string(), "OpenGL error GL_INVALID_OPERATION (0x0502)");
    }
}
