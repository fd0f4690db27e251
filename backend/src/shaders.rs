use super::glutils::*;
use crate::errors::ShaderError;
use gl::types::*;
use gl::*;
use std::fmt;

pub const VERTEX_SHADER_SRC: &str = r#"#version 330

layout (location = 0) in vec3 pos;

void main()
{
    gl_Position = vec4(0.4 * pos.x, 0.4 * pos.y, pos.z, 1.0);
}
"#;

pub const FRAGMENT_SHADER_SRC: &str = r#"#version 330

out vec4 colour;

void main()
{
    colour = vec4(1.0, 0.0, 0.0, 1.0);
}
"#;

// used when the driver reports a failure but leaves the info log empty
const EMPTY_LOG: &str = "<driver returned no diagnostic>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => VERTEX_SHADER,
            ShaderStage::Fragment => FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The driver calls needed to turn shader source into a linked program.
///
/// Object ids follow GL conventions: `0` means creation failed.
pub trait ShaderDriver {
    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn compile_shader(&self, shader: u32, source: &str);
    fn compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn link_status(&self, program: u32) -> bool;
    fn validate_program(&self, program: u32);
    fn validate_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn delete_program(&self, program: u32);
    fn use_program(&self, program: u32);
}

/// Direct calls against the context current on this thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeGl;

impl ShaderDriver for NativeGl {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn compile_shader(&self, shader: u32, source: &str) {
        unsafe {
            gl::ShaderSource(
                shader,
                1,
                &(source.as_bytes().as_ptr().cast()),
                &(source.len() as GLint),
            );
        }
        unsafe { gl::CompileShader(shader) };
    }

    fn compile_status(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, INFO_LOG_LENGTH, &mut len) };
        let mut v = vec![0u8; len.max(1) as usize];
        let mut written = 0_i32;
        unsafe {
            gl::GetShaderInfoLog(shader, v.len() as GLsizei, &mut written, v.as_mut_ptr().cast())
        };
        info_log_to_string(v, written.max(0) as usize)
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn link_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, LINK_STATUS, &mut success) };
        success != 0
    }

    fn validate_program(&self, program: u32) {
        unsafe { gl::ValidateProgram(program) };
    }

    fn validate_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, VALIDATE_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, INFO_LOG_LENGTH, &mut len) };
        let mut v = vec![0u8; len.max(1) as usize];
        let mut written = 0_i32;
        unsafe {
            gl::GetProgramInfoLog(program, v.len() as GLsizei, &mut written, v.as_mut_ptr().cast())
        };
        info_log_to_string(v, written.max(0) as usize)
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }
}

/// A linked vertex + fragment program.
///
/// Validation depends on the GL state at build time (bound VAO, samplers),
/// so a failed `glValidateProgram` is kept as a diagnostic, not an error.
pub struct ShaderProgram<D: ShaderDriver = NativeGl> {
    program_id: u32,
    validation_log: Option<String>,
    driver: D,
}

impl ShaderProgram<NativeGl> {
    /// Builds the hardcoded triangle program on the current context.
    pub fn from_default_sources() -> Result<Self, ShaderError> {
        Self::build(NativeGl, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC)
    }
}

impl<D: ShaderDriver> ShaderProgram<D> {
    pub fn build(driver: D, vertex_code: &str, fragment_code: &str) -> Result<Self, ShaderError> {
        let program = driver.create_program();
        if program == 0 {
            return Err(ShaderError::CreateProgram);
        }

        let mut shaders = Vec::with_capacity(2);
        for (stage, code) in [
            (ShaderStage::Vertex, vertex_code),
            (ShaderStage::Fragment, fragment_code),
        ] {
            match Self::add_shader(&driver, program, stage, code) {
                Ok(shader) => shaders.push(shader),
                Err(e) => {
                    Self::discard(&driver, program, &shaders);
                    return Err(e);
                }
            }
        }

        driver.link_program(program);
        if !driver.link_status(program) {
            let log = non_empty(driver.program_info_log(program));
            Self::discard(&driver, program, &shaders);
            return Err(ShaderError::Link { log });
        }

        driver.validate_program(program);
        let validation_log = if driver.validate_status(program) {
            None
        } else {
            let log = non_empty(driver.program_info_log(program));
            log::warn!("shader program {program} failed validation: {log}");
            Some(log)
        };

        // the program keeps the linked binaries
        for shader in shaders {
            driver.delete_shader(shader);
        }

        log::debug!("shader program {program} linked");
        Ok(ShaderProgram {
            program_id: program,
            validation_log,
            driver,
        })
    }

    /// Compiles one stage and attaches it to `program`. The shader is
    /// attached only when the driver reports a successful compile.
    fn add_shader(
        driver: &D,
        program: u32,
        stage: ShaderStage,
        code: &str,
    ) -> Result<u32, ShaderError> {
        check_source(stage, code)?;

        let shader = driver.create_shader(stage);
        if shader == 0 {
            return Err(ShaderError::CreateShader(stage));
        }

        driver.compile_shader(shader, code);
        if !driver.compile_status(shader) {
            let log = non_empty(driver.shader_info_log(shader));
            driver.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }

        driver.attach_shader(program, shader);
        Ok(shader)
    }

    fn discard(driver: &D, program: u32, shaders: &[u32]) {
        for &shader in shaders {
            driver.delete_shader(shader);
        }
        driver.delete_program(program);
    }

    pub fn id(&self) -> u32 {
        self.program_id
    }

    /// Driver log from a failed `glValidateProgram`, if it failed.
    pub fn validation_log(&self) -> Option<&str> {
        self.validation_log.as_deref()
    }

    pub fn use_program(&self) {
        self.driver.use_program(self.program_id);
    }
}

impl<D: ShaderDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        self.driver.delete_program(self.program_id);
    }
}

fn check_source(stage: ShaderStage, code: &str) -> Result<(), ShaderError> {
    if code.trim().is_empty() {
        return Err(ShaderError::InvalidSource {
            stage,
            reason: "source is empty".to_string(),
        });
    }
    if code.contains('\0') {
        return Err(ShaderError::InvalidSource {
            stage,
            reason: "source contains a NUL byte".to_string(),
        });
    }
    if i32::try_from(code.len()).is_err() {
        return Err(ShaderError::InvalidSource {
            stage,
            reason: format!("source is too long ({} bytes)", code.len()),
        });
    }
    Ok(())
}

fn non_empty(log: String) -> String {
    if log.trim().is_empty() {
        EMPTY_LOG.to_string()
    } else {
        log
    }
}
