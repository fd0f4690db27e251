use crate::errors::ShaderError;
use crate::glutils::log_gl_err;
use crate::mesh::Mesh;
use crate::shaders::ShaderProgram;
use crate::system::System;

/// Everything a frame needs. The triangle is only drawn when both the mesh
/// and a working program are present.
pub struct RenderContext {
    pub clear_color: [f32; 4],
    mesh: Option<Mesh>,
    program: Option<ShaderProgram>,
    shader_error: Option<ShaderError>,
}

impl RenderContext {
    pub fn new(clear_color: [f32; 4]) -> RenderContext {
        RenderContext {
            clear_color,
            mesh: None,
            program: None,
            shader_error: None,
        }
    }

    /// Uploads the triangle and builds its program. A shader failure is
    /// logged and recorded; the context keeps clearing but never draws.
    pub fn with_triangle(mut self) -> RenderContext {
        let mesh = Mesh::triangle();
        // core profiles validate against the bound VAO
        mesh.bind();
        let built = ShaderProgram::from_default_sources();
        mesh.unbind();
        self.mesh = Some(mesh);

        match built {
            Ok(program) => self.program = Some(program),
            Err(e) => {
                log::error!("{e}; the triangle will not be drawn");
                self.shader_error = Some(e);
            }
        }
        self
    }

    pub fn can_draw(&self) -> bool {
        self.mesh.is_some() && self.program.is_some()
    }

    pub fn shader_error(&self) -> Option<&ShaderError> {
        self.shader_error.as_ref()
    }

    pub fn render_frame(&self, system: &System) {
        system.clear_screen(self.clear_color);

        if let (Some(mesh), Some(program)) = (&self.mesh, &self.program) {
            program.use_program();
            mesh.draw();
            unsafe { gl::UseProgram(0) };
        }
        log_gl_err("render_frame");
    }
}
