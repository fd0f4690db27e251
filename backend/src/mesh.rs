use super::glutils::*;
use super::math::*;
use gl::*;

pub const TRIANGLE_VERTICES: [Vec3; 3] = [
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
];

// location of `pos` in the vertex shader
pub const POSITION_ATTRIB: u32 = 0;

/// A VAO/VBO pair holding static positions.
pub struct Mesh {
    vao: u32,
    vbo: u32,
    vertex_count: i32,
}

impl Mesh {
    pub fn triangle() -> Mesh {
        Self::from_positions(&TRIANGLE_VERTICES)
    }

    pub fn from_positions(positions: &[Vec3]) -> Mesh {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        unsafe { gl::BindVertexArray(vao) };

        let mut vbo = 0;
        unsafe { gl::GenBuffers(1, &mut vbo) };
        unsafe { gl::BindBuffer(ARRAY_BUFFER, vbo) };

        gl_buffer_data_arr_stat(flatten(positions));
        gl_vertex_attrib_ptr_enab(POSITION_ATTRIB, 3, 0, 0);

        unsafe { gl::BindBuffer(ARRAY_BUFFER, 0) };
        unsafe { gl::BindVertexArray(0) };
        log_gl_err("mesh upload");

        log::debug!(
            "mesh uploaded: vao={vao} vbo={vbo} vertices={}",
            positions.len()
        );
        Mesh {
            vao,
            vbo,
            vertex_count: positions.len() as i32,
        }
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.vao) };
    }

    pub fn unbind(&self) {
        unsafe { gl::BindVertexArray(0) };
    }

    pub fn draw(&self) {
        self.bind();
        unsafe { gl::DrawArrays(TRIANGLES, 0, self.vertex_count) };
        self.unbind();
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.vbo) };
        unsafe { gl::DeleteVertexArrays(1, &self.vao) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_nine_floats() {
        let flat = flatten(&TRIANGLE_VERTICES);
        assert_eq!(flat.len(), 9);
        assert_eq!(
            flat,
            &[-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(std::mem::size_of_val(flat), 36);
    }

    #[test]
    fn triangle_lies_in_clip_space() {
        for v in TRIANGLE_VERTICES {
            for c in v.as_array() {
                assert!((-1.0..=1.0).contains(c));
            }
        }
    }
}
