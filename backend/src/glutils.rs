use gl::{types::*, *};
use std::ffi::CStr;

use crate::errors::GlError;

pub fn gl_error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "GL_UNKNOWN_ERROR",
    }
}

pub fn check_gl_err() -> Result<(), GlError> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return Ok(());
    }
    Err(GlError {
        code: err,
        name: gl_error_name(err),
    })
}

/// Like [`check_gl_err`], but only logs. Used on the per-frame path.
pub fn log_gl_err(what: &str) {
    if let Err(e) = check_gl_err() {
        log::warn!("{what}: {e}");
    }
}

pub fn gl_string(name: GLenum) -> Option<String> {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return None;
    }
    let s = unsafe { CStr::from_ptr(ptr.cast()) };
    Some(s.to_string_lossy().into_owned())
}

pub fn log_context_info() {
    let info = [
        ("GL_VERSION", VERSION),
        ("GL_RENDERER", RENDERER),
        ("GL_VENDOR", VENDOR),
        ("GL_SHADING_LANGUAGE_VERSION", SHADING_LANGUAGE_VERSION),
    ];
    for (label, name) in info {
        match gl_string(name) {
            Some(v) => log::info!("{label} = {v}"),
            None => log::warn!("{label} unavailable"),
        }
    }
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

/// Describes float attribute `index` and enables it. `stride` and `pointer`
/// are counted in floats.
pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}

/// Turns a driver info log buffer into text: cut at the reported length,
/// strip the trailing NUL and whitespace.
pub fn info_log_to_string(mut buf: Vec<u8>, written: usize) -> String {
    buf.truncate(written);
    while let Some(&last) = buf.last() {
        if last == 0 || last.is_ascii_whitespace() {
            buf.pop();
        } else {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
