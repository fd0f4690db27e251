use std::mem;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[f32; 3] {
        let ary: &[f32; 3] = unsafe { mem::transmute(self) };
        ary
    }
}

/// Views a slice of `Vec3` as the flat float array GL expects.
pub fn flatten(v: &[Vec3]) -> &[f32] {
    // Vec3 is repr(C) with three f32 fields and no padding
    unsafe { std::slice::from_raw_parts(v.as_ptr().cast(), v.len() * 3) }
}
