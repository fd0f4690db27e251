pub mod config;
pub mod errors;
pub mod glutils;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod render;
pub mod shaders;
pub mod system;
