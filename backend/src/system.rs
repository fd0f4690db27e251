use gl;
use sdl2;
use sdl2::event::{Event, WindowEvent};
use sdl2::video::{GLProfile, SwapInterval};
use std::time::Duration;

use crate::config::WindowConfig;
use crate::errors::SystemError;
use crate::glutils::log_context_info;

/// Drawable size of the window in pixels. Both dimensions are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferSize {
    pub width: u32,
    pub height: u32,
}

impl FramebufferSize {
    pub fn new(width: i64, height: i64) -> Option<FramebufferSize> {
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(FramebufferSize {
            width: u32::try_from(width).ok()?,
            height: u32::try_from(height).ok()?,
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl TryFrom<(u32, u32)> for FramebufferSize {
    type Error = SystemError;

    fn try_from((w, h): (u32, u32)) -> Result<Self, Self::Error> {
        FramebufferSize::new(w.into(), h.into()).ok_or(SystemError::Framebuffer {
            width: w.into(),
            height: h.into(),
        })
    }
}

/// Entry points past GL 1.1 the renderer calls.
fn missing_gl_functions() -> Vec<&'static str> {
    let required = [
        ("glCreateShader", gl::CreateShader::is_loaded()),
        ("glShaderSource", gl::ShaderSource::is_loaded()),
        ("glCompileShader", gl::CompileShader::is_loaded()),
        ("glCreateProgram", gl::CreateProgram::is_loaded()),
        ("glLinkProgram", gl::LinkProgram::is_loaded()),
        ("glValidateProgram", gl::ValidateProgram::is_loaded()),
        ("glUseProgram", gl::UseProgram::is_loaded()),
        ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
        ("glBindVertexArray", gl::BindVertexArray::is_loaded()),
        ("glGenBuffers", gl::GenBuffers::is_loaded()),
        ("glBufferData", gl::BufferData::is_loaded()),
        ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded()),
    ];
    required
        .iter()
        .filter(|(_, loaded)| !loaded)
        .map(|(name, _)| *name)
        .collect()
}

/// Differences between the requested core context and the one the driver made.
fn context_mismatches(
    requested: (u8, u8),
    profile: GLProfile,
    version: (u8, u8),
) -> Vec<String> {
    let mut out = Vec::new();
    if profile != GLProfile::Core {
        out.push(format!("requested a core profile, driver gave {profile:?}"));
    }
    if version != requested {
        out.push(format!(
            "requested OpenGL {}.{}, driver gave {}.{}",
            requested.0, requested.1, version.0, version.1
        ));
    }
    out
}

pub struct System {
    pub framebuffer: FramebufferSize,
    frame_interval: Option<Duration>,
    // drop order: context, window, event pump, subsystems
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(config: &WindowConfig) -> Result<System, SystemError> {
        config.validate()?;

        let sdl_context = sdl2::init().map_err(SystemError::Init)?;
        let video_subsystem = sdl_context.video().map_err(SystemError::Init)?;
        log::debug!("SDL video driver: {}", video_subsystem.current_video_driver());

        let (major, minor) = config.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        // no backwards compatibility, forward compatible
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(major, minor);
        gl_attr.set_context_flags().forward_compatible().set();
        gl_attr.set_double_buffer(true);

        let window = match video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .position_centered()
            .build()
        {
            Ok(w) => w,
            Err(e) => return Err(SystemError::Window(e.to_string())),
        };

        let gl_ctx = window.gl_create_context().map_err(SystemError::Context)?;
        window.gl_make_current(&gl_ctx).map_err(SystemError::Context)?;

        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
        let missing = missing_gl_functions();
        if !missing.is_empty() {
            return Err(SystemError::Loader(missing));
        }

        for mismatch in context_mismatches(
            (major, minor),
            gl_attr.context_profile(),
            gl_attr.context_version(),
        ) {
            log::warn!("{mismatch}");
        }

        let framebuffer = FramebufferSize::try_from(window.drawable_size())?;
        unsafe {
            gl::Viewport(
                0,
                0,
                framebuffer.width as i32,
                framebuffer.height as i32,
            )
        };

        let interval = if config.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        let vsync_active = match video_subsystem.gl_set_swap_interval(interval) {
            Ok(()) => config.vsync,
            Err(e) => {
                log::warn!("could not set swap interval: {e}");
                false
            }
        };

        let event_pump = sdl_context.event_pump().map_err(SystemError::Init)?;

        log_context_info();
        log::info!(
            "window {}x{}, framebuffer {}x{}",
            config.width,
            config.height,
            framebuffer.width,
            framebuffer.height
        );

        Ok(System {
            framebuffer,
            frame_interval: config.sleep_interval(vsync_active),
            gl_ctx,
            window,
            event_pump,
            video_subsystem,
            sdl_context,
        })
    }

    pub fn framebuffer_size(&self) -> FramebufferSize {
        self.framebuffer
    }

    /// Drains pending events. Returns `false` once the window was asked to close.
    pub fn process_io_events(&mut self) -> bool {
        let mut keep_running = true;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::Window {
                    win_event: WindowEvent::Close,
                    ..
                } => keep_running = false,
                _ => {}
            }
        }
        if !keep_running {
            log::debug!("close requested");
        }
        keep_running
    }

    pub fn draw_to_screen(&self) {
        self.window.gl_swap_window();
        if let Some(interval) = self.frame_interval {
            ::std::thread::sleep(interval);
        }
    }

    pub fn clear_screen(&self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framebuffer_size_must_be_positive() {
        assert_eq!(
            FramebufferSize::new(800, 600),
            Some(FramebufferSize {
                width: 800,
                height: 600
            })
        );
        assert_eq!(FramebufferSize::new(0, 600), None);
        assert_eq!(FramebufferSize::new(800, -1), None);
        assert_eq!(FramebufferSize::new(i64::from(u32::MAX) + 1, 1), None);
    }

    #[test]
    fn context_mismatches_are_reported_not_fatal() {
        assert!(context_mismatches((3, 3), GLProfile::Core, (3, 3)).is_empty());

        let found = context_mismatches((3, 3), GLProfile::Compatibility, (4, 6));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], "requested a core profile, driver gave Compatibility");
        assert_eq!(found[1], "requested OpenGL 3.3, driver gave 4.6");
    }

    #[test]
    fn unknown_video_driver_fails_library_init() {
        std::env::set_var("SDL_VIDEODRIVER", "no_such_driver");
        match System::new(&WindowConfig::default()) {
            Err(e @ SystemError::Init(_)) => assert_eq!(e.exit_code(), 1),
            Err(other) => panic!("expected an init failure, got {other}"),
            Ok(_) => panic!("window opened with a bogus video driver"),
        }
    }

    #[test]
    fn framebuffer_from_drawable_size() {
        let fb = FramebufferSize::try_from((1600, 1200)).unwrap();
        assert_eq!(fb.aspect_ratio(), 4.0 / 3.0);

        match FramebufferSize::try_from((0, 0)) {
            Err(SystemError::Framebuffer { width, height }) => {
                assert_eq!((width, height), (0, 0))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
