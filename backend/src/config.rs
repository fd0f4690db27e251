use std::time::Duration;

use crate::errors::SystemError;

/// Window and context parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    // (major, minor)
    pub gl_version: (u8, u8),
    // r, g, b, a
    pub clear_color: [f32; 4],
    pub vsync: bool,
    /// Frames per second the loop is paced to; `None` disables pacing.
    pub frame_rate: Option<u32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Test Window".to_string(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
            clear_color: [0.0, 1.0, 0.0, 1.0],
            vsync: true,
            frame_rate: Some(60),
        }
    }
}

impl WindowConfig {
    pub fn frame_interval(&self) -> Option<Duration> {
        match self.frame_rate {
            Some(fps) if fps > 0 => Some(Duration::new(0, 1_000_000_000u32 / fps)),
            _ => None,
        }
    }

    /// Sleep after each swap. Vsync already paces the loop, so the sleep is
    /// only used when the driver is not syncing to the display.
    pub fn sleep_interval(&self, vsync_active: bool) -> Option<Duration> {
        if vsync_active {
            return None;
        }
        self.frame_interval()
    }

    pub fn validate(&self) -> Result<(), SystemError> {
        if self.width == 0 || self.height == 0 {
            return Err(SystemError::InvalidConfig(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.gl_version.0 < 3 {
            return Err(SystemError::InvalidConfig(format!(
                "core profile needs OpenGL 3.2 or later, got {}.{}",
                self.gl_version.0, self.gl_version.1
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_bring_up_window() {
        let cfg = WindowConfig::default();
        assert_eq!(cfg.title, "Test Window");
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert_eq!(cfg.gl_version, (3, 3));
        assert_eq!(cfg.clear_color, [0.0, 1.0, 0.0, 1.0]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn frame_interval() {
        let mut cfg = WindowConfig::default();
        assert_eq!(cfg.frame_interval(), Some(Duration::new(0, 16_666_666)));
        cfg.frame_rate = Some(0);
        assert_eq!(cfg.frame_interval(), None);
        cfg.frame_rate = None;
        assert_eq!(cfg.frame_interval(), None);
    }

    #[test]
    fn vsync_replaces_the_frame_sleep() {
        let cfg = WindowConfig::default();
        assert!(cfg.vsync);
        assert_eq!(cfg.sleep_interval(true), None);
        // swap interval refused by the driver: fall back to fixed pacing
        assert_eq!(cfg.sleep_interval(false), Some(Duration::new(0, 16_666_666)));

        let unpaced = WindowConfig {
            frame_rate: None,
            ..WindowConfig::default()
        };
        assert_eq!(unpaced.sleep_interval(false), None);
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let cfg = WindowConfig {
            height: 0,
            ..WindowConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SystemError::InvalidConfig(_))));
    }

    #[test]
    fn legacy_gl_version_is_rejected() {
        let cfg = WindowConfig {
            gl_version: (2, 1),
            ..WindowConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
