//! # Configuration
//!
//! Constants consumed by the simulation and the window wrapper. Defaults match
//! the classic 800x600 setup; selected values can be overridden through
//! `LIFE_*` environment variables with [`LifeConfig::from_env`].

use std::time::Duration;

use crate::error::{LifeError, LifeResult};

/// Runtime configuration for the simulation and its window
#[derive(Debug, Clone, PartialEq)]
pub struct LifeConfig {
    /// Window title; the frame rate is appended at runtime
    pub title: String,
    /// Visible surface width in pixels
    pub window_width: u32,
    /// Visible surface height in pixels
    pub window_height: u32,
    /// Simulation grid width in cells (independent of the window)
    pub sim_width: u32,
    /// Simulation grid height in cells (independent of the window)
    pub sim_height: u32,
    /// Target frames per second
    pub fps: u32,
    /// Display colour for live cells (normalized RGBA)
    pub alive_color: [f32; 4],
    /// Display colour for dead cells (normalized RGBA)
    pub dead_color: [f32; 4],
    /// How often the frame rate in the title is refreshed
    pub fps_display_interval: Duration,
    /// Fixed seed for the initial random fill; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            title: "Game of Life".to_string(),
            window_width: 800,
            window_height: 600,
            sim_width: 800,
            sim_height: 600,
            fps: 60,
            alive_color: [222.0 / 255.0, 222.0 / 255.0, 222.0 / 255.0, 1.0],
            dead_color: [45.0 / 255.0, 45.0 / 255.0, 45.0 / 255.0, 1.0],
            fps_display_interval: Duration::from_millis(100),
            seed: None,
        }
    }
}

impl LifeConfig {
    /// Defaults with environment overrides applied.
    ///
    /// Recognised variables: `LIFE_WINDOW_WIDTH`, `LIFE_WINDOW_HEIGHT`,
    /// `LIFE_SIM_WIDTH`, `LIFE_SIM_HEIGHT`, `LIFE_FPS`, `LIFE_SEED`.
    /// Values that fail to parse are ignored with a warning.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    log::warn!("Ignoring {}={:?}: not a valid number", key, raw);
                    None
                }
            }
        }

        if let Some(v) = parse(&lookup, "LIFE_WINDOW_WIDTH") {
            self.window_width = v;
        }
        if let Some(v) = parse(&lookup, "LIFE_WINDOW_HEIGHT") {
            self.window_height = v;
        }
        if let Some(v) = parse(&lookup, "LIFE_SIM_WIDTH") {
            self.sim_width = v;
        }
        if let Some(v) = parse(&lookup, "LIFE_SIM_HEIGHT") {
            self.sim_height = v;
        }
        if let Some(v) = parse(&lookup, "LIFE_FPS") {
            self.fps = v;
        }
        if let Some(v) = parse(&lookup, "LIFE_SEED") {
            self.seed = Some(v);
        }
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    /// Sets the visible surface size (builder pattern)
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Sets the simulation grid size (builder pattern)
    pub fn with_sim_size(mut self, width: u32, height: u32) -> Self {
        self.sim_width = width;
        self.sim_height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Sets the display colours for live and dead cells (builder pattern)
    pub fn with_colors(mut self, alive: [f32; 4], dead: [f32; 4]) -> Self {
        self.alive_color = alive;
        self.dead_color = dead;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects zero dimensions and a zero frame rate.
    ///
    /// Must pass before any GPU resource is created.
    pub fn validate(&self) -> LifeResult<()> {
        let dims = [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("sim_width", self.sim_width),
            ("sim_height", self.sim_height),
            ("fps", self.fps),
        ];
        for (name, value) in dims {
            if value == 0 {
                return Err(LifeError::config(format!("{} must be greater than 0", name)));
            }
        }
        Ok(())
    }

    /// Checks the grid against the device's texture size limit
    pub fn validate_for_limits(&self, limits: &wgpu::Limits) -> LifeResult<()> {
        self.validate()?;
        let max = limits.max_texture_dimension_2d;
        if self.sim_width > max || self.sim_height > max {
            return Err(LifeError::config(format!(
                "simulation grid {}x{} exceeds the device texture limit of {}",
                self.sim_width, self.sim_height, max
            )));
        }
        Ok(())
    }

    /// Duration of one frame at the target rate
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}
