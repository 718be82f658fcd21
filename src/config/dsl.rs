use crate::{
    config::model::{CatchAllPolicy, Configuration, GridLayout},
    foundation::core::{Canvas, Fps, Rgb01},
    foundation::error::AvgColorResult,
    strategy::table::Strategy,
};

/// Builder for [`Configuration`](crate::Configuration).
pub struct ConfigurationBuilder {
    name: String,
    canvas: Canvas,
    register_width: u32,
    cell_size: f64,
    iter_duration: f64,
    strategies: Vec<Strategy>,
    pixel_count: u32,
    pixel_grid: GridLayout,
    fps: Fps,
    catch_all: CatchAllPolicy,
    background: Rgb01,
}

impl ConfigurationBuilder {
    /// Start a configuration with the stock 520x360 canvas and half-second iterations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            canvas: Canvas {
                width: 520,
                height: 360,
            },
            register_width: 4,
            cell_size: 32.0,
            iter_duration: 0.5,
            strategies: Vec::new(),
            pixel_count: 13,
            pixel_grid: GridLayout {
                columns: 4,
                rows: 3,
            },
            fps: Fps::default(),
            catch_all: CatchAllPolicy::Always,
            background: Rgb01::WHITE,
        }
    }

    /// Composition size in pixels.
    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = Canvas { width, height };
        self
    }

    /// Register width in byte cells.
    pub fn register_width(mut self, width: u32) -> Self {
        self.register_width = width;
        self
    }

    /// Edge of one byte cell in pixels.
    pub fn cell_size(mut self, px: f64) -> Self {
        self.cell_size = px;
        self
    }

    /// Seconds per iteration.
    pub fn iter_duration(mut self, secs: f64) -> Self {
        self.iter_duration = secs;
        self
    }

    /// Append a strategy; order is preserved.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Number of pixels to average.
    pub fn pixel_count(mut self, count: u32) -> Self {
        self.pixel_count = count;
        self
    }

    /// Resting grid of the pixels.
    pub fn pixel_grid(mut self, columns: u32, rows: u32) -> Self {
        self.pixel_grid = GridLayout { columns, rows };
        self
    }

    /// Composition frame rate.
    pub fn fps(mut self, fps: Fps) -> Self {
        self.fps = fps;
        self
    }

    /// When the remainder strategy runs.
    pub fn catch_all(mut self, policy: CatchAllPolicy) -> Self {
        self.catch_all = policy;
        self
    }

    /// Composition background.
    pub fn background(mut self, color: Rgb01) -> Self {
        self.background = color;
        self
    }

    /// Build and validate the final [`Configuration`](crate::Configuration).
    pub fn build(self) -> AvgColorResult<Configuration> {
        let config = Configuration {
            name: self.name,
            canvas: self.canvas,
            register_width: self.register_width,
            cell_size: self.cell_size,
            iter_duration: self.iter_duration,
            strategies: self.strategies,
            pixel_count: self.pixel_count,
            pixel_grid: self.pixel_grid,
            fps: self.fps,
            catch_all: self.catch_all,
            background: self.background,
        };
        config.validate()?;
        Ok(config)
    }
}
