use std::path::Path;

use crate::{
    foundation::core::{Canvas, Fps, Rgb01, TIME_EPSILON},
    foundation::error::{AvgColorError, AvgColorResult},
    strategy::table::{Strategy, Width},
};

/// Shape of the grid pixels rest in before they are claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridLayout {
    /// Pixels per row.
    pub columns: u32,
    /// Rows shown; extra pixels continue below.
    pub rows: u32,
}

/// Whether a remainder strategy still runs when nothing is left to claim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatchAllPolicy {
    /// Always schedule one trailing remainder iteration.
    #[default]
    Always,
    /// Schedule the remainder iteration only when items are left.
    SkipWhenEmpty,
}

/// Immutable input for one generated composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Configuration {
    /// Composition name; unique within a project.
    pub name: String,
    /// Composition size.
    pub canvas: Canvas,
    /// Register width in byte cells.
    pub register_width: u32,
    /// Edge of one byte cell, in pixels.
    pub cell_size: f64,
    /// Length of one iteration, in seconds.
    pub iter_duration: f64,
    /// Strategy table; needs at least one remainder strategy.
    pub strategies: Vec<Strategy>,
    /// Number of pixels to average.
    pub pixel_count: u32,
    /// Resting layout of the pixels.
    pub pixel_grid: GridLayout,
    /// Composition frame rate.
    #[serde(default)]
    pub fps: Fps,
    /// Whether the remainder strategy runs when nothing is left.
    #[serde(default)]
    pub catch_all: CatchAllPolicy,
    /// Composition background.
    #[serde(default = "default_background")]
    pub background: Rgb01,
}

/// Smallest key spacing inside an iteration is `iter_duration / 16`: the batch
/// window is half the iteration and its four channel phases split half of that.
const PHASE_DIVISIONS: f64 = 16.0;

fn default_background() -> Rgb01 {
    Rgb01::WHITE
}

impl Configuration {
    /// Check every field; failures are [`AvgColorError::Configuration`].
    pub fn validate(&self) -> AvgColorResult<()> {
        if self.name.trim().is_empty() {
            return Err(AvgColorError::configuration("name must be non-empty"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(AvgColorError::configuration(
                "canvas width/height must be > 0",
            ));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(AvgColorError::configuration(
                "fps must have num>0 and den>0",
            ));
        }
        if self.register_width == 0 {
            return Err(AvgColorError::configuration("register_width must be > 0"));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(AvgColorError::configuration("cell_size must be > 0"));
        }
        if !(self.iter_duration.is_finite() && self.iter_duration > 0.0) {
            return Err(AvgColorError::configuration("iter_duration must be > 0"));
        }
        if self.iter_duration / PHASE_DIVISIONS <= TIME_EPSILON {
            return Err(AvgColorError::configuration(format!(
                "iter_duration {}s is too short: channel phases would share key times",
                self.iter_duration
            )));
        }
        if self.pixel_count == 0 {
            return Err(AvgColorError::configuration("pixel_count must be > 0"));
        }
        if self.pixel_grid.columns == 0 || self.pixel_grid.rows == 0 {
            return Err(AvgColorError::configuration(
                "pixel_grid columns/rows must be > 0",
            ));
        }
        if self.strategies.is_empty() {
            return Err(AvgColorError::configuration(
                "strategy list must be non-empty",
            ));
        }

        for s in &self.strategies {
            if s.name.trim().is_empty() {
                return Err(AvgColorError::configuration(
                    "strategy name must be non-empty",
                ));
            }
            if let Width::Fixed(w) = s.width() {
                if w == 0 {
                    return Err(AvgColorError::configuration(format!(
                        "strategy '{}' must claim at least one item",
                        s.name
                    )));
                }
                if w > self.register_width as usize {
                    return Err(AvgColorError::configuration(format!(
                        "strategy '{}' claims {w} items but the register holds {}",
                        s.name, self.register_width
                    )));
                }
            }
        }
        if !self.strategies.iter().any(Strategy::is_remainder) {
            return Err(AvgColorError::configuration(
                "strategy list needs a catch-all (remainder) strategy",
            ));
        }

        Ok(())
    }

    /// Pixel count as an index bound.
    pub fn pixel_count(&self) -> usize {
        self.pixel_count as usize
    }

    /// Parse one configuration from JSON without validating it.
    pub fn from_json_str(s: &str) -> AvgColorResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load one configuration or an array of them from a JSON file.
    pub fn load_all(path: &Path) -> AvgColorResult<Vec<Self>> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Many(Vec<Configuration>),
            One(Box<Configuration>),
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            AvgColorError::Other(anyhow::Error::new(e).context(format!(
                "read configuration '{}'",
                path.display()
            )))
        })?;
        match serde_json::from_str::<Repr>(&text)? {
            Repr::Many(v) => Ok(v),
            Repr::One(c) => Ok(vec![*c]),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
