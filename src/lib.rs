//! avgcolor generates keyframed timelines that explain how an image's average
//! color is computed, comparing one-pixel-at-a-time processing against wide
//! SIMD batches.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: a [`Configuration`] names the canvas, the register width and
//!    an ordered [`Strategy`] table (built in code with [`ConfigurationBuilder`] or
//!    loaded from JSON).
//! 2. **Plan**: [`IterationPlan::build`] runs the greedy widest-first pre-pass and
//!    fixes every iteration's strategy, claimed items and time window.
//! 3. **Build**: [`build_scene`] creates the register, four channel accumulators and
//!    the pixel grid through a [`SceneHost`].
//! 4. **Schedule**: [`run_schedule`] replays the plan, writing markers, transit keys
//!    and per-channel processing keys.
//!
//! [`Session`] ties these steps together and collects one [`Composition`] per
//! configuration into a [`Project`]. Generation is deterministic: the same
//! configuration always yields the same [`TimelineFingerprint`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation {
    pub mod keyframes;
}
mod config {
    pub mod dsl;
    pub mod model;
}
mod export {
    pub mod fingerprint;
}
mod foundation {
    pub mod color;
    pub mod core;
    pub mod error;
}
mod host {
    pub mod composition;
    pub mod scene;
}
mod scene {
    pub mod builder;
    pub mod entities;
}
mod schedule {
    pub mod plan;
    pub mod scheduler;
}
mod session {
    pub mod driver;
    pub mod presets;
}
mod strategy {
    pub mod table;
}

pub use animation::keyframes::{Interp, Keyframe, PropValue, TemporalEase, Track};
pub use config::dsl::ConfigurationBuilder;
pub use config::model::{CatchAllPolicy, Configuration, GridLayout};
pub use export::fingerprint::{TimelineFingerprint, fingerprint_composition};
pub use foundation::color::{CHANNEL_LUT, average_rgba8, channel_tint, hsl_to_rgb};
pub use foundation::core::{Canvas, Channel, Fps, Rgb01, Rgba8, TIME_EPSILON, Vec2};
pub use foundation::error::{AvgColorError, AvgColorResult};
pub use host::composition::{Composition, Node, Project, PropertyState};
pub use host::scene::{
    Justification, Marker, NodeFlags, NodeId, NodeKind, Property, RectSpec, SceneHost,
    ShapeContent, ShapeGroup, Stroke, TextStyle,
};
pub use scene::builder::{build_scene, pixel_home};
pub use scene::entities::{Accumulator, Accumulators, PixelItem, Register, Scene};
pub use schedule::plan::{
    IterationPlan, PlannedIteration, TimeWindow, total_iterations, widest_first,
};
pub use schedule::scheduler::{TRANSIT_EASE, run_schedule};
pub use session::driver::{
    GenerationOutcome, GenerationReport, Session, generate_into, timeline_duration,
};
pub use session::presets;
pub use strategy::table::{Batch, BatchWindow, Strategy, StrategyKind, Width};
