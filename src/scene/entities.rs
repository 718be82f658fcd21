use crate::{
    animation::keyframes::PropValue,
    foundation::core::{Channel, Rgba8, Vec2},
    foundation::error::AvgColorResult,
    host::scene::{NodeId, Property, SceneHost},
};

/// One pixel flowing through the visualized algorithm.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PixelItem {
    /// Position in scheduling order.
    pub index: usize,
    /// Source color.
    pub color: Rgba8,
    /// Group that transit keys move.
    pub root: NodeId,
    /// One per channel, keyed by the batch procedures.
    pub cells: [NodeId; 4],
    pub(crate) labels: [NodeId; 4], // byte value text, parented to `cells`
}

impl PixelItem {
    /// Cell shape of `channel`.
    pub fn cell(&self, channel: Channel) -> NodeId {
        self.cells[channel.index()]
    }
}

/// Fixed-width staging area pixels move into before processing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Register {
    /// Register group node.
    pub root: NodeId,
    pub(crate) shape: NodeId,
    /// Left edge of the first slot.
    pub position: Vec2,
    /// Width in bytes.
    pub width: u32,
}

impl Register {
    /// Resting position of the `local`-th claimed pixel of an iteration.
    pub fn slot(&self, local: usize, cell_size: f64) -> Vec2 {
        self.position + Vec2::new(local as f64 * 4.0 * cell_size, 0.0)
    }
}

/// Running per-channel total with an on-screen label.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Accumulator {
    /// Channel this total collects.
    pub channel: Channel,
    /// Running sum, then the average once the catch-all has run.
    pub value: u64,
    pub(crate) root: NodeId,
    pub(crate) shape: NodeId,
    /// Text node showing `value`.
    pub label: NodeId,
}

impl Accumulator {
    /// Key the label with the current in-memory value.
    pub fn write_label<H: SceneHost>(&self, host: &mut H, time: f64) -> AvgColorResult<()> {
        host.set_value_at_time(
            self.label,
            Property::SourceText,
            time,
            PropValue::Text(self.value.to_string()),
        )
    }
}

/// The four channel accumulators in R, G, B, A order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Accumulators {
    lanes: [Accumulator; 4],
}

impl Accumulators {
    pub(crate) fn new(lanes: [Accumulator; 4]) -> Self {
        Self { lanes }
    }

    /// Accumulator of `channel`.
    pub fn get(&self, channel: Channel) -> &Accumulator {
        &self.lanes[channel.index()]
    }

    /// Mutable accumulator of `channel`.
    pub fn get_mut(&mut self, channel: Channel) -> &mut Accumulator {
        &mut self.lanes[channel.index()]
    }

    /// Current values in R, G, B, A order.
    pub fn values(&self) -> [u64; 4] {
        [
            self.lanes[0].value,
            self.lanes[1].value,
            self.lanes[2].value,
            self.lanes[3].value,
        ]
    }

    /// Accumulators in channel order.
    pub fn iter(&self) -> impl Iterator<Item = &Accumulator> {
        self.lanes.iter()
    }
}

/// Handles to everything the scene builder created for one configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    /// The staging register.
    pub register: Register,
    /// Channel totals.
    pub accumulators: Accumulators,
    /// Pixels in scheduling order.
    pub pixels: Vec<PixelItem>,
}
