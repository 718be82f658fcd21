use crate::{
    animation::keyframes::PropValue,
    config::model::Configuration,
    foundation::core::{Channel, Vec2},
    foundation::error::{AvgColorError, AvgColorResult},
    host::scene::{NodeId, Property, SceneHost},
    scene::entities::{Accumulators, PixelItem},
};

const ARM_SCALE: f64 = 100.0;
const MAIN_SCALE: f64 = 125.0;

/// How many items one iteration of a strategy claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Width {
    /// Exactly this many items.
    Fixed(usize),
    /// Everything not yet claimed.
    Remainder,
}

impl Width {
    /// Sort key: remainder ranks below every fixed width.
    pub fn rank(self) -> usize {
        match self {
            Self::Fixed(w) => w,
            Self::Remainder => 0,
        }
    }

    /// Whether this width fits `remaining` unclaimed items.
    pub fn fits(self, remaining: usize) -> bool {
        match self {
            Self::Fixed(w) => w > 0 && w <= remaining,
            Self::Remainder => true,
        }
    }
}

/// Processing rule behind a [`Strategy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// One pixel per iteration, channels one after another.
    Serial,
    /// `lanes` pixels per iteration sharing channel timing.
    Simd {
        /// Pixels per iteration.
        lanes: u32,
    },
    /// Divides every sum by the population; claims whatever is left.
    Average,
}

/// A named batch-processing rule.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Strategy {
    /// Marker label and plan name.
    pub name: String,
    /// How a claimed batch is processed.
    pub kind: StrategyKind,
}

/// Sub-window a batch procedure writes into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BatchWindow {
    /// Iteration start, seconds.
    pub start: f64,
    /// Iteration length, seconds.
    pub duration: f64,
}

impl BatchWindow {
    /// Time every channel is armed at.
    pub fn arm(self) -> f64 {
        self.start
    }

    /// Time `channel` reaches its peak: `(i + 1) / 4` of the first half.
    pub fn main(self, channel: Channel) -> f64 {
        self.start + Self::fraction(channel) * (self.duration / 2.0)
    }

    /// Time `channel` finishes: `(i + 1) / 4` of the whole window.
    pub fn outro(self, channel: Channel) -> f64 {
        self.start + Self::fraction(channel) * self.duration
    }

    fn fraction(channel: Channel) -> f64 {
        (channel.index() + 1) as f64 / 4.0
    }
}

/// Items handed to one batch procedure call.
#[derive(Clone, Copy, Debug)]
pub struct Batch<'a> {
    /// Claimed items, in scheduling order.
    pub items: &'a [PixelItem],
    /// Total item count of the configuration.
    pub population: usize,
}

impl Strategy {
    /// One pixel per iteration.
    pub fn serial(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: StrategyKind::Serial,
        }
    }

    /// `lanes` pixels per iteration.
    pub fn simd(name: impl Into<String>, lanes: u32) -> Self {
        Self {
            name: name.into(),
            kind: StrategyKind::Simd { lanes },
        }
    }

    /// The catch-all that divides by the population.
    pub fn average(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: StrategyKind::Average,
        }
    }

    /// Items one iteration claims.
    pub fn width(&self) -> Width {
        match self.kind {
            StrategyKind::Serial => Width::Fixed(1),
            StrategyKind::Simd { lanes } => Width::Fixed(lanes as usize),
            StrategyKind::Average => Width::Remainder,
        }
    }

    /// Whether this strategy claims everything left.
    pub fn is_remainder(&self) -> bool {
        self.width() == Width::Remainder
    }

    /// Emit keyframes and update the accumulators for one claimed batch.
    pub fn process_batch<H: SceneHost>(
        &self,
        host: &mut H,
        window: BatchWindow,
        batch: Batch<'_>,
        config: &Configuration,
        accumulators: &mut Accumulators,
    ) -> AvgColorResult<()> {
        match self.width() {
            Width::Fixed(w) if batch.items.len() != w => Err(AvgColorError::scheduler(format!(
                "strategy '{}' expects {w} items, got {}",
                self.name,
                batch.items.len()
            ))),
            Width::Fixed(_) => accumulate(host, window, batch.items, config.cell_size, accumulators),
            Width::Remainder => average(host, window, batch, accumulators),
        }
    }
}

fn accumulate<H: SceneHost>(
    host: &mut H,
    window: BatchWindow,
    items: &[PixelItem],
    cell_size: f64,
    accumulators: &mut Accumulators,
) -> AvgColorResult<()> {
    for channel in Channel::ALL {
        let acc = accumulators.get_mut(channel);
        acc.write_label(host, window.arm())?;
        for item in items {
            emit_cell_phases(host, item.cell(channel), window, channel, cell_size)?;
            acc.value += u64::from(item.color.channel(channel));
        }
        acc.write_label(host, window.main(channel))?;
    }
    Ok(())
}

fn average<H: SceneHost>(
    host: &mut H,
    window: BatchWindow,
    batch: Batch<'_>,
    accumulators: &mut Accumulators,
) -> AvgColorResult<()> {
    if batch.population == 0 {
        return Err(AvgColorError::scheduler("cannot average over zero items"));
    }
    let population = batch.population as u64;
    for channel in Channel::ALL {
        let acc = accumulators.get_mut(channel);
        acc.write_label(host, window.arm())?;
        let tail: u64 = batch
            .items
            .iter()
            .map(|item| u64::from(item.color.channel(channel)))
            .sum();
        acc.value = (acc.value + tail) / population;
        acc.write_label(host, window.main(channel))?;
    }
    Ok(())
}

/// Arm, main and outro keys for one channel cell.
fn emit_cell_phases<H: SceneHost>(
    host: &mut H,
    cell: NodeId,
    window: BatchWindow,
    channel: Channel,
    cell_size: f64,
) -> AvgColorResult<()> {
    let phases = [
        (window.arm(), 100.0, ARM_SCALE, 0.0),
        (window.main(channel), 100.0, MAIN_SCALE, cell_size / 2.0),
        (window.outro(channel), 0.0, 0.0, cell_size * 2.0),
    ];
    for (time, opacity, scale, anchor_y) in phases {
        host.set_value_at_time(cell, Property::Opacity, time, PropValue::Scalar(opacity))?;
        host.set_value_at_time(
            cell,
            Property::Scale,
            time,
            PropValue::Vec2(Vec2::new(scale, scale)),
        )?;
        host.set_value_at_time(
            cell,
            Property::Anchor,
            time,
            PropValue::Vec2(Vec2::new(0.0, anchor_y)),
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/strategy/table.rs"]
mod tests;
