use crate::{
    animation::keyframes::{Interp, PropValue, TemporalEase},
    config::model::Configuration,
    foundation::error::{AvgColorError, AvgColorResult},
    host::scene::{Marker, NodeId, Property, SceneHost},
    scene::entities::Scene,
    schedule::plan::{IterationPlan, PlannedIteration},
    strategy::table::{Batch, BatchWindow},
};

/// Ease written on every key of a pixel's position track.
pub const TRANSIT_EASE: TemporalEase = TemporalEase::new(0.25, 100.0);

/// Walk the plan: marker, transit into the register, then the batch procedure.
#[tracing::instrument(skip_all, fields(config = %config.name, iterations = plan.len()))]
pub fn run_schedule<H: SceneHost>(
    host: &mut H,
    config: &Configuration,
    scene: &mut Scene,
    plan: &IterationPlan,
) -> AvgColorResult<()> {
    for it in &plan.iterations {
        run_iteration(host, config, scene, it)?;
    }
    Ok(())
}

fn run_iteration<H: SceneHost>(
    host: &mut H,
    config: &Configuration,
    scene: &mut Scene,
    it: &PlannedIteration,
) -> AvgColorResult<()> {
    let strategy = config.strategies.get(it.strategy).ok_or_else(|| {
        AvgColorError::scheduler(format!("iteration {} names a missing strategy", it.index))
    })?;
    let items = scene
        .pixels
        .get(it.first_item..it.first_item + it.claimed)
        .ok_or_else(|| {
            AvgColorError::scheduler(format!(
                "iteration {} claims items {}..{} of {}",
                it.index,
                it.first_item,
                it.first_item + it.claimed,
                scene.pixels.len()
            ))
        })?;

    tracing::debug!(
        iteration = it.index,
        strategy = %strategy.name,
        claimed = it.claimed,
        start = it.window.start,
        "iteration"
    );

    let time = it.window.start;
    let duration = it.window.duration;
    host.add_marker(Marker {
        name: strategy.name.clone(),
        time,
        duration,
    })?;

    for (local, item) in items.iter().enumerate() {
        let home = host.value_at_time(item.root, Property::Position, time)?;
        host.set_value_at_time(item.root, Property::Position, time, home)?;
        host.set_value_at_time(
            item.root,
            Property::Position,
            time + duration / 4.0,
            PropValue::Vec2(scene.register.slot(local, config.cell_size)),
        )?;
        smooth_keys(host, item.root, Property::Position)?;
    }

    let window = BatchWindow {
        start: time + duration / 2.0,
        duration: duration / 2.0,
    };
    let batch = Batch {
        items,
        population: scene.pixels.len(),
    };
    strategy.process_batch(host, window, batch, config, &mut scene.accumulators)
}

/// Bezier interpolation and [`TRANSIT_EASE`] on every key of a property.
fn smooth_keys<H: SceneHost>(host: &mut H, node: NodeId, prop: Property) -> AvgColorResult<()> {
    for k in 0..host.num_keys(node, prop)? {
        host.set_interpolation_at_key(node, prop, k, Interp::Bezier, Interp::Bezier)?;
        host.set_temporal_ease_at_key(node, prop, k, TRANSIT_EASE, TRANSIT_EASE)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
