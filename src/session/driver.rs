use crate::{
    config::model::Configuration,
    export::fingerprint::{TimelineFingerprint, fingerprint_composition},
    foundation::error::AvgColorResult,
    host::composition::{Composition, Project},
    host::scene::SceneHost,
    scene::builder::build_scene,
    schedule::plan::{IterationPlan, total_iterations},
    schedule::scheduler::run_schedule,
};

/// Result of running one configuration against a host.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GenerationOutcome {
    /// The iterations that were scheduled.
    pub plan: IterationPlan,
    /// Final accumulator values in R, G, B, A order.
    pub accumulators: [u64; 4],
}

/// Summary of one configuration added to a [`Session`]'s project.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GenerationReport {
    /// Configuration and composition name.
    pub name: String,
    /// Scheduled iterations, catch-all included.
    pub iterations: usize,
    /// Timeline length in seconds.
    pub duration: f64,
    /// Timeline length in whole frames at the composition rate.
    pub frames: u64,
    /// Keyframes written across every node and property.
    pub keyframes: usize,
    /// Final accumulator values in R, G, B, A order.
    pub accumulators: [u64; 4],
    /// Accumulators packed as an RGBA8 word (red in the low byte); `None`
    /// while any of them still holds a raw sum above 255.
    pub average: Option<u32>,
    /// Determinism fingerprint of the composition.
    pub fingerprint: TimelineFingerprint,
    /// The iterations that were scheduled.
    pub plan: IterationPlan,
}

/// Timeline length the greedy pre-pass reserves for `config`.
pub fn timeline_duration(config: &Configuration) -> f64 {
    total_iterations(&config.strategies, config.pixel_count(), config.catch_all) as f64
        * config.iter_duration
}

/// Validate, build the scene and schedule every iteration into `host`.
///
/// Nothing is written to the host when validation fails.
pub fn generate_into<H: SceneHost>(
    host: &mut H,
    config: &Configuration,
) -> AvgColorResult<GenerationOutcome> {
    config.validate()?;
    let plan = IterationPlan::build(config)?;
    let mut scene = build_scene(host, config)?;
    run_schedule(host, config, &mut scene, &plan)?;
    Ok(GenerationOutcome {
        plan,
        accumulators: scene.accumulators.values(),
    })
}

/// Explicit generation context owning the project every composition lands in.
#[derive(Debug, Default)]
pub struct Session {
    project: Project,
}

impl Session {
    /// Session with an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compositions generated so far.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Finish the session and take its project.
    pub fn into_project(self) -> Project {
        self.project
    }

    /// Generate one composition; it joins the project only on success.
    #[tracing::instrument(skip_all, fields(config = %config.name))]
    pub fn generate(&mut self, config: &Configuration) -> AvgColorResult<GenerationReport> {
        config.validate()?;
        let mut comp = Composition::new(
            config.name.clone(),
            config.canvas,
            config.fps,
            timeline_duration(config),
        );
        comp.background = config.background;

        let outcome = generate_into(&mut comp, config)?;
        let report = GenerationReport {
            name: config.name.clone(),
            iterations: outcome.plan.len(),
            duration: comp.duration,
            frames: comp.duration_frames(),
            keyframes: comp.keyframe_count(),
            accumulators: outcome.accumulators,
            average: pack_average(outcome.accumulators),
            fingerprint: fingerprint_composition(&comp),
            plan: outcome.plan,
        };
        tracing::info!(
            iterations = report.iterations,
            duration = report.duration,
            frames = report.frames,
            keyframes = report.keyframes,
            fingerprint = %report.fingerprint,
            "composition generated"
        );
        self.project.insert(comp);
        Ok(report)
    }

    /// Generate each configuration independently; one failure does not stop the rest.
    pub fn generate_all(
        &mut self,
        configs: &[Configuration],
    ) -> Vec<(String, AvgColorResult<GenerationReport>)> {
        configs
            .iter()
            .map(|config| {
                let result = self.generate(config);
                if let Err(e) = &result {
                    tracing::warn!(config = %config.name, error = %e, "generation failed");
                }
                (config.name.clone(), result)
            })
            .collect()
    }
}

fn pack_average(values: [u64; 4]) -> Option<u32> {
    let mut bytes = [0u8; 4];
    for (byte, value) in bytes.iter_mut().zip(values) {
        *byte = u8::try_from(value).ok()?;
    }
    Some(u32::from_le_bytes(bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
