use crate::{
    config::model::{CatchAllPolicy, Configuration},
    foundation::error::{AvgColorError, AvgColorResult},
    strategy::table::{Strategy, Width},
};

/// Time interval `[start, start + duration)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TimeWindow {
    /// Start, seconds.
    pub start: f64,
    /// Length, seconds.
    pub duration: f64,
}

impl TimeWindow {
    /// Exclusive end.
    pub fn end(self) -> f64 {
        self.start + self.duration
    }
}

/// One scheduled iteration: which strategy claims which items, and when.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlannedIteration {
    /// Zero-based position in the plan.
    pub index: usize,
    /// Index into `Configuration::strategies`.
    pub strategy: usize,
    /// Copy of the strategy name, used as the marker label.
    pub strategy_name: String,
    /// Index of the first claimed item.
    pub first_item: usize,
    /// Items claimed; zero for an empty catch-all.
    pub claimed: usize,
    /// When the iteration runs.
    pub window: TimeWindow,
}

/// Ordered iterations covering every item exactly once.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct IterationPlan {
    /// Iterations in timeline order.
    pub iterations: Vec<PlannedIteration>,
    /// Population the plan covers.
    pub item_count: usize,
    /// Length of every iteration, seconds.
    pub iter_duration: f64,
}

/// Strategy indices ordered widest first; remainder strategies last. Stable.
pub fn widest_first(strategies: &[Strategy]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..strategies.len()).collect();
    order.sort_by_key(|&i| {
        let w = strategies[i].width();
        (w == Width::Remainder, std::cmp::Reverse(w.rank()))
    });
    order
}

/// Greedy pre-pass: the number of iterations the main loop will emit.
pub fn total_iterations(strategies: &[Strategy], item_count: usize, policy: CatchAllPolicy) -> usize {
    let mut total = 0;
    let mut remaining = item_count;
    for i in widest_first(strategies) {
        match strategies[i].width() {
            Width::Fixed(0) => {}
            Width::Fixed(w) => {
                total += remaining / w;
                remaining %= w;
            }
            Width::Remainder => {
                if remaining > 0 || policy == CatchAllPolicy::Always {
                    total += 1;
                }
                break;
            }
        }
    }
    total
}

impl IterationPlan {
    /// Run the scheduling loop without touching a scene.
    pub fn build(config: &Configuration) -> AvgColorResult<Self> {
        let strategies = &config.strategies;
        let item_count = config.pixel_count();
        let total = total_iterations(strategies, item_count, config.catch_all);
        let order = widest_first(strategies);

        let mut cursor = 0;
        let mut next_item = 0;
        let mut iterations = Vec::with_capacity(total);
        for index in 0..total {
            let remaining = item_count - next_item;
            while order
                .get(cursor)
                .is_some_and(|&s| !strategies[s].width().fits(remaining))
            {
                cursor += 1;
            }
            let Some(&strategy) = order.get(cursor) else {
                return Err(AvgColorError::scheduler(format!(
                    "no strategy fits the {remaining} remaining items at iteration {index}"
                )));
            };

            let claimed = match strategies[strategy].width() {
                Width::Fixed(w) => w,
                Width::Remainder => remaining,
            };
            iterations.push(PlannedIteration {
                index,
                strategy,
                strategy_name: strategies[strategy].name.clone(),
                first_item: next_item,
                claimed,
                window: TimeWindow {
                    start: index as f64 * config.iter_duration,
                    duration: config.iter_duration,
                },
            });
            next_item += claimed;
        }

        if next_item != item_count {
            return Err(AvgColorError::scheduler(format!(
                "plan claims {next_item} of {item_count} items"
            )));
        }

        Ok(Self {
            iterations,
            item_count,
            iter_duration: config.iter_duration,
        })
    }

    /// Number of iterations.
    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// Total timeline length: iterations times the per-iteration duration.
    pub fn duration(&self) -> f64 {
        self.iterations.len() as f64 * self.iter_duration
    }

    /// Items claimed across every iteration.
    pub fn claimed_total(&self) -> usize {
        self.iterations.iter().map(|it| it.claimed).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/plan.rs"]
mod tests;
