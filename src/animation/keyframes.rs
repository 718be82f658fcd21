use crate::{
    foundation::core::{TIME_EPSILON, Vec2},
    foundation::error::{AvgColorError, AvgColorResult},
};

/// Value carried by an animatable property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropValue {
    /// Opacity and other one-dimensional values.
    Scalar(f64),
    /// Position, anchor and scale.
    Vec2(Vec2),
    /// Text layer source text.
    Text(String),
}

impl PropValue {
    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Vec2(_) => "vec2",
            Self::Text(_) => "text",
        }
    }

    /// The vector, if this is a `Vec2` value.
    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Self::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    /// The number, if this is a `Scalar` value.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// The string, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Magnitude of the change from `self` to `other`; `None` for text.
    fn distance(&self, other: &Self) -> Option<f64> {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => Some((b - a).abs()),
            (Self::Vec2(a), Self::Vec2(b)) => Some((*b - *a).hypot()),
            _ => None,
        }
    }

    fn mix(&self, other: &Self, t: f64) -> Self {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(a + (b - a) * t),
            (Self::Vec2(a), Self::Vec2(b)) => Self::Vec2(a.lerp(*b, t)),
            _ => self.clone(),
        }
    }
}

/// Interpolation on one side of a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Interp {
    /// Straight blend to the neighbouring key.
    Linear,
    /// Cubic timing curve shaped by the key's [`TemporalEase`].
    Bezier,
    /// Keep the value until the next key.
    Hold,
}

/// Temporal ease at one side of a key: `speed` in value units per second,
/// `influence` in percent of the neighbouring segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemporalEase {
    /// Value units per second at the key.
    pub speed: f64,
    /// Percent of the segment the handle reaches into, in `[0.1, 100]`.
    pub influence: f64,
}

impl TemporalEase {
    /// Ease from speed and influence; checked when written to a track.
    pub const fn new(speed: f64, influence: f64) -> Self {
        Self { speed, influence }
    }

    /// Reject influence outside `[0.1, 100]` and non-finite speed.
    pub fn validate(self) -> AvgColorResult<()> {
        if !(0.1..=100.0).contains(&self.influence) {
            return Err(AvgColorError::host(format!(
                "ease influence must be within [0.1, 100], got {}",
                self.influence
            )));
        }
        if !self.speed.is_finite() {
            return Err(AvgColorError::host("ease speed must be finite"));
        }
        Ok(())
    }
}

impl Default for TemporalEase {
    fn default() -> Self {
        Self::new(0.0, 100.0 / 6.0)
    }
}

/// One key of a [`Track`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Seconds from the composition start.
    pub time: f64,
    /// Value at `time`.
    pub value: PropValue,
    /// Interpolation of the segment arriving at this key.
    pub interp_in: Interp,
    /// Interpolation of the segment leaving this key.
    pub interp_out: Interp,
    /// Ease of the incoming segment.
    pub ease_in: TemporalEase,
    /// Ease of the outgoing segment.
    pub ease_out: TemporalEase,
}

impl Keyframe {
    fn new(time: f64, value: PropValue) -> Self {
        let interp = if matches!(value, PropValue::Text(_)) {
            Interp::Hold
        } else {
            Interp::Linear
        };
        Self {
            time,
            value,
            interp_in: interp,
            interp_out: interp,
            ease_in: TemporalEase::default(),
            ease_out: TemporalEase::default(),
        }
    }
}

/// Keys of one property, strictly increasing in time.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    keys: Vec<Keyframe>,
}

impl Track {
    /// Keys in time order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the track has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Write `value` at `time`. A key at the same time is replaced; a key
    /// earlier than the last one is rejected.
    pub fn set_at(&mut self, time: f64, value: PropValue) -> AvgColorResult<()> {
        if !time.is_finite() || time < 0.0 {
            return Err(AvgColorError::host(format!(
                "key time must be finite and >= 0, got {time}"
            )));
        }
        if let Some(first) = self.keys.first()
            && !first.value.same_kind(&value)
        {
            return Err(AvgColorError::host(format!(
                "cannot key a {} value on a {} track",
                value.kind_name(),
                first.value.kind_name()
            )));
        }

        match self.keys.last_mut() {
            Some(last) if (last.time - time).abs() <= TIME_EPSILON => {
                last.value = value;
                Ok(())
            }
            Some(last) if time < last.time => Err(AvgColorError::host(format!(
                "key at {time}s precedes last key at {}s",
                last.time
            ))),
            _ => {
                self.keys.push(Keyframe::new(time, value));
                Ok(())
            }
        }
    }

    fn key_mut(&mut self, index: usize) -> AvgColorResult<&mut Keyframe> {
        let len = self.keys.len();
        self.keys.get_mut(index).ok_or_else(|| {
            AvgColorError::host(format!("key index {index} out of range (track has {len})"))
        })
    }

    /// Set both interpolation sides of the key at `index`. Text keys only hold.
    pub fn set_interpolation(
        &mut self,
        index: usize,
        interp_in: Interp,
        interp_out: Interp,
    ) -> AvgColorResult<()> {
        let key = self.key_mut(index)?;
        if matches!(key.value, PropValue::Text(_))
            && (interp_in != Interp::Hold || interp_out != Interp::Hold)
        {
            return Err(AvgColorError::host("text keys only support hold interpolation"));
        }
        key.interp_in = interp_in;
        key.interp_out = interp_out;
        Ok(())
    }

    /// Set both eases of the key at `index`.
    pub fn set_temporal_ease(
        &mut self,
        index: usize,
        ease_in: TemporalEase,
        ease_out: TemporalEase,
    ) -> AvgColorResult<()> {
        ease_in.validate()?;
        ease_out.validate()?;
        let key = self.key_mut(index)?;
        key.ease_in = ease_in;
        key.ease_out = ease_out;
        Ok(())
    }

    /// Evaluate the track at `time`; `None` when the track has no keys.
    pub fn sample(&self, time: f64) -> Option<PropValue> {
        let first = self.keys.first()?;
        let idx = self.keys.partition_point(|k| k.time <= time);

        if idx == 0 {
            return Some(first.value.clone());
        }
        if idx >= self.keys.len() {
            return self.keys.last().map(|k| k.value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let dt = b.time - a.time;
        if dt <= TIME_EPSILON || a.interp_out == Interp::Hold {
            return Some(a.value.clone());
        }

        let progress = (time - a.time) / dt;
        let eased = if a.interp_out == Interp::Linear && b.interp_in == Interp::Linear {
            progress
        } else {
            let Some(dv) = a.value.distance(&b.value) else {
                return Some(a.value.clone());
            };
            if dv <= f64::EPSILON {
                return Some(a.value.clone());
            }
            let (x1, y1) = out_handle(a, dt, dv);
            let (x2, y2) = in_handle(b, dt, dv);
            cubic_timing(progress, x1, y1, x2, y2)
        };
        Some(a.value.mix(&b.value, eased))
    }
}

fn out_handle(key: &Keyframe, dt: f64, dv: f64) -> (f64, f64) {
    if key.interp_out != Interp::Bezier {
        return (1.0 / 3.0, 1.0 / 3.0);
    }
    let x = key.ease_out.influence / 100.0;
    (x, key.ease_out.speed * dt / dv * x)
}

fn in_handle(key: &Keyframe, dt: f64, dv: f64) -> (f64, f64) {
    if key.interp_in != Interp::Bezier {
        return (2.0 / 3.0, 2.0 / 3.0);
    }
    let x = key.ease_in.influence / 100.0;
    (1.0 - x, 1.0 - key.ease_in.speed * dt / dv * x)
}

const SOLVE_TOLERANCE: f64 = 1e-14;

/// Cubic timing curve through (0,0), (x1,y1), (x2,y2), (1,1), evaluated at `x`.
fn cubic_timing(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let u = solve_curve_param(x.clamp(0.0, 1.0), x1, x2);
    bez(u, y1, y2)
}

fn bez(u: f64, p1: f64, p2: f64) -> f64 {
    let v = 1.0 - u;
    3.0 * v * v * u * p1 + 3.0 * v * u * u * p2 + u * u * u
}

fn bez_slope(u: f64, p1: f64, p2: f64) -> f64 {
    let v = 1.0 - u;
    3.0 * v * v * p1 + 6.0 * v * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}

/// Find `u` with `bez(u, x1, x2) == x`: Newton steps kept inside a shrinking
/// bracket, bisecting whenever a step leaves it or the slope vanishes.
fn solve_curve_param(x: f64, x1: f64, x2: f64) -> f64 {
    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    let mut u = x;
    for _ in 0..100 {
        let err = bez(u, x1, x2) - x;
        if err.abs() <= SOLVE_TOLERANCE {
            break;
        }
        if err < 0.0 {
            lo = u;
        } else {
            hi = u;
        }
        if hi - lo <= f64::EPSILON {
            break;
        }
        let slope = bez_slope(u, x1, x2);
        let next = u - err / slope;
        u = if slope.abs() > 1e-12 && next > lo && next < hi {
            next
        } else {
            0.5 * (lo + hi)
        };
    }
    u
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
