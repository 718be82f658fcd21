use xxhash_rust::xxh3::Xxh3;

use crate::{
    animation::keyframes::{Interp, Keyframe, PropValue, TemporalEase},
    host::composition::{Composition, Node},
    host::scene::{Marker, Property},
};

const XXH3_SEED: u64 = 0x5a1d_c0de_a7e6_4b11;

/// Stable 128-bit fingerprint of a generated composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct TimelineFingerprint {
    /// High half.
    pub hi: u64,
    /// Low half.
    pub lo: u64,
}

impl std::fmt::Display for TimelineFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Hash the node graph, every keyframe track and the markers.
///
/// Static shape content and text styling are not hashed; they are a pure
/// function of the configuration.
pub fn fingerprint_composition(comp: &Composition) -> TimelineFingerprint {
    let mut h = StableHasher::new();
    h.write_str(&comp.name);
    h.write_u32(comp.canvas.width);
    h.write_u32(comp.canvas.height);
    h.write_u32(comp.fps.num);
    h.write_u32(comp.fps.den);
    h.write_f64(comp.duration);

    h.write_u64(comp.nodes().len() as u64);
    for node in comp.nodes() {
        write_node(&mut h, node);
    }
    h.write_u64(comp.markers().len() as u64);
    for m in comp.markers() {
        write_marker(&mut h, m);
    }
    h.finish()
}

fn write_node(h: &mut StableHasher, node: &Node) {
    h.write_u32(node.id.0);
    h.write_str(&node.name);
    match node.parent {
        Some(p) => {
            h.write_bool(true);
            h.write_u32(p.0);
        }
        None => h.write_bool(false),
    }
    for (prop, state) in &node.props {
        h.write_u8(prop_tag(*prop));
        write_value(h, &state.value);
        h.write_u64(state.track.len() as u64);
        for key in state.track.keys() {
            write_key(h, key);
        }
    }
}

fn write_key(h: &mut StableHasher, key: &Keyframe) {
    h.write_f64(key.time);
    write_value(h, &key.value);
    h.write_u8(interp_tag(key.interp_in));
    h.write_u8(interp_tag(key.interp_out));
    write_ease(h, key.ease_in);
    write_ease(h, key.ease_out);
}

fn write_marker(h: &mut StableHasher, m: &Marker) {
    h.write_str(&m.name);
    h.write_f64(m.time);
    h.write_f64(m.duration);
}

fn write_value(h: &mut StableHasher, v: &PropValue) {
    match v {
        PropValue::Scalar(x) => {
            h.write_u8(0);
            h.write_f64(*x);
        }
        PropValue::Vec2(p) => {
            h.write_u8(1);
            h.write_f64(p.x);
            h.write_f64(p.y);
        }
        PropValue::Text(s) => {
            h.write_u8(2);
            h.write_str(s);
        }
    }
}

fn write_ease(h: &mut StableHasher, e: TemporalEase) {
    h.write_f64(e.speed);
    h.write_f64(e.influence);
}

fn prop_tag(p: Property) -> u8 {
    match p {
        Property::Position => 0,
        Property::Anchor => 1,
        Property::Scale => 2,
        Property::Opacity => 3,
        Property::SourceText => 4,
    }
}

fn interp_tag(i: Interp) -> u8 {
    match i {
        Interp::Linear => 0,
        Interp::Bezier => 1,
        Interp::Hold => 2,
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> TimelineFingerprint {
        let v = self.inner.digest128();
        TimelineFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/fingerprint.rs"]
mod tests;
