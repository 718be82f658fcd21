use super::*;
use crate::foundation::core::{Canvas, Fps};
use crate::host::scene::SceneHost;

fn comp() -> Composition {
    let mut c = Composition::new(
        "fp",
        Canvas {
            width: 64,
            height: 64,
        },
        Fps::default(),
        1.0,
    );
    let n = c.add_null("n").unwrap();
    c.set_value_at_time(n, Property::Opacity, 0.0, PropValue::Scalar(100.0))
        .unwrap();
    c
}

#[test]
fn identical_compositions_hash_equal() {
    assert_eq!(fingerprint_composition(&comp()), fingerprint_composition(&comp()));
}

#[test]
fn a_single_key_change_changes_the_hash() {
    let a = comp();
    let mut b = comp();
    let n = b.find_node("n").unwrap().id;
    b.set_value_at_time(n, Property::Opacity, 0.5, PropValue::Scalar(0.0))
        .unwrap();
    assert_ne!(fingerprint_composition(&a), fingerprint_composition(&b));
}

#[test]
fn display_is_32_hex_digits() {
    let s = fingerprint_composition(&comp()).to_string();
    assert_eq!(s.len(), 32);
    assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
}
