use super::*;
use crate::foundation::core::Vec2;
use crate::host::scene::Justification;

fn comp() -> Composition {
    Composition::new(
        "test",
        Canvas {
            width: 320,
            height: 240,
        },
        Fps::default(),
        4.0,
    )
}

fn label_style(text: &str) -> TextStyle {
    TextStyle {
        text: text.to_owned(),
        font: "Mono".to_owned(),
        font_size: 12.0,
        fill: Rgb01::BLACK,
        stroke: None,
        stroke_over_fill: false,
        justification: Justification::Center,
    }
}

#[test]
fn new_nodes_carry_default_transform() {
    let mut c = comp();
    let n = c.add_null("n").unwrap();
    assert_eq!(
        c.value_at_time(n, Property::Scale, 0.0).unwrap(),
        PropValue::Vec2(Vec2::new(100.0, 100.0))
    );
    assert_eq!(
        c.value_at_time(n, Property::Opacity, 0.0).unwrap(),
        PropValue::Scalar(100.0)
    );
    assert!(c.value_at_time(n, Property::SourceText, 0.0).is_err());
}

#[test]
fn text_nodes_expose_source_text() {
    let mut c = comp();
    let t = c.add_text("label", label_style("0")).unwrap();
    c.set_value_at_time(t, Property::SourceText, 1.0, PropValue::Text("7".into()))
        .unwrap();
    assert_eq!(
        c.value_at_time(t, Property::SourceText, 2.0).unwrap(),
        PropValue::Text("7".into())
    );
    assert_eq!(c.num_keys(t, Property::SourceText).unwrap(), 1);
}

#[test]
fn wrong_value_kind_is_a_host_failure() {
    let mut c = comp();
    let n = c.add_null("n").unwrap();
    let err = c
        .set_value_at_time(n, Property::Opacity, 0.0, PropValue::Vec2(Vec2::ZERO))
        .unwrap_err();
    assert!(matches!(err, AvgColorError::Host(_)));
}

#[test]
fn unknown_node_is_a_host_failure() {
    let c = comp();
    assert!(c.num_keys(NodeId(42), Property::Position).is_err());
}

#[test]
fn static_value_is_refused_once_keyed() {
    let mut c = comp();
    let n = c.add_null("n").unwrap();
    c.set_value(n, Property::Position, PropValue::Vec2(Vec2::new(1.0, 2.0)))
        .unwrap();
    c.set_value_at_time(n, Property::Position, 0.0, PropValue::Vec2(Vec2::ZERO))
        .unwrap();
    assert!(
        c.set_value(n, Property::Position, PropValue::Vec2(Vec2::ZERO))
            .is_err()
    );
}

#[test]
fn parenting_rejects_cycles() {
    let mut c = comp();
    let a = c.add_null("a").unwrap();
    let b = c.add_null("b").unwrap();
    c.set_parent(b, a).unwrap();
    assert!(c.set_parent(a, b).is_err());
    assert!(c.set_parent(a, a).is_err());
    assert_eq!(c.node(b).unwrap().parent, Some(a));
}

#[test]
fn markers_must_fall_inside_duration() {
    let mut c = comp();
    c.add_marker(Marker {
        name: "Serial".into(),
        time: 0.0,
        duration: 0.5,
    })
    .unwrap();
    assert!(
        c.add_marker(Marker {
            name: "late".into(),
            time: 4.0,
            duration: 0.5,
        })
        .is_err()
    );
    assert_eq!(c.markers().len(), 1);
}

#[test]
fn project_insert_replaces_by_name() {
    let mut p = Project::new();
    p.insert(comp());
    let mut other = comp();
    other.duration = 9.0;
    p.insert(other);
    assert_eq!(p.len(), 1);
    assert_eq!(p.get("test").unwrap().duration, 9.0);
}

#[test]
fn composition_json_roundtrip_keeps_tracks() {
    let mut c = comp();
    let n = c.add_null("n").unwrap();
    c.set_value_at_time(n, Property::Opacity, 0.5, PropValue::Scalar(0.0))
        .unwrap();
    let s = c.to_json_pretty().unwrap();
    let de: Composition = serde_json::from_str(&s).unwrap();
    assert_eq!(de.keyframe_count(), 1);
    assert_eq!(de.find_node("n").unwrap().id, n);
}
