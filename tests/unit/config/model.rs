use super::*;
use crate::config::dsl::ConfigurationBuilder;

fn basic() -> Configuration {
    ConfigurationBuilder::new("Serial")
        .strategy(Strategy::average("Average"))
        .strategy(Strategy::serial("Serial"))
        .build()
        .unwrap()
}

fn rejects(mut edit: impl FnMut(&mut Configuration)) {
    let mut c = basic();
    edit(&mut c);
    let err = c.validate().unwrap_err();
    assert!(err.is_configuration(), "unexpected error kind: {err}");
}

#[test]
fn builder_defaults_validate() {
    let c = basic();
    assert_eq!(c.pixel_count(), 13);
    assert_eq!(c.fps, Fps::default());
    assert_eq!(c.catch_all, CatchAllPolicy::Always);
}

#[test]
fn non_positive_sizes_are_rejected() {
    rejects(|c| c.pixel_count = 0);
    rejects(|c| c.register_width = 0);
    rejects(|c| c.cell_size = 0.0);
    rejects(|c| c.cell_size = f64::NAN);
    rejects(|c| c.iter_duration = -1.0);
    rejects(|c| c.canvas.height = 0);
    rejects(|c| c.pixel_grid.columns = 0);
    rejects(|c| c.name = "  ".into());
}

#[test]
fn strategy_list_rules() {
    rejects(|c| c.strategies.clear());
    rejects(|c| c.strategies.retain(|s| !s.is_remainder()));
    rejects(|c| c.strategies.push(Strategy::simd("AVX", 8)));
    rejects(|c| c.strategies.push(Strategy::simd("Empty", 0)));
    rejects(|c| c.strategies[0].name.clear());
}

#[test]
fn optional_fields_default_when_missing_from_json() {
    let json = r#"{
        "name": "SAD",
        "canvas": { "width": 520, "height": 360 },
        "register_width": 16,
        "cell_size": 24.0,
        "iter_duration": 0.5,
        "strategies": [
            { "name": "Average", "kind": "average" },
            { "name": "Serial", "kind": "serial" },
            { "name": "SSE", "kind": { "simd": { "lanes": 4 } } }
        ],
        "pixel_count": 13,
        "pixel_grid": { "columns": 4, "rows": 3 }
    }"#;
    let c = Configuration::from_json_str(json).unwrap();
    c.validate().unwrap();
    assert_eq!(c.fps, Fps::default());
    assert_eq!(c.background, Rgb01::WHITE);
    assert_eq!(c.strategies[2].width(), Width::Fixed(4));
}

#[test]
fn load_all_accepts_object_or_array() {
    let dir = std::env::temp_dir().join(format!("avgcolor-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let one = dir.join("one.json");
    std::fs::write(&one, serde_json::to_string(&basic()).unwrap()).unwrap();
    assert_eq!(Configuration::load_all(&one).unwrap().len(), 1);

    let many = dir.join("many.json");
    std::fs::write(&many, serde_json::to_string(&vec![basic(), basic()]).unwrap()).unwrap();
    assert_eq!(Configuration::load_all(&many).unwrap().len(), 2);

    assert!(Configuration::load_all(&dir.join("missing.json")).is_err());
}

#[test]
fn iteration_too_short_for_distinct_phase_keys_is_rejected() {
    let err = ConfigurationBuilder::new("tiny")
        .iter_duration(1e-8)
        .strategy(Strategy::average("Average"))
        .strategy(Strategy::serial("Serial"))
        .build()
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("iter_duration"));

    // Sixteen times the key tolerance leaves each phase one tolerance apart.
    rejects(|c| c.iter_duration = 16.0 * TIME_EPSILON);
    let mut ok = basic();
    ok.iter_duration = 1e-6;
    ok.validate().unwrap();
}
