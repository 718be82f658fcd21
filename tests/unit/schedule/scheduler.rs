use super::*;
use crate::config::dsl::ConfigurationBuilder;
use crate::config::model::CatchAllPolicy;
use crate::foundation::core::{Channel, Vec2};
use crate::host::composition::Composition;
use crate::scene::builder::build_scene;
use crate::strategy::table::Strategy;

fn serial_config() -> Configuration {
    ConfigurationBuilder::new("Serial")
        .strategy(Strategy::average("Average"))
        .strategy(Strategy::serial("Serial"))
        .build()
        .unwrap()
}

fn sad_config() -> Configuration {
    ConfigurationBuilder::new("SAD")
        .register_width(16)
        .cell_size(24.0)
        .strategy(Strategy::average("Average"))
        .strategy(Strategy::serial("Serial"))
        .strategy(Strategy::simd("SSE", 4))
        .build()
        .unwrap()
}

fn run(config: &Configuration) -> (Composition, Scene, IterationPlan) {
    let plan = IterationPlan::build(config).unwrap();
    let mut comp = Composition::new(&config.name, config.canvas, config.fps, plan.duration());
    let mut scene = build_scene(&mut comp, config).unwrap();
    run_schedule(&mut comp, config, &mut scene, &plan).unwrap();
    (comp, scene, plan)
}

fn expected_average(scene: &Scene, channel: Channel) -> u64 {
    let sum: u64 = scene
        .pixels
        .iter()
        .map(|p| u64::from(p.color.channel(channel)))
        .sum();
    sum / scene.pixels.len() as u64
}

#[test]
fn accumulators_end_at_floor_average() {
    for config in [serial_config(), sad_config()] {
        let (comp, scene, plan) = run(&config);
        for channel in Channel::ALL {
            let acc = scene.accumulators.get(channel);
            assert_eq!(acc.value, expected_average(&scene, channel));
            let shown = comp
                .sample(acc.label, Property::SourceText, plan.duration())
                .unwrap();
            assert_eq!(shown, PropValue::Text(acc.value.to_string()));
        }
        assert_eq!(scene.accumulators.get(Channel::Alpha).value, 255);
    }
}

#[test]
fn every_track_is_strictly_increasing() {
    for config in [serial_config(), sad_config()] {
        let (comp, _, _) = run(&config);
        for node in comp.nodes() {
            for state in node.props.values() {
                for w in state.track.keys().windows(2) {
                    assert!(
                        w[0].time < w[1].time,
                        "{}: {} !< {}",
                        node.name,
                        w[0].time,
                        w[1].time
                    );
                }
            }
        }
    }
}

#[test]
fn markers_follow_the_plan() {
    let (comp, _, plan) = run(&sad_config());
    let names: Vec<&str> = comp.markers().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["SSE", "SSE", "SSE", "Serial", "Average"]);
    for (m, it) in comp.markers().iter().zip(&plan.iterations) {
        assert_eq!(m.time, it.window.start);
        assert_eq!(m.duration, 0.5);
    }
}

#[test]
fn transit_moves_claimed_pixels_into_register_slots() {
    let config = sad_config();
    let (comp, scene, _) = run(&config);

    for (local, px) in scene.pixels[4..8].iter().enumerate() {
        let track = comp.track(px.root, Property::Position).unwrap();
        assert_eq!(track.len(), 2);
        let keys = track.keys();
        assert_eq!(keys[0].time, 0.5);
        assert_eq!(keys[1].time, 0.5 + 0.125);
        assert_eq!(
            keys[1].value,
            PropValue::Vec2(scene.register.slot(local, config.cell_size))
        );
        for k in keys {
            assert_eq!(k.interp_in, Interp::Bezier);
            assert_eq!(k.interp_out, Interp::Bezier);
            assert_eq!(k.ease_in, TRANSIT_EASE);
            assert_eq!(k.ease_out, TRANSIT_EASE);
        }
    }

    // The pixel Serial picks up lands in the first slot.
    let tail = comp
        .sample(scene.pixels[12].root, Property::Position, 2.0)
        .unwrap();
    assert_eq!(tail, PropValue::Vec2(scene.register.position));
}

#[test]
fn transit_starts_from_the_grid_position() {
    let config = serial_config();
    let (comp, scene, _) = run(&config);
    let px = &scene.pixels[3];
    let first = &comp.track(px.root, Property::Position).unwrap().keys()[0];
    assert_eq!(
        first.value,
        PropValue::Vec2(crate::scene::builder::pixel_home(&config, 3))
    );
    assert_eq!(first.time, 1.5);
}

#[test]
fn channel_cells_follow_the_four_phase_timing() {
    let (comp, scene, _) = run(&serial_config());
    // Pixel 0 is processed in iteration 0: sub-window [0.25, 0.5).
    let px = &scene.pixels[0];
    for channel in Channel::ALL {
        let c = (channel.index() + 1) as f64 / 4.0;
        let opacity = comp.track(px.cell(channel), Property::Opacity).unwrap();
        let times: Vec<f64> = opacity.keys().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.25, 0.25 + c * 0.125, 0.25 + c * 0.25]);
        let values: Vec<f64> = opacity
            .keys()
            .iter()
            .map(|k| k.value.as_scalar().unwrap())
            .collect();
        assert_eq!(values, vec![100.0, 100.0, 0.0]);

        let scale = comp.track(px.cell(channel), Property::Scale).unwrap();
        assert_eq!(
            scale.keys()[1].value,
            PropValue::Vec2(Vec2::new(125.0, 125.0))
        );
        let anchor = comp.track(px.cell(channel), Property::Anchor).unwrap();
        assert_eq!(anchor.keys()[2].value, PropValue::Vec2(Vec2::new(0.0, 64.0)));
    }
}

#[test]
fn simd_batch_keys_every_claimed_pixel() {
    let (comp, scene, _) = run(&sad_config());
    for px in &scene.pixels[..12] {
        for channel in Channel::ALL {
            assert_eq!(
                comp.track(px.cell(channel), Property::Opacity).unwrap().len(),
                3
            );
        }
    }
}

#[test]
fn labels_show_running_sums_between_iterations() {
    let (comp, scene, _) = run(&serial_config());
    let red = scene.accumulators.get(Channel::Red);
    // After the first serial iteration only pixel 0 (pure red) was added.
    let shown = comp.sample(red.label, Property::SourceText, 0.49).unwrap();
    assert_eq!(shown, PropValue::Text("255".into()));
    let before = comp.sample(red.label, Property::SourceText, 0.1).unwrap();
    assert_eq!(before, PropValue::Text("0".into()));
}

#[test]
fn skip_policy_leaves_sums_unaveraged() {
    let mut config = serial_config();
    config.catch_all = CatchAllPolicy::SkipWhenEmpty;
    let (comp, scene, plan) = run(&config);
    assert_eq!(plan.len(), 13);
    assert_eq!(comp.markers().len(), 13);
    assert_eq!(scene.accumulators.get(Channel::Alpha).value, 255 * 13);
}
