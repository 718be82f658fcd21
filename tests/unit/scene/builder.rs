use super::*;
use crate::config::dsl::ConfigurationBuilder;
use crate::host::composition::Composition;
use crate::host::scene::NodeKind;
use crate::strategy::table::Strategy;

fn config() -> Configuration {
    ConfigurationBuilder::new("Serial")
        .strategy(Strategy::average("Average"))
        .strategy(Strategy::serial("Serial"))
        .build()
        .unwrap()
}

fn host(config: &Configuration) -> Composition {
    Composition::new(&config.name, config.canvas, config.fps, 10.0)
}

#[test]
fn builds_one_pixel_per_item_with_four_cells() {
    let config = config();
    let mut comp = host(&config);
    let scene = build_scene(&mut comp, &config).unwrap();

    assert_eq!(scene.pixels.len(), 13);
    // register (2) + accumulators (4 * 3) + pixels (13 * 9)
    assert_eq!(comp.nodes().len(), 2 + 12 + 13 * 9);
    for (i, px) in scene.pixels.iter().enumerate() {
        assert_eq!(px.index, i);
        assert_eq!(px.color.a, 0xFF);
        for channel in Channel::ALL {
            let cell = comp.node(px.cell(channel)).unwrap();
            assert_eq!(cell.parent, Some(px.root));
            assert!(cell.flags.shy);
        }
    }
}

#[test]
fn first_pixel_is_pure_red_and_hues_advance() {
    let config = config();
    let mut comp = host(&config);
    let scene = build_scene(&mut comp, &config).unwrap();
    assert_eq!(scene.pixels[0].color, Rgba8::opaque([255, 0, 0]));
    assert_ne!(scene.pixels[1].color, scene.pixels[0].color);
}

#[test]
fn accumulators_start_at_zero_with_labels() {
    let config = config();
    let mut comp = host(&config);
    let scene = build_scene(&mut comp, &config).unwrap();

    assert_eq!(scene.accumulators.values(), [0, 0, 0, 0]);
    let xs: Vec<f64> = scene
        .accumulators
        .iter()
        .map(|a| {
            assert_eq!(
                comp.value_at_time(a.label, Property::SourceText, 0.0)
                    .unwrap(),
                PropValue::Text("0".into())
            );
            comp.value_at_time(a.root, Property::Position, 0.0)
                .unwrap()
                .as_vec2()
                .unwrap()
                .x
        })
        .collect();
    // Evenly spaced, four cells apart, at a quarter of the height.
    for w in xs.windows(2) {
        assert_eq!(w[1] - w[0], 4.0 * config.cell_size);
    }
    let y = comp
        .value_at_time(scene.accumulators.get(Channel::Red).root, Property::Position, 0.0)
        .unwrap()
        .as_vec2()
        .unwrap()
        .y;
    assert_eq!(y, 90.0);
}

#[test]
fn register_is_centered_at_mid_height() {
    let config = config();
    let mut comp = host(&config);
    let scene = build_scene(&mut comp, &config).unwrap();
    assert_eq!(scene.register.position, Vec2::new(260.0 - 64.0, 180.0));
    let shape = comp.node(scene.register.shape).unwrap();
    let NodeKind::Shape(content) = &shape.kind else {
        panic!("register shape is not a shape node");
    };
    assert_eq!(content.groups[0].rects.len(), 4);
    assert!(shape.flags.locked);
}

#[test]
fn cell_fill_is_channel_tint() {
    let config = config();
    let mut comp = host(&config);
    let scene = build_scene(&mut comp, &config).unwrap();
    let px = &scene.pixels[0];
    let NodeKind::Shape(content) = &comp.node(px.cell(Channel::Red)).unwrap().kind else {
        panic!("cell is not a shape node");
    };
    assert_eq!(content.groups[0].fill, Some(Rgb01::new(1.0, 0.0, 0.0)));
    let NodeKind::Text(style) = &comp.node(px.labels[0]).unwrap().kind else {
        panic!("label is not a text node");
    };
    assert_eq!(style.text, "255");
}

#[test]
fn grid_wraps_after_configured_columns() {
    let config = config();
    let a = pixel_home(&config, 0);
    let b = pixel_home(&config, 4);
    assert_eq!(a.x, b.x);
    assert_eq!(b.y - a.y, config.cell_size);
    assert_eq!(pixel_home(&config, 1).x - a.x, 4.0 * config.cell_size);
}
