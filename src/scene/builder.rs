use crate::{
    animation::keyframes::PropValue,
    config::model::Configuration,
    foundation::color::{CHANNEL_LUT, channel_tint, hsl_to_rgb},
    foundation::core::{Channel, Rgb01, Rgba8, Vec2},
    foundation::error::AvgColorResult,
    host::scene::{
        Justification, NodeFlags, NodeId, Property, RectSpec, SceneHost, ShapeContent, ShapeGroup,
        Stroke, TextStyle,
    },
    scene::entities::{Accumulator, Accumulators, PixelItem, Register, Scene},
};

const LABEL_FONT: &str = "Dina ttf 10px";
const CELL_FILL: Rgb01 = Rgb01::gray(0.44);
const BOX_FILL: Rgb01 = Rgb01::gray(0.33);
const ACCUMULATOR_CELLS: f64 = 3.0;

const SHY: NodeFlags = NodeFlags {
    shy: true,
    locked: false,
};
const LOCKED: NodeFlags = NodeFlags {
    shy: false,
    locked: true,
};

/// Create the register, the four accumulators and the pixel grid.
#[tracing::instrument(skip_all, fields(config = %config.name))]
pub fn build_scene<H: SceneHost>(host: &mut H, config: &Configuration) -> AvgColorResult<Scene> {
    let register = build_register(host, config)?;

    let accumulators = Accumulators::new([
        build_accumulator(host, config, Channel::Red)?,
        build_accumulator(host, config, Channel::Green)?,
        build_accumulator(host, config, Channel::Blue)?,
        build_accumulator(host, config, Channel::Alpha)?,
    ]);

    let count = config.pixel_count();
    let mut pixels = Vec::with_capacity(count);
    for i in 0..count {
        let color = Rgba8::opaque(hsl_to_rgb(i as f64 / count as f64, 1.0, 0.5));
        pixels.push(build_pixel(host, config, i, color)?);
    }

    tracing::debug!(pixels = pixels.len(), "scene built");
    Ok(Scene {
        register,
        accumulators,
        pixels,
    })
}

/// Grid position of the `index`-th pixel, below the register.
pub fn pixel_home(config: &Configuration, index: usize) -> Vec2 {
    let w = config.canvas.width_f64();
    let h = config.canvas.height_f64();
    let cell = config.cell_size;
    let columns = config.pixel_grid.columns as usize;
    let col = (index % columns) as f64;
    let row = (index / columns) as f64;
    Vec2::new(
        w / 2.0 - (cell * 4.0 * columns as f64) / 2.0 + (col * cell * 4.0).floor(),
        (h - h / 3.0) + (row * cell).floor(),
    )
}

fn cell_rect(position: Vec2, cell: f64) -> RectSpec {
    RectSpec {
        position,
        size: Vec2::new(cell * 0.9, cell * 0.9),
        roundness: cell / 10.0,
    }
}

fn box_rect(position: Vec2, cells: f64, cell: f64) -> RectSpec {
    RectSpec {
        position,
        size: Vec2::new(cell * cells + cell / 10.0, cell + cell / 10.0),
        roundness: cell / 10.0,
    }
}

fn outline() -> Stroke {
    Stroke {
        width: 1.5,
        color: Rgb01::BLACK,
    }
}

fn build_register<H: SceneHost>(host: &mut H, config: &Configuration) -> AvgColorResult<Register> {
    let cell = config.cell_size;
    let width = f64::from(config.register_width);
    let name = "MainRegister";

    let root = host.add_null(name)?;
    let content = ShapeContent {
        groups: vec![
            ShapeGroup {
                rects: (0..config.register_width)
                    .map(|i| cell_rect(Vec2::new(f64::from(i) * cell, 0.0), cell))
                    .collect(),
                fill: Some(CELL_FILL),
                stroke: None,
            },
            ShapeGroup {
                rects: vec![box_rect(
                    Vec2::new((width / 2.0 - 1.0) * cell + cell / 2.0, 0.0),
                    width,
                    cell,
                )],
                fill: Some(BOX_FILL),
                stroke: None,
            },
        ],
    };
    let shape = host.add_shape(&format!("{name}-Shape"), content)?;
    host.set_parent(shape, root)?;
    host.set_flags(shape, LOCKED)?;

    let position = Vec2::new(
        config.canvas.width_f64() / 2.0 - (cell * width) / 2.0,
        config.canvas.height_f64() / 2.0,
    );
    host.set_value(root, Property::Position, PropValue::Vec2(position))?;

    Ok(Register {
        root,
        shape,
        position,
        width: config.register_width,
    })
}

fn build_accumulator<H: SceneHost>(
    host: &mut H,
    config: &Configuration,
    channel: Channel,
) -> AvgColorResult<Accumulator> {
    let cell = config.cell_size;
    let name = format!("{}-Sum", channel.name());

    let root = host.add_null(&name)?;
    let content = ShapeContent {
        groups: vec![ShapeGroup {
            rects: vec![box_rect(Vec2::ZERO, ACCUMULATOR_CELLS, cell)],
            fill: Some(BOX_FILL),
            stroke: Some(outline()),
        }],
    };
    let shape = host.add_shape(&format!("{name}-Shape"), content)?;
    host.set_parent(shape, root)?;
    host.set_flags(shape, LOCKED)?;

    let label = host.add_text(
        &format!("{name}-Label"),
        TextStyle {
            text: "0".to_owned(),
            font: LABEL_FONT.to_owned(),
            font_size: cell,
            fill: CHANNEL_LUT[channel.index()],
            stroke: Some(Stroke {
                width: 1.0,
                color: Rgb01::BLACK,
            }),
            stroke_over_fill: false,
            justification: Justification::Center,
        },
    )?;
    host.set_parent(label, shape)?;
    host.set_value(
        label,
        Property::Position,
        PropValue::Vec2(Vec2::new(0.0, cell / 4.0)),
    )?;
    host.set_flags(label, SHY)?;

    let i = channel.index() as f64;
    let position = Vec2::new(
        config.canvas.width_f64() / 2.0 - (4.0 * ACCUMULATOR_CELLS * cell) / 2.0
            + i * (4.0 * cell),
        config.canvas.height_f64() / 4.0,
    );
    host.set_value(root, Property::Position, PropValue::Vec2(position))?;

    Ok(Accumulator {
        channel,
        value: 0,
        root,
        shape,
        label,
    })
}

fn build_pixel<H: SceneHost>(
    host: &mut H,
    config: &Configuration,
    index: usize,
    color: Rgba8,
) -> AvgColorResult<PixelItem> {
    let cell = config.cell_size;
    let name = format!("Pixel-{index}");

    let root = host.add_null(&name)?;
    host.set_value(root, Property::Opacity, PropValue::Scalar(100.0))?;

    let mut cells = [NodeId(0); 4];
    let mut labels = [NodeId(0); 4];
    for channel in Channel::ALL {
        let c = channel.index();
        let byte = color.channel(channel);

        let content = ShapeContent {
            groups: vec![ShapeGroup {
                rects: vec![cell_rect(Vec2::ZERO, cell)],
                fill: Some(channel_tint(channel, byte)),
                stroke: Some(outline()),
            }],
        };
        let shape = host.add_shape(&format!("{name}-{}", channel.name()), content)?;
        host.set_flags(shape, SHY)?;
        host.set_parent(shape, root)?;
        host.set_value(
            shape,
            Property::Position,
            PropValue::Vec2(Vec2::new(c as f64 * cell, 0.0)),
        )?;

        let label = host.add_text(
            &format!("{name}-{}-Label", channel.name()),
            TextStyle {
                text: byte.to_string(),
                font: LABEL_FONT.to_owned(),
                font_size: cell / 2.0,
                fill: Rgb01::BLACK,
                stroke: Some(Stroke {
                    width: 2.0,
                    color: Rgb01::gray(0.5),
                }),
                stroke_over_fill: false,
                justification: Justification::Center,
            },
        )?;
        host.set_parent(label, shape)?;
        host.set_flags(label, SHY)?;

        cells[c] = shape;
        labels[c] = label;
    }

    host.set_value(
        root,
        Property::Position,
        PropValue::Vec2(pixel_home(config, index)),
    )?;

    Ok(PixelItem {
        index,
        color,
        root,
        cells,
        labels,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
