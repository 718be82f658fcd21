use crate::foundation::core::{Channel, Rgb01, Rgba8};

/// Per-channel display tint: red, green, blue, and white for alpha.
pub const CHANNEL_LUT: [Rgb01; 4] = [
    Rgb01::new(1.0, 0.0, 0.0),
    Rgb01::new(0.0, 1.0, 0.0),
    Rgb01::new(0.0, 0.0, 1.0),
    Rgb01::new(1.0, 1.0, 1.0),
];

/// Convert normalized HSL (each in `[0, 1]`) to floored RGB bytes.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    [to_byte(r), to_byte(g), to_byte(b)]
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_byte(x: f64) -> u8 {
    (x * 255.0).floor().clamp(0.0, 255.0) as u8
}

/// Contribution tint of one byte in its channel: `lut[channel] * byte / 255`.
pub fn channel_tint(channel: Channel, byte: u8) -> Rgb01 {
    CHANNEL_LUT[channel.index()].scale(f64::from(byte) / 255.0)
}

/// Serial reference average: per-channel sums floor-divided by the pixel count.
///
/// `None` for an empty slice.
pub fn average_rgba8(pixels: &[Rgba8]) -> Option<Rgba8> {
    let count = u64::try_from(pixels.len()).ok().filter(|&n| n > 0)?;
    let mut sums = [0u64; 4];
    for px in pixels {
        for channel in Channel::ALL {
            sums[channel.index()] += u64::from(px.channel(channel));
        }
    }
    // Each mean is at most 255.
    let [r, g, b, a] = sums.map(|s| (s / count) as u8);
    Some(Rgba8 { r, g, b, a })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
