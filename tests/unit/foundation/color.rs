use super::*;

fn close(a: [u8; 3], b: [u8; 3]) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(&x, &y)| (i16::from(x) - i16::from(y)).abs() <= 1)
}

#[test]
fn primaries_at_thirds() {
    assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [255, 0, 0]));
    assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0, 255, 0]));
    assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0, 0, 255]));
}

#[test]
fn zero_saturation_is_achromatic_for_any_hue() {
    for h in [0.0, 0.2, 0.5, 0.9] {
        assert_eq!(hsl_to_rgb(h, 0.0, 0.5), [127, 127, 127]);
        assert_eq!(hsl_to_rgb(h, 0.0, 1.0), [255, 255, 255]);
        assert_eq!(hsl_to_rgb(h, 0.0, 0.0), [0, 0, 0]);
    }
}

#[test]
fn secondary_hue_mixes_neighbours() {
    // Yellow sits at 1/6.
    let [r, g, b] = hsl_to_rgb(1.0 / 6.0, 1.0, 0.5);
    assert!(r >= 254);
    assert!(g >= 254);
    assert_eq!(b, 0);
}

#[test]
fn tint_scales_lut_by_byte() {
    let t = channel_tint(Channel::Green, 255);
    assert_eq!(t, Rgb01::new(0.0, 1.0, 0.0));

    let t = channel_tint(Channel::Alpha, 0);
    assert_eq!(t, Rgb01::gray(0.0));

    let t = channel_tint(Channel::Red, 51);
    assert!((t.r - 0.2).abs() < 1e-12);
}

#[test]
fn reference_average_floors_each_channel() {
    let pixels = [
        Rgba8::opaque([255, 0, 0]),
        Rgba8::opaque([0, 255, 0]),
        Rgba8 {
            r: 0,
            g: 0,
            b: 255,
            a: 0,
        },
    ];
    let avg = average_rgba8(&pixels).unwrap();
    assert_eq!(avg, Rgba8 { r: 85, g: 85, b: 85, a: 170 });
    assert_eq!(avg.to_u32(), 0xAA55_5555);
    assert_eq!(average_rgba8(&[]), None);
}
