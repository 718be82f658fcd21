//! Built-in configurations, one per instruction-set cascade: serial, then
//! 4-, 8- and 16-pixel SIMD widths, each falling back to the narrower ones.

use crate::{
    config::dsl::ConfigurationBuilder,
    config::model::Configuration,
    foundation::error::{AvgColorError, AvgColorResult},
    strategy::table::Strategy,
};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: [&str; 4] = ["Serial", "SAD", "AVX2", "AVX512"];

/// One pixel at a time through a four-byte register.
pub fn serial() -> AvgColorResult<Configuration> {
    ConfigurationBuilder::new("Serial")
        .canvas(520, 360)
        .register_width(4)
        .cell_size(32.0)
        .iter_duration(0.5)
        .strategy(Strategy::average("Average"))
        .strategy(Strategy::serial("Serial"))
        .pixel_count(13)
        .pixel_grid(4, 3)
        .build()
}

/// Four pixels per iteration through a sixteen-byte register, serial for the tail.
pub fn sad() -> AvgColorResult<Configuration> {
    ConfigurationBuilder::new("SAD")
        .canvas(520, 360)
        .register_width(16)
        .cell_size(24.0)
        .iter_duration(0.5)
        .strategy(Strategy::average("Average"))
        .strategy(Strategy::serial("Serial"))
        .strategy(Strategy::simd("SSE", 4))
        .pixel_count(13)
        .pixel_grid(4, 3)
        .build()
}

/// Eight pixels per iteration through a 32-byte register: 8, 4, then 1.
pub fn avx2() -> AvgColorResult<Configuration> {
    ConfigurationBuilder::new("AVX2")
        .canvas(520, 360)
        .register_width(32)
        .cell_size(16.0)
        .iter_duration(0.5)
        .strategy(Strategy::average("Average"))
        .strategy(Strategy::serial("Serial"))
        .strategy(Strategy::simd("SSE", 4))
        .strategy(Strategy::simd("AVX2", 8))
        .pixel_count(13)
        .pixel_grid(4, 3)
        .build()
}

/// Sixteen pixels per iteration through a 64-byte register: 16, 8, 4, then 1.
pub fn avx512() -> AvgColorResult<Configuration> {
    ConfigurationBuilder::new("AVX512")
        .canvas(520, 360)
        .register_width(64)
        .cell_size(8.0)
        .iter_duration(0.5)
        .strategy(Strategy::average("Average"))
        .strategy(Strategy::serial("Serial"))
        .strategy(Strategy::simd("SSE", 4))
        .strategy(Strategy::simd("AVX2", 8))
        .strategy(Strategy::simd("AVX512", 16))
        .pixel_count(29)
        .pixel_grid(8, 4)
        .build()
}

/// Look up a preset by name, case-insensitively.
pub fn preset(name: &str) -> AvgColorResult<Configuration> {
    match name.to_ascii_lowercase().as_str() {
        "serial" => serial(),
        "sad" => sad(),
        "avx2" => avx2(),
        "avx512" => avx512(),
        other => Err(AvgColorError::configuration(format!(
            "unknown preset '{other}' (expected one of {PRESET_NAMES:?})"
        ))),
    }
}

/// Every preset, in session order.
pub fn all() -> AvgColorResult<Vec<Configuration>> {
    Ok(vec![serial()?, sad()?, avx2()?, avx512()?])
}
