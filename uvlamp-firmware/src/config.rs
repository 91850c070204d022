//! Build-time lamp configuration
//!
//! Constants are generated from `lamp.toml` by the build script, which
//! has already range-checked them.

use uvlamp_core::config::ControlConfig;

include!(concat!(env!("OUT_DIR"), "/lamp_config.rs"));

/// Control loop timing from lamp.toml
pub fn control_config() -> ControlConfig {
    ControlConfig {
        debounce_ms: DEBOUNCE_MS,
        long_press_ms: LONG_PRESS_MS,
        arc_refresh_ms: ARC_REFRESH_MS,
        ..ControlConfig::default()
    }
    .with_frame_rate(FRAME_RATE_HZ)
}
