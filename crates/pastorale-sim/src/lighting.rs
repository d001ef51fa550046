//! Window lights and the night darkness curve.
//!
//! The light list carries no identity between ticks; it is rebuilt from the
//! building anchors every tick.

use pastorale_core::{Color, Vec2};
use serde::Serialize;

use crate::config::LightingConfig;

/// One point light for the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightSource {
    /// Centre.
    pub x: f32,
    /// Centre.
    pub y: f32,
    /// Glow radius.
    pub radius: f32,
    /// Glow colour.
    pub color: Color,
    /// Whether to draw it.
    pub active: bool,
}

/// Whether windows are lit at `time_of_day`.
pub fn is_night(time_of_day: f32) -> bool {
    time_of_day < 6.0 || time_of_day > 18.0
}

/// Clear `lights` and refill it for the given hour. Every building anchor
/// contributes one light per configured window offset at night and nothing
/// by day.
pub fn collect_lights(
    lights: &mut Vec<LightSource>,
    time_of_day: f32,
    anchors: impl IntoIterator<Item = Vec2>,
    config: &LightingConfig,
) {
    lights.clear();
    if !is_night(time_of_day) {
        return;
    }
    for anchor in anchors {
        lights.extend(config.window_offsets.iter().map(|off| LightSource {
            x: anchor.x + off.x,
            y: anchor.y + off.y,
            radius: config.window_radius,
            color: config.window_color,
            active: true,
        }));
    }
}

/// Night overlay strength: 0 by day, `max` through deep night, with linear
/// ramps over 05:00–07:00 and 19:00–21:00.
pub fn darkness(time_of_day: f32, max: f32) -> f32 {
    let t = time_of_day;
    if t >= 21.0 || t < 5.0 {
        max
    } else if t >= 19.0 {
        (t - 19.0) / 2.0 * max
    } else if t < 7.0 {
        (1.0 - (t - 5.0) / 2.0) * max
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUSES: [Vec2; 3] = [
        Vec2::new(5.0, 20.0),
        Vec2::new(50.0, 22.0),
        Vec2::new(-15.0, 18.0),
    ];

    #[test]
    fn no_lights_by_day() {
        let mut lights = Vec::new();
        collect_lights(&mut lights, 12.0, HOUSES, &LightingConfig::default());
        assert!(lights.is_empty());
        // 06:00 and 18:00 themselves are day
        collect_lights(&mut lights, 6.0, HOUSES, &LightingConfig::default());
        assert!(lights.is_empty());
        collect_lights(&mut lights, 18.0, HOUSES, &LightingConfig::default());
        assert!(lights.is_empty());
    }

    #[test]
    fn two_windows_per_house_at_night() {
        let mut lights = Vec::new();
        collect_lights(&mut lights, 22.0, HOUSES, &LightingConfig::default());
        assert_eq!(lights.len(), 6);
        assert_eq!((lights[0].x, lights[0].y), (7.0, 26.5));
        assert_eq!((lights[1].x, lights[1].y), (15.0, 26.5));
        assert!(lights.iter().all(|l| l.active && l.radius == 8.0));
    }

    #[test]
    fn list_is_rebuilt_each_call() {
        let mut lights = Vec::new();
        collect_lights(&mut lights, 2.0, HOUSES, &LightingConfig::default());
        collect_lights(&mut lights, 2.0, HOUSES, &LightingConfig::default());
        assert_eq!(lights.len(), 6);
        collect_lights(&mut lights, 9.0, HOUSES, &LightingConfig::default());
        assert!(lights.is_empty());
    }

    #[test]
    fn darkness_curve() {
        let max = 0.7;
        assert_eq!(darkness(0.0, max), max);
        assert_eq!(darkness(4.9, max), max);
        assert!((darkness(6.0, max) - 0.35).abs() < 1e-6);
        assert_eq!(darkness(7.0, max), 0.0);
        assert_eq!(darkness(12.0, max), 0.0);
        assert_eq!(darkness(19.0, max), 0.0);
        assert!((darkness(20.0, max) - 0.35).abs() < 1e-6);
        assert_eq!(darkness(21.0, max), max);
        assert_eq!(darkness(23.9, max), max);
    }
}
