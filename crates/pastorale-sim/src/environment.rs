//! Quantities derived once per tick from the clock and the weather, read by
//! agents and handed to the renderer.

use pastorale_core::Color;
use serde::Serialize;

use crate::config::SkyPalette;
use crate::lighting;
use crate::weather::{Weather, WeatherKind};

/// Per-tick derived environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Environment {
    /// Hour the values were derived at.
    pub time_of_day: f32,
    /// Horizontal sway for foliage and birds.
    pub wind_sway: f32,
    /// Signed wind strength from the weather.
    pub wind_strength: f32,
    /// Multiplier on villager walking speed.
    pub villager_speed: f32,
    /// Weather intensity as seen by colour grading; zero under clear skies.
    pub weather_intensity: f32,
    /// Sky gradient, top.
    pub sky_top: Color,
    /// Sky gradient, horizon.
    pub sky_bottom: Color,
    /// Ambient grade applied to white.
    pub ambient_tint: Color,
    /// Night overlay strength.
    pub darkness: f32,
    /// Fog density.
    pub fog_density: f32,
    #[serde(skip)]
    palette_ambient: AmbientStops,
}

/// Ambient stops copied out of the palette so grading needs no borrow.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AmbientStops {
    night: Color,
    dawn_start: Color,
    dawn_end: Color,
    day: Color,
    dusk_start: Color,
    dusk_end: Color,
}

impl Environment {
    /// Derive the environment. `sway_phase` is added to the hour when
    /// computing wind sway so foliage keeps moving while time stands still.
    pub fn derive(
        time_of_day: f32,
        sway_phase: f32,
        weather: &Weather,
        palette: &SkyPalette,
        max_darkness: f32,
    ) -> Self {
        let weather_intensity = if weather.kind() == WeatherKind::Clear {
            0.0
        } else {
            weather.intensity()
        };
        let (sky_top, sky_bottom) = sky_colors(time_of_day, palette);
        let stops = AmbientStops {
            night: palette.ambient_night,
            dawn_start: palette.ambient_dawn_start,
            dawn_end: palette.ambient_dawn_end,
            day: palette.ambient_day,
            dusk_start: palette.ambient_dusk_start,
            dusk_end: palette.ambient_dusk_end,
        };

        let mut env = Self {
            time_of_day,
            wind_sway: weather.wind_sway(time_of_day + sway_phase),
            wind_strength: weather.wind_strength(),
            villager_speed: weather.speed_modifier(),
            weather_intensity,
            sky_top,
            sky_bottom,
            ambient_tint: Color::WHITE,
            darkness: lighting::darkness(time_of_day, max_darkness),
            fog_density: weather.fog_density(),
            palette_ambient: stops,
        };
        env.ambient_tint = env.grade(Color::WHITE);
        env
    }

    /// Apply time-of-day grading and weather desaturation to a base colour.
    pub fn grade(&self, base: Color) -> Color {
        let t = self.time_of_day;
        let stops = &self.palette_ambient;
        let mut ambient = if t < 5.0 || t > 20.0 {
            stops.night
        } else if t < 7.0 {
            Color::lerp(stops.dawn_start, stops.dawn_end, (t - 5.0) / 2.0)
        } else if t < 17.0 {
            stops.day
        } else {
            Color::lerp(stops.dusk_start, stops.dusk_end, (t - 17.0) / 3.0)
        };

        let mut base = base;
        let weather = self.weather_intensity;
        if weather > 0.0 {
            base = base.desaturate(weather * 0.5);
            ambient = ambient.scaled(1.0 - weather * 0.3);
        }
        base.modulate(ambient)
    }
}

/// Sky gradient stops for an hour: night until 05:00 and from 20:00, a dawn
/// blend over 05:00–07:00, day until 17:00, then a dusk blend to 20:00.
pub fn sky_colors(t: f32, palette: &SkyPalette) -> (Color, Color) {
    if t < 5.0 || t >= 20.0 {
        (palette.night_top, palette.night_bottom)
    } else if t < 7.0 {
        let f = (t - 5.0) / 2.0;
        (
            Color::lerp(palette.night_top, palette.dawn_top, f),
            Color::lerp(palette.night_bottom, palette.dawn_bottom, f),
        )
    } else if t < 17.0 {
        (palette.day_top, palette.day_bottom)
    } else {
        let f = (t - 17.0) / 3.0;
        (
            Color::lerp(palette.day_top, palette.dusk_top, f),
            Color::lerp(palette.day_bottom, palette.dusk_bottom, f),
        )
    }
}
