//! Global weather state machine and its rain/snow particle pool.
//!
//! The pool is fixed at creation. Every tick the first
//! `floor(intensity × pool_size)` slots are live and the rest are inactive.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::{Viewport, WeatherConfig};
use crate::decision::{self, Span, Weighted};

/// Fraction added before flooring the active count so `0.7 × 500` lands on 350.
const COUNT_EPSILON: f32 = 1e-4;

/// Amount the lightning cooldown drops each tick.
const LIGHTNING_STEP: f32 = 0.1;

/// Fog density under rain and storm.
const WET_FOG: f32 = 0.3;

/// The four weather types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    /// No precipitation.
    #[default]
    Clear,
    /// Rain streaks.
    Rain,
    /// Falling snow.
    Snow,
    /// Heavy rain with lightning.
    Storm,
}

impl WeatherKind {
    /// All four kinds.
    pub const ALL: [Self; 4] = [Self::Clear, Self::Rain, Self::Snow, Self::Storm];
}

impl std::fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Clear => "clear",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Storm => "storm",
        };
        f.write_str(name)
    }
}

/// What a transition roll assigns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherPreset {
    /// Resulting type.
    pub kind: WeatherKind,
    /// Fraction of the pool kept live.
    pub intensity: f32,
    /// Range the wind strength is drawn from.
    pub wind: Span,
}

/// Transition table, rolled every time the transition timer expires.
pub const WEATHER_TABLE: [Weighted<WeatherPreset>; 4] = [
    Weighted::new(60, WeatherPreset {
        kind: WeatherKind::Clear,
        intensity: 0.0,
        wind: Span::new(-0.5, 0.5),
    }),
    Weighted::new(20, WeatherPreset {
        kind: WeatherKind::Rain,
        intensity: 0.7,
        wind: Span::new(1.0, 3.0),
    }),
    Weighted::new(10, WeatherPreset {
        kind: WeatherKind::Storm,
        intensity: 1.0,
        wind: Span::new(4.0, 6.0),
    }),
    Weighted::new(10, WeatherPreset {
        kind: WeatherKind::Snow,
        intensity: 0.5,
        wind: Span::new(-1.0, 1.0),
    }),
];

/// One rain drop or snow flake.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WeatherParticle {
    /// Position.
    pub x: f32,
    /// Position.
    pub y: f32,
    /// Horizontal drift per tick.
    pub speed_x: f32,
    /// Fall distance per tick.
    pub speed_y: f32,
    /// Whether the slot is live.
    pub active: bool,
}

/// What changed during one [`Weather::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeatherStep {
    /// Set when a transition roll produced a different type.
    pub changed: Option<(WeatherKind, WeatherKind)>,
    /// Set when lightning flashed this tick.
    pub lightning: bool,
}

/// Weather state and its particle pool.
#[derive(Debug, Clone)]
pub struct Weather {
    kind: WeatherKind,
    intensity: f32,
    wind_strength: f32,
    fog_density: f32,
    transition_timer: f32,
    lightning_cooldown: f32,
    lightning_active: bool,
    particles: Vec<WeatherParticle>,
    config: WeatherConfig,
}

impl Weather {
    /// Clear weather with an all-inactive pool of `config.pool_size` slots.
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            kind: WeatherKind::Clear,
            intensity: 0.0,
            wind_strength: 0.0,
            fog_density: 0.0,
            transition_timer: 0.0,
            lightning_cooldown: 0.0,
            lightning_active: false,
            particles: vec![WeatherParticle::default(); config.pool_size],
            config: config.clone(),
        }
    }

    /// Advance one tick. `time_speed` is the clock's per-tick step; it is
    /// scaled by the configured weather time scale.
    pub fn update(&mut self, time_speed: f32, viewport: Viewport, rng: &mut StdRng) -> WeatherStep {
        let mut step = WeatherStep::default();

        self.transition_timer += time_speed * self.config.time_scale;
        if self.transition_timer > self.config.transition_interval {
            self.transition_timer = 0.0;
            let before = self.kind;
            if let Some(preset) = decision::choose(&WEATHER_TABLE, rng).copied() {
                self.apply(preset, rng);
            }
            tracing::debug!(from = %before, to = %self.kind, wind = self.wind_strength, "weather roll");
            if self.kind != before {
                step.changed = Some((before, self.kind));
            }
        }

        self.update_particles(viewport, rng);
        step.lightning = self.update_lightning(rng);
        self.fog_density = fog_for(self.kind);
        step
    }

    fn apply(&mut self, preset: WeatherPreset, rng: &mut StdRng) {
        self.kind = preset.kind;
        self.intensity = preset.intensity;
        self.wind_strength = preset.wind.sample(rng);
    }

    fn update_particles(&mut self, viewport: Viewport, rng: &mut StdRng) {
        let live = self.active_count();
        let (w, h) = (viewport.w(), viewport.h());
        let (kind, wind) = (self.kind, self.wind_strength);

        for (i, p) in self.particles.iter_mut().enumerate() {
            if i >= live {
                p.active = false;
                continue;
            }
            if !p.active {
                p.active = true;
                p.x = rng.random_range(-20.0..w + 20.0);
                p.y = h + rng.random_range(0.0..20.0);
                launch(p, kind, wind, rng);
                continue;
            }
            p.y -= p.speed_y;
            p.x += p.speed_x;
            if p.y < 0.0 {
                p.y = h + rng.random_range(0.0..10.0);
                p.x = rng.random_range(-20.0..w + 20.0);
                launch(p, kind, wind, rng);
            }
        }
    }

    fn update_lightning(&mut self, rng: &mut StdRng) -> bool {
        self.lightning_active = false;
        if self.kind != WeatherKind::Storm {
            return false;
        }
        self.lightning_cooldown -= LIGHTNING_STEP;
        if self.lightning_cooldown <= 0.0 && decision::percent(rng, self.config.lightning_chance_pct) {
            self.lightning_active = true;
            self.lightning_cooldown = self.config.lightning_cooldown.sample(rng);
            tracing::debug!(cooldown = self.lightning_cooldown, "lightning");
        }
        self.lightning_active
    }

    /// Force a weather type with the given intensity (clamped to `[0, 1]`)
    /// and restart the transition timer. Wind keeps its current strength.
    /// Clear skies always carry zero intensity.
    pub fn force(&mut self, kind: WeatherKind, intensity: f32) {
        self.kind = kind;
        self.intensity = if kind == WeatherKind::Clear || intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        self.transition_timer = 0.0;
        self.fog_density = fog_for(kind);
    }

    /// Number of slots kept live: `floor(intensity × pool size)`.
    pub fn active_count(&self) -> usize {
        let n = (self.intensity * self.particles.len() as f32 + COUNT_EPSILON).floor() as usize;
        n.min(self.particles.len())
    }

    /// Horizontal sway applied to foliage and birds at time `t`.
    pub fn wind_sway(&self, t: f32) -> f32 {
        let base = (t * 0.1).sin() * 0.2;
        match self.kind {
            WeatherKind::Storm => base + (t * 3.0).sin() * 1.5 + self.wind_strength * 0.5,
            WeatherKind::Rain => base + (t * 1.5).sin() * 0.8 + self.wind_strength * 0.3,
            WeatherKind::Clear | WeatherKind::Snow => base + (t * 0.5).sin() * 0.3,
        }
    }

    /// Multiplier on villager walking speed.
    pub fn speed_modifier(&self) -> f32 {
        match self.kind {
            WeatherKind::Rain => 0.7,
            WeatherKind::Storm => 0.4,
            WeatherKind::Clear | WeatherKind::Snow => 1.0,
        }
    }

    /// Current type.
    pub fn kind(&self) -> WeatherKind {
        self.kind
    }

    /// Fraction of the pool live.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Signed wind strength.
    pub fn wind_strength(&self) -> f32 {
        self.wind_strength
    }

    /// Fog density; non-zero only under rain or storm.
    pub fn fog_density(&self) -> f32 {
        self.fog_density
    }

    /// Whether lightning is visible this tick.
    pub fn lightning_active(&self) -> bool {
        self.lightning_active
    }

    /// Elapsed weather time since the last roll.
    pub fn transition_timer(&self) -> f32 {
        self.transition_timer
    }

    /// The whole pool, live and dead slots alike.
    pub fn particles(&self) -> &[WeatherParticle] {
        &self.particles
    }

    /// Iterate live particles only.
    pub fn active_particles(&self) -> impl Iterator<Item = &WeatherParticle> {
        self.particles.iter().filter(|p| p.active)
    }
}

fn launch(p: &mut WeatherParticle, kind: WeatherKind, wind: f32, rng: &mut StdRng) {
    if kind == WeatherKind::Snow {
        p.speed_y = rng.random_range(0.1..0.3);
        p.speed_x = wind * 0.2 + rng.random_range(-0.1..0.1);
    } else {
        p.speed_y = rng.random_range(1.0..2.5);
        p.speed_x = wind * 0.3;
    }
}

fn fog_for(kind: WeatherKind) -> f32 {
    match kind {
        WeatherKind::Rain | WeatherKind::Storm => WET_FOG,
        WeatherKind::Clear | WeatherKind::Snow => 0.0,
    }
}
