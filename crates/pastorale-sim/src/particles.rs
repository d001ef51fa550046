//! Seasonal decorative particles in a fixed-capacity pool.
//!
//! Separate from the weather pool. Seasonal spawners fire on a small per-tick
//! chance; chimney smoke is requested on demand. A request that finds no free
//! slot is dropped.

use pastorale_core::{Color, Season};
use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::{ParticleConfig, Viewport};
use crate::decision;

/// A particle's kind, with the fields only that kind uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParticleKind {
    /// Summer motes.
    Dust,
    /// Spring pollen, wandering on a sine.
    Pollen,
    /// Autumn leaves that spin and flutter.
    Leaf {
        /// Current angle in degrees.
        rotation: f32,
        /// Degrees added per tick.
        spin: f32,
    },
    /// Large winter flakes close to the camera.
    SnowMicro,
    /// Chimney smoke that grows and fades.
    ChimneySmoke,
}

impl ParticleKind {
    /// The plain tag, without per-kind data.
    pub fn particle_type(&self) -> ParticleType {
        match self {
            Self::Dust => ParticleType::Dust,
            Self::Pollen => ParticleType::Pollen,
            Self::Leaf { .. } => ParticleType::Leaf,
            Self::SnowMicro => ParticleType::SnowMicro,
            Self::ChimneySmoke => ParticleType::ChimneySmoke,
        }
    }
}

/// Particle tag handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleType {
    /// See [`ParticleKind::Dust`].
    Dust,
    /// See [`ParticleKind::Pollen`].
    Pollen,
    /// See [`ParticleKind::Leaf`].
    Leaf,
    /// See [`ParticleKind::SnowMicro`].
    SnowMicro,
    /// See [`ParticleKind::ChimneySmoke`].
    ChimneySmoke,
}

/// The season's signature particle and its per-tick spawn chance (0–100).
pub fn seasonal_spawner(season: Season) -> (ParticleType, u32) {
    match season {
        Season::Spring => (ParticleType::Pollen, 5),
        Season::Summer => (ParticleType::Dust, 2),
        Season::Autumn => (ParticleType::Leaf, 3),
        Season::Winter => (ParticleType::SnowMicro, 5),
    }
}

/// One pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    /// Kind and kind-specific state.
    pub kind: ParticleKind,
    /// Position.
    pub x: f32,
    /// Position.
    pub y: f32,
    /// Velocity.
    pub vx: f32,
    /// Velocity.
    pub vy: f32,
    /// Draw size.
    pub size: f32,
    /// Draw colour. Smoke alpha tracks remaining life.
    pub color: Color,
    /// Remaining life.
    pub life: f32,
    /// Life at spawn.
    pub max_life: f32,
    /// Whether the slot is live.
    pub active: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            kind: ParticleKind::Dust,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            size: 0.0,
            color: Color::WHITE,
            life: 0.0,
            max_life: 0.0,
            active: false,
        }
    }
}

impl Particle {
    /// A live particle at rest with `life` as both current and maximum life.
    pub fn new(kind: ParticleKind, x: f32, y: f32, size: f32, color: Color, life: f32) -> Self {
        Self {
            kind,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            size,
            color,
            life,
            max_life: life,
            active: true,
        }
    }

    /// Set the velocity.
    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    /// Spring pollen somewhere on screen, drifting.
    pub fn pollen(viewport: Viewport, rng: &mut StdRng) -> Self {
        let (w, h) = (viewport.w(), viewport.h());
        Self::new(
            ParticleKind::Pollen,
            rng.random_range(-20.0..w + 20.0),
            rng.random_range(0.0..h + 20.0),
            rng.random_range(0.2..0.5),
            Color::new(1.0, 1.0, 0.8, 0.8),
            100.0,
        )
        .with_velocity(rng.random_range(-0.1..0.1), rng.random_range(-0.05..0.05))
    }

    /// An autumn leaf above the top edge, pushed by the wind.
    pub fn leaf(viewport: Viewport, wind: f32, rng: &mut StdRng) -> Self {
        let (w, h) = (viewport.w(), viewport.h());
        let shade = rng.random_range(0.7..1.0);
        let kind = ParticleKind::Leaf {
            rotation: rng.random_range(0.0..360.0),
            spin: rng.random_range(-5.0..5.0),
        };
        Self::new(
            kind,
            rng.random_range(-20.0..w + 20.0),
            h + rng.random_range(0.0..20.0),
            rng.random_range(0.5..1.0),
            Color::rgb(shade, shade * 0.5, 0.1),
            100.0,
        )
        .with_velocity(
            wind * 0.5 + rng.random_range(-0.2..0.2),
            rng.random_range(-1.0..-0.5),
        )
    }

    /// A large winter flake above the top edge.
    pub fn snow_micro(viewport: Viewport, rng: &mut StdRng) -> Self {
        let (w, h) = (viewport.w(), viewport.h());
        Self::new(
            ParticleKind::SnowMicro,
            rng.random_range(-20.0..w + 20.0),
            h + rng.random_range(0.0..20.0),
            rng.random_range(0.8..1.5),
            Color::new(1.0, 1.0, 1.0, 0.9),
            100.0,
        )
        .with_velocity(rng.random_range(-0.2..0.2), rng.random_range(-1.5..-0.5))
    }

    /// A slow summer mote somewhere on screen.
    pub fn dust(viewport: Viewport, rng: &mut StdRng) -> Self {
        let (w, h) = (viewport.w(), viewport.h());
        Self::new(
            ParticleKind::Dust,
            rng.random_range(-20.0..w + 20.0),
            rng.random_range(0.0..h + 20.0),
            rng.random_range(0.1..0.3),
            Color::new(0.9, 0.9, 0.8, 0.5),
            200.0,
        )
        .with_velocity(rng.random_range(-0.05..0.05), rng.random_range(-0.05..0.05))
    }

    /// A smoke puff rising from `(x, y)`.
    pub fn smoke(x: f32, y: f32, rng: &mut StdRng) -> Self {
        Self::new(
            ParticleKind::ChimneySmoke,
            x + rng.random_range(-0.5..0.5),
            y,
            rng.random_range(1.0..2.0),
            Color::new(0.8, 0.8, 0.8, 0.4),
            rng.random_range(50.0..100.0),
        )
        .with_velocity(rng.random_range(-0.05..0.05), rng.random_range(0.1..0.2))
    }

    /// Plain type tag.
    pub fn particle_type(&self) -> ParticleType {
        self.kind.particle_type()
    }

    fn advance(&mut self, wind: f32, decay: f32) {
        self.x += self.vx;
        self.y += self.vy;

        match &mut self.kind {
            ParticleKind::Leaf { rotation, spin } => {
                *rotation += *spin;
                self.x += wind * 0.05;
                self.vy = -0.5 + (self.x * 0.1).sin() * 0.2;
            }
            ParticleKind::Pollen => {
                self.x += wind * 0.02;
                self.y += (self.x * 0.5).sin() * 0.02;
            }
            ParticleKind::SnowMicro => self.x += wind * 0.05,
            ParticleKind::ChimneySmoke => {
                self.x += wind * 0.1 + (self.y * 0.2).sin() * 0.1;
                self.size += 0.01;
            }
            ParticleKind::Dust => {}
        }

        self.life -= decay;
        if matches!(self.kind, ParticleKind::ChimneySmoke) && self.max_life > 0.0 {
            self.color.a = 0.4 * (self.life / self.max_life).max(0.0);
        }
    }

    fn on_screen(&self, viewport: Viewport) -> bool {
        self.x >= -50.0
            && self.x <= viewport.w() + 50.0
            && self.y >= -10.0
            && self.y <= viewport.h() + 50.0
    }
}

/// Fixed-capacity ambient particle pool.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    config: ParticleConfig,
}

impl ParticlePool {
    /// Create a pool of `config.capacity` inactive slots.
    pub fn new(config: &ParticleConfig) -> Self {
        Self {
            slots: vec![Particle::default(); config.capacity],
            config: config.clone(),
        }
    }

    /// Put `particle` into the first free slot. Returns `false` when the pool is full.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        // Linear scan; fine for pools of a few hundred slots
        match self.slots.iter_mut().find(|p| !p.active) {
            Some(slot) => {
                *slot = Particle {
                    active: true,
                    ..particle
                };
                true
            }
            None => false,
        }
    }

    /// Spawn a smoke puff at a chimney flue.
    pub fn spawn_smoke(&mut self, x: f32, y: f32, rng: &mut StdRng) -> bool {
        self.spawn(Particle::smoke(x, y, rng))
    }

    /// Run the seasonal spawner, then age and move every live particle.
    pub fn update(&mut self, season: Season, wind: f32, viewport: Viewport, rng: &mut StdRng) {
        let (kind, chance) = seasonal_spawner(season);
        if decision::percent(rng, chance) {
            let particle = match kind {
                ParticleType::Pollen => Particle::pollen(viewport, rng),
                ParticleType::Leaf => Particle::leaf(viewport, wind, rng),
                ParticleType::SnowMicro => Particle::snow_micro(viewport, rng),
                ParticleType::Dust | ParticleType::ChimneySmoke => Particle::dust(viewport, rng),
            };
            self.spawn(particle);
        }

        let decay = self.config.life_decay;
        for p in self.slots.iter_mut().filter(|p| p.active) {
            p.advance(wind, decay);
            if p.life <= 0.0 || !p.on_screen(viewport) {
                p.active = false;
            }
        }
    }

    /// Per-tick smoke chance configured for chimneys.
    pub fn smoke_chance_pct(&self) -> u32 {
        self.config.smoke_chance_pct
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live particles.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    /// Every slot.
    pub fn slots(&self) -> &[Particle] {
        &self.slots
    }

    /// Iterate live particles only.
    pub fn active(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.active)
    }
}
