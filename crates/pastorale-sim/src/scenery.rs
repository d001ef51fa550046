//! Buildings and the frame counters that animate the backdrop.

use pastorale_core::Vec2;
use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::decision;
use crate::particles::ParticlePool;

/// Door easing factor per tick.
const DOOR_EASE: f32 = 0.05;

/// Horizontal range cloud layers wrap within.
const CLOUD_MIN_X: f32 = -40.0;
const CLOUD_MAX_X: f32 = 120.0;

const BOAT_SPEED: f32 = 0.05;
const BOAT_RESET_X: f32 = -30.0;
const BOAT_MAX_X: f32 = 100.0;

/// Wall material, picked at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WallKind {
    /// Grey stone.
    Stone,
    /// Pale timber.
    LightWood,
    /// Dark timber.
    DarkWood,
}

/// Roof material, picked at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofKind {
    /// Red tiles.
    Tiled,
    /// Straw.
    Thatch,
}

/// A village house.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    /// Bottom-left corner.
    pub pos: Vec2,
    /// Wall width.
    pub width: f32,
    /// Wall height.
    pub height: f32,
    /// Roof height above the walls.
    pub roof_height: f32,
    /// Wall material.
    pub wall: WallKind,
    /// Roof material.
    pub roof: RoofKind,
    /// Whether smoke rises from it.
    pub has_chimney: bool,
    /// Window lamps lit.
    pub light_on: bool,
    /// Door openness, 0 closed to 1 open.
    pub door_open: f32,
}

impl Building {
    /// A house with randomized size, materials and chimney.
    pub fn new(pos: Vec2, rng: &mut StdRng) -> Self {
        let wall = if rng.random_ratio(1, 4) {
            WallKind::Stone
        } else if rng.random_bool(0.5) {
            WallKind::LightWood
        } else {
            WallKind::DarkWood
        };
        let roof = if rng.random_bool(0.5) {
            RoofKind::Tiled
        } else {
            RoofKind::Thatch
        };
        Self {
            pos,
            width: rng.random_range(8.0..14.0),
            height: rng.random_range(8.0..12.0),
            roof_height: rng.random_range(5.0..8.0),
            wall,
            roof,
            has_chimney: rng.random_bool(0.5),
            light_on: false,
            door_open: 0.0,
        }
    }

    /// Where chimney smoke appears.
    pub fn flue(&self) -> Vec2 {
        self.pos.offset(self.width - 3.0, self.height + 6.0)
    }

    /// Advance one tick: puff smoke, set the lamps, ease the door.
    pub fn update(&mut self, time_of_day: f32, particles: &mut ParticlePool, rng: &mut StdRng) {
        if self.has_chimney && decision::percent(rng, particles.smoke_chance_pct()) {
            let flue = self.flue();
            particles.spawn_smoke(flue.x, flue.y, rng);
        }

        let night = time_of_day < 6.0 || time_of_day > 19.0;
        self.light_on = night;

        // Doors stand open for the first three hours of each ten-hour stretch
        let open = !night && (time_of_day.floor() as u32) % 10 < 3;
        let target = if open { 1.0 } else { 0.0 };
        self.door_open += (target - self.door_open) * DOOR_EASE;
    }
}

/// One drifting cloud band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CloudLayer {
    /// Horizontal offset.
    pub x: f32,
    /// Altitude.
    pub y: f32,
    /// Drift per tick in still air.
    pub speed: f32,
    /// Draw scale.
    pub scale: f32,
    /// Draw opacity.
    pub alpha: f32,
}

impl CloudLayer {
    /// Create a layer.
    pub const fn new(x: f32, y: f32, speed: f32, scale: f32, alpha: f32) -> Self {
        Self {
            x,
            y,
            speed,
            scale,
            alpha,
        }
    }
}

/// Backdrop counters: clouds, the river boat and the wave phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenery {
    /// Back, middle and front cloud bands.
    pub clouds: [CloudLayer; 3],
    /// Boat position along the river.
    pub boat_x: f32,
    /// Phase driving water ripples, boat bob and wind sway.
    pub wave_phase: f32,
}

impl Default for Scenery {
    fn default() -> Self {
        Self {
            clouds: [
                CloudLayer::new(10.0, 48.0, 0.05, 3.0, 0.8),
                CloudLayer::new(40.0, 52.0, 0.03, 4.0, 0.6),
                CloudLayer::new(-10.0, 45.0, 0.07, 2.5, 0.9),
            ],
            boat_x: 0.0,
            wave_phase: 0.0,
        }
    }
}

impl Scenery {
    /// Advance the counters one tick.
    pub fn update(&mut self, wind_strength: f32) {
        for layer in &mut self.clouds {
            layer.x += layer.speed + wind_strength * 0.01;
            if layer.x > CLOUD_MAX_X {
                layer.x = CLOUD_MIN_X;
            } else if layer.x < CLOUD_MIN_X {
                layer.x = CLOUD_MAX_X;
            }
        }

        self.boat_x += BOAT_SPEED;
        if self.boat_x > BOAT_MAX_X {
            self.boat_x = BOAT_RESET_X;
        }

        self.wave_phase += 0.1;
    }

    /// Boat height on the water.
    pub fn boat_y(&self) -> f32 {
        6.0 + (self.wave_phase * 0.5).sin() * 0.5
    }
}
