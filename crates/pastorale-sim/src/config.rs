//! Configuration for a scene run.
//!
//! Every struct here deserializes from a partial TOML document: missing keys
//! fall back to the defaults, which reproduce the stock village scene.

use pastorale_core::{Bounds, Color, Season, TimeWindow, Vec2};
use serde::{Deserialize, Serialize};

use crate::agent::Species;
use crate::decision::Span;
use crate::error::{SimError, SimResult};

/// Configuration for a scene run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RNG seed. Hosts wanting variety seed this from the wall clock.
    pub seed: u64,
    /// Maximum occurrence log size (oldest entries dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Render target size; particle spawn and cull bounds derive from it.
    pub viewport: Viewport,
    /// Time-of-day and season settings.
    pub clock: ClockConfig,
    /// Weather engine settings.
    pub weather: WeatherConfig,
    /// Ambient particle engine settings.
    pub particles: ParticleConfig,
    /// Agent behaviour settings.
    pub agents: AgentConfig,
    /// What the scene is populated with at creation.
    pub population: PopulationConfig,
    /// Scripted event scheduler settings.
    pub events: EventConfig,
    /// Camera director settings.
    pub camera: CameraConfig,
    /// Window-light settings.
    pub lighting: LightingConfig,
    /// Sky and ambient colours handed in by the art direction.
    pub palette: SkyPalette,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_events: 1_000,
            viewport: Viewport::default(),
            clock: ClockConfig::default(),
            weather: WeatherConfig::default(),
            particles: ParticleConfig::default(),
            agents: AgentConfig::default(),
            population: PopulationConfig::default(),
            events: EventConfig::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            palette: SkyPalette::default(),
        }
    }
}

impl SceneConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the time-of-day units added per tick.
    pub fn with_time_speed(mut self, speed: f32) -> Self {
        self.clock.time_speed = speed;
        self
    }

    /// Set the hour the scene starts at.
    pub fn with_start_time(mut self, hour: f32) -> Self {
        self.clock.start_time = hour;
        self
    }

    /// Set the render target size.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    /// Set the maximum occurrence log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the weather particle pool capacity.
    pub fn with_weather_pool(mut self, size: usize) -> Self {
        self.weather.pool_size = size;
        self
    }

    /// Set the ambient particle pool capacity.
    pub fn with_particle_capacity(mut self, capacity: usize) -> Self {
        self.particles.capacity = capacity;
        self
    }

    /// Parse a (possibly partial) TOML document and validate it.
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| SimError::ConfigFormat(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> SimResult<String> {
        toml::to_string_pretty(self).map_err(|e| SimError::ConfigFormat(e.to_string()))
    }

    /// Check every value the simulation cannot self-correct at runtime.
    pub fn validate(&self) -> SimResult<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(SimError::invalid("viewport", "must be non-zero in both dimensions"));
        }

        let clock = &self.clock;
        if !clock.time_speed.is_finite() || clock.time_speed < 0.0 {
            return Err(SimError::invalid("clock.time_speed", "must be finite and >= 0"));
        }
        if !clock.fast_speed.is_finite() || clock.fast_speed < 0.0 {
            return Err(SimError::invalid("clock.fast_speed", "must be finite and >= 0"));
        }
        if !clock.start_time.is_finite() {
            return Err(SimError::invalid("clock.start_time", "must be finite"));
        }
        if !(clock.season_length > 0.0) {
            return Err(SimError::invalid("clock.season_length", "must be > 0"));
        }

        let weather = &self.weather;
        if weather.pool_size == 0 {
            return Err(SimError::invalid("weather.pool_size", "must be > 0"));
        }
        if !(weather.transition_interval > 0.0) {
            return Err(SimError::invalid("weather.transition_interval", "must be > 0"));
        }
        if !weather.time_scale.is_finite() || weather.time_scale < 0.0 {
            return Err(SimError::invalid("weather.time_scale", "must be finite and >= 0"));
        }
        check_pct("weather.lightning_chance_pct", weather.lightning_chance_pct)?;
        check_span("weather.lightning_cooldown", weather.lightning_cooldown)?;

        let particles = &self.particles;
        if particles.capacity == 0 {
            return Err(SimError::invalid("particles.capacity", "must be > 0"));
        }
        if !(particles.life_decay > 0.0) {
            return Err(SimError::invalid("particles.life_decay", "must be > 0"));
        }
        check_pct("particles.smoke_chance_pct", particles.smoke_chance_pct)?;

        let agents = &self.agents;
        if !(agents.decision_step > 0.0) {
            return Err(SimError::invalid("agents.decision_step", "must be > 0"));
        }
        check_window("agents.animal_day", agents.animal_day)?;
        check_window("agents.villager_day", agents.villager_day)?;
        check_bounds("agents.ground_bounds", agents.ground_bounds)?;
        check_bounds("agents.villager_bounds", agents.villager_bounds)?;
        check_bounds("agents.sky_bounds", agents.sky_bounds)?;
        check_pct("agents.social_chance_pct", agents.social_chance_pct)?;
        if !agents.social_radius.is_finite() || agents.social_radius < 0.0 {
            return Err(SimError::invalid("agents.social_radius", "must be finite and >= 0"));
        }

        if !(self.events.roll_interval > 0.0) {
            return Err(SimError::invalid("events.roll_interval", "must be > 0"));
        }
        check_pct("events.start_chance_pct", self.events.start_chance_pct)?;

        let smooth = self.camera.smooth_speed;
        if !(smooth > 0.0 && smooth <= 1.0) {
            return Err(SimError::invalid("camera.smooth_speed", "must be in (0, 1]"));
        }

        if !(0.0..=1.0).contains(&self.lighting.max_darkness) {
            return Err(SimError::invalid("lighting.max_darkness", "must be in [0, 1]"));
        }
        if !self.lighting.window_radius.is_finite() || self.lighting.window_radius < 0.0 {
            return Err(SimError::invalid("lighting.window_radius", "must be finite and >= 0"));
        }
        Ok(())
    }
}

fn check_pct(field: &'static str, pct: u32) -> SimResult<()> {
    if pct > 100 {
        return Err(SimError::invalid(field, format!("{pct} is not a percentage")));
    }
    Ok(())
}

fn check_span(field: &'static str, span: Span) -> SimResult<()> {
    if !span.is_valid() {
        return Err(SimError::invalid(
            field,
            format!("[{}, {}] is not a valid range", span.min, span.max),
        ));
    }
    Ok(())
}

fn check_window(field: &'static str, window: TimeWindow) -> SimResult<()> {
    if !window.is_valid() {
        return Err(SimError::invalid(field, "hours must lie within 0..=24"));
    }
    Ok(())
}

fn check_bounds(field: &'static str, bounds: Bounds) -> SimResult<()> {
    if !bounds.is_valid() {
        return Err(SimError::invalid(field, "limits must be finite and ordered"));
    }
    Ok(())
}

/// Render target size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Viewport {
    /// Width as a float.
    pub fn w(&self) -> f32 {
        self.width as f32
    }

    /// Height as a float.
    pub fn h(&self) -> f32 {
        self.height as f32
    }
}

/// Clock settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Hour the scene starts at.
    pub start_time: f32,
    /// Time-of-day units per tick at normal speed.
    pub time_speed: f32,
    /// Time-of-day units per tick while fast-forwarding.
    pub fast_speed: f32,
    /// Time units per season.
    pub season_length: f32,
    /// Season at start.
    pub start_season: Season,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_time: 12.0,
            time_speed: 0.01,
            fast_speed: 0.5,
            season_length: 48.0,
            start_season: Season::Spring,
        }
    }
}

/// Weather engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Number of rain/snow particle slots.
    pub pool_size: usize,
    /// Elapsed weather time between transition rolls.
    pub transition_interval: f32,
    /// Weather time elapsed per unit of clock time.
    pub time_scale: f32,
    /// Per-tick chance (0–100) of a flash once the cooldown has expired.
    pub lightning_chance_pct: u32,
    /// Cooldown drawn after each flash.
    pub lightning_cooldown: Span,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            pool_size: 500,
            transition_interval: 50.0,
            time_scale: 50.0,
            lightning_chance_pct: 2,
            lightning_cooldown: Span::new(5.0, 15.0),
        }
    }
}

/// Ambient particle engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of ambient particle slots.
    pub capacity: usize,
    /// Life removed from every active particle per tick.
    pub life_decay: f32,
    /// Per-tick chance (0–100) that each chimney puffs smoke.
    pub smoke_chance_pct: u32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            capacity: 500,
            life_decay: 0.5,
            smoke_chance_pct: 30,
        }
    }
}

/// Agent behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Amount every state timer counts down per tick.
    pub decision_step: f32,
    /// Hours during which ground animals are awake.
    pub animal_day: TimeWindow,
    /// Hours during which villagers are awake.
    pub villager_day: TimeWindow,
    /// Where cows and sheep may roam.
    pub ground_bounds: Bounds,
    /// Where villagers may walk.
    pub villager_bounds: Bounds,
    /// Where birds fly; x edges wrap.
    pub sky_bounds: Bounds,
    /// Horizontal distance under which two villagers may stop to chat.
    pub social_radius: f32,
    /// Per-tick chance (0–100), per nearby peer, of starting a chat.
    pub social_chance_pct: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            decision_step: 0.1,
            animal_day: TimeWindow::new(6.0, 19.0),
            villager_day: TimeWindow::new(5.0, 22.0),
            ground_bounds: Bounds::new(-20.0, 80.0, 0.0, 60.0),
            villager_bounds: Bounds::new(-25.0, 85.0, 0.0, 60.0),
            sky_bounds: Bounds::new(-20.0, 100.0, 20.0, 70.0),
            social_radius: 3.0,
            social_chance_pct: 2,
        }
    }
}

/// One animal placed at scene creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimalSpawn {
    /// What kind of animal.
    pub species: Species,
    /// Starting position.
    pub x: f32,
    /// Starting position.
    pub y: f32,
}

/// What the scene is populated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of villagers.
    pub villagers: u32,
    /// X of the first villager.
    pub villager_start_x: f32,
    /// Horizontal gap between consecutive villagers.
    pub villager_spacing: f32,
    /// Ground line villagers walk on.
    pub villager_ground_y: f32,
    /// Building footprints (bottom-left corners).
    pub buildings: Vec<Vec2>,
    /// Animals.
    pub animals: Vec<AnimalSpawn>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            villagers: 5,
            villager_start_x: -10.0,
            villager_spacing: 15.0,
            villager_ground_y: 10.0,
            buildings: vec![
                Vec2::new(5.0, 20.0),
                Vec2::new(50.0, 22.0),
                Vec2::new(-15.0, 18.0),
            ],
            animals: vec![
                AnimalSpawn {
                    species: Species::Cow,
                    x: 5.0,
                    y: 20.0,
                },
                AnimalSpawn {
                    species: Species::Cow,
                    x: 10.0,
                    y: 20.0,
                },
                AnimalSpawn {
                    species: Species::Sheep,
                    x: 35.0,
                    y: 20.0,
                },
                AnimalSpawn {
                    species: Species::Sheep,
                    x: 40.0,
                    y: 20.0,
                },
                AnimalSpawn {
                    species: Species::Bird,
                    x: -10.0,
                    y: 50.0,
                },
            ],
        }
    }
}

/// Scripted event scheduler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Idle time between start attempts.
    pub roll_interval: f32,
    /// Chance (0–100) that an attempt tries to start an event.
    pub start_chance_pct: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            roll_interval: 100.0,
            start_chance_pct: 30,
        }
    }
}

/// Camera director settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered per tick, in `(0, 1]`.
    pub smooth_speed: f32,
    /// Start in autonomous mode.
    pub cinematic: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smooth_speed: 0.05,
            cinematic: true,
        }
    }
}

/// Window-light settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Colour of lit windows.
    pub window_color: Color,
    /// Glow radius of each window.
    pub window_radius: f32,
    /// Window positions relative to each building's corner.
    pub window_offsets: Vec<Vec2>,
    /// Darkness reached in deep night.
    pub max_darkness: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            window_color: Color::new(1.0, 0.9, 0.4, 0.8),
            window_radius: 8.0,
            window_offsets: vec![Vec2::new(2.0, 6.5), Vec2::new(10.0, 6.5)],
            max_darkness: 0.7,
        }
    }
}

/// Sky gradient stops and ambient grading colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyPalette {
    /// Night sky, top.
    pub night_top: Color,
    /// Night sky, horizon.
    pub night_bottom: Color,
    /// Dawn sky, top.
    pub dawn_top: Color,
    /// Dawn sky, horizon.
    pub dawn_bottom: Color,
    /// Day sky, top.
    pub day_top: Color,
    /// Day sky, horizon.
    pub day_bottom: Color,
    /// Dusk sky, top.
    pub dusk_top: Color,
    /// Dusk sky, horizon.
    pub dusk_bottom: Color,
    /// Ambient grade at night.
    pub ambient_night: Color,
    /// Ambient grade at 05:00.
    pub ambient_dawn_start: Color,
    /// Ambient grade at 07:00.
    pub ambient_dawn_end: Color,
    /// Ambient grade by day.
    pub ambient_day: Color,
    /// Ambient grade at 17:00.
    pub ambient_dusk_start: Color,
    /// Ambient grade at 20:00.
    pub ambient_dusk_end: Color,
}

impl Default for SkyPalette {
    fn default() -> Self {
        Self {
            night_top: Color::rgb(0.0, 0.0, 0.1),
            night_bottom: Color::rgb(0.05, 0.05, 0.2),
            dawn_top: Color::rgb(0.4, 0.2, 0.5),
            dawn_bottom: Color::rgb(0.8, 0.4, 0.4),
            day_top: Color::rgb(0.0, 0.4, 0.9),
            day_bottom: Color::rgb(0.5, 0.7, 1.0),
            dusk_top: Color::rgb(0.3, 0.1, 0.4),
            dusk_bottom: Color::rgb(0.9, 0.3, 0.2),
            ambient_night: Color::rgb(0.2, 0.2, 0.5),
            ambient_dawn_start: Color::rgb(0.2, 0.2, 0.4),
            ambient_dawn_end: Color::rgb(1.0, 0.8, 0.6),
            ambient_day: Color::rgb(1.0, 1.0, 0.95),
            ambient_dusk_start: Color::rgb(1.0, 0.9, 0.8),
            ambient_dusk_end: Color::rgb(0.8, 0.5, 0.6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SceneConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.weather.pool_size, 500);
        assert_eq!(config.particles.capacity, 500);
        assert!((config.clock.time_speed - 0.01).abs() < f32::EPSILON);
        assert_eq!(config.population.animals.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = SceneConfig::default()
            .with_seed(123)
            .with_time_speed(0.5)
            .with_max_events(50)
            .with_viewport(320, 240);
        assert_eq!(config.seed, 123);
        assert!((config.clock.time_speed - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.max_events, 50);
        assert_eq!(config.viewport.width, 320);
    }

    #[test]
    fn zero_capacity_pools_rejected() {
        let err = SceneConfig::default().with_weather_pool(0).validate().unwrap_err();
        assert!(err.to_string().contains("weather.pool_size"));

        let err = SceneConfig::default()
            .with_particle_capacity(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("particles.capacity"));
    }

    #[test]
    fn camera_smoothing_range_enforced() {
        let mut config = SceneConfig::default();
        config.camera.smooth_speed = 0.0;
        assert!(config.validate().is_err());
        config.camera.smooth_speed = 1.0;
        assert!(config.validate().is_ok());
        config.camera.smooth_speed = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_speed_and_bad_percent_rejected() {
        assert!(SceneConfig::default().with_time_speed(-0.1).validate().is_err());
        let mut config = SceneConfig::default();
        config.events.start_chance_pct = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_span_rejected() {
        let mut config = SceneConfig::default();
        config.weather.lightning_cooldown = Span::new(15.0, 5.0);
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig {
                field: "weather.lightning_cooldown",
                ..
            }
        ));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
seed = 7

[weather]
pool_size = 64

[clock]
start_time = 23.0
"#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.weather.pool_size, 64);
        assert!((config.weather.transition_interval - 50.0).abs() < f32::EPSILON);
        assert!((config.clock.start_time - 23.0).abs() < f32::EPSILON);
        assert_eq!(config.population.villagers, 5);
    }

    #[test]
    fn toml_round_trip_preserves_config() {
        let config = SceneConfig::default().with_seed(99);
        let text = config.to_toml_string().unwrap();
        let parsed = SceneConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn malformed_toml_reports_format_error() {
        let err = SceneConfig::from_toml_str("seed = [").unwrap_err();
        assert!(matches!(err, SimError::ConfigFormat(_)));
    }

    #[test]
    fn invalid_toml_values_rejected() {
        let err = SceneConfig::from_toml_str("[particles]\ncapacity = 0\n").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { .. }));
    }
}
