//! Read-only, serializable view of a scene for renderers and tooling.

use pastorale_core::{AgentId, Color, Direction, Season};
use serde::Serialize;

use crate::agent::{Agent, Species};
use crate::camera::CameraPose;
use crate::lighting::LightSource;
use crate::metrics::{Metrics, Overlays};
use crate::particles::{ParticleKind, ParticleType};
use crate::scenery::{Building, CloudLayer};
use crate::scene::Scene;
use crate::scripted::ScriptedEvent;
use crate::weather::WeatherKind;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    /// Tick the snapshot was taken after.
    pub tick: u64,
    /// Midnights crossed.
    pub day: u64,
    /// Hour of the day.
    pub time_of_day: f32,
    /// Current season.
    pub season: Season,
    /// Weather and precipitation.
    pub weather: WeatherView,
    /// Villagers first, then animals.
    pub agents: Vec<AgentView>,
    /// Live seasonal and smoke particles.
    pub ambient_particles: Vec<AmbientParticleView>,
    /// Window lights.
    pub lights: Vec<LightSource>,
    /// Running scripted event.
    pub event: Option<EventView>,
    /// Camera transform.
    pub camera: CameraView,
    /// Sky gradient, top.
    pub sky_top: Color,
    /// Sky gradient, horizon.
    pub sky_bottom: Color,
    /// Ambient grade.
    pub ambient_tint: Color,
    /// Night overlay strength.
    pub darkness: f32,
    /// Foliage sway.
    pub wind_sway: f32,
    /// Houses.
    pub buildings: Vec<Building>,
    /// Clouds, boat and water.
    pub backdrop: BackdropView,
    /// Overlay toggles.
    pub overlays: Overlays,
    /// Frame statistics.
    pub metrics: Metrics,
}

/// Weather state and live precipitation.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherView {
    /// Weather type.
    pub kind: WeatherKind,
    /// Fraction of the pool live.
    pub intensity: f32,
    /// Signed wind.
    pub wind_strength: f32,
    /// Fog density.
    pub fog_density: f32,
    /// Flash visible this tick.
    pub lightning: bool,
    /// Live particles as `[x, y, speed_x, speed_y]`.
    pub particles: Vec<[f32; 4]>,
}

/// What an agent is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// A villager.
    Villager,
    /// An animal of the given species.
    Animal(Species),
}

/// One agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentView {
    /// Agent id.
    pub id: AgentId,
    /// Villager or animal species.
    pub kind: AgentKind,
    /// Position.
    pub x: f32,
    /// Position.
    pub y: f32,
    /// State label.
    pub state: &'static str,
    /// Animation accumulator.
    pub anim_phase: f32,
    /// Facing.
    pub direction: Direction,
    /// Sideways wind push for this frame.
    pub sway: f32,
    /// Villager conversation partner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<AgentId>,
}

/// One live ambient particle.
#[derive(Debug, Clone, Serialize)]
pub struct AmbientParticleView {
    /// Particle tag.
    #[serde(rename = "type")]
    pub particle_type: ParticleType,
    /// Position.
    pub x: f32,
    /// Position.
    pub y: f32,
    /// Draw size.
    pub size: f32,
    /// Draw colour.
    pub color: Color,
    /// Leaf angle in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
}

/// The running scripted event.
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    /// Which event.
    pub event: ScriptedEvent,
    /// Display name.
    pub title: &'static str,
    /// Time it has been running.
    pub elapsed: f32,
}

/// Camera transform.
#[derive(Debug, Clone, Serialize)]
pub struct CameraView {
    /// Where the camera is.
    pub current: CameraPose,
    /// Where it is heading.
    pub target: CameraPose,
    /// Autonomous mode on.
    pub cinematic: bool,
}

/// Clouds, boat and water.
#[derive(Debug, Clone, Serialize)]
pub struct BackdropView {
    /// Cloud bands.
    pub clouds: [CloudLayer; 3],
    /// Boat position.
    pub boat_x: f32,
    /// Boat bob height.
    pub boat_y: f32,
    /// Water phase.
    pub wave_phase: f32,
}

impl SceneSnapshot {
    /// Copy out the current state of `scene`.
    pub fn capture(scene: &Scene) -> Self {
        let clock = scene.clock();
        let weather = scene.weather();
        let env = scene.environment();
        let camera = scene.camera();
        let scenery = scene.scenery();

        let villagers = scene.villagers().iter().map(|v| AgentView {
            id: v.id(),
            kind: AgentKind::Villager,
            x: v.position().x,
            y: v.position().y,
            state: v.state_label(),
            anim_phase: v.anim_phase(),
            direction: v.direction(),
            sway: env.wind_sway * v.wind_sensitivity(),
            partner: v.partner(),
        });
        let animals = scene.animals().iter().map(|a| AgentView {
            id: a.id(),
            kind: AgentKind::Animal(a.species()),
            x: a.position().x,
            y: a.position().y,
            state: a.state_label(),
            anim_phase: a.anim_phase(),
            direction: a.direction(),
            sway: env.wind_sway * a.wind_sensitivity(),
            partner: None,
        });

        let ambient_particles = scene
            .particles()
            .active()
            .map(|p| AmbientParticleView {
                particle_type: p.particle_type(),
                x: p.x,
                y: p.y,
                size: p.size,
                color: p.color,
                rotation: match p.kind {
                    ParticleKind::Leaf { rotation, .. } => Some(rotation),
                    _ => None,
                },
            })
            .collect();

        Self {
            tick: clock.tick(),
            day: clock.day(),
            time_of_day: clock.time_of_day(),
            season: clock.season(),
            weather: WeatherView {
                kind: weather.kind(),
                intensity: weather.intensity(),
                wind_strength: weather.wind_strength(),
                fog_density: weather.fog_density(),
                lightning: weather.lightning_active(),
                particles: weather
                    .active_particles()
                    .map(|p| [p.x, p.y, p.speed_x, p.speed_y])
                    .collect(),
            },
            agents: villagers.chain(animals).collect(),
            ambient_particles,
            lights: scene.lights().to_vec(),
            event: scene.scheduler().current().map(|event| EventView {
                event,
                title: event.title(),
                elapsed: scene.scheduler().elapsed(),
            }),
            camera: CameraView {
                current: camera.current(),
                target: camera.target(),
                cinematic: camera.is_cinematic(),
            },
            sky_top: env.sky_top,
            sky_bottom: env.sky_bottom,
            ambient_tint: env.ambient_tint,
            darkness: env.darkness,
            wind_sway: env.wind_sway,
            buildings: scene.buildings().to_vec(),
            backdrop: BackdropView {
                clouds: scenery.clouds,
                boat_x: scenery.boat_x,
                boat_y: scenery.boat_y(),
                wave_phase: scenery.wave_phase,
            },
            overlays: scene.overlays(),
            metrics: *scene.metrics(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    #[test]
    fn snapshot_lists_every_agent() {
        let mut scene = Scene::new(SceneConfig::default()).unwrap();
        scene.run(10);
        let snap = scene.snapshot();
        assert_eq!(snap.tick, 10);
        assert_eq!(snap.agents.len(), 10);
        assert_eq!(snap.agents[0].kind, AgentKind::Villager);
        assert_eq!(snap.agents[9].kind, AgentKind::Animal(Species::Bird));
        assert_eq!(snap.agents[9].state, "flying");
    }

    #[test]
    fn snapshot_weather_matches_pool() {
        let mut scene = Scene::new(SceneConfig::default()).unwrap();
        scene.force_weather(WeatherKind::Rain, 0.7);
        scene.tick();
        let snap = scene.snapshot();
        assert_eq!(snap.weather.particles.len(), 350);
        assert_eq!(snap.weather.fog_density, 0.3);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut scene = Scene::new(SceneConfig::default().with_start_time(23.0)).unwrap();
        scene.start_event(ScriptedEvent::Fireflies);
        scene.tick();
        let json = serde_json::to_value(scene.snapshot()).unwrap();
        assert_eq!(json["season"], "spring");
        assert_eq!(json["weather"]["kind"], "clear");
        assert_eq!(json["event"]["event"], "fireflies");
        assert_eq!(json["lights"].as_array().unwrap().len(), 6);
        assert_eq!(json["agents"][5]["kind"]["animal"], "cow");
    }
}
