//! Tick-based simulation layer for the Pastorale village scene.
//!
//! A [`Scene`] owns a shared [`WorldClock`] and a fixed set of subsystems:
//! weather, ambient particles, window lighting, scripted events, the camera
//! director, buildings and backdrop counters, and the villager and animal
//! behaviour models. Each tick runs them in a fixed order so derived values
//! (wind sway, ambient tint, darkness) are fresh before agents read them.
//! Nothing here draws; hosts read the result through [`Scene::snapshot`].

/// Villager and animal behaviour models.
pub mod agent;
/// Smoothed camera and the cinematic director.
pub mod camera;
/// Time of day, day count and seasons.
pub mod clock;
/// Scene configuration, TOML loading and validation.
pub mod config;
/// Borrowed per-tick state handed to agent updates.
pub mod context;
/// Weighted choice tables and random spans.
pub mod decision;
/// Values derived from clock and weather each tick.
pub mod environment;
/// Error types for the simulation crate.
pub mod error;
/// Occurrence records and the bounded occurrence log.
pub mod event;
/// Window lights and the darkness curve.
pub mod lighting;
/// Frame statistics and overlay toggles.
pub mod metrics;
/// Seasonal decorative particle pool.
pub mod particles;
/// Top-level scene orchestrator.
pub mod scene;
/// Buildings, clouds, boat and water.
pub mod scenery;
/// Scripted world events.
pub mod scripted;
/// Serializable render snapshots.
pub mod snapshot;
/// Weather state machine and precipitation pool.
pub mod weather;

/// Re-exports of the agent types.
pub use agent::{Activity, Agent, Animal, AnimalState, Species, Villager};
/// Re-export of [`camera::Camera`].
pub use camera::Camera;
/// Re-export of [`clock::WorldClock`].
pub use clock::WorldClock;
/// Re-export of [`config::SceneConfig`].
pub use config::SceneConfig;
/// Re-export of [`context::TickContext`].
pub use context::TickContext;
/// Re-export of [`environment::Environment`].
pub use environment::Environment;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`lighting::LightSource`].
pub use lighting::LightSource;
/// Re-exports of [`particles::Particle`] and [`particles::ParticlePool`].
pub use particles::{Particle, ParticlePool};
/// Re-export of [`scene::Scene`].
pub use scene::Scene;
/// Re-exports of [`scripted::EventScheduler`] and [`scripted::ScriptedEvent`].
pub use scripted::{EventScheduler, ScriptedEvent};
/// Re-export of [`snapshot::SceneSnapshot`].
pub use snapshot::SceneSnapshot;
/// Re-exports of [`weather::Weather`] and [`weather::WeatherKind`].
pub use weather::{Weather, WeatherKind};
