use pastorale_core::{AgentId, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::agent::{Animal, Species, Villager};
use crate::camera::Camera;
use crate::clock::WorldClock;
use crate::config::{SceneConfig, Viewport};
use crate::context::TickContext;
use crate::environment::Environment;
use crate::error::SimResult;
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::lighting::{self, LightSource};
use crate::metrics::{Metrics, Overlays};
use crate::particles::ParticlePool;
use crate::scenery::{Building, Scenery};
use crate::scripted::{EventScheduler, ScriptedEvent};
use crate::snapshot::SceneSnapshot;
use crate::weather::{Weather, WeatherKind};

/// The top-level scene orchestrator.
///
/// Owns the clock, the RNG, every subsystem and every agent, and runs them in
/// a fixed order once per tick. Hosts drive it with [`Scene::tick`] and read
/// the result through the accessors or [`Scene::snapshot`].
pub struct Scene {
    config: SceneConfig,
    clock: WorldClock,
    rng: StdRng,
    events: EventLog,
    weather: Weather,
    env: Environment,
    lights: Vec<LightSource>,
    buildings: Vec<Building>,
    particles: ParticlePool,
    camera: Camera,
    scheduler: EventScheduler,
    villagers: Vec<Villager>,
    animals: Vec<Animal>,
    scenery: Scenery,
    metrics: Metrics,
    overlays: Overlays,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("tick", &self.clock.tick())
            .field("time_of_day", &self.clock.time_of_day())
            .field("weather", &self.weather.kind())
            .field("agents", &(self.villagers.len() + self.animals.len()))
            .field("events", &self.events.len())
            .finish()
    }
}

impl Scene {
    /// Validate `config` and build the scene: houses, villagers, animals,
    /// empty particle pools, a camera at the origin and an idle scheduler.
    pub fn new(config: SceneConfig) -> SimResult<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let clock = WorldClock::new(&config.clock);
        let pop = &config.population;

        let buildings: Vec<Building> = pop
            .buildings
            .iter()
            .map(|&pos| Building::new(pos, &mut rng))
            .collect();

        let villagers: Vec<Villager> = (0..pop.villagers)
            .map(|i| {
                let x = pop.villager_start_x + i as f32 * pop.villager_spacing;
                Villager::new(AgentId(i), Vec2::new(x, pop.villager_ground_y), &mut rng)
            })
            .collect();

        let first_animal = pop.villagers;
        let animals: Vec<Animal> = pop
            .animals
            .iter()
            .zip(first_animal..)
            .map(|(spawn, id)| {
                Animal::new(AgentId(id), spawn.species, Vec2::new(spawn.x, spawn.y), &mut rng)
                    .with_herd(herd_for(spawn.species))
            })
            .collect();

        let weather = Weather::new(&config.weather);
        let scenery = Scenery::default();
        let env = Environment::derive(
            clock.time_of_day(),
            scenery.wave_phase,
            &weather,
            &config.palette,
            config.lighting.max_darkness,
        );
        let mut camera = Camera::new(&config.camera);
        camera.jump_to(0.0, 0.0, 1.0);

        tracing::debug!(
            seed = config.seed,
            villagers = villagers.len(),
            animals = animals.len(),
            buildings = buildings.len(),
            "scene created"
        );

        Ok(Self {
            clock,
            rng,
            events: EventLog::new(config.max_events),
            weather,
            env,
            lights: Vec::new(),
            buildings,
            particles: ParticlePool::new(&config.particles),
            camera,
            scheduler: EventScheduler::new(&config.events),
            villagers,
            animals,
            scenery,
            metrics: Metrics::default(),
            overlays: Overlays::default(),
            config,
        })
    }

    /// Advance every subsystem by one tick.
    pub fn tick(&mut self) {
        let season_before = self.clock.season();
        let step = self.clock.advance();
        let t = self.clock.time_of_day();
        let viewport = self.config.viewport;

        if step.new_day {
            let day = self.clock.day();
            self.emit(SimEventKind::NewDay { day }, format!("day {day} begins"));
        }
        if let Some(season) = step.new_season {
            tracing::info!(from = %season_before, to = %season, tick = step.tick, "season changed");
            self.emit(
                SimEventKind::SeasonChanged {
                    from: season_before,
                    to: season,
                },
                format!("{season_before} turns to {season}"),
            );
        }

        // Weather, then everything derived from it
        let weather_step = self
            .weather
            .update(self.clock.time_speed(), viewport, &mut self.rng);
        if let Some((from, to)) = weather_step.changed {
            self.emit(
                SimEventKind::WeatherChanged { from, to },
                format!("weather turns from {from} to {to}"),
            );
        }
        if weather_step.lightning {
            self.emit(SimEventKind::LightningStrike, "lightning flashes");
        }
        self.refresh_environment();

        lighting::collect_lights(
            &mut self.lights,
            t,
            self.buildings.iter().map(|b| b.pos),
            &self.config.lighting,
        );

        for building in &mut self.buildings {
            building.update(t, &mut self.particles, &mut self.rng);
        }
        self.particles.update(
            self.clock.season(),
            self.weather.wind_strength(),
            viewport,
            &mut self.rng,
        );

        self.camera.update(t);

        let sched = self
            .scheduler
            .update(self.clock.time_speed(), t, &mut self.rng);
        if let Some(event) = sched.ended {
            self.emit(
                SimEventKind::ScriptedEventEnded { event },
                format!("{event} is over"),
            );
        }
        if let Some(event) = sched.started {
            self.emit(
                SimEventKind::ScriptedEventStarted { event },
                format!("{event} begins"),
            );
        }

        // Villagers see each other as they stood before anyone moved
        let peers: Vec<_> = self.villagers.iter().map(Villager::peer_view).collect();
        let mut ctx = TickContext {
            clock: &self.clock,
            env: &self.env,
            config: &self.config.agents,
            rng: &mut self.rng,
            events: &mut self.events,
        };
        for villager in &mut self.villagers {
            villager.update(&peers, &mut ctx);
        }
        for animal in &mut self.animals {
            animal.update(&mut ctx);
        }

        self.scenery.update(self.weather.wind_strength());

        self.metrics.record_counts(
            self.agent_count(),
            self.weather.active_count() + self.particles.active_count(),
        );

        tracing::trace!(
            tick = step.tick,
            hour = t,
            weather = %self.weather.kind(),
            lights = self.lights.len(),
            particles = self.metrics.particle_count,
            "tick"
        );
    }

    /// Advance `n` ticks.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    fn refresh_environment(&mut self) {
        self.env = Environment::derive(
            self.clock.time_of_day(),
            self.scenery.wave_phase,
            &self.weather,
            &self.config.palette,
            self.config.lighting.max_darkness,
        );
    }

    // ------------------------------------------------------------------
    // Host controls
    // ------------------------------------------------------------------

    /// Switch between fast-forward and normal clock speed.
    pub fn set_fast_forward(&mut self, fast: bool) {
        self.clock.set_fast_forward(fast);
    }

    /// Jump to an hour. Derived values follow on the next tick.
    pub fn set_time_of_day(&mut self, hour: f32) {
        self.clock.set_time_of_day(hour);
        self.refresh_environment();
    }

    /// Resize the render target. Zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::warn!(width, height, "ignoring empty viewport");
            return;
        }
        self.config.viewport = Viewport { width, height };
    }

    /// Force a weather type, bypassing the transition roll.
    pub fn force_weather(&mut self, kind: WeatherKind, intensity: f32) {
        let from = self.weather.kind();
        self.weather.force(kind, intensity);
        if from != kind {
            self.emit(
                SimEventKind::WeatherChanged { from, to: kind },
                format!("weather forced from {from} to {kind}"),
            );
        }
        self.refresh_environment();
    }

    /// Start a scripted event now. Refused while another is running.
    pub fn start_event(&mut self, event: ScriptedEvent) -> bool {
        let started = self.scheduler.start(event);
        if started {
            self.emit(
                SimEventKind::ScriptedEventStarted { event },
                format!("{event} begins"),
            );
        }
        started
    }

    /// Flip the statistics overlay.
    pub fn toggle_stats_overlay(&mut self) {
        self.overlays.stats_visible = !self.overlays.stats_visible;
    }

    /// Flip the heatmap overlay.
    pub fn toggle_heatmap(&mut self) {
        self.overlays.heatmap_visible = !self.overlays.heatmap_visible;
    }

    /// Feed a wall-clock frame duration into the FPS average.
    pub fn record_frame(&mut self, dt_secs: f32) {
        self.metrics.record_frame(dt_secs);
    }

    /// Mutable camera access for manual pans and cuts.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Render-ready view of the current state.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(self)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    pub fn villagers(&self) -> &[Villager] {
        &self.villagers
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn overlays(&self) -> Overlays {
        self.overlays
    }

    /// Villagers plus animals.
    pub fn agent_count(&self) -> usize {
        self.villagers.len() + self.animals.len()
    }
}

fn herd_for(species: Species) -> u32 {
    match species {
        Species::Cow => 1,
        Species::Sheep => 2,
        Species::Bird => 0,
    }
}
