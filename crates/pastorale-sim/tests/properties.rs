use pastorale_core::{Color, Season};
use pastorale_sim::agent::Agent;
use pastorale_sim::config::{ParticleConfig, Viewport, WeatherConfig};
use pastorale_sim::particles::{Particle, ParticleKind, ParticlePool};
use pastorale_sim::{
    AnimalState, Scene, SceneConfig, ScriptedEvent, SimEventKind, Species, Weather, WeatherKind,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn scene_at(hour: f32) -> Scene {
    Scene::new(SceneConfig::default().with_start_time(hour)).unwrap()
}

fn ground_states(scene: &Scene) -> Vec<AnimalState> {
    scene
        .animals()
        .iter()
        .filter(|a| !a.species().is_airborne())
        .map(|a| a.state())
        .collect()
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

#[test]
fn forced_rain_keeps_350_drops() {
    let mut scene = scene_at(12.0);
    scene.force_weather(WeatherKind::Rain, 0.7);
    scene.tick();

    let weather = scene.weather();
    assert_eq!(weather.kind(), WeatherKind::Rain);
    assert_eq!(weather.active_count(), 350);
    assert_eq!(weather.active_particles().count(), 350);
}

#[test]
fn clear_sky_has_no_drops() {
    let mut scene = scene_at(12.0);
    scene.force_weather(WeatherKind::Storm, 1.0);
    scene.tick();
    scene.force_weather(WeatherKind::Clear, 0.6);
    scene.tick();

    let weather = scene.weather();
    let pool = weather.particles().len() as f32;
    assert_eq!(weather.intensity(), 0.0);
    assert_eq!(scene.snapshot().weather.intensity, 0.0);
    assert_eq!(
        weather.active_particles().count(),
        (weather.intensity() * pool).floor() as usize
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn live_drops_are_a_prefix(seed in any::<u64>(), ticks in 1usize..400) {
        let mut weather = Weather::new(&WeatherConfig::default());
        let mut rng = StdRng::seed_from_u64(seed);
        let viewport = Viewport::default();

        for _ in 0..ticks {
            weather.update(0.5, viewport, &mut rng);
            let live = weather.active_count();
            for (i, p) in weather.particles().iter().enumerate() {
                prop_assert_eq!(p.active, i < live);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Ambient particles
// ---------------------------------------------------------------------------

#[test]
fn ambient_particle_expires_with_its_life() {
    let mut pool = ParticlePool::new(&ParticleConfig::default());
    let mut rng = StdRng::seed_from_u64(9);
    let viewport = Viewport::default();
    let mote = Particle::new(ParticleKind::Dust, 100.0, 100.0, 0.2, Color::WHITE, 100.0);
    assert!(pool.spawn(mote));

    for _ in 0..199 {
        pool.update(Season::Winter, 0.0, viewport, &mut rng);
    }
    assert!(pool.slots()[0].active);
    assert_eq!(pool.slots()[0].life, 0.5);

    pool.update(Season::Winter, 0.0, viewport, &mut rng);
    assert!(!pool.slots()[0].active);
}

#[test]
fn pool_never_exceeds_capacity() {
    let mut scene = Scene::new(SceneConfig::default().with_particle_capacity(8)).unwrap();
    scene.set_fast_forward(true);
    for _ in 0..300 {
        scene.tick();
        assert!(scene.particles().active_count() <= 8);
    }
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

#[test]
fn cows_sleep_at_night_and_wake_at_dawn() {
    let mut scene = scene_at(20.0);
    scene.tick();
    let cows: Vec<_> = scene
        .animals()
        .iter()
        .filter(|a| a.species() == Species::Cow)
        .map(|a| a.state())
        .collect();
    assert_eq!(cows, vec![AnimalState::Sleeping, AnimalState::Sleeping]);

    scene.set_time_of_day(7.0);
    scene.tick();
    assert!(ground_states(&scene).iter().all(|s| *s == AnimalState::Idle));
}

#[test]
fn birds_always_fly() {
    let mut scene = scene_at(2.0);
    scene.run(50);
    let bird = scene
        .animals()
        .iter()
        .find(|a| a.species() == Species::Bird)
        .unwrap();
    assert_eq!(bird.state(), AnimalState::Flying);
}

#[test]
fn villagers_sleep_after_ten() {
    let mut scene = scene_at(22.5);
    scene.tick();
    assert!(scene.villagers().iter().all(|v| v.state_label() == "sleeping"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn agents_stay_in_bounds(seed in any::<u64>(), ticks in 1u64..600, hour in 0.0f32..24.0) {
        let config = SceneConfig::default().with_seed(seed).with_start_time(hour);
        let agents = config.agents.clone();
        let mut scene = Scene::new(config).unwrap();
        scene.set_fast_forward(true);
        scene.run(ticks);

        for v in scene.villagers() {
            prop_assert!(agents.villager_bounds.contains(v.position()));
        }
        for a in scene.animals() {
            let bounds = if a.species().is_airborne() {
                agents.sky_bounds
            } else {
                agents.ground_bounds
            };
            prop_assert!(bounds.contains(a.position()));
        }
    }
}

// ---------------------------------------------------------------------------
// Scripted events
// ---------------------------------------------------------------------------

#[test]
fn market_day_closes_after_six() {
    let mut scene = scene_at(12.0);
    assert!(scene.start_event(ScriptedEvent::MarketDay));

    scene.set_time_of_day(17.9);
    scene.tick();
    assert_eq!(scene.scheduler().current(), Some(ScriptedEvent::MarketDay));

    scene.set_time_of_day(18.1);
    scene.tick();
    assert_eq!(scene.scheduler().current(), None);
    assert!(scene.events().events().iter().any(|e| matches!(
        e.kind,
        SimEventKind::ScriptedEventEnded {
            event: ScriptedEvent::MarketDay
        }
    )));
}

#[test]
fn starts_and_ends_alternate() {
    let config = SceneConfig::default().with_max_events(100_000).with_seed(3);
    let mut scene = Scene::new(config).unwrap();
    scene.set_fast_forward(true);

    scene.run(3000);

    let mut active = false;
    for event in scene.events().events() {
        match event.kind {
            SimEventKind::ScriptedEventStarted { .. } => {
                assert!(!active, "second event started at tick {}", event.tick);
                active = true;
            }
            SimEventKind::ScriptedEventEnded { .. } => {
                assert!(active, "event ended without starting at tick {}", event.tick);
                active = false;
            }
            _ => {}
        }
    }
    assert_eq!(active, scene.scheduler().is_active());
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[test]
fn settled_camera_stays_put() {
    let mut scene = scene_at(12.0);
    scene.camera_mut().set_cinematic(false);
    scene.camera_mut().jump_to(4.0, -2.0, 1.2);
    scene.run(20);
    let cam = scene.camera();
    assert_eq!(cam.current(), cam.target());
    assert_eq!(cam.current().zoom, 1.2);
}

#[test]
fn camera_converges_on_pan() {
    let mut scene = scene_at(12.0);
    scene.camera_mut().set_cinematic(false);
    scene.camera_mut().pan_to(10.0, 0.0, 1.0);
    scene.run(200);
    assert!((scene.camera().current().x - 10.0).abs() < 0.01);
}

// ---------------------------------------------------------------------------
// Whole scene
// ---------------------------------------------------------------------------

#[test]
fn snapshots_are_reproducible() {
    let run = || {
        let mut scene = Scene::new(SceneConfig::default().with_seed(11)).unwrap();
        scene.set_fast_forward(true);
        scene.run(250);
        serde_json::to_string(&scene.snapshot()).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn full_day_logs_a_new_day() {
    let mut scene = scene_at(23.0);
    scene.set_fast_forward(true);
    scene.run(10);
    assert_eq!(scene.clock().day(), 1);
    assert!(
        scene
            .events()
            .events()
            .iter()
            .any(|e| matches!(e.kind, SimEventKind::NewDay { day: 1 }))
    );
}
