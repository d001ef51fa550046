use rand::rngs::StdRng;

use crate::clock::WorldClock;
use crate::config::AgentConfig;
use crate::environment::Environment;
use crate::event::{EventLog, SimEvent, SimEventKind};

/// Everything an agent update may read or touch during one tick.
pub struct TickContext<'a> {
    /// Shared clock, already advanced for this tick.
    pub clock: &'a WorldClock,
    /// Derived environment for this tick.
    pub env: &'a Environment,
    /// Agent behaviour settings.
    pub config: &'a AgentConfig,
    /// The scene's random source.
    pub rng: &'a mut StdRng,
    /// Occurrence log.
    pub events: &'a mut EventLog,
}

impl TickContext<'_> {
    /// Record an occurrence at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    /// Current tick number.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Current hour.
    pub fn time_of_day(&self) -> f32 {
        self.clock.time_of_day()
    }
}

/// Owned pieces of a [`TickContext`] for unit tests.
#[cfg(test)]
pub(crate) struct Fixture {
    pub clock: WorldClock,
    pub env: Environment,
    pub config: AgentConfig,
    pub rng: StdRng,
    pub events: EventLog,
}

#[cfg(test)]
impl Fixture {
    pub fn at_hour(hour: f32, seed: u64) -> Self {
        use rand::SeedableRng;

        use crate::config::{ClockConfig, SkyPalette, WeatherConfig};
        use crate::weather::Weather;

        let clock = WorldClock::new(&ClockConfig {
            start_time: hour,
            time_speed: 0.0,
            ..ClockConfig::default()
        });
        let weather = Weather::new(&WeatherConfig::default());
        let env = Environment::derive(hour, 0.0, &weather, &SkyPalette::default(), 0.7);
        Self {
            clock,
            env,
            config: AgentConfig::default(),
            rng: StdRng::seed_from_u64(seed),
            events: EventLog::new(0),
        }
    }

    pub fn set_hour(&mut self, hour: f32) {
        self.clock.set_time_of_day(hour);
        self.env.time_of_day = hour;
    }

    pub fn ctx(&mut self) -> TickContext<'_> {
        TickContext {
            clock: &self.clock,
            env: &self.env,
            config: &self.config,
            rng: &mut self.rng,
            events: &mut self.events,
        }
    }
}
