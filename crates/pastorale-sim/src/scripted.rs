//! Rare, time-of-day gated world events. At most one is active at a time.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::EventConfig;
use crate::decision;

/// The scripted events a scene can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedEvent {
    /// Morning market stalls.
    MarketDay,
    /// Evening festival. Only ever started by the host.
    Festival,
    /// Night-time firefly swarm.
    Fireflies,
    /// Birds gathering at sunrise.
    BirdCongregation,
}

impl ScriptedEvent {
    /// Candidates for a random start, in the order their windows are checked.
    pub const RANDOM_CANDIDATES: [Self; 3] = [Self::MarketDay, Self::Fireflies, Self::BirdCongregation];

    /// Whether a random roll may start this event at `t`. Bounds are strict.
    pub fn eligible_at(self, t: f32) -> bool {
        match self {
            Self::MarketDay => t > 6.0 && t < 10.0,
            Self::Fireflies => t > 20.0 || t < 4.0,
            Self::BirdCongregation => t > 5.0 && t < 6.5,
            Self::Festival => false,
        }
    }

    /// Whether the event is over at `t`. Depends on nothing but the hour.
    pub fn is_over_at(self, t: f32) -> bool {
        match self {
            Self::MarketDay => t > 18.0,
            Self::Fireflies => t > 5.0 && t < 20.0,
            Self::BirdCongregation => t > 8.0,
            Self::Festival => t > 22.0,
        }
    }

    /// Display name.
    pub fn title(self) -> &'static str {
        match self {
            Self::MarketDay => "Market Day",
            Self::Festival => "Festival",
            Self::Fireflies => "Firefly Swarm",
            Self::BirdCongregation => "Bird Gathering",
        }
    }
}

impl std::fmt::Display for ScriptedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// What changed during one [`EventScheduler::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerStep {
    /// Event that began this tick.
    pub started: Option<ScriptedEvent>,
    /// Event that ended this tick.
    pub ended: Option<ScriptedEvent>,
}

/// Single-slot scheduler for scripted events.
///
/// The timer counts toward the next start attempt while idle and counts the
/// active event's duration otherwise.
#[derive(Debug, Clone)]
pub struct EventScheduler {
    current: Option<ScriptedEvent>,
    timer: f32,
    config: EventConfig,
}

impl EventScheduler {
    /// An idle scheduler.
    pub fn new(config: &EventConfig) -> Self {
        Self {
            current: None,
            timer: 0.0,
            config: config.clone(),
        }
    }

    /// Advance one tick.
    pub fn update(
        &mut self,
        time_speed: f32,
        time_of_day: f32,
        rng: &mut StdRng,
    ) -> SchedulerStep {
        self.timer += time_speed;
        let mut step = SchedulerStep::default();

        match self.current {
            None => {
                if self.timer > self.config.roll_interval {
                    self.timer = 0.0;
                    if decision::percent(rng, self.config.start_chance_pct) {
                        let candidate = ScriptedEvent::RANDOM_CANDIDATES
                            .into_iter()
                            .find(|e| e.eligible_at(time_of_day));
                        if let Some(event) = candidate {
                            self.begin(event);
                            step.started = Some(event);
                        }
                    }
                }
            }
            Some(event) => {
                if event.is_over_at(time_of_day) {
                    self.current = None;
                    self.timer = 0.0;
                    tracing::info!(event = %event, hour = time_of_day, "scripted event ended");
                    step.ended = Some(event);
                }
            }
        }
        step
    }

    /// Start `event` now, as a host trigger. Refused while another is active.
    pub fn start(&mut self, event: ScriptedEvent) -> bool {
        if self.current.is_some() {
            return false;
        }
        self.begin(event);
        true
    }

    fn begin(&mut self, event: ScriptedEvent) {
        self.current = Some(event);
        self.timer = 0.0;
        tracing::info!(event = %event, "scripted event started");
    }

    /// The active event, if any.
    pub fn current(&self) -> Option<ScriptedEvent> {
        self.current
    }

    /// Whether an event is active.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Time the active event has run for, or time since the last attempt when idle.
    pub fn elapsed(&self) -> f32 {
        self.timer
    }
}
