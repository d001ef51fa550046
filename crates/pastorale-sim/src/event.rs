use pastorale_core::{AgentId, Season};
use serde::Serialize;

use crate::scripted::ScriptedEvent;
use crate::weather::WeatherKind;

/// Something notable the scene did during a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEventKind {
    // Clock
    /// The season rolled over.
    SeasonChanged {
        /// Previous season.
        from: Season,
        /// New season.
        to: Season,
    },
    /// Time of day wrapped past midnight.
    NewDay {
        /// Days completed since the scene started.
        day: u64,
    },

    // Weather
    /// A transition roll produced a different weather type.
    WeatherChanged {
        /// Previous weather.
        from: WeatherKind,
        /// New weather.
        to: WeatherKind,
    },
    /// A storm flash fired this tick.
    LightningStrike,

    // Scripted events
    /// A scripted event began.
    ScriptedEventStarted {
        /// Which event.
        event: ScriptedEvent,
    },
    /// A scripted event's end condition held.
    ScriptedEventEnded {
        /// Which event.
        event: ScriptedEvent,
    },

    // Agents
    /// A walking villager stopped to chat with a nearby peer.
    ConversationStarted {
        /// The villager who initiated.
        villager: AgentId,
        /// The peer they stopped next to.
        partner: AgentId,
    },
}

impl SimEventKind {
    /// Whether a given agent took part in this event.
    pub fn involves(&self, id: AgentId) -> bool {
        match self {
            Self::ConversationStarted { villager, partner } => *villager == id || *partner == id,
            _ => false,
        }
    }

    /// Events worth showing in a short summary. Midnights and flashes are noise.
    pub fn is_notable(&self) -> bool {
        !matches!(self, Self::NewDay { .. } | Self::LightningStrike)
    }
}

/// A record of something that happened during the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimEvent {
    /// Tick on which it happened.
    pub tick: u64,
    /// What happened.
    pub kind: SimEventKind,
    /// Human-readable line for logs and the CLI.
    pub description: String,
}

impl SimEvent {
    /// Create an event.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Bounded record of scene occurrences.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a log holding at most `max_events` entries (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest ones past capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let excess = self.events.len() - self.max_events;
            self.events.drain(..excess);
        }
    }

    /// Every retained event, oldest first.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Events recorded on `tick`.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Events involving `id`.
    pub fn events_for_agent(&self, id: AgentId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` when nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop every retained event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(tick: u64, a: u32, b: u32) -> SimEvent {
        SimEvent::new(
            tick,
            SimEventKind::ConversationStarted {
                villager: AgentId(a),
                partner: AgentId(b),
            },
            "chat",
        )
    }

    #[test]
    fn log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(chat(1, 0, 1));
        log.push(SimEvent::new(2, SimEventKind::NewDay { day: 1 }, "midnight"));
        log.push(chat(2, 2, 0));

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_at_tick(2).len(), 2);
        assert_eq!(log.events_for_agent(AgentId(0)).len(), 2);
        assert_eq!(log.events_for_agent(AgentId(1)).len(), 1);
        assert!(log.events_for_agent(AgentId(9)).is_empty());
    }

    #[test]
    fn log_drops_oldest_past_capacity() {
        let mut log = EventLog::new(3);
        for tick in 0..5 {
            log.push(SimEvent::new(tick, SimEventKind::LightningStrike, "flash"));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.events()[0].tick, 2);
        assert_eq!(log.events()[2].tick, 4);
    }

    #[test]
    fn log_clear() {
        let mut log = EventLog::new(0);
        log.push(chat(0, 0, 1));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn notable_filter() {
        assert!(!SimEventKind::LightningStrike.is_notable());
        assert!(!SimEventKind::NewDay { day: 3 }.is_notable());
        assert!(
            SimEventKind::WeatherChanged {
                from: WeatherKind::Clear,
                to: WeatherKind::Rain,
            }
            .is_notable()
        );
    }

    #[test]
    fn event_kind_serializes_with_tag() {
        let json = serde_json::to_value(SimEventKind::SeasonChanged {
            from: Season::Spring,
            to: Season::Summer,
        })
        .unwrap();
        assert_eq!(json["kind"], "season_changed");
        assert_eq!(json["to"], "summer");
    }
}
