use pastorale_core::{HOURS_PER_DAY, Season, TimeWindow};

use crate::config::ClockConfig;

/// What changed during one [`WorldClock::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStep {
    /// The tick number just entered.
    pub tick: u64,
    /// Set when the season rolled over this tick.
    pub new_season: Option<Season>,
    /// Set when time-of-day wrapped past midnight this tick.
    pub new_day: bool,
}

/// Tracks simulation time: a monotonic tick counter, the time of day in
/// `0.0..24.0`, and the season cycle.
///
/// Owned by the scene and advanced exactly once per tick. Every other
/// subsystem reads it.
#[derive(Debug, Clone)]
pub struct WorldClock {
    tick: u64,
    day: u64,
    time_of_day: f32,
    time_speed: f32,
    normal_speed: f32,
    fast_speed: f32,
    season: Season,
    season_timer: f32,
    season_length: f32,
}

impl WorldClock {
    /// Create a clock at tick 0 from its configuration.
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            tick: 0,
            day: 0,
            time_of_day: config.start_time.rem_euclid(HOURS_PER_DAY),
            time_speed: config.time_speed,
            normal_speed: config.time_speed,
            fast_speed: config.fast_speed,
            season: config.start_season,
            season_timer: 0.0,
            season_length: config.season_length,
        }
    }

    /// Advance the clock by one tick.
    pub fn advance(&mut self) -> ClockStep {
        self.tick += 1;

        let raw = self.time_of_day + self.time_speed;
        let new_day = raw >= HOURS_PER_DAY;
        if new_day {
            self.day += 1;
        }
        self.time_of_day = wrap_hour(raw);

        self.season_timer += self.time_speed;
        let mut new_season = None;
        if self.season_timer >= self.season_length {
            // Carry the remainder so long runs don't drift.
            self.season_timer -= self.season_length;
            self.season = self.season.next();
            new_season = Some(self.season);
        }

        ClockStep {
            tick: self.tick,
            new_season,
            new_day,
        }
    }

    /// Current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of midnights crossed since the clock started.
    pub fn day(&self) -> u64 {
        self.day
    }

    /// Hour of the day in `0.0..24.0`.
    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    /// Jump to a given hour. Out-of-range values wrap into `0.0..24.0`.
    pub fn set_time_of_day(&mut self, hour: f32) {
        self.time_of_day = wrap_hour(hour);
    }

    /// Time-of-day units added per tick.
    pub fn time_speed(&self) -> f32 {
        self.time_speed
    }

    /// Change the per-tick time step. Negative and non-finite speeds are ignored.
    pub fn set_time_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed >= 0.0 {
            self.time_speed = speed;
        }
    }

    /// Switch between the configured fast-forward and normal speeds.
    pub fn set_fast_forward(&mut self, fast: bool) {
        self.time_speed = if fast {
            self.fast_speed
        } else {
            self.normal_speed
        };
    }

    /// Current season.
    pub fn season(&self) -> Season {
        self.season
    }

    /// Time accumulated toward the next season change.
    pub fn season_progress(&self) -> f32 {
        self.season_timer
    }

    /// Whether the current hour falls inside `window`.
    pub fn is_within(&self, window: TimeWindow) -> bool {
        window.contains(self.time_of_day)
    }

    /// Like [`is_within`](Self::is_within) but counting the window's last hour.
    pub fn is_within_inclusive(&self, window: TimeWindow) -> bool {
        window.contains_inclusive(self.time_of_day)
    }
}

fn wrap_hour(hour: f32) -> f32 {
    if !hour.is_finite() {
        return 0.0;
    }
    let wrapped = hour.rem_euclid(HOURS_PER_DAY);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if wrapped >= HOURS_PER_DAY { 0.0 } else { wrapped }
}
