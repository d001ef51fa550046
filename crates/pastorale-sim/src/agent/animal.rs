use pastorale_core::{AgentId, Direction, Vec2};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::Agent;
use crate::context::TickContext;
use crate::decision::{self, Span, Transition, Weighted};

/// Distance under which a walking animal counts as arrived.
const ARRIVAL_EPSILON: f32 = 0.5;

/// How far a wander target may lie from the current position.
const WANDER_REACH: f32 = 15.0;

/// Timer drawn after waking up and for idle spells.
const IDLE_SPAN: Span = Span::new(2.0, 5.0);

/// Altitude range birds pick targets from.
const ALTITUDE_SPAN: Span = Span::new(30.0, 60.0);

/// Ground animal decision table.
const GROUND_TABLE: [Weighted<Transition<GroundState>>; 3] = [
    Weighted::new(40, Transition::new(GroundState::Grazing, Span::new(3.0, 8.0))),
    Weighted::new(30, Transition::new(GroundState::Moving, Span::fixed(10.0))),
    Weighted::new(30, Transition::new(GroundState::Idle, IDLE_SPAN)),
];

/// Animal species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Grazes on the field.
    Cow,
    /// Grazes on the field.
    Sheep,
    /// Always airborne.
    Bird,
}

impl Species {
    /// Whether this species flies instead of walking.
    pub fn is_airborne(self) -> bool {
        matches!(self, Self::Bird)
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Cow => "cow",
            Self::Sheep => "sheep",
            Self::Bird => "bird",
        };
        f.write_str(name)
    }
}

/// States of a ground animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundState {
    /// Standing around.
    Idle,
    /// Head down, eating.
    Grazing,
    /// Walking toward a target.
    Moving,
    /// Night-time rest.
    Sleeping,
}

/// How an animal moves, with the fields only that mode needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimalMotion {
    /// Walks the field.
    Grounded {
        /// Current state.
        state: GroundState,
        /// Where a `Moving` animal is heading.
        target_x: f32,
    },
    /// Flies across the sky.
    Airborne {
        /// Altitude being approached.
        target_altitude: f32,
    },
}

/// Flat state reported to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalState {
    /// See [`GroundState::Idle`].
    Idle,
    /// See [`GroundState::Grazing`].
    Grazing,
    /// See [`GroundState::Moving`].
    Moving,
    /// See [`GroundState::Sleeping`].
    Sleeping,
    /// Birds, always.
    Flying,
}

impl AnimalState {
    /// Lowercase name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Grazing => "grazing",
            Self::Moving => "moving",
            Self::Sleeping => "sleeping",
            Self::Flying => "flying",
        }
    }
}

/// A cow, sheep or bird.
#[derive(Debug, Clone)]
pub struct Animal {
    id: AgentId,
    species: Species,
    pos: Vec2,
    speed: f32,
    direction: Direction,
    motion: AnimalMotion,
    timer: f32,
    anim_phase: f32,
    herd: u32,
}

impl Animal {
    /// Create an animal with randomized speed, heading and first timer.
    pub fn new(id: AgentId, species: Species, pos: Vec2, rng: &mut StdRng) -> Self {
        let speed = if species.is_airborne() {
            rng.random_range(0.3..0.6)
        } else {
            rng.random_range(0.02..0.05)
        };
        let motion = if species.is_airborne() {
            AnimalMotion::Airborne {
                target_altitude: pos.y,
            }
        } else {
            AnimalMotion::Grounded {
                state: GroundState::Idle,
                target_x: pos.x,
            }
        };
        Self {
            id,
            species,
            pos,
            speed,
            direction: Direction::random(rng),
            motion,
            timer: IDLE_SPAN.sample(rng),
            anim_phase: 0.0,
            herd: 0,
        }
    }

    /// Assign a herd.
    pub fn with_herd(mut self, herd: u32) -> Self {
        self.herd = herd;
        self
    }

    /// Advance one tick.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        let step = ctx.config.decision_step;
        self.timer -= step;
        self.anim_phase += step;

        match self.motion {
            AnimalMotion::Airborne { .. } => self.fly(ctx),
            AnimalMotion::Grounded { .. } => self.walk(ctx),
        }
    }

    fn walk(&mut self, ctx: &mut TickContext<'_>) {
        let AnimalMotion::Grounded { state, target_x } = &mut self.motion else {
            return;
        };
        // Animals are still up at the closing hour itself
        let awake = ctx.clock.is_within_inclusive(ctx.config.animal_day);

        if !awake {
            *state = GroundState::Sleeping;
        } else if *state == GroundState::Sleeping {
            *state = GroundState::Idle;
            self.timer = IDLE_SPAN.sample(ctx.rng);
        } else if self.timer <= 0.0 {
            if let Some(t) = decision::choose(&GROUND_TABLE, ctx.rng).copied() {
                *state = t.next;
                self.timer = t.timer.sample(ctx.rng);
                if t.next == GroundState::Moving {
                    let reach = ctx.rng.random_range(-WANDER_REACH..WANDER_REACH);
                    *target_x = self.pos.x + reach * self.direction.sign();
                }
            }
        }

        if *state == GroundState::Moving {
            let dx = *target_x - self.pos.x;
            if dx.abs() < ARRIVAL_EPSILON {
                *state = GroundState::Idle;
            } else {
                self.direction = Direction::toward(dx);
                self.pos.x += self.speed * self.direction.sign();
                self.anim_phase += 0.2;
            }
        }

        self.pos = ctx.config.ground_bounds.clamp(self.pos);
    }

    fn fly(&mut self, ctx: &mut TickContext<'_>) {
        let wind = ctx.env.wind_sway * self.species_wind();
        let AnimalMotion::Airborne { target_altitude } = &mut self.motion else {
            return;
        };
        if self.timer <= 0.0 {
            *target_altitude = ALTITUDE_SPAN.sample(ctx.rng);
            self.timer = IDLE_SPAN.sample(ctx.rng);
        }

        let sky = ctx.config.sky_bounds;
        let drift = self.speed * self.direction.sign() + wind;
        self.pos.x = sky.wrap_x(self.pos.x + drift);

        let t = ctx.time_of_day();
        self.pos.y += (*target_altitude - self.pos.y) * 0.05 + (t * 0.5).sin() * 0.1;
        self.pos = sky.clamp(self.pos);
    }

    fn species_wind(&self) -> f32 {
        if self.species.is_airborne() { 0.1 } else { 0.0 }
    }

    /// Species.
    pub fn species(&self) -> Species {
        self.species
    }

    /// Flat state for renderers.
    pub fn state(&self) -> AnimalState {
        match self.motion {
            AnimalMotion::Airborne { .. } => AnimalState::Flying,
            AnimalMotion::Grounded { state, .. } => match state {
                GroundState::Idle => AnimalState::Idle,
                GroundState::Grazing => AnimalState::Grazing,
                GroundState::Moving => AnimalState::Moving,
                GroundState::Sleeping => AnimalState::Sleeping,
            },
        }
    }

    /// Movement mode and its state.
    pub fn motion(&self) -> AnimalMotion {
        self.motion
    }

    /// Facing.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Units moved per tick.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Countdown to the next decision.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Herd the animal belongs to.
    pub fn herd(&self) -> u32 {
        self.herd
    }

    /// Overwrite position, e.g. when a host drops an animal somewhere.
    /// Clamping happens on the next update.
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }
}

impl Agent for Animal {
    fn id(&self) -> AgentId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn state_label(&self) -> &'static str {
        self.state().label()
    }

    fn anim_phase(&self) -> f32 {
        self.anim_phase
    }

    fn wind_sensitivity(&self) -> f32 {
        self.species_wind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Fixture;
    use rand::SeedableRng;

    fn cow(fx: &mut Fixture) -> Animal {
        Animal::new(AgentId(0), Species::Cow, Vec2::new(5.0, 20.0), &mut fx.rng)
    }

    #[test]
    fn cow_sleeps_at_night_and_wakes_idle() {
        let mut fx = Fixture::at_hour(23.0, 1);
        let mut cow = cow(&mut fx);
        cow.update(&mut fx.ctx());
        assert_eq!(cow.state(), AnimalState::Sleeping);

        // Still asleep however long the timer has run down
        for _ in 0..200 {
            cow.update(&mut fx.ctx());
            assert_eq!(cow.state(), AnimalState::Sleeping);
        }

        fx.set_hour(6.5);
        cow.update(&mut fx.ctx());
        assert_eq!(cow.state(), AnimalState::Idle);
        assert!(IDLE_SPAN.contains(cow.timer()));
    }

    #[test]
    fn cow_stays_up_through_closing_hour() {
        let mut fx = Fixture::at_hour(19.0, 8);
        let mut cow = cow(&mut fx);
        cow.update(&mut fx.ctx());
        assert_ne!(cow.state(), AnimalState::Sleeping);

        fx.set_hour(19.01);
        cow.update(&mut fx.ctx());
        assert_eq!(cow.state(), AnimalState::Sleeping);
    }

    #[test]
    fn set_position_is_clamped_on_update() {
        let mut fx = Fixture::at_hour(12.0, 9);
        let mut cow = cow(&mut fx);
        cow.set_position(Vec2::new(-500.0, 900.0));
        cow.update(&mut fx.ctx());
        assert!(fx.config.ground_bounds.contains(cow.position()));

        // Asleep animals are clamped as well
        fx.set_hour(23.0);
        cow.set_position(Vec2::new(500.0, -900.0));
        cow.update(&mut fx.ctx());
        assert_eq!(cow.state(), AnimalState::Sleeping);
        assert!(fx.config.ground_bounds.contains(cow.position()));

        let mut bird = Animal::new(AgentId(3), Species::Bird, Vec2::new(10.0, 50.0), &mut fx.rng);
        bird.set_position(Vec2::new(40.0, 5_000.0));
        bird.update(&mut fx.ctx());
        assert!(fx.config.sky_bounds.contains(bird.position()));
        bird.set_position(Vec2::new(40.0, -5_000.0));
        bird.update(&mut fx.ctx());
        assert!(fx.config.sky_bounds.contains(bird.position()));
    }

    #[test]
    fn sleep_overrides_any_state() {
        let mut fx = Fixture::at_hour(12.0, 2);
        let mut cow = cow(&mut fx);
        cow.motion = AnimalMotion::Grounded {
            state: GroundState::Moving,
            target_x: 40.0,
        };
        fx.set_hour(2.0);
        cow.update(&mut fx.ctx());
        assert_eq!(cow.state(), AnimalState::Sleeping);
    }

    #[test]
    fn expired_timer_rolls_new_state() {
        let mut fx = Fixture::at_hour(12.0, 3);
        let mut cow = cow(&mut fx);
        cow.timer = 0.05;
        cow.update(&mut fx.ctx());
        // Moving may arrive immediately and fall back to idle
        assert!(cow.timer() > 0.0);
        assert_ne!(cow.state(), AnimalState::Sleeping);
    }

    #[test]
    fn moving_heads_to_target_and_stops() {
        let mut fx = Fixture::at_hour(12.0, 4);
        let mut cow = cow(&mut fx);
        cow.timer = 1_000.0;
        cow.motion = AnimalMotion::Grounded {
            state: GroundState::Moving,
            target_x: 7.0,
        };
        for _ in 0..200 {
            cow.update(&mut fx.ctx());
        }
        assert_eq!(cow.state(), AnimalState::Idle);
        assert!((cow.position().x - 7.0).abs() < ARRIVAL_EPSILON);
        assert_eq!(cow.direction(), Direction::Right);
    }

    #[test]
    fn ground_animals_stay_in_bounds() {
        let mut fx = Fixture::at_hour(12.0, 5);
        let mut sheep = Animal::new(AgentId(1), Species::Sheep, Vec2::new(79.0, 20.0), &mut fx.rng);
        sheep.timer = 1_000.0;
        sheep.motion = AnimalMotion::Grounded {
            state: GroundState::Moving,
            target_x: 500.0,
        };
        for _ in 0..2_000 {
            sheep.update(&mut fx.ctx());
            assert!(fx.config.ground_bounds.contains(sheep.position()));
        }
        assert_eq!(sheep.position().x, 80.0);
    }

    #[test]
    fn bird_wraps_and_stays_in_sky() {
        let mut fx = Fixture::at_hour(12.0, 6);
        let mut bird = Animal::new(AgentId(2), Species::Bird, Vec2::new(-10.0, 50.0), &mut fx.rng);
        fx.env.wind_sway = 2.0;
        let mut wrapped = false;
        let mut last_x = bird.position().x;
        for _ in 0..2_000 {
            bird.update(&mut fx.ctx());
            let p = bird.position();
            assert!(fx.config.sky_bounds.contains(p));
            assert_eq!(bird.state(), AnimalState::Flying);
            if (p.x - last_x).abs() > 50.0 {
                wrapped = true;
            }
            last_x = p.x;
        }
        assert!(wrapped);
    }

    #[test]
    fn bird_altitude_targets_in_range() {
        let mut fx = Fixture::at_hour(12.0, 7);
        let mut bird = Animal::new(AgentId(3), Species::Bird, Vec2::new(0.0, 50.0), &mut fx.rng);
        for _ in 0..500 {
            bird.update(&mut fx.ctx());
            if let AnimalMotion::Airborne { target_altitude } = bird.motion() {
                assert!(target_altitude == 50.0 || ALTITUDE_SPAN.contains(target_altitude));
            }
        }
    }

    #[test]
    fn wind_sensitivity_by_species() {
        let mut rng = StdRng::seed_from_u64(8);
        let bird = Animal::new(AgentId(0), Species::Bird, Vec2::new(0.0, 40.0), &mut rng);
        let cow = Animal::new(AgentId(1), Species::Cow, Vec2::new(0.0, 20.0), &mut rng);
        assert!(bird.wind_sensitivity() > 0.0);
        assert_eq!(cow.wind_sensitivity(), 0.0);
        assert_eq!(cow.state_label(), "idle");
        assert_eq!(bird.state_label(), "flying");
    }
}
