use pastorale_core::{AgentId, Color, Direction, Vec2};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::Agent;
use super::social::{self, PeerView};
use crate::context::TickContext;
use crate::decision::{self, Span, Transition, Weighted};
use crate::event::SimEventKind;

const ARRIVAL_EPSILON: f32 = 0.5;

/// Range walk targets are drawn from.
const WALK_TARGETS: Span = Span::new(-20.0, 60.0);

/// Timer after arriving or waking.
const REST_SPAN: Span = Span::new(2.0, 5.0);

const VILLAGER_TABLE: [Weighted<Transition<Activity>>; 3] = [
    Weighted::new(40, Transition::new(Activity::Walking, Span::fixed(20.0))),
    Weighted::new(30, Transition::new(Activity::Idle, Span::new(3.0, 8.0))),
    Weighted::new(30, Transition::new(Activity::Working, Span::new(4.0, 10.0))),
];

/// What a villager is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// Standing around.
    Idle,
    /// Heading for a target.
    Walking,
    /// Bent over farm work.
    Working,
    /// Chatting with a partner.
    Socializing,
    /// Indoors for the night.
    Sleeping,
}

impl Activity {
    /// Lowercase name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Working => "working",
            Self::Socializing => "socializing",
            Self::Sleeping => "sleeping",
        }
    }
}

/// A villager walking the valley floor.
#[derive(Debug, Clone)]
pub struct Villager {
    id: AgentId,
    pos: Vec2,
    target_x: f32,
    speed: f32,
    height: f32,
    clothing: Color,
    direction: Direction,
    activity: Activity,
    timer: f32,
    anim_phase: f32,
    partner: Option<AgentId>,
}

impl Villager {
    /// Create an idle villager with randomized build, clothing and first timer.
    pub fn new(id: AgentId, pos: Vec2, rng: &mut StdRng) -> Self {
        let clothing = Color::rgb(
            rng.random_range(0.1..0.9),
            rng.random_range(0.1..0.9),
            rng.random_range(0.1..0.9),
        );
        Self {
            id,
            pos,
            target_x: pos.x,
            speed: rng.random_range(0.1..0.2),
            height: rng.random_range(3.5..4.2),
            clothing,
            direction: Direction::random(rng),
            activity: Activity::Idle,
            timer: rng.random_range(5.0..15.0),
            anim_phase: 0.0,
            partner: None,
        }
    }

    /// What peers see of this villager.
    pub fn peer_view(&self) -> PeerView {
        PeerView {
            id: self.id,
            x: self.pos.x,
            activity: self.activity,
        }
    }

    /// Advance one tick. `peers` is the whole village as it stood at the
    /// start of the tick, this villager included.
    pub fn update(&mut self, peers: &[PeerView], ctx: &mut TickContext<'_>) {
        self.timer -= ctx.config.decision_step;

        if !ctx.clock.is_within(ctx.config.villager_day) {
            self.activity = Activity::Sleeping;
            self.partner = None;
            self.pos = ctx.config.villager_bounds.clamp(self.pos);
            return;
        }

        if self.activity == Activity::Sleeping {
            self.activity = Activity::Idle;
            self.timer = REST_SPAN.sample(ctx.rng);
        } else if self.timer <= 0.0 {
            self.decide(ctx.rng);
        }

        if self.activity == Activity::Walking {
            let hit = social::resolve_encounter(
                self.id,
                self.pos.x,
                peers,
                ctx.config.social_radius,
                ctx.config.social_chance_pct,
                ctx.rng,
            );
            if let Some(chat) = hit {
                self.activity = Activity::Socializing;
                self.timer = chat.duration;
                self.partner = Some(chat.partner);
                ctx.emit(
                    SimEventKind::ConversationStarted {
                        villager: self.id,
                        partner: chat.partner,
                    },
                    format!("villager {} stops to chat with {}", self.id, chat.partner),
                );
            }
        }

        match self.activity {
            Activity::Walking => {
                let dx = self.target_x - self.pos.x;
                if dx.abs() < ARRIVAL_EPSILON {
                    self.activity = Activity::Idle;
                    self.timer = REST_SPAN.sample(ctx.rng);
                } else {
                    let weather = ctx.env.villager_speed;
                    self.direction = Direction::toward(dx);
                    self.pos.x += self.speed * self.direction.sign() * weather;
                    self.anim_phase += 0.2 * weather;
                }
            }
            Activity::Working => self.anim_phase += 0.1,
            Activity::Idle | Activity::Socializing | Activity::Sleeping => {}
        }

        self.pos = ctx.config.villager_bounds.clamp(self.pos);
    }

    fn decide(&mut self, rng: &mut StdRng) {
        let Some(t) = decision::choose(&VILLAGER_TABLE, rng).copied() else {
            return;
        };
        self.activity = t.next;
        self.timer = t.timer.sample(rng);
        self.partner = None;
        if t.next == Activity::Walking {
            self.target_x = WALK_TARGETS.sample(rng);
        }
    }

    /// Current activity.
    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Who this villager is chatting with, if anyone.
    pub fn partner(&self) -> Option<AgentId> {
        self.partner
    }

    /// Walk target.
    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    /// Facing.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Units walked per tick in fair weather.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Figure height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Clothing colour.
    pub fn clothing(&self) -> Color {
        self.clothing
    }

    /// Countdown to the next decision.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Overwrite position. Clamping happens on the next update.
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }
}

impl Agent for Villager {
    fn id(&self) -> AgentId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn state_label(&self) -> &'static str {
        self.activity.label()
    }

    fn anim_phase(&self) -> f32 {
        self.anim_phase
    }
}
