//! Per-agent behaviour models.
//!
//! Each agent owns a small state machine driven by a countdown timer. When the
//! timer runs out the agent rolls its weighted table for a new state and a new
//! duration. Night overrides the table for ground agents.

mod animal;
pub mod social;
mod villager;

pub use animal::{Animal, AnimalMotion, AnimalState, GroundState, Species};
pub use villager::{Activity, Villager};

use pastorale_core::{AgentId, Vec2};

/// What every agent exposes to the orchestrator and the renderer.
pub trait Agent {
    /// Stable identifier.
    fn id(&self) -> AgentId;

    /// Current position.
    fn position(&self) -> Vec2;

    /// Short lowercase name of the current state, e.g. `"grazing"`.
    fn state_label(&self) -> &'static str;

    /// Animation accumulator, advanced here and consumed by the renderer.
    fn anim_phase(&self) -> f32;

    /// How strongly ambient wind pushes this agent sideways.
    fn wind_sensitivity(&self) -> f32 {
        0.0
    }
}
