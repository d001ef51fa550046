//! Core value types for Pastorale: colours, seasons, geometry, and time windows.
//!
//! This crate holds the plain data the simulation passes around and the
//! renderer consumes. It carries no simulation logic, so a host can build
//! palettes, bounds, and time windows without pulling in the simulation.

/// RGBA colour values and blending helpers.
pub mod color;
/// Positions, world bounds, and facing direction.
pub mod geometry;
/// Stable identifiers for agents.
pub mod id;
/// The four-season cycle.
pub mod season;
/// Hour-of-day windows that may wrap past midnight.
pub mod time;

/// Re-export colour type.
pub use color::Color;
/// Re-export geometry types.
pub use geometry::{Bounds, Direction, Vec2};
/// Re-export identifier types.
pub use id::AgentId;
/// Re-export season type.
pub use season::Season;
/// Re-export time window type.
pub use time::{HOURS_PER_DAY, TimeWindow};
