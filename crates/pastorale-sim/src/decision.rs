//! Weighted random choice tables shared by every randomized state machine.
//!
//! A table is a slice of [`Weighted`] entries. [`choose`] rolls once over the
//! total weight and walks the table in order, so ties and probabilities are
//! fixed by the declaration rather than by branching code.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A closed range of floats sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Lower end.
    pub min: f32,
    /// Upper end.
    pub max: f32,
}

impl Span {
    /// Create a span.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A span that always samples `value`.
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Draw a value. A degenerate span (`min >= max`) yields `min`.
    pub fn sample(&self, rng: &mut StdRng) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    /// `true` when both ends are finite and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Whether `v` lies inside the span.
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// One entry of a weighted table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighted<T> {
    /// Relative weight. Zero-weight entries are never chosen.
    pub weight: u32,
    /// The outcome.
    pub value: T,
}

impl<T> Weighted<T> {
    /// Create a table entry.
    pub const fn new(weight: u32, value: T) -> Self {
        Self { weight, value }
    }
}

/// The next state of an agent state machine and how long to hold it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<S> {
    /// State to switch to.
    pub next: S,
    /// Duration range for the state's countdown timer.
    pub timer: Span,
}

impl<S> Transition<S> {
    /// Create a transition.
    pub const fn new(next: S, timer: Span) -> Self {
        Self { next, timer }
    }
}

/// Sum of all weights in a table.
pub fn total_weight<T>(table: &[Weighted<T>]) -> u32 {
    table.iter().map(|w| w.weight).sum()
}

/// Resolve an already-rolled value in `0..total_weight(table)` to its entry.
pub fn resolve<T>(table: &[Weighted<T>], roll: u32) -> Option<&T> {
    let mut remaining = roll;
    for entry in table {
        if remaining < entry.weight {
            return Some(&entry.value);
        }
        remaining -= entry.weight;
    }
    None
}

/// Roll once and pick an entry. Returns `None` for an empty or all-zero table.
pub fn choose<'a, T>(table: &'a [Weighted<T>], rng: &mut StdRng) -> Option<&'a T> {
    let total = total_weight(table);
    if total == 0 {
        return None;
    }
    resolve(table, rng.random_range(0..total))
}

/// Roll 0–99 and report whether it came in under `pct`.
pub fn percent(rng: &mut StdRng, pct: u32) -> bool {
    rng.random_range(0..100u32) < pct
}
