//! Frame statistics and the overlay toggles a host displays them with.

use serde::Serialize;

/// Frame and population statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Smoothed frames per second.
    pub fps: f32,
    /// Last frame duration in milliseconds.
    pub frame_time_ms: f32,
    /// Agents in the scene.
    pub entity_count: usize,
    /// Live particles across both pools.
    pub particle_count: usize,
    /// Rough simulation footprint in megabytes.
    pub memory_mb: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            fps: 60.0,
            frame_time_ms: 16.6,
            entity_count: 0,
            particle_count: 0,
            memory_mb: 0.0,
        }
    }
}

impl Metrics {
    /// Fold a wall-clock frame duration into the FPS average. Non-positive
    /// durations only update the frame time.
    pub fn record_frame(&mut self, dt_secs: f32) {
        if dt_secs > 0.0 {
            self.fps = 0.9 * self.fps + 0.1 / dt_secs;
        }
        self.frame_time_ms = dt_secs * 1000.0;
    }

    /// Refresh population counts and the memory estimate.
    pub fn record_counts(&mut self, entities: usize, particles: usize) {
        self.entity_count = entities;
        self.particle_count = particles;
        self.memory_mb = entities as f32 * 0.05 + particles as f32 * 0.001;
    }
}

/// Overlay visibility flags set by the host. Both start hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Overlays {
    /// Statistics panel.
    pub stats_visible: bool,
    /// Activity heatmap.
    pub heatmap_visible: bool,
}
