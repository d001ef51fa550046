//! Smoothed camera with an optional time-of-day driven mode.

use serde::Serialize;

use crate::config::CameraConfig;

/// Position and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    /// Horizontal pan.
    pub x: f32,
    /// Vertical pan.
    pub y: f32,
    /// Zoom factor.
    pub zoom: f32,
}

impl CameraPose {
    /// Create a pose.
    pub const fn new(x: f32, y: f32, zoom: f32) -> Self {
        Self { x, y, zoom }
    }

    fn approach(self, target: Self, t: f32) -> Self {
        Self {
            x: lerp(self.x, target.x, t),
            y: lerp(self.y, target.y, t),
            zoom: lerp(self.zoom, target.zoom, t),
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Target the cinematic director picks for an hour.
pub fn cinematic_target(t: f32) -> CameraPose {
    if (5.0..8.0).contains(&t) {
        CameraPose::new(0.0, 0.0, 1.0)
    } else if (11.0..13.0).contains(&t) {
        CameraPose::new(0.0, 0.0, 1.1)
    } else if (17.0..19.0).contains(&t) {
        CameraPose::new(10.0, -5.0, 1.1)
    } else if t > 22.0 || t < 4.0 {
        CameraPose::new((t * 0.5).sin() * 10.0, 0.0, 1.0)
    } else {
        CameraPose::new(0.0, 0.0, 1.0)
    }
}

/// Camera that chases its target by a fixed fraction each tick.
#[derive(Debug, Clone)]
pub struct Camera {
    current: CameraPose,
    target: CameraPose,
    smooth_speed: f32,
    cinematic: bool,
}

impl Camera {
    /// A camera resting at the origin at zoom 1.
    pub fn new(config: &CameraConfig) -> Self {
        let origin = CameraPose::new(0.0, 0.0, 1.0);
        Self {
            current: origin,
            target: origin,
            smooth_speed: config.smooth_speed,
            cinematic: config.cinematic,
        }
    }

    /// Pick a cinematic target if enabled, then move toward the target.
    pub fn update(&mut self, time_of_day: f32) {
        if self.cinematic {
            self.target = cinematic_target(time_of_day);
        }
        self.current = self.current.approach(self.target, self.smooth_speed);
    }

    /// Set a new target; the camera eases toward it.
    pub fn pan_to(&mut self, x: f32, y: f32, zoom: f32) {
        self.target = CameraPose::new(x, y, zoom);
    }

    /// Hard cut: move there now and make it the target.
    pub fn jump_to(&mut self, x: f32, y: f32, zoom: f32) {
        let pose = CameraPose::new(x, y, zoom);
        self.current = pose;
        self.target = pose;
    }

    /// Switch autonomous mode. Manual targets are overwritten while it is on.
    pub fn set_cinematic(&mut self, on: bool) {
        self.cinematic = on;
    }

    /// Whether autonomous mode is on.
    pub fn is_cinematic(&self) -> bool {
        self.cinematic
    }

    /// Where the camera is.
    pub fn current(&self) -> CameraPose {
        self.current
    }

    /// Where the camera is heading.
    pub fn target(&self) -> CameraPose {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> Camera {
        Camera::new(&CameraConfig {
            cinematic: false,
            ..CameraConfig::default()
        })
    }

    #[test]
    fn at_rest_stays_put() {
        let mut cam = manual();
        cam.jump_to(3.0, -2.0, 1.2);
        for _ in 0..100 {
            cam.update(12.0);
            assert_eq!(cam.current(), CameraPose::new(3.0, -2.0, 1.2));
        }
    }

    #[test]
    fn pan_eases_without_overshoot() {
        let mut cam = manual();
        cam.pan_to(10.0, 0.0, 2.0);
        let mut last = cam.current().x;
        for _ in 0..200 {
            cam.update(12.0);
            let x = cam.current().x;
            assert!(x > last && x <= 10.0);
            last = x;
        }
        // One step covers 5% of the distance
        let mut cam = manual();
        cam.pan_to(10.0, 0.0, 1.0);
        cam.update(12.0);
        assert!((cam.current().x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn jump_snaps_immediately() {
        let mut cam = manual();
        cam.jump_to(-4.0, 2.0, 0.8);
        assert_eq!(cam.current(), cam.target());
    }

    #[test]
    fn cinematic_bands() {
        assert_eq!(cinematic_target(6.0), CameraPose::new(0.0, 0.0, 1.0));
        assert_eq!(cinematic_target(12.0), CameraPose::new(0.0, 0.0, 1.1));
        assert_eq!(cinematic_target(18.0), CameraPose::new(10.0, -5.0, 1.1));
        assert_eq!(cinematic_target(15.0), CameraPose::new(0.0, 0.0, 1.0));
        let night = cinematic_target(23.0);
        assert!((night.x - (11.5f32).sin() * 10.0).abs() < 1e-5);
    }

    #[test]
    fn cinematic_overrides_manual_target() {
        let mut cam = Camera::new(&CameraConfig::default());
        cam.pan_to(50.0, 50.0, 3.0);
        cam.update(12.0);
        assert_eq!(cam.target(), CameraPose::new(0.0, 0.0, 1.1));
        cam.set_cinematic(false);
        cam.pan_to(50.0, 50.0, 3.0);
        cam.update(12.0);
        assert_eq!(cam.target(), CameraPose::new(50.0, 50.0, 3.0));
    }
}
