//! Damped spring physics
//!
//! Springs are integrated with RK4 on a fixed sub-step so settling behaves the
//! same at 30, 60 or 120 fps.

use serde::{Deserialize, Serialize};

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Soft, slow settle used for ambient transitions
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Quick response with little overshoot
    pub const fn snappy() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    pub const fn stiff() -> Self {
        Self::new(600.0, 40.0, 1.0)
    }

    pub const fn wobbly() -> Self {
        Self::new(180.0, 8.0, 1.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::gentle()
    }
}

const SUBSTEP_SECS: f32 = 1.0 / 240.0;
const REST_DELTA: f32 = 0.001;
const REST_VELOCITY: f32 = 0.001;

/// A spring moving a scalar toward a target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to the target and stop
    pub fn snap(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_VELOCITY
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass.max(f32::EPSILON)
    }

    fn rk4(&mut self, dt: f32) {
        let (x, v) = (self.value, self.velocity);

        let a1 = self.acceleration(x, v);
        let (x2, v2) = (x + v * dt * 0.5, v + a1 * dt * 0.5);
        let a2 = self.acceleration(x2, v2);
        let (x3, v3) = (x + v2 * dt * 0.5, v + a2 * dt * 0.5);
        let a3 = self.acceleration(x3, v3);
        let (x4, v4) = (x + v3 * dt, v + a3 * dt);
        let a4 = self.acceleration(x4, v4);

        self.value = x + dt / 6.0 * (v + 2.0 * v2 + 2.0 * v3 + v4);
        self.velocity = v + dt / 6.0 * (a1 + 2.0 * a2 + 2.0 * a3 + a4);
    }

    /// Advance by `dt` seconds. Snaps to the target once at rest.
    pub fn step(&mut self, dt: f32) {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 && !self.is_settled() {
            let h = remaining.min(SUBSTEP_SECS);
            self.rk4(h);
            remaining -= h;
        }
        if self.is_settled() {
            self.snap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_at_target() {
        for config in [
            SpringConfig::gentle(),
            SpringConfig::snappy(),
            SpringConfig::stiff(),
        ] {
            let mut spring = Spring::new(config, 0.0);
            spring.set_target(100.0);
            for _ in 0..240 {
                spring.step(1.0 / 60.0);
            }
            assert!(spring.is_settled(), "{config:?} did not settle");
            assert_eq!(spring.value(), 100.0);
        }
    }

    #[test]
    fn wobbly_overshoots() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(1.0);
        let mut peak = 0.0_f32;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn at_rest_spring_is_settled() {
        let spring = Spring::new(SpringConfig::default(), 3.0);
        assert!(spring.is_settled());
    }
}
