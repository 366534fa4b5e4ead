//! Spring physics
//!
//! Damped harmonic oscillator integrated with RK4. Values are unitless; the
//! pose animation drives a spring from 0.0 to 1.0 and uses the result as
//! interpolation progress, so overshoot shows up as overshoot in the pose.

use serde::{Deserialize, Serialize};

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
}

fn default_mass() -> f32 {
    1.0
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Spring with the given stiffness and the default damping of 10
    pub fn with_stiffness(stiffness: f32) -> Self {
        Self::new(stiffness, 10.0, 1.0)
    }

    /// Fast, critically damped-ish spring
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Quick with a slight bounce
    pub fn snappy() -> Self {
        Self::new(260.0, 20.0, 1.0)
    }

    /// Slow and smooth
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible oscillation
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Damping ratio (1.0 = critical damping)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(100.0, 10.0, 1.0)
    }
}

/// Distance from target below which a spring at rest counts as settled
const REST_DELTA: f32 = 0.001;
/// Speed below which a spring near its target counts as settled
const REST_SPEED: f32 = 0.01;
/// Largest integration step; longer frames are subdivided
const MAX_STEP_SECS: f32 = 1.0 / 240.0;

/// A spring moving a single value towards a target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `value`
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
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

    /// Move the target; the current velocity is kept
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump straight to the target and stop
    pub fn snap(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.target - self.value).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || self.is_settled() {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            self.rk4(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.snap();
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass.max(f32::EPSILON)
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, secs: f32) {
        let frames = (secs * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_spring_at_rest_is_settled() {
        let spring = Spring::new(SpringConfig::default(), 5.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_spring_reaches_target() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(1.0);
        assert!(!spring.is_settled());

        run(&mut spring, 2.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);

        let mut peak: f32 = 0.0;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
        }
        assert!(SpringConfig::default().damping_ratio() < 1.0);
        assert!(peak > 1.0, "expected overshoot, peak was {peak}");
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::snappy(), 0.0);
        spring.set_target(1.0);
        spring.step(0.05);
        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        spring.set_target(0.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_large_step_is_stable() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(1.0);
        spring.step(5.0);
        assert!(spring.value().is_finite());
        assert!(spring.is_settled());
    }
}
