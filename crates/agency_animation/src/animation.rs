//! Pose animations
//!
//! A `PoseAnimation` moves an element from one pose to another under a
//! `Transition`. Tweens map elapsed time through an easing curve; springs
//! integrate a 0 → 1 progress value, so spring overshoot carries into the
//! interpolated pose.

use crate::pose::Pose;
use crate::spring::Spring;
use crate::transition::Transition;

/// Playback phase of a pose animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    /// Waiting out the start delay, holding the `from` pose
    Delayed,
    Running,
    Finished,
}

/// An interruptible animation between two poses
#[derive(Clone, Debug)]
pub struct PoseAnimation {
    from: Pose,
    to: Pose,
    transition: Transition,
    /// Time since start, including the delay
    elapsed_ms: f32,
    spring: Option<Spring>,
    current: Pose,
    state: PlayState,
}

impl PoseAnimation {
    pub fn new(from: Pose, to: Pose, transition: Transition) -> Self {
        let spring = match transition {
            Transition::Spring { config, .. } => {
                let mut spring = Spring::new(config, 0.0);
                spring.set_target(1.0);
                Some(spring)
            }
            _ => None,
        };
        let state = if transition.delay_ms() > 0 {
            PlayState::Delayed
        } else {
            PlayState::Running
        };

        Self {
            current: from.clone(),
            from,
            to,
            transition,
            elapsed_ms: 0.0,
            spring,
            state,
        }
    }

    /// An animation that is already at rest on `pose`
    pub fn at_rest(pose: Pose) -> Self {
        let mut animation = Self::new(pose.clone(), pose, Transition::Instant);
        animation.finish();
        animation
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlayState::Finished
    }

    pub fn current(&self) -> &Pose {
        &self.current
    }

    pub fn target(&self) -> &Pose {
        &self.to
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Progress from 0.0 to 1.0 (springs may report values past 1.0 while
    /// overshooting)
    pub fn progress(&self) -> f32 {
        match self.state {
            PlayState::Delayed => 0.0,
            PlayState::Finished => 1.0,
            PlayState::Running => match (&self.transition, &self.spring) {
                (_, Some(spring)) => spring.value(),
                (Transition::Tween { duration_ms, delay_ms, .. }, None) => {
                    let active = self.elapsed_ms - *delay_ms as f32;
                    if *duration_ms == 0 {
                        1.0
                    } else {
                        (active / *duration_ms as f32).clamp(0.0, 1.0)
                    }
                }
                _ => 1.0,
            },
        }
    }

    /// Advance by `dt_ms`. Returns true while still animating.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.state == PlayState::Finished {
            return false;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        let active_ms = self.elapsed_ms - self.transition.delay_ms() as f32;
        if active_ms < 0.0 {
            self.state = PlayState::Delayed;
            return true;
        }
        self.state = PlayState::Running;

        match self.transition {
            Transition::Tween {
                duration_ms,
                easing,
                ..
            } => {
                let t = if duration_ms == 0 {
                    1.0
                } else {
                    (active_ms / duration_ms as f32).min(1.0)
                };
                if t >= 1.0 {
                    self.finish();
                } else {
                    self.current = self.from.lerp(&self.to, easing.apply(t));
                }
            }
            Transition::Spring { .. } => {
                // Only the part of this frame past the delay drives the spring
                let step_ms = dt_ms.min(active_ms);
                let settled = match self.spring.as_mut() {
                    Some(spring) => {
                        spring.step(step_ms / 1000.0);
                        self.current = self.from.lerp(&self.to, spring.value());
                        spring.is_settled()
                    }
                    None => true,
                };
                if settled {
                    self.finish();
                }
            }
            Transition::Instant => self.finish(),
        }

        self.state != PlayState::Finished
    }

    /// Jump to the target pose
    pub fn finish(&mut self) {
        self.current = self.to.clone();
        self.state = PlayState::Finished;
        if let Some(spring) = self.spring.as_mut() {
            spring.snap();
        }
    }

    /// Redirect towards a new pose, starting from wherever the animation
    /// currently is. Latest target wins.
    pub fn retarget(&mut self, to: Pose, transition: Transition) {
        let from = self.current.clone();
        *self = PoseAnimation::new(from, to, transition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::spring::SpringConfig;

    fn fade_in(duration_ms: u32) -> PoseAnimation {
        PoseAnimation::new(
            Pose::opacity(0.0),
            Pose::opacity(1.0),
            Transition::tween(duration_ms).with_easing(Easing::Linear),
        )
    }

    #[test]
    fn test_tween_progresses_and_finishes() {
        let mut anim = fade_in(300);
        assert_eq!(anim.current().resolved_opacity(), 0.0);

        assert!(anim.tick(150.0));
        assert!((anim.current().resolved_opacity() - 0.5).abs() < 1e-4);

        assert!(!anim.tick(150.0));
        assert!(anim.is_finished());
        assert_eq!(anim.current().resolved_opacity(), 1.0);
    }

    #[test]
    fn test_delay_holds_from_pose() {
        let mut anim = PoseAnimation::new(
            Pose::opacity(0.0),
            Pose::opacity(1.0),
            Transition::tween(100).with_delay(200).with_easing(Easing::Linear),
        );
        assert_eq!(anim.state(), PlayState::Delayed);

        anim.tick(150.0);
        assert_eq!(anim.state(), PlayState::Delayed);
        assert_eq!(anim.current().resolved_opacity(), 0.0);

        anim.tick(100.0);
        assert_eq!(anim.state(), PlayState::Running);
        assert!((anim.current().resolved_opacity() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut anim = PoseAnimation::new(
            Pose::scale(0.0),
            Pose::scale(1.0).with_rotate(360.0),
            Transition::spring(SpringConfig::snappy()),
        );

        let mut frames = 0;
        while anim.tick(16.0) {
            frames += 1;
            assert!(frames < 1000, "spring never settled");
        }
        assert_eq!(anim.current().resolved_rotate(), 360.0);
        assert_eq!(anim.current().resolved_scale(), (1.0, 1.0));
    }

    #[test]
    fn test_retarget_starts_from_current_pose() {
        let mut anim = fade_in(200);
        anim.tick(100.0);
        let midway = anim.current().resolved_opacity();

        anim.retarget(Pose::opacity(0.0), Transition::tween(100));
        assert_eq!(anim.current().resolved_opacity(), midway);
        assert_eq!(anim.target(), &Pose::opacity(0.0));

        anim.tick(100.0);
        assert_eq!(anim.current().resolved_opacity(), 0.0);
    }

    #[test]
    fn test_instant_and_at_rest() {
        let mut anim = PoseAnimation::new(Pose::opacity(0.0), Pose::opacity(1.0), Transition::Instant);
        assert!(!anim.tick(0.0));
        assert_eq!(anim.current().resolved_opacity(), 1.0);

        let rest = PoseAnimation::at_rest(Pose::scale(2.0));
        assert!(rest.is_finished());
        assert_eq!(rest.progress(), 1.0);
    }
}
