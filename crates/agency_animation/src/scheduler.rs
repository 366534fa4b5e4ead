//! Animation scheduler
//!
//! Owns every pose animation and advances them from one frame clock.
//! Time only moves when `tick` is called, which keeps headless runs
//! deterministic.

use crate::animation::PoseAnimation;
use crate::pose::Pose;
use crate::transition::Transition;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct AnimationId;
}

/// The animation scheduler that ticks all active animations
#[derive(Default)]
pub struct AnimationScheduler {
    animations: SlotMap<AnimationId, PoseAnimation>,
    elapsed_ms: f64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, animation: PoseAnimation) -> AnimationId {
        self.animations.insert(animation)
    }

    pub fn get(&self, id: AnimationId) -> Option<&PoseAnimation> {
        self.animations.get(id)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut PoseAnimation> {
        self.animations.get_mut(id)
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<PoseAnimation> {
        self.animations.remove(id)
    }

    /// Redirect an animation from its in-flight pose. Returns false when
    /// the id is stale.
    pub fn retarget(&mut self, id: AnimationId, to: Pose, transition: Transition) -> bool {
        match self.animations.get_mut(id) {
            Some(animation) => {
                animation.retarget(to, transition);
                true
            }
            None => {
                tracing::trace!("retarget ignored for stale animation {:?}", id);
                false
            }
        }
    }

    /// Advance every animation by `dt_ms`. Returns true while any
    /// animation is still running.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        self.elapsed_ms += f64::from(dt_ms.max(0.0));

        let mut active = false;
        for (_, animation) in self.animations.iter_mut() {
            active |= animation.tick(dt_ms);
        }
        active
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.animations.iter().any(|(_, a)| !a.is_finished())
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &PoseAnimation)> {
        self.animations.iter()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Total time fed through `tick`
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}
