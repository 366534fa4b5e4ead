//! Motion props for animated elements
//!
//! An element with motion props gets a pose animation when it mounts:
//! from its `initial` pose to its `animate` pose. Gesture phases (`hover`,
//! `tap`) overlay the `animate` pose while active, and an `exit` pose lets
//! presence slots delay removal until the element has animated out.
//!
//! Motion elements orchestrate their nearest motion descendants: a parent
//! whose preset carries `stagger_children_ms` (or an explicit
//! [`StaggerConfig`]) starts child `i` that many milliseconds later.

use agency_animation::{Phase, Pose, StaggerConfig, Transition, TransitionPreset};

/// Gesture overlays settle faster than entrances unless a preset says otherwise
const GESTURE_DURATION_MS: u32 = 150;

/// Gesture state of a motion element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

/// Pointer input that drives gesture state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEvent {
    Enter,
    Leave,
    Down,
    Up,
}

/// Animation configuration attached to an element
#[derive(Clone, Debug, PartialEq)]
pub struct MotionProps {
    pub preset: TransitionPreset,
    /// Overrides the preset's `stagger_children_ms`
    pub stagger: Option<StaggerConfig>,
}

impl MotionProps {
    pub fn new(preset: TransitionPreset) -> Self {
        Self {
            preset,
            stagger: None,
        }
    }

    /// Stagger nearest motion descendants with a full config
    pub fn stagger(mut self, config: StaggerConfig) -> Self {
        self.stagger = Some(config);
        self
    }

    /// Builder: hover overlay
    pub fn while_hover(mut self, pose: Pose) -> Self {
        self.preset = self.preset.on_hover(pose);
        self
    }

    /// Builder: press overlay
    pub fn while_tap(mut self, pose: Pose) -> Self {
        self.preset = self.preset.on_tap(pose);
        self
    }

    /// Pose on mount. Without an `initial` phase the element starts at rest.
    pub fn initial_pose(&self) -> Pose {
        self.preset
            .pose(Phase::Initial)
            .cloned()
            .unwrap_or_else(|| self.animate_pose())
    }

    pub fn animate_pose(&self) -> Pose {
        self.preset.pose(Phase::Animate).cloned().unwrap_or_default()
    }

    pub fn exit_pose(&self) -> Option<&Pose> {
        self.preset.pose(Phase::Exit)
    }

    pub fn has_exit(&self) -> bool {
        self.preset.has(Phase::Exit)
    }

    pub fn has_gestures(&self) -> bool {
        self.preset.has(Phase::Hover) || self.preset.has(Phase::Tap)
    }

    pub fn enter_transition(&self) -> Transition {
        self.preset.transition_for(Phase::Animate)
    }

    /// Exit timing; the entrance delay does not carry over
    pub fn exit_transition(&self) -> Transition {
        self.preset.transition_for(Phase::Exit).with_delay(
            self.preset
                .variant(Phase::Exit)
                .and_then(|v| v.transition)
                .map_or(0, |t| t.delay_ms()),
        )
    }

    /// Resting pose for a gesture state
    pub fn gesture_pose(&self, gesture: GestureState) -> Pose {
        let base = self.animate_pose();
        let hover = self.preset.pose(Phase::Hover);
        let tap = self.preset.pose(Phase::Tap);
        match gesture {
            GestureState::Idle => base,
            GestureState::Hovered => hover.map_or(base.clone(), |h| base.merge(h)),
            GestureState::Pressed => {
                let hovered = hover.map_or(base.clone(), |h| base.merge(h));
                tap.map_or(hovered.clone(), |t| hovered.merge(t))
            }
        }
    }

    /// Timing for settling into a gesture state
    pub fn gesture_transition(&self, gesture: GestureState) -> Transition {
        let phase = match gesture {
            GestureState::Idle | GestureState::Hovered => Phase::Hover,
            GestureState::Pressed => Phase::Tap,
        };
        self.preset
            .variant(phase)
            .and_then(|v| v.transition)
            .unwrap_or(Transition::tween(GESTURE_DURATION_MS))
    }

    /// Stagger applied to nearest motion descendants, if any
    pub fn child_stagger(&self) -> Option<StaggerConfig> {
        self.stagger
            .or_else(|| self.preset.stagger_children_ms().map(StaggerConfig::new))
    }
}

impl From<TransitionPreset> for MotionProps {
    fn from(preset: TransitionPreset) -> Self {
        Self::new(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_defaults_to_animate() {
        let props = MotionProps::new(
            TransitionPreset::new("rest").with_pose(Phase::Animate, Pose::scale(1.0)),
        );
        assert_eq!(props.initial_pose(), Pose::scale(1.0));
        assert!(!props.has_exit());
    }

    #[test]
    fn test_gesture_pose_layers_hover_then_tap() {
        let props = MotionProps::new(TransitionPreset::fade_in_up())
            .while_hover(Pose::scale(1.05))
            .while_tap(Pose::scale(0.95));

        assert_eq!(props.gesture_pose(GestureState::Idle), Pose::opacity(1.0).with_y(0.0));
        assert_eq!(
            props.gesture_pose(GestureState::Hovered),
            Pose::opacity(1.0).with_y(0.0).with_scale(1.05)
        );
        assert_eq!(
            props.gesture_pose(GestureState::Pressed).scale,
            Some(0.95)
        );
        assert!(props.has_gestures());
    }

    #[test]
    fn test_exit_transition_drops_entrance_delay() {
        let props = MotionProps::new(TransitionPreset::menu_expand().delayed_by(400));
        assert_eq!(props.enter_transition().delay_ms(), 400);
        assert_eq!(props.exit_transition().delay_ms(), 0);
    }

    #[test]
    fn test_child_stagger_prefers_explicit_config() {
        let props = MotionProps::new(TransitionPreset::stagger_container(100));
        assert_eq!(props.child_stagger(), Some(StaggerConfig::new(100)));

        let reversed = props.stagger(StaggerConfig::new(50).reverse());
        assert_eq!(reversed.child_stagger(), Some(StaggerConfig::new(50).reverse()));

        assert_eq!(MotionProps::new(TransitionPreset::scale_up()).child_stagger(), None);
    }
}
