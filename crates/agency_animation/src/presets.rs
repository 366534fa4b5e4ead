//! Transition presets
//!
//! A preset is plain data: a map from a lifecycle or gesture phase to the
//! pose an element should take in that phase, with optional timing. Views
//! attach presets to motion elements instead of scripting animations.

use crate::easing::Easing;
use crate::pose::Pose;
use crate::spring::SpringConfig;
use crate::transition::Transition;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Phase an element can be posed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Pose on mount, before the entrance animation
    Initial,
    /// Resting pose after the entrance animation
    Animate,
    /// Pose to reach before removal
    Exit,
    /// Overlay while hovered
    Hover,
    /// Overlay while pressed
    Tap,
}

/// Pose and timing for one phase
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    pub pose: Pose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    /// Delay between direct children that follow this variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger_children_ms: Option<u32>,
}

impl Variant {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            ..Default::default()
        }
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn with_stagger_children(mut self, delay_ms: u32) -> Self {
        self.stagger_children_ms = Some(delay_ms);
        self
    }
}

/// A named, reusable phase → variant mapping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionPreset {
    pub name: String,
    #[serde(default)]
    pub variants: IndexMap<Phase, Variant>,
}

impl TransitionPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: IndexMap::new(),
        }
    }

    pub fn with_variant(mut self, phase: Phase, variant: Variant) -> Self {
        self.variants.insert(phase, variant);
        self
    }

    /// Builder: set the pose of a phase, keeping any timing already there
    pub fn with_pose(mut self, phase: Phase, pose: Pose) -> Self {
        self.variants.entry(phase).or_default().pose = pose;
        self
    }

    /// Builder: set the timing of a phase
    pub fn with_transition(mut self, phase: Phase, transition: Transition) -> Self {
        self.variants.entry(phase).or_default().transition = Some(transition);
        self
    }

    /// Builder: hover overlay pose
    pub fn on_hover(self, pose: Pose) -> Self {
        self.with_pose(Phase::Hover, pose)
    }

    /// Builder: press overlay pose
    pub fn on_tap(self, pose: Pose) -> Self {
        self.with_pose(Phase::Tap, pose)
    }

    pub fn has(&self, phase: Phase) -> bool {
        self.variants.contains_key(&phase)
    }

    pub fn variant(&self, phase: Phase) -> Option<&Variant> {
        self.variants.get(&phase)
    }

    pub fn pose(&self, phase: Phase) -> Option<&Pose> {
        self.variant(phase).map(|v| &v.pose)
    }

    /// Timing for entering `phase`; falls back to the `animate` timing and
    /// then to the default tween
    pub fn transition_for(&self, phase: Phase) -> Transition {
        self.variant(phase)
            .and_then(|v| v.transition)
            .or_else(|| self.variant(Phase::Animate).and_then(|v| v.transition))
            .unwrap_or_default()
    }

    pub fn stagger_children_ms(&self) -> Option<u32> {
        self.variant(Phase::Animate)
            .and_then(|v| v.stagger_children_ms)
    }

    /// Shift every phase's start delay (positional stagger for elements
    /// that are not driven by a parent)
    pub fn delayed_by(mut self, extra_ms: u32) -> Self {
        if extra_ms == 0 {
            return self;
        }
        let base = self.transition_for(Phase::Animate);
        let animate = self.variants.entry(Phase::Animate).or_default();
        animate.transition = Some(base.delayed_by(extra_ms));
        self
    }

    // ========================================================================
    // Page presets
    // ========================================================================

    /// Page enter/exit: rise in from 20 px below, leave 20 px above
    pub fn page_transition(duration_ms: u32) -> Self {
        Self::new("page_transition")
            .with_pose(Phase::Initial, Pose::opacity(0.0).with_y(20.0))
            .with_variant(
                Phase::Animate,
                Variant::new(Pose::opacity(1.0).with_y(0.0))
                    .with_transition(Transition::tween(duration_ms).with_easing(Easing::EaseOut)),
            )
            .with_variant(
                Phase::Exit,
                Variant::new(Pose::opacity(0.0).with_y(-20.0))
                    .with_transition(Transition::tween(duration_ms).with_easing(Easing::EaseIn)),
            )
    }

    /// Container that only orchestrates: children start `stagger_ms` apart
    pub fn stagger_container(stagger_ms: u32) -> Self {
        Self::new("stagger_container").with_variant(
            Phase::Animate,
            Variant::default().with_stagger_children(stagger_ms),
        )
    }

    /// Fade in while rising 20 px
    pub fn fade_in_up() -> Self {
        Self::new("fade_in_up")
            .with_pose(Phase::Initial, Pose::opacity(0.0).with_y(20.0))
            .with_variant(
                Phase::Animate,
                Variant::new(Pose::opacity(1.0).with_y(0.0))
                    .with_transition(Transition::tween(500)),
            )
    }

    /// Fade in while growing from 80 %
    pub fn scale_up() -> Self {
        Self::new("scale_up")
            .with_pose(Phase::Initial, Pose::scale(0.8).with_opacity(0.0))
            .with_variant(
                Phase::Animate,
                Variant::new(Pose::scale(1.0).with_opacity(1.0))
                    .with_transition(Transition::tween(500)),
            )
    }

    // ========================================================================
    // Shell presets
    // ========================================================================

    /// Nav bar dropping in from above the viewport
    pub fn nav_drop() -> Self {
        Self::new("nav_drop")
            .with_pose(Phase::Initial, Pose::translate(0.0, -100.0))
            .with_variant(
                Phase::Animate,
                Variant::new(Pose::translate(0.0, 0.0))
                    .with_transition(Transition::spring(SpringConfig::with_stiffness(100.0))),
            )
    }

    /// Brand mark popping in with a full turn
    pub fn logo_spin() -> Self {
        Self::new("logo_spin")
            .with_pose(Phase::Initial, Pose::scale(0.0))
            .with_variant(
                Phase::Animate,
                Variant::new(Pose::scale(1.0).with_rotate(360.0))
                    .with_transition(Transition::spring(SpringConfig::new(260.0, 20.0, 1.0))),
            )
    }

    /// Dropdown growing from zero height and collapsing on exit
    pub fn menu_expand() -> Self {
        Self::new("menu_expand")
            .with_pose(Phase::Initial, Pose::opacity(0.0).with_height(0.0))
            .with_variant(
                Phase::Animate,
                Variant::new(Pose::opacity(1.0).with_height(1.0))
                    .with_transition(Transition::tween(300)),
            )
            .with_pose(Phase::Exit, Pose::opacity(0.0).with_height(0.0))
    }

    /// Slide in horizontally from `offset_x` (negative = from the left)
    pub fn slide_in_x(offset_x: f32) -> Self {
        Self::new("slide_in_x")
            .with_pose(Phase::Initial, Pose::opacity(0.0).with_x(offset_x))
            .with_pose(Phase::Animate, Pose::opacity(1.0).with_x(0.0))
    }

    /// Dropdown item `index`, sliding in from 20 px to the left
    pub fn slide_from_left(index: usize, stagger_ms: u32) -> Self {
        Self::slide_in_x(-20.0).delayed_by(positional_delay(index, stagger_ms))
    }

    /// Link row item `index`, sliding in from 20 px to the right
    pub fn slide_from_right(index: usize, stagger_ms: u32) -> Self {
        Self::slide_in_x(20.0).delayed_by(positional_delay(index, stagger_ms))
    }

    /// Underline bar that grows from nothing on hover
    pub fn underline_reveal() -> Self {
        Self::new("underline_reveal")
            .with_pose(Phase::Initial, Pose::default().with_scale_x(0.0))
            .with_pose(Phase::Animate, Pose::default().with_scale_x(0.0))
            .with_pose(Phase::Hover, Pose::default().with_scale_x(1.0))
            .with_transition(Phase::Hover, Transition::tween(300))
    }

    /// Hidden overlay revealed while hovered
    pub fn hover_reveal(rise_px: f32, delay_ms: u32) -> Self {
        Self::new("hover_reveal")
            .with_pose(Phase::Initial, Pose::opacity(0.0).with_y(rise_px))
            .with_pose(Phase::Animate, Pose::opacity(0.0).with_y(rise_px))
            .with_pose(Phase::Hover, Pose::opacity(1.0).with_y(0.0))
            .with_transition(Phase::Hover, Transition::tween(300).with_delay(delay_ms))
    }
}

fn positional_delay(index: usize, stagger_ms: u32) -> u32 {
    crate::stagger::StaggerConfig::new(stagger_ms).delay_for_index(index, index + 1)
}
