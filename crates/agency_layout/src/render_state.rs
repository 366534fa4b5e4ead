//! RenderState - animated values kept apart from tree structure
//!
//! | Property | RenderTree | RenderState |
//! |----------|------------|-------------|
//! | Element hierarchy | ✓ | |
//! | Text, links, form values | ✓ | |
//! | Opacity, transform, height | | ✓ (animated) |
//! | Hover / press state | | ✓ (FSM) |
//!
//! Every mounted motion node owns one pose animation in the shared
//! [`AnimationScheduler`]. Entrances, gestures and exits all retarget that
//! same animation, so an interrupted transition always continues from the
//! pose that is currently on screen.

use agency_animation::{AnimationId, AnimationScheduler, PlayState, Pose, PoseAnimation};
use agency_core::StateMachine;
use slotmap::SecondaryMap;

use crate::motion::{GestureEvent, GestureState, MotionProps};
use crate::tree::{NodeId, RenderTree};

/// Lifecycle of a motion node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    /// Holding the initial pose until the start delay passes
    Waiting,
    /// Playing the entrance
    Entering,
    /// At rest on the animate (or gesture) pose
    Visible,
    /// Playing the exit
    Exiting,
    /// Exit finished; the node can be unmounted
    Removed,
}

/// Motion bookkeeping for one node
pub struct ActiveMotion {
    props: MotionProps,
    animation: AnimationId,
    exiting: bool,
    gesture: StateMachine<GestureState, GestureEvent>,
}

impl ActiveMotion {
    pub fn props(&self) -> &MotionProps {
        &self.props
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture.current_state()
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }
}

fn gesture_machine() -> StateMachine<GestureState, GestureEvent> {
    use GestureEvent::*;
    use GestureState::*;

    StateMachine::builder(Idle)
        .on(Idle, Enter, Hovered)
        .on(Idle, Down, Pressed)
        .on(Hovered, Leave, Idle)
        .on(Hovered, Down, Pressed)
        .on(Pressed, Up, Hovered)
        .on(Pressed, Leave, Idle)
        .build()
}

/// Per-node animated state, driven by one frame clock
#[derive(Default)]
pub struct RenderState {
    motions: SecondaryMap<NodeId, ActiveMotion>,
    animations: AnimationScheduler,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.animations
    }

    /// Advance every animation by `dt_ms`. Returns true while any motion is
    /// still playing.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        self.animations.tick(dt_ms)
    }

    pub fn has_active_motions(&self) -> bool {
        self.animations.has_active_animations()
    }

    // =========================================================================
    // Motion lifecycle
    // =========================================================================

    /// Start entrances for `root`'s subtree after a mount.
    ///
    /// Each motion node starts after `offset_ms` plus the stagger slot its
    /// nearest motion ancestor assigns it.
    pub fn start_subtree<M>(&mut self, tree: &RenderTree<M>, root: NodeId, offset_ms: u32) {
        if let Some(props) = tree.get(root).and_then(|n| n.motion()) {
            self.start_enter_motion(root, props.clone(), offset_ms);
        }

        let stagger = tree
            .get(root)
            .and_then(|n| n.motion())
            .and_then(MotionProps::child_stagger);
        let kids = tree.motion_children(root);
        let total = kids.len();
        for (index, child) in kids.into_iter().enumerate() {
            let slot = stagger.map_or(0, |s| s.delay_for_index(index, total));
            self.start_subtree(tree, child, offset_ms.saturating_add(slot));
        }
    }

    /// Start the entrance of a single node
    pub fn start_enter_motion(&mut self, node: NodeId, props: MotionProps, delay_ms: u32) {
        if let Some(old) = self.motions.remove(node) {
            self.animations.remove(old.animation);
        }

        let transition = props.enter_transition().delayed_by(delay_ms);
        let animation = self.animations.start(PoseAnimation::new(
            props.initial_pose(),
            props.animate_pose(),
            transition,
        ));
        tracing::debug!(
            "motion: {:?} enter '{}' delay={}ms",
            node,
            props.preset.name,
            transition.delay_ms()
        );
        self.motions.insert(
            node,
            ActiveMotion {
                props,
                animation,
                exiting: false,
                gesture: gesture_machine(),
            },
        );
    }

    /// Start the exit of `node` from wherever it currently is. Returns true
    /// when an exit animation plays; false when the node has no exit pose
    /// (or no motion) and can be removed right away.
    pub fn start_exit_motion(&mut self, node: NodeId) -> bool {
        let Some(motion) = self.motions.get_mut(node) else {
            return false;
        };
        let Some(exit) = motion.props.exit_pose().cloned() else {
            return false;
        };
        if motion.exiting {
            return true;
        }
        motion.exiting = true;
        let transition = motion.props.exit_transition();
        tracing::debug!("motion: {:?} exit '{}'", node, motion.props.preset.name);
        self.animations.retarget(motion.animation, exit, transition)
    }

    /// Feed a pointer event to every gesture-bearing node in `target`'s
    /// gesture scope (see [`gesture_scope`](Self::gesture_scope))
    pub fn apply_gesture<M>(&mut self, tree: &RenderTree<M>, target: NodeId, event: GestureEvent) {
        for node in self.gesture_scope(tree, target) {
            self.send_gesture(node, event);
        }
    }

    /// Motion nodes affected by a gesture on `target`: the subtree of the
    /// outermost gesture-bearing ancestor-or-self (or, failing that, the
    /// closest interactive one), restricted to nodes with hover or tap poses
    pub fn gesture_scope<M>(&self, tree: &RenderTree<M>, target: NodeId) -> Vec<NodeId> {
        let owner = tree
            .ancestors(target)
            .into_iter()
            .rev()
            .find(|id| {
                tree.get(*id)
                    .is_some_and(|n| n.motion().is_some_and(MotionProps::has_gestures))
            })
            .or_else(|| tree.closest(target, |n| n.kind().is_interactive()));
        let Some(owner) = owner else {
            return Vec::new();
        };
        tree.find_all(owner, |n| n.motion().is_some_and(MotionProps::has_gestures))
    }

    fn send_gesture(&mut self, node: NodeId, event: GestureEvent) {
        let Some(motion) = self.motions.get_mut(node) else {
            return;
        };
        let before = motion.gesture.current_state();
        let after = motion.gesture.send(event);
        if before == after || motion.exiting {
            return;
        }
        let pose = motion.props.gesture_pose(after);
        let transition = motion.props.gesture_transition(after);
        tracing::debug!("motion: {:?} gesture {:?} -> {:?}", node, before, after);
        self.animations.retarget(motion.animation, pose, transition);
    }

    /// Drop motion state for removed nodes
    pub fn forget(&mut self, nodes: &[NodeId]) {
        for node in nodes {
            if let Some(motion) = self.motions.remove(*node) {
                self.animations.remove(motion.animation);
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn motion(&self, node: NodeId) -> Option<&ActiveMotion> {
        self.motions.get(node)
    }

    /// Lifecycle state of a motion node
    pub fn motion_state(&self, node: NodeId) -> Option<MotionState> {
        let motion = self.motions.get(node)?;
        let animation = self.animations.get(motion.animation)?;
        Some(match (motion.exiting, animation.state()) {
            (true, PlayState::Finished) => MotionState::Removed,
            (true, _) => MotionState::Exiting,
            (false, PlayState::Delayed) => MotionState::Waiting,
            (false, PlayState::Running) => MotionState::Entering,
            (false, PlayState::Finished) => MotionState::Visible,
        })
    }

    /// The pose animation driving `node`
    pub fn animation(&self, node: NodeId) -> Option<&PoseAnimation> {
        let motion = self.motions.get(node)?;
        self.animations.get(motion.animation)
    }

    /// Current on-screen pose of a motion node
    pub fn pose(&self, node: NodeId) -> Option<&Pose> {
        let motion = self.motions.get(node)?;
        self.animations.get(motion.animation).map(PoseAnimation::current)
    }

    pub fn gesture(&self, node: NodeId) -> GestureState {
        self.motions
            .get(node)
            .map_or(GestureState::Idle, ActiveMotion::gesture)
    }

    /// True when `node` finished exiting, or never had an exit to play
    pub fn is_motion_removed(&self, node: NodeId) -> bool {
        match self.motions.get(node) {
            Some(motion) if motion.props.has_exit() => {
                self.motion_state(node) == Some(MotionState::Removed)
            }
            _ => true,
        }
    }

    /// True when `node` and every motion node below it finished exiting
    pub fn is_subtree_removed<M>(&self, tree: &RenderTree<M>, node: NodeId) -> bool {
        tree.descendants(node).into_iter().all(|id| {
            self.motions
                .get(id)
                .map_or(true, |m| !m.exiting || self.is_motion_removed(id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::*;
    use crate::tree::Viewport;
    use agency_animation::{Easing, Phase, Transition, TransitionPreset};

    fn linear_fade(duration_ms: u32) -> TransitionPreset {
        TransitionPreset::new("fade")
            .with_pose(Phase::Initial, Pose::opacity(0.0))
            .with_pose(Phase::Animate, Pose::opacity(1.0))
            .with_pose(Phase::Exit, Pose::opacity(0.0))
            .with_transition(
                Phase::Animate,
                Transition::tween(duration_ms).with_easing(Easing::Linear),
            )
    }

    fn tree_with(element: Element<()>) -> (RenderTree<()>, NodeId) {
        let mut tree = RenderTree::new(Viewport::default());
        let root = tree.root();
        let node = tree.mount(root, element).unwrap();
        (tree, node)
    }

    #[test]
    fn test_enter_then_visible() {
        let (tree, node) = tree_with(div().animate(linear_fade(100)));
        let mut state = RenderState::new();
        state.start_subtree(&tree, node, 0);

        assert_eq!(state.motion_state(node), Some(MotionState::Entering));
        assert_eq!(state.pose(node).map(Pose::resolved_opacity), Some(0.0));

        state.tick(50.0);
        assert_eq!(state.pose(node).map(Pose::resolved_opacity), Some(0.5));
        state.tick(50.0);
        assert_eq!(state.motion_state(node), Some(MotionState::Visible));
        assert!(!state.has_active_motions());
    }

    #[test]
    fn test_stagger_assigns_delays_by_position() {
        let (tree, grid) = tree_with(
            div()
                .animate(TransitionPreset::stagger_container(100))
                .children((0..3).map(|_| div().child(div().animate(TransitionPreset::scale_up())))),
        );
        let mut state = RenderState::new();
        state.start_subtree(&tree, grid, 0);

        let tiles = tree.motion_children(grid);
        assert_eq!(tiles.len(), 3);
        for (i, tile) in tiles.iter().enumerate() {
            let delay = state.animation(*tile).map(|a| a.transition().delay_ms());
            assert_eq!(delay, Some(100 * i as u32));
        }
        assert_eq!(state.motion_state(tiles[2]), Some(MotionState::Waiting));
    }

    #[test]
    fn test_exit_interrupts_entrance_from_current_pose() {
        let (tree, node) = tree_with(div().animate(linear_fade(100)));
        let mut state = RenderState::new();
        state.start_subtree(&tree, node, 0);
        state.tick(40.0);

        assert!(state.start_exit_motion(node));
        assert_eq!(state.motion_state(node), Some(MotionState::Exiting));
        let opacity = state.pose(node).map(Pose::resolved_opacity).unwrap_or_default();
        assert!((opacity - 0.4).abs() < 1e-4);

        for _ in 0..30 {
            state.tick(16.0);
        }
        assert!(state.is_motion_removed(node));
        assert!(state.is_subtree_removed(&tree, node));
    }

    #[test]
    fn test_no_exit_pose_means_immediate_removal() {
        let (tree, node) = tree_with(div().animate(TransitionPreset::fade_in_up()));
        let mut state = RenderState::new();
        state.start_subtree(&tree, node, 0);
        assert!(!state.start_exit_motion(node));
        assert!(state.is_motion_removed(node));
    }

    #[test]
    fn test_hover_on_link_reaches_underline() {
        let (tree, link_node) = tree_with(
            link("/contact", "Contact")
                .child(span().class("underline").animate(TransitionPreset::underline_reveal())),
        );
        let underline = tree.motion_children(link_node)[0];
        let mut state = RenderState::new();
        state.start_subtree(&tree, link_node, 0);
        state.tick(1000.0);
        assert_eq!(state.pose(underline).and_then(|p| p.scale_x), Some(0.0));

        state.apply_gesture(&tree, link_node, GestureEvent::Enter);
        assert_eq!(state.gesture(underline), GestureState::Hovered);
        state.tick(1000.0);
        assert_eq!(state.pose(underline).and_then(|p| p.scale_x), Some(1.0));

        state.apply_gesture(&tree, link_node, GestureEvent::Leave);
        state.tick(1000.0);
        assert_eq!(state.pose(underline).and_then(|p| p.scale_x), Some(0.0));
    }

    #[test]
    fn test_press_overlays_tap_pose() {
        let (tree, node) = tree_with(
            button("View Our Work").motion(
                MotionProps::new(TransitionPreset::new("cta"))
                    .while_hover(Pose::scale(1.05))
                    .while_tap(Pose::scale(0.95)),
            ),
        );
        let mut state = RenderState::new();
        state.start_subtree(&tree, node, 0);

        state.apply_gesture(&tree, node, GestureEvent::Enter);
        state.apply_gesture(&tree, node, GestureEvent::Down);
        state.tick(500.0);
        assert_eq!(state.gesture(node), GestureState::Pressed);
        assert_eq!(state.pose(node).and_then(|p| p.scale), Some(0.95));

        state.apply_gesture(&tree, node, GestureEvent::Up);
        state.tick(500.0);
        assert_eq!(state.pose(node).and_then(|p| p.scale), Some(1.05));
    }
}
