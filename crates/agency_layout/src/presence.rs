//! Presence slots
//!
//! A presence slot shows at most one keyed child and lets a removed child
//! play its exit animation before it leaves the tree. In `Wait` mode the
//! next child is held back until every exiting child is gone; a newer
//! child replaces one that is still held back, so rapid changes never
//! mount intermediate children.

use crate::element::Element;
use crate::render_state::RenderState;
use crate::tree::{NodeId, RenderTree};

/// How a slot sequences exits and entrances
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresenceMode {
    /// Mount the new child while the old one exits
    Sync,
    /// Mount the new child only after the old one has exited
    #[default]
    Wait,
}

/// A child currently in the tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presented {
    pub key: String,
    pub node: NodeId,
}

/// An exit-aware slot under a fixed container node
pub struct Presence<M> {
    container: NodeId,
    mode: PresenceMode,
    current: Option<Presented>,
    exiting: Vec<Presented>,
    pending: Option<(String, Element<M>)>,
}

impl<M> Presence<M> {
    pub fn new(container: NodeId, mode: PresenceMode) -> Self {
        Self {
            container,
            mode,
            current: None,
            exiting: Vec::new(),
            pending: None,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn mode(&self) -> PresenceMode {
        self.mode
    }

    pub fn current(&self) -> Option<&Presented> {
        self.current.as_ref()
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current.as_ref().map(|p| p.key.as_str())
    }

    pub fn exiting(&self) -> &[Presented] {
        &self.exiting
    }

    pub fn pending_key(&self) -> Option<&str> {
        self.pending.as_ref().map(|(key, _)| key.as_str())
    }

    /// Keys of every child in the tree, exiting ones first
    pub fn mounted_keys(&self) -> Vec<&str> {
        self.exiting
            .iter()
            .chain(self.current.iter())
            .map(|p| p.key.as_str())
            .collect()
    }

    /// Nothing exiting and nothing held back
    pub fn is_settled(&self) -> bool {
        self.exiting.is_empty() && self.pending.is_none()
    }

    /// Present `child` under `key`, or nothing for `None`.
    ///
    /// Presenting the key that is already current is a no-op. Returns true
    /// when the slot changed.
    pub fn present(
        &mut self,
        tree: &mut RenderTree<M>,
        state: &mut RenderState,
        key: impl Into<String>,
        child: Option<Element<M>>,
    ) -> bool {
        let key = key.into();
        let target = child.map(|el| (key, el));

        match (&self.current, &target) {
            (Some(current), Some((key, _))) if current.key == *key => return false,
            (None, None) if self.pending.is_none() => return false,
            _ => {}
        }

        if let Some(current) = self.current.take() {
            self.begin_exit(tree, state, current);
        }

        match target {
            Some((key, element)) => {
                if self.mode == PresenceMode::Wait && !self.exiting.is_empty() {
                    if let Some((dropped, _)) = self.pending.replace((key.clone(), element)) {
                        tracing::debug!("presence: '{}' replaced pending '{}'", key, dropped);
                    } else {
                        tracing::debug!("presence: '{}' waits for exits", key);
                    }
                } else {
                    self.pending = None;
                    self.mount(tree, state, key, element);
                }
            }
            None => self.pending = None,
        }
        true
    }

    /// Remove the current child (with its exit)
    pub fn clear(&mut self, tree: &mut RenderTree<M>, state: &mut RenderState) -> bool {
        self.present(tree, state, String::new(), None)
    }

    /// Unmount finished exits and mount a held-back child once the slot is
    /// free. Call after every tick. Returns true when the tree changed.
    pub fn update(&mut self, tree: &mut RenderTree<M>, state: &mut RenderState) -> bool {
        let mut changed = false;

        let (done, still): (Vec<_>, Vec<_>) = std::mem::take(&mut self.exiting)
            .into_iter()
            .partition(|p| state.is_subtree_removed(&*tree, p.node));
        self.exiting = still;
        for presented in done {
            tracing::debug!("presence: '{}' exit complete", presented.key);
            let removed = tree.remove(presented.node);
            state.forget(&removed);
            changed = true;
        }

        if self.exiting.is_empty() {
            if let Some((key, element)) = self.pending.take() {
                self.mount(tree, state, key, element);
                changed = true;
            }
        }
        changed
    }

    fn begin_exit(&mut self, tree: &mut RenderTree<M>, state: &mut RenderState, presented: Presented) {
        // Exits run on every motion node of the subtree that declares one
        let mut animating = false;
        for node in tree.descendants(presented.node) {
            animating |= state.start_exit_motion(node);
        }

        if animating {
            tracing::debug!("presence: '{}' exiting", presented.key);
            self.exiting.push(presented);
        } else {
            tracing::debug!("presence: '{}' removed without exit", presented.key);
            let removed = tree.remove(presented.node);
            state.forget(&removed);
        }
    }

    fn mount(
        &mut self,
        tree: &mut RenderTree<M>,
        state: &mut RenderState,
        key: String,
        element: Element<M>,
    ) {
        let Some(node) = tree.mount(self.container, element.key(key.clone())) else {
            tracing::warn!("presence: container {:?} is gone", self.container);
            return;
        };
        state.start_subtree(tree, node, 0);
        tracing::debug!("presence: '{}' mounted", key);
        self.current = Some(Presented { key, node });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::*;
    use crate::tree::Viewport;
    use agency_animation::TransitionPreset;

    fn page(title: &str) -> Element<()> {
        div()
            .animate(TransitionPreset::page_transition(300))
            .child(heading(1, title))
    }

    fn setup(mode: PresenceMode) -> (RenderTree<()>, RenderState, Presence<()>) {
        let mut tree = RenderTree::new(Viewport::default());
        let root = tree.root();
        let container = tree.mount(root, main_area()).unwrap();
        (tree, RenderState::new(), Presence::new(container, mode))
    }

    fn run(tree: &mut RenderTree<()>, state: &mut RenderState, slot: &mut Presence<()>, ms: u32) {
        for _ in 0..(ms / 16 + 1) {
            state.tick(16.0);
            slot.update(tree, state);
        }
    }

    fn headings(tree: &RenderTree<()>) -> Vec<String> {
        tree.headings(tree.root()).into_iter().map(|(_, t)| t).collect()
    }

    #[test]
    fn test_wait_mode_exits_before_enter() {
        let (mut tree, mut state, mut slot) = setup(PresenceMode::Wait);
        slot.present(&mut tree, &mut state, "/", Some(page("Home")));
        run(&mut tree, &mut state, &mut slot, 400);

        slot.present(&mut tree, &mut state, "/contact", Some(page("Contact Us")));
        assert_eq!(slot.mounted_keys(), vec!["/"]);
        assert_eq!(slot.pending_key(), Some("/contact"));

        run(&mut tree, &mut state, &mut slot, 400);
        assert_eq!(slot.mounted_keys(), vec!["/contact"]);
        assert_eq!(headings(&tree), vec!["Contact Us"]);
        assert!(slot.is_settled());
    }

    #[test]
    fn test_latest_pending_wins() {
        let (mut tree, mut state, mut slot) = setup(PresenceMode::Wait);
        slot.present(&mut tree, &mut state, "/", Some(page("Home")));
        state.tick(100.0);

        slot.present(&mut tree, &mut state, "/portfolio", Some(page("Our Work")));
        slot.present(&mut tree, &mut state, "/contact", Some(page("Contact Us")));
        assert_eq!(slot.pending_key(), Some("/contact"));

        let mut seen = Vec::new();
        for _ in 0..60 {
            state.tick(16.0);
            slot.update(&mut tree, &mut state);
            seen.extend(slot.current_key().map(str::to_string));
        }
        assert!(seen.iter().all(|k| k == "/contact"));
        assert_eq!(headings(&tree), vec!["Contact Us"]);
    }

    #[test]
    fn test_same_key_is_noop() {
        let (mut tree, mut state, mut slot) = setup(PresenceMode::Wait);
        slot.present(&mut tree, &mut state, "/", Some(page("Home")));
        let node = slot.current().map(|p| p.node);
        assert!(!slot.present(&mut tree, &mut state, "/", Some(page("Home"))));
        assert_eq!(slot.current().map(|p| p.node), node);
    }

    #[test]
    fn test_returning_to_current_key_drops_pending() {
        let (mut tree, mut state, mut slot) = setup(PresenceMode::Wait);
        slot.present(&mut tree, &mut state, "/", Some(page("Home")));
        run(&mut tree, &mut state, &mut slot, 400);

        slot.present(&mut tree, &mut state, "/portfolio", Some(page("Our Work")));
        slot.present(&mut tree, &mut state, "/", Some(page("Home")));
        assert_eq!(slot.pending_key(), Some("/"));

        run(&mut tree, &mut state, &mut slot, 800);
        assert_eq!(headings(&tree), vec!["Home"]);
    }

    #[test]
    fn test_sync_mode_overlaps() {
        let (mut tree, mut state, mut slot) = setup(PresenceMode::Sync);
        slot.present(&mut tree, &mut state, "a", Some(page("A")));
        slot.present(&mut tree, &mut state, "b", Some(page("B")));
        assert_eq!(slot.mounted_keys(), vec!["a", "b"]);

        run(&mut tree, &mut state, &mut slot, 400);
        assert_eq!(slot.mounted_keys(), vec!["b"]);
    }

    #[test]
    fn test_child_without_exit_is_removed_at_once() {
        let (mut tree, mut state, mut slot) = setup(PresenceMode::Wait);
        slot.present(&mut tree, &mut state, "plain", Some(div().child(heading(2, "Plain"))));
        slot.present(&mut tree, &mut state, "next", Some(div().child(heading(2, "Next"))));
        assert_eq!(slot.mounted_keys(), vec!["next"]);
        assert_eq!(headings(&tree), vec!["Next"]);

        assert!(slot.clear(&mut tree, &mut state));
        assert!(slot.mounted_keys().is_empty());
    }
}
