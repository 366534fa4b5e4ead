//! Agency Layout
//!
//! Declarative element trees for headless rendering:
//!
//! - **Elements**: builder functions (`div`, `link`, `form`, ...) describing
//!   a view, generic over the application's message type
//! - **RenderTree**: mounted nodes with event bubbling, link following and
//!   form constraint validation
//! - **Motion**: preset-driven entrance, exit and gesture animations with
//!   stagger orchestration
//! - **Presence**: keyed slots that play exits before removal
//! - **HTML**: serialization with in-flight animation values inlined
//!
//! # Example
//!
//! ```rust
//! use agency_layout::prelude::*;
//!
//! let mut tree: RenderTree<()> = RenderTree::new(Viewport::default());
//! let mut state = RenderState::new();
//! let root = tree.root();
//!
//! let mut pages = Presence::new(root, PresenceMode::Wait);
//! let home = div()
//!     .animate(TransitionPreset::page_transition(300))
//!     .child(heading(1, "Creative Digital Solutions"));
//! pages.present(&mut tree, &mut state, "/", Some(home));
//!
//! while state.tick(16.0) {
//!     pages.update(&mut tree, &mut state);
//! }
//! assert_eq!(tree.headings(root).len(), 1);
//! ```

pub mod element;
pub mod html;
pub mod motion;
pub mod presence;
pub mod render_state;
pub mod tree;

pub use element::{Element, ElementKind, Handler, InputKind, Visibility};
pub use html::{render_html, render_node, snapshot, NodeSnapshot};
pub use motion::{GestureEvent, GestureState, MotionProps};
pub use presence::{Presence, PresenceMode, Presented};
pub use render_state::{MotionState, RenderState};
pub use tree::{Activation, Dispatch, Node, NodeId, RenderTree, Submission, Validity, Viewport};

/// Everything a view module needs
pub mod prelude {
    pub use crate::element::{
        anchor, button, div, form, heading, icon_button, image, input, label, link, main_area,
        nav, paragraph, section, span, submit_button, svg_path, Element, InputKind,
    };
    pub use crate::motion::{GestureEvent, MotionProps};
    pub use crate::presence::{Presence, PresenceMode};
    pub use crate::render_state::RenderState;
    pub use crate::tree::{NodeId, RenderTree, Viewport};
    pub use agency_animation::{Phase, Pose, StaggerConfig, Transition, TransitionPreset};
    pub use agency_core::{event_types, Event, EventData};
}
