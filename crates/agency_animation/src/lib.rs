//! Agency Animation System
//!
//! Declarative pose transitions for page and element animations.
//!
//! # Features
//!
//! - **Poses**: partial sets of visual properties (opacity, translation,
//!   scale, rotation, height) that interpolate field by field
//! - **Transitions**: tweens with easing, or RK4-integrated springs
//! - **Presets**: named phase → pose/timing maps (`initial`, `animate`,
//!   `exit`, `hover`, `tap`)
//! - **Stagger**: position-based delays for sibling entrances
//! - **Interruptible**: retargeting starts from the in-flight pose
//! - **Scheduler**: ticks every running animation from one frame clock

pub mod animation;
pub mod easing;
pub mod pose;
pub mod presets;
pub mod scheduler;
pub mod spring;
pub mod stagger;
pub mod transition;

pub use animation::{PlayState, PoseAnimation};
pub use easing::Easing;
pub use pose::Pose;
pub use presets::{Phase, TransitionPreset, Variant};
pub use scheduler::{AnimationId, AnimationScheduler};
pub use spring::{Spring, SpringConfig};
pub use stagger::{StaggerConfig, StaggerDirection};
pub use transition::Transition;
