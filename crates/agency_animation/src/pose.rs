//! Poses
//!
//! A pose is a partial set of animatable visual properties. Unset fields
//! fall back to the element's natural appearance (opacity 1, no transform,
//! full height), which is what a fully "animated in" element looks like.

use serde::{Deserialize, Serialize};

/// Animatable properties. `None` means "leave at the natural value".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    /// Opacity (0.0 to 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Horizontal translation in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Vertical translation in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Uniform scale factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    /// Horizontal-only scale factor (underline reveals)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f32>,
    /// Rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f32>,
    /// Fraction of natural height (0.0 collapsed, 1.0 = `auto`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl Pose {
    /// The natural, fully visible pose with every field set
    pub fn natural() -> Self {
        Self {
            opacity: Some(1.0),
            x: Some(0.0),
            y: Some(0.0),
            scale: Some(1.0),
            scale_x: Some(1.0),
            rotate: Some(0.0),
            height: Some(1.0),
        }
    }

    pub fn opacity(value: f32) -> Self {
        Self::default().with_opacity(value)
    }

    pub fn scale(value: f32) -> Self {
        Self::default().with_scale(value)
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self::default().with_x(x).with_y(y)
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn with_x(mut self, px: f32) -> Self {
        self.x = Some(px);
        self
    }

    pub fn with_y(mut self, px: f32) -> Self {
        self.y = Some(px);
        self
    }

    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn with_scale_x(mut self, value: f32) -> Self {
        self.scale_x = Some(value);
        self
    }

    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn with_height(mut self, fraction: f32) -> Self {
        self.height = Some(fraction);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(&self, other: &Pose) -> Pose {
        Pose {
            opacity: other.opacity.or(self.opacity),
            x: other.x.or(self.x),
            y: other.y.or(self.y),
            scale: other.scale.or(self.scale),
            scale_x: other.scale_x.or(self.scale_x),
            rotate: other.rotate.or(self.rotate),
            height: other.height.or(self.height),
        }
    }

    /// Interpolate towards `other`.
    ///
    /// A field set on only one side is interpolated against its natural
    /// value, so `opacity 0 → {}` fades in rather than holding at 0.
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            opacity: lerp_field(self.opacity, other.opacity, 1.0, t),
            x: lerp_field(self.x, other.x, 0.0, t),
            y: lerp_field(self.y, other.y, 0.0, t),
            scale: lerp_field(self.scale, other.scale, 1.0, t),
            scale_x: lerp_field(self.scale_x, other.scale_x, 1.0, t),
            rotate: lerp_field(self.rotate, other.rotate, 0.0, t),
            height: lerp_field(self.height, other.height, 1.0, t),
        }
    }

    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn resolved_translate(&self) -> (f32, f32) {
        (self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    /// (scale_x, scale_y) including the uniform scale
    pub fn resolved_scale(&self) -> (f32, f32) {
        let uniform = self.scale.unwrap_or(1.0);
        (uniform * self.scale_x.unwrap_or(1.0), uniform)
    }

    pub fn resolved_rotate(&self) -> f32 {
        self.rotate.unwrap_or(0.0)
    }

    pub fn resolved_height(&self) -> f32 {
        self.height.unwrap_or(1.0)
    }

    /// True when the pose renders exactly like the natural pose
    pub fn is_natural(&self) -> bool {
        const EPS: f32 = 1e-4;
        let (tx, ty) = self.resolved_translate();
        let (sx, sy) = self.resolved_scale();
        (self.resolved_opacity() - 1.0).abs() < EPS
            && tx.abs() < EPS
            && ty.abs() < EPS
            && (sx - 1.0).abs() < EPS
            && (sy - 1.0).abs() < EPS
            && self.resolved_rotate().abs() < EPS
            && (self.resolved_height() - 1.0).abs() < EPS
    }
}

fn lerp_field(a: Option<f32>, b: Option<f32>, natural: f32, t: f32) -> Option<f32> {
    match (a, b) {
        (None, None) => None,
        (a, b) => {
            let a = a.unwrap_or(natural);
            let b = b.unwrap_or(natural);
            Some(a + (b - a) * t)
        }
    }
}
