//! Transition timing

use crate::easing::Easing;
use crate::spring::SpringConfig;
use serde::{Deserialize, Serialize};

/// Default tween length when a variant does not specify one
pub const DEFAULT_DURATION_MS: u32 = 300;

/// How a pose change is timed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    /// Fixed-duration interpolation with easing
    Tween {
        duration_ms: u32,
        #[serde(default)]
        delay_ms: u32,
        #[serde(default)]
        easing: Easing,
    },
    /// Physics driven; duration emerges from the spring parameters
    Spring {
        #[serde(default)]
        config: SpringConfig,
        #[serde(default)]
        delay_ms: u32,
    },
    /// Jump to the target on the next frame
    Instant,
}

impl Transition {
    pub fn tween(duration_ms: u32) -> Self {
        Transition::Tween {
            duration_ms,
            delay_ms: 0,
            easing: Easing::default(),
        }
    }

    pub fn spring(config: SpringConfig) -> Self {
        Transition::Spring {
            config,
            delay_ms: 0,
        }
    }

    /// Builder: replace the start delay
    pub fn with_delay(mut self, delay: u32) -> Self {
        match &mut self {
            Transition::Tween { delay_ms, .. } | Transition::Spring { delay_ms, .. } => {
                *delay_ms = delay
            }
            Transition::Instant => {}
        }
        self
    }

    /// Builder: add to the start delay (stagger offsets stack on top of
    /// an element's own delay)
    pub fn delayed_by(self, extra_ms: u32) -> Self {
        let delay = self.delay_ms().saturating_add(extra_ms);
        self.with_delay(delay)
    }

    /// Builder: replace the easing of a tween (no-op for springs)
    pub fn with_easing(mut self, new_easing: Easing) -> Self {
        if let Transition::Tween { easing, .. } = &mut self {
            *easing = new_easing;
        }
        self
    }

    pub fn delay_ms(&self) -> u32 {
        match self {
            Transition::Tween { delay_ms, .. } | Transition::Spring { delay_ms, .. } => *delay_ms,
            Transition::Instant => 0,
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Transition::tween(DEFAULT_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_builders() {
        let t = Transition::tween(500).with_delay(200);
        assert_eq!(t.delay_ms(), 200);
        assert_eq!(t.delayed_by(100).delay_ms(), 300);
        assert_eq!(Transition::Instant.with_delay(50).delay_ms(), 0);
    }

    #[test]
    fn test_spring_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            transition: Transition,
        }

        let doc: Doc = toml::from_str(
            r#"
            [transition]
            type = "spring"
            delay_ms = 40
            config = { stiffness = 260.0, damping = 20.0 }
            "#,
        )
        .unwrap();

        assert_eq!(
            doc.transition,
            Transition::Spring {
                config: SpringConfig::new(260.0, 20.0, 1.0),
                delay_ms: 40,
            }
        );
    }

    #[test]
    fn test_tween_defaults_from_json() {
        let t: Transition = serde_json::from_str(r#"{"type":"tween","duration_ms":250}"#).unwrap();
        assert_eq!(
            t,
            Transition::Tween {
                duration_ms: 250,
                delay_ms: 0,
                easing: Easing::EaseOut
            }
        );
    }
}
