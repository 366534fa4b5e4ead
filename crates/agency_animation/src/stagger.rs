//! Stagger configuration for sibling entrances

use serde::{Deserialize, Serialize};

/// Order in which siblings start animating
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerDirection {
    /// First to last
    #[default]
    Forward,
    /// Last to first
    Reverse,
    /// Center outward
    FromCenter,
}

/// Incremental delay applied to siblings by position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaggerConfig {
    /// Delay between consecutive siblings (ms)
    pub delay_ms: u32,
    #[serde(default)]
    pub direction: StaggerDirection,
    /// Cap the effective index so long lists do not wait forever
    #[serde(default)]
    pub limit: Option<usize>,
}

impl StaggerConfig {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Delay for the child at `index` out of `total` siblings
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let position = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => index.abs_diff(total / 2),
        };
        let position = self.limit.map_or(position, |limit| position.min(limit));

        self.delay_ms.saturating_mul(position as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_forward_is_linear_in_position() {
        let config = StaggerConfig::new(100);
        for i in 0..6 {
            assert_eq!(config.delay_for_index(i, 6), 100 * i as u32);
        }
    }

    #[test]
    fn test_stagger_reverse() {
        let config = StaggerConfig::new(50).reverse();
        assert_eq!(config.delay_for_index(0, 5), 200);
        assert_eq!(config.delay_for_index(4, 5), 0);
    }

    #[test]
    fn test_stagger_from_center() {
        let config = StaggerConfig::new(50).from_center();
        let delays: Vec<u32> = (0..5).map(|i| config.delay_for_index(i, 5)).collect();
        assert_eq!(delays, vec![100, 50, 0, 50, 100]);
    }

    #[test]
    fn test_stagger_limit() {
        let config = StaggerConfig::new(50).limit(3);
        assert_eq!(config.delay_for_index(2, 10), 100);
        assert_eq!(config.delay_for_index(9, 10), 150);
    }
}
