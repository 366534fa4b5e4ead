//! Logical frame clock for headless runs
//!
//! Every frame advances the site by a fixed `dt`. Nothing reads the wall
//! clock, so the same scenario always produces the same frames.

use anyhow::{bail, Result};

use crate::app::{AgencyApp, SETTLE_FRAME_LIMIT};
use crate::config::SiteConfig;

/// Viewport and frame pacing for a headless run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessRunConfig {
    /// Viewport width applied before the first step
    pub width: u32,
    /// Viewport height applied before the first step
    pub height: u32,
    /// Logical milliseconds per frame
    pub tick_ms: u64,
    /// Frames a `settle` step may spend before it fails
    pub settle_frame_limit: u32,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            tick_ms: 16,
            settle_frame_limit: SETTLE_FRAME_LIMIT,
        }
    }
}

impl HeadlessRunConfig {
    /// Defaults with the viewport taken from site configuration
    pub fn for_site(config: &SiteConfig) -> Self {
        Self {
            width: config.viewport.width,
            height: config.viewport.height,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("headless viewport must be non-zero, got {}x{}", self.width, self.height);
        }
        if self.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }
        Ok(())
    }
}

/// Drives `AgencyApp::tick` and counts the frames and logical time spent
#[derive(Debug)]
pub struct HeadlessRuntime {
    cfg: HeadlessRunConfig,
    frames: u64,
    elapsed_ms: u64,
}

impl HeadlessRuntime {
    /// Validate `cfg` and apply its viewport to `app`
    pub fn start(app: &mut AgencyApp, cfg: HeadlessRunConfig) -> Result<Self> {
        cfg.validate()?;
        let viewport = app.viewport();
        if viewport.width != cfg.width || viewport.height != cfg.height {
            app.resize(cfg.width, cfg.height);
        }
        Ok(Self {
            cfg,
            frames: 0,
            elapsed_ms: 0,
        })
    }

    pub fn config(&self) -> &HeadlessRunConfig {
        &self.cfg
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Logical time run so far
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Advance the site one frame of `dt_ms`. Returns true while anything
    /// is still moving.
    pub fn frame(&mut self, app: &mut AgencyApp, dt_ms: u64) -> bool {
        self.frames = self.frames.saturating_add(1);
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        app.tick(dt_ms as f32)
    }

    /// Run `frames` frames at the configured rate
    pub fn advance_frames(&mut self, app: &mut AgencyApp, frames: u32) {
        for _ in 0..frames {
            self.frame(app, self.cfg.tick_ms);
        }
    }

    /// Run `ms` of logical time in whole frames. The last frame is shortened
    /// so the clock lands exactly on `ms`. Returns the frames run.
    pub fn advance_ms(&mut self, app: &mut AgencyApp, ms: u64) -> u32 {
        let frames = wait_frames(ms, self.cfg.tick_ms);
        let mut remaining = ms;
        for _ in 0..frames {
            let dt = remaining.min(self.cfg.tick_ms);
            remaining -= dt;
            self.frame(app, dt);
        }
        frames
    }

    /// Tick until nothing moves. Returns the frames spent, or `None` when the
    /// site is still animating after `settle_frame_limit` frames.
    pub fn settle(&mut self, app: &mut AgencyApp) -> Option<u32> {
        let tick_ms = self.cfg.tick_ms;
        (1..=self.cfg.settle_frame_limit).find(|_| !self.frame(app, tick_ms))
    }
}

/// Frames needed to cover `wait_ms`, rounding up
pub(crate) fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app() -> AgencyApp {
        AgencyApp::new(SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_wait_frames_rounds_up() {
        assert_eq!(wait_frames(0, 16), 0);
        assert_eq!(wait_frames(16, 16), 1);
        assert_eq!(wait_frames(17, 16), 2);
        assert_eq!(wait_frames(5, 0), 5);
    }

    #[test]
    fn test_start_applies_viewport() {
        let mut app = app();
        let cfg = HeadlessRunConfig {
            width: 375,
            height: 812,
            ..Default::default()
        };
        HeadlessRuntime::start(&mut app, cfg).unwrap();
        assert_eq!(app.viewport().width, 375);
        assert_eq!(app.viewport().height, 812);
    }

    #[test]
    fn test_rejects_degenerate_config() {
        for cfg in [
            HeadlessRunConfig {
                width: 0,
                ..Default::default()
            },
            HeadlessRunConfig {
                tick_ms: 0,
                ..Default::default()
            },
        ] {
            assert!(HeadlessRuntime::start(&mut app(), cfg).is_err());
        }
    }

    #[test]
    fn test_advance_ms_lands_on_exact_time() {
        let mut app = app();
        let mut runtime = HeadlessRuntime::start(&mut app, HeadlessRunConfig::default()).unwrap();
        assert_eq!(runtime.advance_ms(&mut app, 40), 3);
        assert_eq!(runtime.frames(), 3);
        assert_eq!(runtime.elapsed_ms(), 40);

        runtime.advance_frames(&mut app, 2);
        assert_eq!(runtime.frames(), 5);
        assert_eq!(runtime.elapsed_ms(), 72);
    }

    #[test]
    fn test_settle_counts_frames() {
        let mut app = app();
        let mut runtime = HeadlessRuntime::start(&mut app, HeadlessRunConfig::default()).unwrap();
        app.navigate("/portfolio");

        let spent = runtime.settle(&mut app).unwrap();
        assert!(spent > 1);
        assert_eq!(runtime.frames(), u64::from(spent));
        assert!(!app.tick(16.0));
    }
}
