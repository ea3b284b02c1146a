//! Frame-rate monitor.
//!
//! [`FpsEstimator`] counts frames in fixed-length windows and classifies the
//! rate as slow relative to the best rate seen so far. [`FpsMonitor`] drives
//! an estimator from a [`FrameScheduler`] and publishes each closed window on
//! a reactive [`Atom`] that [`FpsMeter`] renders.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use easel_engine::reactive::Atom;
use easel_engine::time::{CancelToken, FrameControl, FrameHandle, FrameScheduler, FrameTime};
use easel_ui::prelude::*;

use crate::config::FpsConfig;

/// Result of one closed sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpsSample {
    pub fps: u32,
    pub slow: bool,
}

impl FpsSample {
    pub fn label(&self) -> String {
        format!("FPS {}", self.fps)
    }
}

/// Windowed frame-rate estimator with slow/normal hysteresis.
#[derive(Debug, Clone)]
pub struct FpsEstimator {
    window: Duration,
    slow_ratio: f32,
    window_start: Instant,
    frames: u32,
    max_fps: u32,
    slow: bool,
}

impl FpsEstimator {
    pub fn new(config: &FpsConfig, start: Instant) -> Self {
        Self {
            window: config.window,
            slow_ratio: config.slow_ratio,
            window_start: start,
            frames: 0,
            max_fps: 0,
            slow: false,
        }
    }

    /// Counts one frame presented at `now`.
    ///
    /// Returns a sample when this frame closes the window, i.e. when more than
    /// one window length has passed since the window started. The next window
    /// starts at `now`.
    pub fn on_frame(&mut self, now: Instant) -> Option<FpsSample> {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed <= self.window {
            return None;
        }

        // frames * (window / elapsed) * (1000 / window), folded so a zero
        // window stays finite. `elapsed` is strictly positive here.
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let fps = (f64::from(self.frames) * 1000.0 / elapsed_ms).round() as u32;

        self.max_fps = self.max_fps.max(fps);
        let threshold = self.slow_threshold();
        let fps_f = f64::from(fps);

        if !self.slow && fps_f < threshold {
            self.slow = true;
            log::debug!("fps dropped to {fps} (threshold {threshold:.1}, best {})", self.max_fps);
        } else if self.slow && fps_f >= threshold {
            self.slow = false;
            log::debug!("fps recovered to {fps} (threshold {threshold:.1})");
        }

        self.window_start = now;
        self.frames = 0;

        Some(FpsSample { fps, slow: self.slow })
    }

    /// `max_fps * slow_ratio`.
    pub fn slow_threshold(&self) -> f64 {
        f64::from(self.max_fps) * f64::from(self.slow_ratio)
    }

    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    pub fn is_slow(&self) -> bool {
        self.slow
    }

    pub fn frames_in_window(&self) -> u32 {
        self.frames
    }

    pub fn window_start(&self) -> Instant {
        self.window_start
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

/// A running estimator attached to a frame scheduler.
///
/// Dropping the monitor stops it. Once stopped, no queued invocation touches
/// the estimator or the readout.
pub struct FpsMonitor {
    handle: FrameHandle,
    estimator: Rc<RefCell<FpsEstimator>>,
    readout: Atom<Option<FpsSample>>,
}

impl FpsMonitor {
    pub fn start(scheduler: &mut FrameScheduler, config: &FpsConfig) -> Self {
        Self::start_at(scheduler, config, Instant::now())
    }

    /// Starts with the first window opening at `start`.
    pub fn start_at(scheduler: &mut FrameScheduler, config: &FpsConfig, start: Instant) -> Self {
        let estimator = Rc::new(RefCell::new(FpsEstimator::new(config, start)));
        let readout = Atom::new(None);

        let token = CancelToken::new();
        let task = {
            let token = token.clone();
            let estimator = estimator.clone();
            let readout = readout.clone();
            move |time: FrameTime| -> FrameControl {
                if token.is_cancelled() {
                    return FrameControl::Stop;
                }
                let sample = estimator.borrow_mut().on_frame(time.now);
                if let Some(sample) = sample {
                    readout.set(Some(sample));
                }
                FrameControl::Continue
            }
        };
        let handle = scheduler.request_with_token(task, token);
        log::debug!("fps monitor {:?} started, window {:?}", handle.id(), config.window);

        Self { handle, estimator, readout }
    }

    /// Cancels the monitor. Idempotent.
    pub fn stop(&self) {
        if !self.handle.is_cancelled() {
            self.handle.cancel();
            log::debug!("fps monitor {:?} stopped", self.handle.id());
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_cancelled()
    }

    /// Latest sample; `None` until the first window closes.
    pub fn sample(&self) -> Option<FpsSample> {
        self.readout.get()
    }

    /// Shared handle to the published samples.
    pub fn readout(&self) -> Atom<Option<FpsSample>> {
        self.readout.clone()
    }

    pub fn max_fps(&self) -> u32 {
        self.estimator.borrow().max_fps()
    }
}

impl Drop for FpsMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Text widget showing `FPS {n}`, tinted while the rate is slow.
///
/// Renders nothing until the first sample arrives.
pub struct FpsMeter {
    sample: Option<FpsSample>,
    font: FontId,
    size: f32,
    color: Color,
    slow_color: Color,
}

impl FpsMeter {
    pub fn new(sample: Option<FpsSample>, font: FontId, size: f32) -> Self {
        Self {
            sample,
            font,
            size,
            color: Color::from_straight(0.85, 0.85, 0.9, 1.0),
            slow_color: Color::from_straight(1.0, 0.35, 0.3, 1.0),
        }
    }

    pub fn color(mut self, v: Color) -> Self { self.color = v; self }
    pub fn slow_color(mut self, v: Color) -> Self { self.slow_color = v; self }
}

impl Widget for FpsMeter {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx<'_>) -> Vec2 {
        match self.sample {
            Some(s) => constraints.constrain(ctx.fonts.measure_text(&s.label(), self.font, self.size, None)),
            None => constraints.constrain(Vec2::zero()),
        }
    }

    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        if let Some(s) = self.sample {
            let color = if s.slow { self.slow_color } else { self.color };
            painter.text(s.label(), self.font, self.size, color, rect.origin, None);
        }
    }
}
