//! Cooperative frame loop: one tick per frame interval on the caller's thread.

use crate::constants::DEFAULT_FRAMES_PER_SECOND;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Millisecond timeline plus a way to wait for the next frame.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
    fn wait(&self, duration: Duration);
}

/// Wall clock measured from construction.
pub struct SystemTime {
    origin: instant::Instant,
}

impl Default for SystemTime {
    fn default() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl SystemTime {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeSource for SystemTime {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn wait(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock; `wait` advances it instantly.
#[derive(Default)]
pub struct ManualTime {
    now_ms: Cell<f64>,
}

impl ManualTime {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now_ms.set(ms);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }

    fn wait(&self, duration: Duration) {
        self.advance(duration.as_secs_f64() * 1000.0);
    }
}

#[derive(Debug, Default)]
struct LoopFlags {
    running: AtomicBool,
    stop_requested: AtomicBool,
}

/// Cloneable handle that stops a `FrameLoop`. A stop issued before `run`
/// keeps the next run from drawing any frame. Stopping twice is harmless.
#[derive(Clone, Debug)]
pub struct StopHandle(Arc<LoopFlags>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.stop_requested.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.0.running.load(Ordering::SeqCst)
    }
}

pub struct FrameLoop {
    interval: Duration,
    flags: Arc<LoopFlags>,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMES_PER_SECOND)
    }
}

impl FrameLoop {
    /// `fps` of 0 is treated as 1.
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            flags: Arc::default(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.flags))
    }

    /// Call `frame(now_ms)` once per interval until it returns false or the
    /// stop handle fires. The stop request is checked before every frame and
    /// consumed when the run ends. Returns the number of frames run.
    pub fn run<T, F>(&self, time: &T, mut frame: F) -> u64
    where
        T: TimeSource + ?Sized,
        F: FnMut(f64) -> bool,
    {
        let flags = &self.flags;
        flags.running.store(true, Ordering::SeqCst);
        let mut frames = 0u64;
        while !flags.stop_requested.load(Ordering::SeqCst) {
            frames += 1;
            if !frame(time.now_ms()) {
                break;
            }
            time.wait(self.interval);
        }
        flags.running.store(false, Ordering::SeqCst);
        flags.stop_requested.store(false, Ordering::SeqCst);
        log::debug!("frame loop ended after {frames} frames");
        frames
    }
}
