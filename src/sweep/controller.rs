//! Rate sweep controller and its background task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use super::{Resampler, SharedRatio, Sweep};
use crate::{Error, Frame, Streamer};

/// A streamer whose playback rate follows a [`Sweep`] in real time.
///
/// Construction starts a background thread that updates the ratio every
/// `sweep.tick` until `sweep.duration` has elapsed, then exits leaving the
/// ratio at `sweep.end`. [`stop`](RateSweep::stop) cancels the thread and
/// waits for it to exit. Dropping the `RateSweep` cancels it without
/// waiting, since a queue may drop it from inside an audio callback; the
/// thread is woken and exits on its own.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tonequeue::{Format, Shape, Streamer, StreamerExt, Sweep, Tone};
///
/// let tone = Tone::new(Shape::Sine, 440.0, Format::CD, Duration::from_secs(1));
/// let mut swept = tone.rate_sweep(Sweep::linear(1.0, 2.0, Duration::from_secs(1))).unwrap();
///
/// let mut buffer = [[0.0; 2]; 256];
/// let (n, more) = swept.stream(&mut buffer);
/// assert_eq!((n, more), (256, true));
/// ```
pub struct RateSweep<S: Streamer> {
    resampler: Resampler<S>,
    sweep: Sweep,
    task: SweepTask,
}

impl<S: Streamer> RateSweep<S> {
    /// Wraps `source` and starts sweeping.
    pub fn new(source: S, sweep: Sweep) -> Result<Self, Error> {
        sweep.validate()?;
        let ratio = SharedRatio::new(sweep.ratio_at(Duration::ZERO));
        let task = SweepTask::spawn(sweep, ratio.clone())?;
        Ok(Self {
            resampler: Resampler::with_ratio(source, ratio),
            sweep,
            task,
        })
    }

    /// Current resample ratio.
    pub fn ratio(&self) -> f64 {
        self.resampler.ratio()
    }

    /// Sweep parameters.
    pub fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    /// Whether the background task has exited, either because the sweep
    /// completed or because it was stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels the background task and waits for it to exit.
    ///
    /// The ratio keeps its last value. Calling this more than once is a no-op.
    pub fn stop(&mut self) {
        self.task.stop();
    }
}

impl<S: Streamer> Streamer for RateSweep<S> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        self.resampler.stream(buffer)
    }

    fn position(&self) -> usize {
        self.resampler.position()
    }
}

/// Owned handle to the sweep thread.
struct SweepTask {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SweepTask {
    fn spawn(sweep: Sweep, ratio: SharedRatio) -> Result<Self, Error> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("rate-sweep".into())
            .spawn(move || run(sweep, ratio, flag))?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Raises the stop flag and wakes the thread from its tick sleep.
    fn cancel(&mut self) -> Option<JoinHandle<()>> {
        self.stop.store(true, Ordering::Release);
        let handle = self.handle.take()?;
        handle.thread().unpark();
        Some(handle)
    }

    fn stop(&mut self) {
        if let Some(handle) = self.cancel() {
            let _ = handle.join();
        }
    }
}

impl Drop for SweepTask {
    fn drop(&mut self) {
        // Never blocks: dropping the handle detaches the thread
        self.cancel();
    }
}

fn run(sweep: Sweep, ratio: SharedRatio, stop: Arc<AtomicBool>) {
    debug!(
        curve = ?sweep.curve,
        start = sweep.start,
        end = sweep.end,
        duration_ms = sweep.duration.as_millis() as u64,
        "rate sweep started"
    );

    let started = Instant::now();
    loop {
        if stop.load(Ordering::Acquire) {
            debug!(ratio = ratio.load(), "rate sweep cancelled");
            return;
        }

        let elapsed = started.elapsed();
        ratio.store(sweep.ratio_at(elapsed));
        if elapsed >= sweep.duration {
            debug!(ratio = sweep.end, "rate sweep finished");
            return;
        }

        thread::park_timeout(sweep.tick);
    }
}
