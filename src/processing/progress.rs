//! # Progress Reporting
//!
//! Encode and decode report an integer percentage to a [`ProgressSink`]:
//! one event after every [`PROGRESS_INTERVAL`] pixels, then a single final
//! `100`. Values never decrease within one operation.
//!
//! The codec never decides how progress is shown. Closures, channel senders
//! and [`NoProgress`] all work as sinks.

use std::sync::mpsc;

/// Number of pixels between two periodic progress events.
pub const PROGRESS_INTERVAL: u64 = 500;

/// Receives progress percentages in the order they are emitted.
pub trait ProgressSink {
    fn report(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

impl ProgressSink for mpsc::Sender<u8> {
    fn report(&mut self, percent: u8) {
        // A dropped receiver just means nobody is watching anymore
        let _ = self.send(percent);
    }
}

impl ProgressSink for tokio::sync::mpsc::UnboundedSender<u8> {
    fn report(&mut self, percent: u8) {
        let _ = self.send(percent);
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

/// Applies the "every N units, then 100 once" cadence on top of a sink.
///
/// Work is counted in abstract units: the encoder counts pixels, the
/// decoder counts channels and scales by `units_per_pixel`.
pub(crate) struct ProgressTracker<'a, S: ProgressSink + ?Sized> {
    sink: &'a mut S,
    total_units: u64,
    interval_units: u64,
    done_units: u64,
}

impl<'a, S: ProgressSink + ?Sized> ProgressTracker<'a, S> {
    pub(crate) fn new(sink: &'a mut S, total_pixels: u64, units_per_pixel: u64) -> Self {
        Self {
            sink,
            total_units: total_pixels * units_per_pixel,
            interval_units: PROGRESS_INTERVAL * units_per_pixel,
            done_units: 0,
        }
    }

    /// Record `units` more units of work, emitting if an interval boundary
    /// was reached.
    pub(crate) fn advance(&mut self, units: u64) {
        let before = self.done_units / self.interval_units;
        self.done_units += units;
        if self.done_units / self.interval_units > before {
            let percent = (self.done_units * 100 / self.total_units).min(100) as u8;
            self.sink.report(percent);
        }
    }

    /// Emit the closing 100. Consumes the tracker so it fires exactly once.
    pub(crate) fn finish(self) {
        self.sink.report(100);
    }
}
