use std::io::{self, Write};
use std::time::Duration;

/// Receiver for the optional verbose-mode progress stream. Updates are
/// purely observational and never feed back into results.
pub trait ProgressSink {
    /// A new phase with `total` steps is starting.
    fn begin(&mut self, label: &'static str, total: usize);

    /// `done` of `total` steps are complete.
    fn update(&mut self, done: usize, total: usize);

    /// The whole operation finished after `elapsed`.
    fn finish(&mut self, elapsed: Duration);
}

/// Swallows everything; the non-verbose path.
#[derive(Debug, Default)]
pub struct Silent;

impl ProgressSink for Silent {
    fn begin(&mut self, _label: &'static str, _total: usize) {}
    fn update(&mut self, _done: usize, _total: usize) {}
    fn finish(&mut self, _elapsed: Duration) {}
}

/// Writes carriage-return `x/y` lines to stderr, then an elapsed summary.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    label: &'static str,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for ConsoleProgress {
    fn begin(&mut self, label: &'static str, total: usize) {
        self.label = label;
        if total > 0 {
            eprint!(" {label}: 0/{total}\r");
        }
    }

    fn update(&mut self, done: usize, total: usize) {
        eprint!(" {}: {done}/{total}\r", self.label);
        let _ = io::stderr().flush();
    }

    fn finish(&mut self, elapsed: Duration) {
        eprintln!();
        eprintln!(" Done in {elapsed:.2?}");
    }
}
