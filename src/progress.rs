//! Terminal progress bar driven by scan events.

use std::io::{Stderr, Write, stderr};
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Print, Stylize};
use crossterm::terminal::{Clear, ClearType};

use dirscribe_scan::{LogObserver, ScanObserver, ScanWarning};

const BAR_WIDTH: usize = 30;
const REDRAW_INTERVAL: Duration = Duration::from_millis(50);

/// Observer that draws a single-line progress bar on stderr.
///
/// Warnings are still logged; the bar is cleared first so log lines are not interleaved
/// with it. A hidden bar only logs.
pub struct ProgressBar {
    label: &'static str,
    unit: &'static str,
    total: u64,
    current: u64,
    started: Instant,
    last_draw: Option<Instant>,
    visible: bool,
    out: Stderr,
    log: LogObserver,
}

impl ProgressBar {
    /// Create a visible bar expecting `total` entries.
    pub fn new(label: &'static str, unit: &'static str, total: u64) -> Self {
        Self {
            label,
            unit,
            total,
            current: 0,
            started: Instant::now(),
            last_draw: None,
            visible: true,
            out: stderr(),
            log: LogObserver,
        }
    }

    /// Create a bar that never draws.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::new("", "", 0)
        }
    }

    /// Draw the final state and move to a fresh line.
    pub fn finish(mut self) {
        if self.visible {
            self.draw();
            let _ = writeln!(self.out);
        }
    }

    fn draw(&mut self) {
        let ratio = if self.total > 0 {
            (self.current as f64 / self.total as f64).min(1.0)
        } else {
            1.0
        };
        let filled = (ratio * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH.saturating_sub(filled))
        );

        let line = format!(
            "{}: {:>3}% |{}| {}/{} {} [{:.1}s]",
            self.label,
            (ratio * 100.0).round() as u64,
            bar.cyan(),
            self.current,
            self.total.max(self.current),
            self.unit,
            self.started.elapsed().as_secs_f64()
        );

        let _ = queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        );
        let _ = self.out.flush();
        self.last_draw = Some(Instant::now());
    }

    fn clear(&mut self) {
        let _ = queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine));
        let _ = self.out.flush();
    }
}

impl ScanObserver for ProgressBar {
    fn entry_visited(&mut self, _path: &Path) {
        self.current += 1;
        if !self.visible {
            return;
        }
        let due = self
            .last_draw
            .is_none_or(|last| last.elapsed() >= REDRAW_INTERVAL);
        if due || self.current == self.total {
            self.draw();
        }
    }

    fn warning(&mut self, warning: &ScanWarning) {
        if self.visible {
            self.clear();
        }
        self.log.warning(warning);
        if self.visible {
            self.draw();
        }
    }
}
