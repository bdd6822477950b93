//! Optional progress bars for long-running loops.
//!
//! When disabled, no bar is drawn and every call is a no-op, so callers
//! can keep a single code path. A known total draws a bar; an unknown
//! total draws a spinner with a running count.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressBarIter, ProgressIterator, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos}/{len} {unit} {msg}";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {prefix} {pos} {unit} {msg}";
const SPINNER_TICK: Duration = Duration::from_millis(120);

/// Progress reporting that may be switched off
pub struct ProgressTracker {
    bar: Option<ProgressBar>,
}

impl ProgressTracker {
    /// Create a tracker; `None` for `total` shows a spinner instead of a bar.
    ///
    /// `desc` is shown before the bar and `unit` after the counts.
    #[must_use]
    pub fn new(total: Option<usize>, desc: &str, unit: &str, enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }
        Self {
            bar: Some(styled_bar(total, desc, unit)),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { bar: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.bar.is_some()
    }

    /// Advance by `n` items, optionally replacing the status text
    pub fn update(&self, n: u64, status: Option<&str>) {
        if let Some(bar) = &self.bar {
            if let Some(status) = status {
                bar.set_message(status.to_string());
            }
            bar.inc(n);
        }
    }

    /// Replace the status text shown after the bar
    pub fn set_status(&self, status: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(status.to_string());
        }
    }

    /// Replace the description shown before the bar
    pub fn set_description(&self, desc: &str) {
        if let Some(bar) = &self.bar {
            bar.set_prefix(desc.to_string());
        }
    }

    /// Run `f` with the bar hidden, so output written by `f` is not torn
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match &self.bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    /// Clear the bar; later calls are no-ops
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Wrap an iterator with a progress bar.
///
/// The total comes from the iterator's size hint when it is exact; otherwise
/// a spinner is shown. When disabled the bar is hidden and items pass
/// through unchanged.
pub fn progress_iter<I: Iterator>(
    iter: I,
    desc: &str,
    unit: &str,
    enabled: bool,
) -> ProgressBarIter<I> {
    let bar = if enabled {
        let total = match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(lower),
            _ => None,
        };
        styled_bar(total, desc, unit)
    } else {
        ProgressBar::hidden()
    };
    iter.progress_with(bar)
}

fn styled_bar(total: Option<usize>, desc: &str, unit: &str) -> ProgressBar {
    let (bar, template) = match total {
        Some(total) => (ProgressBar::new(total as u64), BAR_TEMPLATE),
        None => (ProgressBar::new_spinner(), SPINNER_TEMPLATE),
    };

    // Templates are literals; a parse failure only loses styling
    if let Ok(style) = ProgressStyle::default_bar().template(&template.replace("{unit}", unit)) {
        bar.set_style(style.progress_chars("█▓░"));
    }
    if total.is_none() {
        bar.enable_steady_tick(SPINNER_TICK);
    }
    bar.set_prefix(desc.to_string());
    bar
}
