//! Terminal progress bar

use std::fmt::Write as _;
use std::time::Duration;

use indicatif::{ProgressDrawTarget, ProgressState, ProgressStyle};

pub const DEFAULT_WIDTH: usize = 50;
const LABEL_WIDTH: usize = 30;

/// One bar per batch run. `update` receives the number of files already
/// handled, so the last update before `finish` shows `total - 1`.
#[derive(Debug)]
pub struct ProgressBar {
    bar: indicatif::ProgressBar,
    total: usize,
}

impl ProgressBar {
    pub fn new(total: usize) -> Self {
        Self::with_target(total, DEFAULT_WIDTH, ProgressDrawTarget::stdout())
    }

    pub fn hidden(total: usize) -> Self {
        Self::with_target(total, DEFAULT_WIDTH, ProgressDrawTarget::hidden())
    }

    pub fn with_target(total: usize, width: usize, target: ProgressDrawTarget) -> Self {
        let bar = indicatif::ProgressBar::with_draw_target(Some(total as u64), target);
        bar.set_style(style(width));
        Self { bar, total }
    }

    pub fn update(&self, current: usize, label: &str) {
        self.bar.set_position(current as u64);
        self.bar.set_message(label_text(label));
    }

    pub fn position(&self) -> usize {
        self.bar.position() as usize
    }

    pub fn finish(&self) -> Duration {
        let elapsed = self.bar.elapsed();
        self.bar.abandon();
        println!("\n✓ All {} files processed in {:.1}s", self.total, elapsed.as_secs_f64());
        elapsed
    }
}

fn style(width: usize) -> ProgressStyle {
    let template = format!("[{{bar:{}}}] {{pos}}/{{len}} ({{percent_1}}) {{eta_avg}} | {{msg}}", width);
    ProgressStyle::with_template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("| ")
        .with_key("percent_1", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let total = state.len().unwrap_or(0) as usize;
            let _ = w.write_str(&percent_text(state.pos() as usize, total));
        })
        .with_key("eta_avg", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let total = state.len().unwrap_or(0) as usize;
            let _ = w.write_str(&eta_text(state.elapsed(), state.pos() as usize, total));
        })
}

/// `current / total` as a percentage with one decimal.
pub fn percent_text(current: usize, total: usize) -> String {
    let progress = if total == 0 {
        1.0
    } else {
        current.min(total) as f64 / total as f64
    };
    format!("{:.1}%", progress * 100.0)
}

/// Average time per handled file times the files left; a placeholder before
/// the first file is done.
pub fn eta_text(elapsed: Duration, current: usize, total: usize) -> String {
    if current == 0 {
        return "ETA: --".to_string();
    }
    let remaining = total.saturating_sub(current) as f64;
    format!("ETA: {:.1}s", elapsed.as_secs_f64() / current as f64 * remaining)
}

pub fn label_text(label: &str) -> String {
    let mut out = String::with_capacity(LABEL_WIDTH);
    let _ = write!(out, "{:<width$.width$}", label, width = LABEL_WIDTH);
    out
}
