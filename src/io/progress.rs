//! Progress reporting for tile pre-rendering and frame sweeps

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for batch operations
///
/// Shows one bar per running job for small batches and adds an overall
/// batch bar once more jobs than [`MAX_INDIVIDUAL_PROGRESS_BARS`] are queued.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    job_bars: Vec<ProgressBar>,
    job_count: usize,
    completed: usize,
    /// Stores (`label`, `current_step`, `max_step`) for rolling window display
    job_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {prefix}: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            job_bars: Vec::new(),
            job_count: 0,
            completed: 0,
            job_states: Vec::new(),
        }
    }

    /// Create a manager that draws nothing, for quiet runs and tests
    pub fn hidden() -> Self {
        let manager = Self::new();
        manager
            .multi_progress
            .set_draw_target(indicatif::ProgressDrawTarget::hidden());
        manager
    }

    /// Initialize progress bars for `job_count` jobs
    pub fn initialize(&mut self, job_count: usize, label: &str) {
        self.job_count = job_count;

        // Switch to batch mode for large job sets to avoid terminal spam
        if job_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(job_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            batch_bar.set_prefix(label.to_string());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = job_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.job_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure progress for a new job
    pub fn start_job(&mut self, index: usize, label: &str, steps: usize) {
        if index >= self.job_states.len() {
            self.job_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.job_states.get_mut(index) {
            *state = (label.to_string(), 0, steps);
        }
        self.update_bars();
    }

    /// Report the current step of a job
    pub fn update_step(&mut self, index: usize, step: usize) {
        if let Some(state) = self.job_states.get_mut(index) {
            state.1 = step;
        }
        self.update_bars();
    }

    /// Mark a job as completed and update batch progress
    pub fn complete_job(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        self.completed += 1;

        if let Some(state) = self.job_states.get_mut(index) {
            let max_step = state.2;
            state.0 = format!("✓ {}", state.0);
            state.1 = max_step;
        }
        self.update_bars();
    }

    /// Number of jobs completed so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Number of jobs announced in [`ProgressManager::initialize`]
    pub const fn job_count(&self) -> usize {
        self.job_count
    }

    /// Clean up all progress displays
    pub fn finish(&self, message: &'static str) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message(message);
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active jobs
    fn update_bars(&self) {
        let active_jobs: Vec<_> = self
            .job_states
            .iter()
            .filter(|(label, _, _)| !label.is_empty())
            .collect();

        let start_idx = active_jobs
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_jobs = active_jobs.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (label, current, max)) in visible_jobs.iter().enumerate() {
            if let Some(bar) = self.job_bars.get(bar_idx) {
                bar.set_length(*max as u64);
                bar.set_position(*current as u64);
                let max_width = max.to_string().len();
                bar.set_message(format!("{current:>max_width$}/{max}"));
                bar.set_prefix(label.clone());
            }
        }

        for bar_idx in visible_jobs.len()..self.job_bars.len() {
            if let Some(bar) = self.job_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
