//! Progress reporting for collection runs

use colored::Colorize;
use huddle_application::ports::progress::CollectionProgress;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a run with an indicatif bar (or a spinner when
/// the run can only end by time)
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {pos} responses {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(bar) = self.bar.lock()
            && let Some(bar) = bar.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionProgress for ProgressReporter {
    fn on_collection_start(&self, participants: usize, expected: Option<usize>) {
        let bar = match expected {
            Some(total) => {
                let bar = ProgressBar::new(total as u64);
                bar.set_style(Self::bar_style());
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(Self::spinner_style());
                bar
            }
        };
        bar.set_prefix("Collecting");
        bar.set_message(format!("from {} participants", participants));
        bar.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn on_response_accepted(&self, participant: &str, total_accepted: usize) {
        self.with_bar(|bar| {
            bar.set_position(total_accepted as u64);
            bar.set_message(format!("{} {}", "v".green(), participant));
        });
    }

    fn on_response_rejected(&self, participant: &str, _text: &str) {
        self.with_bar(|bar| bar.set_message(format!("{} {}", "x".red(), participant)));
    }

    fn on_participant_complete(&self, participant: &str) {
        self.with_bar(|bar| bar.set_message(format!("{} done", participant.bold())));
    }

    fn on_collection_complete(&self, timed_out: bool, total_accepted: usize) {
        let bar = self.bar.lock().ok().and_then(|mut slot| slot.take());
        if let Some(bar) = bar {
            bar.set_position(total_accepted as u64);
            let message = if timed_out {
                "time limit reached".yellow().to_string()
            } else {
                "complete!".green().to_string()
            };
            bar.finish_with_message(message);
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl CollectionProgress for SimpleProgress {
    fn on_collection_start(&self, participants: usize, expected: Option<usize>) {
        let target = expected
            .map(|n| format!("{} responses", n))
            .unwrap_or_else(|| "responses until the time limit".to_string());
        eprintln!(
            "{} {} ({} participants, {})",
            "->".cyan(),
            "Collecting".bold(),
            participants,
            target
        );
    }

    fn on_response_accepted(&self, participant: &str, total_accepted: usize) {
        eprintln!("  {} {} (#{})", "v".green(), participant, total_accepted);
    }

    fn on_response_rejected(&self, participant: &str, text: &str) {
        eprintln!("  {} {} {:?}", "x".red(), participant, text);
    }

    fn on_participant_complete(&self, participant: &str) {
        eprintln!("  {} {} done", "*".cyan(), participant);
    }

    fn on_collection_complete(&self, timed_out: bool, total_accepted: usize) {
        let how = if timed_out {
            "time limit reached"
        } else {
            "everyone completed"
        };
        eprintln!("{} {} responses, {}", "->".cyan(), total_accepted, how);
    }
}
