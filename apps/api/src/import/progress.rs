//! Progress reporting — a monotonic (stage, percent) broadcast for the UI.
//!
//! One reporter per ingestion run. Terminal stages (Success, Failed) end the
//! run; the next upload starts a fresh reporter at Idle, so a failed run
//! never blocks subsequent uploads.

use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Validating,
    Extracting,
    Summarizing,
    CallingAi,
    Parsing,
    Merging,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub stage: Stage,
    pub percent: u8,
}

pub struct ProgressReporter {
    tx: watch::Sender<Progress>,
}

impl ProgressReporter {
    pub fn new() -> (Self, watch::Receiver<Progress>) {
        let (tx, rx) = watch::channel(Progress {
            stage: Stage::Idle,
            percent: 0,
        });
        (Self { tx }, rx)
    }

    /// Advances the broadcast. Percent is clamped to never decrease, so a
    /// late or out-of-order update cannot make the UI's bar jump backwards.
    pub fn update(&self, stage: Stage, percent: u8) {
        let current = self.tx.borrow().percent;
        self.tx.send_replace(Progress {
            stage,
            percent: percent.max(current),
        });
    }

    pub fn finish_success(&self) {
        self.update(Stage::Success, 100);
    }

    /// Failure keeps the last percent: the bar freezes where the run died.
    pub fn finish_failed(&self) {
        let percent = self.tx.borrow().percent;
        self.tx.send_replace(Progress {
            stage: Stage::Failed,
            percent,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_starts_idle() {
        let (_reporter, rx) = ProgressReporter::new();
        assert_eq!(
            *rx.borrow(),
            Progress {
                stage: Stage::Idle,
                percent: 0
            }
        );
    }

    #[test]
    fn test_percent_never_decreases() {
        let (reporter, rx) = ProgressReporter::new();
        reporter.update(Stage::Extracting, 40);
        reporter.update(Stage::Summarizing, 20);
        let progress = *rx.borrow();
        assert_eq!(progress.stage, Stage::Summarizing);
        assert_eq!(progress.percent, 40);
    }

    #[test]
    fn test_success_pins_to_100() {
        let (reporter, rx) = ProgressReporter::new();
        reporter.update(Stage::CallingAi, 55);
        reporter.finish_success();
        assert_eq!(
            *rx.borrow(),
            Progress {
                stage: Stage::Success,
                percent: 100
            }
        );
    }

    #[test]
    fn test_failure_freezes_percent() {
        let (reporter, rx) = ProgressReporter::new();
        reporter.update(Stage::Parsing, 85);
        reporter.finish_failed();
        assert_eq!(
            *rx.borrow(),
            Progress {
                stage: Stage::Failed,
                percent: 85
            }
        );
    }
}
