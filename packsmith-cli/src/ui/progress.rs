//! Progress display for import sequences.
//!
//! The sequence runs on a worker thread and reports through a
//! [`ChannelObserver`]; the main thread drains the channel into an indicatif
//! progress bar with [`ImportProgress::follow`].

use std::sync::mpsc::{Receiver, Sender};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use packsmith::import::{SequenceObserver, SequenceState};

/// Notification sent from the worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEvent {
    Started { heading: String, steps: usize },
    StepStarted { index: usize, name: String },
    StepFinished { index: usize, succeeded: bool },
    Finished(SequenceState),
    /// The completion callback ran. It fires from the `after` hook, so it
    /// arrives before [`SequenceEvent::Finished`].
    Completed,
}

/// Observer forwarding sequence notifications over a channel.
///
/// A disconnected receiver is ignored; the import carries on without display.
pub struct ChannelObserver {
    tx: Sender<SequenceEvent>,
}

impl ChannelObserver {
    pub fn new(tx: Sender<SequenceEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: SequenceEvent) {
        self.tx.send(event).ok();
    }
}

impl SequenceObserver for ChannelObserver {
    fn sequence_started(&self, heading: &str, step_count: usize) {
        self.send(SequenceEvent::Started {
            heading: heading.to_string(),
            steps: step_count,
        });
    }

    fn step_started(&self, index: usize, _step_count: usize, name: &str) {
        self.send(SequenceEvent::StepStarted {
            index,
            name: name.to_string(),
        });
    }

    fn step_finished(&self, index: usize, _name: &str, succeeded: bool) {
        self.send(SequenceEvent::StepFinished { index, succeeded });
    }

    fn sequence_finished(&self, state: SequenceState) {
        self.send(SequenceEvent::Finished(state));
    }
}

/// Step progress bar.
pub struct ImportProgress {
    bar: ProgressBar,
}

impl ImportProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        Self { bar }
    }

    /// Display events until every sender hangs up.
    ///
    /// Returns the final state, if one was reported.
    pub fn follow(&self, rx: Receiver<SequenceEvent>) -> Option<SequenceState> {
        let mut final_state = None;

        for event in rx {
            match event {
                SequenceEvent::Started { heading, steps } => {
                    println!("{}", style(heading).bold());
                    self.bar.set_length(steps as u64);
                    self.bar.set_position(0);
                }
                SequenceEvent::StepStarted { name, .. } => {
                    self.bar.set_message(name);
                }
                SequenceEvent::StepFinished { index, succeeded } => {
                    if succeeded {
                        self.bar.inc(1);
                    } else {
                        self.bar
                            .abandon_with_message(format!("step {} failed", index + 1));
                    }
                }
                SequenceEvent::Finished(state) => {
                    if state.is_success() {
                        self.bar.finish_with_message("done");
                    }
                    final_state = Some(state);
                }
                SequenceEvent::Completed => {}
            }
        }

        if !self.bar.is_finished() {
            self.bar.abandon();
        }
        final_state
    }
}

impl Default for ImportProgress {
    fn default() -> Self {
        Self::new()
    }
}
