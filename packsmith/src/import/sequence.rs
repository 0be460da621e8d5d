//! Monitored step sequences.
//!
//! A sequence is a fixed, ordered list of named steps run one after another:
//!
//! ```text
//! NotStarted ──► Running(0) ──► Running(1) ──► … ──► Succeeded
//!                    │              │
//!                    └──────────────┴──────────────► Failed(i)
//! ```
//!
//! A step returning an error halts the sequence at that index. Errors never
//! escape the runner; they are logged and reported as a failed state. The
//! sequence's `after` hook runs exactly once whatever the outcome.

use tracing::{error, info, warn};

use super::error::ImportResult;

/// State of a sequence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    /// The runner has not been started.
    NotStarted,
    /// The step with this index is executing.
    Running(usize),
    /// Every step completed.
    Succeeded,
    /// The step with this index failed; later steps did not run.
    Failed(usize),
}

impl SequenceState {
    /// Check if the state is final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }

    /// Check if the run completed every step.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Action executed by a step.
pub type StepAction<S> = fn(&mut S) -> ImportResult<()>;

/// A named step of a sequence.
pub struct StepDescriptor<S> {
    /// Human-readable name shown while the step runs.
    pub name: &'static str,
    /// The work the step performs.
    pub action: StepAction<S>,
}

impl<S> StepDescriptor<S> {
    /// Pair a display name with an action.
    pub const fn new(name: &'static str, action: StepAction<S>) -> Self {
        Self { name, action }
    }
}

impl<S> Clone for StepDescriptor<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for StepDescriptor<S> {}

impl<S> std::fmt::Debug for StepDescriptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

/// A sequence of steps with lifecycle hooks.
pub trait MonitoredSequence: Sized {
    /// Heading shown above the progress display.
    fn heading(&self) -> &str;

    /// The steps, in execution order.
    fn steps(&self) -> Vec<StepDescriptor<Self>>;

    /// Runs once before the first step.
    fn before(&mut self) {}

    /// Runs exactly once after the last attempted step.
    fn after(&mut self, succeeded: bool);
}

/// Receives progress notifications from a [`SequenceRunner`].
///
/// All methods default to doing nothing.
pub trait SequenceObserver {
    /// The sequence is about to run its first step.
    fn sequence_started(&self, _heading: &str, _step_count: usize) {}

    /// A step is about to run.
    fn step_started(&self, _index: usize, _step_count: usize, _name: &str) {}

    /// A step has finished.
    fn step_finished(&self, _index: usize, _name: &str, _succeeded: bool) {}

    /// The sequence reached a terminal state and its `after` hook has run.
    fn sequence_finished(&self, _state: SequenceState) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SequenceObserver for NoopObserver {}

/// Drives a [`MonitoredSequence`] and tracks its state.
///
/// A runner executes at most one run; once terminal its state never changes.
#[derive(Debug)]
pub struct SequenceRunner {
    state: SequenceState,
}

impl Default for SequenceRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceRunner {
    /// Create a runner in the `NotStarted` state.
    pub fn new() -> Self {
        Self {
            state: SequenceState::NotStarted,
        }
    }

    /// Current state.
    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Run every step of `sequence` in order.
    ///
    /// Returns the terminal state. Calling this again after a run returns the
    /// existing state without touching the sequence.
    pub fn run<S: MonitoredSequence>(
        &mut self,
        sequence: &mut S,
        observer: &dyn SequenceObserver,
    ) -> SequenceState {
        if self.state != SequenceState::NotStarted {
            warn!(state = ?self.state, "Sequence runner already used, not running again");
            return self.state;
        }

        let steps = sequence.steps();
        let step_count = steps.len();

        info!(heading = sequence.heading(), steps = step_count, "Starting sequence");
        observer.sequence_started(sequence.heading(), step_count);
        sequence.before();

        let mut failed_at = None;
        for (index, step) in steps.iter().enumerate() {
            self.state = SequenceState::Running(index);
            observer.step_started(index, step_count, step.name);
            info!(step = index, name = step.name, "Running step");

            match (step.action)(sequence) {
                Ok(()) => observer.step_finished(index, step.name, true),
                Err(e) => {
                    error!(
                        step = index,
                        name = step.name,
                        kind = %e.kind(),
                        error = %e,
                        "Step failed"
                    );
                    observer.step_finished(index, step.name, false);
                    failed_at = Some(index);
                    break;
                }
            }
        }

        self.state = match failed_at {
            Some(index) => SequenceState::Failed(index),
            None => SequenceState::Succeeded,
        };

        sequence.after(self.state.is_success());
        info!(heading = sequence.heading(), state = ?self.state, "Sequence finished");
        observer.sequence_finished(self.state);

        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::error::ImportError;
    use std::cell::RefCell;

    /// Sequence recording which hooks and steps ran.
    struct Recorder {
        fail_at: Option<usize>,
        log: Vec<String>,
    }

    impl Recorder {
        fn new(fail_at: Option<usize>) -> Self {
            Self {
                fail_at,
                log: Vec::new(),
            }
        }

        fn step(&mut self, index: usize) -> ImportResult<()> {
            self.log.push(format!("step{}", index));
            if self.fail_at == Some(index) {
                Err(ImportError::NotListed)
            } else {
                Ok(())
            }
        }
    }

    impl MonitoredSequence for Recorder {
        fn heading(&self) -> &str {
            "Recording"
        }

        fn steps(&self) -> Vec<StepDescriptor<Self>> {
            vec![
                StepDescriptor::new("zero", |s| s.step(0)),
                StepDescriptor::new("one", |s| s.step(1)),
                StepDescriptor::new("two", |s| s.step(2)),
            ]
        }

        fn before(&mut self) {
            self.log.push("before".to_string());
        }

        fn after(&mut self, succeeded: bool) {
            self.log.push(format!("after({})", succeeded));
        }
    }

    #[derive(Default)]
    struct EventLog(RefCell<Vec<String>>);

    impl SequenceObserver for EventLog {
        fn sequence_started(&self, heading: &str, step_count: usize) {
            self.0
                .borrow_mut()
                .push(format!("start {} {}", heading, step_count));
        }

        fn step_started(&self, index: usize, _step_count: usize, name: &str) {
            self.0.borrow_mut().push(format!("begin {} {}", index, name));
        }

        fn step_finished(&self, index: usize, _name: &str, succeeded: bool) {
            self.0
                .borrow_mut()
                .push(format!("end {} {}", index, succeeded));
        }

        fn sequence_finished(&self, state: SequenceState) {
            self.0.borrow_mut().push(format!("finish {:?}", state));
        }
    }

    #[test]
    fn test_all_steps_succeed() {
        let mut sequence = Recorder::new(None);
        let mut runner = SequenceRunner::new();
        assert_eq!(runner.state(), SequenceState::NotStarted);

        let state = runner.run(&mut sequence, &NoopObserver);

        assert_eq!(state, SequenceState::Succeeded);
        assert_eq!(runner.state(), SequenceState::Succeeded);
        assert_eq!(
            sequence.log,
            vec!["before", "step0", "step1", "step2", "after(true)"]
        );
    }

    #[test]
    fn test_failure_halts_and_still_runs_after() {
        for fail_at in 0..3 {
            let mut sequence = Recorder::new(Some(fail_at));
            let state = SequenceRunner::new().run(&mut sequence, &NoopObserver);

            assert_eq!(state, SequenceState::Failed(fail_at));
            assert_eq!(sequence.log.len(), fail_at + 3);
            assert_eq!(sequence.log.last().unwrap(), "after(false)");
            assert_eq!(
                sequence.log.iter().filter(|l| l.starts_with("after")).count(),
                1
            );
        }
    }

    #[test]
    fn test_observer_sees_every_transition() {
        let mut sequence = Recorder::new(Some(1));
        let events = EventLog::default();

        SequenceRunner::new().run(&mut sequence, &events);

        assert_eq!(
            events.0.into_inner(),
            vec![
                "start Recording 3",
                "begin 0 zero",
                "end 0 true",
                "begin 1 one",
                "end 1 false",
                "finish Failed(1)",
            ]
        );
    }

    #[test]
    fn test_terminal_state_is_final() {
        let mut sequence = Recorder::new(Some(0));
        let mut runner = SequenceRunner::new();
        runner.run(&mut sequence, &NoopObserver);

        let mut second = Recorder::new(None);
        let state = runner.run(&mut second, &NoopObserver);

        assert_eq!(state, SequenceState::Failed(0));
        assert!(second.log.is_empty());
    }

    #[test]
    fn test_state_helpers() {
        assert!(SequenceState::Succeeded.is_terminal());
        assert!(SequenceState::Failed(2).is_terminal());
        assert!(!SequenceState::Running(0).is_terminal());
        assert!(!SequenceState::NotStarted.is_success());
    }
}
