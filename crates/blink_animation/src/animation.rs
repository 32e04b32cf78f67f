//! Declarative timing primitives
//!
//! An [`Animation`] describes how a value moves over time: timed legs toward
//! a target, plain waits, sequences and loops. Nothing runs until the
//! description is handed to a [`Runner`], usually through the scheduler.
//!
//! ```ignore
//! use blink_animation::{loop_forever, sequence, timing};
//!
//! // Fade out and back in, forever
//! let pulse = loop_forever(sequence([
//!     timing(0.0, 400.0).into(),
//!     timing(1.0, 400.0).into(),
//! ]));
//! ```

use crate::easing::Easing;
use crate::values::Interpolate;

/// A timed leg toward a target value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Value at the end of the leg
    pub to: f32,
    /// Duration of the motion in milliseconds
    pub duration_ms: f32,
    /// Wait before motion begins, in milliseconds
    pub delay_ms: f32,
    /// Curve applied to the motion
    pub easing: Easing,
}

impl Timing {
    /// Create a leg toward `to` over `duration_ms`
    pub fn new(to: f32, duration_ms: f32) -> Self {
        Self {
            to,
            duration_ms,
            delay_ms: 0.0,
            easing: Easing::default(),
        }
    }

    /// Wait `delay_ms` before the motion begins
    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Use a specific easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay plus duration
    pub fn total_ms(&self) -> f32 {
        self.delay_ms.max(0.0) + self.duration_ms.max(0.0)
    }
}

/// Description of how a value moves over time
#[derive(Clone, Debug, PartialEq)]
pub enum Animation {
    /// A single timed leg
    Timing(Timing),
    /// Hold the value for the given number of milliseconds
    Delay(f32),
    /// Run each animation after the previous one finishes
    Sequence(Vec<Animation>),
    /// Restart `body` each time it finishes (`None` iterations = forever)
    Loop {
        body: Box<Animation>,
        iterations: Option<u32>,
    },
}

impl Animation {
    /// Duration of one complete pass, or `None` if it never finishes
    pub fn cycle_duration(&self) -> Option<f32> {
        match self {
            Animation::Timing(timing) => Some(timing.total_ms()),
            Animation::Delay(ms) => Some(ms.max(0.0)),
            Animation::Sequence(items) => items
                .iter()
                .try_fold(0.0, |total, item| Some(total + item.cycle_duration()?)),
            Animation::Loop {
                body,
                iterations: Some(count),
            } => body.cycle_duration().map(|d| d * *count as f32),
            Animation::Loop {
                iterations: None, ..
            } => None,
        }
    }

    /// Whether the animation eventually finishes on its own
    pub fn is_finite(&self) -> bool {
        self.cycle_duration().is_some()
    }
}

impl From<Timing> for Animation {
    fn from(timing: Timing) -> Self {
        Animation::Timing(timing)
    }
}

/// Leg toward `to` over `duration_ms` with the default easing
pub fn timing(to: f32, duration_ms: f32) -> Timing {
    Timing::new(to, duration_ms)
}

/// Hold the current value for `ms`
pub fn delay(ms: f32) -> Animation {
    Animation::Delay(ms)
}

/// Run animations one after another
pub fn sequence(items: impl IntoIterator<Item = Animation>) -> Animation {
    Animation::Sequence(items.into_iter().collect())
}

/// Repeat `body` until halted
pub fn loop_forever(body: Animation) -> Animation {
    Animation::Loop {
        body: Box::new(body),
        iterations: None,
    }
}

/// Repeat `body` exactly `iterations` times
pub fn repeat(body: Animation, iterations: u32) -> Animation {
    Animation::Loop {
        body: Box::new(body),
        iterations: Some(iterations),
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Result of advancing a runner
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Still running, all of the time slice was consumed
    Running,
    /// Finished, with the unused part of the time slice
    Finished { leftover_ms: f32 },
}

/// Executes an [`Animation`] against a value
#[derive(Debug)]
pub struct Runner {
    state: RunnerState,
}

#[derive(Debug)]
enum RunnerState {
    Timing {
        spec: Timing,
        from: Option<f32>,
        elapsed: f32,
    },
    Delay {
        ms: f32,
        elapsed: f32,
    },
    Sequence {
        items: Vec<Animation>,
        index: usize,
        current: Option<Box<Runner>>,
    },
    Loop {
        body: Animation,
        iterations: Option<u32>,
        completed: u32,
        current: Box<Runner>,
        /// Length of one body pass, when it is known and positive
        cycle_ms: Option<f32>,
    },
}

impl Runner {
    pub fn new(animation: Animation) -> Self {
        let state = match animation {
            Animation::Timing(spec) => RunnerState::Timing {
                spec,
                from: None,
                elapsed: 0.0,
            },
            Animation::Delay(ms) => RunnerState::Delay { ms, elapsed: 0.0 },
            Animation::Sequence(items) => RunnerState::Sequence {
                items,
                index: 0,
                current: None,
            },
            Animation::Loop { body, iterations } => RunnerState::Loop {
                cycle_ms: body.cycle_duration().filter(|ms| *ms > 0.0),
                current: Box::new(Runner::new((*body).clone())),
                body: *body,
                iterations,
                completed: 0,
            },
        };
        Self { state }
    }

    /// Advance by `dt_ms`, writing the new position into `value`
    ///
    /// Time left over when a leg ends is carried into the next leg, so the
    /// result does not depend on how the time is sliced into frames.
    pub fn advance(&mut self, value: &mut f32, dt_ms: f32) -> Step {
        let dt_ms = dt_ms.max(0.0);
        match &mut self.state {
            RunnerState::Timing {
                spec,
                from,
                elapsed,
            } => {
                let start = *from.get_or_insert(*value);
                *elapsed += dt_ms;

                let active = *elapsed - spec.delay_ms.max(0.0);
                if active < 0.0 {
                    return Step::Running;
                }

                let duration = spec.duration_ms.max(0.0);
                if active >= duration {
                    *value = spec.to;
                    return Step::Finished {
                        leftover_ms: active - duration,
                    };
                }

                *value = start.lerp(&spec.to, spec.easing.apply(active / duration));
                Step::Running
            }
            RunnerState::Delay { ms, elapsed } => {
                *elapsed += dt_ms;
                let wait = ms.max(0.0);
                if *elapsed >= wait {
                    Step::Finished {
                        leftover_ms: *elapsed - wait,
                    }
                } else {
                    Step::Running
                }
            }
            RunnerState::Sequence {
                items,
                index,
                current,
            } => {
                let mut remaining = dt_ms;
                loop {
                    let Some(item) = items.get(*index) else {
                        return Step::Finished {
                            leftover_ms: remaining,
                        };
                    };
                    let runner = current.get_or_insert_with(|| Box::new(Runner::new(item.clone())));
                    match runner.advance(value, remaining) {
                        Step::Running => return Step::Running,
                        Step::Finished { leftover_ms } => {
                            remaining = leftover_ms;
                            *index += 1;
                            *current = None;
                        }
                    }
                }
            }
            RunnerState::Loop {
                body,
                iterations,
                completed,
                current,
                cycle_ms,
            } => {
                let mut remaining = dt_ms;
                loop {
                    if matches!(iterations, Some(limit) if *completed >= *limit) {
                        return Step::Finished {
                            leftover_ms: remaining,
                        };
                    }
                    match current.advance(value, remaining) {
                        Step::Running => return Step::Running,
                        Step::Finished { leftover_ms } => {
                            *completed += 1;
                            *current = Box::new(Runner::new(body.clone()));
                            // A body that takes no time would spin forever
                            if leftover_ms >= remaining && iterations.is_none() {
                                return Step::Running;
                            }
                            remaining = leftover_ms;

                            // Every pass ends in the same place, so whole
                            // passes inside the slice can be skipped
                            if let Some(cycle) = *cycle_ms {
                                let mut passes = (remaining / cycle).floor();
                                if let Some(limit) = *iterations {
                                    passes = passes.min(limit.saturating_sub(*completed) as f32);
                                }
                                if passes >= 1.0 {
                                    *completed = completed.saturating_add(passes as u32);
                                    remaining = (remaining - passes * cycle).max(0.0);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(to: f32, duration_ms: f32) -> Timing {
        timing(to, duration_ms).with_easing(Easing::Linear)
    }

    #[test]
    fn test_timing_moves_from_current_value() {
        let mut value = 0.2;
        let mut runner = Runner::new(linear(1.0, 100.0).into());

        assert_eq!(runner.advance(&mut value, 50.0), Step::Running);
        assert!((value - 0.6).abs() < 1e-5);

        assert_eq!(
            runner.advance(&mut value, 75.0),
            Step::Finished { leftover_ms: 25.0 }
        );
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_timing_holds_during_delay() {
        let mut value = 1.0;
        let mut runner = Runner::new(linear(0.0, 100.0).with_delay(40.0).into());

        assert_eq!(runner.advance(&mut value, 39.0), Step::Running);
        assert_eq!(value, 1.0);

        runner.advance(&mut value, 51.0);
        assert!((value - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_duration_timing_jumps() {
        let mut value = 0.0;
        let mut runner = Runner::new(timing(1.0, 0.0).into());
        assert_eq!(
            runner.advance(&mut value, 10.0),
            Step::Finished { leftover_ms: 10.0 }
        );
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_sequence_carries_leftover_time() {
        let mut value = 0.0;
        let mut runner = Runner::new(sequence([
            linear(1.0, 100.0).into(),
            linear(0.0, 100.0).into(),
        ]));

        // One big slice crosses the boundary between legs
        assert_eq!(runner.advance(&mut value, 150.0), Step::Running);
        assert!((value - 0.5).abs() < 1e-5);

        assert_eq!(
            runner.advance(&mut value, 60.0),
            Step::Finished { leftover_ms: 10.0 }
        );
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_repeat_runs_exact_iterations() {
        let mut value = 0.0;
        let body = sequence([linear(1.0, 10.0).into(), linear(0.0, 10.0).into()]);
        let mut runner = Runner::new(repeat(body, 3));

        assert_eq!(runner.advance(&mut value, 59.0), Step::Running);
        assert_eq!(
            runner.advance(&mut value, 5.0),
            Step::Finished { leftover_ms: 4.0 }
        );
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_loop_forever_never_finishes() {
        let mut value = 0.0;
        let body = sequence([linear(1.0, 10.0).into(), linear(0.0, 10.0).into()]);
        let mut runner = Runner::new(loop_forever(body));

        for _ in 0..1000 {
            assert_eq!(runner.advance(&mut value, 7.0), Step::Running);
        }
        // 7000ms into a 20ms cycle is the start of a cycle
        assert!(value.abs() < 1e-5);
    }

    #[test]
    fn test_empty_loop_body_stalls() {
        let mut value = 0.5;
        let mut runner = Runner::new(loop_forever(sequence([])));
        assert_eq!(runner.advance(&mut value, 16.0), Step::Running);
        assert_eq!(value, 0.5);
    }

    #[test]
    fn test_tiny_cycle_skips_whole_passes() {
        let mut value = 0.0;
        let body = sequence([linear(0.0, 1e-5).into(), linear(1.0, 1e-5).into()]);
        let mut runner = Runner::new(loop_forever(body));

        assert_eq!(runner.advance(&mut value, 16.0), Step::Running);
        assert!((0.0..=1.0).contains(&value));

        let RunnerState::Loop { completed, .. } = &runner.state else {
            panic!("expected a loop runner");
        };
        // Nearly every pass was skipped rather than run one at a time
        assert!(*completed > 100_000);
    }

    #[test]
    fn test_skipped_passes_match_slow_stepping() {
        let body = || sequence([linear(1.0, 10.0).into(), linear(0.0, 10.0).into()]);

        let mut fast = 0.0;
        let mut one_slice = Runner::new(loop_forever(body()));
        one_slice.advance(&mut fast, 1005.0);

        let mut slow = 0.0;
        let mut many_slices = Runner::new(loop_forever(body()));
        for _ in 0..201 {
            many_slices.advance(&mut slow, 5.0);
        }

        assert!((fast - 0.5).abs() < 1e-4);
        assert!((fast - slow).abs() < 1e-4);
    }

    #[test]
    fn test_repeat_skipping_respects_iteration_limit() {
        let mut value = 0.0;
        let body = sequence([linear(1.0, 10.0).into(), linear(0.0, 10.0).into()]);
        let mut runner = Runner::new(repeat(body, 3));

        assert_eq!(
            runner.advance(&mut value, 500.0),
            Step::Finished { leftover_ms: 440.0 }
        );
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_cycle_duration() {
        let leg = timing(0.0, 300.0).with_delay(100.0);
        assert_eq!(Animation::from(leg).cycle_duration(), Some(400.0));

        let pass = sequence([timing(0.0, 300.0).into(), timing(1.0, 300.0).into()]);
        assert_eq!(pass.cycle_duration(), Some(600.0));
        assert_eq!(repeat(pass.clone(), 2).cycle_duration(), Some(1200.0));
        assert!(!loop_forever(pass).is_finite());
    }
}
