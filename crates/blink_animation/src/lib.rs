//! Blink Animation System
//!
//! Timed animations for a single numeric value, driven by a frame scheduler.
//!
//! # Features
//!
//! - **Timing Primitives**: Legs toward a target with duration, delay and easing
//! - **Composition**: Sequences and loops (finite or forever)
//! - **Scheduler**: Steps every registered value per frame, by wall clock or
//!   by an explicit amount for deterministic tests
//! - **AnimatableValue**: Host-agnostic capability trait so controllers can be
//!   driven by any toolkit's animated value

pub mod animation;
pub mod easing;
pub mod scheduler;
pub mod values;

pub use animation::{
    delay, loop_forever, repeat, sequence, timing, Animation, Runner, Step, Timing,
};
pub use easing::Easing;
pub use scheduler::{AnimatedValue, AnimationScheduler, SchedulerHandle, ValueId};
pub use values::{AnimatableValue, Interpolate, Sample, SampledValue};
