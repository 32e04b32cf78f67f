//! Animatable value types
//!
//! `AnimatableValue` is the capability a host toolkit provides so that
//! controllers can drive a number without knowing how frames are produced.
//! Renderers read the same number through a `SampledValue`.

use std::fmt;
use std::sync::Arc;

use crate::animation::Animation;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Sampling
// ============================================================================

/// Read-only access to an animated number, resolved at render time
pub trait Sample: Send + Sync {
    fn sample(&self) -> f32;
}

impl<F> Sample for F
where
    F: Fn() -> f32 + Send + Sync,
{
    fn sample(&self) -> f32 {
        self()
    }
}

/// Shared, cloneable sampler handed to renderers
#[derive(Clone)]
pub struct SampledValue(Arc<dyn Sample>);

impl SampledValue {
    pub fn new(sampler: impl Sample + 'static) -> Self {
        Self(Arc::new(sampler))
    }

    /// A sampler that always yields `value`
    pub fn fixed(value: f32) -> Self {
        Self::new(move || value)
    }

    /// Current value
    pub fn get(&self) -> f32 {
        self.0.sample()
    }
}

impl fmt::Debug for SampledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SampledValue").field(&self.get()).finish()
    }
}

// ============================================================================
// Host Capability
// ============================================================================

/// A numeric value a host can animate
///
/// Implementations must guarantee that at most one animation drives the
/// value at a time: `start_animation` replaces whatever was running.
pub trait AnimatableValue {
    /// Current value
    fn value(&self) -> f32;

    /// Jump to `value` without animating
    fn set_value(&mut self, value: f32);

    /// Halt the running animation, if any
    ///
    /// Returns once the halt has completed, with the value the animation
    /// came to rest at.
    fn stop_animation(&mut self) -> f32;

    /// Begin driving the value with `animation`
    fn start_animation(&mut self, animation: Animation);

    /// Whether an animation is currently driving the value
    fn is_animating(&self) -> bool;

    /// A render-time reader for this value
    fn sampler(&self) -> SampledValue;

    /// Halt, then run `then` with the value the animation stopped at
    fn stop_then<F>(&mut self, then: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self, f32),
    {
        let halted_at = self.stop_animation();
        then(self, halted_at);
    }
}
