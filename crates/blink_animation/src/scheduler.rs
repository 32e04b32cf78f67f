//! Animation scheduler
//!
//! Owns every animated value and steps their runners each frame.
//! Values are registered through [`SchedulerHandle`] (usually implicitly via
//! [`AnimatedValue`]) and each value is driven by at most one runner.
//!
//! The scheduler can be stepped by wall-clock time with [`AnimationScheduler::tick`]
//! or by an explicit amount with [`AnimationScheduler::advance`], which makes
//! it usable as a fake clock in tests.

use crate::animation::{Animation, Runner, Step};
use crate::values::{AnimatableValue, SampledValue};
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

new_key_type! {
    /// Handle to a registered animated value
    pub struct ValueId;
}

/// A registered value and the runner driving it
struct ValueSlot {
    value: f32,
    runner: Option<Runner>,
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    values: SlotMap<ValueId, ValueSlot>,
    last_frame: Instant,
}

impl SchedulerInner {
    fn step(&mut self, dt_ms: f32) -> bool {
        for (id, slot) in self.values.iter_mut() {
            let Some(runner) = slot.runner.as_mut() else {
                continue;
            };
            if let Step::Finished { .. } = runner.advance(&mut slot.value, dt_ms) {
                tracing::trace!(?id, value = slot.value, "animation finished");
                slot.runner = None;
            }
        }
        self.has_active()
    }

    fn has_active(&self) -> bool {
        self.values.iter().any(|(_, slot)| slot.runner.is_some())
    }
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The animation scheduler that steps all active animations
///
/// Held by whoever owns the frame loop. Components get a [`SchedulerHandle`]
/// and never keep the scheduler alive themselves.
///
/// ```ignore
/// let scheduler = AnimationScheduler::new();
/// let mut opacity = AnimatedValue::new(scheduler.handle(), 1.0).unwrap();
/// opacity.start_animation(timing(0.0, 300.0).into());
///
/// // Each frame
/// scheduler.tick();
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                values: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Step all animations by the wall-clock time since the previous frame
    ///
    /// Returns true if any animations are still active (need another tick).
    pub fn tick(&self) -> bool {
        let mut inner = lock(&self.inner);
        let now = Instant::now();
        let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
        inner.last_frame = now;
        inner.step(dt_ms)
    }

    /// Step all animations by exactly `dt_ms` milliseconds
    ///
    /// Returns true if any animations are still active.
    pub fn advance(&self, dt_ms: f32) -> bool {
        let mut inner = lock(&self.inner);
        tracing::trace!(dt_ms, "advancing animations");
        inner.step(dt_ms)
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner).has_active()
    }

    /// Number of registered values
    pub fn value_count(&self) -> usize {
        lock(&self.inner).values.len()
    }

    /// Number of runners currently driving values
    pub fn driver_count(&self) -> usize {
        lock(&self.inner)
            .values
            .iter()
            .filter(|(_, slot)| slot.runner.is_some())
            .count()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// Passed to components that need to register values. Every operation
/// silently no-ops once the scheduler has been dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a value and return its ID
    pub fn register_value(&self, initial: f32) -> Option<ValueId> {
        self.inner.upgrade().map(|inner| {
            lock(&inner).values.insert(ValueSlot {
                value: initial,
                runner: None,
            })
        })
    }

    /// Current value, if registered
    pub fn get_value(&self, id: ValueId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).values.get(id).map(|slot| slot.value))
    }

    /// Jump to `value` without touching the runner
    pub fn set_value(&self, id: ValueId, value: f32) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(slot) = lock(&inner).values.get_mut(id) {
                slot.value = value;
            }
        }
    }

    /// Drive the value with `animation`, halting whatever was running
    ///
    /// Returns false if the value or scheduler no longer exists.
    pub fn start_animation(&self, id: ValueId, animation: Animation) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        let mut guard = lock(&inner);
        let Some(slot) = guard.values.get_mut(id) else {
            return false;
        };
        if slot.runner.is_some() {
            tracing::debug!(?id, "replacing running animation");
        }
        tracing::debug!(
            ?id,
            from = slot.value,
            cycle_ms = ?animation.cycle_duration(),
            "starting animation"
        );
        slot.runner = Some(Runner::new(animation));
        true
    }

    /// Halt the value's runner and return the value it rested at
    pub fn stop_animation(&self, id: ValueId) -> Option<f32> {
        let inner = self.inner.upgrade()?;
        let mut guard = lock(&inner);
        let slot = guard.values.get_mut(id)?;
        if slot.runner.take().is_some() {
            tracing::debug!(?id, value = slot.value, "halted animation");
        }
        Some(slot.value)
    }

    /// Check if a runner is driving the value
    pub fn is_animating(&self, id: ValueId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).values.get(id).map(|s| s.runner.is_some()))
            .unwrap_or(false)
    }

    /// Remove a value and its runner
    pub fn remove_value(&self, id: ValueId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).values.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Value
// ============================================================================

/// A scheduler-backed value implementing [`AnimatableValue`]
///
/// The value is registered on creation and removed when dropped.
///
/// ```ignore
/// let mut progress = AnimatedValue::new(scheduler.handle(), 0.0).unwrap();
/// progress.start_animation(timing(1.0, 500.0).into());
/// let renderer_side = progress.sampler();
/// ```
pub struct AnimatedValue {
    handle: SchedulerHandle,
    id: ValueId,
    /// Last value seen, used once the scheduler is gone
    last: f32,
}

impl AnimatedValue {
    /// Register a new value; `None` if the scheduler has been dropped
    pub fn new(handle: SchedulerHandle, initial: f32) -> Option<Self> {
        let id = handle.register_value(initial)?;
        Some(Self {
            handle,
            id,
            last: initial,
        })
    }

    pub fn id(&self) -> ValueId {
        self.id
    }
}

impl AnimatableValue for AnimatedValue {
    fn value(&self) -> f32 {
        self.handle.get_value(self.id).unwrap_or(self.last)
    }

    fn set_value(&mut self, value: f32) {
        self.last = value;
        self.handle.set_value(self.id, value);
    }

    fn stop_animation(&mut self) -> f32 {
        if let Some(value) = self.handle.stop_animation(self.id) {
            self.last = value;
        }
        self.last
    }

    fn start_animation(&mut self, animation: Animation) {
        if !self.handle.start_animation(self.id, animation) {
            tracing::debug!(id = ?self.id, "scheduler gone, animation not started");
        }
    }

    fn is_animating(&self) -> bool {
        self.handle.is_animating(self.id)
    }

    fn sampler(&self) -> SampledValue {
        let handle = self.handle.clone();
        let id = self.id;
        let fallback = self.last;
        SampledValue::new(move || handle.get_value(id).unwrap_or(fallback))
    }
}

impl Drop for AnimatedValue {
    fn drop(&mut self) {
        self.handle.remove_value(self.id);
    }
}
