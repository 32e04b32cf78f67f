//! Blink controller
//!
//! Owns the `progress` value a renderer samples for opacity and keeps the
//! pulse loop in step with the latest `blinking` / `delay` configuration.
//!
//! Every transition goes through the same discipline: halt whatever loop is
//! in flight, and only once the halt has completed apply the next state.
//! That keeps at most one loop driving `progress` at any time.

use blink_animation::{loop_forever, sequence, timing, AnimatableValue, Animation, SampledValue};

use crate::config::resolve_delay;
use crate::lifecycle::{ConfigChange, Lifecycle};

/// The pulse for a given half-cycle duration
///
/// Fades toward 0 after a one-time phase offset of `delay_ms / 3`, fades
/// back to 1, then repeats both legs without the offset until halted. A
/// full period is `2 * delay_ms`.
pub fn pulse_animation(delay_ms: f32) -> Animation {
    let fade_out = timing(0.0, delay_ms);
    let fade_in = timing(1.0, delay_ms);

    sequence([
        fade_out.with_delay(delay_ms / 3.0).into(),
        fade_in.into(),
        loop_forever(sequence([fade_out.into(), fade_in.into()])),
    ])
}

/// Drives a blink view's `progress` value
pub struct BlinkController<V> {
    progress: V,
    delay_ms: f32,
    blinking: bool,
}

impl<V: AnimatableValue> BlinkController<V> {
    /// Take ownership of `progress` and reset it to 0
    ///
    /// Nothing runs until [`Lifecycle::on_mount`] or [`start`](Self::start).
    pub fn new(mut progress: V, delay_ms: f32, blinking: bool) -> Self {
        progress.set_value(0.0);
        Self {
            progress,
            delay_ms,
            blinking,
        }
    }

    /// Halt any running loop, reset to 0 and start pulsing
    pub fn start(&mut self) {
        let delay_ms = self.delay_ms;
        self.progress.stop_then(|progress, halted_at| {
            tracing::debug!(halted_at, delay_ms, "starting blink loop");
            progress.set_value(0.0);
            progress.start_animation(pulse_animation(delay_ms));
        });
    }

    /// Halt any running loop and rest fully visible
    pub fn stop(&mut self) {
        self.progress.stop_then(|progress, halted_at| {
            tracing::debug!(halted_at, "blink loop stopped");
            progress.set_value(1.0);
        });
    }

    /// Adopt new settings without touching a running loop
    pub(crate) fn reconfigure(&mut self, blinking: bool, delay_ms: f32) {
        self.blinking = blinking;
        self.delay_ms = delay_ms;
    }

    /// Current progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Render-time reader for progress
    pub fn sampler(&self) -> SampledValue {
        self.progress.sampler()
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    /// Whether a loop is currently driving progress
    pub fn is_running(&self) -> bool {
        self.progress.is_animating()
    }

    /// The underlying animatable value
    pub fn animated_value(&self) -> &V {
        &self.progress
    }
}

impl<V: AnimatableValue> Lifecycle for BlinkController<V> {
    fn on_mount(&mut self) {
        if self.blinking {
            self.start();
        }
    }

    fn on_config_changed(&mut self, change: ConfigChange) {
        tracing::trace!(?change, "blink configuration changed");
        self.blinking = change.new_blinking;

        if change.blinking_changed() {
            if change.new_blinking {
                self.start();
            } else {
                self.stop();
            }
        }

        // Runs after, and independently of, the toggle above
        if change.delay_changed() {
            match resolve_delay(Some(change.new_delay_ms)) {
                Ok(delay_ms) => {
                    self.delay_ms = delay_ms;
                    if self.blinking {
                        self.start();
                    } else {
                        self.stop();
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, delay_ms = self.delay_ms, "ignoring delay update");
                }
            }
        }
    }

    fn on_unmount(&mut self) {
        let halted_at = self.progress.stop_animation();
        tracing::trace!(halted_at, "blink controller unmounted");
    }
}
