//! Host lifecycle notifications
//!
//! Any UI binding layer drives a component through these three calls, which
//! keeps the blink logic independent of a particular component runtime.

/// Blinking and delay before and after a configuration update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigChange {
    pub prev_blinking: bool,
    pub new_blinking: bool,
    pub prev_delay_ms: f32,
    pub new_delay_ms: f32,
}

impl ConfigChange {
    pub fn new(
        prev_blinking: bool,
        new_blinking: bool,
        prev_delay_ms: f32,
        new_delay_ms: f32,
    ) -> Self {
        Self {
            prev_blinking,
            new_blinking,
            prev_delay_ms,
            new_delay_ms,
        }
    }

    pub fn blinking_changed(&self) -> bool {
        self.prev_blinking != self.new_blinking
    }

    pub fn delay_changed(&self) -> bool {
        self.prev_delay_ms != self.new_delay_ms
    }

    /// Whether anything the pulse depends on changed
    pub fn is_empty(&self) -> bool {
        !self.blinking_changed() && !self.delay_changed()
    }
}

/// Mount / update / unmount notifications from the host
pub trait Lifecycle {
    /// The component was attached to the view tree
    fn on_mount(&mut self);

    /// Blinking or delay configuration changed
    fn on_config_changed(&mut self, change: ConfigChange);

    /// The component is about to be discarded
    fn on_unmount(&mut self);
}
