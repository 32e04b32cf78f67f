//! Recording animatable value for controller tests

use std::sync::{Arc, Mutex};

use blink_animation::{AnimatableValue, Animation, SampledValue};

/// Calls made on a [`RecordingValue`]
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Stopped { was_running: bool, at: f32 },
    Set(f32),
    Started(Animation),
}

/// Fake host value that records every call instead of animating
#[derive(Debug, Default)]
pub struct RecordingValue {
    value: Arc<Mutex<f32>>,
    running: Option<Animation>,
    pub events: Vec<Event>,
    /// Animations started while another one was still running
    pub overlaps: usize,
}

impl RecordingValue {
    pub fn new(initial: f32) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
            ..Default::default()
        }
    }

    pub fn starts(&self) -> Vec<&Animation> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Started(animation) => Some(animation),
                _ => None,
            })
            .collect()
    }

    pub fn running(&self) -> Option<&Animation> {
        self.running.as_ref()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl AnimatableValue for RecordingValue {
    fn value(&self) -> f32 {
        *self.value.lock().unwrap()
    }

    fn set_value(&mut self, value: f32) {
        *self.value.lock().unwrap() = value;
        self.events.push(Event::Set(value));
    }

    fn stop_animation(&mut self) -> f32 {
        let was_running = self.running.take().is_some();
        let at = self.value();
        self.events.push(Event::Stopped { was_running, at });
        at
    }

    fn start_animation(&mut self, animation: Animation) {
        if self.running.is_some() {
            self.overlaps += 1;
        }
        self.events.push(Event::Started(animation.clone()));
        self.running = Some(animation);
    }

    fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    fn sampler(&self) -> SampledValue {
        let value = Arc::clone(&self.value);
        SampledValue::new(move || *value.lock().unwrap())
    }
}
