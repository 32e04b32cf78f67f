//! Blink View
//!
//! A component that wraps an element and pulses its opacity.
//!
//! - **BlinkController**: the start / stop / restart state machine
//! - **Lifecycle**: mount, config-change and unmount notifications
//! - **BlinkView**: prop handling, render output and fallbacks
//!
//! # Example
//!
//! ```rust
//! use blink_animation::AnimationScheduler;
//! use blink_view::{BlinkProps, BlinkView, ElementRegistry};
//!
//! let scheduler = AnimationScheduler::new();
//! let mut view = BlinkView::new(
//!     BlinkProps::new().delay(300.0).child("Live"),
//!     &scheduler.handle(),
//! );
//! view.mount();
//!
//! // Skip the phase offset and the first fade-out, then half of the fade-in
//! scheduler.advance(100.0 + 300.0 + 150.0);
//!
//! let node = view.render(&ElementRegistry::new());
//! let opacity = node.as_element().unwrap().opacity();
//! assert!((opacity - 0.5).abs() < 1e-3);
//! ```

pub mod config;
pub mod controller;
pub mod element;
pub mod error;
pub mod lifecycle;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::{
    resolve_delay, BlinkConfig, BlinkProps, Style, DEFAULT_BLINKING, DEFAULT_DELAY_MS,
};
pub use controller::{pulse_animation, BlinkController};
pub use element::{ElementKind, ElementRegistry, ElementSpec, Node, PropValue, RenderedElement};
pub use error::{BlinkError, Result};
pub use lifecycle::{ConfigChange, Lifecycle};
pub use view::BlinkView;
