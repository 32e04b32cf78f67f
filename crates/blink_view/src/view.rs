//! Blink view component
//!
//! Wraps an element and binds its opacity to a pulsing value while
//! `blinking` is on. Failures never reach the host: construction and render
//! errors are logged and the view degrades to passing its children through.
//!
//! ```ignore
//! let scheduler = AnimationScheduler::new();
//! let registry = ElementRegistry::new();
//!
//! let mut view = BlinkView::new(
//!     BlinkProps::new().delay(300.0).child("New message"),
//!     &scheduler.handle(),
//! );
//! view.mount();
//!
//! // Each frame
//! scheduler.tick();
//! let node = view.render(&registry);
//! ```

use blink_animation::{AnimatableValue, AnimatedValue, SchedulerHandle};

use crate::config::BlinkProps;
use crate::controller::BlinkController;
use crate::element::{ElementKind, ElementRegistry, Node, PropValue, RenderedElement};
use crate::error::{BlinkError, Result};
use crate::lifecycle::{ConfigChange, Lifecycle};

/// A component that pulses the opacity of its element
pub struct BlinkView<V = AnimatedValue> {
    props: BlinkProps,
    /// `None` when construction failed
    controller: Option<BlinkController<V>>,
    unmounted: bool,
}

impl BlinkView<AnimatedValue> {
    /// Create a view whose progress lives in the given scheduler
    pub fn new(props: BlinkProps, handle: &SchedulerHandle) -> Self {
        let value = AnimatedValue::new(handle.clone(), 0.0).ok_or(BlinkError::SchedulerUnavailable);
        Self::build(props, value)
    }
}

impl<V: AnimatableValue> BlinkView<V> {
    /// Create a view driving a host-provided value
    pub fn with_value(props: BlinkProps, value: V) -> Self {
        Self::build(props, Ok(value))
    }

    fn build(props: BlinkProps, value: Result<V>) -> Self {
        let controller = value.and_then(|value| {
            let delay_ms = props.delay_ms()?;
            Ok(BlinkController::new(value, delay_ms, props.is_blinking()))
        });

        match controller {
            Ok(controller) => Self {
                props,
                controller: Some(controller),
                unmounted: false,
            },
            Err(err) => {
                tracing::warn!(%err, "blink view failed to initialise, animation disabled");
                Self {
                    props,
                    controller: None,
                    unmounted: false,
                }
            }
        }
    }

    pub fn props(&self) -> &BlinkProps {
        &self.props
    }

    pub fn controller(&self) -> Option<&BlinkController<V>> {
        self.controller.as_ref()
    }

    /// Whether construction succeeded
    pub fn is_initialized(&self) -> bool {
        self.controller.is_some()
    }

    /// Attach to the view tree
    pub fn mount(&mut self) {
        self.on_mount();
    }

    /// Replace the props, restarting or halting the pulse as needed
    ///
    /// After `unmount` the props are still stored but the pulse stays halted
    /// until the view is mounted again.
    pub fn update(&mut self, next: BlinkProps) {
        let unmounted = self.unmounted;
        let prev_blinking = self.props.is_blinking();
        let change = self.controller.as_mut().and_then(|controller| {
            let new_delay_ms = next.delay_ms().unwrap_or_else(|err| {
                tracing::warn!(%err, "keeping previous blink delay");
                controller.delay_ms()
            });
            if unmounted {
                controller.reconfigure(next.is_blinking(), new_delay_ms);
                return None;
            }
            Some(ConfigChange::new(
                prev_blinking,
                next.is_blinking(),
                controller.delay_ms(),
                new_delay_ms,
            ))
        });

        self.props = next;
        if let Some(change) = change.filter(|change| !change.is_empty()) {
            self.on_config_changed(change);
        }
    }

    /// Detach from the view tree
    pub fn unmount(&mut self) {
        self.on_unmount();
    }

    /// Render, falling back to the bare children on failure
    pub fn render(&self, registry: &ElementRegistry) -> Node {
        match self.try_render(registry) {
            Ok(node) => node,
            Err(err) => {
                tracing::warn!(
                    %err,
                    element = %self.props.element_kind(),
                    "blink view render failed"
                );
                self.fallback()
            }
        }
    }

    /// Render without the fallback
    ///
    /// While blinking the element is wrapped for animation and its `opacity`
    /// follows progress; otherwise opacity is fixed at 1. All other style
    /// entries and properties are forwarded unchanged.
    pub fn try_render(&self, registry: &ElementRegistry) -> Result<Node> {
        let controller = self.controller.as_ref().ok_or(BlinkError::Uninitialized)?;
        let kind = self.props.element_kind();
        let blinking = self.props.is_blinking();
        registry.resolve(kind, blinking)?;

        let opacity = if blinking {
            PropValue::Animated(controller.sampler())
        } else {
            PropValue::Number(1.0)
        };
        let mut style = self.props.style.clone();
        style.insert("opacity".to_string(), opacity);

        Ok(Node::Element(RenderedElement {
            kind: kind.clone(),
            animated: blinking,
            props: self.props.props.clone(),
            style,
            children: self.props.children.clone(),
        }))
    }

    fn fallback(&self) -> Node {
        if self.props.children.is_empty() {
            Node::Element(RenderedElement::container(ElementKind::View))
        } else {
            Node::Fragment(self.props.children.clone())
        }
    }
}

impl<V: AnimatableValue> Lifecycle for BlinkView<V> {
    fn on_mount(&mut self) {
        self.unmounted = false;
        if let Some(controller) = self.controller.as_mut() {
            controller.on_mount();
        }
    }

    fn on_config_changed(&mut self, change: ConfigChange) {
        if let Some(controller) = self.controller.as_mut() {
            controller.on_config_changed(change);
        }
    }

    fn on_unmount(&mut self) {
        self.unmounted = true;
        if let Some(controller) = self.controller.as_mut() {
            controller.on_unmount();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingValue;
    use blink_animation::AnimationScheduler;

    fn element(node: &Node) -> &RenderedElement {
        node.as_element().expect("expected an element")
    }

    #[test]
    fn test_defaults_blink_on_mount() {
        let scheduler = AnimationScheduler::new();
        let mut view = BlinkView::new(BlinkProps::new().child("hi"), &scheduler.handle());
        assert!(view.is_initialized());

        view.mount();
        let controller = view.controller().unwrap();
        assert!(controller.is_running());
        assert_eq!(controller.delay_ms(), 1500.0);
    }

    #[test]
    fn test_blinking_render_binds_opacity() {
        let scheduler = AnimationScheduler::new();
        let mut view = BlinkView::new(
            BlinkProps::new()
                .delay(300.0)
                .style("width", 40.0)
                .style("opacity", 0.2)
                .prop("testID", "badge")
                .child("3"),
            &scheduler.handle(),
        );
        view.mount();

        let node = view.render(&ElementRegistry::new());
        let rendered = element(&node);
        assert!(rendered.animated);
        assert_eq!(rendered.kind, ElementKind::View);
        assert!(rendered.has_animated_opacity());
        assert_eq!(rendered.props.get("testID"), Some(&PropValue::from("badge")));
        assert_eq!(rendered.children, vec![Node::from("3")]);

        // Existing opacity entry is overridden in place
        let keys: Vec<_> = rendered.style.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["width", "opacity"]);

        // Opacity follows progress as the scheduler runs
        assert_eq!(rendered.opacity(), 0.0);
        scheduler.advance(100.0 + 300.0 + 150.0);
        assert!((rendered.opacity() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_explicit_false_renders_fixed_opacity() {
        let scheduler = AnimationScheduler::new();
        let mut view = BlinkView::new(
            BlinkProps::new().blinking(false).element(ElementKind::Text),
            &scheduler.handle(),
        );
        view.mount();

        let node = view.render(&ElementRegistry::new());
        let rendered = element(&node);
        assert!(!rendered.animated);
        assert_eq!(rendered.kind, ElementKind::Text);
        assert!(!rendered.has_animated_opacity());
        assert_eq!(rendered.opacity(), 1.0);
        assert_eq!(scheduler.driver_count(), 0);
    }

    #[test]
    fn test_update_to_not_blinking_settles_visible() {
        let scheduler = AnimationScheduler::new();
        let props = BlinkProps::new().delay(1500.0).blinking(true);
        let mut view = BlinkView::new(props.clone(), &scheduler.handle());
        view.mount();
        scheduler.advance(900.0);

        view.update(props.blinking(false));
        let controller = view.controller().unwrap();
        assert!(!controller.is_running());
        assert_eq!(controller.progress(), 1.0);

        let node = view.render(&ElementRegistry::new());
        assert_eq!(element(&node).opacity(), 1.0);
        assert!(!element(&node).animated);
    }

    #[test]
    fn test_update_delay_restarts_loop() {
        let scheduler = AnimationScheduler::new();
        let mut view = BlinkView::new(BlinkProps::new().delay(1500.0), &scheduler.handle());
        view.mount();
        scheduler.advance(2000.0);

        view.update(BlinkProps::new().delay(500.0));
        let controller = view.controller().unwrap();
        assert_eq!(controller.delay_ms(), 500.0);
        assert_eq!(controller.progress(), 0.0);
        assert_eq!(scheduler.driver_count(), 1);

        // New cadence: offset, leg down, leg up
        scheduler.advance(500.0 / 3.0 + 500.0 + 500.0);
        assert!((view.controller().unwrap().progress() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_unchanged_update_keeps_loop_running() {
        let mut view =
            BlinkView::with_value(BlinkProps::new().delay(300.0), RecordingValue::new(0.0));
        view.mount();
        let starts_before = view.controller().unwrap().animated_value().starts().len();

        view.update(BlinkProps::new().delay(300.0).child("changed"));
        let controller = view.controller().unwrap();
        assert_eq!(controller.animated_value().starts().len(), starts_before);
        assert!(controller.is_running());
        assert_eq!(view.props().children, vec![Node::from("changed")]);
    }

    #[test]
    fn test_invalid_update_delay_keeps_previous() {
        let mut view =
            BlinkView::with_value(BlinkProps::new().delay(300.0), RecordingValue::new(0.0));
        view.mount();

        view.update(BlinkProps::new().delay(f32::NAN));
        let controller = view.controller().unwrap();
        assert_eq!(controller.delay_ms(), 300.0);
        assert_eq!(controller.animated_value().starts().len(), 1);
    }

    #[test]
    fn test_invalid_initial_delay_degrades() {
        let scheduler = AnimationScheduler::new();
        let mut view = BlinkView::new(
            BlinkProps::new().delay(-1.0).child("a").child("b"),
            &scheduler.handle(),
        );
        assert!(!view.is_initialized());

        // Lifecycle calls are no-ops
        view.mount();
        view.update(BlinkProps::new().blinking(false));
        view.unmount();
        assert_eq!(scheduler.driver_count(), 0);

        let view = BlinkView::new(
            BlinkProps::new().delay(-1.0).child("a").child("b"),
            &scheduler.handle(),
        );
        assert_eq!(
            view.render(&ElementRegistry::new()),
            Node::Fragment(vec![Node::from("a"), Node::from("b")])
        );
        assert_eq!(
            view.try_render(&ElementRegistry::new()),
            Err(BlinkError::Uninitialized)
        );
    }

    #[test]
    fn test_dropped_scheduler_degrades() {
        let handle = AnimationScheduler::new().handle();
        let view = BlinkView::new(BlinkProps::new(), &handle);
        assert!(!view.is_initialized());

        // No children: an empty base container
        let node = view.render(&ElementRegistry::new());
        assert_eq!(node, Node::Element(RenderedElement::container(ElementKind::View)));
    }

    #[test]
    fn test_unknown_element_falls_back_to_children() {
        let scheduler = AnimationScheduler::new();
        let view = BlinkView::new(
            BlinkProps::new()
                .element(ElementKind::Custom("Ghost".into()))
                .child("boo"),
            &scheduler.handle(),
        );

        assert_eq!(
            view.try_render(&ElementRegistry::new()),
            Err(BlinkError::UnknownElement("Ghost".into()))
        );
        assert_eq!(
            view.render(&ElementRegistry::new()),
            Node::Fragment(vec![Node::from("boo")])
        );
    }

    #[test]
    fn test_non_animatable_element_only_fails_while_blinking() {
        let scheduler = AnimationScheduler::new();
        let registry = ElementRegistry::new().with("MapTile", false);
        let props = BlinkProps::new().element(ElementKind::Custom("MapTile".into()));

        let blinking = BlinkView::new(props.clone(), &scheduler.handle());
        assert_eq!(
            blinking.try_render(&registry),
            Err(BlinkError::NotAnimatable("MapTile".into()))
        );

        let idle = BlinkView::new(props.blinking(false), &scheduler.handle());
        let node = idle.try_render(&registry).unwrap();
        assert_eq!(element(&node).kind, ElementKind::Custom("MapTile".into()));
    }

    #[test]
    fn test_unmount_halts_loop() {
        let scheduler = AnimationScheduler::new();
        let mut view = BlinkView::new(BlinkProps::new().delay(300.0), &scheduler.handle());
        view.mount();
        assert_eq!(scheduler.driver_count(), 1);

        view.unmount();
        assert_eq!(scheduler.driver_count(), 0);
        drop(view);
        assert_eq!(scheduler.value_count(), 0);
    }

    #[test]
    fn test_update_after_unmount_stays_halted() {
        let scheduler = AnimationScheduler::new();
        let mut view = BlinkView::new(BlinkProps::new().delay(300.0), &scheduler.handle());
        view.mount();
        view.unmount();

        view.update(BlinkProps::new().delay(500.0));
        assert_eq!(scheduler.driver_count(), 0);
        assert_eq!(view.props().delay, Some(500.0));

        view.update(BlinkProps::new().blinking(false));
        view.update(BlinkProps::new().blinking(true).delay(500.0));
        assert_eq!(scheduler.driver_count(), 0);

        // Mounting again picks up what arrived while detached
        view.mount();
        let controller = view.controller().unwrap();
        assert!(controller.is_running());
        assert_eq!(controller.delay_ms(), 500.0);
    }
}
