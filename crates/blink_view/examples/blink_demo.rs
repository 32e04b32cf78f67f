//! Blink Demo
//!
//! Drives a blink view through mount, a delay change and a toggle, logging
//! the sampled opacity along the way.
//!
//! Run with: RUST_LOG=debug cargo run -p blink_view --example blink_demo

use blink_animation::AnimationScheduler;
use blink_view::{BlinkConfig, BlinkProps, BlinkView, ElementKind, ElementRegistry, Node};

const FRAME_MS: f32 = 1000.0 / 60.0;

fn sample(view: &BlinkView, registry: &ElementRegistry) -> f32 {
    match view.render(registry) {
        Node::Element(element) => element.opacity(),
        _ => 1.0,
    }
}

fn run_frames(
    scheduler: &AnimationScheduler,
    view: &BlinkView,
    registry: &ElementRegistry,
    frames: u32,
) {
    for frame in 0..frames {
        scheduler.advance(FRAME_MS);
        if frame % 6 == 0 {
            tracing::info!(frame, opacity = sample(view, registry), "frame");
        }
    }
}

fn main() -> blink_view::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = BlinkConfig::from_toml_str(
        r#"
        element = "text"
        delay_ms = 300.0
        "#,
    )?;

    let scheduler = AnimationScheduler::new();
    let registry = ElementRegistry::new();

    let props = BlinkProps::from(config.clone()).child("Recording");
    let mut view = BlinkView::new(props.clone(), &scheduler.handle());
    view.mount();

    tracing::info!(delay_ms = config.delay_ms, "pulsing");
    run_frames(&scheduler, &view, &registry, 90);

    tracing::info!("speeding up to 150ms");
    view.update(props.clone().delay(150.0));
    run_frames(&scheduler, &view, &registry, 45);

    tracing::info!("blinking off");
    view.update(props.clone().delay(150.0).blinking(false));
    run_frames(&scheduler, &view, &registry, 12);

    tracing::info!("unknown element falls back to children");
    view.update(
        props
            .delay(150.0)
            .blinking(false)
            .element(ElementKind::Custom("Ghost".into())),
    );
    tracing::info!(node = ?view.render(&registry), "rendered");

    view.unmount();
    Ok(())
}
