//! Blink view configuration
//!
//! `BlinkProps` is what a parent hands the component on every render.
//! `BlinkConfig` is the serializable subset, handy for loading presets from
//! TOML files.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::element::{ElementKind, Node, PropValue};
use crate::error::{BlinkError, Result};

/// Half-cycle duration used when no delay is configured
pub const DEFAULT_DELAY_MS: f32 = 1500.0;

/// Whether the pulse runs when the flag is not configured
pub const DEFAULT_BLINKING: bool = true;

/// Turn an optional configured delay into the half-cycle duration
///
/// Absent and zero delays fall back to [`DEFAULT_DELAY_MS`]; negative and
/// non-finite delays are rejected.
pub fn resolve_delay(delay: Option<f32>) -> Result<f32> {
    match delay {
        None => Ok(DEFAULT_DELAY_MS),
        Some(ms) if !ms.is_finite() || ms < 0.0 => Err(BlinkError::InvalidDelay(ms)),
        Some(ms) if ms == 0.0 => Ok(DEFAULT_DELAY_MS),
        Some(ms) => Ok(ms),
    }
}

/// Ordered style entries forwarded to the rendered element
pub type Style = IndexMap<String, PropValue>;

/// Properties of a blink view
///
/// Every field is optional. Unknown properties and style entries are
/// forwarded unchanged to the rendered element.
#[derive(Clone, Debug, Default)]
pub struct BlinkProps {
    /// Element type the animation wraps (generic container when unset)
    pub element: Option<ElementKind>,
    /// Content rendered inside the element
    pub children: Vec<Node>,
    /// Half-cycle duration in milliseconds
    pub delay: Option<f32>,
    /// Whether the pulse loop runs
    pub blinking: Option<bool>,
    /// Style entries; `opacity` is overridden at render time
    pub style: Style,
    /// Other pass-through properties
    pub props: IndexMap<String, PropValue>,
}

impl BlinkProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a specific element type
    pub fn element(mut self, element: ElementKind) -> Self {
        self.element = Some(element);
        self
    }

    /// Append a child node
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Set the half-cycle duration in milliseconds
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay = Some(delay_ms);
        self
    }

    /// Enable or disable the pulse
    pub fn blinking(mut self, blinking: bool) -> Self {
        self.blinking = Some(blinking);
        self
    }

    /// Add a style entry
    pub fn style(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Add a pass-through property
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Blinking flag with the default applied
    ///
    /// An explicit `false` is honoured; only an absent flag means "on".
    pub fn is_blinking(&self) -> bool {
        self.blinking.unwrap_or(DEFAULT_BLINKING)
    }

    /// Resolved half-cycle duration
    pub fn delay_ms(&self) -> Result<f32> {
        resolve_delay(self.delay)
    }

    /// Element type with the default applied
    pub fn element_kind(&self) -> &ElementKind {
        static DEFAULT: ElementKind = ElementKind::View;
        self.element.as_ref().unwrap_or(&DEFAULT)
    }
}

/// Serializable blink settings
///
/// ```toml
/// element = "text"
/// delay_ms = 300.0
/// blinking = true
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Element type the animation wraps
    pub element: ElementKind,
    /// Half-cycle duration in milliseconds
    pub delay_ms: f32,
    /// Whether the pulse loop runs
    pub blinking: bool,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            element: ElementKind::View,
            delay_ms: DEFAULT_DELAY_MS,
            blinking: DEFAULT_BLINKING,
        }
    }
}

impl BlinkConfig {
    /// Parse settings from a TOML document, validating the delay
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: BlinkConfig = toml::from_str(source)?;
        resolve_delay(Some(config.delay_ms))?;
        Ok(config)
    }

    /// Set the element type
    pub fn with_element(mut self, element: ElementKind) -> Self {
        self.element = element;
        self
    }

    /// Set the half-cycle duration
    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Enable or disable the pulse
    pub fn with_blinking(mut self, blinking: bool) -> Self {
        self.blinking = blinking;
        self
    }

    /// Props carrying these settings and no children
    pub fn to_props(&self) -> BlinkProps {
        BlinkProps::new()
            .element(self.element.clone())
            .delay(self.delay_ms)
            .blinking(self.blinking)
    }
}

impl From<BlinkConfig> for BlinkProps {
    fn from(config: BlinkConfig) -> Self {
        config.to_props()
    }
}
