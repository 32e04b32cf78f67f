//! Element model and render output
//!
//! The view does not draw anything itself. It produces a small [`Node`] tree
//! describing which element type to create, which properties to forward and
//! how opacity is bound; the host toolkit turns that into real widgets.

use std::fmt;

use blink_animation::SampledValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::Style;
use crate::error::{BlinkError, Result};

/// Element type a blink view wraps
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Generic container
    #[default]
    View,
    /// Text run
    Text,
    /// Image
    Image,
    /// Host-defined element, looked up in an [`ElementRegistry`]
    Custom(String),
}

impl ElementKind {
    pub fn name(&self) -> &str {
        match self {
            ElementKind::View => "View",
            ElementKind::Text => "Text",
            ElementKind::Image => "Image",
            ElementKind::Custom(name) => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, ElementKind::Custom(_))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Property Values
// ============================================================================

/// A forwarded property or style value
#[derive(Clone, Debug)]
pub enum PropValue {
    Number(f64),
    Text(String),
    Bool(bool),
    /// Resolved every time the renderer samples it
    Animated(SampledValue),
}

impl PropValue {
    /// Numeric value, sampling animated values
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PropValue::Number(n) => Some(*n as f32),
            PropValue::Animated(sampled) => Some(sampled.get()),
            PropValue::Text(_) | PropValue::Bool(_) => None,
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, PropValue::Animated(_))
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Number(a), PropValue::Number(b)) => a == b,
            (PropValue::Text(a), PropValue::Text(b)) => a == b,
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Animated(a), PropValue::Animated(b)) => a.get() == b.get(),
            _ => false,
        }
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<SampledValue> for PropValue {
    fn from(value: SampledValue) -> Self {
        PropValue::Animated(value)
    }
}

// ============================================================================
// Element Registry
// ============================================================================

/// Capabilities of a host-defined element type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementSpec {
    /// Whether the animated wrapper can bind properties on it
    pub animatable: bool,
}

/// Host-defined element types known to the renderer
///
/// Built-in kinds are always known and animatable.
#[derive(Clone, Debug, Default)]
pub struct ElementRegistry {
    custom: IndexMap<String, ElementSpec>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom element type
    pub fn register(&mut self, name: impl Into<String>, animatable: bool) -> &mut Self {
        self.custom.insert(name.into(), ElementSpec { animatable });
        self
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, name: impl Into<String>, animatable: bool) -> Self {
        self.register(name, animatable);
        self
    }

    pub fn spec(&self, kind: &ElementKind) -> Option<ElementSpec> {
        match kind {
            ElementKind::Custom(name) => self.custom.get(name).copied(),
            _ => Some(ElementSpec { animatable: true }),
        }
    }

    /// Check that `kind` can be rendered, wrapped for animation when `animated`
    pub fn resolve(&self, kind: &ElementKind, animated: bool) -> Result<ElementSpec> {
        let spec = self
            .spec(kind)
            .ok_or_else(|| BlinkError::UnknownElement(kind.name().to_string()))?;
        if animated && !spec.animatable {
            return Err(BlinkError::NotAnimatable(kind.name().to_string()));
        }
        Ok(spec)
    }
}

// ============================================================================
// Render Output
// ============================================================================

/// A rendered element with forwarded properties
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedElement {
    pub kind: ElementKind,
    /// Wrapped by the animation-capable wrapper
    pub animated: bool,
    pub props: IndexMap<String, PropValue>,
    pub style: Style,
    pub children: Vec<Node>,
}

impl RenderedElement {
    /// An empty, unanimated element of the given type
    pub fn container(kind: ElementKind) -> Self {
        Self {
            kind,
            animated: false,
            props: IndexMap::new(),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    /// Current opacity; 1.0 when no opacity entry is present
    pub fn opacity(&self) -> f32 {
        self.style
            .get("opacity")
            .and_then(PropValue::as_number)
            .unwrap_or(1.0)
    }

    /// Whether opacity follows an animated value
    pub fn has_animated_opacity(&self) -> bool {
        self.style
            .get("opacity")
            .map(PropValue::is_animated)
            .unwrap_or(false)
    }
}

/// Output of rendering
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Text(String),
    Element(RenderedElement),
    /// Several sibling nodes without a wrapper
    Fragment(Vec<Node>),
}

impl Node {
    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&RenderedElement> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<RenderedElement> for Node {
    fn from(element: RenderedElement) -> Self {
        Node::Element(element)
    }
}
