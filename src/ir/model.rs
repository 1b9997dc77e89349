//! Core component model shared by every pipeline stage.
//!
//! A [`Component`] is created by the detector (image mode) or read from the
//! client (canvas mode), gets its `text` filled in by the labeler, and is
//! then consumed read-only by the layout engine and the code generators.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::bbox::BBox;
use super::ids::ComponentId;

/// The kind of UI element a component represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Button,
    Input,
    Checkbox,
    Label,
    Container,
}

impl ComponentType {
    /// All component types, in declaration order.
    pub const ALL: [ComponentType; 5] = [
        ComponentType::Button,
        ComponentType::Input,
        ComponentType::Checkbox,
        ComponentType::Label,
        ComponentType::Container,
    ];

    /// Wire name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            ComponentType::Button => "button",
            ComponentType::Input => "input",
            ComponentType::Checkbox => "checkbox",
            ComponentType::Label => "label",
            ComponentType::Container => "container",
        }
    }

    /// Parses a wire name. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Text substituted when OCR yields nothing usable.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            ComponentType::Button => "Button",
            ComponentType::Input => "Enter text",
            ComponentType::Label => "Label",
            ComponentType::Checkbox => "Option",
            ComponentType::Container => "",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stroke pattern of a canvas shape's border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// CSS `border-style` keyword.
    pub fn css_keyword(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
        }
    }
}

/// Visual attributes of a shape drawn in the canvas editor.
///
/// Image-sourced components never carry a style.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
}

impl ShapeStyle {
    /// Returns true if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == ShapeStyle::default()
    }
}

/// A detected or declared UI element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique within one request.
    pub id: ComponentId,

    #[serde(rename = "type")]
    pub component_type: ComponentType,

    pub bbox: BBox,

    /// Empty until the labeler runs (image mode).
    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ShapeStyle>,
}

impl Component {
    /// Creates a component with empty text and no style.
    pub fn new(id: impl Into<ComponentId>, component_type: ComponentType, bbox: BBox) -> Self {
        Self {
            id: id.into(),
            component_type,
            bbox,
            text: String::new(),
            style: None,
        }
    }

    /// Sets the text of the component.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the canvas style of the component.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = Some(style);
        self
    }
}
