//! Canvas shape list reader.
//!
//! The canvas editor posts an ordered list of shape records. Each record is
//! already typed, so canvas mode skips preprocessing, detection and OCR and
//! goes straight to layout.
//!
//! # Format
//!
//! Either a bare array or an object with a `shapes` array:
//!
//! ```json
//! { "shapes": [
//!     { "id": "s1", "type": "rect", "bbox": [10, 10, 120, 40], "text": "Go",
//!       "styles": { "fillColor": "#007bff", "borderRadius": 4 } },
//!     { "type": "text", "x": 10, "y": 70, "width": 80, "height": 20 }
//! ] }
//! ```
//!
//! `type` is one of the component types (`button`, `input`, `checkbox`,
//! `label`, `container`) or one of the generic editor kinds:
//! - `rect`: an input when wider than 2.5x its height, otherwise a button
//! - `text`: a label
//!
//! Records without an `id` get `comp_NNN` from their position.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::model::{Component, ComponentType, ShapeStyle};
use super::{BBox, ComponentId};
use crate::error::SketchError;

/// Aspect ratio above which a generic `rect` becomes an input field.
const RECT_INPUT_ASPECT_RATIO: f64 = 2.5;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CanvasDocument {
    Wrapped { shapes: Vec<CanvasShape> },
    Bare(Vec<CanvasShape>),
}

#[derive(Debug, Deserialize)]
struct CanvasShape {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    bbox: Option<BBox>,
    #[serde(default)]
    x: Option<i32>,
    #[serde(default)]
    y: Option<i32>,
    #[serde(default)]
    width: Option<i32>,
    #[serde(default)]
    height: Option<i32>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default, alias = "styles")]
    style: Option<ShapeStyle>,
}

impl CanvasShape {
    fn bbox(&self) -> Option<BBox> {
        if let Some(bbox) = self.bbox {
            return Some(bbox);
        }
        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(w), Some(h)) => Some(BBox::new(x, y, w, h)),
            _ => None,
        }
    }
}

/// Reads a canvas shape list from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if any shape
/// is invalid (unknown type, missing or non-positive box, duplicate id).
pub fn read_canvas_json(path: &Path) -> Result<Vec<Component>, SketchError> {
    let file = File::open(path).map_err(SketchError::Io)?;
    let reader = BufReader::new(file);

    let document: CanvasDocument =
        serde_json::from_reader(reader).map_err(|source| SketchError::CanvasParse {
            path: path.to_path_buf(),
            source,
        })?;
    shapes_to_components(document)
}

/// Reads a canvas shape list from a JSON string.
pub fn from_canvas_str(json: &str) -> Result<Vec<Component>, SketchError> {
    let document: CanvasDocument = serde_json::from_str(json).map_err(SketchError::CanvasJson)?;
    shapes_to_components(document)
}

/// Reads a canvas shape list from JSON bytes.
pub fn from_canvas_slice(bytes: &[u8]) -> Result<Vec<Component>, SketchError> {
    let document: CanvasDocument =
        serde_json::from_slice(bytes).map_err(SketchError::CanvasJson)?;
    shapes_to_components(document)
}

fn shapes_to_components(document: CanvasDocument) -> Result<Vec<Component>, SketchError> {
    let shapes = match document {
        CanvasDocument::Wrapped { shapes } => shapes,
        CanvasDocument::Bare(shapes) => shapes,
    };

    let mut seen: HashSet<ComponentId> = HashSet::with_capacity(shapes.len());
    let mut components = Vec::with_capacity(shapes.len());

    for (index, shape) in shapes.into_iter().enumerate() {
        let bbox = shape.bbox().ok_or_else(|| SketchError::InvalidShape {
            index,
            reason: "missing bbox (expected `bbox` or x/y/width/height)".to_string(),
        })?;
        if !bbox.is_valid() {
            return Err(SketchError::InvalidShape {
                index,
                reason: format!(
                    "non-positive size {}x{} (width and height must be > 0)",
                    bbox.width, bbox.height
                ),
            });
        }

        let component_type =
            resolve_kind(&shape.kind, &bbox).ok_or_else(|| SketchError::InvalidShape {
                index,
                reason: format!("unknown shape type '{}'", shape.kind),
            })?;

        let id = match shape.id {
            Some(id) if !id.is_empty() => ComponentId::new(id),
            _ => ComponentId::from_index(index),
        };
        if !seen.insert(id.clone()) {
            return Err(SketchError::InvalidShape {
                index,
                reason: format!("duplicate id '{}'", id),
            });
        }

        let mut component = Component::new(id, component_type, bbox);
        component.text = shape.text.unwrap_or_default();
        component.style = shape.style.filter(|s| !s.is_empty());
        components.push(component);
    }

    Ok(components)
}

/// Maps an editor shape kind to a component type.
fn resolve_kind(kind: &str, bbox: &BBox) -> Option<ComponentType> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "rect" | "rectangle" => {
            if bbox.aspect_ratio() > RECT_INPUT_ASPECT_RATIO {
                Some(ComponentType::Input)
            } else {
                Some(ComponentType::Button)
            }
        }
        "text" => Some(ComponentType::Label),
        other => ComponentType::from_name(other),
    }
}
