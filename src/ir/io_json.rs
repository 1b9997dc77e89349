//! JSON response payload.
//!
//! The payload returned to clients pairs the generated markup with the flat
//! component list:
//!
//! ```json
//! { "html": "...", "css": "...",
//!   "components": [ { "id": "comp_000", "type": "button", "bbox": [x, y, w, h], "text": "OK" } ] }
//! ```
//!
//! Canvas style attributes are not echoed back; they are
//! already applied inline in `html`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{Component, ComponentType};
use super::{BBox, ComponentId};
use crate::error::SketchError;

/// One entry of the payload's component list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub bbox: BBox,
    pub text: String,
}

impl From<&Component> for ComponentRecord {
    fn from(component: &Component) -> Self {
        Self {
            id: component.id.clone(),
            component_type: component.component_type,
            bbox: component.bbox,
            text: component.text.clone(),
        }
    }
}

/// The full response for one conversion request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub html: String,
    pub css: String,
    pub components: Vec<ComponentRecord>,
}

impl ResponsePayload {
    /// Builds a payload from generated markup and the flat component list.
    pub fn new(html: impl Into<String>, css: impl Into<String>, components: &[Component]) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            components: components.iter().map(ComponentRecord::from).collect(),
        }
    }
}

/// Writes a payload to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_payload_json(path: &Path, payload: &ResponsePayload) -> Result<(), SketchError> {
    let file = File::create(path).map_err(SketchError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, payload).map_err(|source| SketchError::PayloadWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes a payload to a pretty-printed JSON string.
pub fn to_json_string(payload: &ResponsePayload) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Parses a payload from a JSON string.
pub fn from_json_str(json: &str) -> Result<ResponsePayload, serde_json::Error> {
    serde_json::from_str(json)
}
