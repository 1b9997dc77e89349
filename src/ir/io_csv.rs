//! CSV export of the flat component list.
//!
//! One row per component with columns `id,type,x,y,width,height,text`.
//! Rows keep the order they are given in (detection order), so the output
//! is deterministic for a given input image.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::model::{Component, ComponentType};
use crate::error::SketchError;

#[derive(Debug, Serialize)]
struct ComponentRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    component_type: ComponentType,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    text: &'a str,
}

impl<'a> From<&'a Component> for ComponentRow<'a> {
    fn from(component: &'a Component) -> Self {
        let (x, y, width, height) = component.bbox.to_xywh();
        Self {
            id: component.id.as_str(),
            component_type: component.component_type,
            x,
            y,
            width,
            height,
            text: &component.text,
        }
    }
}

/// Writes the component list to a CSV file.
pub fn write_components_csv(path: &Path, components: &[Component]) -> Result<(), SketchError> {
    let file = File::create(path).map_err(SketchError::Io)?;
    write_components(BufWriter::new(file), components)
}

/// Writes the component list as CSV to any writer.
pub fn write_components<W: Write>(writer: W, components: &[Component]) -> Result<(), SketchError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if components.is_empty() {
        csv_writer.write_record(["id", "type", "x", "y", "width", "height", "text"])?;
    }
    for component in components {
        csv_writer.serialize(ComponentRow::from(component))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders the component list as a CSV string.
pub fn to_components_csv_string(components: &[Component]) -> Result<String, SketchError> {
    let mut buffer = Vec::new();
    write_components(&mut buffer, components)?;
    String::from_utf8(buffer)
        .map_err(|e| SketchError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
