//! Request orchestration.
//!
//! Image mode runs every stage in sequence:
//!
//! ```text
//! bytes -> preprocess -> detect -> label -> layout -> render
//! ```
//!
//! Canvas mode starts from client-declared components and goes straight to
//! layout. Canvas shapes did not come out of contour tracing, so they are
//! neither deduplicated nor OCR'd.
//!
//! Only two things fail a request: undecodable image bytes and a layout
//! coverage violation. Everything else degrades to fewer components or
//! fallback text.

use std::fmt;

use tracing::{info, info_span, warn};

use crate::codegen::{render, RenderedPage};
use crate::config::PipelineConfig;
use crate::detect::{detect_components, Detection, DetectionReport};
use crate::error::SketchError;
use crate::ir::io_json::ResponsePayload;
use crate::ir::Component;
use crate::label::{Labeler, OcrEngine};
use crate::layout::{build_layout_tree, LayoutNode};
use crate::preprocess::process_image;

/// Everything produced for one request.
#[derive(Clone, Debug)]
pub struct Conversion {
    /// Flat component list, in detection (or declaration) order.
    pub components: Vec<Component>,
    pub layout: LayoutNode,
    pub page: RenderedPage,
    /// Present in image mode only.
    pub detection: Option<DetectionReport>,
}

impl Conversion {
    /// The client-facing payload.
    pub fn payload(&self) -> ResponsePayload {
        ResponsePayload::new(
            self.page.html.clone(),
            self.page.css.clone(),
            &self.components,
        )
    }

    pub fn row_count(&self) -> usize {
        self.layout.children().len()
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} component(s) into {} row(s)",
            self.components.len(),
            self.row_count()
        )?;
        for (i, row) in self.layout.children().iter().enumerate() {
            let members: Vec<String> = row
                .leaves()
                .iter()
                .map(|c| {
                    if c.text.is_empty() {
                        format!("{} {}", c.id, c.component_type)
                    } else {
                        format!("{} {} {:?}", c.id, c.component_type, c.text)
                    }
                })
                .collect();
            writeln!(f, "  row {}: {}", i, members.join(", "))?;
        }
        Ok(())
    }
}

/// Decodes and detects, without labelling or layout.
pub fn detect_image(bytes: &[u8], config: &PipelineConfig) -> Result<Detection, SketchError> {
    let image = process_image(bytes)?;
    let detection = detect_components(&image, &config.detector);
    if detection.components.is_empty() {
        warn!(
            contours = detection.report.raw_contours,
            "no components detected"
        );
    }
    Ok(detection)
}

/// Converts a sketch image.
pub fn convert_image(
    bytes: &[u8],
    config: &PipelineConfig,
    engine: &dyn OcrEngine,
) -> Result<Conversion, SketchError> {
    let span = info_span!("convert_image", bytes = bytes.len());
    let _guard = span.enter();

    let image = process_image(bytes)?;
    let detection = detect_components(&image, &config.detector);
    if detection.components.is_empty() {
        warn!(
            contours = detection.report.raw_contours,
            "no components detected"
        );
    }

    let labeler = Labeler::new(engine, &config.labeler);
    let components = labeler.label_all(detection.components, &image.gray);

    finish(components, config, Some(detection.report))
}

/// Converts client-declared canvas shapes.
pub fn convert_canvas(
    components: Vec<Component>,
    config: &PipelineConfig,
) -> Result<Conversion, SketchError> {
    let span = info_span!("convert_canvas", shapes = components.len());
    let _guard = span.enter();

    finish(components, config, None)
}

fn finish(
    components: Vec<Component>,
    config: &PipelineConfig,
    detection: Option<DetectionReport>,
) -> Result<Conversion, SketchError> {
    let layout = build_layout_tree(&components, &config.layout)?;
    let page = render(&layout);
    info!(
        components = components.len(),
        rows = layout.children().len(),
        html_bytes = page.html.len(),
        "conversion finished"
    );

    Ok(Conversion {
        components,
        layout,
        page,
        detection,
    })
}
