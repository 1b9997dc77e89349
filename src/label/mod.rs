//! Text labelling for detected components.
//!
//! Each component's pixel region is cropped and cleaned ([`region`]), passed
//! to an [`OcrEngine`], and the result is normalised ([`normalize`]). When
//! nothing usable comes back, whether because the engine failed or because
//! it returned blanks, the component gets its type's fallback text.
//!
//! OCR errors never leave this module.

pub mod normalize;
pub mod region;
pub mod tesseract;

pub use normalize::{normalize_text, text_or_fallback};
pub use region::prepare_region;
pub use tesseract::{OcrConfig, TesseractEngine};

use image::GrayImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ir::{Component, ComponentType};

/// Failure of a single OCR call.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to start OCR program '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR program exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },

    #[error("could not encode region for OCR: {0}")]
    Encode(#[source] image::ImageError),
}

/// Something that reads one line of text from a prepared region.
pub trait OcrEngine {
    fn extract(&self, region: &GrayImage) -> Result<String, OcrError>;
}

/// Engine that never recognises anything. Every component gets fallback text.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullOcr;

impl OcrEngine for NullOcr {
    fn extract(&self, _region: &GrayImage) -> Result<String, OcrError> {
        Ok(String::new())
    }
}

/// Region preparation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelerConfig {
    /// Pixels added around the bounding box before cropping.
    pub margin: i32,
    /// Median filter radius.
    pub median_radius: u32,
    /// Half-size of the adaptive threshold window.
    pub threshold_block_radius: u32,
    /// Subtracted from the local mean before comparing.
    pub threshold_offset: f64,
    /// Structuring element radius for the closing pass.
    pub closing_radius: u8,
    /// Types that are sent to OCR. Others get fallback text directly.
    pub ocr_types: Vec<ComponentType>,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            margin: 5,
            median_radius: 2,
            threshold_block_radius: 5,
            threshold_offset: 2.0,
            closing_radius: 1,
            ocr_types: vec![
                ComponentType::Button,
                ComponentType::Input,
                ComponentType::Label,
                ComponentType::Checkbox,
            ],
        }
    }
}

/// Fills in component text from the source image.
pub struct Labeler<'a> {
    engine: &'a dyn OcrEngine,
    config: &'a LabelerConfig,
}

impl<'a> Labeler<'a> {
    pub fn new(engine: &'a dyn OcrEngine, config: &'a LabelerConfig) -> Self {
        Self { engine, config }
    }

    /// Labels every component. One component's failure does not affect the others.
    pub fn label_all(&self, components: Vec<Component>, gray: &GrayImage) -> Vec<Component> {
        let labelled: Vec<Component> = components
            .into_iter()
            .map(|component| self.label(component, gray))
            .collect();
        info!(count = labelled.len(), "labelled components");
        labelled
    }

    /// Labels one component.
    pub fn label(&self, mut component: Component, gray: &GrayImage) -> Component {
        let raw = self.recognise(&component, gray);
        let (text, used_fallback) =
            text_or_fallback(normalize_text(&raw), component.component_type);

        if used_fallback {
            debug!(id = %component.id, fallback = %text, "using fallback text");
        } else {
            debug!(id = %component.id, %text, "recognised text");
        }
        component.text = text;
        component
    }

    fn recognise(&self, component: &Component, gray: &GrayImage) -> String {
        if !self.config.ocr_types.contains(&component.component_type) {
            return String::new();
        }
        let Some(region) = prepare_region(gray, &component.bbox, self.config) else {
            warn!(
                id = %component.id,
                bbox = ?component.bbox,
                "component region is outside the image"
            );
            return String::new();
        };

        match self.engine.extract(&region) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(id = %component.id, error = %e, "OCR failed");
                String::new()
            }
        }
    }
}
