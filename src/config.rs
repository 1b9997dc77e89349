//! Pipeline configuration.
//!
//! Every section has defaults matching the built-in thresholds, and every
//! field is optional in a config file, so a file only needs to name what it
//! changes:
//!
//! ```yaml
//! detector:
//!   min_area: 800
//!   suppress_contained: false
//! ocr:
//!   language: deu
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detect::DetectorConfig;
use crate::error::SketchError;
use crate::label::{LabelerConfig, OcrConfig};
use crate::layout::LayoutConfig;

/// All tunables for one run. Read-only once loaded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub detector: DetectorConfig,
    pub layout: LayoutConfig,
    pub ocr: OcrConfig,
    pub labeler: LabelerConfig,
}

/// Loads a config file. `.yaml`/`.yml` files are read as YAML, anything
/// else as JSON.
pub fn load_config(path: &Path) -> Result<PipelineConfig, SketchError> {
    let data = fs::read_to_string(path).map_err(SketchError::Io)?;
    let parse_error = |message: String| SketchError::ConfigParse {
        path: path.to_path_buf(),
        message,
    };

    if is_yaml_path(path) {
        serde_yaml::from_str(&data).map_err(|e| parse_error(e.to_string()))
    } else {
        serde_json::from_str(&data).map_err(|e| parse_error(e.to_string()))
    }
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
