//! OCR through the `tesseract` command-line program.
//!
//! The prepared region is PNG-encoded in memory and piped to
//! `tesseract stdin stdout --psm <mode> -l <lang>`; recognised text is read
//! back from stdout.

use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

use image::{GrayImage, ImageFormat};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{OcrEngine, OcrError};

/// How the external OCR program is invoked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Program name or path.
    pub binary: String,
    /// Tesseract page segmentation mode. 7 treats the region as one text line.
    pub page_segmentation_mode: u8,
    /// Tesseract language code.
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            page_segmentation_mode: 7,
            language: "eng".to_string(),
        }
    }
}

impl OcrConfig {
    /// Command-line arguments, excluding the program itself.
    pub fn args(&self) -> Vec<String> {
        vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "--psm".to_string(),
            self.page_segmentation_mode.to_string(),
            "-l".to_string(),
            self.language.clone(),
        ]
    }
}

/// Runs one `tesseract` process per region.
#[derive(Clone, Debug, Default)]
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }
}

impl OcrEngine for TesseractEngine {
    fn extract(&self, region: &GrayImage) -> Result<String, OcrError> {
        let mut png = Vec::new();
        region
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(OcrError::Encode)?;

        let mut child = Command::new(&self.config.binary)
            .args(self.config.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| OcrError::Spawn {
                program: self.config.binary.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(source) = stdin.write_all(&png) {
                drop(stdin);
                // The program stopped reading; make sure it does not linger.
                let _ = child.kill();
                let _ = child.wait();
                return Err(OcrError::Io(source));
            }
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!(bytes = png.len(), raw = %text.trim(), "tesseract returned");
        Ok(text)
    }
}
