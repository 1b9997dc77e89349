//! Detection diagnostics.
//!
//! Counts what happened to every contour on its way to becoming (or not
//! becoming) a component. Nothing here is an error: an image where every
//! contour is filtered simply yields an empty component list.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::ir::ComponentType;

/// Per-pass counts for one detection run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DetectionReport {
    /// Contours returned by the tracer.
    pub raw_contours: usize,
    /// Contours that have a parent in the hierarchy.
    pub nested_contours: usize,
    /// Dropped for enclosing less than the noise floor.
    pub noise_filtered: usize,
    /// Dropped for not simplifying to four vertices.
    pub non_rectangular: usize,
    /// Rectangles no classification rule matched.
    pub unclassified: usize,
    /// Removed as duplicates of a larger detection.
    pub duplicates_removed: usize,
    /// Final components by type.
    pub type_counts: BTreeMap<ComponentType, usize>,
}

impl DetectionReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of components that survived every pass.
    pub fn component_count(&self) -> usize {
        self.type_counts.values().sum()
    }

    /// Number of contours dropped before classification or by it.
    pub fn filtered_count(&self) -> usize {
        self.noise_filtered + self.non_rectangular + self.unclassified
    }
}

impl fmt::Display for DetectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Detected {} component(s) from {} contour(s) ({} nested):",
            self.component_count(),
            self.raw_contours,
            self.nested_contours
        )?;
        writeln!(f, "  noise filtered:     {}", self.noise_filtered)?;
        writeln!(f, "  non-rectangular:    {}", self.non_rectangular)?;
        writeln!(f, "  unclassified:       {}", self.unclassified)?;
        writeln!(f, "  duplicates removed: {}", self.duplicates_removed)?;

        if !self.type_counts.is_empty() {
            let counts: Vec<String> = self
                .type_counts
                .iter()
                .map(|(t, n)| format!("{}={}", t, n))
                .collect();
            writeln!(f, "  types: {}", counts.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = DetectionReport::new();
        report.noise_filtered = 3;
        report.non_rectangular = 2;
        report.unclassified = 1;
        report.type_counts.insert(ComponentType::Button, 2);
        report.type_counts.insert(ComponentType::Input, 1);

        assert_eq!(report.component_count(), 3);
        assert_eq!(report.filtered_count(), 6);
    }

    #[test]
    fn test_display_lists_types() {
        let mut report = DetectionReport::new();
        report.raw_contours = 4;
        report.type_counts.insert(ComponentType::Checkbox, 1);

        let text = report.to_string();
        assert!(text.contains("Detected 1 component(s) from 4 contour(s)"));
        assert!(text.contains("types: checkbox=1"));
    }

    #[test]
    fn test_json_keys_are_type_names() {
        let mut report = DetectionReport::new();
        report.type_counts.insert(ComponentType::Container, 2);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""type_counts":{"container":2}"#));
    }
}
