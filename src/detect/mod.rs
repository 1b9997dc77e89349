//! Component detection from a preprocessed sketch.
//!
//! Detection runs over the dilated edge map:
//!
//! 1. trace every contour, keeping the parent/child hierarchy
//! 2. simplify each contour polygon (Douglas-Peucker, epsilon proportional
//!    to the perimeter) and take the bounding box of the result
//! 3. drop boxes enclosing less than the noise floor
//! 4. drop polygons that do not simplify to four vertices
//! 5. classify the rest with the rule table in [`classify`]
//! 6. number survivors `comp_000`, `comp_001`, ... in contour order
//! 7. suppress duplicates with [`dedup`]
//!
//! Only rectangles are recognised. Detection never fails: an image with no
//! usable contours gives an empty list, and the [`DetectionReport`] says why.

pub mod classify;
pub mod dedup;
mod report;

pub use classify::{Bounds, ClassificationRule, ClassificationRules, ShapeMetrics};
pub use dedup::{deduplicate, DedupOptions, DedupOutcome, Suppression, SuppressionReason};
pub use report::DetectionReport;

use image::GrayImage;
use imageproc::contours::{find_contours, Contour};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ir::{BBox, Component, ComponentId, ComponentType};
use crate::preprocess::PixelImage;

/// Thresholds for detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Boxes with a smaller area are noise.
    pub min_area: i64,
    /// Polygon simplification tolerance as a fraction of the perimeter.
    pub approx_epsilon_ratio: f64,
    /// IoU above which two detections are the same element.
    pub iou_threshold: f64,
    /// Also suppress boxes mostly contained in a larger one. This is what
    /// removes the inner contour of a thick stroke.
    pub suppress_contained: bool,
    /// Fraction of a box that must lie inside another to count as contained.
    pub containment_ratio: f64,
    /// Ordered classification table.
    pub rules: ClassificationRules,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_area: 500,
            approx_epsilon_ratio: 0.04,
            iou_threshold: 0.75,
            suppress_contained: true,
            containment_ratio: 0.80,
            rules: ClassificationRules::default(),
        }
    }
}

impl DetectorConfig {
    /// Dedup options derived from this config.
    pub fn dedup_options(&self) -> DedupOptions {
        DedupOptions {
            iou_threshold: self.iou_threshold,
            suppress_contained: self.suppress_contained,
            containment_ratio: self.containment_ratio,
        }
    }

    /// Returns true if a box of this area clears the noise floor.
    pub fn passes_noise_floor(&self, area: i64) -> bool {
        area >= self.min_area
    }
}

/// Components found in one image plus the diagnostics for the run.
#[derive(Clone, Debug, Default)]
pub struct Detection {
    pub components: Vec<Component>,
    pub report: DetectionReport,
}

/// Detects components in a preprocessed image.
pub fn detect_components(image: &PixelImage, config: &DetectorConfig) -> Detection {
    detect_in_edge_map(&image.dilated, config)
}

/// Detects components in a binary edge map (non-zero pixels are edges).
pub fn detect_in_edge_map(edges: &GrayImage, config: &DetectorConfig) -> Detection {
    let contours: Vec<Contour<i32>> = find_contours::<i32>(edges);
    info!(count = contours.len(), "found raw contours");

    let mut report = DetectionReport::new();
    report.raw_contours = contours.len();

    let mut components = Vec::new();
    for contour in &contours {
        if contour.parent.is_some() {
            report.nested_contours += 1;
        }
        match examine_contour(contour, config) {
            Candidate::Component(bbox, component_type) => {
                let id = ComponentId::from_index(components.len());
                debug!(%id, %component_type, ?bbox, "classified contour");
                components.push(Component::new(id, component_type, bbox));
            }
            Candidate::Noise => report.noise_filtered += 1,
            Candidate::NonRectangular => report.non_rectangular += 1,
            Candidate::Unclassified(bbox) => {
                debug!(?bbox, "no classification rule matched");
                report.unclassified += 1;
            }
        }
    }
    info!(
        components = components.len(),
        noise = report.noise_filtered,
        non_rectangular = report.non_rectangular,
        unclassified = report.unclassified,
        "detection pass finished"
    );

    let outcome = deduplicate(components, &config.dedup_options());
    report.duplicates_removed = outcome.suppressed.len();
    for component in &outcome.kept {
        *report.type_counts.entry(component.component_type).or_insert(0) += 1;
    }
    info!(
        removed = report.duplicates_removed,
        remaining = outcome.kept.len(),
        types = ?report.type_counts,
        "duplicate filtering finished"
    );

    Detection {
        components: outcome.kept,
        report,
    }
}

/// Fuzz-only entrypoint: the first two bytes give the map size, the rest
/// are pixels.
#[cfg(feature = "fuzzing")]
pub fn fuzz_detect_edge_map(data: &[u8]) -> Detection {
    let (width, height) = match data {
        [w, h, ..] => (u32::from(*w % 64) + 1, u32::from(*h % 64) + 1),
        _ => (1, 1),
    };
    let pixels = data.get(2..).unwrap_or_default();
    let edges = GrayImage::from_fn(width, height, |x, y| {
        let i = (y * width + x) as usize;
        image::Luma([pixels.get(i).copied().unwrap_or(0)])
    });
    detect_in_edge_map(&edges, &DetectorConfig::default())
}

enum Candidate {
    Component(BBox, ComponentType),
    Noise,
    NonRectangular,
    Unclassified(BBox),
}

fn examine_contour(contour: &Contour<i32>, config: &DetectorConfig) -> Candidate {
    let Some(polygon) = simplify(&contour.points, config.approx_epsilon_ratio) else {
        return Candidate::Noise;
    };
    let Some(bbox) = bounding_box(&polygon) else {
        return Candidate::Noise;
    };

    if !config.passes_noise_floor(bbox.area()) {
        return Candidate::Noise;
    }
    if polygon.len() != 4 {
        return Candidate::NonRectangular;
    }

    match config.rules.classify_bbox(&bbox) {
        Some(component_type) => Candidate::Component(bbox, component_type),
        None => Candidate::Unclassified(bbox),
    }
}

/// Simplifies a closed contour. Returns `None` for degenerate contours.
fn simplify(points: &[Point<i32>], epsilon_ratio: f64) -> Option<Vec<Point<i32>>> {
    if points.len() < 3 {
        return None;
    }
    let epsilon = epsilon_ratio * arc_length(points, true);
    if epsilon <= 0.0 {
        return None;
    }

    let mut polygon = approximate_polygon_dp(points, epsilon, true);
    if polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    Some(polygon)
}

/// Tightest box around a set of pixel points (inclusive extents).
fn bounding_box(points: &[Point<i32>]) -> Option<BBox> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BBox::from_extents(min_x, min_y, max_x, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Draws a filled axis-aligned band `thickness` pixels wide around the rectangle.
    fn draw_outline(image: &mut GrayImage, bbox: BBox, thickness: i32) {
        for y in bbox.y..bbox.bottom() {
            for x in bbox.x..bbox.right() {
                let inside = x >= bbox.x + thickness
                    && x < bbox.right() - thickness
                    && y >= bbox.y + thickness
                    && y < bbox.bottom() - thickness;
                if !inside {
                    image.put_pixel(x as u32, y as u32, Luma([255]));
                }
            }
        }
    }

    #[test]
    fn test_empty_edge_map_yields_nothing() {
        let edges = GrayImage::new(100, 100);
        let detection = detect_in_edge_map(&edges, &DetectorConfig::default());
        assert!(detection.components.is_empty());
        assert_eq!(detection.report.raw_contours, 0);
    }

    #[test]
    fn test_outline_band_becomes_one_input() {
        let mut edges = GrayImage::new(320, 120);
        draw_outline(&mut edges, BBox::new(20, 30, 240, 40), 3);

        let detection = detect_in_edge_map(&edges, &DetectorConfig::default());

        // Outer and inner boundary of the band are the same element.
        assert_eq!(detection.components.len(), 1);
        let component = &detection.components[0];
        assert_eq!(component.component_type, ComponentType::Input);
        assert_eq!(component.bbox, BBox::new(20, 30, 240, 40));
        assert_eq!(detection.report.duplicates_removed, 1);
        assert!(detection.report.nested_contours >= 1);
    }

    #[test]
    fn test_heavy_stroke_inner_contour_is_contained() {
        let mut edges = GrayImage::new(200, 120);
        draw_outline(&mut edges, BBox::new(20, 20, 100, 50), 6);

        let detection = detect_in_edge_map(&edges, &DetectorConfig::default());

        // Inner boundary 90x40 against 100x50 is below the IoU threshold.
        assert_eq!(detection.components.len(), 1);
        assert_eq!(detection.components[0].component_type, ComponentType::Button);
        assert_eq!(detection.components[0].bbox, BBox::new(20, 20, 100, 50));
        assert_eq!(detection.report.duplicates_removed, 1);
    }

    #[test]
    fn test_small_square_is_noise() {
        let mut edges = GrayImage::new(100, 100);
        // 20x20 = 400 < 500.
        draw_outline(&mut edges, BBox::new(10, 10, 20, 20), 2);

        let detection = detect_in_edge_map(&edges, &DetectorConfig::default());
        assert!(detection.components.is_empty());
        assert!(detection.report.noise_filtered >= 1);
    }

    #[test]
    fn test_noise_floor_boundary() {
        let config = DetectorConfig::default();
        assert!(!config.passes_noise_floor(499));
        assert!(config.passes_noise_floor(500));
    }

    #[test]
    fn test_separate_shapes_numbered_in_order() {
        let mut edges = GrayImage::new(400, 200);
        draw_outline(&mut edges, BBox::new(20, 20, 40, 40), 2);
        draw_outline(&mut edges, BBox::new(100, 20, 240, 40), 2);

        let detection = detect_in_edge_map(&edges, &DetectorConfig::default());
        let types: Vec<ComponentType> = detection
            .components
            .iter()
            .map(|c| c.component_type)
            .collect();
        assert_eq!(types.len(), 2);
        assert!(types.contains(&ComponentType::Checkbox));
        assert!(types.contains(&ComponentType::Input));

        let ids: Vec<&str> = detection.components.iter().map(|c| c.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_bounding_box_is_inclusive() {
        let points = [Point::new(2, 3), Point::new(11, 3), Point::new(11, 7), Point::new(2, 7)];
        assert_eq!(bounding_box(&points), Some(BBox::new(2, 3, 10, 5)));
        assert_eq!(bounding_box(&[]), None);
    }

    #[test]
    fn test_simplify_square_to_four_corners() {
        let mut points = Vec::new();
        for x in 0..20 {
            points.push(Point::new(x, 0));
        }
        for y in 1..20 {
            points.push(Point::new(19, y));
        }
        for x in (0..19).rev() {
            points.push(Point::new(x, 19));
        }
        for y in (1..19).rev() {
            points.push(Point::new(0, y));
        }

        let polygon = simplify(&points, 0.04).unwrap();
        assert_eq!(polygon.len(), 4);
    }
}
