//! Duplicate suppression for detected components.
//!
//! Thick pen strokes give the contour tracer two boundaries per shape (the
//! outside and the inside of the stroke), so the same element is usually
//! detected twice. When the stroke is thin the two boxes overlap above the
//! IoU threshold; when it is thick the inner box falls below it and is
//! caught by the containment test instead. Suppression is greedy:
//! candidates are visited from largest to smallest area (earlier detection
//! first on ties) and each one is kept only if it does not overlap any
//! already-kept box by more than the IoU threshold.
//!
//! Because every kept box was checked against every larger kept box, the
//! kept set has no pair above the threshold, and running the pass again
//! removes nothing. Three or more mutually overlapping boxes therefore
//! collapse onto the largest; boxes that only overlap a suppressed box
//! survive.

use serde::Serialize;
use tracing::debug;

use crate::ir::{Component, ComponentId};

/// Options for duplicate suppression.
#[derive(Clone, Debug, PartialEq)]
pub struct DedupOptions {
    /// Boxes with IoU strictly above this are duplicates.
    pub iou_threshold: f64,
    /// Also drop boxes mostly contained in a larger kept box.
    pub suppress_contained: bool,
    /// Share of the smaller box that must lie inside the larger one.
    pub containment_ratio: f64,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            iou_threshold: 0.75,
            suppress_contained: true,
            containment_ratio: 0.80,
        }
    }
}

/// Why a component was suppressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionReason {
    Overlap,
    Contained,
}

/// Record of one suppressed component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Suppression {
    pub removed: ComponentId,
    pub kept: ComponentId,
    pub iou: f64,
    pub reason: SuppressionReason,
}

/// Result of a deduplication pass.
#[derive(Clone, Debug, Default)]
pub struct DedupOutcome {
    /// Survivors, in their original order.
    pub kept: Vec<Component>,
    pub suppressed: Vec<Suppression>,
}

// Same-typed boxes nested inside each other are usually the two sides of
// one stroke; differently typed ones may be a real element inside a card.
const SAME_TYPE_SIZE_RATIO: f64 = 0.4;
const OTHER_TYPE_SIZE_RATIO: f64 = 0.85;

/// Removes duplicate detections.
///
/// The survivors keep their input order.
pub fn deduplicate(components: Vec<Component>, opts: &DedupOptions) -> DedupOutcome {
    let mut order: Vec<usize> = (0..components.len()).collect();
    order.sort_by(|&a, &b| {
        components[b]
            .bbox
            .area()
            .cmp(&components[a].bbox.area())
            .then(a.cmp(&b))
    });

    let mut kept_indices: Vec<usize> = Vec::with_capacity(components.len());
    let mut suppressed = Vec::new();

    for idx in order {
        let candidate = &components[idx];
        match find_absorber(candidate, &kept_indices, &components, opts) {
            Some(suppression) => {
                debug!(
                    removed = %suppression.removed,
                    kept = %suppression.kept,
                    iou = suppression.iou,
                    reason = ?suppression.reason,
                    "suppressed duplicate component"
                );
                suppressed.push(suppression);
            }
            None => kept_indices.push(idx),
        }
    }

    kept_indices.sort_unstable();
    let mut slots: Vec<Option<Component>> = components.into_iter().map(Some).collect();
    let kept = kept_indices
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect();

    DedupOutcome { kept, suppressed }
}

fn find_absorber(
    candidate: &Component,
    kept_indices: &[usize],
    components: &[Component],
    opts: &DedupOptions,
) -> Option<Suppression> {
    let candidate_area = candidate.bbox.area();

    for &kept_idx in kept_indices {
        let kept = &components[kept_idx];
        let iou = candidate.bbox.iou(&kept.bbox);

        if iou > opts.iou_threshold {
            return Some(Suppression {
                removed: candidate.id.clone(),
                kept: kept.id.clone(),
                iou,
                reason: SuppressionReason::Overlap,
            });
        }

        if !opts.suppress_contained || candidate_area <= 0 {
            continue;
        }

        let kept_area = kept.bbox.area();
        let intersection = candidate.bbox.intersection_area(&kept.bbox);
        if (intersection as f64) < opts.containment_ratio * candidate_area as f64 {
            continue;
        }

        let size_ratio = if kept_area > 0 {
            candidate_area as f64 / kept_area as f64
        } else {
            0.0
        };
        let limit = if candidate.component_type == kept.component_type {
            SAME_TYPE_SIZE_RATIO
        } else {
            OTHER_TYPE_SIZE_RATIO
        };
        if size_ratio > limit {
            return Some(Suppression {
                removed: candidate.id.clone(),
                kept: kept.id.clone(),
                iou,
                reason: SuppressionReason::Contained,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BBox, ComponentType};

    fn comp(id: &str, component_type: ComponentType, bbox: BBox) -> Component {
        Component::new(id, component_type, bbox)
    }

    fn ids(components: &[Component]) -> Vec<&str> {
        components.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_larger_of_overlapping_pair_survives() {
        // Areas 1000 and 1200, the smaller fully inside: IoU = 0.8333 > 0.75.
        let small = comp("comp_000", ComponentType::Input, BBox::new(0, 0, 40, 25));
        let large = comp("comp_001", ComponentType::Input, BBox::new(0, 0, 40, 30));

        let outcome = deduplicate(vec![small, large], &DedupOptions::default());
        assert_eq!(ids(&outcome.kept), vec!["comp_001"]);
        assert_eq!(outcome.suppressed.len(), 1);
        assert_eq!(outcome.suppressed[0].removed.as_str(), "comp_000");
        assert_eq!(outcome.suppressed[0].kept.as_str(), "comp_001");
        assert_eq!(outcome.suppressed[0].reason, SuppressionReason::Overlap);
    }

    #[test]
    fn test_iou_080_with_areas_1000_and_1200() {
        let a = comp("comp_000", ComponentType::Button, BBox::new(1, 0, 40, 25));
        let b = comp("comp_001", ComponentType::Button, BBox::new(0, 0, 40, 30));
        assert_eq!(a.bbox.area(), 1000);
        assert_eq!(b.bbox.area(), 1200);
        // 39 x 25 shared: 975 / 1225.
        assert!((a.bbox.iou(&b.bbox) - 0.80).abs() < 0.01);

        let outcome = deduplicate(vec![a, b], &DedupOptions::default());
        assert_eq!(ids(&outcome.kept), vec!["comp_001"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // IoU exactly 0.75: 300 / 400.
        let a = comp("comp_000", ComponentType::Button, BBox::new(0, 0, 20, 20));
        let b = comp("comp_001", ComponentType::Button, BBox::new(0, 0, 20, 15));
        assert_eq!(a.bbox.iou(&b.bbox), 0.75);

        let opts = DedupOptions {
            suppress_contained: false,
            ..Default::default()
        };
        let outcome = deduplicate(vec![a, b], &opts);
        assert_eq!(outcome.kept.len(), 2);
    }

    #[test]
    fn test_equal_area_tie_keeps_earliest() {
        let a = comp("comp_000", ComponentType::Button, BBox::new(0, 0, 100, 40));
        let b = comp("comp_001", ComponentType::Button, BBox::new(1, 0, 100, 40));

        let outcome = deduplicate(vec![a, b], &DedupOptions::default());
        assert_eq!(ids(&outcome.kept), vec!["comp_000"]);
    }

    #[test]
    fn test_survivors_keep_input_order() {
        let a = comp("comp_000", ComponentType::Checkbox, BBox::new(0, 0, 20, 20));
        let b = comp("comp_001", ComponentType::Container, BBox::new(0, 100, 300, 300));
        let c = comp("comp_002", ComponentType::Button, BBox::new(50, 0, 80, 40));

        let outcome = deduplicate(vec![a, b, c], &DedupOptions::default());
        assert_eq!(ids(&outcome.kept), vec!["comp_000", "comp_001", "comp_002"]);
        assert!(outcome.suppressed.is_empty());
    }

    #[test]
    fn test_three_mutual_overlaps_collapse_to_largest() {
        let a = comp("comp_000", ComponentType::Input, BBox::new(0, 0, 200, 40));
        let b = comp("comp_001", ComponentType::Input, BBox::new(2, 2, 196, 36));
        let c = comp("comp_002", ComponentType::Input, BBox::new(1, 1, 198, 38));

        let outcome = deduplicate(vec![a, b, c], &DedupOptions::default());
        assert_eq!(ids(&outcome.kept), vec!["comp_000"]);
        assert_eq!(outcome.suppressed.len(), 2);
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let components = vec![
            comp("comp_000", ComponentType::Input, BBox::new(0, 0, 200, 40)),
            comp("comp_001", ComponentType::Input, BBox::new(3, 3, 194, 34)),
            comp("comp_002", ComponentType::Button, BBox::new(0, 60, 100, 40)),
            comp("comp_003", ComponentType::Button, BBox::new(60, 60, 100, 40)),
        ];
        let first = deduplicate(components, &DedupOptions::default());
        let second = deduplicate(first.kept.clone(), &DedupOptions::default());
        assert_eq!(second.kept, first.kept);
        assert!(second.suppressed.is_empty());
    }

    #[test]
    fn test_inner_stroke_contour_is_contained() {
        // Outer and inner boundary of a 3px pen stroke: IoU is about 0.69.
        let outer = comp("comp_000", ComponentType::Input, BBox::new(40, 38, 242, 44));
        let inner = comp("comp_001", ComponentType::Input, BBox::new(45, 44, 231, 32));
        assert!(outer.bbox.iou(&inner.bbox) < 0.75);

        let outcome = deduplicate(vec![outer, inner], &DedupOptions::default());
        assert_eq!(ids(&outcome.kept), vec!["comp_000"]);
        assert_eq!(outcome.suppressed[0].reason, SuppressionReason::Contained);
    }

    #[test]
    fn test_containment_can_be_disabled() {
        let card = comp("comp_000", ComponentType::Container, BBox::new(0, 0, 300, 300));
        let inner = comp("comp_001", ComponentType::Container, BBox::new(20, 20, 260, 200));

        let outcome = deduplicate(vec![card.clone(), inner.clone()], &DedupOptions::default());
        assert_eq!(ids(&outcome.kept), vec!["comp_000"]);
        assert_eq!(outcome.suppressed[0].reason, SuppressionReason::Contained);

        let opts = DedupOptions {
            suppress_contained: false,
            ..Default::default()
        };
        let outcome = deduplicate(vec![card, inner], &opts);
        assert_eq!(outcome.kept.len(), 2);
    }

    #[test]
    fn test_containment_keeps_small_element_of_other_type() {
        let opts = DedupOptions::default();
        let card = comp("comp_000", ComponentType::Container, BBox::new(0, 0, 300, 300));
        let button = comp("comp_001", ComponentType::Button, BBox::new(20, 20, 100, 40));

        let outcome = deduplicate(vec![card, button], &opts);
        assert_eq!(outcome.kept.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let outcome = deduplicate(Vec::new(), &DedupOptions::default());
        assert!(outcome.kept.is_empty());
        assert!(outcome.suppressed.is_empty());
    }
}
