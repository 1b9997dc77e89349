//! Rule-table classification of rectangular candidates.
//!
//! Each rule pairs a component type with open intervals on area, aspect
//! ratio (width / height) and height. Rules are evaluated in table order and
//! the first match wins; a candidate matching no rule is unclassifiable.
//!
//! The default table:
//!
//! | type      | area          | aspect ratio | height |
//! |-----------|---------------|--------------|--------|
//! | checkbox  | (200, 2000)   | (0.8, 1.2)   |        |
//! | input     |               | > 2.5        | < 60   |
//! | button    | < 20000       | (1.5, 4.0)   | > 30   |
//! | container | > 40000       |              |        |

use serde::{Deserialize, Serialize};

use crate::ir::{BBox, ComponentType};

/// An open interval; a missing end is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Exclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<f64>,
    /// Exclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<f64>,
}

impl Bounds {
    /// Matches every value.
    pub const ANY: Bounds = Bounds {
        above: None,
        below: None,
    };

    pub const fn between(above: f64, below: f64) -> Self {
        Self {
            above: Some(above),
            below: Some(below),
        }
    }

    pub const fn above(above: f64) -> Self {
        Self {
            above: Some(above),
            below: None,
        }
    }

    pub const fn below(below: f64) -> Self {
        Self {
            above: None,
            below: Some(below),
        }
    }

    /// Returns true if `value` lies strictly inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        self.above.is_none_or(|lo| value > lo) && self.below.is_none_or(|hi| value < hi)
    }
}

/// Geometry the classifier looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeMetrics {
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub aspect_ratio: f64,
}

impl ShapeMetrics {
    pub fn from_bbox(bbox: &BBox) -> Self {
        Self {
            width: bbox.width as f64,
            height: bbox.height as f64,
            area: bbox.area() as f64,
            aspect_ratio: bbox.aspect_ratio(),
        }
    }
}

/// One row of the classification table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub area: Bounds,
    #[serde(default)]
    pub aspect_ratio: Bounds,
    #[serde(default)]
    pub height: Bounds,
}

impl ClassificationRule {
    pub fn matches(&self, metrics: &ShapeMetrics) -> bool {
        self.area.contains(metrics.area)
            && self.aspect_ratio.contains(metrics.aspect_ratio)
            && self.height.contains(metrics.height)
    }
}

/// Ordered classification table. First match wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationRules(pub Vec<ClassificationRule>);

impl Default for ClassificationRules {
    fn default() -> Self {
        Self(vec![
            ClassificationRule {
                component_type: ComponentType::Checkbox,
                area: Bounds::between(200.0, 2000.0),
                aspect_ratio: Bounds::between(0.8, 1.2),
                height: Bounds::ANY,
            },
            ClassificationRule {
                component_type: ComponentType::Input,
                area: Bounds::ANY,
                aspect_ratio: Bounds::above(2.5),
                height: Bounds::below(60.0),
            },
            ClassificationRule {
                component_type: ComponentType::Button,
                area: Bounds::below(20000.0),
                aspect_ratio: Bounds::between(1.5, 4.0),
                height: Bounds::above(30.0),
            },
            ClassificationRule {
                component_type: ComponentType::Container,
                area: Bounds::above(40000.0),
                aspect_ratio: Bounds::ANY,
                height: Bounds::ANY,
            },
        ])
    }
}

impl ClassificationRules {
    /// Returns the type of the first matching rule.
    pub fn classify(&self, metrics: &ShapeMetrics) -> Option<ComponentType> {
        self.0
            .iter()
            .find(|rule| rule.matches(metrics))
            .map(|rule| rule.component_type)
    }

    /// Classifies a bounding box with this table.
    pub fn classify_bbox(&self, bbox: &BBox) -> Option<ComponentType> {
        self.classify(&ShapeMetrics::from_bbox(bbox))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(area: f64, aspect_ratio: f64, height: f64) -> ShapeMetrics {
        ShapeMetrics {
            width: aspect_ratio * height,
            height,
            area,
            aspect_ratio,
        }
    }

    fn classify(area: f64, aspect_ratio: f64, height: f64) -> Option<ComponentType> {
        ClassificationRules::default().classify(&metrics(area, aspect_ratio, height))
    }

    #[test]
    fn test_reference_shapes() {
        assert_eq!(classify(1500.0, 1.0, 38.0), Some(ComponentType::Checkbox));
        assert_eq!(classify(1500.0, 3.0, 40.0), Some(ComponentType::Input));
        assert_eq!(classify(15000.0, 2.0, 50.0), Some(ComponentType::Button));
        assert_eq!(classify(50000.0, 1.0, 224.0), Some(ComponentType::Container));
    }

    #[test]
    fn test_precedence_checkbox_before_others() {
        // Square and small: the checkbox rule is checked first.
        assert_eq!(classify(900.0, 1.0, 30.0), Some(ComponentType::Checkbox));
    }

    #[test]
    fn test_precedence_input_before_button() {
        // Aspect 3.0 and height 45 satisfies both input and button.
        assert_eq!(classify(6075.0, 3.0, 45.0), Some(ComponentType::Input));
    }

    #[test]
    fn test_bounds_are_exclusive() {
        assert_eq!(classify(2000.0, 1.0, 44.0), None);
        assert_eq!(classify(1999.0, 1.0, 44.0), Some(ComponentType::Checkbox));
        assert_eq!(classify(40000.0, 1.0, 200.0), None);
        assert_eq!(classify(40001.0, 1.0, 200.0), Some(ComponentType::Container));
        // Tall input: aspect > 2.5 but height 60 is not < 60, and too wide for a button.
        assert_eq!(classify(30000.0, 5.0, 60.0), None);
    }

    #[test]
    fn test_unclassifiable_mid_size_square() {
        assert_eq!(classify(10000.0, 1.0, 100.0), None);
    }

    #[test]
    fn test_classify_bbox() {
        let rules = ClassificationRules::default();
        assert_eq!(
            rules.classify_bbox(&BBox::new(0, 0, 240, 40)),
            Some(ComponentType::Input)
        );
        assert_eq!(
            rules.classify_bbox(&BBox::new(0, 0, 30, 30)),
            Some(ComponentType::Checkbox)
        );
    }

    #[test]
    fn test_rules_load_from_yaml() {
        let yaml = r#"
- type: button
  aspect_ratio: { above: 1.0 }
- type: container
"#;
        let rules: ClassificationRules = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules.0.len(), 2);
        assert_eq!(
            rules.classify(&metrics(100.0, 2.0, 7.0)),
            Some(ComponentType::Button)
        );
        assert_eq!(
            rules.classify(&metrics(100.0, 0.5, 14.0)),
            Some(ComponentType::Container)
        );
    }
}
