//! Axis-aligned bounding boxes in XYWH form.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in XYWH format (left, top, width, height).
///
/// Coordinates are integer pixels for image-sourced components and integer
/// canvas units for canvas-sourced ones. The constructor does not enforce
/// positive dimensions; use [`BBox::is_valid`] where that matters, so that
/// readers can report bad shapes instead of panicking on them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BBox {
    /// Creates a new bounding box from its top-left corner and size.
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the tightest box covering the given inclusive point range.
    #[inline]
    pub fn from_extents(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    /// Returns the exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns the area of the box.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Returns width divided by height, or 0.0 for a degenerate box.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    /// Returns the vertical center.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y as f64 + self.height as f64 / 2.0
    }

    /// Returns true if both dimensions are strictly positive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns the area shared by two boxes (0 if they do not overlap).
    pub fn intersection_area(&self, other: &BBox) -> i64 {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return 0;
        }
        (right - left) as i64 * (bottom - top) as i64
    }

    /// Intersection over union of two boxes.
    ///
    /// Returns 0.0 when the union is empty.
    pub fn iou(&self, other: &BBox) -> f64 {
        let intersection = self.intersection_area(other);
        let union = self.area() + other.area() - intersection;
        if union <= 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }

    /// Returns a copy grown by `margin` on every side and clipped to
    /// `[0, max_width) x [0, max_height)`.
    pub fn expand_clamped(&self, margin: i32, max_width: u32, max_height: u32) -> BBox {
        let max_w = max_width.min(i32::MAX as u32) as i32;
        let max_h = max_height.min(i32::MAX as u32) as i32;
        let left = (self.x - margin).clamp(0, max_w);
        let top = (self.y - margin).clamp(0, max_h);
        let right = (self.right() + margin).clamp(0, max_w);
        let bottom = (self.bottom() + margin).clamp(0, max_h);
        BBox::new(left, top, right - left, bottom - top)
    }

    /// Returns the box as an `(x, y, width, height)` tuple.
    #[inline]
    pub fn to_xywh(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.width, self.height)
    }
}

impl std::fmt::Debug for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBox")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("w", &self.width)
            .field("h", &self.height)
            .finish()
    }
}

// Serialized as a bare [x, y, width, height] array, which is what the
// response payload and the canvas client both use.
impl Serialize for BBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y, self.width, self.height].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BBox {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BBoxData {
            Array([i32; 4]),
            Object {
                x: i32,
                y: i32,
                width: i32,
                height: i32,
            },
        }
        let data = BBoxData::deserialize(deserializer)?;
        Ok(match data {
            BBoxData::Array([x, y, width, height]) => BBox::new(x, y, width, height),
            BBoxData::Object {
                x,
                y,
                width,
                height,
            } => BBox::new(x, y, width, height),
        })
    }
}
