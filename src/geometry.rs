//! Axis-aligned bounding boxes.

/// A box spanning `[min_x, max_x] × [min_y, max_y]` in field pixels
/// (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    /// Box with its top-left corner at `(x, y)`.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Aabb {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// True unless the boxes are strictly separated on either axis.
/// Touching edges count as a collision.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    !(a.min_y > b.max_y || a.max_y < b.min_y || a.min_x > b.max_x || a.max_x < b.min_x)
}
