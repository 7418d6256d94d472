//! Shared primitive types and compile-time limits.

/// Numeric parameter identifier (FNV-1a hash of the string id).
pub type ParameterId = u32;

/// Parameter value. Normalized values are in `0.0..=1.0`.
pub type ParameterValue = f64;

/// Maximum channels per bus accepted by layout negotiation.
pub const MAX_CHANNELS: usize = 32;

/// Size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Clamp this size between `min` and `max` (per axis).
    pub fn clamp(self, min: Size, max: Size) -> Self {
        Self {
            width: self.width.clamp(min.width, max.width.max(min.width)),
            height: self.height.clamp(min.height, max.height.max(min.height)),
        }
    }
}

/// Rectangle in pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width as i32, size.height as i32)
    }

    /// Same size, moved to the origin (the "local bounds" of a component).
    pub const fn local(&self) -> Self {
        Self::new(0, 0, self.width, self.height)
    }

    /// Centre point (x, y).
    pub const fn centre(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether the rectangle has no area.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_local_and_centre() {
        let r = Rect::new(10, 20, 400, 300);
        assert_eq!(r.local(), Rect::new(0, 0, 400, 300));
        assert_eq!(r.centre(), (210, 170));
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 10).is_empty());
    }

    #[test]
    fn test_size_clamp() {
        let min = Size::new(200, 150);
        let max = Size::new(800, 600);
        assert_eq!(Size::new(100, 1000).clamp(min, max), Size::new(200, 600));
        assert_eq!(Size::new(400, 300).clamp(min, max), Size::new(400, 300));
    }
}
