use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.bottom()
    }
}

/// The visible window onto the page, in page coordinates.
///
/// `y` is the vertical scroll offset: the page coordinate currently at the
/// top edge of the window. Renderers translate page-space commands by `-y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(y: f64, width: f64, height: f64) -> Self {
        Self { y, width, height }
    }

    /// Fraction of `rect`'s area currently inside the viewport, in `0.0..=1.0`.
    ///
    /// This is the intersection geometry the reveal latch observes. A rect
    /// with zero height reports 0.0 rather than dividing by zero.
    pub fn intersection_ratio(&self, rect: &Rect) -> f64 {
        if rect.h <= 0.0 || rect.w <= 0.0 {
            return 0.0;
        }
        let top = rect.y.max(self.y);
        let bottom = rect.bottom().min(self.y + self.height);
        if bottom <= top {
            return 0.0;
        }
        // Horizontal extent is always fully visible on a single-column page,
        // so the ratio reduces to visible height over total height.
        (bottom - top) / rect.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_zero_when_fully_outside() {
        let vp = Viewport::new(0.0, 800.0, 600.0);
        let below = Rect::new(0.0, 700.0, 800.0, 200.0);
        assert_eq!(vp.intersection_ratio(&below), 0.0);
    }

    #[test]
    fn ratio_is_one_when_fully_inside() {
        let vp = Viewport::new(100.0, 800.0, 600.0);
        let rect = Rect::new(0.0, 200.0, 800.0, 100.0);
        assert!((vp.intersection_ratio(&rect) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_for_partial_overlap() {
        let vp = Viewport::new(0.0, 800.0, 600.0);
        // 50 of 200 page units visible at the bottom edge.
        let rect = Rect::new(0.0, 550.0, 800.0, 200.0);
        assert!((vp.intersection_ratio(&rect) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn degenerate_rect_reports_zero() {
        let vp = Viewport::new(0.0, 800.0, 600.0);
        let empty = Rect::new(0.0, 100.0, 800.0, 0.0);
        assert_eq!(vp.intersection_ratio(&empty), 0.0);
    }
}
