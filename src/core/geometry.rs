/// Point in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Computed widget box (top, left, width, height) in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxRect {
    pub top: i32,
    pub left: i32,
    pub width: u32,
    pub height: u32,
}

impl BoxRect {
    pub fn new(top: i32, left: i32, width: u32, height: u32) -> Self {
        Self { top, left, width, height }
    }

    /// Box anchored at the origin
    pub fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Coordinates in (top, left, width, height) order
    pub fn coords(&self) -> (i32, i32, u32, u32) {
        (self.top, self.left, self.width, self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }

    /// Half-open containment test: left/top edges inclusive, right/bottom exclusive
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left as f64
            && x < self.right() as f64
            && y >= self.top as f64
            && y < self.bottom() as f64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Device-pixel size of a logical extent: `round(logical × scale)`
pub fn scale_size(logical: f64, scale: f64) -> u32 {
    (logical * scale).round().max(0.0) as u32
}
