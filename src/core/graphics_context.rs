use image::{imageops, Rgba, RgbaImage};

use super::geometry::Point;

/// 2D drawing operations for a graphics context
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    /// Fill the entire context with a color
    Clear(Rgba<u8>),

    /// Set the pixel at (x, y)
    Pixel { x: i32, y: i32, color: Rgba<u8> },

    /// Filled rectangle
    Rect { x: i32, y: i32, width: u32, height: u32, color: Rgba<u8> },

    /// One-pixel rectangle outline
    Outline { x: i32, y: i32, width: u32, height: u32, color: Rgba<u8> },

    /// Line from (x1, y1) to (x2, y2)
    Line { x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba<u8> },
}

/// Off-screen drawable surface backed by a straight-alpha RGBA image
#[derive(Debug, Clone)]
pub struct GraphicsContext {
    image: RgbaImage,
}

impl GraphicsContext {
    /// Create a transparent context of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Create a context filled with `color`
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color),
        }
    }

    /// Current pixels
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the context, keeping its pixels
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Execute a single draw operation
    pub fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::Clear(color) => self.clear(color),
            DrawOp::Pixel { x, y, color } => self.set_pixel(x, y, color),
            DrawOp::Rect { x, y, width, height, color } => self.fill_rect(x, y, width, height, color),
            DrawOp::Outline { x, y, width, height, color } => {
                self.stroke_rect(x, y, width, height, color)
            }
            DrawOp::Line { x1, y1, x2, y2, color } => self.draw_line(x1, y1, x2, y2, color),
        }
    }

    /// Source-over blend `source` with its top-left corner at `at`
    pub fn blend_image(&mut self, source: &RgbaImage, at: Point) {
        imageops::overlay(&mut self.image, source, at.x as i64, at.y as i64);
    }

    /// Reallocate to a new size, discarding all pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }
        self.image.put_pixel(x, y, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba<u8>) {
        let (img_w, img_h) = self.image.dimensions();
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x + width as i32).clamp(0, img_w as i32) as u32;
        let y1 = (y + height as i32).clamp(0, img_h as i32) as u32;

        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px, py, color);
            }
        }
    }

    fn stroke_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba<u8>) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width as i32 - 1;
        let bottom = y + height as i32 - 1;
        self.draw_line(x, y, right, y, color);
        self.draw_line(x, bottom, right, bottom, color);
        self.draw_line(x, y, x, bottom, color);
        self.draw_line(right, y, right, bottom, color);
    }

    /// Bresenham line
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba<u8>) {
        let (mut x, mut y) = (x1, y1);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl From<RgbaImage> for GraphicsContext {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_new_context_is_transparent() {
        let ctx = GraphicsContext::new(4, 3);
        assert_eq!(ctx.dimensions(), (4, 3));
        assert!(ctx.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_clear_fills_everything() {
        let mut ctx = GraphicsContext::new(8, 8);
        ctx.draw(DrawOp::Clear(RED));
        assert!(ctx.image().pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_pixel_out_of_bounds_is_ignored() {
        let mut ctx = GraphicsContext::new(10, 10);
        ctx.draw(DrawOp::Pixel { x: -1, y: 3, color: RED });
        ctx.draw(DrawOp::Pixel { x: 100, y: 100, color: RED });
        assert!(ctx.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_rect_is_clipped() {
        let mut ctx = GraphicsContext::new(10, 10);
        ctx.draw(DrawOp::Rect { x: 8, y: -2, width: 5, height: 4, color: BLUE });

        assert_eq!(*ctx.image().get_pixel(8, 0), BLUE);
        assert_eq!(*ctx.image().get_pixel(9, 1), BLUE);
        assert_eq!(ctx.image().get_pixel(9, 2).0, [0, 0, 0, 0]);
        assert_eq!(ctx.image().get_pixel(7, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_outline_leaves_interior() {
        let mut ctx = GraphicsContext::new(10, 10);
        ctx.draw(DrawOp::Outline { x: 0, y: 0, width: 5, height: 5, color: RED });

        assert_eq!(*ctx.image().get_pixel(0, 0), RED);
        assert_eq!(*ctx.image().get_pixel(4, 4), RED);
        assert_eq!(*ctx.image().get_pixel(4, 0), RED);
        assert_eq!(ctx.image().get_pixel(2, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_diagonal_line() {
        let mut ctx = GraphicsContext::new(5, 5);
        ctx.draw(DrawOp::Line { x1: 0, y1: 0, x2: 4, y2: 4, color: RED });
        for i in 0..5 {
            assert_eq!(*ctx.image().get_pixel(i, i), RED);
        }
    }

    #[test]
    fn test_blend_opaque_source_replaces() {
        let mut ctx = GraphicsContext::filled(4, 4, RED);
        let source = RgbaImage::from_pixel(2, 2, BLUE);
        ctx.blend_image(&source, Point::new(1, 1));

        assert_eq!(*ctx.image().get_pixel(0, 0), RED);
        assert_eq!(*ctx.image().get_pixel(1, 1), BLUE);
        assert_eq!(*ctx.image().get_pixel(2, 2), BLUE);
        assert_eq!(*ctx.image().get_pixel(3, 3), RED);
    }

    #[test]
    fn test_blend_transparent_source_keeps_destination() {
        let mut ctx = GraphicsContext::filled(2, 2, RED);
        let source = RgbaImage::new(2, 2);
        ctx.blend_image(&source, Point::new(0, 0));
        assert!(ctx.image().pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_blend_partially_offscreen() {
        let mut ctx = GraphicsContext::filled(3, 3, RED);
        let source = RgbaImage::from_pixel(3, 3, BLUE);
        ctx.blend_image(&source, Point::new(-2, 2));

        assert_eq!(*ctx.image().get_pixel(0, 2), BLUE);
        assert_eq!(*ctx.image().get_pixel(1, 2), RED);
        assert_eq!(*ctx.image().get_pixel(0, 1), RED);
    }
}
