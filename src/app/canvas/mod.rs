//! Software drawing surface
//!
//! The session draws into a CPU-side RGBA buffer; the platform uploads the
//! finished buffer on `present`. Shapes are alpha-blended over the existing
//! contents and clipped to the surface bounds.

mod ellipse;
mod line;

/// 8-bit RGBA color, laid out for direct upload to an `Rgba8UnormSrgb` texture
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha (0 = transparent, 255 = opaque)
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns this color drawn over `dst`
    pub fn over(self, dst: Color) -> Color {
        match self.a {
            255 => self,
            0 => dst,
            a => Color {
                r: blend_channel(self.r, dst.r, a),
                g: blend_channel(self.g, dst.g, a),
                b: blend_channel(self.b, dst.b, a),
                a: (a as u32 + (dst.a as u32 * (255 - a as u32) + 127) / 255) as u8,
            },
        }
    }
}

fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let (s, d, a) = (src as u32, dst as u32, alpha as u32);
    ((s * a + d * (255 - a) + 127) / 255) as u8
}

/// Fixed-size pixel buffer owned by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a black canvas of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels, top-left first
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA bytes, `4 * width` bytes per row
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Returns the pixel at (x, y), or `None` outside the canvas
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    /// Sets every pixel to the opaque version of `color`
    pub fn fill(&mut self, color: Color) {
        let color = Color { a: 255, ..color };
        self.pixels.fill(color);
    }

    /// Draws a solid ellipse centred on (x, y)
    pub fn fill_ellipse(&mut self, x: i32, y: i32, rx: i32, ry: i32, color: Color) {
        ellipse::filled(self, x as i64, y as i64, rx as i64, ry as i64, color);
    }

    /// Draws a one-pixel ellipse outline centred on (x, y)
    pub fn stroke_ellipse(&mut self, x: i32, y: i32, rx: i32, ry: i32, color: Color) {
        ellipse::outline(self, x as i64, y as i64, rx as i64, ry as i64, color);
    }

    /// Draws a one-pixel line, both endpoints included
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        line::segment(
            self,
            (x1 as i64, y1 as i64),
            (x2 as i64, y2 as i64),
            color,
        );
    }

    /// Draws the outline of the triangle through three vertices
    #[allow(clippy::too_many_arguments)]
    pub fn stroke_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Color,
    ) {
        self.line(x1, y1, x2, y2, color);
        self.line(x2, y2, x3, y3, color);
        self.line(x3, y3, x1, y1, color);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub(crate) fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Horizontal span from x1 to x2 inclusive, clipped to the canvas
    pub(crate) fn hline(&mut self, x1: i64, x2: i64, y: i64, color: Color) {
        if y < 0 || y >= self.height as i64 || self.width == 0 {
            return;
        }
        let (left, right) = (x1.min(x2).max(0), x1.max(x2).min(self.width as i64 - 1));
        if left > right {
            return;
        }
        let row = y as usize * self.width as usize;
        for px in &mut self.pixels[row + left as usize..=row + right as usize] {
            *px = color.over(*px);
        }
    }

    /// Vertical span from y1 to y2 inclusive, clipped to the canvas
    pub(crate) fn vline(&mut self, x: i64, y1: i64, y2: i64, color: Color) {
        let (top, bottom) = (y1.min(y2).max(0), y1.max(y2).min(self.height as i64 - 1));
        for y in top..=bottom {
            self.blend_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(canvas: &Canvas, color: Color) -> usize {
        canvas.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_new_canvas_is_black() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.pixels().len(), 12);
        assert_eq!(canvas.as_bytes().len(), 48);
        assert_eq!(count(&canvas, Color::BLACK), 12);
    }

    #[test]
    fn test_fill_is_opaque_and_idempotent() {
        let mut once = Canvas::new(8, 8);
        once.fill(Color::rgba(10, 20, 30, 40));

        let mut twice = once.clone();
        twice.fill(Color::rgba(10, 20, 30, 40));

        assert_eq!(once, twice);
        assert_eq!(once.pixel(3, 3), Some(Color::rgb(10, 20, 30)));
    }

    #[test]
    fn test_blending() {
        let dst = Color::rgb(0, 0, 0);
        assert_eq!(Color::rgba(255, 0, 0, 255).over(dst), Color::rgb(255, 0, 0));
        assert_eq!(Color::rgba(255, 0, 0, 0).over(dst), dst);

        let half = Color::rgba(255, 255, 255, 128).over(dst);
        assert_eq!(half.r, 128);
        assert_eq!(half.a, 255);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let canvas = Canvas::new(2, 2);
        assert_eq!(canvas.pixel(-1, 0), None);
        assert_eq!(canvas.pixel(2, 0), None);
        assert_eq!(canvas.pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_triangle_outline() {
        let mut canvas = Canvas::new(20, 20);
        canvas.stroke_triangle(2, 2, 15, 2, 2, 15, Color::WHITE);

        // Vertices and edge midpoints lit, interior untouched
        assert_eq!(canvas.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(15, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(2, 15), Some(Color::WHITE));
        assert_eq!(canvas.pixel(8, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(2, 8), Some(Color::WHITE));
        assert_eq!(canvas.pixel(5, 5), Some(Color::BLACK));
    }

    #[test]
    fn test_shapes_clip_to_canvas() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_ellipse(-5, -5, 8, 8, Color::WHITE);
        canvas.stroke_ellipse(50, 50, 3, 3, Color::WHITE);
        canvas.line(-100, 5, 100, 5, Color::WHITE);

        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(9, 5), Some(Color::WHITE));
        assert_eq!(canvas.pixel(9, 9), Some(Color::BLACK));
    }

    #[test]
    fn test_triangle_with_distant_vertices() {
        let mut canvas = Canvas::new(10, 10);
        canvas.stroke_triangle(
            -1_000_000_000,
            -999_999_999,
            1_000_000_000,
            1_000_000_001,
            5,
            5,
            Color::WHITE,
        );

        // The long edge runs along y = x + 1
        assert_eq!(canvas.pixel(0, 1), Some(Color::WHITE));
        assert_eq!(canvas.pixel(8, 9), Some(Color::WHITE));
        assert_eq!(canvas.pixel(5, 5), Some(Color::WHITE));
        assert_eq!(canvas.pixel(9, 0), Some(Color::BLACK));
    }
}
