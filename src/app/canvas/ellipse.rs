//! Axis-aligned ellipse rasterization
//!
//! Negative radii draw nothing. A zero radius collapses the ellipse to a
//! line (or a single pixel when both are zero).

use super::{Canvas, Color};

/// Draws degenerate ellipses; returns false when a full ellipse is still needed
fn degenerate(canvas: &mut Canvas, cx: i64, cy: i64, rx: i64, ry: i64, color: Color) -> bool {
    match (rx, ry) {
        _ if rx < 0 || ry < 0 => {}
        (0, 0) => canvas.blend_pixel(cx, cy, color),
        (0, _) => canvas.vline(cx, cy - ry, cy + ry, color),
        (_, 0) => canvas.hline(cx - rx, cx + rx, cy, color),
        _ => return false,
    }
    true
}

/// Half-width of the ellipse's span on row `dy` from the centre, or -1 above and below it
fn half_width(rx: i64, ry: i64, dy: i64) -> i64 {
    if dy.abs() > ry {
        return -1;
    }
    let t = dy as f64 / ry as f64;
    (rx as f64 * (1.0 - t * t).max(0.0).sqrt()).round() as i64
}

/// Rows of the ellipse that land on the canvas
fn visible_rows(canvas: &Canvas, cy: i64, ry: i64) -> std::ops::RangeInclusive<i64> {
    (cy - ry).max(0)..=(cy + ry).min(canvas.height() as i64 - 1)
}

/// Solid ellipse, one horizontal span per row so translucent fills blend once
pub(super) fn filled(canvas: &mut Canvas, cx: i64, cy: i64, rx: i64, ry: i64, color: Color) {
    if degenerate(canvas, cx, cy, rx, ry, color) {
        return;
    }

    for y in visible_rows(canvas, cy, ry) {
        let half = half_width(rx, ry, y - cy);
        canvas.hline(cx - half, cx + half, y, color);
    }
}

/// Ellipse outline: the pixels of the filled shape with a 4-neighbour outside it
///
/// Work is bounded by the visible rows and the canvas width, whatever the radii.
pub(super) fn outline(canvas: &mut Canvas, cx: i64, cy: i64, rx: i64, ry: i64, color: Color) {
    if degenerate(canvas, cx, cy, rx, ry, color) {
        return;
    }

    for y in visible_rows(canvas, cy, ry) {
        let dy = y - cy;
        let half = half_width(rx, ry, dy);
        let inner = half_width(rx, ry, dy - 1).min(half_width(rx, ry, dy + 1));

        // Offsets past the narrower neighbouring row are edge pixels; the
        // row's own ends always are
        let start = (inner + 1).min(half).max(0);
        if start == 0 {
            canvas.hline(cx - half, cx + half, y, color);
        } else {
            canvas.hline(cx - half, cx - start, y, color);
            canvas.hline(cx + start, cx + half, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_outline_reaches_axis_extremes() {
        for (rx, ry) in [(10, 10), (8, 4), (4, 8), (1, 1)] {
            let mut canvas = Canvas::new(40, 40);
            outline(&mut canvas, 20, 20, rx, ry, RED);

            assert_eq!(canvas.pixel(20 + rx as i32, 20), Some(RED), "rx={rx} ry={ry}");
            assert_eq!(canvas.pixel(20 - rx as i32, 20), Some(RED), "rx={rx} ry={ry}");
            assert_eq!(canvas.pixel(20, 20 + ry as i32), Some(RED), "rx={rx} ry={ry}");
            assert_eq!(canvas.pixel(20, 20 - ry as i32), Some(RED), "rx={rx} ry={ry}");
            assert_eq!(canvas.pixel(20, 20), Some(Color::BLACK), "rx={rx} ry={ry}");
        }
    }

    #[test]
    fn test_filled_covers_center_and_extremes() {
        let mut canvas = Canvas::new(40, 40);
        filled(&mut canvas, 20, 20, 10, 5, RED);

        assert_eq!(canvas.pixel(20, 20), Some(RED));
        assert_eq!(canvas.pixel(30, 20), Some(RED));
        assert_eq!(canvas.pixel(10, 20), Some(RED));
        assert_eq!(canvas.pixel(20, 15), Some(RED));
        assert_eq!(canvas.pixel(20, 25), Some(RED));
        assert_eq!(canvas.pixel(31, 20), Some(Color::BLACK));
        assert_eq!(canvas.pixel(20, 26), Some(Color::BLACK));
        assert_eq!(canvas.pixel(29, 24), Some(Color::BLACK));
    }

    #[test]
    fn test_translucent_outline_blends_axis_points_once() {
        let mut canvas = Canvas::new(20, 20);
        let color = Color::rgba(200, 100, 50, 100);
        outline(&mut canvas, 10, 10, 5, 5, color);

        let expected = color.over(Color::BLACK);
        assert_eq!(canvas.pixel(15, 10), Some(expected));
        assert_eq!(canvas.pixel(10, 5), Some(expected));
    }

    #[test]
    fn test_outline_is_closed() {
        let mut canvas = Canvas::new(40, 40);
        outline(&mut canvas, 20, 20, 12, 7, RED);

        // Every lit pixel touches another lit pixel (8-neighbourhood)
        for y in 0..40 {
            for x in 0..40 {
                if canvas.pixel(x, y) != Some(RED) {
                    continue;
                }
                let neighbours = (-1..=1)
                    .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
                    .filter(|&(dx, dy)| (dx, dy) != (0, 0))
                    .filter(|&(dx, dy)| canvas.pixel(x + dx, y + dy) == Some(RED))
                    .count();
                assert!(neighbours >= 2, "isolated edge pixel at ({x}, {y})");
            }
        }
        assert_eq!(canvas.pixel(20, 20), Some(Color::BLACK));
        assert_eq!(canvas.pixel(26, 22), Some(Color::BLACK));
    }

    #[test]
    fn test_huge_outline_only_touches_visible_rows() {
        // The canvas sits deep inside the ellipse
        let mut canvas = Canvas::new(10, 10);
        outline(&mut canvas, 5, 5, 40_000_000, 40_000_000, RED);
        assert!(canvas.pixels().iter().all(|&p| p == Color::BLACK));

        // The top of a huge circle crosses the canvas
        let r = 10_000_000;
        outline(&mut canvas, 5, 5 + r, r, r, RED);
        assert_eq!(canvas.pixel(5, 5), Some(RED));
        assert_eq!(canvas.pixel(9, 6), Some(RED));
        assert_eq!(canvas.pixel(5, 6), Some(Color::BLACK));
        assert_eq!(canvas.pixel(5, 9), Some(Color::BLACK));
        assert_eq!(canvas.pixel(5, 4), Some(Color::BLACK));
    }

    #[test]
    fn test_degenerate_radii() {
        let mut canvas = Canvas::new(10, 10);
        filled(&mut canvas, 5, 5, -1, 3, RED);
        outline(&mut canvas, 5, 5, 3, -1, RED);
        assert!(canvas.pixels().iter().all(|&p| p == Color::BLACK));

        filled(&mut canvas, 1, 1, 0, 0, RED);
        assert_eq!(canvas.pixel(1, 1), Some(RED));

        outline(&mut canvas, 5, 5, 0, 2, RED);
        assert_eq!(canvas.pixel(5, 3), Some(RED));
        assert_eq!(canvas.pixel(5, 7), Some(RED));

        filled(&mut canvas, 5, 9, 2, 0, RED);
        assert_eq!(canvas.pixel(3, 9), Some(RED));
        assert_eq!(canvas.pixel(7, 9), Some(RED));
    }
}
