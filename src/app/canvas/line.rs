//! Line rasterization

use super::{Canvas, Color};

/// One-pixel segment from `from` to `to`, endpoints included
///
/// Steps along the major axis, one pixel per column (or row), and only over
/// the columns (or rows) the canvas has. Off-canvas endpoints cost nothing.
pub(super) fn segment(canvas: &mut Canvas, from: (i64, i64), to: (i64, i64), color: Color) {
    let ((x1, y1), (x2, y2)) = (from, to);

    if y1 == y2 {
        canvas.hline(x1, x2, y1, color);
        return;
    }
    if x1 == x2 {
        canvas.vline(x1, y1, y2, color);
        return;
    }

    let (width, height) = (canvas.width() as i64, canvas.height() as i64);

    if (x2 - x1).abs() >= (y2 - y1).abs() {
        for x in x1.min(x2).max(0)..=x1.max(x2).min(width - 1) {
            let y = y1 + div_round(i128::from(x - x1) * i128::from(y2 - y1), i128::from(x2 - x1));
            canvas.blend_pixel(x, y, color);
        }
    } else {
        for y in y1.min(y2).max(0)..=y1.max(y2).min(height - 1) {
            let x = x1 + div_round(i128::from(y - y1) * i128::from(x2 - x1), i128::from(y2 - y1));
            canvas.blend_pixel(x, y, color);
        }
    }
}

/// `n / d` rounded half up; `d` is non-zero
fn div_round(n: i128, d: i128) -> i64 {
    let (n, d) = if d < 0 { (-n, -d) } else { (n, d) };
    (2 * n + d).div_euclid(2 * d) as i64
}
