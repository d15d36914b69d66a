//! Rasterizer health check

use crate::app::{Canvas, Color};
use crate::health::check::{CheckResult, SystemCheck};

/// Draws one of each shape on a small canvas and samples known pixels
#[derive(Default)]
pub struct CanvasCheck;

impl CanvasCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for CanvasCheck {
    fn name(&self) -> &'static str {
        "Canvas"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates fill, ellipse and triangle rasterization")
    }

    fn check(&self) -> CheckResult {
        let red = Color::rgb(255, 0, 0);
        let mut canvas = Canvas::new(64, 64);

        canvas.fill(Color::BLACK);
        canvas.fill_ellipse(16, 16, 8, 8, red);
        canvas.stroke_ellipse(48, 16, 8, 4, red);
        canvas.stroke_triangle(8, 40, 56, 40, 32, 60, red);

        let samples = [
            ("filled ellipse centre", (16, 16), red),
            ("ellipse outline edge", (56, 16), red),
            ("ellipse outline interior", (48, 16), Color::BLACK),
            ("triangle vertex", (32, 60), red),
            ("triangle edge", (30, 40), red),
            ("background", (63, 63), Color::BLACK),
        ];

        let mut details = Vec::new();
        let mut failures = 0;
        for (label, (x, y), expected) in samples {
            let actual = canvas.pixel(x, y);
            if actual == Some(expected) {
                details.push(format!("  ✓ {label} at ({x}, {y})"));
            } else {
                details.push(format!("  ✗ {label} at ({x}, {y}): {actual:?}, expected {expected:?}"));
                failures += 1;
            }
        }

        let details = details.join("\n");
        if failures > 0 {
            CheckResult::fail(format!("{failures} pixel samples failed")).with_details(details)
        } else {
            CheckResult::pass(format!("{} pixel samples matched", samples.len())).with_details(details)
        }
    }
}
