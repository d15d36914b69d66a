//! Window configuration and management

use super::config::WindowConfig;
use winit::dpi::PhysicalSize;
use winit::window::WindowAttributes;

/// Creates attributes for a fixed-size window of `width` x `height` pixels
pub fn window_attributes_from_config(
    config: &WindowConfig,
    width: u32,
    height: u32,
) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(width, height))
        .with_resizable(false)
        .with_decorations(config.decorated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::Size;

    #[test]
    fn test_attributes_follow_config() {
        let config = WindowConfig {
            title: "demo".to_string(),
            decorated: false,
            vsync: true,
        };
        let attributes = window_attributes_from_config(&config, 640, 480);

        assert_eq!(attributes.title, "demo");
        assert!(!attributes.decorations);
        assert!(!attributes.resizable);
        assert_eq!(
            attributes.inner_size,
            Some(Size::Physical(PhysicalSize::new(640, 480)))
        );
    }
}
