/// Canvas sizing against its container and the device pixel ratio
use crate::error::Result;

/// Measured container box in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

impl ViewportMetrics {
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio,
        }
    }

    /// Backing store size in physical pixels, truncated the way the
    /// canvas `width`/`height` setters truncate.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            to_pixels(self.css_width * self.device_pixel_ratio),
            to_pixels(self.css_height * self.device_pixel_ratio),
        )
    }
}

fn to_pixels(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// The canvas being drawn into.
pub trait Viewport {
    fn measure(&self) -> Result<ViewportMetrics>;

    /// Resize the backing store to `metrics.backing_size()` and the CSS box
    /// to the measured size.
    fn apply(&mut self, metrics: &ViewportMetrics) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_scales_by_ratio() {
        assert_eq!(ViewportMetrics::new(800.0, 600.0, 2.0).backing_size(), (1600, 1200));
        assert_eq!(ViewportMetrics::new(801.5, 600.25, 1.5).backing_size(), (1202, 900));
        assert_eq!(ViewportMetrics::new(100.0, 100.0, 1.0).backing_size(), (100, 100));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(ViewportMetrics::new(0.0, 0.0, 2.0).backing_size(), (0, 0));
        assert_eq!(ViewportMetrics::new(-5.0, f64::NAN, 1.0).backing_size(), (0, 0));
    }
}
