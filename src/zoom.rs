const ZOOM_STEP_FACTOR: f32 = 1.2;
const ZOOM_IN_CEILING: f32 = 4.0;
const ZOOM_OUT_FLOOR: f32 = 0.5;
const FILL_WIDTH_MIN: f32 = 2.0;
const FILL_WIDTH_MAX: f32 = 5.0;
const DEFAULT_SCALE: f32 = 1.0;

/// Multiplicative page scale applied to the main view.
///
/// The bounds are checked against the value *before* a step is applied, so the
/// reachable range is `[0.5 / 1.2, 4 * 1.2]` rather than `[0.5, 4]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    scale: f32,
}

impl Default for Zoom {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

impl Zoom {
    pub fn scale(self) -> f32 {
        self.scale
    }

    /// Returns `false` when the step was blocked by the ceiling.
    pub fn zoom_in(&mut self) -> bool {
        if self.scale > ZOOM_IN_CEILING {
            return false;
        }
        self.scale *= ZOOM_STEP_FACTOR;
        true
    }

    /// Returns `false` when the step was blocked by the floor.
    pub fn zoom_out(&mut self) -> bool {
        if self.scale < ZOOM_OUT_FLOOR {
            return false;
        }
        self.scale /= ZOOM_STEP_FACTOR;
        true
    }

    pub fn reset(&mut self) -> bool {
        let changed = self.scale != DEFAULT_SCALE;
        self.scale = DEFAULT_SCALE;
        changed
    }

    /// Zoomed-in content gets the whole pane width instead of the default column.
    pub fn fills_available_width(self) -> bool {
        (FILL_WIDTH_MIN..=FILL_WIDTH_MAX).contains(&self.scale)
    }

    pub fn label(self) -> String {
        format!("{:.0}%", self.scale * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn zoom_in_then_out_returns_near_one() {
        let mut zoom = Zoom::default();
        for _ in 0..5 {
            assert!(zoom.zoom_in());
        }
        for _ in 0..5 {
            assert!(zoom.zoom_out());
        }
        assert!(approx_eq(zoom.scale(), 1.0), "scale = {}", zoom.scale());
    }

    #[test]
    fn zoom_in_stops_one_step_past_four() {
        let mut zoom = Zoom::default();
        let mut steps = 0;
        while zoom.zoom_in() {
            steps += 1;
            assert!(steps < 100);
        }
        assert!(zoom.scale() > 4.0);
        assert!(zoom.scale() <= 4.8 + 1e-4);
        assert!(!zoom.zoom_in());
    }

    #[test]
    fn zoom_out_stops_one_step_below_half() {
        let mut zoom = Zoom::default();
        let mut steps = 0;
        while zoom.zoom_out() {
            steps += 1;
            assert!(steps < 100);
        }
        assert!(zoom.scale() < 0.5);
        assert!(zoom.scale() >= 0.5 / 1.2 - 1e-4);
    }

    #[test]
    fn reset_is_exact() {
        let mut zoom = Zoom::default();
        zoom.zoom_in();
        zoom.zoom_in();
        zoom.zoom_out();
        zoom.reset();
        assert_eq!(zoom.scale(), 1.0);

        let mut fresh = Zoom::default();
        assert!(!fresh.reset());
    }

    #[test]
    fn fill_width_window() {
        let mut zoom = Zoom::default();
        assert!(!zoom.fills_available_width());
        // 1.2^4 = 2.0736
        for _ in 0..4 {
            zoom.zoom_in();
        }
        assert!(zoom.fills_available_width());
        zoom.zoom_out();
        assert!(!zoom.fills_available_width());
    }

    #[test]
    fn label_is_percent() {
        let mut zoom = Zoom::default();
        assert_eq!(zoom.label(), "100%");
        zoom.zoom_in();
        assert_eq!(zoom.label(), "120%");
    }
}
