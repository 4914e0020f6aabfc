use super::{MAIN_PAGE_GAP, MAIN_PAGE_HEIGHT, MAIN_PAGE_WIDTH};

/// Main page box at `scale`. Zoom always scales the page itself.
pub(super) fn page_box_size(scale: f32) -> (f32, f32) {
    (MAIN_PAGE_WIDTH * scale, MAIN_PAGE_HEIGHT * scale)
}

/// Width of the column that holds one main page. When `fills_pane` the
/// column stretches to the pane, otherwise it hugs the page and its gutters.
pub(super) fn column_width(page_width: f32, pane_width: f32, fills_pane: bool) -> f32 {
    let hugging = page_width + MAIN_PAGE_GAP * 2.0;
    if fills_pane { hugging.max(pane_width) } else { hugging }
}

/// Scroll offset actually reachable for a requested `offset`.
pub(super) fn clamp_scroll_target(offset: f32, max_offset: f32) -> f32 {
    offset.clamp(0.0, max_offset.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoom::Zoom;
    use pretty_assertions::assert_eq;

    #[test]
    fn page_grows_at_every_zoom_in_step() {
        let mut zoom = Zoom::default();
        let mut last_width = page_box_size(zoom.scale()).0;
        let mut steps = 0;
        while zoom.zoom_in() {
            let (width, height) = page_box_size(zoom.scale());
            assert!(width > last_width, "step {steps}: {width} <= {last_width}");
            assert!((height / width - MAIN_PAGE_HEIGHT / MAIN_PAGE_WIDTH).abs() < 1e-4);
            last_width = width;
            steps += 1;
        }
        assert_eq!(steps, 8);
    }

    #[test]
    fn page_shrinks_at_every_zoom_out_step() {
        let mut zoom = Zoom::default();
        let mut last_width = page_box_size(zoom.scale()).0;
        while zoom.zoom_out() {
            let width = page_box_size(zoom.scale()).0;
            assert!(width < last_width);
            last_width = width;
        }
    }

    #[test]
    fn default_scale_uses_base_page_box() {
        assert_eq!(page_box_size(1.0), (MAIN_PAGE_WIDTH, MAIN_PAGE_HEIGHT));
    }

    #[test]
    fn column_fills_pane_only_in_fill_mode() {
        assert_eq!(column_width(400.0, 739.0, false), 424.0);
        assert_eq!(column_width(400.0, 739.0, true), 739.0);
        // A page wider than the pane keeps its gutters and scrolls sideways.
        assert_eq!(column_width(1600.0, 739.0, true), 1624.0);
    }

    #[test]
    fn scroll_target_stays_in_range() {
        assert_eq!(clamp_scroll_target(300.0, 1000.0), 300.0);
        assert_eq!(clamp_scroll_target(5000.0, 1000.0), 1000.0);
        assert_eq!(clamp_scroll_target(-20.0, 1000.0), 0.0);
        assert_eq!(clamp_scroll_target(50.0, -4.0), 0.0);
    }
}
