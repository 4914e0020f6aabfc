//! Transient viewer state and the reducer that drives both panes.
//!
//! Every user event becomes a [`ViewAction`]. [`update`] folds it into the current
//! [`ViewState`] and returns the imperative scroll/render commands as
//! [`ViewEffect`]s for the view to apply. The reducer always sees the latest state,
//! so repeated scroll events never act on an outdated index.

use crate::zoom::Zoom;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub current_page_number: usize,
    pub total_page_count: usize,
    pub selected_thumbnail_index: usize,
    pub zoom: Zoom,
    pub load_error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_page_number: 1,
            total_page_count: 1,
            selected_thumbnail_index: 0,
            zoom: Zoom::default(),
            load_error: None,
        }
    }
}

/// Main view geometry sampled when its scroll offset changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_height: f32,
    /// Laid-out height of the first main page, `None` until it has been painted.
    pub item_height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    DocumentLoaded { page_count: usize },
    DocumentFailed { message: String },
    MainScrolled(ScrollMetrics),
    ThumbnailClicked { index: usize, item_height: Option<f32> },
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEffect {
    ScrollRailTo(f32),
    ScrollMainTo(f32),
    RerenderPages,
}

pub fn update(mut state: ViewState, action: ViewAction) -> (ViewState, Vec<ViewEffect>) {
    let mut effects = Vec::new();

    match action {
        ViewAction::DocumentLoaded { page_count } => {
            state.total_page_count = page_count;
            state.load_error = None;
        }
        ViewAction::DocumentFailed { message } => {
            state.load_error = Some(message);
        }
        ViewAction::MainScrolled(metrics) => {
            if let Some(effect) = sync_to_scroll(&mut state, metrics) {
                effects.push(effect);
            }
        }
        ViewAction::ThumbnailClicked { index, item_height } => {
            if index < state.total_page_count {
                state.selected_thumbnail_index = index;
                if let Some(item_height) = item_height.filter(|h| *h > 0.0) {
                    effects.push(ViewEffect::ScrollMainTo(index as f32 * item_height));
                }
            }
        }
        ViewAction::ZoomIn => {
            if state.zoom.zoom_in() {
                effects.push(ViewEffect::RerenderPages);
            }
        }
        ViewAction::ZoomOut => {
            if state.zoom.zoom_out() {
                effects.push(ViewEffect::RerenderPages);
            }
        }
        ViewAction::ZoomReset => {
            if state.zoom.reset() {
                effects.push(ViewEffect::RerenderPages);
            }
        }
    }

    (state, effects)
}

fn sync_to_scroll(state: &mut ViewState, metrics: ScrollMetrics) -> Option<ViewEffect> {
    let item_height = metrics.item_height.filter(|h| *h > 0.0)?;

    let new_index = (metrics.scroll_top.max(0.0) / item_height).floor() as usize;
    let total_pages = (metrics.scroll_height / item_height).ceil().max(0.0) as usize;

    if new_index != state.selected_thumbnail_index && new_index < total_pages {
        state.selected_thumbnail_index = new_index;
        state.current_page_number = new_index + 1;
        // Thumbnails are denser than main pages, so the rail moves at half speed.
        Some(ViewEffect::ScrollRailTo(new_index as f32 * item_height / 2.0))
    } else {
        let index = new_index.min(total_pages.saturating_sub(1));
        state.selected_thumbnail_index = index;
        state.current_page_number = index + 1;
        Some(ViewEffect::ScrollRailTo(index as f32 * item_height))
    }
}

/// Rows of a uniform-height list that intersect the viewport, plus one row of
/// lookahead. Before the first layout (zero viewport) only the top row counts.
pub fn visible_rows(
    scroll_top: f32,
    viewport_height: f32,
    row_height: f32,
    row_count: usize,
) -> Range<usize> {
    if row_count == 0 || row_height <= 0.0 {
        return 0..0;
    }

    let top = scroll_top.max(0.0);
    let start = ((top / row_height).floor() as usize).min(row_count - 1);
    let end = (((top + viewport_height.max(0.0)) / row_height).ceil() as usize + 1)
        .max(start + 1)
        .min(row_count);
    start..end
}

/// Watches the main view's vertical offset and reports only real changes.
///
/// Owned by the view for its whole lifetime; dropping the view drops the
/// subscription with it.
#[derive(Debug, Default)]
pub struct ScrollObserver {
    last_scroll_top: Option<f32>,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first sample only primes the observer.
    pub fn observe(&mut self, scroll_top: f32) -> Option<f32> {
        let changed = self
            .last_scroll_top
            .map(|last| last != scroll_top)
            .unwrap_or(false);
        self.last_scroll_top = Some(scroll_top);
        changed.then_some(scroll_top)
    }
}
