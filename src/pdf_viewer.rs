mod display_list;
mod footer;
mod header;
mod page_layout;
mod render_lane;
mod thumbnail_list;
mod utils;

use crate::config::ViewerConfig;
use crate::{DisableLoggingMenu, EnableLoggingMenu, configure_app_menus};
use crate::i18n::{I18n, Language};
use crate::view_state::{
    self, ScrollMetrics, ScrollObserver, ViewAction, ViewEffect, ViewState, visible_rows,
};
use crate::window_size;
use gpui::*;
use gpui_component::*;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use self::page_layout::{clamp_scroll_target, page_box_size};
use self::render_lane::{RenderLane, failed_pages};
use self::utils::{ensure_pdfium_ready, load_document_summary, load_page_images};

const SIDEBAR_WIDTH: f32 = 197.0;
const THUMB_WIDTH: f32 = 165.0;
const THUMB_HEIGHT: f32 = 240.0;
const THUMB_ROW_HEIGHT: f32 = 276.0;
const MAIN_PAGE_WIDTH: f32 = 373.0;
const MAIN_PAGE_HEIGHT: f32 = 545.0;
const MAIN_PAGE_GAP: f32 = 12.0;
const THUMB_BATCH_SIZE: usize = 2;
const THUMB_MAX_PARALLEL_TASKS: usize = 1;
const DISPLAY_BATCH_SIZE: usize = 1;
const DISPLAY_MAX_PARALLEL_TASKS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageLayer {
    Thumbnail,
    Display,
}

impl PageLayer {
    fn batch_size(self) -> usize {
        match self {
            Self::Thumbnail => THUMB_BATCH_SIZE,
            Self::Display => DISPLAY_BATCH_SIZE,
        }
    }

    fn max_parallel_tasks(self) -> usize {
        match self {
            Self::Thumbnail => THUMB_MAX_PARALLEL_TASKS,
            Self::Display => DISPLAY_MAX_PARALLEL_TASKS,
        }
    }
}

#[derive(Clone, Default)]
struct PageImage {
    image: Option<Arc<RenderImage>>,
    render_width: u32,
    failed: bool,
}

impl PageImage {
    fn needs_render(&self, target_width: u32) -> bool {
        !self.failed && (self.image.is_none() || self.render_width < target_width)
    }
}

#[derive(Clone, Default)]
struct PageSlot {
    thumbnail: PageImage,
    display: PageImage,
}

impl PageSlot {
    fn layer(&self, layer: PageLayer) -> &PageImage {
        match layer {
            PageLayer::Thumbnail => &self.thumbnail,
            PageLayer::Display => &self.display,
        }
    }

    fn layer_mut(&mut self, layer: PageLayer) -> &mut PageImage {
        match layer {
            PageLayer::Thumbnail => &mut self.thumbnail,
            PageLayer::Display => &mut self.display,
        }
    }
}

pub struct PdfViewer {
    focus_handle: FocusHandle,
    language: Language,
    config: ViewerConfig,
    state: ViewState,
    document_loading: bool,
    pages: Vec<PageSlot>,
    thumbnail_scroll: ScrollHandle,
    display_scroll: ScrollHandle,
    scroll_observer: ScrollObserver,
    thumbnail_lane: RenderLane,
    display_lane: RenderLane,
    window_size_store: Option<sled::Tree>,
    last_window_size: Option<(f32, f32)>,
    needs_initial_focus: bool,
}

impl PdfViewer {
    pub fn new(config: ViewerConfig, cx: &mut Context<Self>) -> Self {
        let mut viewer = Self {
            focus_handle: cx.focus_handle(),
            language: Language::detect(),
            config,
            state: ViewState::default(),
            document_loading: true,
            pages: Vec::new(),
            thumbnail_scroll: ScrollHandle::new(),
            display_scroll: ScrollHandle::new(),
            scroll_observer: ScrollObserver::new(),
            thumbnail_lane: RenderLane::default(),
            display_lane: RenderLane::default(),
            window_size_store: window_size::open_store(),
            last_window_size: None,
            needs_initial_focus: true,
        };
        viewer.load_document(cx);
        viewer
    }

    fn i18n(&self) -> I18n {
        I18n::new(self.language)
    }

    fn lane_mut(&mut self, layer: PageLayer) -> &mut RenderLane {
        match layer {
            PageLayer::Thumbnail => &mut self.thumbnail_lane,
            PageLayer::Display => &mut self.display_lane,
        }
    }

    fn load_document(&mut self, cx: &mut Context<Self>) {
        self.document_loading = true;
        self.thumbnail_lane.reset();
        self.display_lane.reset();
        let source = self.config.document.clone();
        let language = self.language;

        cx.spawn(async move |view, cx| {
            let parsed = cx
                .background_executor()
                .spawn(async move {
                    ensure_pdfium_ready(language)?;
                    load_document_summary(&source, language)
                })
                .await;

            let _ = view.update(cx, |this, cx| {
                this.document_loading = false;
                match parsed {
                    Ok(page_count) => this.on_document_loaded(page_count),
                    Err(err) => {
                        crate::debug_log!("[pdf][load] failed: {:#}", err);
                        this.pages.clear();
                        this.dispatch(ViewAction::DocumentFailed {
                            message: format!("{err:#}"),
                        });
                    }
                }
                cx.notify();
            });
        })
        .detach();
    }

    fn on_document_loaded(&mut self, page_count: usize) {
        self.pages = vec![PageSlot::default(); page_count];
        self.thumbnail_lane.reset();
        self.display_lane.reset();
        self.dispatch(ViewAction::DocumentLoaded { page_count });
    }

    /// Folds `action` into the view state and applies the resulting commands.
    fn dispatch(&mut self, action: ViewAction) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = view_state::update(state, action);
        self.state = state;

        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: ViewEffect) {
        match effect {
            ViewEffect::ScrollRailTo(offset) => scroll_vertically_to(&self.thumbnail_scroll, offset),
            ViewEffect::ScrollMainTo(offset) => scroll_vertically_to(&self.display_scroll, offset),
            ViewEffect::RerenderPages => {
                self.display_lane.reset();
                for page in &mut self.pages {
                    page.display = PageImage::default();
                }
            }
        }
    }

    /// Height of the first laid-out main page, the unit for scroll-to-index math.
    fn main_item_height(&self) -> Option<f32> {
        self.display_scroll
            .bounds_for_item(0)
            .map(|bounds| f32::from(bounds.size.height))
            .filter(|height| *height > 0.0)
    }

    fn main_scroll_top(&self) -> f32 {
        -f32::from(self.display_scroll.offset().y)
    }

    fn observe_main_scroll(&mut self) {
        let scroll_top = self.main_scroll_top();
        if self.scroll_observer.observe(scroll_top).is_none() {
            return;
        }

        let viewport_height = f32::from(self.display_scroll.bounds().size.height);
        let max_scroll = f32::from(self.display_scroll.max_offset().height);
        let metrics = ScrollMetrics {
            scroll_top,
            scroll_height: viewport_height + max_scroll,
            item_height: self.main_item_height(),
        };
        self.dispatch(ViewAction::MainScrolled(metrics));
    }

    fn on_thumbnail_click(&mut self, index: usize, cx: &mut Context<Self>) {
        let item_height = self.main_item_height();
        crate::debug_log!(
            "[sync] thumbnail click page={} item_height={:?}",
            index + 1,
            item_height
        );
        self.dispatch(ViewAction::ThumbnailClicked { index, item_height });
        cx.notify();
    }

    fn zoom_in(&mut self, cx: &mut Context<Self>) {
        self.apply_zoom(ViewAction::ZoomIn, cx);
    }

    fn zoom_out(&mut self, cx: &mut Context<Self>) {
        self.apply_zoom(ViewAction::ZoomOut, cx);
    }

    fn zoom_reset(&mut self, cx: &mut Context<Self>) {
        self.apply_zoom(ViewAction::ZoomReset, cx);
    }

    fn apply_zoom(&mut self, action: ViewAction, cx: &mut Context<Self>) {
        let before = self.state.zoom.scale();
        self.dispatch(action);
        crate::debug_log!("[zoom] {} -> {}", before, self.state.zoom.scale());
        cx.notify();
    }

    fn handle_key_down(&mut self, event: &KeyDownEvent, cx: &mut Context<Self>) {
        if !event.keystroke.modifiers.secondary() {
            return;
        }

        match event.keystroke.key.as_str() {
            "=" | "+" => self.zoom_in(cx),
            "-" => self.zoom_out(cx),
            "0" => self.zoom_reset(cx),
            _ => return,
        }
        cx.stop_propagation();
    }

    fn thumbnail_target_width(&self, window: &Window) -> u32 {
        device_pixels(THUMB_WIDTH, window)
    }

    fn display_page_size(&self) -> (f32, f32) {
        page_box_size(self.state.zoom.scale())
    }

    fn display_pane_width(&self) -> f32 {
        f32::from(self.display_scroll.bounds().size.width)
    }

    fn display_target_width(&self, window: &Window) -> u32 {
        device_pixels(self.display_page_size().0, window)
    }

    fn thumbnail_visible_range(&self) -> Range<usize> {
        visible_rows(
            -f32::from(self.thumbnail_scroll.offset().y),
            f32::from(self.thumbnail_scroll.bounds().size.height),
            THUMB_ROW_HEIGHT,
            self.pages.len(),
        )
    }

    fn display_visible_range(&self) -> Range<usize> {
        let row_height = self
            .main_item_height()
            .unwrap_or(self.display_page_size().1 + MAIN_PAGE_GAP);
        visible_rows(
            self.main_scroll_top(),
            f32::from(self.display_scroll.bounds().size.height),
            row_height,
            self.pages.len(),
        )
    }

    fn request_page_load(
        &mut self,
        layer: PageLayer,
        visible_range: Range<usize>,
        target_width: u32,
        cx: &mut Context<Self>,
    ) {
        if visible_range.is_empty() || self.pages.is_empty() {
            return;
        }

        if !self.lane_mut(layer).has_capacity(layer.max_parallel_tasks()) {
            return;
        }

        let lane = match layer {
            PageLayer::Thumbnail => &self.thumbnail_lane,
            PageLayer::Display => &self.display_lane,
        };
        let pending: Vec<usize> = visible_range
            .filter(|ix| {
                !lane.is_loading(*ix)
                    && self
                        .pages
                        .get(*ix)
                        .is_some_and(|page| page.layer(layer).needs_render(target_width))
            })
            .take(layer.batch_size())
            .collect();
        if pending.is_empty() {
            return;
        }

        let epoch = self.lane_mut(layer).start(&pending);
        let source = self.config.document.clone();
        let language = self.language;

        cx.spawn(async move |view, cx| {
            let load_result = cx
                .background_executor()
                .spawn(async move {
                    let loaded = load_page_images(&source, &pending, target_width, language);
                    (pending, loaded)
                })
                .await;

            let _ = view.update(cx, |this, cx| {
                let (requested, loaded) = load_result;
                this.finish_page_load(layer, epoch, target_width, requested, loaded);
                cx.notify();
            });
        })
        .detach();
    }

    fn finish_page_load(
        &mut self,
        layer: PageLayer,
        epoch: u64,
        target_width: u32,
        requested: Vec<usize>,
        loaded: anyhow::Result<Vec<(usize, Arc<RenderImage>)>>,
    ) {
        if !self.lane_mut(layer).finish(epoch, &requested) {
            crate::debug_log!("[pdf][render] {:?} dropped stale batch {:?}", layer, requested);
            return;
        }

        let mut loaded_indices = HashSet::new();
        match loaded {
            Ok(images) => {
                for (ix, image) in images {
                    if let Some(page) = self.pages.get_mut(ix) {
                        *page.layer_mut(layer) = PageImage {
                            image: Some(image),
                            render_width: target_width,
                            failed: false,
                        };
                        loaded_indices.insert(ix);
                    }
                }
            }
            Err(err) => {
                crate::debug_log!("[pdf][render] {:?} batch failed: {:#}", layer, err);
            }
        }

        for ix in failed_pages(&requested, &loaded_indices) {
            if let Some(page) = self.pages.get_mut(ix) {
                page.layer_mut(layer).failed = true;
            }
        }
    }

    fn remember_window_size(&mut self, window: &Window) {
        let bounds = window.bounds();
        let current_size = (f32::from(bounds.size.width), f32::from(bounds.size.height));
        if self.last_window_size == Some(current_size) {
            return;
        }
        self.last_window_size = Some(current_size);
        if window.is_maximized() || window.is_fullscreen() {
            return;
        }
        if let Some(store) = self.window_size_store.as_ref() {
            window_size::save(store, current_size.0, current_size.1);
        }
    }
}

fn scroll_vertically_to(handle: &ScrollHandle, offset: f32) {
    let target = clamp_scroll_target(offset, f32::from(handle.max_offset().height));
    let current = handle.offset();
    handle.set_offset(point(current.x, px(-target)));
}

fn device_pixels(width: f32, window: &Window) -> u32 {
    (width * window.scale_factor())
        .clamp(1.0, i32::MAX as f32)
        .round() as u32
}

impl Focusable for PdfViewer {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for PdfViewer {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if self.needs_initial_focus {
            self.needs_initial_focus = false;
            cx.focus_self(window);
        }
        window.set_rem_size(cx.theme().font_size);
        self.remember_window_size(window);

        self.observe_main_scroll();

        let thumbnail_range = self.thumbnail_visible_range();
        let thumbnail_target_width = self.thumbnail_target_width(window);
        self.request_page_load(
            PageLayer::Thumbnail,
            thumbnail_range,
            thumbnail_target_width,
            cx,
        );
        let display_range = self.display_visible_range();
        let display_target_width = self.display_target_width(window);
        self.request_page_load(
            PageLayer::Display,
            display_range,
            display_target_width,
            cx,
        );

        let now = chrono::Local::now().naive_local();

        div()
            .v_flex()
            .size_full()
            .bg(cx.theme().background)
            .track_focus(&self.focus_handle)
            .capture_key_down(cx.listener(|this, event: &KeyDownEvent, _, cx| {
                this.handle_key_down(event, cx);
            }))
            .on_action(cx.listener(|this, _: &EnableLoggingMenu, _, cx| {
                match crate::logger::enable_file_logging() {
                    Ok(()) => crate::debug_log!(
                        "[log] file logging on: {}",
                        crate::logger::log_file_path().display()
                    ),
                    Err(err) => eprintln!("[log] enable file logging failed: {err:#}"),
                }
                configure_app_menus(cx, this.i18n());
            }))
            .on_action(cx.listener(|this, _: &DisableLoggingMenu, _, cx| {
                if let Err(err) = crate::logger::disable_file_logging() {
                    eprintln!("[log] disable file logging failed: {err:#}");
                }
                configure_app_menus(cx, this.i18n());
            }))
            .child(self.render_header(now, cx))
            .child(
                div()
                    .flex_1()
                    .w_full()
                    .flex()
                    .overflow_hidden()
                    .child(self.render_thumbnail_panel(cx))
                    .child(self.render_display_panel(cx)),
            )
            .child(self.render_footer(cx))
    }
}
