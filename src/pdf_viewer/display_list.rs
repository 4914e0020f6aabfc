use super::page_layout::column_width;
use super::{MAIN_PAGE_GAP, PdfViewer};
use crate::icons::IconName;
use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::scroll::{Scrollbar, ScrollbarShow};
use gpui_component::*;

impl PdfViewer {
    pub(super) fn render_display_panel(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let i18n = self.i18n();

        let body = if let Some(message) = self.state.load_error.as_deref() {
            self.render_display_notice(
                Icon::new(IconName::File).size_8(),
                i18n.document_load_failed(message),
                cx,
            )
            .into_any_element()
        } else if self.document_loading {
            self.render_display_notice(
                spinner::Spinner::new()
                    .large()
                    .icon(Icon::new(IconName::LoaderCircle))
                    .color(cx.theme().muted_foreground),
                i18n.loading_document.to_string(),
                cx,
            )
            .into_any_element()
        } else if self.pages.is_empty() {
            self.render_display_notice(
                Icon::new(IconName::File).size_8(),
                i18n.no_pages.to_string(),
                cx,
            )
            .into_any_element()
        } else {
            self.render_display_pages(cx).into_any_element()
        };

        div()
            .h_full()
            .flex_1()
            .v_flex()
            .overflow_hidden()
            .bg(cx.theme().muted)
            .child(body)
    }

    fn render_display_notice(
        &self,
        icon: impl IntoElement,
        message: String,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        div()
            .size_full()
            .v_flex()
            .items_center()
            .justify_center()
            .gap_3()
            .px_4()
            .text_color(cx.theme().muted_foreground)
            .child(icon)
            .child(div().text_sm().child(message))
    }

    fn render_display_pages(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let (page_width, page_height) = self.display_page_size();
        let row_width = column_width(
            page_width,
            self.display_pane_width(),
            self.state.zoom.fills_available_width(),
        );
        let rows = (0..self.pages.len())
            .map(|ix| self.render_display_row(ix, (page_width, page_height), row_width, cx))
            .collect::<Vec<_>>();

        div()
            .relative()
            .size_full()
            .child(
                div()
                    .id("display-pages")
                    .size_full()
                    .v_flex()
                    .overflow_scroll()
                    .track_scroll(&self.display_scroll)
                    .on_scroll_wheel(cx.listener(|_, _: &ScrollWheelEvent, _, cx| {
                        cx.notify();
                    }))
                    .children(rows),
            )
            .child(
                div()
                    .absolute()
                    .top_0()
                    .left_0()
                    .right_0()
                    .bottom_0()
                    .child(
                        Scrollbar::vertical(&self.display_scroll)
                            .scrollbar_show(ScrollbarShow::Always),
                    ),
            )
    }

    fn render_display_row(
        &self,
        ix: usize,
        (page_width, page_height): (f32, f32),
        row_width: f32,
        cx: &mut Context<Self>,
    ) -> AnyElement {
        let i18n = self.i18n();
        let Some(page) = self.pages.get(ix) else {
            return div().into_any_element();
        };
        let display = page.display.clone();

        div()
            .id(("display-row", ix))
            .w_full()
            .min_w(px(row_width))
            .h(px(page_height + MAIN_PAGE_GAP))
            .flex_none()
            .flex()
            .justify_center()
            .pt(px(MAIN_PAGE_GAP))
            .child(
                div()
                    .w(px(page_width))
                    .h(px(page_height))
                    .flex_none()
                    .relative()
                    .overflow_hidden()
                    .bg(cx.theme().background)
                    .shadow_sm()
                    .when_some(display.image.clone(), |this, image| {
                        this.child(img(image).size_full().object_fit(ObjectFit::Contain))
                    })
                    .when(display.image.is_none(), |this| {
                        this.child(
                            div()
                                .size_full()
                                .v_flex()
                                .items_center()
                                .justify_center()
                                .gap_2()
                                .text_color(cx.theme().muted_foreground)
                                .when(display.failed, |this| {
                                    this.child(
                                        Icon::new(IconName::File)
                                            .size_8()
                                            .text_color(cx.theme().muted_foreground),
                                    )
                                    .child(div().text_xs().child(i18n.page_render_failed))
                                })
                                .when(!display.failed, |this| {
                                    this.child(
                                        spinner::Spinner::new()
                                            .large()
                                            .icon(Icon::new(IconName::LoaderCircle))
                                            .color(cx.theme().muted_foreground),
                                    )
                                }),
                        )
                    }),
            )
            .into_any_element()
    }
}
