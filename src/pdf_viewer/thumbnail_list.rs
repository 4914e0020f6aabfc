use super::{PdfViewer, SIDEBAR_WIDTH, THUMB_HEIGHT, THUMB_ROW_HEIGHT, THUMB_WIDTH};
use crate::icons::IconName;
use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::scroll::{Scrollbar, ScrollbarShow};
use gpui_component::*;

impl PdfViewer {
    pub(super) fn render_thumbnail_panel(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let i18n = self.i18n();
        let page_count = self.pages.len();

        div()
            .h_full()
            .w(px(SIDEBAR_WIDTH))
            .flex_none()
            .border_r_1()
            .border_color(cx.theme().sidebar_border)
            .bg(cx.theme().sidebar)
            .overflow_hidden()
            .when(page_count == 0, |this| {
                this.child(
                    div()
                        .h_full()
                        .w_full()
                        .flex()
                        .items_center()
                        .justify_center()
                        .text_xs()
                        .text_color(cx.theme().muted_foreground)
                        .child(i18n.no_pages),
                )
            })
            .when(page_count > 0, |this| {
                let rows = (0..page_count)
                    .map(|ix| self.render_thumbnail_row(ix, cx))
                    .collect::<Vec<_>>();

                this.child(
                    div()
                        .relative()
                        .size_full()
                        .child(
                            div()
                                .id("thumbnail-rail")
                                .size_full()
                                .v_flex()
                                .overflow_y_scroll()
                                .track_scroll(&self.thumbnail_scroll)
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
                                    Scrollbar::vertical(&self.thumbnail_scroll)
                                        .scrollbar_show(ScrollbarShow::Always),
                                ),
                        ),
                )
            })
    }

    fn render_thumbnail_row(&self, ix: usize, cx: &mut Context<Self>) -> AnyElement {
        let i18n = self.i18n();
        let Some(page) = self.pages.get(ix) else {
            return div().into_any_element();
        };
        let thumbnail = page.thumbnail.clone();
        let is_selected = ix == self.state.selected_thumbnail_index;

        div()
            .id(("thumb-row", ix))
            .w_full()
            .h(px(THUMB_ROW_HEIGHT))
            .flex_none()
            .flex()
            .items_center()
            .justify_center()
            .when(is_selected, |this| {
                this.bg(cx.theme().secondary.opacity(0.55))
            })
            .hover(|this| this.bg(cx.theme().secondary.opacity(0.35)))
            .active(|this| this.bg(cx.theme().secondary.opacity(0.6)))
            .child(
                div()
                    .w(px(THUMB_WIDTH))
                    .h(px(THUMB_HEIGHT))
                    .relative()
                    .overflow_hidden()
                    .rounded_md()
                    .border_2()
                    .border_color(if is_selected {
                        cx.theme().ring
                    } else {
                        cx.theme().sidebar_border
                    })
                    .bg(cx.theme().background)
                    .when_some(thumbnail.image.clone(), |this, image| {
                        this.child(img(image).size_full().object_fit(ObjectFit::Contain))
                    })
                    .when(thumbnail.image.is_none(), |this| {
                        this.child(
                            div()
                                .size_full()
                                .v_flex()
                                .items_center()
                                .justify_center()
                                .gap_2()
                                .text_color(cx.theme().muted_foreground)
                                .when(thumbnail.failed, |this| {
                                    this.child(
                                        Icon::new(IconName::File)
                                            .size_5()
                                            .text_color(cx.theme().muted_foreground),
                                    )
                                    .child(div().text_xs().child(i18n.thumbnail_render_failed))
                                })
                                .when(!thumbnail.failed, |this| {
                                    this.child(
                                        spinner::Spinner::new()
                                            .large()
                                            .icon(Icon::new(IconName::LoaderCircle))
                                            .color(cx.theme().muted_foreground),
                                    )
                                }),
                        )
                    })
                    .child(
                        div()
                            .absolute()
                            .left_1()
                            .top_1()
                            .px_1()
                            .rounded_sm()
                            .bg(cx.theme().background.opacity(0.9))
                            .text_xs()
                            .font_medium()
                            .text_color(cx.theme().muted_foreground)
                            .child(format!("{}", ix + 1)),
                    ),
            )
            .cursor_pointer()
            .on_click(cx.listener(move |this, _, _, cx| {
                this.on_thumbnail_click(ix, cx);
            }))
            .into_any_element()
    }
}
