use super::PdfViewer;
use crate::chrome::ChromeDisplay;
use crate::icons::IconName;
use chrono::NaiveDateTime;
use gpui::*;
use gpui_component::{button::*, *};

impl PdfViewer {
    pub(super) fn render_header(&self, now: NaiveDateTime, cx: &mut Context<Self>) -> impl IntoElement {
        let i18n = self.i18n();
        let chrome = ChromeDisplay::new(&self.state, &self.config.sender_name, now);

        div()
            .id("viewer-header")
            .h(px(56.))
            .w_full()
            .flex_none()
            .flex()
            .items_center()
            .justify_between()
            .px_4()
            .border_b_1()
            .border_color(cx.theme().border)
            .bg(cx.theme().title_bar)
            .child(
                div()
                    .v_flex()
                    .gap_0p5()
                    .child(
                        div()
                            .text_sm()
                            .font_semibold()
                            .text_color(cx.theme().foreground)
                            .child(chrome.page_counter()),
                    )
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .text_xs()
                            .text_color(cx.theme().muted_foreground)
                            .child(
                                div()
                                    .font_medium()
                                    .text_color(cx.theme().foreground)
                                    .child(chrome.sender_name().to_string()),
                            )
                            .child(chrome.sent_at_label()),
                    ),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_1()
                    .child(
                        Button::new("header-more")
                            .ghost()
                            .small()
                            .icon(
                                Icon::new(IconName::EllipsisVertical)
                                    .text_color(cx.theme().foreground),
                            ),
                    )
                    .child(
                        Button::new("header-close")
                            .ghost()
                            .small()
                            .icon(Icon::new(IconName::Close).text_color(cx.theme().foreground))
                            .tooltip(i18n.close_button)
                            .on_click(|_, window, _| window.remove_window()),
                    ),
            )
    }
}
