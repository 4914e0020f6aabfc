use super::PdfViewer;
use crate::icons::IconName;
use gpui::*;
use gpui_component::{button::*, *};

impl PdfViewer {
    pub(super) fn render_footer(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let i18n = self.i18n();

        div()
            .id("viewer-footer")
            .h(px(44.))
            .w_full()
            .flex_none()
            .flex()
            .items_center()
            .justify_between()
            .px_4()
            .border_t_1()
            .border_color(cx.theme().border)
            .bg(cx.theme().title_bar)
            .child(
                Button::new("footer-download")
                    .ghost()
                    .small()
                    .icon(Icon::new(IconName::CloudDownload).text_color(cx.theme().foreground))
                    .tooltip(i18n.download_button),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_1()
                    .child(
                        Button::new("zoom-out")
                            .ghost()
                            .small()
                            .icon(Icon::new(IconName::Minus).text_color(cx.theme().foreground))
                            .label(i18n.zoom_out_button)
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.zoom_out(cx);
                            })),
                    )
                    .child(
                        div()
                            .min_w(px(48.))
                            .flex()
                            .justify_center()
                            .text_xs()
                            .font_medium()
                            .text_color(cx.theme().muted_foreground)
                            .child(self.state.zoom.label()),
                    )
                    .child(
                        Button::new("zoom-in")
                            .ghost()
                            .small()
                            .icon(Icon::new(IconName::Plus).text_color(cx.theme().foreground))
                            .label(i18n.zoom_in_button)
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.zoom_in(cx);
                            })),
                    )
                    .child(
                        Button::new("zoom-reset")
                            .ghost()
                            .small()
                            .icon(Icon::new(IconName::RotateCcw).text_color(cx.theme().foreground))
                            .label(i18n.zoom_reset_button)
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.zoom_reset(cx);
                            })),
                    ),
            )
    }
}
