#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

pub mod chrome;
pub mod config;
pub mod i18n;
pub mod icons;
pub mod logger;
mod pdf_viewer;
pub mod view_state;
mod window_size;
pub mod zoom;

use config::ViewerConfig;
use gpui::*;
use gpui_component::*;
use pdf_viewer::PdfViewer;

#[cfg(target_os = "linux")]
const LINUX_BACKEND_ENV: &str = "PDFPANE_LINUX_BACKEND";
const DEFAULT_WINDOW_WIDTH: f32 = 960.0;
const DEFAULT_WINDOW_HEIGHT: f32 = 820.0;

gpui::actions!(pdfpane, [EnableLoggingMenu, DisableLoggingMenu, Quit]);

pub(crate) fn configure_app_menus(cx: &mut App, i18n: i18n::I18n) {
    let mut items = Vec::new();

    if logger::file_logging_enabled() {
        items.push(MenuItem::action(
            i18n.disable_logging_button,
            DisableLoggingMenu,
        ));
    } else {
        items.push(MenuItem::action(
            i18n.enable_logging_button,
            EnableLoggingMenu,
        ));
    }
    items.extend([MenuItem::separator(), MenuItem::action(i18n.quit_button, Quit)]);

    cx.set_menus(vec![Menu {
        name: i18n.app_menu_name.into(),
        items,
    }]);
}

#[cfg(target_os = "linux")]
fn running_inside_wsl() -> bool {
    if std::env::var_os("WSL_DISTRO_NAME").is_some() || std::env::var_os("WSL_INTEROP").is_some()
    {
        return true;
    }

    std::fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|release| release.to_ascii_lowercase().contains("microsoft"))
        .unwrap_or(false)
}

#[cfg(target_os = "linux")]
fn has_non_empty_env(key: &str) -> bool {
    std::env::var_os(key).is_some_and(|value| !value.is_empty())
}

#[cfg(target_os = "linux")]
fn configure_linux_display_backend() {
    let requested_backend = std::env::var(LINUX_BACKEND_ENV)
        .ok()
        .map(|value| value.trim().to_ascii_lowercase());

    match requested_backend.as_deref() {
        Some("wayland") => {
            crate::debug_log!("[linux] backend override: {}=wayland", LINUX_BACKEND_ENV);
            return;
        }
        Some("x11") => {
            if has_non_empty_env("WAYLAND_DISPLAY") {
                // Runs before any threads are spawned.
                unsafe { std::env::remove_var("WAYLAND_DISPLAY") };
            }
            crate::debug_log!("[linux] backend override: {}=x11", LINUX_BACKEND_ENV);
            return;
        }
        Some("auto") | None => {}
        Some(other) => {
            crate::debug_log!(
                "[linux] invalid {} value '{}', expected auto/x11/wayland; using auto",
                LINUX_BACKEND_ENV,
                other
            );
        }
    }

    if running_inside_wsl() && has_non_empty_env("WAYLAND_DISPLAY") && has_non_empty_env("DISPLAY")
    {
        // Runs before any threads are spawned.
        unsafe { std::env::remove_var("WAYLAND_DISPLAY") };
        crate::debug_log!(
            "[linux] WSL with DISPLAY and WAYLAND_DISPLAY, using X11. set {}=wayland to override",
            LINUX_BACKEND_ENV
        );
    }
}

fn main() {
    logger::initialize();
    #[cfg(target_os = "linux")]
    configure_linux_display_backend();

    let config = ViewerConfig::from_env();
    let app = Application::new().with_assets(icons::Assets);
    let i18n = i18n::I18n::new(i18n::Language::detect());

    app.run(move |cx| {
        configure_app_menus(cx, i18n);
        cx.on_action(|_: &Quit, cx| cx.quit());

        gpui_component::init(cx);
        Theme::change(cx.window_appearance(), None, cx);
        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                cx.quit();
            }
        })
        .detach();

        cx.spawn(async move |cx| {
            let (width, height) = window_size::open_store()
                .as_ref()
                .and_then(window_size::load)
                .unwrap_or((DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT));
            let window_bounds =
                cx.update(|app| WindowBounds::centered(size(px(width), px(height)), app))?;

            let window_options = WindowOptions {
                titlebar: Some(TitlebarOptions {
                    title: Some(i18n.app_menu_name.into()),
                    ..Default::default()
                }),
                window_bounds: Some(window_bounds),
                ..WindowOptions::default()
            };

            cx.open_window(window_options, |window, cx| {
                let view = cx.new(|cx| PdfViewer::new(config, cx));
                cx.new(|cx| Root::new(view, window, cx))
            })?;
            Ok::<_, anyhow::Error>(())
        })
        .detach();

        cx.activate(true);
    });
}
