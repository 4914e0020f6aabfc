use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::ops::Deref;
use std::path::Path;
use std::sync::OnceLock;

#[derive(RustEmbed)]
#[folder = "./assets/i18n"]
#[include = "*.json"]
struct LocaleAssets;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Language {
    ZhCn,
    EnUs,
}

impl Language {
    pub fn detect() -> Self {
        sys_locale::get_locale()
            .map(|tag| Self::from_locale_tag(&tag))
            .unwrap_or(Self::EnUs)
    }

    fn from_locale_tag(raw: &str) -> Self {
        let tag = raw.trim().to_ascii_lowercase();
        let is_chinese = tag.starts_with("zh")
            || tag == "cn"
            || tag.starts_with("cn_")
            || tag.starts_with("cn-")
            || tag.contains("_zh")
            || tag.contains("-zh");
        if is_chinese { Self::ZhCn } else { Self::EnUs }
    }

    fn file_name(self) -> &'static str {
        match self {
            Self::ZhCn => "zh_CN.json",
            Self::EnUs => "en_US.json",
        }
    }
}

macro_rules! locale_message_fields {
    ($macro:ident) => {
        $macro! {
            app_menu_name,
            enable_logging_button,
            disable_logging_button,
            quit_button,
            zoom_in_button,
            zoom_out_button,
            zoom_reset_button,
            close_button,
            download_button,
            loading_document,
            no_pages,
            document_load_failed,
            page_render_failed,
            thumbnail_render_failed,
            pdfium_not_found,
            pdfium_cannot_open_file,
            pdfium_cache_lock_poisoned,
            bundled_document_missing,
            invalid_bitmap_size,
            bitmap_len_mismatch,
            cannot_create_image_buffer,
        }
    };
}

macro_rules! define_raw_locale_messages {
    ($($field:ident),+ $(,)?) => {
        #[derive(Debug, Deserialize)]
        #[serde(deny_unknown_fields)]
        struct RawLocaleMessages {
            $(
                $field: String,
            )+
        }
    };
}

macro_rules! define_locale_messages {
    ($($field:ident),+ $(,)?) => {
        #[derive(Debug)]
        pub struct LocaleMessages {
            $(
                pub $field: &'static str,
            )+
        }
    };
}

macro_rules! impl_from_raw_locale_messages {
    ($($field:ident),+ $(,)?) => {
        impl From<RawLocaleMessages> for LocaleMessages {
            fn from(raw: RawLocaleMessages) -> Self {
                Self {
                    $(
                        $field: leak_str(raw.$field),
                    )+
                }
            }
        }
    };
}

locale_message_fields!(define_raw_locale_messages);
locale_message_fields!(define_locale_messages);
locale_message_fields!(impl_from_raw_locale_messages);

fn leak_str(value: String) -> &'static str {
    Box::leak(value.into_boxed_str())
}

static ZH_CN_MESSAGES: OnceLock<LocaleMessages> = OnceLock::new();
static EN_US_MESSAGES: OnceLock<LocaleMessages> = OnceLock::new();

#[derive(Clone, Copy, Debug)]
pub struct I18n {
    messages: &'static LocaleMessages,
}

impl I18n {
    pub fn new(lang: Language) -> Self {
        Self {
            messages: messages_for(lang),
        }
    }

    pub fn document_load_failed(self, message: &str) -> String {
        format_template(
            self.document_load_failed,
            &[("message", message.to_string())],
        )
    }

    pub fn pdfium_cannot_open_file(self, path: &Path) -> String {
        format_template(
            self.pdfium_cannot_open_file,
            &[("path", path.to_string_lossy().to_string())],
        )
    }

    pub fn bundled_document_missing(self, name: &str) -> String {
        format_template(self.bundled_document_missing, &[("name", name.to_string())])
    }

    pub fn invalid_bitmap_size(self, width: u32, height: u32) -> String {
        format_template(
            self.invalid_bitmap_size,
            &[("width", width.to_string()), ("height", height.to_string())],
        )
    }

    pub fn bitmap_len_mismatch(self, got: usize, expected: usize) -> String {
        format_template(
            self.bitmap_len_mismatch,
            &[("got", got.to_string()), ("expected", expected.to_string())],
        )
    }

    pub fn cannot_create_image_buffer(self, width: u32, height: u32) -> String {
        format_template(
            self.cannot_create_image_buffer,
            &[("width", width.to_string()), ("height", height.to_string())],
        )
    }
}

impl Deref for I18n {
    type Target = LocaleMessages;

    fn deref(&self) -> &Self::Target {
        self.messages
    }
}

fn messages_for(lang: Language) -> &'static LocaleMessages {
    let slot = match lang {
        Language::ZhCn => &ZH_CN_MESSAGES,
        Language::EnUs => &EN_US_MESSAGES,
    };
    slot.get_or_init(|| load_messages(lang))
}

/// Parses the embedded catalog for `lang`, falling back to English.
///
/// Both catalogs are compiled in, so a failure here is a packaging bug.
fn load_messages(lang: Language) -> LocaleMessages {
    parse_catalog(lang)
        .or_else(|err| {
            crate::debug_log!("[i18n] {:#}, falling back to {}", err, Language::EnUs.file_name());
            parse_catalog(Language::EnUs)
        })
        .unwrap_or_else(|err| panic!("no usable i18n catalog: {err:#}"))
}

fn parse_catalog(lang: Language) -> anyhow::Result<LocaleMessages> {
    let file = LocaleAssets::get(lang.file_name())
        .with_context(|| format!("{} is not embedded", lang.file_name()))?;
    let raw: RawLocaleMessages = serde_json::from_slice(&file.data)
        .with_context(|| format!("{} does not parse", lang.file_name()))?;
    Ok(raw.into())
}

fn format_template(template: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{key}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_tags_map_to_languages() {
        assert_eq!(Language::from_locale_tag("zh-CN"), Language::ZhCn);
        assert_eq!(Language::from_locale_tag("zh_Hans_CN"), Language::ZhCn);
        assert_eq!(Language::from_locale_tag("en-US"), Language::EnUs);
        assert_eq!(Language::from_locale_tag(""), Language::EnUs);
    }

    #[test]
    fn embedded_catalogs_parse() {
        for lang in [Language::EnUs, Language::ZhCn] {
            assert!(parse_catalog(lang).is_ok(), "{}", lang.file_name());
        }
    }

    #[test]
    fn templates_are_filled() {
        let i18n = I18n::new(Language::EnUs);
        assert!(i18n.document_load_failed("boom").contains("boom"));
        assert!(i18n.invalid_bitmap_size(3, 0).contains('3'));
        assert_eq!(
            format_template("{a} and {b}", &[("a", "x".into()), ("b", "y".into())]),
            "x and y"
        );
    }
}
