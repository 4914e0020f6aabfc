use anyhow::anyhow;
use gpui::*;
use gpui_component::IconNamed;
use rust_embed::RustEmbed;
use std::borrow::Cow;

/// Icons and the bundled sample document, embedded from `./assets`.
#[derive(RustEmbed)]
#[folder = "./assets"]
#[include = "icons/**/*.svg"]
#[include = "*.pdf"]
pub struct Assets;

impl Assets {
    pub fn bundled_document(name: &str) -> Option<Vec<u8>> {
        Self::get(name).map(|file| file.data.into_owned())
    }
}

impl AssetSource for Assets {
    fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        if path.is_empty() {
            return Ok(None);
        }

        Self::get(path)
            .map(|f| Some(f.data))
            .ok_or_else(|| anyhow!("could not find asset at path \"{path}\""))
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        Ok(Self::iter()
            .filter_map(|p| p.starts_with(path).then(|| p.into()))
            .collect())
    }
}

pub enum IconName {
    File,
    LoaderCircle,
    Plus,
    Minus,
    RotateCcw,
    Close,
    EllipsisVertical,
    CloudDownload,
}

impl IconNamed for IconName {
    fn path(self) -> gpui::SharedString {
        match self {
            Self::File => "icons/file.svg",
            Self::LoaderCircle => "icons/loader-circle.svg",
            Self::Plus => "icons/plus.svg",
            Self::Minus => "icons/minus.svg",
            Self::RotateCcw => "icons/rotate-ccw.svg",
            Self::Close => "icons/close.svg",
            Self::EllipsisVertical => "icons/ellipsis-vertical.svg",
            Self::CloudDownload => "icons/cloud-download.svg",
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::{Assets, IconName};
    use crate::config::BUNDLED_DOCUMENT;
    use gpui_component::IconNamed;

    #[test]
    fn bundled_document_is_a_pdf() {
        let bytes = Assets::bundled_document(BUNDLED_DOCUMENT).expect("sample.pdf embedded");
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn every_icon_is_embedded() {
        let icons = [
            IconName::File,
            IconName::LoaderCircle,
            IconName::Plus,
            IconName::Minus,
            IconName::RotateCcw,
            IconName::Close,
            IconName::EllipsisVertical,
            IconName::CloudDownload,
        ];
        for icon in icons {
            let path = icon.path();
            assert!(Assets::get(path.as_ref()).is_some(), "{path}");
        }
    }
}
