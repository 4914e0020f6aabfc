use crate::config::{BUNDLED_DOCUMENT, DocumentSource};
use crate::i18n::{I18n, Language};
use crate::icons::Assets;
use anyhow::{Context as _, Result, anyhow};
use gpui::RenderImage as GpuiRenderImage;
use image::{Frame as RasterFrame, RgbaImage};
use pdfium_render::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Instant, SystemTime};

static PDFIUM_INSTANCE: OnceLock<Result<Pdfium, String>> = OnceLock::new();
static PDFIUM_DOCUMENT_CACHE: OnceLock<Mutex<Option<CachedPdfDocument>>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
enum CachedPdfDocumentKey {
    Bundled,
    File {
        canonical_path: PathBuf,
        file_len: Option<u64>,
        modified: Option<SystemTime>,
    },
}

struct CachedPdfDocument {
    key: CachedPdfDocumentKey,
    document: PdfDocument<'static>,
}

fn shared_pdfium(language: Language) -> Result<&'static Pdfium> {
    match PDFIUM_INSTANCE.get_or_init(|| init_pdfium(language).map_err(|err| format!("{err:#}"))) {
        Ok(pdfium) => Ok(pdfium),
        Err(message) => Err(anyhow!("{message}")),
    }
}

fn init_pdfium(language: Language) -> Result<Pdfium> {
    let i18n = I18n::new(language);

    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./lib"))
        .or_else(|err| {
            crate::debug_log!("[pdfium] ./lib failed: {}", err);
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        })
        .or_else(|err| {
            crate::debug_log!("[pdfium] ./ failed: {}, trying system library", err);
            Pdfium::bind_to_system_library()
        })
        .context(i18n.pdfium_not_found)?;

    crate::debug_log!("[pdfium] init success");
    Ok(Pdfium::new(bindings))
}

pub(super) fn ensure_pdfium_ready(language: Language) -> Result<()> {
    shared_pdfium(language).map(|_| ())
}

fn document_cache() -> &'static Mutex<Option<CachedPdfDocument>> {
    PDFIUM_DOCUMENT_CACHE.get_or_init(|| Mutex::new(None))
}

fn document_cache_key(source: &DocumentSource) -> CachedPdfDocumentKey {
    match source {
        DocumentSource::Bundled => CachedPdfDocumentKey::Bundled,
        DocumentSource::File(path) => {
            let canonical_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
            let metadata = std::fs::metadata(&canonical_path).ok();

            CachedPdfDocumentKey::File {
                canonical_path,
                file_len: metadata.as_ref().map(|meta| meta.len()),
                modified: metadata.and_then(|meta| meta.modified().ok()),
            }
        }
    }
}

fn open_document(
    key: &CachedPdfDocumentKey,
    language: Language,
) -> Result<PdfDocument<'static>> {
    let i18n = I18n::new(language);
    let pdfium = shared_pdfium(language)?;

    match key {
        CachedPdfDocumentKey::Bundled => {
            let bytes = Assets::bundled_document(BUNDLED_DOCUMENT)
                .ok_or_else(|| anyhow!(i18n.bundled_document_missing(BUNDLED_DOCUMENT)))?;
            pdfium
                .load_pdf_from_byte_vec(bytes, None)
                .with_context(|| i18n.pdfium_cannot_open_file(Path::new(BUNDLED_DOCUMENT)))
        }
        CachedPdfDocumentKey::File { canonical_path, .. } => pdfium
            .load_pdf_from_file(canonical_path, None)
            .with_context(|| i18n.pdfium_cannot_open_file(canonical_path)),
    }
}

/// Runs `f` against the cached document for `source`, opening it on a miss.
fn with_document<R>(
    source: &DocumentSource,
    language: Language,
    f: impl FnOnce(&PdfDocument<'static>) -> Result<R>,
) -> Result<R> {
    let i18n = I18n::new(language);
    let cache_key = document_cache_key(source);
    let mut cached_document_guard = document_cache()
        .lock()
        .map_err(|_| anyhow!(i18n.pdfium_cache_lock_poisoned))?;

    let cache_hit = cached_document_guard
        .as_ref()
        .is_some_and(|cached| cached.key == cache_key);

    if !cache_hit {
        let document = open_document(&cache_key, language)?;
        *cached_document_guard = Some(CachedPdfDocument {
            key: cache_key,
            document,
        });
    }

    match cached_document_guard.as_ref() {
        Some(cached) => f(&cached.document),
        None => Err(anyhow!(i18n.pdfium_cache_lock_poisoned)),
    }
}

/// Opens the document and reports its page count.
pub(super) fn load_document_summary(source: &DocumentSource, language: Language) -> Result<usize> {
    crate::debug_log!("[pdf][load] opening: {}", source.display_name());

    let page_count = with_document(source, language, |document| {
        Ok(document.pages().len() as usize)
    })?;

    crate::debug_log!(
        "[pdf][load] {} loaded, pages: {}",
        source.display_name(),
        page_count
    );
    Ok(page_count)
}

/// Rasterises the requested pages at `target_width` device pixels.
///
/// Pages that fail individually are logged and left out of the result so the
/// caller can mark them as failed.
pub(super) fn load_page_images(
    source: &DocumentSource,
    page_indices: &[usize],
    target_width: u32,
    language: Language,
) -> Result<Vec<(usize, Arc<GpuiRenderImage>)>> {
    if page_indices.is_empty() {
        return Ok(Vec::new());
    }

    let file_name = source.display_name();
    let render_config = PdfRenderConfig::new().set_target_width(target_width as i32);
    let mut seen = HashSet::new();
    let requested: Vec<usize> = page_indices
        .iter()
        .copied()
        .filter(|ix| seen.insert(*ix))
        .collect();

    with_document(source, language, |document| {
        let total_pages = document.pages().len() as usize;
        let mut page_images = Vec::with_capacity(requested.len());

        for ix in requested {
            let started_at = Instant::now();
            let page_num = ix + 1;

            if ix >= total_pages || ix > u16::MAX as usize {
                crate::debug_log!(
                    "[pdf][render] {} p{} skipped: out of range (total_pages={})",
                    file_name,
                    page_num,
                    total_pages
                );
                continue;
            }

            let page = match document.pages().get(ix as u16) {
                Ok(page) => page,
                Err(err) => {
                    crate::debug_log!(
                        "[pdf][render] {} p{} failed: get_page error: {}",
                        file_name,
                        page_num,
                        err
                    );
                    continue;
                }
            };

            let bitmap = match page.render_with_config(&render_config) {
                Ok(bitmap) => bitmap,
                Err(err) => {
                    crate::debug_log!(
                        "[pdf][render] {} p{} failed: render error: {} | {}ms",
                        file_name,
                        page_num,
                        err,
                        started_at.elapsed().as_millis()
                    );
                    continue;
                }
            };

            match bitmap_to_gpui_render_image(&bitmap, language) {
                Ok(image) => {
                    crate::debug_log!(
                        "[pdf][render] {} p{} ok | {}ms target_width={}",
                        file_name,
                        page_num,
                        started_at.elapsed().as_millis(),
                        target_width
                    );
                    page_images.push((ix, image));
                }
                Err(err) => {
                    crate::debug_log!(
                        "[pdf][render] {} p{} failed: upload error: {}",
                        file_name,
                        page_num,
                        err
                    );
                }
            }
        }

        Ok(page_images)
    })
}

#[allow(deprecated)]
fn bitmap_to_gpui_render_image(
    bitmap: &PdfBitmap,
    language: Language,
) -> Result<Arc<GpuiRenderImage>> {
    let i18n = I18n::new(language);
    let width = bitmap.width() as u32;
    let height = bitmap.height() as u32;
    if width == 0 || height == 0 {
        return Err(anyhow!(i18n.invalid_bitmap_size(width, height)));
    }

    let format = bitmap.format().unwrap_or(PdfBitmapFormat::BGRA);
    let mut bytes = match format {
        PdfBitmapFormat::BGRA | PdfBitmapFormat::BGRx | PdfBitmapFormat::BRGx => {
            bitmap.as_raw_bytes()
        }
        _ => rgba_to_bgra(bitmap.as_rgba_bytes()),
    };

    let expected_len = width as usize * height as usize * 4;
    if bytes.len() != expected_len {
        bytes = rgba_to_bgra(bitmap.as_rgba_bytes());
        if bytes.len() != expected_len {
            return Err(anyhow!(i18n.bitmap_len_mismatch(bytes.len(), expected_len)));
        }
    }

    if matches!(format, PdfBitmapFormat::BGRx | PdfBitmapFormat::BRGx) {
        force_opaque(&mut bytes);
    }

    let buffer = RgbaImage::from_raw(width, height, bytes)
        .ok_or_else(|| anyhow!(i18n.cannot_create_image_buffer(width, height)))?;

    // gpui expects BGRA in the frame even though the buffer type says RGBA.
    Ok(Arc::new(GpuiRenderImage::new([RasterFrame::new(buffer)])))
}

fn rgba_to_bgra(mut rgba: Vec<u8>) -> Vec<u8> {
    for pixel in rgba.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }
    rgba
}

fn force_opaque(bytes: &mut [u8]) {
    for pixel in bytes.chunks_exact_mut(4) {
        pixel[3] = 255;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_swaps_red_and_blue() {
        assert_eq!(
            rgba_to_bgra(vec![1, 2, 3, 4, 5, 6, 7, 8]),
            vec![3, 2, 1, 4, 7, 6, 5, 8]
        );
    }

    #[test]
    fn opaque_sets_alpha_only() {
        let mut bytes = vec![9, 9, 9, 0, 1, 2, 3, 7];
        force_opaque(&mut bytes);
        assert_eq!(bytes, vec![9, 9, 9, 255, 1, 2, 3, 255]);
    }

    #[test]
    fn bundled_source_has_stable_cache_key() {
        assert_eq!(
            document_cache_key(&DocumentSource::Bundled),
            document_cache_key(&DocumentSource::Bundled)
        );
    }

    #[test]
    fn missing_file_still_produces_key() {
        let key = document_cache_key(&DocumentSource::File(PathBuf::from(
            "/definitely/not/here.pdf",
        )));
        assert_eq!(
            key,
            CachedPdfDocumentKey::File {
                canonical_path: PathBuf::from("/definitely/not/here.pdf"),
                file_len: None,
                modified: None,
            }
        );
    }
}
