use std::path::PathBuf;

pub const DOCUMENT_ENV: &str = "PDFPANE_DOCUMENT";
pub const SENDER_NAME_ENV: &str = "PDFPANE_SENDER_NAME";
pub const DEFAULT_SENDER_NAME: &str = "Akbar Khushnazarov";
/// Name of the PDF embedded in the binary under `assets/`.
pub const BUNDLED_DOCUMENT: &str = "sample.pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Bundled,
    File(PathBuf),
}

impl DocumentSource {
    pub fn display_name(&self) -> String {
        match self {
            Self::Bundled => BUNDLED_DOCUMENT.to_string(),
            Self::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub document: DocumentSource,
    pub sender_name: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            document: DocumentSource::Bundled,
            sender_name: DEFAULT_SENDER_NAME.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let document = non_empty(DOCUMENT_ENV)
            .map(|path| DocumentSource::File(PathBuf::from(path)))
            .unwrap_or(DocumentSource::Bundled);
        let sender_name =
            non_empty(SENDER_NAME_ENV).unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string());

        crate::debug_log!(
            "[config] document={} sender={}",
            document.display_name(),
            sender_name
        );

        Self {
            document,
            sender_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ViewerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ViewerConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_bundled_document() {
        assert_eq!(config_from(&[]), ViewerConfig::default());
    }

    #[test]
    fn reads_document_path_and_sender() {
        let config = config_from(&[
            (DOCUMENT_ENV, "/tmp/report.pdf"),
            (SENDER_NAME_ENV, "  Jane Roe "),
        ]);
        assert_eq!(
            config.document,
            DocumentSource::File(PathBuf::from("/tmp/report.pdf"))
        );
        assert_eq!(config.sender_name, "Jane Roe");
        assert_eq!(config.document.display_name(), "report.pdf");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = config_from(&[(DOCUMENT_ENV, "   "), (SENDER_NAME_ENV, "")]);
        assert_eq!(config, ViewerConfig::default());
    }
}
