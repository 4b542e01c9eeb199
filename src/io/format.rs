use std::{fmt, path::Path};

/// Formats a method document or a saved cell state can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "toml")]
    Toml,
}

impl DocumentFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            #[cfg(feature = "toml")]
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    /// Guesses from the file extension, falling back to JSON.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => write!(f, "yaml"),
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => write!(f, "toml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_pick_formats() {
        assert_eq!(
            DocumentFormat::from_extension("JSON"),
            Some(DocumentFormat::Json)
        );
        assert_eq!(DocumentFormat::from_extension("ini"), None);
        assert_eq!(
            DocumentFormat::from_path(Path::new("method.txt")),
            DocumentFormat::Json
        );
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yml_is_yaml() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("cells/method.yml")),
            DocumentFormat::Yaml
        );
    }
}
