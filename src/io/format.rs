use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

/// Supported document formats for stored configuration.
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
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => "yaml",
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => "toml",
        }
    }

    /// Formats compiled into this build.
    pub fn available() -> Vec<DocumentFormat> {
        vec![
            DocumentFormat::Json,
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml,
            #[cfg(feature = "toml")]
            DocumentFormat::Toml,
        ]
    }

    /// Comma-separated names of [`DocumentFormat::available`].
    pub fn format_list() -> String {
        let items: Vec<String> = Self::available()
            .into_iter()
            .map(|format| format.to_string())
            .collect();
        items.join(", ")
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentFormat {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            #[cfg(feature = "toml")]
            "toml" => Ok(DocumentFormat::Toml),
            other => bail!(
                "unsupported document format '{other}' (expected one of: {})",
                DocumentFormat::format_list()
            ),
        }
    }
}
