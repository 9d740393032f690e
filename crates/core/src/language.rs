//! Supported display languages.

use serde::{Deserialize, Serialize};

/// A language the widget can render labels and legal text in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    De,
}

impl Language {
    /// Every supported language, in fallback-table order.
    pub const ALL: [Language; 3] = [Language::Es, Language::En, Language::De];

    /// The two-letter code used as a key in rule documents.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::De => "de",
        }
    }

    /// Parse a language code such as `es`, `EN` or `de-AT`.
    ///
    /// Region suffixes are ignored; unknown codes return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            "de" => Some(Language::De),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unsupported language: {s}"))
    }
}
