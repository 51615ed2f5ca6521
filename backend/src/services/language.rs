//! Script-range language classification
//!
//! A query is Tamil when any of its characters lies in the Tamil Unicode
//! block (U+0B80..=U+0BFF). Mixed-script input is therefore routed as Tamil.

use serde::{Deserialize, Serialize};

const TAMIL_BLOCK: std::ops::RangeInclusive<char> = '\u{0B80}'..='\u{0BFF}';

/// Language tag attached to a query at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Tamil,
    English,
}

impl Language {
    /// Code understood by the translation backend.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Tamil => "ta",
            Self::English => "en",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tamil => "tamil",
            Self::English => "english",
        }
    }

    /// Locale used for user-facing labels.
    pub fn locale(&self) -> &'static str {
        self.code()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(text: &str) -> Language {
    if text.chars().any(|c| TAMIL_BLOCK.contains(&c)) {
        Language::Tamil
    } else {
        Language::English
    }
}
