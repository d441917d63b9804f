/*!
 * Locale handling for translation targets.
 *
 * Resolves locale names such as "fr", "jpn" or "zh-CN" against the ISO 639
 * registry. The full name the user supplied is kept verbatim (it names the
 * per-language output directory), while the resolved language drives the
 * English wording used in translation prompts.
 */

use std::fmt;
use std::hash::{Hash, Hasher};

use isolang::Language;

use crate::errors::ConfigError;

/// A validated locale: the original code plus its resolved ISO 639 language
#[derive(Debug, Clone)]
pub struct Locale {
    /// The locale code as supplied, e.g. "fr" or "zh-CN"
    code: String,
    /// Resolved language
    language: Language,
}

impl Locale {
    /// Parse a locale name into a validated locale.
    ///
    /// Accepts ISO 639-1 (2-letter) and ISO 639-3 (3-letter) codes, optionally
    /// followed by a region or script subtag separated by `-` or `_`
    /// (e.g. "pt-BR", "zh-Hans"). The subtag is preserved but not validated.
    pub fn parse(code: &str) -> Result<Self, ConfigError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidLocale(code.to_string()));
        }

        let primary = trimmed
            .split(['-', '_'])
            .next()
            .unwrap_or(trimmed)
            .to_lowercase();

        let language = match primary.len() {
            2 => Language::from_639_1(&primary),
            3 => Language::from_639_3(&primary),
            _ => None,
        }
        .ok_or_else(|| ConfigError::InvalidLocale(trimmed.to_string()))?;

        Ok(Self {
            code: trimmed.to_string(),
            language,
        })
    }

    /// The locale code as originally supplied
    pub fn code(&self) -> &str {
        &self.code
    }

    /// English language name used in translation prompts, with the subtag
    /// appended when present, e.g. "Chinese (CN)"
    pub fn english_name(&self) -> String {
        let name = self.language.to_name();
        match self.code.split_once(['-', '_']) {
            Some((_, subtag)) if !subtag.is_empty() => format!("{} ({})", name, subtag),
            _ => name.to_string(),
        }
    }

    /// Resolved ISO 639 language
    pub fn language(&self) -> Language {
        self.language
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.code.eq_ignore_ascii_case(&other.code)
    }
}

impl Eq for Locale {}

impl Hash for Locale {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.to_ascii_lowercase().hash(state);
    }
}

/// Parse a comma-separated locale list such as "en,ja,zh-CN".
///
/// Every entry must resolve; the first invalid entry aborts with a
/// configuration error naming the bad code.
pub fn parse_locale_list(codes: &str) -> Result<Vec<Locale>, ConfigError> {
    codes
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(Locale::parse)
        .collect()
}
