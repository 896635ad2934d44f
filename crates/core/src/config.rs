//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the code that needs it.
//! The engine never reads environment variables itself; the binary reads them and hands the
//! raw values to the parsing helpers here.
//!
//! Nothing in this module changes a verdict. Configuration only selects how the static
//! clinical context is presented.

use crate::constants::DEFAULT_LOCALE;
use crate::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// Language used for descriptive clinical text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    De,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-gb" | "en-us" => Ok(Self::En),
            "de" | "de-de" | "de-at" | "de-ch" => Ok(Self::De),
            other => Err(CoreError::UnknownLocale(other.to_owned())),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    locale: Locale,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

/// Parse the locale from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default locale.
pub fn locale_from_env_value(value: Option<String>) -> CoreResult<Locale> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<Locale>()).transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_LOCALE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_locale_uses_default() {
        assert_eq!(locale_from_env_value(None).unwrap(), Locale::En);
        assert_eq!(locale_from_env_value(Some("   ".into())).unwrap(), Locale::En);
    }

    #[test]
    fn parses_regional_variants() {
        assert_eq!(locale_from_env_value(Some("de-AT".into())).unwrap(), Locale::De);
        assert_eq!(locale_from_env_value(Some(" EN ".into())).unwrap(), Locale::En);
    }

    #[test]
    fn rejects_unknown_locale() {
        let err = locale_from_env_value(Some("fr".into())).expect_err("should reject fr");
        assert!(matches!(err, CoreError::UnknownLocale(code) if code == "fr"));
    }

    #[test]
    fn config_exposes_locale() {
        assert_eq!(CoreConfig::default().locale(), Locale::En);
        assert_eq!(CoreConfig::new(Locale::De).locale(), Locale::De);
    }
}
