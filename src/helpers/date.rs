//! Date helper functions

use chrono::{DateTime, Locale, Utc};
use chrono_tz::Tz;

/// Formats store timestamps in the site's time zone and language
#[derive(Debug, Clone, Copy)]
pub struct DateFormatter {
    tz: Tz,
    locale: Locale,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Europe::Paris,
            locale: Locale::fr_FR,
        }
    }
}

impl DateFormatter {
    /// Build from config values, falling back to Paris / French on bad input
    pub fn new(timezone: &str, locale: &str) -> Self {
        let fallback = Self::default();
        let tz = match timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                if !timezone.is_empty() {
                    tracing::warn!("Unknown timezone {:?}, using {}", timezone, fallback.tz);
                }
                fallback.tz
            }
        };
        let locale = Locale::try_from(locale).unwrap_or_else(|_| {
            tracing::warn!("Unknown locale {:?}, using fr_FR", locale);
            fallback.locale
        });
        Self { tz, locale }
    }

    /// Long form, e.g. "15 janvier 2024"
    pub fn long(&self, date: &DateTime<Utc>) -> String {
        date.with_timezone(&self.tz)
            .format_localized("%-d %B %Y", self.locale)
            .to_string()
    }

    /// Machine-readable value for `<time datetime>`
    pub fn iso(&self, date: &DateTime<Utc>) -> String {
        date.with_timezone(&self.tz)
            .format("%Y-%m-%dT%H:%M:%S%:z")
            .to_string()
    }
}
