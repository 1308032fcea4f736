//! Extraction of pipeline items from portal pages.
//!
//! The stages only see the [`PeriodExtractor`] and [`PhotoIdExtractor`]
//! traits, so the parsing strategy can be swapped (or replaced by canned
//! results in tests) without touching the pipeline.

use crate::error::Result;
use crate::types::PeriodKey;
use regex::Regex;

/// Pattern matching one period option on the album overview page
pub const PERIOD_PATTERN: &str = r"option data-month='(\d+)' data-year='(\d+)'";

/// Pattern matching one quoted photo id in an album response
pub const PHOTO_ID_PATTERN: &str = r#""(\d+)""#;

/// Turns the album overview page into periods, in document order
pub trait PeriodExtractor: Send + Sync {
    /// Every period listed in `body`, duplicates included
    fn extract(&self, body: &str) -> Vec<PeriodKey>;
}

/// Turns an album response into photo ids, in document order
pub trait PhotoIdExtractor: Send + Sync {
    /// Every photo id listed in `body`, duplicates included
    fn extract(&self, body: &str) -> Vec<u64>;
}

/// Regex-backed [`PeriodExtractor`]
///
/// The pattern must have two capture groups: month, then year.
#[derive(Clone, Debug)]
pub struct RegexPeriodExtractor {
    pattern: Regex,
}

impl RegexPeriodExtractor {
    /// Extractor for the portal's `<option data-month=.. data-year=..>` markup
    pub fn new() -> Result<Self> {
        Self::with_pattern(PERIOD_PATTERN)
    }

    /// Extractor for a custom pattern
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl PeriodExtractor for RegexPeriodExtractor {
    fn extract(&self, body: &str) -> Vec<PeriodKey> {
        self.pattern
            .captures_iter(body)
            .filter_map(|caps| {
                let month = caps.get(1)?.as_str();
                let year = caps.get(2)?.as_str();
                match (month.parse::<u32>(), year.parse::<i32>()) {
                    (Ok(month), Ok(year)) => Some(PeriodKey::new(year, month)),
                    _ => {
                        tracing::debug!(month, year, "skipping unparsable period");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Regex-backed [`PhotoIdExtractor`]
///
/// The pattern must capture the numeric id in its first group.
#[derive(Clone, Debug)]
pub struct RegexPhotoIdExtractor {
    pattern: Regex,
}

impl RegexPhotoIdExtractor {
    /// Extractor for quoted numeric ids
    pub fn new() -> Result<Self> {
        Self::with_pattern(PHOTO_ID_PATTERN)
    }

    /// Extractor for a custom pattern
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl PhotoIdExtractor for RegexPhotoIdExtractor {
    fn extract(&self, body: &str) -> Vec<u64> {
        self.pattern
            .captures_iter(body)
            .filter_map(|caps| {
                let raw = caps.get(1)?.as_str();
                match raw.parse::<u64>() {
                    Ok(id) => Some(id),
                    Err(e) => {
                        tracing::debug!(raw, error = %e, "skipping unparsable photo id");
                        None
                    }
                }
            })
            .collect()
    }
}
