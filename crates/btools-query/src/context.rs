use chrono::{NaiveDate, Utc};

/// Default implicit minimum share (percent) of the dominant audience gender.
///
/// Applied by the gender filter even when no explicit share is requested.
pub const DEFAULT_GENDER_DOMINANCE_MIN: f64 = 60.0;

/// Inputs the engine needs besides the catalog and the criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryContext {
    /// Reference date for "days since last post" and AQS recency.
    pub today: NaiveDate,
    pub gender_dominance_min: f64,
}

impl QueryContext {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            gender_dominance_min: DEFAULT_GENDER_DOMINANCE_MIN,
        }
    }

    #[must_use]
    pub fn with_gender_dominance_min(mut self, share: f64) -> Self {
        self.gender_dominance_min = share;
        self
    }

    /// Context for the current UTC date using the configured gender threshold.
    #[must_use]
    pub fn from_config(config: &btools_core::AppConfig) -> Self {
        Self::new(Utc::now().date_naive()).with_gender_dominance_min(config.gender_dominance_min)
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}
