pub mod app_config;
pub mod blogger;
pub mod config;
pub mod criteria;
mod lenient;
pub mod selection;

pub use app_config::{AppConfig, Environment};
pub use blogger::{Audience, AudienceSlice, Blogger, Currency, Pricing};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::{parse_numeric_input, CriteriaForm, FilterCriteria, SortDirection, SortKey};
pub use selection::SelectionSet;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),
}
